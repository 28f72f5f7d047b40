//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! In-memory host.

use crate::{InjectError, Injector, LlcpFrame, SapPair};
use bytes::Bytes;
use std::collections::VecDeque;
use tracing::info;

/// An [`Injector`] that keeps everything in memory.
///
/// Notifications and outbound frames are recorded in order. Inbound SNEP
/// requests are queued with [`MemoryInjector::push_inbound`] under the
/// endpoint and SAP pair they arrive at, and handed out first in, first out
/// per address.
#[derive(Clone, Debug, Default)]
pub struct MemoryInjector {
    notifications: Vec<Bytes>,
    frames: Vec<(usize, LlcpFrame)>,
    inbound: VecDeque<(usize, SapPair, Bytes)>,
    reject: bool,
}

impl MemoryInjector {
    /// Creates a host that accepts everything and has no inbound requests.
    pub fn new() -> Self {
        MemoryInjector::default()
    }

    /// Makes every injection fail with [`InjectError::Rejected`].
    pub fn set_reject(&mut self, reject: bool) {
        self.reject = reject;
    }

    /// Queues a SNEP request received by remote endpoint `endpoint` at
    /// `saps`, for [`Injector::retrieve_data`].
    pub fn push_inbound(&mut self, endpoint: usize, saps: SapPair, request: impl Into<Bytes>) {
        self.inbound.push_back((endpoint, saps, request.into()));
    }

    /// Notification packets injected so far.
    pub fn notifications(&self) -> &[Bytes] {
        &self.notifications
    }

    /// Outbound frames injected so far, with their endpoint index.
    pub fn frames(&self) -> &[(usize, LlcpFrame)] {
        &self.frames
    }

    /// Inbound requests not yet retrieved.
    pub fn pending_inbound(&self) -> usize {
        self.inbound.len()
    }

    fn check(&self) -> Result<(), InjectError> {
        if self.reject {
            Err(InjectError::Rejected)
        } else {
            Ok(())
        }
    }
}

impl Injector for MemoryInjector {
    fn inject_notification(&mut self, packet: Bytes) -> Result<(), InjectError> {
        self.check()?;
        info!("notification {:02X?}", &packet[..]);
        self.notifications.push(packet);
        Ok(())
    }

    fn inject_data(&mut self, endpoint: usize, frame: LlcpFrame) -> Result<(), InjectError> {
        self.check()?;
        info!("frame to remote endpoint {}: {:?}", endpoint, frame);
        self.frames.push((endpoint, frame));
        Ok(())
    }

    fn retrieve_data(&mut self, endpoint: usize, saps: SapPair) -> Result<Bytes, InjectError> {
        self.check()?;
        let position = self
            .inbound
            .iter()
            .position(|(index, address, _)| *index == endpoint && *address == saps)
            .ok_or(InjectError::NoData { endpoint, saps })?;
        self.inbound
            .remove(position)
            .map(|(_, _, request)| request)
            .ok_or(InjectError::NoData { endpoint, saps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut host = MemoryInjector::new();
        host.inject_notification(Bytes::from_static(&[0x61, 0x06, 0x00]))
            .unwrap();
        host.inject_data(1, LlcpFrame::Connect {
            saps: SapPair::new(4, 32),
        })
        .unwrap();
        assert_eq!(host.notifications().len(), 1);
        assert_eq!(host.frames()[0].0, 1);
        assert_eq!(host.frames()[0].1.saps(), SapPair::new(4, 32));
    }

    #[test]
    fn inbound_is_first_in_first_out() {
        let mut host = MemoryInjector::new();
        let saps = SapPair::new(4, 32);
        host.push_inbound(0, saps, vec![1u8]);
        host.push_inbound(0, saps, vec![2u8]);
        assert_eq!(&host.retrieve_data(0, saps).unwrap()[..], &[1]);
        assert_eq!(&host.retrieve_data(0, saps).unwrap()[..], &[2]);
        assert!(matches!(
            host.retrieve_data(0, saps),
            Err(InjectError::NoData { endpoint: 0, .. })
        ));
    }

    #[test]
    fn inbound_is_delivered_only_at_its_address() {
        let mut host = MemoryInjector::new();
        host.push_inbound(0, SapPair::new(4, 32), vec![1u8]);
        host.push_inbound(1, SapPair::new(5, 9), vec![2u8]);

        assert!(matches!(
            host.retrieve_data(0, SapPair::new(5, 9)),
            Err(InjectError::NoData { endpoint: 0, .. })
        ));
        assert!(matches!(
            host.retrieve_data(1, SapPair::new(4, 32)),
            Err(InjectError::NoData { endpoint: 1, .. })
        ));
        assert_eq!(host.pending_inbound(), 2);

        assert_eq!(&host.retrieve_data(1, SapPair::new(5, 9)).unwrap()[..], &[2]);
        assert_eq!(&host.retrieve_data(0, SapPair::new(4, 32)).unwrap()[..], &[1]);
        assert_eq!(host.pending_inbound(), 0);
    }

    #[test]
    fn rejecting_host_records_nothing() {
        let mut host = MemoryInjector::new();
        host.set_reject(true);
        assert!(matches!(
            host.inject_notification(Bytes::new()),
            Err(InjectError::Rejected)
        ));
        assert!(host.notifications().is_empty());
    }
}
