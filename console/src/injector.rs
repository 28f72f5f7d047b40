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

//! Host injection points.

use crate::SapPair;
use bytes::Bytes;
use thiserror::Error;

/// Failures reported by the host.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The host refused the packet.
    #[error("rejected by host")]
    Rejected,

    /// Nothing is waiting to be received from the endpoint.
    #[error("no data pending from remote endpoint {endpoint} at {saps}")]
    NoData {
        /// Endpoint index
        endpoint: usize,
        /// Addressing asked for
        saps: SapPair,
    },

    /// The host transport failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An LLCP exchange towards a remote endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LlcpFrame {
    /// Connect to the service at `saps`.
    Connect {
        /// Addressing of the connection
        saps: SapPair,
    },
    /// SNEP PUT request on the link at `saps`.
    SnepPut {
        /// Addressing of the link
        saps: SapPair,
        /// Complete SNEP request
        request: Bytes,
    },
}

impl LlcpFrame {
    /// Addressing of the frame.
    pub fn saps(&self) -> SapPair {
        match self {
            LlcpFrame::Connect { saps } | LlcpFrame::SnepPut { saps, .. } => *saps,
        }
    }
}

///
/// Where built packets leave the console.
///
/// The host implements one method per direction. Calls are synchronous and
/// the console makes at most one per command, after every check has passed.
///
pub trait Injector {
    /// Queues an NCI notification packet for the device host.
    fn inject_notification(&mut self, packet: Bytes) -> Result<(), InjectError>;

    /// Queues an LLCP frame from the host towards remote endpoint `endpoint`.
    fn inject_data(&mut self, endpoint: usize, frame: LlcpFrame) -> Result<(), InjectError>;

    /// Takes the next SNEP PUT request remote endpoint `endpoint` received at
    /// `saps`.
    fn retrieve_data(&mut self, endpoint: usize, saps: SapPair) -> Result<Bytes, InjectError>;
}
