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

//! RF notification builders.
//!
//! Discovery and deactivation only read the device. Activation also moves it,
//! but only when the caller commits the built [`Activation`]: the targeted
//! endpoint becomes the active endpoint, its link state is cleared and the RF
//! interface selection is kept.

use crate::{CommandError, CommandResult, ConsoleConfig, NfcDevice, RemoteEndpoint};
use nfcemu_ncicodec::{
    BitRate, DiscoverNotificationType, NciNotification, RfDeactivateNotification,
    RfDiscoverNotification, RfIntfActivatedNotification, RfTechnologyAndMode,
};
use tracing::debug;

/// How the RF interface of an activation is picked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RfSelection {
    /// First interface matching the endpoint protocol and mode.
    #[default]
    Auto,
    /// Entry of the device's RF interface table.
    Index(usize),
}

fn lookup(device: &NfcDevice, index: usize) -> CommandResult<&RemoteEndpoint> {
    device
        .endpoint(index)
        .ok_or(CommandError::UnknownEndpoint(index as u64))
}

fn discovery_id(index: usize) -> CommandResult<u8> {
    u8::try_from(index + 1).map_err(|_| CommandError::UnknownEndpoint(index as u64))
}

fn technology_and_mode(endpoint: &RemoteEndpoint) -> CommandResult<RfTechnologyAndMode> {
    endpoint
        .technology_and_mode()
        .ok_or(CommandError::UnsupportedTechnology {
            technology: endpoint.technology(),
            mode: endpoint.mode(),
        })
}

/// Builds RF_DISCOVER_NTF for endpoint `index`.
pub fn rf_discover(
    device: &NfcDevice,
    index: usize,
    notification_type: DiscoverNotificationType,
) -> CommandResult<NciNotification> {
    let endpoint = lookup(device, index)?;
    Ok(NciNotification::RfDiscover(RfDiscoverNotification {
        rf_discovery_id: discovery_id(index)?,
        rf_protocol: endpoint.protocol(),
        rf_technology_and_mode: technology_and_mode(endpoint)?,
        rf_technology_specific_parameters: endpoint.technology_parameters().clone(),
        notification_type,
    }))
}

/// A built RF_INTF_ACTIVATED_NTF and the device change it stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    /// Notification to send
    pub notification: NciNotification,
    /// Endpoint being activated
    pub endpoint: usize,
    /// Selected RF interface
    pub rf_interface: usize,
}

impl Activation {
    /// Applies the activation to `device`.
    ///
    /// Indexes outside the device are refused before anything changes.
    pub fn commit(&self, device: &mut NfcDevice) -> CommandResult<()> {
        if self.rf_interface >= device.rf_interfaces().len() {
            return Err(CommandError::UnknownRfInterface(self.rf_interface as i64));
        }
        device.set_active_endpoint(Some(self.endpoint))?;
        device.set_active_rf_interface(Some(self.rf_interface))?;
        if let Some(endpoint) = device.endpoint_mut(self.endpoint) {
            endpoint.clear();
        }
        Ok(())
    }
}

/// Builds RF_INTF_ACTIVATED_NTF.
///
/// Without `index` the active endpoint is used. An RF interface that is
/// already active is kept; otherwise `selection` picks one. The device is left
/// untouched until [`Activation::commit`].
pub fn rf_intf_activated(
    device: &NfcDevice,
    config: &ConsoleConfig,
    index: Option<usize>,
    selection: RfSelection,
) -> CommandResult<Activation> {
    let index = index
        .or(device.active_endpoint())
        .ok_or(CommandError::NoActiveEndpoint)?;
    let endpoint = lookup(device, index)?;

    let rf_index = match (device.active_rf_interface(), selection) {
        (Some(active), _) => active,
        (None, RfSelection::Index(rf_index)) => rf_index,
        (None, RfSelection::Auto) => device
            .find_rf_interface(endpoint.protocol(), endpoint.mode())
            .ok_or(CommandError::NoCompatibleInterface {
                protocol: endpoint.protocol(),
                mode: endpoint.mode(),
            })?,
    };
    let rf_interface = device
        .rf_interfaces()
        .get(rf_index)
        .ok_or(CommandError::UnknownRfInterface(rf_index as i64))?;

    let mode = technology_and_mode(endpoint)?;
    let notification = RfIntfActivatedNotification {
        rf_discovery_id: discovery_id(index)?,
        rf_interface: rf_interface.interface,
        rf_protocol: endpoint.protocol(),
        activation_rf_technology_and_mode: mode,
        max_data_packet_payload_size: config.max_data_packet_payload_size,
        initial_number_of_credits: config.initial_credits,
        rf_technology_specific_parameters: endpoint.technology_parameters().clone(),
        data_exchange_rf_technology_and_mode: mode,
        data_exchange_transmit_bit_rate: BitRate::BitRate106,
        data_exchange_receive_bit_rate: BitRate::BitRate106,
        activation_parameters: endpoint.activation_parameters().clone(),
    };
    debug!(
        "activating remote endpoint {} on rf interface {} ({:?})",
        index, rf_index, rf_interface.interface
    );

    Ok(Activation {
        notification: NciNotification::RfIntfActivated(notification),
        endpoint: index,
        rf_interface: rf_index,
    })
}

/// Builds RF_DEACTIVATE_NTF.
pub fn rf_deactivate(notification: RfDeactivateNotification) -> NciNotification {
    NciNotification::RfDeactivate(notification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfcemu_ncicodec::{RfInterfaceType, RfMode, RfProtocol, RfTechnology};

    fn device() -> NfcDevice {
        NfcDevice::new(vec![
            RemoteEndpoint::new(RfTechnology::A, RfMode::Poll, RfProtocol::T2t)
                .with_technology_parameters(vec![0x44, 0x00, 0x07]),
            RemoteEndpoint::new(RfTechnology::F, RfMode::Listen, RfProtocol::NfcDep),
            RemoteEndpoint::new(RfTechnology::V, RfMode::Listen, RfProtocol::T5t),
            RemoteEndpoint::new(RfTechnology::B, RfMode::Listen, RfProtocol::IsoDep),
        ])
    }

    #[test]
    fn discover_reports_endpoint() {
        let ntf = rf_discover(&device(), 0, DiscoverNotificationType::More).unwrap();
        match ntf {
            NciNotification::RfDiscover(ntf) => {
                assert_eq!(ntf.rf_discovery_id, 1);
                assert_eq!(ntf.rf_protocol, RfProtocol::T2t);
                assert_eq!(ntf.rf_technology_and_mode, RfTechnologyAndMode::NfcAPassivePoll);
                assert_eq!(&ntf.rf_technology_specific_parameters[..], &[0x44, 0x00, 0x07]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            rf_discover(&device(), 2, DiscoverNotificationType::Last),
            Err(CommandError::UnsupportedTechnology { .. })
        ));
    }

    #[test]
    fn activation_needs_an_endpoint() {
        let device = device();
        assert!(matches!(
            rf_intf_activated(&device, &ConsoleConfig::default(), None, RfSelection::Auto),
            Err(CommandError::NoActiveEndpoint)
        ));
    }

    #[test]
    fn activation_selects_and_commits() {
        let mut device = device();
        let config = ConsoleConfig::default().with_initial_credits(2);
        device.endpoint_mut(1).unwrap().link_mut().frames_sent = 4;
        let activation = rf_intf_activated(&device, &config, Some(1), RfSelection::Auto).unwrap();
        assert_eq!(device.active_endpoint(), None);
        activation.commit(&mut device).unwrap();
        match activation.notification {
            NciNotification::RfIntfActivated(ntf) => {
                assert_eq!(ntf.rf_discovery_id, 2);
                assert_eq!(ntf.rf_interface, RfInterfaceType::NfcDep);
                assert_eq!(ntf.initial_number_of_credits, 2);
                assert_eq!(
                    ntf.activation_rf_technology_and_mode,
                    RfTechnologyAndMode::NfcFPassiveListen
                );
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(device.active_rf_interface(), Some(6));
        assert_eq!(device.active_endpoint(), Some(1));
        assert_eq!(device.endpoint(1).unwrap().link().frames_sent, 0);
    }

    #[test]
    fn active_interface_is_kept() {
        let mut device = device();
        device.set_active_rf_interface(Some(0)).unwrap();
        let activation =
            rf_intf_activated(&device, &ConsoleConfig::default(), Some(1), RfSelection::Index(7))
                .unwrap();
        assert_eq!(activation.rf_interface, 0);
        activation.commit(&mut device).unwrap();
        assert_eq!(device.active_rf_interface(), Some(0));
    }

    #[test]
    fn commit_to_a_smaller_device_changes_nothing() {
        let activation =
            rf_intf_activated(&device(), &ConsoleConfig::default(), Some(1), RfSelection::Auto)
                .unwrap();
        let mut smaller = NfcDevice::new(vec![RemoteEndpoint::new(
            RfTechnology::A,
            RfMode::Poll,
            RfProtocol::T2t,
        )]);
        assert!(matches!(
            activation.commit(&mut smaller),
            Err(CommandError::UnknownEndpoint(1))
        ));
        assert_eq!(smaller.active_endpoint(), None);
        assert_eq!(smaller.active_rf_interface(), None);
    }

    #[test]
    fn incompatible_endpoint_is_rejected() {
        let mut device = device();
        device.set_active_endpoint(Some(0)).unwrap();
        assert!(matches!(
            rf_intf_activated(&device, &ConsoleConfig::default(), Some(3), RfSelection::Auto),
            Err(CommandError::NoCompatibleInterface {
                protocol: RfProtocol::IsoDep,
                mode: RfMode::Listen
            })
        ));
        assert_eq!(device.active_endpoint(), Some(0));
    }
}
