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

//! Simulated controller state: the remote endpoint pool, the supported RF
//! interfaces and the active endpoint and interface.

use crate::{CommandError, CommandResult, Tag};
use bytes::Bytes;
use nfcemu_ncicodec::{RfInterfaceType, RfMode, RfProtocol, RfTechnology, RfTechnologyAndMode};
use std::fmt::Formatter;
use tracing::debug;

///
/// An LLCP service access point as given on the command line.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sap {
    /// Take the value from the endpoint's last addressing.
    Auto,
    /// A concrete SAP below 64.
    Number(u8),
}

impl Sap {
    /// Returns `true` for a concrete zero SAP.
    pub fn is_zero(self) -> bool {
        self == Sap::Number(0)
    }
}

impl std::fmt::Display for Sap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sap::Auto => write!(f, "-1"),
            Sap::Number(sap) => write!(f, "{sap}"),
        }
    }
}

///
/// Destination and source SAP of an LLCP exchange.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SapPair {
    /// Destination SAP
    pub dsap: Sap,
    /// Source SAP
    pub ssap: Sap,
}

impl SapPair {
    /// Addressing of an endpoint nothing has talked to yet.
    pub const UNADDRESSED: SapPair = SapPair::new(0, 0);

    /// Creates a concrete pair.
    pub const fn new(dsap: u8, ssap: u8) -> Self {
        SapPair {
            dsap: Sap::Number(dsap),
            ssap: Sap::Number(ssap),
        }
    }

    /// Returns `true` if both sides ask for auto resolution.
    pub fn is_auto(&self) -> bool {
        self.dsap == Sap::Auto && self.ssap == Sap::Auto
    }

    /// Returns `true` if neither side is auto.
    pub fn is_concrete(&self) -> bool {
        self.dsap != Sap::Auto && self.ssap != Sap::Auto
    }

    /// Replaces a fully automatic pair with `last`.
    ///
    /// A pair with only one automatic side is returned unchanged.
    pub fn resolve(self, last: SapPair) -> SapPair {
        if self.is_auto() { last } else { self }
    }
}

impl std::fmt::Display for SapPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.dsap, self.ssap)
    }
}

/// Link activity recorded during one activation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkState {
    /// LLCP connections opened, in order
    pub connections: Vec<SapPair>,
    /// SNEP requests sent to the endpoint
    pub frames_sent: usize,
    /// SNEP requests received from the endpoint
    pub frames_received: usize,
}

///
/// A simulated NFC peer or tag.
///
#[derive(Debug)]
pub struct RemoteEndpoint {
    technology: RfTechnology,
    mode: RfMode,
    protocol: RfProtocol,
    technology_parameters: Bytes,
    activation_parameters: Bytes,
    last_saps: SapPair,
    tag: Option<Box<dyn Tag>>,
    link: LinkState,
}

impl RemoteEndpoint {
    /// Creates an endpoint speaking `protocol` over `technology` in `mode`.
    pub fn new(technology: RfTechnology, mode: RfMode, protocol: RfProtocol) -> Self {
        RemoteEndpoint {
            technology,
            mode,
            protocol,
            technology_parameters: Bytes::new(),
            activation_parameters: Bytes::new(),
            last_saps: SapPair::UNADDRESSED,
            tag: None,
            link: LinkState::default(),
        }
    }

    /// Attaches a tag handle.
    pub fn with_tag(mut self, tag: impl Tag + 'static) -> Self {
        self.tag = Some(Box::new(tag));
        self
    }

    /// Sets the technology specific parameters reported on discovery and activation.
    pub fn with_technology_parameters(mut self, parameters: impl Into<Bytes>) -> Self {
        self.technology_parameters = parameters.into();
        self
    }

    /// Sets the activation parameters reported on activation.
    pub fn with_activation_parameters(mut self, parameters: impl Into<Bytes>) -> Self {
        self.activation_parameters = parameters.into();
        self
    }

    /// Sets the addressing an automatic SAP pair resolves to.
    pub fn with_last_saps(mut self, saps: SapPair) -> Self {
        self.last_saps = saps;
        self
    }

    /// RF technology the endpoint answers on.
    pub fn technology(&self) -> RfTechnology {
        self.technology
    }

    /// Poll or listen side.
    pub fn mode(&self) -> RfMode {
        self.mode
    }

    /// Protocol spoken after activation.
    pub fn protocol(&self) -> RfProtocol {
        self.protocol
    }

    /// Raw technology specific parameters for RF_INTF_ACTIVATED_NTF.
    pub fn technology_parameters(&self) -> &Bytes {
        &self.technology_parameters
    }

    /// Raw activation parameters for RF_INTF_ACTIVATED_NTF.
    pub fn activation_parameters(&self) -> &Bytes {
        &self.activation_parameters
    }

    /// NCI encoding of the endpoint technology and mode, if it has one.
    pub fn technology_and_mode(&self) -> Option<RfTechnologyAndMode> {
        RfTechnologyAndMode::from_parts(self.technology, self.mode)
    }

    /// Addressing of the last LLCP exchange.
    pub fn last_saps(&self) -> SapPair {
        self.last_saps
    }

    /// Records the addressing of an LLCP exchange.
    pub fn record_saps(&mut self, saps: SapPair) {
        debug!("remote endpoint addressed at {}", saps);
        self.last_saps = saps;
    }

    /// Tag storage, if the endpoint is a tag.
    pub fn tag(&self) -> Option<&dyn Tag> {
        self.tag.as_deref()
    }

    /// Mutable tag storage, if the endpoint is a tag.
    pub fn tag_mut(&mut self) -> Option<&mut (dyn Tag + 'static)> {
        self.tag.as_deref_mut()
    }

    /// Link activity of the current activation.
    pub fn link(&self) -> &LinkState {
        &self.link
    }

    /// Mutable LLCP link counters.
    pub fn link_mut(&mut self) -> &mut LinkState {
        &mut self.link
    }

    /// Forgets the link activity of the previous activation.
    pub fn clear(&mut self) {
        self.link = LinkState::default();
    }
}

/// One entry of the controller's RF interface table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RfInterface {
    /// Interface type reported to the host
    pub interface: RfInterfaceType,
    /// Protocol the interface handles
    pub protocol: RfProtocol,
    /// Mode the interface handles
    pub mode: RfMode,
}

impl RfInterface {
    /// Creates a table entry.
    pub const fn new(interface: RfInterfaceType, protocol: RfProtocol, mode: RfMode) -> Self {
        RfInterface {
            interface,
            protocol,
            mode,
        }
    }
}

/// RF interfaces of the simulated controller, in selection order.
pub const DEFAULT_RF_INTERFACES: [RfInterface; 8] = [
    RfInterface::new(RfInterfaceType::Frame, RfProtocol::T1t, RfMode::Poll),
    RfInterface::new(RfInterfaceType::Frame, RfProtocol::T2t, RfMode::Poll),
    RfInterface::new(RfInterfaceType::Frame, RfProtocol::T3t, RfMode::Poll),
    RfInterface::new(RfInterfaceType::Frame, RfProtocol::T5t, RfMode::Poll),
    RfInterface::new(RfInterfaceType::IsoDep, RfProtocol::IsoDep, RfMode::Poll),
    RfInterface::new(RfInterfaceType::NfcDep, RfProtocol::NfcDep, RfMode::Poll),
    RfInterface::new(RfInterfaceType::NfcDep, RfProtocol::NfcDep, RfMode::Listen),
    RfInterface::new(RfInterfaceType::Ndef, RfProtocol::Ndef, RfMode::Poll),
];

///
/// The simulated controller.
///
/// Holds the remote endpoint pool and the RF interface table, plus which of
/// each is currently active. The caller owns the device and lends it to every
/// command.
///
#[derive(Debug)]
pub struct NfcDevice {
    endpoints: Vec<RemoteEndpoint>,
    rf_interfaces: Vec<RfInterface>,
    active_endpoint: Option<usize>,
    active_rf_interface: Option<usize>,
}

impl NfcDevice {
    /// Creates a device over `endpoints` with the default RF interface table.
    pub fn new(endpoints: Vec<RemoteEndpoint>) -> Self {
        NfcDevice {
            endpoints,
            rf_interfaces: DEFAULT_RF_INTERFACES.to_vec(),
            active_endpoint: None,
            active_rf_interface: None,
        }
    }

    /// Replaces the RF interface table.
    pub fn with_rf_interfaces(mut self, rf_interfaces: Vec<RfInterface>) -> Self {
        self.rf_interfaces = rf_interfaces;
        self.active_rf_interface = None;
        self
    }

    /// The whole endpoint pool.
    pub fn endpoints(&self) -> &[RemoteEndpoint] {
        &self.endpoints
    }

    /// Endpoint at `index`.
    pub fn endpoint(&self, index: usize) -> Option<&RemoteEndpoint> {
        self.endpoints.get(index)
    }

    /// Mutable endpoint at `index`.
    pub fn endpoint_mut(&mut self, index: usize) -> Option<&mut RemoteEndpoint> {
        self.endpoints.get_mut(index)
    }

    /// Supported RF interfaces, in table order.
    pub fn rf_interfaces(&self) -> &[RfInterface] {
        &self.rf_interfaces
    }

    /// Index of the active endpoint.
    pub fn active_endpoint(&self) -> Option<usize> {
        self.active_endpoint
    }

    /// Index of the active RF interface.
    pub fn active_rf_interface(&self) -> Option<usize> {
        self.active_rf_interface
    }

    /// Makes `index` the active endpoint, or clears it with `None`.
    ///
    /// Fails with [`CommandError::UnknownEndpoint`] past the end of the pool,
    /// leaving the active endpoint as it was.
    pub fn set_active_endpoint(&mut self, index: Option<usize>) -> CommandResult<()> {
        if let Some(index) = index.filter(|&index| index >= self.endpoints.len()) {
            return Err(CommandError::UnknownEndpoint(index as u64));
        }
        self.active_endpoint = index;
        Ok(())
    }

    /// Makes `index` the active RF interface, or clears it with `None`.
    ///
    /// Fails with [`CommandError::UnknownRfInterface`] past the end of the
    /// interface table.
    pub fn set_active_rf_interface(&mut self, index: Option<usize>) -> CommandResult<()> {
        if let Some(index) = index.filter(|&index| index >= self.rf_interfaces.len()) {
            return Err(CommandError::UnknownRfInterface(index as i64));
        }
        self.active_rf_interface = index;
        Ok(())
    }

    /// First RF interface handling `protocol` in `mode`.
    pub fn find_rf_interface(&self, protocol: RfProtocol, mode: RfMode) -> Option<usize> {
        self.rf_interfaces
            .iter()
            .position(|rf| rf.protocol == protocol && rf.mode == mode)
    }
}
