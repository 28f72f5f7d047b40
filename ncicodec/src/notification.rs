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

//! RF management notifications.

use crate::consts::{HEADER_LEN, MAX_PAYLOAD_LEN, NTF_RF_MANAGEMENT, OID_BITS, oid};
use crate::{
    BitRate, DeactivationReason, DeactivationType, DiscoverNotificationType, NciError, NciResult,
    RfInterfaceType, RfProtocol, RfTechnologyAndMode,
};
use byteorder::WriteBytesExt;
use bytes::{Buf, BufMut, Bytes};
use std::io::Write;

fn param_len(params: &Bytes) -> std::io::Result<u8> {
    u8::try_from(params.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("parameter block of {} bytes", params.len()),
        )
    })
}

fn need<T: Buf>(src: &T, required: usize) -> NciResult<()> {
    if src.remaining() < required {
        return Err(NciError::Truncated {
            required,
            available: src.remaining(),
        });
    }
    Ok(())
}

fn get_params<T: Buf>(src: &mut T) -> NciResult<Bytes> {
    need(src, 1)?;
    let len = usize::from(src.get_u8());
    need(src, len)?;
    Ok(src.copy_to_bytes(len))
}

/// RF_DISCOVER_NTF: one remote endpoint found during discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RfDiscoverNotification {
    /// Discovery id, one above the endpoint index
    pub rf_discovery_id: u8,
    /// Protocol of the endpoint
    pub rf_protocol: RfProtocol,
    /// Technology and mode the endpoint was found in
    pub rf_technology_and_mode: RfTechnologyAndMode,
    /// Technology specific parameters
    pub rf_technology_specific_parameters: Bytes,
    /// Whether more notifications follow
    pub notification_type: DiscoverNotificationType,
}

impl RfDiscoverNotification {
    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        5 + self.rf_technology_specific_parameters.len()
    }

    /// Encodes the payload into `dst`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> NciResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the payload to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u8(self.rf_discovery_id)?;
        writer.write_u8(self.rf_protocol.into())?;
        writer.write_u8(self.rf_technology_and_mode.into())?;
        writer.write_u8(param_len(&self.rf_technology_specific_parameters)?)?;
        writer.write_all(&self.rf_technology_specific_parameters)?;
        writer.write_u8(self.notification_type.into())?;
        Ok(self.len())
    }

    /// Reads the payload from `src`.
    pub fn decode<T: Buf>(src: &mut T) -> NciResult<RfDiscoverNotification> {
        need(src, 3)?;
        let rf_discovery_id = src.get_u8();
        let rf_protocol = RfProtocol::try_from(src.get_u8())?;
        let rf_technology_and_mode = RfTechnologyAndMode::try_from(src.get_u8())?;
        let rf_technology_specific_parameters = get_params(src)?;
        need(src, 1)?;
        let notification_type = DiscoverNotificationType::try_from(src.get_u8())?;
        Ok(RfDiscoverNotification {
            rf_discovery_id,
            rf_protocol,
            rf_technology_and_mode,
            rf_technology_specific_parameters,
            notification_type,
        })
    }
}

/// RF_INTF_ACTIVATED_NTF: an RF interface has been activated for an endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RfIntfActivatedNotification {
    /// Discovery id of the activated endpoint
    pub rf_discovery_id: u8,
    /// Interface handling the link
    pub rf_interface: RfInterfaceType,
    /// Protocol of the endpoint
    pub rf_protocol: RfProtocol,
    /// Technology and mode used for activation
    pub activation_rf_technology_and_mode: RfTechnologyAndMode,
    /// Largest data packet payload the controller accepts
    pub max_data_packet_payload_size: u8,
    /// Data packet credits granted to the host
    pub initial_number_of_credits: u8,
    /// Technology specific parameters
    pub rf_technology_specific_parameters: Bytes,
    /// Technology and mode used for data exchange
    pub data_exchange_rf_technology_and_mode: RfTechnologyAndMode,
    /// Transmit bit rate
    pub data_exchange_transmit_bit_rate: BitRate,
    /// Receive bit rate
    pub data_exchange_receive_bit_rate: BitRate,
    /// Interface specific activation parameters
    pub activation_parameters: Bytes,
}

impl RfIntfActivatedNotification {
    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        11 + self.rf_technology_specific_parameters.len() + self.activation_parameters.len()
    }

    /// Encodes the payload into `dst`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> NciResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the payload to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u8(self.rf_discovery_id)?;
        writer.write_u8(self.rf_interface.into())?;
        writer.write_u8(self.rf_protocol.into())?;
        writer.write_u8(self.activation_rf_technology_and_mode.into())?;
        writer.write_u8(self.max_data_packet_payload_size)?;
        writer.write_u8(self.initial_number_of_credits)?;
        writer.write_u8(param_len(&self.rf_technology_specific_parameters)?)?;
        writer.write_all(&self.rf_technology_specific_parameters)?;
        writer.write_u8(self.data_exchange_rf_technology_and_mode.into())?;
        writer.write_u8(self.data_exchange_transmit_bit_rate.into())?;
        writer.write_u8(self.data_exchange_receive_bit_rate.into())?;
        writer.write_u8(param_len(&self.activation_parameters)?)?;
        writer.write_all(&self.activation_parameters)?;
        Ok(self.len())
    }

    /// Reads the payload from `src`.
    pub fn decode<T: Buf>(src: &mut T) -> NciResult<RfIntfActivatedNotification> {
        need(src, 6)?;
        let rf_discovery_id = src.get_u8();
        let rf_interface = RfInterfaceType::try_from(src.get_u8())?;
        let rf_protocol = RfProtocol::try_from(src.get_u8())?;
        let activation_rf_technology_and_mode = RfTechnologyAndMode::try_from(src.get_u8())?;
        let max_data_packet_payload_size = src.get_u8();
        let initial_number_of_credits = src.get_u8();
        let rf_technology_specific_parameters = get_params(src)?;
        need(src, 3)?;
        let data_exchange_rf_technology_and_mode = RfTechnologyAndMode::try_from(src.get_u8())?;
        let data_exchange_transmit_bit_rate = BitRate::try_from(src.get_u8())?;
        let data_exchange_receive_bit_rate = BitRate::try_from(src.get_u8())?;
        let activation_parameters = get_params(src)?;
        Ok(RfIntfActivatedNotification {
            rf_discovery_id,
            rf_interface,
            rf_protocol,
            activation_rf_technology_and_mode,
            max_data_packet_payload_size,
            initial_number_of_credits,
            rf_technology_specific_parameters,
            data_exchange_rf_technology_and_mode,
            data_exchange_transmit_bit_rate,
            data_exchange_receive_bit_rate,
            activation_parameters,
        })
    }
}

/// RF_DEACTIVATE_NTF: the RF link has been deactivated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RfDeactivateNotification {
    /// State the link falls back to
    pub deactivation_type: DeactivationType,
    /// Why the link went down
    pub deactivation_reason: DeactivationReason,
}

impl RfDeactivateNotification {
    /// Payload length; always 2.
    pub fn len(&self) -> usize {
        2
    }

    /// Encodes the payload into `dst`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> NciResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the payload to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u8(self.deactivation_type.into())?;
        writer.write_u8(self.deactivation_reason.into())?;
        Ok(2)
    }

    /// Reads the payload from `src`.
    pub fn decode<T: Buf>(src: &mut T) -> NciResult<RfDeactivateNotification> {
        need(src, 2)?;
        Ok(RfDeactivateNotification {
            deactivation_type: DeactivationType::try_from(src.get_u8())?,
            deactivation_reason: DeactivationReason::try_from(src.get_u8())?,
        })
    }
}

impl Default for RfDeactivateNotification {
    /// Back to discovery after losing the RF link.
    fn default() -> Self {
        RfDeactivateNotification {
            deactivation_type: DeactivationType::Discovery,
            deactivation_reason: DeactivationReason::RfLinkLoss,
        }
    }
}

///
/// An RF management notification packet, header included.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NciNotification {
    /// RF_DISCOVER_NTF
    RfDiscover(RfDiscoverNotification),
    /// RF_INTF_ACTIVATED_NTF
    RfIntfActivated(RfIntfActivatedNotification),
    /// RF_DEACTIVATE_NTF
    RfDeactivate(RfDeactivateNotification),
}

impl NciNotification {
    /// Opcode identifier of the notification.
    pub fn oid(&self) -> u8 {
        match self {
            NciNotification::RfDiscover(_) => oid::RF_DISCOVER,
            NciNotification::RfIntfActivated(_) => oid::RF_INTF_ACTIVATED,
            NciNotification::RfDeactivate(_) => oid::RF_DEACTIVATE,
        }
    }

    /// Payload length in bytes.
    pub fn payload_len(&self) -> usize {
        match self {
            NciNotification::RfDiscover(ntf) => ntf.len(),
            NciNotification::RfIntfActivated(ntf) => ntf.len(),
            NciNotification::RfDeactivate(ntf) => ntf.len(),
        }
    }

    /// Packet length, header included.
    pub fn len(&self) -> usize {
        HEADER_LEN + self.payload_len()
    }

    /// Encodes the packet into `dst`.
    ///
    /// # Errors
    /// [`NciError::PayloadTooLong`] if the payload exceeds 255 bytes.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> NciResult<usize> {
        let payload_len = self.payload_len();
        let Ok(length) = u8::try_from(payload_len) else {
            return Err(NciError::PayloadTooLong {
                size: payload_len,
                max: MAX_PAYLOAD_LEN,
            });
        };
        dst.put_u8(NTF_RF_MANAGEMENT);
        dst.put_u8(self.oid());
        dst.put_u8(length);
        let written = match self {
            NciNotification::RfDiscover(ntf) => ntf.encode(dst)?,
            NciNotification::RfIntfActivated(ntf) => ntf.encode(dst)?,
            NciNotification::RfDeactivate(ntf) => ntf.encode(dst)?,
        };
        Ok(HEADER_LEN + written)
    }

    /// Reads one packet from `src`.
    ///
    /// # Errors
    /// - [`NciError::Truncated`] if the header or payload is incomplete
    /// - [`NciError::UnexpectedHeader`] for anything but an unsegmented RF
    ///   management notification with a known opcode
    /// - [`NciError::InvalidValue`] for out-of-range fields
    pub fn decode<T: Buf>(src: &mut T) -> NciResult<NciNotification> {
        need(src, HEADER_LEN)?;
        let header = src.get_u8();
        let oid = src.get_u8() & OID_BITS;
        let length = usize::from(src.get_u8());
        if header != NTF_RF_MANAGEMENT {
            return Err(NciError::UnexpectedHeader { header, oid });
        }
        need(src, length)?;
        let mut payload = src.copy_to_bytes(length);
        match oid {
            oid::RF_DISCOVER => Ok(NciNotification::RfDiscover(
                RfDiscoverNotification::decode(&mut payload)?,
            )),
            oid::RF_INTF_ACTIVATED => Ok(NciNotification::RfIntfActivated(
                RfIntfActivatedNotification::decode(&mut payload)?,
            )),
            oid::RF_DEACTIVATE => Ok(NciNotification::RfDeactivate(
                RfDeactivateNotification::decode(&mut payload)?,
            )),
            _ => Err(NciError::UnexpectedHeader { header, oid }),
        }
    }
}

impl std::fmt::Display for NciNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NciNotification::RfDiscover(_) => write!(f, "RF_DISCOVER_NTF"),
            NciNotification::RfIntfActivated(_) => write!(f, "RF_INTF_ACTIVATED_NTF"),
            NciNotification::RfDeactivate(_) => write!(f, "RF_DEACTIVATE_NTF"),
        }
    }
}
