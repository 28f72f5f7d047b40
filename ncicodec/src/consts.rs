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

//! NCI control-packet constants.

/// Control packet header: MT/PBF/GID byte, OID byte and payload length.
pub const HEADER_LEN: usize = 3;
/// Largest control-packet payload.
pub const MAX_PAYLOAD_LEN: usize = 255;
/// Largest control packet, header included.
pub const MAX_PACKET_LEN: usize = HEADER_LEN + MAX_PAYLOAD_LEN;

/// Message type of a notification (MT = 3).
pub const MT_NOTIFICATION: u8 = 0x03;
/// RF management group.
pub const GID_RF_MANAGEMENT: u8 = 0x01;
/// First header byte of an unsegmented RF management notification.
pub const NTF_RF_MANAGEMENT: u8 = (MT_NOTIFICATION << 5) | GID_RF_MANAGEMENT;

/// Masks the OID out of the second header byte.
pub const OID_BITS: u8 = 0x3F;

pub mod oid {
    //! RF management notification opcodes.

    /// RF_DISCOVER_NTF
    pub const RF_DISCOVER: u8 = 0x03;
    /// RF_INTF_ACTIVATED_NTF
    pub const RF_INTF_ACTIVATED: u8 = 0x05;
    /// RF_DEACTIVATE_NTF
    pub const RF_DEACTIVATE: u8 = 0x06;
}
