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

//! Console configuration

use nfcemu_ncicodec::consts::{HEADER_LEN, MAX_PACKET_LEN};
use nfcemu_ndefcodec::consts::snep;

/// Console configuration
///
/// Buffer bounds used when building packets, and the flow-control values
/// reported to the host on activation. Use the builder methods to customize
/// the configuration.
///
/// # Example
///
/// ```
/// use nfcemu_console::ConsoleConfig;
///
/// let config = ConsoleConfig::default()
///     .with_data_capacity(512)
///     .with_initial_credits(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Byte bound of an outbound SNEP request, header included
    pub data_capacity: usize,

    /// Byte bound of the NDEF image written by `tag set`
    pub tag_capacity: usize,

    /// Byte bound of a notification packet, header included
    pub notification_capacity: usize,

    /// Maximum data packet payload size reported in RF_INTF_ACTIVATED_NTF
    pub max_data_packet_payload_size: u8,

    /// Initial number of credits reported in RF_INTF_ACTIVATED_NTF
    pub initial_credits: u8,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            data_capacity: 1024,
            tag_capacity: 1024,
            notification_capacity: MAX_PACKET_LEN,
            max_data_packet_payload_size: 255,
            initial_credits: 1,
        }
    }
}

impl ConsoleConfig {
    /// Set the SNEP request bound
    pub fn with_data_capacity(mut self, capacity: usize) -> Self {
        self.data_capacity = capacity;
        self
    }

    /// Set the tag image bound
    pub fn with_tag_capacity(mut self, capacity: usize) -> Self {
        self.tag_capacity = capacity;
        self
    }

    /// Set the notification packet bound
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    /// Set the reported maximum data packet payload size
    pub fn with_max_data_packet_payload_size(mut self, size: u8) -> Self {
        self.max_data_packet_payload_size = size;
        self
    }

    /// Set the reported initial credits
    pub fn with_initial_credits(mut self, credits: u8) -> Self {
        self.initial_credits = credits;
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if a bound cannot hold even an empty packet.
    pub fn validate(&self) -> Result<(), String> {
        if self.data_capacity < snep::HEADER_LEN {
            return Err(format!(
                "data_capacity must be at least {} bytes",
                snep::HEADER_LEN
            ));
        }

        if self.notification_capacity < HEADER_LEN {
            return Err(format!(
                "notification_capacity must be at least {HEADER_LEN} bytes"
            ));
        }

        if self.max_data_packet_payload_size == 0 {
            return Err("max_data_packet_payload_size must be greater than 0".to_string());
        }

        Ok(())
    }
}
