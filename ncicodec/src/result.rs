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

/// Result Type for NCI Codec Operations
pub type NciResult<T> = Result<T, NciError>;

/// Errors raised while framing or reading NCI notifications.
#[derive(Debug, thiserror::Error)]
pub enum NciError {
    /// An I/O error occurred while writing a packet.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload does not fit the one-byte length of a control packet.
    #[error("NCI payload of {size} bytes exceeds {max} bytes")]
    PayloadTooLong {
        /// Payload or parameter size
        size: usize,
        /// Largest size the field can describe
        max: usize,
    },

    /// The packet does not fit the destination.
    #[error("no space for NCI packet (required: {required}, available: {available})")]
    BufferExhausted {
        /// Packet size
        required: usize,
        /// Space left in the destination
        available: usize,
    },

    /// The packet ends inside a field.
    #[error("truncated NCI packet (required: {required}, available: {available})")]
    Truncated {
        /// Bytes the packet describes
        required: usize,
        /// Bytes received
        available: usize,
    },

    /// The header is not an RF management notification this codec knows.
    #[error("unexpected NCI header 0x{header:02X} 0x{oid:02X}")]
    UnexpectedHeader {
        /// First header byte (MT, PBF and GID)
        header: u8,
        /// Opcode identifier
        oid: u8,
    },

    /// A field holds a value outside its defined range.
    #[error("invalid NCI {field} '{value}'")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Received value
        value: u8,
    },
}

impl NciError {
    /// Returns `true` if more bytes could complete the packet.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, NciError::Truncated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_names_field() {
        let err = NciError::InvalidValue {
            field: "deactivation reason",
            value: 9,
        };
        assert_eq!(err.to_string(), "invalid NCI deactivation reason '9'");
        assert!(!err.is_incomplete());
    }

    #[test]
    fn truncated_is_incomplete() {
        let err = NciError::Truncated {
            required: 5,
            available: 3,
        };
        assert!(err.is_incomplete());
    }
}
