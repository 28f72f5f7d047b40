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

//! Error types for NDEF and SNEP encoding and decoding.

use crate::RecordField;

/// Result Type for NDEF Codec Operations
pub type NdefResult<T> = Result<T, NdefError>;

/// Errors raised while building or reading NDEF messages and SNEP requests.
#[derive(Debug, thiserror::Error)]
pub enum NdefError {
    /// An I/O error occurred while writing to the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record field was not valid base64url text.
    #[error("invalid base64url in NDEF {field}")]
    InvalidBase64 {
        /// Field holding the malformed text
        field: RecordField,
    },

    /// The destination buffer cannot hold the next field.
    #[error("no space for NDEF {field} (required: {required}, available: {available})")]
    BufferExhausted {
        /// Field being written
        field: RecordField,
        /// Number of bytes required
        required: usize,
        /// Number of bytes left before the capacity bound
        available: usize,
    },

    /// The short-record flag was requested for a payload longer than 255 bytes.
    #[error("NDEF flag SR set for long payload of {size} bytes")]
    ShortRecordOverflow {
        /// Decoded payload size
        size: usize,
    },

    /// A type or id decoded to more bytes than its one-byte length can describe.
    #[error("NDEF {field} of {size} bytes exceeds 255 bytes")]
    FieldTooLong {
        /// Oversized field
        field: RecordField,
        /// Decoded size
        size: usize,
    },

    /// More records than a message may carry.
    #[error("NDEF message of {count} records exceeds {max} records")]
    TooManyRecords {
        /// Records supplied
        count: usize,
        /// Records permitted
        max: usize,
    },

    /// The message ends inside a record.
    #[error("truncated NDEF record (required: {required}, available: {available})")]
    Truncated {
        /// Bytes the record header describes
        required: usize,
        /// Bytes remaining in the message
        available: usize,
    },

    /// A rendered field does not fit the report field buffer.
    #[error("NDEF {field} of {size} characters exceeds report capacity of {capacity}")]
    ReportOverflow {
        /// Field being rendered
        field: RecordField,
        /// Encoded size
        size: usize,
        /// Report field capacity
        capacity: usize,
    },

    /// A TNF value outside the defined range.
    #[error("invalid NDEF TNF '{0}'")]
    UnknownTnf(u8),

    /// A SNEP request with an unsupported major version.
    #[error("unsupported SNEP version 0x{0:02X}")]
    InvalidSnepVersion(u8),

    /// A SNEP message that is not a PUT request.
    #[error("unexpected SNEP request code 0x{0:02X}")]
    UnexpectedSnepCode(u8),

    /// The SNEP information length disagrees with the received bytes.
    #[error("SNEP length {declared} exceeds {available} received bytes")]
    SnepLengthMismatch {
        /// Length in the SNEP header
        declared: usize,
        /// Bytes following the header
        available: usize,
    },
}
