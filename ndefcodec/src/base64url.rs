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

//! Base64url field codec.
//!
//! Record fields travel as base64url text on the command line. Decoding
//! accepts padded and unpadded input; encoding always pads.

use crate::consts::REPORT_FIELD_CAPACITY;
use crate::{NdefError, NdefResult, RecordField};
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeSliceError, Engine as _, alphabet};
use bytes::BytesMut;

const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes `text` onto the end of `dst` without growing it past `capacity`.
///
/// Returns the number of bytes appended. On failure `dst` is left at its
/// original length.
pub fn decode_into(
    field: RecordField,
    text: &str,
    dst: &mut BytesMut,
    capacity: usize,
) -> NdefResult<usize> {
    let start = dst.len();
    let available = capacity.saturating_sub(start);
    let estimate = base64::decoded_len_estimate(text.len());
    dst.resize(start + estimate.min(available), 0);
    match BASE64URL.decode_slice(text.as_bytes(), &mut dst[start..]) {
        Ok(written) => {
            dst.truncate(start + written);
            Ok(written)
        }
        Err(DecodeSliceError::OutputSliceTooSmall) => {
            dst.truncate(start);
            Err(NdefError::BufferExhausted {
                field,
                required: estimate,
                available,
            })
        }
        Err(DecodeSliceError::DecodeError(_)) => {
            dst.truncate(start);
            Err(NdefError::InvalidBase64 { field })
        }
    }
}

/// Encodes `bytes` for a record report, bounded by the report field capacity.
pub fn encode_field(field: RecordField, bytes: &[u8]) -> NdefResult<String> {
    let size = base64::encoded_len(bytes.len(), true).unwrap_or(usize::MAX);
    if size > REPORT_FIELD_CAPACITY {
        return Err(NdefError::ReportOverflow {
            field,
            size,
            capacity: REPORT_FIELD_CAPACITY,
        });
    }
    Ok(BASE64URL.encode(bytes))
}
