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

//! Simple NDEF Exchange Protocol
//!
//! Only PUT requests are built and read: a 6-byte header followed by the NDEF
//! message as information field.

use crate::consts::snep::{HEADER_LEN, REQUEST_PUT, VERSION, VERSION_MAJOR};
use crate::{NdefCodec, NdefError, NdefResult, RecordDescriptor, RecordField};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

/// Header of a SNEP request.
///
/// # Format
/// - 1 byte version, major version in the high nibble
/// - 1 byte request code
/// - 4 bytes information length, big-endian
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SnepHeader {
    /// Protocol version byte
    pub version: u8,
    /// Request code
    pub code: u8,
    /// Length of the information field following the header
    pub length: u32,
}

impl SnepHeader {
    /// Creates a version 1.0 PUT header for `length` bytes of information.
    pub fn put(length: u32) -> Self {
        SnepHeader {
            version: VERSION,
            code: REQUEST_PUT,
            length,
        }
    }

    /// Encoded size of the header; always 6.
    pub fn len(&self) -> usize {
        HEADER_LEN
    }

    /// Encodes the header into `dst`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> NdefResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the header to `writer`.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u8(self.version)?;
        writer.write_u8(self.code)?;
        writer.write_u32::<BigEndian>(self.length)?;
        Ok(HEADER_LEN)
    }

    /// Reads a header from the front of `src`.
    ///
    /// # Errors
    /// [`NdefError::Truncated`] if fewer than 6 bytes remain.
    pub fn decode<T: Buf>(src: &mut T) -> NdefResult<SnepHeader> {
        if src.remaining() < HEADER_LEN {
            return Err(NdefError::Truncated {
                required: HEADER_LEN,
                available: src.remaining(),
            });
        }
        Ok(SnepHeader {
            version: src.get_u8(),
            code: src.get_u8(),
            length: src.get_u32(),
        })
    }
}

/// Builds a SNEP PUT request carrying the NDEF message encoded from `records`.
///
/// The header is reserved first and its length filled in once the message
/// has been encoded behind it. The codec capacity bounds the whole request.
///
/// # Returns
/// The number of bytes appended to `dst`.
pub fn build_put_request(
    codec: &NdefCodec,
    records: &[RecordDescriptor],
    dst: &mut BytesMut,
) -> NdefResult<usize> {
    let start = dst.len();
    let available = codec.capacity().saturating_sub(start);
    if available < HEADER_LEN {
        return Err(NdefError::BufferExhausted {
            field: RecordField::Header,
            required: HEADER_LEN,
            available,
        });
    }
    SnepHeader::put(0).encode(dst)?;
    let message_len = codec.encode_message(records, dst)?;
    let length = u32::try_from(message_len).map_err(|_| NdefError::FieldTooLong {
        field: RecordField::Payload,
        size: message_len,
    })?;
    BigEndian::write_u32(&mut dst[start + 2..start + HEADER_LEN], length);
    debug!("built SNEP PUT request with {} bytes of NDEF", message_len);
    Ok(HEADER_LEN + message_len)
}

/// Validates a SNEP PUT request and returns its NDEF message.
///
/// Bytes past the declared information length are ignored.
///
/// # Errors
/// - [`NdefError::Truncated`] for a short header
/// - [`NdefError::InvalidSnepVersion`] for a major version other than 1
/// - [`NdefError::UnexpectedSnepCode`] for anything but PUT
/// - [`NdefError::SnepLengthMismatch`] if the header claims more bytes than
///   were received
pub fn parse_put_request(mut src: Bytes) -> NdefResult<Bytes> {
    let header = SnepHeader::decode(&mut src)?;
    if header.version >> 4 != VERSION_MAJOR {
        return Err(NdefError::InvalidSnepVersion(header.version));
    }
    if header.code != REQUEST_PUT {
        return Err(NdefError::UnexpectedSnepCode(header.code));
    }
    let declared = header.length as usize;
    if declared > src.len() {
        return Err(NdefError::SnepLengthMismatch {
            declared,
            available: src.len(),
        });
    }
    Ok(src.split_to(declared))
}
