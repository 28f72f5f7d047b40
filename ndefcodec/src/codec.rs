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

use crate::base64url;
use crate::consts::{MAX_RECORDS, MAX_SHORT_PAYLOAD_LEN};
use crate::record::RecordLayout;
use crate::{NdefError, NdefRecord, NdefResult, RecordDescriptor, RecordField, RecordFlags};
use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, Bytes, BytesMut};
use std::iter::FusedIterator;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// Default upper bound on the bytes an encoder may place in its destination.
pub const DEFAULT_MESSAGE_CAPACITY: usize = 1024;

/// A codec for NDEF messages.
///
/// Encoding turns an ordered list of [`RecordDescriptor`]s into one binary
/// message: the MB bit is set on the first record, ME on the last and IL
/// wherever an id is present. The base64url fields are decoded straight into
/// the destination at their final offset and the length fields are filled in
/// afterwards.
///
/// The destination is never grown past the codec capacity. A failed encode
/// may leave a partial record behind; callers discard the buffer on error.
///
/// Decoding walks a complete message one record at a time. It is not a
/// streaming decoder: a record cut short is reported as
/// [`NdefError::Truncated`] rather than waiting for more bytes.
#[derive(Clone, Debug)]
pub struct NdefCodec {
    capacity: usize,
}

impl NdefCodec {
    /// Creates a codec bounded by [`DEFAULT_MESSAGE_CAPACITY`].
    pub fn new() -> NdefCodec {
        NdefCodec::default()
    }

    /// Creates a codec that never fills its destination past `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> NdefCodec {
        NdefCodec { capacity }
    }

    /// Upper bound on the destination length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Encodes `records` onto the end of `dst`.
    ///
    /// # Returns
    /// The number of bytes written.
    ///
    /// # Errors
    /// - [`NdefError::TooManyRecords`] for more than four records
    /// - [`NdefError::InvalidBase64`] for malformed field text
    /// - [`NdefError::BufferExhausted`] when the capacity is reached
    /// - [`NdefError::ShortRecordOverflow`] when SR is requested for a payload
    ///   over 255 bytes
    pub fn encode_message(
        &self,
        records: &[RecordDescriptor],
        dst: &mut BytesMut,
    ) -> NdefResult<usize> {
        if records.len() > MAX_RECORDS {
            return Err(NdefError::TooManyRecords {
                count: records.len(),
                max: MAX_RECORDS,
            });
        }
        let last = records.len().saturating_sub(1);
        let mut written = 0;
        for (index, descriptor) in records.iter().enumerate() {
            let mut position = RecordFlags::NONE;
            if index == 0 {
                position |= RecordFlags::MESSAGE_BEGIN;
            }
            if index == last {
                position |= RecordFlags::MESSAGE_END;
            }
            written += self.encode_record(descriptor, position, dst)?;
        }
        Ok(written)
    }

    fn encode_record(
        &self,
        descriptor: &RecordDescriptor,
        position: RecordFlags,
        dst: &mut BytesMut,
    ) -> NdefResult<usize> {
        let start = dst.len();
        let mut flags = descriptor.flags.underived() | position;
        if descriptor.has_id() {
            flags |= RecordFlags::ID_LENGTH;
        }

        let payload_len_size = if flags.is_short_record() { 1 } else { 4 };
        let header_len = 2 + payload_len_size + usize::from(flags.has_id());
        let available = self.capacity.saturating_sub(start);
        if header_len > available {
            return Err(NdefError::BufferExhausted {
                field: RecordField::Header,
                required: header_len,
                available,
            });
        }
        dst.put_bytes(0, header_len);

        let type_len = base64url::decode_into(
            RecordField::Type,
            &descriptor.record_type,
            dst,
            self.capacity,
        )?;
        let type_len = u8::try_from(type_len).map_err(|_| NdefError::FieldTooLong {
            field: RecordField::Type,
            size: type_len,
        })?;

        let id_len = if flags.has_id() {
            let id_len =
                base64url::decode_into(RecordField::Id, &descriptor.id, dst, self.capacity)?;
            u8::try_from(id_len).map_err(|_| NdefError::FieldTooLong {
                field: RecordField::Id,
                size: id_len,
            })?
        } else {
            0
        };

        let payload_len = base64url::decode_into(
            RecordField::Payload,
            &descriptor.payload,
            dst,
            self.capacity,
        )?;
        if flags.is_short_record() && payload_len > MAX_SHORT_PAYLOAD_LEN {
            warn!("NDEF flag SR set for long payload of {} bytes", payload_len);
            return Err(NdefError::ShortRecordOverflow { size: payload_len });
        }

        dst[start] = flags.bits() | u8::from(descriptor.tnf);
        dst[start + 1] = type_len;
        let mut cursor = start + 2;
        if flags.is_short_record() {
            dst[cursor] = payload_len as u8;
        } else {
            let wide = u32::try_from(payload_len).map_err(|_| NdefError::FieldTooLong {
                field: RecordField::Payload,
                size: payload_len,
            })?;
            BigEndian::write_u32(&mut dst[cursor..cursor + 4], wide);
        }
        cursor += payload_len_size;
        if flags.has_id() {
            dst[cursor] = id_len;
        }

        trace!(
            "encoded NDEF record flags=0x{:02X} tnf={} type={} id={} payload={}",
            flags.bits(),
            descriptor.tnf,
            type_len,
            id_len,
            payload_len
        );
        Ok(dst.len() - start)
    }
}

impl Default for NdefCodec {
    fn default() -> Self {
        NdefCodec {
            capacity: DEFAULT_MESSAGE_CAPACITY,
        }
    }
}

impl<'a> Encoder<&'a [RecordDescriptor]> for NdefCodec {
    type Error = NdefError;

    fn encode(
        &mut self,
        records: &'a [RecordDescriptor],
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        self.encode_message(records, dst).map(|_| ())
    }
}

impl Decoder for NdefCodec {
    type Item = NdefRecord;
    type Error = NdefError;

    /// Splits the next record off the front of `src`.
    ///
    /// Returns `Ok(None)` once `src` is empty.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<NdefRecord>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        let layout = RecordLayout::parse(src)?;
        let frame = src.split_to(layout.total).freeze();
        Ok(Some(layout.into_record(&frame)))
    }
}

/// Walks the records of a complete binary NDEF message.
///
/// The traversal is one-shot: it yields each record in order, stops after the
/// first error and never touches the source bytes.
pub fn decode_message(src: Bytes) -> NdefRecords {
    NdefRecords { src, failed: false }
}

/// Iterator returned by [`decode_message`].
#[derive(Clone, Debug)]
pub struct NdefRecords {
    src: Bytes,
    failed: bool,
}

impl Iterator for NdefRecords {
    type Item = NdefResult<NdefRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.src.is_empty() {
            return None;
        }
        match RecordLayout::parse(&self.src) {
            Ok(layout) => {
                let frame = self.src.split_to(layout.total);
                Some(Ok(layout.into_record(&frame)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for NdefRecords {}

/// Renders a binary NDEF message as a bracketed, comma-separated list of
/// `{tnf, type, id, payload}` objects.
pub fn render_message(src: Bytes) -> NdefResult<String> {
    let mut report = String::from("[");
    for (index, record) in decode_message(src).enumerate() {
        if index > 0 {
            report.push(',');
        }
        report.push_str(&record?.render()?);
    }
    report.push(']');
    Ok(report)
}
