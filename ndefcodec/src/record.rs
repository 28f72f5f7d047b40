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
use crate::consts::{
    DERIVED_FLAG_BITS, FLAG_BITS, FLAG_CF, FLAG_IL, FLAG_MB, FLAG_ME, FLAG_SR,
    MIN_RECORD_HEADER_LEN, TNF_BITS,
};
use crate::{NdefError, NdefResult};
use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;
use std::fmt::Formatter;
use std::ops::{BitOr, BitOrAssign};

///
/// Type Name Format: how the type field of a record is interpreted.
///
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tnf {
    /// Record carries no type, id or payload.
    Empty = 0,
    /// NFC Forum well-known type (RTD).
    WellKnown = 1,
    /// Media type (RFC 2046).
    MediaType = 2,
    /// Absolute URI (RFC 3986).
    AbsoluteUri = 3,
    /// NFC Forum external type.
    External = 4,
    /// Payload type is unknown.
    Unknown = 5,
    /// Continuation chunk of a chunked record.
    Unchanged = 6,
    /// Reserved by the NFC Forum.
    Reserved = 7,
}

impl Tnf {
    /// Number of defined TNF values.
    pub const COUNT: u8 = 8;

    /// Extracts the TNF from a record header byte.
    pub fn from_header(header: u8) -> Tnf {
        match header & TNF_BITS {
            0 => Tnf::Empty,
            1 => Tnf::WellKnown,
            2 => Tnf::MediaType,
            3 => Tnf::AbsoluteUri,
            4 => Tnf::External,
            5 => Tnf::Unknown,
            6 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }
}

impl TryFrom<u8> for Tnf {
    type Error = NdefError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < Tnf::COUNT {
            Ok(Tnf::from_header(value))
        } else {
            Err(NdefError::UnknownTnf(value))
        }
    }
}

impl From<Tnf> for u8 {
    fn from(tnf: Tnf) -> Self {
        tnf as u8
    }
}

impl std::fmt::Display for Tnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

///
/// Flag bits of an NDEF record header, without the TNF.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RecordFlags(u8);

impl RecordFlags {
    /// No flags set.
    pub const NONE: RecordFlags = RecordFlags(0);
    /// Message Begin.
    pub const MESSAGE_BEGIN: RecordFlags = RecordFlags(FLAG_MB);
    /// Message End.
    pub const MESSAGE_END: RecordFlags = RecordFlags(FLAG_ME);
    /// Chunked payload.
    pub const CHUNKED: RecordFlags = RecordFlags(FLAG_CF);
    /// Short record; one-byte payload length.
    pub const SHORT_RECORD: RecordFlags = RecordFlags(FLAG_SR);
    /// Id length present.
    pub const ID_LENGTH: RecordFlags = RecordFlags(FLAG_IL);

    /// Builds flags from raw bits, rejecting bits outside the flag mask.
    pub fn from_bits(bits: u8) -> Option<RecordFlags> {
        (bits & !FLAG_BITS == 0).then_some(RecordFlags(bits))
    }

    /// Extracts the flags from a record header byte.
    pub fn from_header(header: u8) -> RecordFlags {
        RecordFlags(header & FLAG_BITS)
    }

    /// Raw flag bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    pub fn contains(self, other: RecordFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Drops the bits the encoder derives itself (MB, ME and IL).
    pub fn underived(self) -> RecordFlags {
        RecordFlags(self.0 & !DERIVED_FLAG_BITS)
    }

    /// MB: first record of the message.
    pub fn is_message_begin(self) -> bool {
        self.contains(RecordFlags::MESSAGE_BEGIN)
    }

    /// ME: last record of the message.
    pub fn is_message_end(self) -> bool {
        self.contains(RecordFlags::MESSAGE_END)
    }

    /// SR: payload length fits one byte.
    pub fn is_short_record(self) -> bool {
        self.contains(RecordFlags::SHORT_RECORD)
    }

    /// IL: the record carries an id length byte.
    pub fn has_id(self) -> bool {
        self.contains(RecordFlags::ID_LENGTH)
    }
}

impl BitOr for RecordFlags {
    type Output = RecordFlags;

    fn bitor(self, rhs: RecordFlags) -> RecordFlags {
        RecordFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for RecordFlags {
    fn bitor_assign(&mut self, rhs: RecordFlags) {
        self.0 |= rhs.0;
    }
}

///
/// Names the part of a record an error refers to.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordField {
    /// Fixed header bytes (flags and length fields)
    Header,
    /// Record type
    Type,
    /// Record id
    Id,
    /// Record payload
    Payload,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordField::Header => write!(f, "header"),
            RecordField::Type => write!(f, "type"),
            RecordField::Id => write!(f, "id"),
            RecordField::Payload => write!(f, "payload"),
        }
    }
}

///
/// A record as described on the command line: flags and TNF, with type, id
/// and payload still in base64url text. The encoder decodes the text straight
/// into the output buffer.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// Caller flags. MB, ME and IL are recomputed by the encoder.
    pub flags: RecordFlags,
    /// Type Name Format
    pub tnf: Tnf,
    /// Record type, base64url
    pub record_type: String,
    /// Record id, base64url; may be empty
    pub id: String,
    /// Record payload, base64url
    pub payload: String,
}

impl RecordDescriptor {
    /// Creates a descriptor from its flags, TNF and base64url fields.
    pub fn new(
        flags: RecordFlags,
        tnf: Tnf,
        record_type: impl Into<String>,
        id: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        RecordDescriptor {
            flags,
            tnf,
            record_type: record_type.into(),
            id: id.into(),
            payload: payload.into(),
        }
    }

    /// Returns `true` if the record will carry an id field.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

///
/// A record read back from a binary NDEF message.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NdefRecord {
    flags: RecordFlags,
    tnf: Tnf,
    record_type: Bytes,
    id: Bytes,
    payload: Bytes,
}

impl NdefRecord {
    /// Header flags as read, derived bits included.
    pub fn flags(&self) -> RecordFlags {
        self.flags
    }

    /// Type name format.
    pub fn tnf(&self) -> Tnf {
        self.tnf
    }

    /// Record type bytes.
    pub fn record_type(&self) -> &Bytes {
        &self.record_type
    }

    /// Record id, empty without IL.
    pub fn id(&self) -> &Bytes {
        &self.id
    }

    /// Payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Renders the record as a `{tnf, type, id, payload}` object with the
    /// byte fields in base64url.
    ///
    /// # Errors
    /// Fails with [`NdefError::ReportOverflow`] if a field renders to more than
    /// the report field capacity.
    pub fn render(&self) -> NdefResult<String> {
        let record_type = base64url::encode_field(RecordField::Type, &self.record_type)?;
        let id = base64url::encode_field(RecordField::Id, &self.id)?;
        let payload = base64url::encode_field(RecordField::Payload, &self.payload)?;
        Ok(format!(
            "{{\"tnf\": {}, \"type\": \"{}\", \"id\": \"{}\", \"payload\": \"{}\"}}",
            self.tnf, record_type, id, payload
        ))
    }
}

/// Offsets of one record inside a message, as described by its own header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecordLayout {
    header: u8,
    type_start: usize,
    type_len: usize,
    id_len: usize,
    payload_len: usize,
    pub(crate) total: usize,
}

impl RecordLayout {
    /// Reads the header of the record at the start of `src` and checks that
    /// the whole record is present.
    pub(crate) fn parse(src: &[u8]) -> NdefResult<RecordLayout> {
        let available = src.len();
        if available < MIN_RECORD_HEADER_LEN {
            return Err(NdefError::Truncated {
                required: MIN_RECORD_HEADER_LEN,
                available,
            });
        }
        let header = src[0];
        let flags = RecordFlags::from_header(header);
        let type_len = usize::from(src[1]);
        let mut offset = 2;

        let payload_len = if flags.is_short_record() {
            offset += 1;
            usize::from(src[2])
        } else {
            if available < offset + 4 {
                return Err(NdefError::Truncated {
                    required: offset + 4,
                    available,
                });
            }
            offset += 4;
            BigEndian::read_u32(&src[2..6]) as usize
        };

        let id_len = if flags.has_id() {
            if available < offset + 1 {
                return Err(NdefError::Truncated {
                    required: offset + 1,
                    available,
                });
            }
            offset += 1;
            usize::from(src[offset - 1])
        } else {
            0
        };

        let total = offset
            .saturating_add(type_len)
            .saturating_add(id_len)
            .saturating_add(payload_len);
        if available < total {
            return Err(NdefError::Truncated {
                required: total,
                available,
            });
        }
        Ok(RecordLayout {
            header,
            type_start: offset,
            type_len,
            id_len,
            payload_len,
            total,
        })
    }

    /// Slices the record fields out of `frame`, which starts at the record.
    pub(crate) fn into_record(self, frame: &Bytes) -> NdefRecord {
        let id_start = self.type_start + self.type_len;
        let payload_start = id_start + self.id_len;
        NdefRecord {
            flags: RecordFlags::from_header(self.header),
            tnf: Tnf::from_header(self.header),
            record_type: frame.slice(self.type_start..id_start),
            id: frame.slice(id_start..payload_start),
            payload: frame.slice(payload_start..payload_start + self.payload_len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tnf_rejects_values_past_reserved() {
        assert_eq!(Tnf::try_from(1).unwrap(), Tnf::WellKnown);
        assert_eq!(Tnf::try_from(7).unwrap(), Tnf::Reserved);
        assert!(matches!(Tnf::try_from(8), Err(NdefError::UnknownTnf(8))));
    }

    #[test]
    fn flags_reject_tnf_bits() {
        assert_eq!(RecordFlags::from_bits(0x10), Some(RecordFlags::SHORT_RECORD));
        assert_eq!(RecordFlags::from_bits(0xF8).map(RecordFlags::bits), Some(0xF8));
        assert_eq!(RecordFlags::from_bits(0x01), None);
    }

    #[test]
    fn underived_keeps_only_caller_bits() {
        let flags = RecordFlags::from_bits(0xF8).unwrap().underived();
        assert_eq!(flags, RecordFlags::CHUNKED | RecordFlags::SHORT_RECORD);
    }

    #[test]
    fn layout_of_short_record_with_id() {
        // MB|ME|SR|IL, TNF 1, type "T", id "i", payload "ab"
        let src = [0xD9, 0x01, 0x02, 0x01, b'T', b'i', b'a', b'b'];
        let layout = RecordLayout::parse(&src).unwrap();
        assert_eq!(layout.total, src.len());
        let record = layout.into_record(&Bytes::copy_from_slice(&src));
        assert_eq!(record.tnf(), Tnf::WellKnown);
        assert_eq!(&record.record_type()[..], b"T");
        assert_eq!(&record.id()[..], b"i");
        assert_eq!(&record.payload()[..], b"ab");
    }

    #[test]
    fn layout_of_long_record() {
        let mut src = vec![0xC2, 0x01, 0x00, 0x00, 0x00, 0x03, b'x'];
        src.extend_from_slice(b"abc");
        let layout = RecordLayout::parse(&src).unwrap();
        assert_eq!(layout.total, 10);
    }

    #[test]
    fn layout_reports_truncation() {
        let src = [0xD1, 0x01, 0x05, b'T', b'a'];
        match RecordLayout::parse(&src) {
            Err(NdefError::Truncated {
                required,
                available,
            }) => {
                assert_eq!(required, 9);
                assert_eq!(available, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            RecordLayout::parse(&[0xD1, 0x01]),
            Err(NdefError::Truncated { required: 3, .. })
        ));
    }

    #[test]
    fn render_uses_base64url() {
        let src = [0xD1, 0x01, 0x05, b'h', b'w', b'o', b'r', b'l', b'd'];
        let frame = Bytes::copy_from_slice(&src);
        let record = RecordLayout::parse(&src).unwrap().into_record(&frame);
        assert_eq!(
            record.render().unwrap(),
            r#"{"tnf": 1, "type": "aA==", "id": "", "payload": "d29ybGQ="}"#
        );
    }
}
