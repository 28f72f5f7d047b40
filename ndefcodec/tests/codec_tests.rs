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

//! Integration tests for ndefcodec
//!
//! These tests drive the encoder, decoder, report rendering and SNEP framing
//! together the way the emulator console does.

use bytes::{Bytes, BytesMut};
use nfcemu_ndefcodec::base64url::encode_field;
use nfcemu_ndefcodec::{
    NdefCodec, NdefError, NdefRecord, RecordDescriptor, RecordField, RecordFlags, Tnf,
    build_put_request, decode_message, parse_put_request, render_message,
};
use proptest::prelude::*;
use tokio_util::codec::{Decoder, Encoder};

// ============================================================================
// Helper Functions
// ============================================================================

fn descriptor(flags: u8, tnf: Tnf, record_type: &[u8], id: &[u8], payload: &[u8]) -> RecordDescriptor {
    RecordDescriptor::new(
        RecordFlags::from_bits(flags).unwrap(),
        tnf,
        encode_field(RecordField::Type, record_type).unwrap(),
        encode_field(RecordField::Id, id).unwrap(),
        encode_field(RecordField::Payload, payload).unwrap(),
    )
}

fn encode(records: &[RecordDescriptor]) -> Bytes {
    let mut dst = BytesMut::new();
    NdefCodec::new().encode_message(records, &mut dst).unwrap();
    dst.freeze()
}

fn decode_all(src: Bytes) -> Vec<NdefRecord> {
    decode_message(src).collect::<Result<Vec<_>, _>>().unwrap()
}

// ============================================================================
// Encode / Decode Tests
// ============================================================================

#[test]
fn text_record_survives_encode_and_decode() {
    let records = [descriptor(0x10, Tnf::WellKnown, b"T", b"", b"\x02enHello")];
    let records = decode_all(encode(&records));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tnf(), Tnf::WellKnown);
    assert_eq!(&records[0].record_type()[..], b"T");
    assert!(records[0].id().is_empty());
    assert_eq!(&records[0].payload()[..], b"\x02enHello");
}

#[test]
fn uri_and_mime_records_keep_their_order() {
    let records = [
        descriptor(0x10, Tnf::WellKnown, b"U", b"", b"\x04example.com"),
        descriptor(0x00, Tnf::MediaType, b"text/plain", b"note", b"hello"),
    ];
    let decoded = decode_all(encode(&records));
    assert_eq!(decoded.len(), 2);
    assert!(decoded[0].flags().is_message_begin());
    assert!(!decoded[0].flags().is_message_end());
    assert!(decoded[1].flags().is_message_end());
    assert!(decoded[1].flags().has_id());
    assert!(!decoded[1].flags().is_short_record());
    assert_eq!(&decoded[1].record_type()[..], b"text/plain");
    assert_eq!(&decoded[1].id()[..], b"note");
}

#[test]
fn empty_message_encodes_to_nothing() {
    assert!(encode(&[]).is_empty());
    assert_eq!(render_message(Bytes::new()).unwrap(), "[]");
}

#[test]
fn tokio_codec_traits_agree_with_helpers() {
    let records = vec![
        descriptor(0x10, Tnf::External, b"ex:a", b"", b"1"),
        descriptor(0x10, Tnf::External, b"ex:b", b"", b"2"),
    ];
    let mut codec = NdefCodec::new();
    let mut buffer = BytesMut::new();
    codec.encode(records.as_slice(), &mut buffer).unwrap();
    assert_eq!(&buffer[..], &encode(&records)[..]);

    let mut decoded = Vec::new();
    while let Some(record) = codec.decode(&mut buffer).unwrap() {
        decoded.push(record);
    }
    assert_eq!(decoded.len(), 2);
    assert_eq!(&decoded[1].record_type()[..], b"ex:b");
}

#[test]
fn long_payload_needs_long_record() {
    let payload = vec![0x5A; 300];
    let short = [descriptor(0x10, Tnf::Unknown, b"", b"", &payload)];
    assert!(matches!(
        NdefCodec::new().encode_message(&short, &mut BytesMut::new()),
        Err(NdefError::ShortRecordOverflow { size: 300 })
    ));

    let long = [descriptor(0x00, Tnf::Unknown, b"", b"", &payload)];
    let encoded = encode(&long);
    assert_eq!(&encoded[..6], &[0xC5, 0x00, 0x00, 0x00, 0x01, 0x2C]);
    assert_eq!(decode_all(encoded)[0].payload().len(), 300);
}

#[test]
fn short_record_overflow_stops_the_message() {
    let records = [
        descriptor(0x10, Tnf::WellKnown, b"a", b"", b"one"),
        descriptor(0x10, Tnf::Unknown, b"", b"", &[0x5A; 300]),
        descriptor(0x10, Tnf::WellKnown, b"zz", b"", b"tail-marker"),
    ];
    let mut dst = BytesMut::new();
    assert!(matches!(
        NdefCodec::new().encode_message(&records, &mut dst),
        Err(NdefError::ShortRecordOverflow { size: 300 })
    ));

    assert_eq!(&dst[..7], &[0x91, 0x01, 0x03, b'a', b'o', b'n', b'e']);
    assert!(dst.len() <= 7 + 3 + 300);
    assert!(!dst.windows(b"tail-marker".len()).any(|window| window == b"tail-marker"));
    assert!(!dst.windows(2).any(|window| window == b"zz"));
}

#[test]
fn report_rejects_payload_beyond_field_capacity() {
    // 536 characters decode to 402 bytes, which render back past 512
    let long = [RecordDescriptor::new(
        RecordFlags::NONE,
        Tnf::Unknown,
        "",
        "",
        "A".repeat(536),
    )];
    assert!(matches!(
        render_message(encode(&long)),
        Err(NdefError::ReportOverflow {
            field: RecordField::Payload,
            ..
        })
    ));
}

// ============================================================================
// SNEP Tests
// ============================================================================

#[test]
fn snep_put_request_round_trip() {
    let codec = NdefCodec::new();
    let records = [descriptor(0x10, Tnf::WellKnown, b"T", b"", b"\x02enHi")];
    let mut request = BytesMut::new();
    build_put_request(&codec, &records, &mut request).unwrap();
    let message = parse_put_request(request.freeze()).unwrap();
    assert_eq!(message, encode(&records));
    assert_eq!(
        render_message(message).unwrap(),
        r#"[{"tnf": 1, "type": "VA==", "id": "", "payload": "AmVuSGk="}]"#
    );
}

#[test]
fn snep_request_bounded_by_codec_capacity() {
    let codec = NdefCodec::with_capacity(10);
    let records = [descriptor(0x10, Tnf::WellKnown, b"T", b"", b"abcdef")];
    assert!(matches!(
        build_put_request(&codec, &records, &mut BytesMut::new()),
        Err(NdefError::BufferExhausted { .. })
    ));
}

// ============================================================================
// Property Tests
// ============================================================================

fn field(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

proptest! {
    #[test]
    fn derived_flags_follow_position(
        flags in prop::collection::vec(prop::sample::select(vec![0x00u8, 0x10, 0x20, 0x30, 0xF8, 0xD8]), 1..=4),
        ids in prop::collection::vec(field(4), 4),
    ) {
        let records: Vec<RecordDescriptor> = flags
            .iter()
            .zip(&ids)
            .map(|(flags, id)| descriptor(*flags, Tnf::External, b"ex:t", id, b"data"))
            .collect();
        let decoded = decode_all(encode(&records));
        prop_assert_eq!(decoded.len(), records.len());
        let last = decoded.len() - 1;
        for (index, record) in decoded.iter().enumerate() {
            prop_assert_eq!(record.flags().is_message_begin(), index == 0);
            prop_assert_eq!(record.flags().is_message_end(), index == last);
            prop_assert_eq!(record.flags().has_id(), !ids[index].is_empty());
            prop_assert_eq!(record.flags().is_short_record(), flags[index] & 0x10 != 0);
        }
    }

    #[test]
    fn decoded_fields_match_input(
        inputs in prop::collection::vec(
            (0u8..Tnf::COUNT, field(16), field(16), field(200), any::<bool>()),
            1..=4,
        ),
    ) {
        let records: Vec<RecordDescriptor> = inputs
            .iter()
            .map(|(tnf, record_type, id, payload, short)| {
                let flags = if *short { 0x10 } else { 0x00 };
                descriptor(flags, Tnf::from_header(*tnf), record_type, id, payload)
            })
            .collect();
        let decoded = decode_all(encode(&records));
        prop_assert_eq!(decoded.len(), inputs.len());
        let last = decoded.len() - 1;
        for (index, (record, (tnf, record_type, id, payload, short))) in
            decoded.iter().zip(&inputs).enumerate()
        {
            prop_assert_eq!(u8::from(record.tnf()), *tnf);
            prop_assert_eq!(&record.record_type()[..], &record_type[..]);
            prop_assert_eq!(&record.id()[..], &id[..]);
            prop_assert_eq!(&record.payload()[..], &payload[..]);
            prop_assert_eq!(record.flags().is_short_record(), *short);
            prop_assert_eq!(record.flags().is_message_begin(), index == 0);
            prop_assert_eq!(record.flags().is_message_end(), index == last);
            prop_assert_eq!(record.flags().has_id(), !id.is_empty());
        }
    }

    #[test]
    fn decoder_never_panics(src in field(64)) {
        for record in decode_message(Bytes::from(src)) {
            let _ = record;
        }
    }
}
