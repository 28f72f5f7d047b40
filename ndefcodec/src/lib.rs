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

//! # NFC Emulator NDEF Codec
//!
//! Binary NDEF messages and the SNEP PUT requests that carry them.
//!
//! ## Core Components
//!
//! ### [`NdefCodec`]
//!
//! Encodes an ordered list of [`RecordDescriptor`]s, whose type, id and
//! payload are base64url text, into a binary NDEF message. It implements
//! [`Encoder`](tokio_util::codec::Encoder) for record slices and
//! [`Decoder`](tokio_util::codec::Decoder) yielding one [`NdefRecord`] at a
//! time. The message-begin, message-end and id-length flags are always derived
//! from the record position and id, whatever the caller asked for.
//!
//! ### [`decode_message`] and [`render_message`]
//!
//! Walk a binary message record by record, and render it as a bracketed list
//! of `{"tnf", "type", "id", "payload"}` objects.
//!
//! ### [`snep`]
//!
//! The 6-byte SNEP request header plus builders and validators for PUT
//! requests.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use bytes::BytesMut;
//! use nfcemu_ndefcodec::{NdefCodec, RecordDescriptor, RecordFlags, Tnf, render_message};
//!
//! let codec = NdefCodec::new();
//! let records = [RecordDescriptor::new(RecordFlags::SHORT_RECORD, Tnf::WellKnown, "VA==", "", "aGk=")];
//! let mut message = BytesMut::new();
//! codec.encode_message(&records, &mut message).unwrap();
//! println!("{}", render_message(message.freeze()).unwrap());
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

pub mod base64url;
mod codec;
pub mod consts;
mod record;
mod result;
pub mod snep;

pub use self::codec::{
    DEFAULT_MESSAGE_CAPACITY, NdefCodec, NdefRecords, decode_message, render_message,
};
pub use self::record::{NdefRecord, RecordDescriptor, RecordField, RecordFlags, Tnf};
pub use self::result::{NdefError, NdefResult};
pub use self::snep::{SnepHeader, build_put_request, parse_put_request};
