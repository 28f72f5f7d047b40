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

//! # NFC Emulator NCI Codec
//!
//! RF management notifications of the NFC Controller Interface, as a
//! simulated controller sends them to the device host.
//!
//! ## Core Components
//!
//! ### [`NciNotification`]
//!
//! One of [`RfDiscoverNotification`], [`RfIntfActivatedNotification`] or
//! [`RfDeactivateNotification`], framed with the 3-byte control packet header
//! (`MT=3`, `GID=1`, OID, payload length).
//!
//! ### [`NciCodec`]
//!
//! Implements [`Encoder`](tokio_util::codec::Encoder) and
//! [`Decoder`](tokio_util::codec::Decoder) for notifications so a host can
//! put them straight onto a framed transport.
//!
//! ### Value types
//!
//! Protocols, interfaces, technologies and deactivation causes are closed
//! enums; reading an undefined byte fails with [`NciError::InvalidValue`].

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

mod codec;
pub mod consts;
mod notification;
mod result;
mod types;

pub use self::codec::NciCodec;
pub use self::notification::{
    NciNotification, RfDeactivateNotification, RfDiscoverNotification,
    RfIntfActivatedNotification,
};
pub use self::result::{NciError, NciResult};
pub use self::types::{
    BitRate, DeactivationReason, DeactivationType, DiscoverNotificationType, RfInterfaceType,
    RfMode, RfProtocol, RfTechnology, RfTechnologyAndMode,
};
