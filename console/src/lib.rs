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

//! # NFC Emulator Console
//!
//! Turns line-oriented test commands into NDEF messages, SNEP requests and
//! simulated NCI notifications, and turns received NDEF data back into a
//! readable report.
//!
//! ## Core Components
//!
//! ### [`Console`]
//!
//! Routes a command line on its first word to one of four families:
//!
//! - `snep put DSAP SSAP [RECORD]...` sends a SNEP PUT, or receives one when no
//!   record is given
//! - `nci rf_discover_ntf`, `nci rf_intf_activated_ntf` and
//!   `nci rf_intf_deactivate_ntf` inject RF management notifications
//! - `llcp connect DSAP SSAP` opens an LLCP connection
//! - `tag set`, `tag clear` and `tag format` write an endpoint's tag
//!
//! Records are written `[flags,tnf,type,id,payload]` with base64url type, id
//! and payload. A SAP of `-1` reuses the active endpoint's last addressing.
//!
//! ### [`NfcDevice`]
//!
//! The simulated controller: a pool of [`RemoteEndpoint`]s, the RF interface
//! table, and which endpoint and interface are active. The caller owns it and
//! lends it to every command.
//!
//! ### [`Injector`]
//!
//! Where built packets leave the console. [`MemoryInjector`] keeps them in
//! memory for demos and tests.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use nfcemu_console::{Console, MemoryInjector, NfcDevice, RemoteEndpoint};
//! use nfcemu_ncicodec::{RfMode, RfProtocol, RfTechnology};
//!
//! let mut device = NfcDevice::new(vec![RemoteEndpoint::new(
//!     RfTechnology::F,
//!     RfMode::Poll,
//!     RfProtocol::NfcDep,
//! )]);
//! let mut host = MemoryInjector::new();
//! let mut console = Console::default();
//!
//! console.execute(&mut device, &mut host, "nci rf_intf_activated_ntf 0").unwrap();
//! console.execute(&mut device, &mut host, "llcp connect 4 32").unwrap();
//! console
//!     .execute(&mut device, &mut host, "snep put -1 -1 [0,1,aGVsbG8=,,d29ybGQ=]")
//!     .unwrap();
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
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod config;
mod console;
pub mod consts;
mod device;
mod injector;
mod lexer;
pub mod llcp;
mod memory;
pub mod message;
pub mod nci;
mod result;
pub mod snep;
mod tag;

pub use self::config::ConsoleConfig;
pub use self::console::{CommandReply, Console};
pub use self::device::{
    DEFAULT_RF_INTERFACES, LinkState, NfcDevice, RemoteEndpoint, RfInterface, Sap, SapPair,
};
pub use self::injector::{InjectError, Injector, LlcpFrame};
pub use self::lexer::ArgumentLexer;
pub use self::memory::MemoryInjector;
pub use self::message::{parse_message, parse_record};
pub use self::result::{CommandError, CommandResult};
pub use self::tag::{EMPTY_NDEF_MESSAGE, MemoryTag, Tag, TagError};
