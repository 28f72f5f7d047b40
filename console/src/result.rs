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

//! Error types for console commands.

use crate::{InjectError, TagError};
use nfcemu_ncicodec::{NciError, RfMode, RfProtocol, RfTechnology};
use nfcemu_ndefcodec::NdefError;
use thiserror::Error;

/// Result Type for Console Commands
pub type CommandResult<T> = Result<T, CommandError>;

/// Why a console command was aborted.
///
/// The Display text is the operator-facing diagnostic; [`CommandError::ko_line`]
/// turns it into the single failure line the console prints.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command family was given no arguments.
    #[error("no arguments given")]
    NoArguments,

    /// The first word of the line names no command family.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The command family has no such operation.
    #[error("invalid operation '{0}'")]
    UnknownOperation(String),

    /// The arguments ran out before a required field.
    #[error("no token {field} given")]
    MissingToken {
        /// Field being read
        field: &'static str,
    },

    /// A numeric field did not parse.
    #[error("invalid value '{token}' for token {field}")]
    InvalidNumber {
        /// Field being read
        field: &'static str,
        /// Offending text
        token: String,
    },

    /// A field that must carry text was empty.
    #[error("empty token {field}")]
    EmptyToken {
        /// Field being read
        field: &'static str,
    },

    /// A SAP outside `-1..64`.
    #[error("invalid {field} '{value}'")]
    InvalidSap {
        /// `DSAP` or `SSAP`
        field: &'static str,
        /// Parsed value
        value: i64,
    },

    /// Record flags with bits outside the flag mask.
    #[error("invalid NDEF flags '{0}'")]
    InvalidFlags(u64),

    /// A TNF past the defined range.
    #[error("invalid NDEF TNF '{0}'")]
    InvalidTnf(u64),

    /// No opening bracket where a record was expected.
    #[error("no NDEF record given")]
    MissingRecord,

    /// Text left over after the last record.
    #[error("invalid characters near EOL: {0}")]
    TrailingInput(String),

    /// An endpoint index past the end of the pool.
    #[error("unknown remote endpoint {0}")]
    UnknownEndpoint(u64),

    /// An RF interface index outside the supported table.
    #[error("unknown rf index {0}")]
    UnknownRfInterface(i64),

    /// A discover notification type past the defined range.
    #[error("unknown discover notification type {0}")]
    UnknownDiscoverType(u64),

    /// A deactivation type past the defined range.
    #[error("unknown deactivate notification type {0}")]
    UnknownDeactivateType(u64),

    /// A deactivation reason past the defined range.
    #[error("unknown deactivate notification reason {0}")]
    UnknownDeactivateReason(u64),

    /// Addressing or activation needs an active endpoint and there is none.
    #[error("no active remote endpoint")]
    NoActiveEndpoint,

    /// LLCP connect resolved a zero SAP.
    #[error("{field} is 0")]
    ZeroSap {
        /// `DSAP` or `SSAP`
        field: &'static str,
    },

    /// A tag command targeted an endpoint without a tag handle.
    #[error("remote endpoint is not a tag")]
    NotATag,

    /// No RF interface supports the endpoint.
    #[error("no active rf interface for {protocol:?} in {mode:?} mode")]
    NoCompatibleInterface {
        /// Endpoint protocol
        protocol: RfProtocol,
        /// Endpoint mode
        mode: RfMode,
    },

    /// The endpoint technology has no NCI encoding in its mode.
    #[error("no rf technology and mode for NFC-{technology:?} in {mode:?} mode")]
    UnsupportedTechnology {
        /// Endpoint technology
        technology: RfTechnology,
        /// Endpoint mode
        mode: RfMode,
    },

    /// Building or encoding an NDEF message or SNEP request failed.
    #[error(transparent)]
    Ndef(#[from] NdefError),

    /// A notification could not be built into a packet.
    #[error("{notification} failed: {source}")]
    BuildFailed {
        /// Notification being built
        notification: &'static str,
        /// Codec failure
        #[source]
        source: NciError,
    },

    /// The host refused an injection or had nothing to deliver.
    #[error("'{operation}' failed: {source}")]
    TransportRejected {
        /// Command being carried out
        operation: &'static str,
        /// Host failure
        #[source]
        source: InjectError,
    },

    /// The tag handle refused the operation.
    #[error(transparent)]
    Tag(#[from] TagError),
}

impl CommandError {
    /// Renders the single failure line shown to the operator.
    pub fn ko_line(&self) -> String {
        format!("KO: {self}")
    }

    /// Malformed or out-of-range command text, caught before anything is built.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            CommandError::NoArguments
                | CommandError::UnknownCommand(_)
                | CommandError::UnknownOperation(_)
                | CommandError::MissingToken { .. }
                | CommandError::InvalidNumber { .. }
                | CommandError::EmptyToken { .. }
                | CommandError::InvalidSap { .. }
                | CommandError::InvalidFlags(_)
                | CommandError::InvalidTnf(_)
                | CommandError::MissingRecord
                | CommandError::TrailingInput(_)
                | CommandError::UnknownEndpoint(_)
                | CommandError::UnknownRfInterface(_)
                | CommandError::UnknownDiscoverType(_)
                | CommandError::UnknownDeactivateType(_)
                | CommandError::UnknownDeactivateReason(_)
        )
    }

    /// Well-formed command the current device state cannot honor.
    pub fn is_precondition_error(&self) -> bool {
        matches!(
            self,
            CommandError::NoActiveEndpoint
                | CommandError::ZeroSap { .. }
                | CommandError::NotATag
                | CommandError::NoCompatibleInterface { .. }
                | CommandError::UnsupportedTechnology { .. }
        )
    }

    /// Failure while encoding or decoding a packet.
    pub fn is_codec_error(&self) -> bool {
        matches!(self, CommandError::Ndef(_) | CommandError::BuildFailed { .. })
    }

    /// Failure reported by the host or the tag handle.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            CommandError::TransportRejected { .. } | CommandError::Tag(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ko_line_prefixes_display() {
        assert_eq!(
            CommandError::ZeroSap { field: "DSAP" }.ko_line(),
            "KO: DSAP is 0"
        );
        assert_eq!(
            CommandError::InvalidNumber {
                field: "SSAP",
                token: "x1".to_string()
            }
            .ko_line(),
            "KO: invalid value 'x1' for token SSAP"
        );
    }

    #[test]
    fn codec_errors_keep_their_text() {
        let err = CommandError::from(NdefError::ShortRecordOverflow { size: 300 });
        assert_eq!(
            err.ko_line(),
            "KO: NDEF flag SR set for long payload of 300 bytes"
        );
        assert!(err.is_codec_error());
    }

    #[test]
    fn every_error_has_one_class() {
        let errors = [
            CommandError::NoArguments,
            CommandError::MissingRecord,
            CommandError::InvalidTnf(9),
            CommandError::NoActiveEndpoint,
            CommandError::NotATag,
            CommandError::BuildFailed {
                notification: "rf_discover_ntf",
                source: NciError::PayloadTooLong { size: 300, max: 255 },
            },
            CommandError::TransportRejected {
                operation: "snep put",
                source: InjectError::Rejected,
            },
        ];
        for err in &errors {
            let classes = [
                err.is_syntax_error(),
                err.is_precondition_error(),
                err.is_codec_error(),
                err.is_transport_error(),
            ];
            assert_eq!(classes.iter().filter(|class| **class).count(), 1, "{err}");
        }
    }
}
