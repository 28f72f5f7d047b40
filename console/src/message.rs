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

//! Textual NDEF records.
//!
//! A record is written `[flags,tnf,type,id,payload]`: flags and TNF are
//! unsigned integers, type, id and payload base64url text. The id may be
//! empty; type and payload may not.

use crate::consts::{FIELD_DELIMITERS, RECORD_CLOSE, RECORD_OPEN};
use crate::{ArgumentLexer, CommandError, CommandResult};
use nfcemu_ndefcodec::{RecordDescriptor, RecordFlags, Tnf};
use tracing::debug;

/// Parses one bracketed record. Text before the opening bracket is skipped.
pub fn parse_record(lexer: &mut ArgumentLexer<'_>) -> CommandResult<RecordDescriptor> {
    lexer.next_token("NDEF record", RECORD_OPEN)?;
    if lexer.rest().is_none() {
        return Err(CommandError::MissingRecord);
    }

    let flags = lexer.next_unsigned("NDEF flags", FIELD_DELIMITERS)?;
    let flags = u8::try_from(flags)
        .ok()
        .and_then(RecordFlags::from_bits)
        .ok_or(CommandError::InvalidFlags(flags))?;

    let tnf = lexer.next_unsigned("NDEF TNF", FIELD_DELIMITERS)?;
    let tnf = u8::try_from(tnf)
        .ok()
        .and_then(|value| Tnf::try_from(value).ok())
        .ok_or(CommandError::InvalidTnf(tnf))?;

    let record_type = lexer.next_string("NDEF type", FIELD_DELIMITERS, false)?;
    let id = lexer.next_string("NDEF id", FIELD_DELIMITERS, true)?;
    let payload = lexer.next_string("NDEF payload", RECORD_CLOSE, false)?;

    let record = RecordDescriptor::new(flags, tnf, record_type, id, payload);
    debug!(?record, "parsed NDEF record");
    Ok(record)
}

/// Parses up to `max_records` records until the text runs out.
///
/// Whitespace after the last record is ignored; any other leftover text,
/// including a record past the limit, fails with
/// [`CommandError::TrailingInput`]. Text with no record at all fails with
/// [`CommandError::MissingRecord`].
pub fn parse_message(
    lexer: &mut ArgumentLexer<'_>,
    max_records: usize,
) -> CommandResult<Vec<RecordDescriptor>> {
    let mut records = Vec::new();
    while records.len() < max_records && has_record_text(lexer) {
        if !records.is_empty() && !lexer.rest().is_some_and(|rest| rest.contains(RECORD_OPEN)) {
            break;
        }
        records.push(parse_record(lexer)?);
    }
    if let Some(rest) = lexer.rest().filter(|_| has_record_text(lexer)) {
        return Err(CommandError::TrailingInput(rest.trim().to_string()));
    }
    Ok(records)
}

fn has_record_text(lexer: &ArgumentLexer<'_>) -> bool {
    lexer.rest().is_some_and(|rest| !rest.trim().is_empty())
}
