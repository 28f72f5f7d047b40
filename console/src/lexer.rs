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

//! Argument lexer.
//!
//! Tokens are split off the front of the remaining text at the first of a set
//! of delimiters, one token at a time. Once the last delimiter has been
//! consumed the lexer is exhausted and every further read fails with
//! [`CommandError::MissingToken`].

use crate::{CommandError, CommandResult};
use tracing::trace;

/// Cursor over the argument text of one command.
#[derive(Clone, Debug)]
pub struct ArgumentLexer<'a> {
    rest: Option<&'a str>,
}

impl<'a> ArgumentLexer<'a> {
    /// Creates a lexer over `args`.
    pub fn new(args: &'a str) -> Self {
        ArgumentLexer { rest: Some(args) }
    }

    /// Unconsumed text, or `None` once the last token has been taken.
    pub fn rest(&self) -> Option<&'a str> {
        self.rest
    }

    /// Returns `true` if unconsumed text other than whitespace remains.
    pub fn has_more(&self) -> bool {
        self.rest.is_some_and(|rest| !rest.trim().is_empty())
    }

    /// Fails with [`CommandError::TrailingInput`] if anything but whitespace
    /// is left.
    pub fn finish(&self) -> CommandResult<()> {
        match self.rest {
            Some(rest) if self.has_more() => {
                Err(CommandError::TrailingInput(rest.trim().to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Splits the next token off at the first of `delimiters`.
    ///
    /// If no delimiter remains the token is the rest of the text and the
    /// lexer is exhausted.
    pub fn next_token(&mut self, field: &'static str, delimiters: &str) -> CommandResult<&'a str> {
        let Some(rest) = self.rest else {
            return Err(CommandError::MissingToken { field });
        };
        match rest.find(|c: char| delimiters.contains(c)) {
            Some(at) => {
                // every delimiter is a single byte
                self.rest = Some(&rest[at + 1..]);
                trace!(field, token = &rest[..at], "token");
                Ok(&rest[..at])
            }
            None => {
                self.rest = None;
                trace!(field, token = rest, "last token");
                Ok(rest)
            }
        }
    }

    /// Reads a signed integer with C-style base prefixes.
    pub fn next_signed(&mut self, field: &'static str, delimiters: &str) -> CommandResult<i64> {
        let token = self.next_token(field, delimiters)?;
        parse_integer(token)
            .and_then(|(negative, magnitude)| {
                let value = i64::try_from(magnitude).ok()?;
                Some(if negative { -value } else { value })
            })
            .ok_or_else(|| invalid_number(field, token))
    }

    /// Reads an unsigned integer with C-style base prefixes.
    pub fn next_unsigned(&mut self, field: &'static str, delimiters: &str) -> CommandResult<u64> {
        let token = self.next_token(field, delimiters)?;
        match parse_integer(token) {
            Some((false, value)) => Ok(value),
            _ => Err(invalid_number(field, token)),
        }
    }

    /// Reads a text field, rejecting an empty one unless `allow_empty`.
    pub fn next_string(
        &mut self,
        field: &'static str,
        delimiters: &str,
        allow_empty: bool,
    ) -> CommandResult<&'a str> {
        let token = self.next_token(field, delimiters)?;
        if token.is_empty() && !allow_empty {
            return Err(CommandError::EmptyToken { field });
        }
        Ok(token)
    }
}

fn invalid_number(field: &'static str, token: &str) -> CommandError {
    CommandError::InvalidNumber {
        field,
        token: token.to_string(),
    }
}

/// Parses an optionally signed integer: `0x` prefix for hex, a leading `0`
/// for octal, decimal otherwise. The whole token must be consumed.
fn parse_integer(token: &str) -> Option<(bool, u64)> {
    let (negative, unsigned) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u64::from_str_radix(digits, radix)
        .ok()
        .map(|value| (negative, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_split_at_any_delimiter() {
        let mut lexer = ArgumentLexer::new("0,1 abc");
        assert_eq!(lexer.next_token("a", " ,").unwrap(), "0");
        assert_eq!(lexer.next_token("b", " ,").unwrap(), "1");
        assert_eq!(lexer.rest(), Some("abc"));
        assert_eq!(lexer.next_token("c", " ,").unwrap(), "abc");
        assert_eq!(lexer.rest(), None);
        assert!(matches!(
            lexer.next_token("d", " "),
            Err(CommandError::MissingToken { field: "d" })
        ));
    }

    #[test]
    fn adjacent_delimiters_yield_empty_tokens() {
        let mut lexer = ArgumentLexer::new("a,,b");
        assert_eq!(lexer.next_string("type", ",", false).unwrap(), "a");
        assert_eq!(lexer.next_string("id", ",", true).unwrap(), "");
        assert!(lexer.has_more());
        assert_eq!(lexer.next_string("payload", "]", false).unwrap(), "b");
        assert!(!lexer.has_more());
    }

    #[test]
    fn finish_rejects_leftover_tokens() {
        let mut lexer = ArgumentLexer::new("3 5 junk ");
        assert_eq!(lexer.next_unsigned("DSAP", " ").unwrap(), 3);
        assert_eq!(lexer.next_unsigned("SSAP", " ").unwrap(), 5);
        assert!(matches!(
            lexer.finish(),
            Err(CommandError::TrailingInput(rest)) if rest == "junk"
        ));

        let mut lexer = ArgumentLexer::new("3  ");
        assert_eq!(lexer.next_unsigned("DSAP", " ").unwrap(), 3);
        assert!(!lexer.has_more());
        assert!(lexer.finish().is_ok());
        lexer.next_token("rest", " ").unwrap();
        lexer.next_token("rest", " ").unwrap();
        assert!(lexer.finish().is_ok());
    }

    #[test]
    fn empty_string_rejected_unless_allowed() {
        let mut lexer = ArgumentLexer::new(",x");
        assert!(matches!(
            lexer.next_string("NDEF type", ",", false),
            Err(CommandError::EmptyToken { field: "NDEF type" })
        ));
    }

    #[test]
    fn numbers_follow_c_prefixes() {
        let mut lexer = ArgumentLexer::new("42 0x1F 017 -1 +7 0");
        assert_eq!(lexer.next_unsigned("a", " ").unwrap(), 42);
        assert_eq!(lexer.next_unsigned("b", " ").unwrap(), 0x1F);
        assert_eq!(lexer.next_unsigned("c", " ").unwrap(), 0o17);
        assert_eq!(lexer.next_signed("d", " ").unwrap(), -1);
        assert_eq!(lexer.next_signed("e", " ").unwrap(), 7);
        assert_eq!(lexer.next_signed("f", " ").unwrap(), 0);
    }

    #[test]
    fn malformed_numbers_name_field_and_token() {
        for token in ["", "x", "12a", "0x", "09", "--1", "-+1"] {
            let mut lexer = ArgumentLexer::new(token);
            match lexer.next_signed("DSAP", " ") {
                Err(CommandError::InvalidNumber { field, token: bad }) => {
                    assert_eq!(field, "DSAP");
                    assert_eq!(bad, token);
                }
                other => panic!("{token:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn unsigned_rejects_negative() {
        let mut lexer = ArgumentLexer::new("-3");
        assert!(matches!(
            lexer.next_unsigned("remote endpoint", " "),
            Err(CommandError::InvalidNumber { .. })
        ));
    }
}
