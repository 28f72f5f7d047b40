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

//! Console limits.

pub use nfcemu_ndefcodec::consts::MAX_RECORDS;

/// Number of LLCP service access points.
pub const SAP_COUNT: i64 = 64;
/// SAP value that asks for the endpoint's last addressing.
pub const SAP_AUTO: i64 = -1;
/// RF interface index that asks for automatic selection.
pub const RF_AUTO: i64 = -1;

/// Delimiter between command words and numeric arguments.
pub const WORD_DELIMITERS: &str = " ";
/// Delimiters between the fields of a bracketed record.
pub const FIELD_DELIMITERS: &str = " ,";
/// Opens a bracketed record.
pub const RECORD_OPEN: &str = "[";
/// Closes a bracketed record.
pub const RECORD_CLOSE: &str = "]";
