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

//! NDEF and SNEP wire constants.

/// Message Begin: set on the first record of a message.
pub const FLAG_MB: u8 = 0x80;
/// Message End: set on the last record of a message.
pub const FLAG_ME: u8 = 0x40;
/// Chunk Flag: record is a chunk of a chunked payload.
pub const FLAG_CF: u8 = 0x20;
/// Short Record: payload length is encoded in a single byte.
pub const FLAG_SR: u8 = 0x10;
/// ID Length present.
pub const FLAG_IL: u8 = 0x08;

/// Every flag bit a record header may carry.
pub const FLAG_BITS: u8 = FLAG_MB | FLAG_ME | FLAG_CF | FLAG_SR | FLAG_IL;
/// Flag bits the encoder derives from the record position and id.
pub const DERIVED_FLAG_BITS: u8 = FLAG_MB | FLAG_ME | FLAG_IL;
/// Low three bits of the header byte hold the TNF.
pub const TNF_BITS: u8 = 0x07;

/// Smallest possible record: header byte, type length and a short payload length.
pub const MIN_RECORD_HEADER_LEN: usize = 3;
/// Largest payload a short record can describe.
pub const MAX_SHORT_PAYLOAD_LEN: usize = 255;
/// Largest type or id a record can describe.
pub const MAX_FIELD_LEN: usize = 255;

/// Records per message the emulator accepts.
pub const MAX_RECORDS: usize = 4;
/// Capacity of each base64url field in a rendered record report.
pub const REPORT_FIELD_CAPACITY: usize = 512;

pub mod snep {
    //! SNEP request framing.

    /// Protocol version 1.0.
    pub const VERSION: u8 = 0x10;
    /// Major version nibble accepted on receive.
    pub const VERSION_MAJOR: u8 = 0x01;
    /// PUT request code.
    pub const REQUEST_PUT: u8 = 0x02;
    /// Version, request code and 4-byte information length.
    pub const HEADER_LEN: usize = 6;
}
