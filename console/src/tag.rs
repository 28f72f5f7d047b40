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

//! Tag handles.

use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tracing::debug;

/// NDEF image of a freshly formatted tag: one empty short record.
pub const EMPTY_NDEF_MESSAGE: [u8; 3] = [0xD0, 0x00, 0x00];

/// Errors raised by tag storage.
#[derive(Debug, Error)]
pub enum TagError {
    /// The image does not fit the tag memory.
    #[error("tag data of {size} bytes exceeds tag capacity of {capacity} bytes")]
    TooLarge {
        /// Image size
        size: usize,
        /// Tag memory size
        capacity: usize,
    },

    /// The tag is read-only.
    #[error("tag is read-only")]
    ReadOnly,
}

///
/// Storage behind an emulated tag.
///
pub trait Tag: std::fmt::Debug {
    /// Replaces the tag contents with `data`, or erases them with `None`.
    fn set_data(&mut self, data: Option<&[u8]>) -> Result<(), TagError>;

    /// Formats the tag, leaving an empty NDEF message.
    fn format(&mut self) -> Result<(), TagError>;

    /// Current tag contents.
    fn contents(&self) -> Bytes;
}

/// A tag backed by a bounded in-memory buffer.
#[derive(Clone, Debug)]
pub struct MemoryTag {
    capacity: usize,
    data: BytesMut,
    read_only: bool,
}

impl MemoryTag {
    /// Creates an empty, writable tag of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        MemoryTag {
            capacity,
            data: BytesMut::with_capacity(capacity),
            read_only: false,
        }
    }

    /// Makes the tag refuse writes.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Largest image the tag accepts, in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn write(&mut self, data: &[u8]) -> Result<(), TagError> {
        if self.read_only {
            return Err(TagError::ReadOnly);
        }
        if data.len() > self.capacity {
            return Err(TagError::TooLarge {
                size: data.len(),
                capacity: self.capacity,
            });
        }
        self.data.clear();
        self.data.extend_from_slice(data);
        debug!("tag holds {} bytes", data.len());
        Ok(())
    }
}

impl Tag for MemoryTag {
    fn set_data(&mut self, data: Option<&[u8]>) -> Result<(), TagError> {
        self.write(data.unwrap_or_default())
    }

    fn format(&mut self) -> Result<(), TagError> {
        self.write(&EMPTY_NDEF_MESSAGE)
    }

    fn contents(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }
}
