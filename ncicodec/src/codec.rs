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

use crate::consts::{HEADER_LEN, MAX_PACKET_LEN};
use crate::{NciError, NciNotification};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

///
/// Frames RF management notifications on a byte stream.
///
/// Encoding refuses packets larger than the configured packet size. Decoding
/// waits until a whole packet is buffered before reading it.
///
#[derive(Clone, Debug)]
pub struct NciCodec {
    max_packet_size: usize,
}

impl NciCodec {
    /// Creates a codec accepting packets of up to 258 bytes.
    pub fn new() -> NciCodec {
        NciCodec::default()
    }

    /// Creates a codec bounded by `max_packet_size` bytes per packet.
    pub fn with_max_packet_size(max_packet_size: usize) -> NciCodec {
        NciCodec { max_packet_size }
    }

    /// Largest packet the codec encodes.
    pub fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }
}

impl Default for NciCodec {
    fn default() -> Self {
        NciCodec {
            max_packet_size: MAX_PACKET_LEN,
        }
    }
}

impl Encoder<NciNotification> for NciCodec {
    type Error = NciError;

    fn encode(&mut self, item: NciNotification, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&NciNotification>>::encode(self, &item, dst)
    }
}

impl Encoder<&NciNotification> for NciCodec {
    type Error = NciError;

    fn encode(&mut self, item: &NciNotification, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let required = item.len();
        if required > self.max_packet_size {
            return Err(NciError::BufferExhausted {
                required,
                available: self.max_packet_size,
            });
        }
        dst.reserve(required);
        item.encode(dst)?;
        debug!("encoded {} ({} bytes)", item, required);
        Ok(())
    }
}

impl Decoder for NciCodec {
    type Item = NciNotification;
    type Error = NciError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<NciNotification>, Self::Error> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }
        let total = HEADER_LEN + usize::from(src[2]);
        if src.len() < total {
            trace!("waiting for {} more NCI bytes", total - src.len());
            src.reserve(total - src.len());
            return Ok(None);
        }
        let mut packet = src.split_to(total).freeze();
        NciNotification::decode(&mut packet).map(Some)
    }
}
