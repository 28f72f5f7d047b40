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

//! SNEP PUT exchange with the active remote endpoint.

use crate::{CommandError, CommandResult, Injector, LlcpFrame, NfcDevice, SapPair};
use bytes::BytesMut;
use nfcemu_ndefcodec::{
    NdefCodec, RecordDescriptor, build_put_request, parse_put_request, render_message,
};
use tracing::{debug, info};

/// Finds the active endpoint and resolves `saps` against its last addressing.
pub(crate) fn resolve_active(device: &NfcDevice, saps: SapPair) -> CommandResult<(usize, SapPair)> {
    let index = device
        .active_endpoint()
        .ok_or(CommandError::NoActiveEndpoint)?;
    let endpoint = device
        .endpoint(index)
        .ok_or(CommandError::NoActiveEndpoint)?;
    Ok((index, saps.resolve(endpoint.last_saps())))
}

/// Sends `records` to the active endpoint as a SNEP PUT request.
///
/// The request is bounded by the codec capacity and only handed to the host
/// once it has been built completely.
pub fn send_put<I: Injector + ?Sized>(
    device: &mut NfcDevice,
    injector: &mut I,
    codec: &NdefCodec,
    saps: SapPair,
    records: &[RecordDescriptor],
) -> CommandResult<()> {
    let (index, saps) = resolve_active(device, saps)?;
    let mut request = BytesMut::with_capacity(codec.capacity());
    let size = build_put_request(codec, records, &mut request)?;
    debug!("SNEP PUT of {} records ({} bytes) at {}", records.len(), size, saps);

    injector
        .inject_data(index, LlcpFrame::SnepPut {
            saps,
            request: request.freeze(),
        })
        .map_err(|source| CommandError::TransportRejected {
            operation: "snep put",
            source,
        })?;
    if let Some(endpoint) = device.endpoint_mut(index) {
        endpoint.link_mut().frames_sent += 1;
    }
    info!("sent SNEP PUT to remote endpoint {}", index);
    Ok(())
}

/// Takes the next SNEP PUT request the active endpoint received and renders
/// its NDEF message.
pub fn receive_put<I: Injector + ?Sized>(
    device: &mut NfcDevice,
    injector: &mut I,
    saps: SapPair,
) -> CommandResult<String> {
    let (index, saps) = resolve_active(device, saps)?;
    let request = injector
        .retrieve_data(index, saps)
        .map_err(|source| CommandError::TransportRejected {
            operation: "snep put",
            source,
        })?;
    let message = parse_put_request(request)?;
    let report = render_message(message)?;
    if let Some(endpoint) = device.endpoint_mut(index) {
        endpoint.link_mut().frames_received += 1;
    }
    info!("received SNEP PUT from remote endpoint {} at {}", index, saps);
    Ok(report)
}
