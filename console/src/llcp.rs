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

//! LLCP connection setup with the active remote endpoint.

use crate::snep::resolve_active;
use crate::{CommandError, CommandResult, Injector, LlcpFrame, NfcDevice, SapPair};
use tracing::{debug, info};

/// Opens an LLCP connection to the active endpoint at `saps`.
///
/// Both resolved SAPs must be non-zero. Once the host has accepted the frame
/// a fully concrete pair becomes the endpoint's last addressing.
pub fn connect<I: Injector + ?Sized>(
    device: &mut NfcDevice,
    injector: &mut I,
    saps: SapPair,
) -> CommandResult<()> {
    let (index, saps) = resolve_active(device, saps)?;
    if saps.dsap.is_zero() {
        return Err(CommandError::ZeroSap { field: "DSAP" });
    }
    if saps.ssap.is_zero() {
        return Err(CommandError::ZeroSap { field: "SSAP" });
    }
    debug!("LLCP connect to remote endpoint {} at {}", index, saps);

    injector
        .inject_data(index, LlcpFrame::Connect { saps })
        .map_err(|source| CommandError::TransportRejected {
            operation: "llcp connect",
            source,
        })?;
    if let Some(endpoint) = device.endpoint_mut(index) {
        if saps.is_concrete() {
            endpoint.record_saps(saps);
        }
        endpoint.link_mut().connections.push(saps);
    }
    info!("connected to remote endpoint {} at {}", index, saps);
    Ok(())
}
