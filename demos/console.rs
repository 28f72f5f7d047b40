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

//! Interactive Console Example
//!
//! Reads test commands from stdin, one per line, and runs them against a
//! simulated controller with three remote endpoints:
//!
//! - 0: NFC-F peer speaking NFC-DEP
//! - 1: NFC-A Type 2 Tag
//! - 2: NFC-A ISO-DEP card
//!
//! Each line prints `OK`, a received NDEF report, or a `KO:` line. Injected
//! packets are logged at `info` level.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --example console
//! ```
//!
//! Then try:
//! ```text
//! nci rf_intf_activated_ntf 0
//! llcp connect 4 32
//! snep put -1 -1 [0,1,aGVsbG8=,,d29ybGQ=]
//! tag set 1 [0,1,VA==,,aGk=]
//! ```

use futures::StreamExt;
use nfcemu_console::{Console, ConsoleConfig, MemoryInjector, MemoryTag, NfcDevice, RemoteEndpoint};
use nfcemu_ncicodec::{RfMode, RfProtocol, RfTechnology};
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ConsoleConfig::default();
    config.validate()?;

    let mut device = NfcDevice::new(vec![
        RemoteEndpoint::new(RfTechnology::F, RfMode::Poll, RfProtocol::NfcDep)
            .with_technology_parameters(vec![0x12, 0x01, 0xFE]),
        RemoteEndpoint::new(RfTechnology::A, RfMode::Poll, RfProtocol::T2t)
            .with_technology_parameters(vec![0x44, 0x00, 0x07])
            .with_tag(MemoryTag::new(config.tag_capacity)),
        RemoteEndpoint::new(RfTechnology::A, RfMode::Poll, RfProtocol::IsoDep),
    ]);
    let mut host = MemoryInjector::new();
    let mut console = Console::new(config);

    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    while let Some(line) = lines.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match console.execute(&mut device, &mut host, &line) {
            Ok(reply) => println!("{reply}"),
            Err(err) => println!("{}", err.ko_line()),
        }
    }

    Ok(())
}
