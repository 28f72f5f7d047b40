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

//! Command dispatcher.

use crate::consts::{MAX_RECORDS, RF_AUTO, SAP_AUTO, SAP_COUNT, WORD_DELIMITERS};
use crate::nci::{self, RfSelection};
use crate::{
    ArgumentLexer, CommandError, CommandResult, ConsoleConfig, Injector, NfcDevice, Sap, SapPair,
    llcp, message, snep,
};
use bytes::{Bytes, BytesMut};
use nfcemu_ncicodec::{
    DeactivationReason, DeactivationType, DiscoverNotificationType, NciCodec, NciNotification,
    RfDeactivateNotification,
};
use nfcemu_ndefcodec::NdefCodec;
use tokio_util::codec::Encoder;
use tracing::{debug, info, warn};

/// Outcome of a successful command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandReply {
    /// The command was carried out.
    Done,
    /// The command produced a report, such as a received NDEF message.
    Report(String),
}

impl std::fmt::Display for CommandReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandReply::Done => write!(f, "OK"),
            CommandReply::Report(report) => write!(f, "{report}"),
        }
    }
}

///
/// Routes textual test commands to the packet builders.
///
/// A console owns only its buffers bounds and codecs. The device and the host
/// are lent to every call, and every command runs to completion before it
/// returns. Nothing is handed to the host unless parsing and every
/// precondition check succeeded.
///
/// Failures are logged once as their `KO:` line and returned.
///
#[derive(Debug)]
pub struct Console {
    config: ConsoleConfig,
    data: NdefCodec,
    tag: NdefCodec,
    nci: NciCodec,
}

impl Console {
    /// Creates a console bounded by `config`.
    pub fn new(config: ConsoleConfig) -> Self {
        Console {
            data: NdefCodec::with_capacity(config.data_capacity),
            tag: NdefCodec::with_capacity(config.tag_capacity),
            nci: NciCodec::with_max_packet_size(config.notification_capacity),
            config,
        }
    }

    /// Settings the console was built with.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Runs one command line, routing on its first word.
    pub fn execute<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        injector: &mut I,
        line: &str,
    ) -> CommandResult<CommandReply> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, args) = match line.split_once(WORD_DELIMITERS) {
            Some((command, args)) => (command, Some(args)),
            None => (line, None),
        };
        match command {
            "snep" => self.snep(device, injector, args),
            "nci" => self.nci(device, injector, args),
            "llcp" => self.llcp(device, injector, args),
            "tag" => self.tag(device, injector, args),
            _ => Err(report(CommandError::UnknownCommand(command.to_string()))),
        }
    }

    /// `snep put DSAP SSAP [RECORD]...`
    ///
    /// Sends the records as a SNEP PUT request, or with no records receives
    /// one and reports its NDEF message.
    pub fn snep<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        injector: &mut I,
        args: Option<&str>,
    ) -> CommandResult<CommandReply> {
        self.run_snep(device, injector, args).map_err(report)
    }

    /// `nci rf_discover_ntf INDEX TYPE`, `nci rf_intf_activated_ntf [INDEX [RF]]`
    /// or `nci rf_intf_deactivate_ntf [TYPE REASON]`.
    pub fn nci<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        injector: &mut I,
        args: Option<&str>,
    ) -> CommandResult<CommandReply> {
        self.run_nci(device, injector, args).map_err(report)
    }

    /// `llcp connect DSAP SSAP`
    pub fn llcp<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        injector: &mut I,
        args: Option<&str>,
    ) -> CommandResult<CommandReply> {
        run_llcp(device, injector, args).map_err(report)
    }

    /// `tag set INDEX [RECORD]...`, `tag clear INDEX` or `tag format INDEX`.
    ///
    /// Tag commands write the endpoint's tag handle and never reach the host.
    pub fn tag<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        _injector: &mut I,
        args: Option<&str>,
    ) -> CommandResult<CommandReply> {
        self.run_tag(device, args).map_err(report)
    }

    fn run_snep<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        injector: &mut I,
        args: Option<&str>,
    ) -> CommandResult<CommandReply> {
        let mut lexer = ArgumentLexer::new(args.ok_or(CommandError::NoArguments)?);
        let operation = lexer.next_token("operation", WORD_DELIMITERS)?;
        if operation != "put" {
            return Err(CommandError::UnknownOperation(operation.to_string()));
        }

        let saps = parse_saps(&mut lexer)?;
        let records = message::parse_message(&mut lexer, MAX_RECORDS)?;
        debug!("snep put {} with {} records", saps, records.len());
        if records.is_empty() {
            let report = snep::receive_put(device, injector, saps)?;
            Ok(CommandReply::Report(report))
        } else {
            snep::send_put(device, injector, &self.data, saps, &records)?;
            Ok(CommandReply::Done)
        }
    }

    fn run_nci<I: Injector + ?Sized>(
        &mut self,
        device: &mut NfcDevice,
        injector: &mut I,
        args: Option<&str>,
    ) -> CommandResult<CommandReply> {
        let mut lexer = ArgumentLexer::new(args.ok_or(CommandError::NoArguments)?);
        let operation = lexer.next_token("operation", WORD_DELIMITERS)?;
        match operation {
            "rf_discover_ntf" => {
                let index = parse_endpoint(&mut lexer, device)?;
                let value = lexer.next_unsigned("discover notification type", WORD_DELIMITERS)?;
                let notification_type: DiscoverNotificationType =
                    parse_enum(value, CommandError::UnknownDiscoverType)?;
                lexer.finish()?;
                debug!("rf_discover_ntf for remote endpoint {} ({:?})", index, notification_type);

                let ntf = nci::rf_discover(device, index, notification_type)?;
                let packet = self.encode_notification("rf_discover_ntf", &ntf)?;
                inject_notification(injector, "rf_discover_ntf", packet)?;
            }
            "rf_intf_activated_ntf" => {
                let mut index = None;
                let mut selection = RfSelection::Auto;
                if lexer.has_more() {
                    index = Some(parse_endpoint(&mut lexer, device)?);
                    if lexer.has_more() {
                        selection = parse_rf_selection(&mut lexer, device)?;
                    }
                }
                lexer.finish()?;
                debug!("rf_intf_activated_ntf for {:?} on {:?}", index, selection);

                let activation = nci::rf_intf_activated(device, &self.config, index, selection)?;
                let packet =
                    self.encode_notification("rf_intf_activated_ntf", &activation.notification)?;
                activation.commit(device)?;
                inject_notification(injector, "rf_intf_activated_ntf", packet)?;
            }
            "rf_intf_deactivate_ntf" => {
                let mut ntf = RfDeactivateNotification::default();
                if lexer.has_more() {
                    let value = lexer.next_unsigned("deactivate type", WORD_DELIMITERS)?;
                    let deactivation_type: DeactivationType =
                        parse_enum(value, CommandError::UnknownDeactivateType)?;
                    let value = lexer.next_unsigned("deactivate reason", WORD_DELIMITERS)?;
                    let deactivation_reason: DeactivationReason =
                        parse_enum(value, CommandError::UnknownDeactivateReason)?;
                    ntf = RfDeactivateNotification {
                        deactivation_type,
                        deactivation_reason,
                    };
                }
                lexer.finish()?;
                debug!("rf_intf_deactivate_ntf {:?}", ntf);

                let ntf = nci::rf_deactivate(ntf);
                let packet = self.encode_notification("rf_intf_deactivate_ntf", &ntf)?;
                inject_notification(injector, "rf_intf_deactivate_ntf", packet)?;
            }
            _ => return Err(CommandError::UnknownOperation(operation.to_string())),
        }
        Ok(CommandReply::Done)
    }

    fn run_tag(&mut self, device: &mut NfcDevice, args: Option<&str>) -> CommandResult<CommandReply> {
        let mut lexer = ArgumentLexer::new(args.ok_or(CommandError::NoArguments)?);
        let operation = lexer.next_token("operation", WORD_DELIMITERS)?;
        if !matches!(operation, "set" | "clear" | "format") {
            return Err(CommandError::UnknownOperation(operation.to_string()));
        }

        let index = parse_endpoint(&mut lexer, device)?;
        if operation != "set" {
            lexer.finish()?;
        }
        if device.endpoint(index).and_then(|endpoint| endpoint.tag()).is_none() {
            return Err(CommandError::NotATag);
        }
        let image = if operation == "set" {
            let records = message::parse_message(&mut lexer, MAX_RECORDS)?;
            let mut image = BytesMut::with_capacity(self.config.tag_capacity);
            if !records.is_empty() {
                self.tag.encode_message(&records, &mut image)?;
            }
            Some(image.freeze())
        } else {
            None
        };

        let Some(tag) = device.endpoint_mut(index).and_then(|endpoint| endpoint.tag_mut()) else {
            return Err(CommandError::NotATag);
        };
        match operation {
            "set" => tag.set_data(image.as_deref())?,
            "clear" => tag.set_data(None)?,
            _ => tag.format()?,
        }
        info!("tag {} of remote endpoint {}", operation, index);
        Ok(CommandReply::Done)
    }

    fn encode_notification(
        &mut self,
        notification: &'static str,
        ntf: &NciNotification,
    ) -> CommandResult<Bytes> {
        let mut packet = BytesMut::with_capacity(ntf.len());
        self.nci
            .encode(ntf, &mut packet)
            .map_err(|source| CommandError::BuildFailed {
                notification,
                source,
            })?;
        Ok(packet.freeze())
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::new(ConsoleConfig::default())
    }
}

fn run_llcp<I: Injector + ?Sized>(
    device: &mut NfcDevice,
    injector: &mut I,
    args: Option<&str>,
) -> CommandResult<CommandReply> {
    let mut lexer = ArgumentLexer::new(args.ok_or(CommandError::NoArguments)?);
    let operation = lexer.next_token("operation", WORD_DELIMITERS)?;
    if operation != "connect" {
        return Err(CommandError::UnknownOperation(operation.to_string()));
    }
    let saps = parse_saps(&mut lexer)?;
    lexer.finish()?;
    llcp::connect(device, injector, saps)?;
    Ok(CommandReply::Done)
}

fn report(err: CommandError) -> CommandError {
    warn!("{}", err.ko_line());
    err
}

fn inject_notification<I: Injector + ?Sized>(
    injector: &mut I,
    operation: &'static str,
    packet: Bytes,
) -> CommandResult<()> {
    let size = packet.len();
    injector
        .inject_notification(packet)
        .map_err(|source| CommandError::TransportRejected { operation, source })?;
    info!("injected {} ({} bytes)", operation, size);
    Ok(())
}

fn parse_sap(lexer: &mut ArgumentLexer<'_>, field: &'static str) -> CommandResult<Sap> {
    let value = lexer.next_signed(field, WORD_DELIMITERS)?;
    if value == SAP_AUTO {
        return Ok(Sap::Auto);
    }
    u8::try_from(value)
        .ok()
        .filter(|sap| i64::from(*sap) < SAP_COUNT)
        .map(Sap::Number)
        .ok_or(CommandError::InvalidSap { field, value })
}

fn parse_saps(lexer: &mut ArgumentLexer<'_>) -> CommandResult<SapPair> {
    let dsap = parse_sap(lexer, "DSAP")?;
    let ssap = parse_sap(lexer, "SSAP")?;
    Ok(SapPair { dsap, ssap })
}

fn parse_endpoint(lexer: &mut ArgumentLexer<'_>, device: &NfcDevice) -> CommandResult<usize> {
    let value = lexer.next_unsigned("remote endpoint index", WORD_DELIMITERS)?;
    usize::try_from(value)
        .ok()
        .filter(|index| *index < device.endpoints().len())
        .ok_or(CommandError::UnknownEndpoint(value))
}

fn parse_rf_selection(lexer: &mut ArgumentLexer<'_>, device: &NfcDevice) -> CommandResult<RfSelection> {
    let value = lexer.next_signed("rf index", WORD_DELIMITERS)?;
    if value == RF_AUTO {
        return Ok(RfSelection::Auto);
    }
    usize::try_from(value)
        .ok()
        .filter(|index| *index < device.rf_interfaces().len())
        .map(RfSelection::Index)
        .ok_or(CommandError::UnknownRfInterface(value))
}

fn parse_enum<T: TryFrom<u8>>(value: u64, unknown: fn(u64) -> CommandError) -> CommandResult<T> {
    u8::try_from(value)
        .ok()
        .and_then(|value| T::try_from(value).ok())
        .ok_or(unknown(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryInjector, MemoryTag, RemoteEndpoint, Tag};
    use nfcemu_ncicodec::{RfMode, RfProtocol, RfTechnology};
    use tracing_test::traced_test;

    fn device() -> NfcDevice {
        NfcDevice::new(vec![
            RemoteEndpoint::new(RfTechnology::A, RfMode::Poll, RfProtocol::NfcDep),
            RemoteEndpoint::new(RfTechnology::A, RfMode::Poll, RfProtocol::T2t)
                .with_tag(MemoryTag::new(64)),
        ])
    }

    #[test]
    fn unknown_command_and_operation() {
        let mut console = Console::default();
        let mut device = device();
        let mut host = MemoryInjector::new();
        assert!(matches!(
            console.execute(&mut device, &mut host, "ping"),
            Err(CommandError::UnknownCommand(command)) if command == "ping"
        ));
        assert!(matches!(
            console.execute(&mut device, &mut host, "nci"),
            Err(CommandError::NoArguments)
        ));
        let err = console.execute(&mut device, &mut host, "llcp bind 1 2").unwrap_err();
        assert_eq!(err.ko_line(), "KO: invalid operation 'bind'");
    }

    #[test]
    fn sap_range_is_checked() {
        let mut lexer = ArgumentLexer::new("-1 63 64");
        assert_eq!(parse_sap(&mut lexer, "DSAP").unwrap(), Sap::Auto);
        assert_eq!(parse_sap(&mut lexer, "DSAP").unwrap(), Sap::Number(63));
        assert!(matches!(
            parse_sap(&mut lexer, "SSAP"),
            Err(CommandError::InvalidSap {
                field: "SSAP",
                value: 64
            })
        ));
        assert!(matches!(
            parse_sap(&mut ArgumentLexer::new("-2"), "DSAP"),
            Err(CommandError::InvalidSap { value: -2, .. })
        ));
    }

    #[test]
    fn line_endings_are_ignored() {
        let mut console = Console::default();
        let mut device = device();
        let mut host = MemoryInjector::new();
        console
            .execute(&mut device, &mut host, "nci rf_intf_deactivate_ntf\r\n")
            .unwrap();
        assert_eq!(&host.notifications()[0][..], &[0x61, 0x06, 0x02, 0x03, 0x02]);
    }

    #[test]
    fn tag_set_writes_image() {
        let mut console = Console::default();
        let mut device = device();
        let mut host = MemoryInjector::new();
        console
            .execute(&mut device, &mut host, "tag set 1 [0x10,1,VA==,,aGk=]")
            .unwrap();
        let tag = device.endpoint(1).unwrap().tag().unwrap();
        assert_eq!(&tag.contents()[..], &[0xD1, 0x01, 0x02, b'T', b'h', b'i']);
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn oversized_tag_image_is_a_codec_error() {
        let mut console = Console::new(ConsoleConfig::default().with_tag_capacity(4));
        let mut device = device();
        let mut host = MemoryInjector::new();
        let err = console
            .execute(&mut device, &mut host, "tag set 1 [0x10,1,VA==,,aGk=]")
            .unwrap_err();
        assert!(err.is_codec_error());
        assert!(device.endpoint(1).unwrap().tag().unwrap().contents().is_empty());
    }

    #[test]
    fn activation_is_not_committed_when_packet_does_not_fit() {
        let mut console = Console::new(ConsoleConfig::default().with_notification_capacity(8));
        let mut device = device();
        let mut host = MemoryInjector::new();
        let err = console
            .execute(&mut device, &mut host, "nci rf_intf_activated_ntf 0")
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::BuildFailed {
                notification: "rf_intf_activated_ntf",
                ..
            }
        ));
        assert_eq!(device.active_endpoint(), None);
        assert_eq!(device.active_rf_interface(), None);
        assert!(host.notifications().is_empty());
    }

    #[traced_test]
    #[test]
    fn failures_are_logged_as_ko_lines() {
        let mut console = Console::default();
        let mut device = device();
        device.set_active_endpoint(Some(0)).unwrap();
        let mut host = MemoryInjector::new();
        assert!(console.execute(&mut device, &mut host, "llcp connect 0 5").is_err());
        assert!(logs_contain("KO: DSAP is 0"));
        assert!(console.execute(&mut device, &mut host, "tag format 0").is_err());
        assert!(logs_contain("KO: remote endpoint is not a tag"));
    }
}
