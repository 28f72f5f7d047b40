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

//! Closed NCI value types.
//!
//! Every type converts to its wire byte with `u8::from` and back with
//! `TryFrom<u8>`, which rejects values outside the defined set with
//! [`NciError::InvalidValue`].

use crate::NciError;

macro_rules! nci_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Field name used in diagnostics.
            pub const FIELD: &'static str = $field;
        }

        impl TryFrom<u8> for $name {
            type Error = NciError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(NciError::InvalidValue {
                        field: $field,
                        value,
                    }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value as u8
            }
        }
    };
}

nci_enum! {
    /// RF protocol spoken by a remote endpoint.
    RfProtocol("rf protocol") {
        /// Not yet determined
        Undetermined = 0,
        /// Type 1 Tag
        T1t = 1,
        /// Type 2 Tag
        T2t = 2,
        /// Type 3 Tag
        T3t = 3,
        /// ISO-DEP
        IsoDep = 4,
        /// NFC-DEP
        NfcDep = 5,
        /// Type 5 Tag
        T5t = 6,
        /// NDEF
        Ndef = 7,
    }
}

nci_enum! {
    /// RF interface the controller exposes to the host.
    RfInterfaceType("rf interface") {
        /// NFCEE direct
        NfceeDirect = 0,
        /// Frame RF interface
        Frame = 1,
        /// ISO-DEP RF interface
        IsoDep = 2,
        /// NFC-DEP RF interface
        NfcDep = 3,
        /// NDEF RF interface
        Ndef = 6,
    }
}

nci_enum! {
    /// Combined RF technology and mode of an activation.
    RfTechnologyAndMode("rf technology and mode") {
        /// NFC-A passive poll
        NfcAPassivePoll = 0x00,
        /// NFC-B passive poll
        NfcBPassivePoll = 0x01,
        /// NFC-F passive poll
        NfcFPassivePoll = 0x02,
        /// NFC-V passive poll
        NfcVPassivePoll = 0x06,
        /// NFC-A passive listen
        NfcAPassiveListen = 0x80,
        /// NFC-B passive listen
        NfcBPassiveListen = 0x81,
        /// NFC-F passive listen
        NfcFPassiveListen = 0x82,
    }
}

nci_enum! {
    /// Bit rate of a data exchange.
    BitRate("bit rate") {
        /// 106 kbit/s
        BitRate106 = 0,
        /// 212 kbit/s
        BitRate212 = 1,
        /// 424 kbit/s
        BitRate424 = 2,
        /// 848 kbit/s
        BitRate848 = 3,
        /// 1695 kbit/s
        BitRate1695 = 4,
        /// 3390 kbit/s
        BitRate3390 = 5,
        /// 6780 kbit/s
        BitRate6780 = 6,
    }
}

nci_enum! {
    /// Whether more RF_DISCOVER_NTF follow this one.
    DiscoverNotificationType("discover notification type") {
        /// Last notification
        Last = 0,
        /// Last notification, controller limit reached
        LastLimit = 1,
        /// More notifications follow
        More = 2,
    }
}

nci_enum! {
    /// State the RF link falls back to after deactivation.
    DeactivationType("deactivate notification type") {
        /// Idle mode
        Idle = 0,
        /// Sleep mode
        Sleep = 1,
        /// Sleep AF mode
        SleepAf = 2,
        /// Back to discovery
        Discovery = 3,
    }
}

nci_enum! {
    /// Cause of an RF deactivation.
    DeactivationReason("deactivate notification reason") {
        /// Requested by the device host
        DhRequest = 0,
        /// Requested by the remote endpoint
        EndpointRequest = 1,
        /// RF link lost
        RfLinkLoss = 2,
        /// NFC-B bad AFI
        NfcBBadAfi = 3,
        /// Device host request failed
        DhRequestFailed = 4,
    }
}

/// RF technology of a remote endpoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RfTechnology {
    /// NFC-A
    A,
    /// NFC-B
    B,
    /// NFC-F
    F,
    /// NFC-V
    V,
}

/// Which side of the link polls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RfMode {
    /// The controller polls the remote endpoint.
    Poll,
    /// The controller listens for the remote endpoint.
    Listen,
}

impl RfTechnologyAndMode {
    /// Combines a technology and a mode. NFC-V has no listen mode.
    pub fn from_parts(technology: RfTechnology, mode: RfMode) -> Option<RfTechnologyAndMode> {
        match (technology, mode) {
            (RfTechnology::A, RfMode::Poll) => Some(RfTechnologyAndMode::NfcAPassivePoll),
            (RfTechnology::B, RfMode::Poll) => Some(RfTechnologyAndMode::NfcBPassivePoll),
            (RfTechnology::F, RfMode::Poll) => Some(RfTechnologyAndMode::NfcFPassivePoll),
            (RfTechnology::V, RfMode::Poll) => Some(RfTechnologyAndMode::NfcVPassivePoll),
            (RfTechnology::A, RfMode::Listen) => Some(RfTechnologyAndMode::NfcAPassiveListen),
            (RfTechnology::B, RfMode::Listen) => Some(RfTechnologyAndMode::NfcBPassiveListen),
            (RfTechnology::F, RfMode::Listen) => Some(RfTechnologyAndMode::NfcFPassiveListen),
            (RfTechnology::V, RfMode::Listen) => None,
        }
    }

    /// Mode half of the value.
    pub fn mode(self) -> RfMode {
        if u8::from(self) & 0x80 == 0 {
            RfMode::Poll
        } else {
            RfMode::Listen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_rejects_gaps() {
        assert_eq!(RfInterfaceType::try_from(6).unwrap(), RfInterfaceType::Ndef);
        assert!(matches!(
            RfInterfaceType::try_from(4),
            Err(NciError::InvalidValue {
                field: "rf interface",
                value: 4
            })
        ));
    }

    #[test]
    fn deactivation_ranges() {
        assert_eq!(DeactivationType::try_from(3).unwrap(), DeactivationType::Discovery);
        assert!(DeactivationType::try_from(4).is_err());
        assert_eq!(
            DeactivationReason::try_from(4).unwrap(),
            DeactivationReason::DhRequestFailed
        );
        assert!(DeactivationReason::try_from(5).is_err());
        assert!(DiscoverNotificationType::try_from(3).is_err());
    }

    #[test]
    fn technology_and_mode_combines_parts() {
        let value = RfTechnologyAndMode::from_parts(RfTechnology::F, RfMode::Listen).unwrap();
        assert_eq!(u8::from(value), 0x82);
        assert_eq!(value.mode(), RfMode::Listen);
        assert_eq!(
            RfTechnologyAndMode::from_parts(RfTechnology::V, RfMode::Poll).map(u8::from),
            Some(0x06)
        );
        assert_eq!(RfTechnologyAndMode::from_parts(RfTechnology::V, RfMode::Listen), None);
    }
}
