// Copyright (C) 2017 1aim GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

/// A mobile network operator identifier (MCC+MNC).
///
/// This is a structured, best-effort view that can be derived from a
/// number's preferred domestic carrier code when that code happens to be a
/// 5- or 6-digit MCC+MNC pair; most regions' domestic carrier selection
/// codes are not MCC/MNC pairs at all (they are short dial prefixes, e.g.
/// Brazil's long-distance carrier codes), so prefer
/// `PhoneNumber::preferred_domestic_carrier_code` for formatting purposes
/// and only reach for this when you specifically need network-operator
/// identification.
///
/// See: <https://en.wikipedia.org/wiki/Mobile_country_code#National_operators>
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Hash, Debug)]
pub struct Carrier {
    pub mcc: u16,
    pub mnc: u16,
    pub mnc_3: bool,
}

/// Errors converting a string into a `Carrier`.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum CarrierError {
    #[error("invalid mobile country code")]
    InvalidCountryCode,

    #[error("invalid mobile network code")]
    InvalidNetworkCode,
}

impl TryFrom<&str> for Carrier {
    type Error = CarrierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() != 5 && value.len() != 6 {
            return Err(CarrierError::InvalidNetworkCode);
        }

        Ok(Self {
            mcc: value
                .get(0..3)
                .and_then(|c| c.parse().ok())
                .ok_or(CarrierError::InvalidCountryCode)?,
            mnc: value
                .get(3..)
                .and_then(|c| c.parse().ok())
                .ok_or(CarrierError::InvalidNetworkCode)?,
            mnc_3: value.len() == 6,
        })
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mnc_3 {
            write!(f, "{:03}{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}{:02}", self.mcc, self.mnc)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Carrier;
    use std::convert::TryInto;

    #[test]
    fn test_mobile_network_codes() {
        assert_eq!(
            Carrier {
                mcc: 336,
                mnc: 1,
                mnc_3: true
            },
            "336001".try_into().unwrap()
        );
        assert_eq!(
            Carrier {
                mcc: 336,
                mnc: 35,
                mnc_3: false
            },
            "33635".try_into().unwrap()
        );
    }

    #[test]
    fn rejects_non_carrier_length_strings() {
        assert!(Carrier::try_from("03").is_err());
        assert!(Carrier::try_from("123456789").is_err());
    }
}
