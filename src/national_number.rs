use std::fmt;

/// The National (significant) Number, as defined in International
/// Telecommunication Union (ITU) Recommendation E.164, without any leading
/// zero.
///
/// In some countries, the national (significant) number starts with one or
/// more "0"s without this being a national prefix or trunk code of some
/// kind. For example, the leading zero in the national (significant) number
/// of an Italian phone number indicates the number is a fixed-line number.
/// There have been plans to migrate fixed-line numbers to start with the
/// digit two since December 2000, but it has not happened yet. See
/// <http://en.wikipedia.org/wiki/%2B39> for more details.
///
/// These fields can be safely ignored (there is no need to set them) for
/// most countries. Some limited number of countries behave like Italy - for
/// these cases, if the leading zero(s) of a number would be retained even
/// when dialling internationally, the zero count is set here.
///
/// Clients who use the parsing or conversion functionality of this library
/// will have these fields set if necessary automatically.
#[derive(Copy, Clone, Default, Debug)]
pub struct NationalNumber {
    value: u64,

    /// Number of meaningful leading zeros, if any. `None` (or `Some(0)`)
    /// means the significant number has no meaningful leading zero.
    zeroes: Option<u8>,
}

impl NationalNumber {
    /// Build a national number from its numeric value and the count of
    /// meaningful leading zeros (`0` if there are none).
    pub fn new(value: u64, zeroes: u8) -> Self {
        NationalNumber {
            value,
            zeroes: if zeroes > 0 { Some(zeroes) } else { None },
        }
    }

    /// The numeric value of the national number, without any leading zeros.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether the significant number has a meaningful leading zero (e.g.
    /// Italy, Ivory Coast).
    pub fn is_italian_leading_zero(&self) -> bool {
        self.zeroes.is_some()
    }

    /// The number of meaningful leading zeros.
    pub fn number_of_leading_zeros(&self) -> u8 {
        self.zeroes.unwrap_or(0)
    }
}

impl fmt::Display for NationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.zeroes.unwrap_or(0) {
            write!(f, "0")?;
        }

        write!(f, "{}", self.value)
    }
}

impl PartialEq for NationalNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.number_of_leading_zeros() == other.number_of_leading_zeros()
    }
}

impl Eq for NationalNumber {}

impl std::hash::Hash for NationalNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.number_of_leading_zeros().hash(state);
    }
}

impl std::str::FromStr for NationalNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let zeroes = s.chars().take_while(|&c| c == '0').count() as u8;
        // A national number equal to "0" or all zeroes has no significant
        // digits left over; treat it as value 0 with no leading-zero flag.
        let trimmed = s.trim_start_matches('0');

        if trimmed.is_empty() {
            Ok(NationalNumber::new(0, 0))
        } else {
            Ok(NationalNumber::new(trimmed.parse()?, zeroes))
        }
    }
}
