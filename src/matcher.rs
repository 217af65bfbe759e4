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

//! Compares two phone numbers (or phone-number-shaped strings) for the
//! degree to which they could plausibly identify the same line.

use crate::consts;
use crate::normalize;
use crate::parser;
use crate::phone_number::PhoneNumber;

/// How closely two numbers match, from least to most confident.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Level {
    /// The numbers could not possibly refer to the same line.
    NoMatch,

    /// The national significant numbers match, but only once the shorter is
    /// compared as a suffix of the longer (e.g. a national-only number
    /// against one with area code and country code both present).
    ShortNsnMatch,

    /// The national significant numbers match exactly, but the country
    /// calling code of at least one side is unknown or the two differ.
    NsnMatch,

    /// Country calling code, national significant number and extension (if
    /// any) all match exactly.
    ExactMatch,
}

/// Anything `matches` can compare: a parsed `PhoneNumber` or a raw string
/// that will be parsed (with no default region) before comparison.
pub enum Candidate<'a> {
    Number(&'a PhoneNumber),
    Raw(&'a str),
}

impl<'a> From<&'a PhoneNumber> for Candidate<'a> {
    fn from(number: &'a PhoneNumber) -> Self {
        Candidate::Number(number)
    }
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(string: &'a str) -> Self {
        Candidate::Raw(string)
    }
}

impl<'a> From<&'a String> for Candidate<'a> {
    fn from(string: &'a String) -> Self {
        Candidate::Raw(string.as_str())
    }
}

/// A normalized view of either side of a comparison: a country calling
/// code, if known, the national significant number as plain digits, and an
/// extension, if any.
struct Parsed {
    code: Option<u16>,
    national: String,
    extension: Option<String>,
}

impl Parsed {
    fn from(candidate: Candidate<'_>) -> Self {
        match candidate {
            Candidate::Number(number) => Parsed {
                code: Some(number.code().value()),
                national: number.national().to_string(),
                extension: number.extension().map(|e| e.to_string()),
            },

            Candidate::Raw(string) => {
                if let Ok(number) = parser::parse(None, string) {
                    return Parsed::from(Candidate::Number(&number));
                }

                Parsed {
                    code: None,
                    national: normalize::normalize_digits_only(string),
                    extension: None,
                }
            }
        }
    }
}

/// Compares two numbers (or number-shaped strings) and returns the
/// strongest `Level` of match that holds between them.
pub fn matches<'a, A, B>(first: A, second: B) -> Level
where
    A: Into<Candidate<'a>>,
    B: Into<Candidate<'a>>,
{
    let first = Parsed::from(first.into());
    let second = Parsed::from(second.into());

    // Rule 1: calling code, national number and extension all equal.
    if first.code.is_some()
        && first.code == second.code
        && first.national == second.national
        && first.extension == second.extension
    {
        return Level::ExactMatch;
    }

    // Rule 2: extensions present on both sides but differing.
    if let (Some(a), Some(b)) = (&first.extension, &second.extension) {
        if a != b {
            return Level::NoMatch;
        }
    }

    // Rule 3: one national number is a suffix of the other, and the shorter
    // is long enough that the match isn't coincidental.
    let (shorter, longer) = if first.national.len() <= second.national.len() {
        (&first.national, &second.national)
    } else {
        (&second.national, &first.national)
    };

    if shorter.len() < longer.len()
        && shorter.len() >= consts::MIN_LENGTH_FOR_SHORT_NSN_MATCH
        && longer.ends_with(shorter.as_str())
    {
        // A match only counts as a short-NSN match if the country calling
        // codes don't actively contradict each other.
        if let (Some(a), Some(b)) = (first.code, second.code) {
            if a != b {
                return Level::NoMatch;
            }
        }

        return Level::ShortNsnMatch;
    }

    // Rule 4: national numbers equal outright, with the extension and
    // calling code checks above having already ruled out a contradiction.
    if first.national == second.national {
        return match (first.code, second.code) {
            (Some(a), Some(b)) if a != b => Level::NoMatch,
            _ => Level::NsnMatch,
        };
    }

    Level::NoMatch
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exact_match() {
        assert_eq!(
            Level::ExactMatch,
            matches("+1 650 253 0000", "+1 650 253 0000")
        );
    }

    #[test]
    fn nsn_match_ignores_unknown_country_code() {
        assert_eq!(Level::NsnMatch, matches("+1 650 253 0000", "6502530000"));
    }

    #[test]
    fn short_nsn_match() {
        assert_eq!(Level::ShortNsnMatch, matches("+1 650 253 0000", "253 0000"));
    }

    #[test]
    fn suffix_shorter_than_seven_digits_does_not_match() {
        // "53 0000" is only 6 digits, below the short-NSN floor.
        assert_eq!(Level::NoMatch, matches("+1 650 253 0000", "53 0000"));
    }

    #[test]
    fn extension_only_on_one_side_does_not_block_nsn_match() {
        assert_eq!(
            Level::NsnMatch,
            matches("+1 650 253 0000", "+1 6502530000;ext=123")
        );
    }

    #[test]
    fn no_match() {
        assert_eq!(Level::NoMatch, matches("+1 650 253 0000", "+1 650 253 0001"));
    }
}
