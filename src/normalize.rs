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

//! Digit normalisation helpers, factored out of the parser so callers can
//! pre-process raw input (e.g. for display, or before handing it to
//! `AsYouType`) without going through a full `parse`.

use crate::consts;
use crate::parser::helper::AsCharExt;
use crate::validator;

/// Converts a phone number in the given string, possibly containing
/// formatting information such as dashes, spaces, and alphabetic characters,
/// into one consisting only of ASCII digits, preserving a leading `+` if
/// present.
pub fn normalize_digits<S: AsRef<str>>(string: S) -> String {
    normalize_with(string, &consts::ALPHA_PHONE_MAPPINGS)
}

/// As `normalize_digits`, but dropping alphabetic characters instead of
/// converting them to their keypad digit equivalent.
pub fn normalize_digits_only<S: AsRef<str>>(string: S) -> String {
    normalize_with(string, &consts::ASCII_MAPPINGS)
}

/// Converts alphabetic characters in a phone number to their keypad-digit
/// equivalent (e.g. the `F` in `1-800-FLOWERS` becomes `3`), leaving every
/// other character — digits, punctuation, whitespace, a leading `+` — exactly
/// as it was. Unlike `normalize_digits`, nothing is dropped: this is purely a
/// letter-to-digit substitution over the original string.
pub fn convert_alpha_to_digits<S: AsRef<str>>(string: S) -> String {
    let string = string.as_ref();
    let mut out = String::with_capacity(string.len());

    for ch in string.chars() {
        if let Some(&mapped) = consts::ALPHA_MAPPINGS.get(&ch.to_ascii_uppercase()) {
            out.push(mapped);
        } else {
            out.push(ch);
        }
    }

    out
}

fn normalize_with<S: AsRef<str>>(string: S, mappings: &fnv::FnvHashMap<char, char>) -> String {
    let string = string.as_ref();
    let mut out = String::with_capacity(string.len());

    if let Some(rest) = string.strip_prefix(consts::PLUS_SIGN) {
        out.push(consts::PLUS_SIGN);
        normalize_into(rest, mappings, &mut out);
    } else {
        normalize_into(string, mappings, &mut out);
    }

    out
}

fn normalize_into(string: &str, mappings: &fnv::FnvHashMap<char, char>, out: &mut String) {
    for ch in string.chars() {
        if let Some(digit) = ch.as_dec_digit() {
            out.push(digit);
        } else if let Some(&mapped) = mappings.get(&ch) {
            out.push(mapped);
        }
    }
}

/// Checks whether a string looks enough like a phone number to be worth
/// attempting to parse (at least two characters, matching the same coarse
/// "viable number" shape the parser itself requires).
pub fn is_viable_phone_number<S: AsRef<str>>(string: S) -> bool {
    validator::is_viable(string)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_formatting() {
        assert_eq!("2345", normalize_digits("(234) 5"));
    }

    #[test]
    fn keeps_leading_plus() {
        assert_eq!("+492345", normalize_digits("+49 (234) 5"));
    }

    #[test]
    fn converts_letters() {
        assert_eq!("1800356937", normalize_digits("1-800-FLOWERS"));
    }

    #[test]
    fn digits_only_drops_letters() {
        assert_eq!("1800", normalize_digits_only("1-800-FLOWERS"));
    }

    #[test]
    fn convert_alpha_to_digits_preserves_punctuation() {
        assert_eq!("1-800-356937", convert_alpha_to_digits("1-800-FLOWERS"));
    }

    #[test]
    fn convert_alpha_to_digits_is_case_insensitive() {
        assert_eq!("1-800-356937", convert_alpha_to_digits("1-800-flowers"));
    }

    #[test]
    fn viability() {
        assert!(is_viable_phone_number("+1 650 253 0000"));
        assert!(!is_viable_phone_number("a"));
    }
}
