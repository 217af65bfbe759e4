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

//! Finds phone-number-shaped substrings embedded in free text.

use crate::country;
use crate::formatter::{self, Mode};
use crate::parser;
use crate::parser::helper;
use crate::phone_number::PhoneNumber;
use crate::validator;

/// How strictly a candidate substring must resemble a real phone number
/// before `find_numbers` yields it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Leniency {
    /// The candidate only needs to be a possible number (right length for
    /// its region).
    Possible,

    /// The candidate must be a valid number (right length *and* a known
    /// number-type pattern).
    Valid,

    /// As `Valid`, and the digit grouping of the candidate as written must
    /// use the same number of groups as the canonical formatting.
    StrictGrouping,

    /// As `StrictGrouping`, and the candidate must format back to exactly
    /// the canonical representation once separators are normalised.
    ExactlySameGrouping,
}

/// A phone number found embedded in text, together with the byte span it
/// occupied in the original string.
#[derive(Clone, Debug)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub raw: String,
    pub number: PhoneNumber,
}

impl Match {
    /// The substring of the original text this match was found in.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Finds phone numbers in `text`, using `region` as the default region for
/// candidates with no explicit country code, and requiring at least
/// `Leniency::Valid` before yielding a match.
pub fn find_numbers(text: &str, region: Option<country::Id>) -> Matches<'_> {
    find_numbers_with_leniency(text, region, Leniency::Valid)
}

/// As `find_numbers`, but with an explicit leniency level.
pub fn find_numbers_with_leniency(
    text: &str,
    region: Option<country::Id>,
    leniency: Leniency,
) -> Matches<'_> {
    Matches {
        text,
        region,
        leniency,
        offset: 0,
        tries: 0,
        max_tries: usize::MAX,
    }
}

/// As `find_numbers_with_leniency`, but giving up after `max_tries`
/// candidate substrings have been examined, whether or not they matched.
pub fn find_numbers_with_max_tries(
    text: &str,
    region: Option<country::Id>,
    leniency: Leniency,
    max_tries: usize,
) -> Matches<'_> {
    Matches {
        text,
        region,
        leniency,
        offset: 0,
        tries: 0,
        max_tries,
    }
}

/// A lazy, finite iterator of `Match`es. Restarts scanning from scratch
/// right after the end of each examined candidate; never backtracks.
pub struct Matches<'a> {
    text: &'a str,
    region: Option<country::Id>,
    leniency: Leniency,
    offset: usize,
    tries: usize,
    max_tries: usize,
}

impl<'a> Iterator for Matches<'a> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        while self.offset < self.text.len() && self.tries < self.max_tries {
            let slice = &self.text[self.offset..];

            let (start, candidate) = match helper::extract(slice) {
                Ok((_, candidate)) => {
                    let start =
                        self.offset + (candidate.as_ptr() as usize - slice.as_ptr() as usize);
                    (start, candidate)
                }
                Err(_) => break,
            };

            let end = start + candidate.len();
            self.offset = end;
            self.tries += 1;

            if digits_in(candidate) < 3 {
                continue;
            }

            if touches_longer_digit_run(self.text, start, end) {
                continue;
            }

            if let Ok(number) = parser::parse(self.region, candidate) {
                if satisfies(&number, candidate, self.leniency) {
                    return Some(Match {
                        start,
                        end,
                        raw: candidate.to_owned(),
                        number,
                    });
                }
            }
        }

        None
    }
}

fn digits_in(candidate: &str) -> usize {
    candidate.chars().filter(char::is_ascii_digit).count()
}

/// True if the character immediately preceding `start` or following `end`
/// in `text` is itself a digit, meaning the candidate is really a sub-run
/// of a longer digit sequence (e.g. a serial number) rather than a number
/// in its own right.
fn touches_longer_digit_run(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    before.map(|c| c.is_ascii_digit()).unwrap_or(false)
        || after.map(|c| c.is_ascii_digit()).unwrap_or(false)
}

fn satisfies(number: &PhoneNumber, candidate: &str, leniency: Leniency) -> bool {
    match leniency {
        Leniency::Possible => validator::is_possible_number(number),

        Leniency::Valid => validator::is_valid_number(number),

        Leniency::StrictGrouping => {
            validator::is_valid_number(number) && same_group_count(number, candidate)
        }

        Leniency::ExactlySameGrouping => {
            validator::is_valid_number(number) && same_grouping(number, candidate)
        }
    }
}

fn groups(string: &str) -> Vec<usize> {
    string
        .split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .map(str::len)
        .collect()
}

fn canonical(number: &PhoneNumber) -> String {
    let mode = if candidate_has_plus(number) {
        Mode::International
    } else {
        Mode::National
    };

    formatter::format(number).mode(mode).to_string()
}

fn candidate_has_plus(number: &PhoneNumber) -> bool {
    !matches!(number.code().source(), country::Source::Default)
}

fn same_group_count(number: &PhoneNumber, candidate: &str) -> bool {
    groups(candidate).len() == groups(&canonical(number)).len()
}

fn same_grouping(number: &PhoneNumber, candidate: &str) -> bool {
    groups(candidate) == groups(&canonical(number))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_single_number() {
        let matches: Vec<_> =
            find_numbers("call me at +1 650-253-0000 tomorrow", None).collect();

        assert_eq!(1, matches.len());
        assert_eq!("+1 650-253-0000", matches[0].as_str());
    }

    #[test]
    fn skips_short_runs() {
        let matches: Vec<_> = find_numbers("room 42", None).collect();
        assert!(matches.is_empty());
    }

    #[test]
    fn skips_part_of_longer_digit_run() {
        let matches: Vec<_> =
            find_numbers("invoice 0123456789012345 due", None).collect();
        assert!(matches.is_empty());
    }

    #[test]
    fn finds_two_numbers() {
        let matches: Vec<_> = find_numbers(
            "reach us at +1 650-253-0000 or +44 20 7031 3000",
            None,
        )
        .collect();

        assert_eq!(2, matches.len());
    }
}
