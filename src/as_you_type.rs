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

//! A stateful formatter that reformats its output after every keystroke,
//! the way a dialler UI would as the user types a number in.

use crate::consts;
use crate::country;
use crate::formatter::{self, Mode};
use crate::metadata::{Database, Format, Metadata, DATABASE};
use crate::parser;
use regex::Regex;

lazy_static! {
    static ref TEMPLATE_TOKEN: Regex = Regex::new(r"\$(\d+)").unwrap();
}

/// Formats digits as they're entered one at a time, mirroring what a phone's
/// dialler screen would show. Not thread-safe: a single instance represents
/// one in-progress entry and must be driven by one caller at a time.
pub struct AsYouType {
    database: &'static Database,
    region: Option<country::Id>,

    original: String,
    national_number: String,
    able_to_format: bool,
    position: Option<usize>,
}

impl AsYouType {
    /// Creates a formatter that uses `region` as the default region for
    /// numbers entered without an explicit country code.
    pub fn new(region: Option<country::Id>) -> AsYouType {
        AsYouType::with_database(&DATABASE, region)
    }

    /// As `new`, but looking up metadata in a specific `Database`.
    pub fn with_database(database: &'static Database, region: Option<country::Id>) -> AsYouType {
        AsYouType {
            database,
            region,
            original: String::new(),
            national_number: String::new(),
            able_to_format: true,
            position: None,
        }
    }

    /// Appends one entered character and returns the best-effort formatting
    /// of everything entered so far.
    pub fn input_digit(&mut self, c: char) -> String {
        self.push(c);
        self.format()
    }

    /// As `input_digit`, but also records where the caller's cursor should
    /// end up after the text is replaced with the returned string.
    /// `get_remembered_position` retrieves the value afterwards.
    pub fn input_digit_and_remember_position(&mut self, c: char) -> String {
        self.push(c);
        let result = self.format();
        self.position = Some(result.chars().count());
        result
    }

    /// The cursor position recorded by the most recent call to
    /// `input_digit_and_remember_position`, or the length of the current
    /// output if none was ever recorded.
    pub fn get_remembered_position(&self) -> usize {
        self.position.unwrap_or_else(|| self.format().chars().count())
    }

    /// Resets all accumulated state, as if no characters had been entered.
    pub fn clear(&mut self) {
        self.original.clear();
        self.national_number.clear();
        self.able_to_format = true;
        self.position = None;
    }

    fn push(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == consts::PLUS_SIGN) && !self.original.is_empty() {
            self.able_to_format = false;
        }

        self.original.push(c);
    }

    fn format(&mut self) -> String {
        self.national_number = self
            .original
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        if !self.able_to_format || self.national_number.len() < 3 {
            return self.original.clone();
        }

        let candidate = if self.original.starts_with(consts::PLUS_SIGN) {
            format!("{}{}", consts::PLUS_SIGN, self.national_number)
        } else {
            self.national_number.clone()
        };

        let number = match parser::parse_with(self.database, self.region, &candidate) {
            Ok(number) => number,
            Err(_) => return self.fallback(),
        };

        let meta = match self
            .database
            .by_id_or_code(number.country().code(), self.region)
        {
            Some(meta) => meta,
            None => return self.fallback(),
        };

        let national = number.national().to_string();

        let candidates: Vec<&Format> = meta
            .formats()
            .iter()
            .filter(|format| {
                let leading = format.leading_digits();
                leading.is_empty()
                    || leading
                        .last()
                        .unwrap()
                        .find(&national)
                        .map(|m| m.start() == 0)
                        .unwrap_or(false)
            })
            .collect();

        let prefix = if self.original.starts_with(consts::PLUS_SIGN) {
            format!("{}{} ", consts::PLUS_SIGN, meta.country_code())
        } else {
            String::new()
        };

        let formatted = if formatter_for(&national, meta.formats()).is_some() {
            // A complete match: hand off to the full formatter for an exact
            // result (it knows about national prefixes and carrier codes).
            let mode = if self.original.starts_with(consts::PLUS_SIGN) {
                Mode::International
            } else {
                Mode::National
            };

            return formatter::format_with(self.database, &number)
                .mode(mode)
                .to_string();
        } else if candidates.len() == 1 {
            apply_template(candidates[0], &national).unwrap_or_else(|| national.clone())
        } else {
            national.clone()
        };

        format!("{}{}", prefix, formatted)
    }

    fn fallback(&self) -> String {
        self.original.clone()
    }
}

trait DatabaseExt {
    fn by_id_or_code(&self, code: u16, region: Option<country::Id>) -> Option<&Metadata>;
}

impl DatabaseExt for Database {
    fn by_id_or_code(&self, code: u16, region: Option<country::Id>) -> Option<&Metadata> {
        if let Some(region) = region {
            if let Some(meta) = self.by_id(region.as_ref()) {
                if meta.country_code() == code {
                    return Some(meta);
                }
            }
        }

        self.by_code(&code).and_then(|metas| metas.into_iter().next())
    }
}

fn formatter_for<'a>(national: &str, formats: &'a [Format]) -> Option<&'a Format> {
    formats.iter().find(|format| {
        format
            .pattern()
            .find(national)
            .map(|m| m.start() == 0 && m.end() == national.len())
            .unwrap_or(false)
    })
}

/// Lays `national`'s digits out in the same grouping `format` would produce
/// for a complete number, truncating at whatever has been entered so far.
/// The group boundaries are discovered by matching the format's pattern
/// against a probe string of distinct digits, since patterns are always
/// fixed-width digit group regexes in practice.
fn apply_template(format: &Format, national: &str) -> Option<String> {
    const PROBE: &str = "123456789012345";

    let captures = format.pattern().captures(PROBE)?;
    let mut lengths = Vec::new();

    for i in 1..captures.len() {
        lengths.push(captures.get(i)?.as_str().len());
    }

    let mut tokens = Vec::new();
    let mut last = 0;

    for m in TEMPLATE_TOKEN.find_iter(format.format()) {
        if m.start() > last {
            tokens.push(Token::Literal(format.format()[last..m.start()].to_owned()));
        }

        let index: usize = format.format()[m.start() + 1..m.end()].parse().ok()?;
        tokens.push(Token::Group(index));
        last = m.end();
    }

    if last < format.format().len() {
        tokens.push(Token::Literal(format.format()[last..].to_owned()));
    }

    let mut out = String::new();
    let mut consumed = 0;

    for token in tokens {
        match token {
            Token::Literal(text) => {
                if consumed < national.len() {
                    out.push_str(&text);
                }
            }

            Token::Group(index) => {
                let len = *lengths.get(index.checked_sub(1)?)?;
                let take = len.min(national.len().saturating_sub(consumed));

                if take == 0 {
                    break;
                }

                out.push_str(&national[consumed..consumed + take]);
                consumed += take;
            }
        }
    }

    if consumed < national.len() {
        out.push_str(&national[consumed..]);
    }

    Some(out)
}

enum Token {
    Literal(String),
    Group(usize),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::country;

    #[test]
    fn formats_progressively() {
        let mut ayt = AsYouType::new(Some(country::US));

        assert_eq!("6", ayt.input_digit('6'));
        assert_eq!("65", ayt.input_digit('5'));

        for c in "0253".chars() {
            ayt.input_digit(c);
        }

        for c in "0000".chars() {
            ayt.input_digit(c);
        }

        assert!(ayt
            .format()
            .chars()
            .any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn clear_resets_state() {
        let mut ayt = AsYouType::new(Some(country::US));
        ayt.input_digit('6');
        ayt.input_digit('5');
        ayt.input_digit('0');
        ayt.clear();

        assert_eq!("", ayt.original);
    }

    #[test]
    fn international_entry_keeps_plus() {
        let mut ayt = AsYouType::new(None);

        for c in "+16502530000".chars() {
            ayt.input_digit(c);
        }

        assert!(ayt.format().starts_with('+'));
    }
}
