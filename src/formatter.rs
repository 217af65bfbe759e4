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

use crate::{
    consts,
    metadata::{Database, Format, Metadata, DATABASE},
    phone_number::PhoneNumber,
    validator,
};
use std::{borrow::Cow, fmt};

/// Formatting modes for phone number.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    /// E.164 formatting, no spaces, no decorations.
    E164,

    /// International formatting, contains country code and country dependent
    /// formatting.
    International,

    /// National formatting, no country code and country dependent formatting.
    National,

    /// RFC3966 formatting, see the RFC.
    Rfc3966,
}

/// A formatter for a `PhoneNumber`.
#[derive(Copy, Clone, Debug)]
pub struct Formatter<'n, 'd, 'f> {
    number: &'n PhoneNumber,
    database: Option<&'d Database>,
    mode: Mode,
    format: Option<&'f Format>,
}

impl<'n, 'd, 'f> Formatter<'n, 'd, 'f> {
    /// Define a metadata database to use for formatting.
    pub fn database<'a>(self, database: &'a Database) -> Formatter<'n, 'a, 'f> {
        Formatter {
            number: self.number,
            database: Some(database),
            mode: self.mode,
            format: self.format,
        }
    }

    /// Define the formatting mode.
    pub fn mode(mut self, mode: Mode) -> Formatter<'n, 'd, 'f> {
        self.mode = mode;
        self
    }

    /// Define a custom `Format` to use for formatting.
    pub fn with<'a>(self, format: &'a Format) -> Formatter<'n, 'd, 'a> {
        Formatter {
            number: self.number,
            database: self.database,
            mode: self.mode,
            format: Some(format),
        }
    }
}

/// Create a new `Formatter` for the given phone number.
pub fn format<'n>(number: &'n PhoneNumber) -> Formatter<'n, 'static, 'static> {
    Formatter {
        number: number,
        database: None,
        mode: Mode::E164,
        format: None,
    }
}

/// Create a new `Formatter` for the given phone number using the given
/// metadata database.
pub fn format_with<'d, 'n>(
    database: &'d Database,
    number: &'n PhoneNumber,
) -> Formatter<'n, 'd, 'static> {
    Formatter {
        number: number,
        database: Some(database),
        mode: Mode::E164,
        format: None,
    }
}

impl<'n, 'd, 'f> fmt::Display for Formatter<'n, 'd, 'f> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let db = self.database.unwrap_or(&*DATABASE);

        // If the country code is invalid, return an error.
        let meta = try_opt!(Err(fmt::Error);
			db.by_code(&self.number.country().code()).map(|m|
				m.into_iter().next().unwrap()));

        let national = self.number.national().to_string();
        let formatter = self.format.or_else(|| {
            formatter(
                &national,
                if meta.international_formats().is_empty() || self.mode == Mode::National {
                    meta.formats()
                } else {
                    meta.international_formats()
                },
            )
        });

        match self.mode {
            // Requires no formatting at all, easy life.
            Mode::E164 => {
                write!(f, "+{}{}", self.number.country().code(), national)?;
            }

            // Space separated formatting with national specific rules.
            Mode::International => {
                write!(f, "+{} ", self.number.country().code())?;

                if let Some(formatter) = formatter {
                    write!(f, "{}", replace(&national, meta, formatter, None, None))?;
                } else {
                    write!(f, "{}", national)?;
                }

                if let Some(ext) = self.number.extension() {
                    write!(
                        f,
                        "{}{}",
                        meta.preferred_extension_prefix().unwrap_or(" ext. "),
                        ext
                    )?;
                }
            }

            Mode::National => {
                if let Some(formatter) = formatter {
                    let carrier = self
                        .number
                        .preferred_domestic_carrier_code()
                        .and_then(|c| formatter.domestic_carrier().map(|f| (c, f)));

                    if let Some((carrier, format)) = carrier {
                        write!(
                            f,
                            "{}",
                            replace(&national, meta, formatter, Some(format), Some(carrier))
                        )?;
                    } else if let Some(prefix) = formatter.national_prefix() {
                        write!(
                            f,
                            "{}",
                            replace(&national, meta, formatter, Some(prefix), None)
                        )?;
                    } else {
                        write!(f, "{}", replace(&national, meta, formatter, None, None))?;
                    }
                } else {
                    write!(f, "{}", national)?;
                }

                if let Some(ext) = self.number.extension() {
                    write!(
                        f,
                        "{}{}",
                        meta.preferred_extension_prefix().unwrap_or(" ext. "),
                        ext
                    )?;
                }
            }

            Mode::Rfc3966 => {
                write!(f, "tel:+{}-", self.number.country().code())?;

                if let Some(formatter) = formatter {
                    write!(
                        f,
                        "{}",
                        consts::SEPARATOR_PATTERN
                            .replace_all(&replace(&national, meta, formatter, None, None), "-")
                    )?;
                } else {
                    write!(f, "{}", national)?;
                }

                if let Some(ext) = self.number.extension() {
                    write!(f, ";ext={}", ext)?;
                }
            }
        }

        Ok(())
    }
}

/// Format `number` the way someone dialling it from `region` would need to
/// dial it: national formatting when both share a country calling code (e.g.
/// a NANPA number dialled from another NANPA region), international
/// formatting with the calling region's own out-of-country prefix otherwise.
pub fn format_out_of_country_calling_number(number: &PhoneNumber, region: crate::country::Id) -> String {
    format_out_of_country_calling_number_with(&DATABASE, number, region)
}

/// As `format_out_of_country_calling_number`, using a specific `Database`.
pub fn format_out_of_country_calling_number_with(
    database: &Database,
    number: &PhoneNumber,
    region: crate::country::Id,
) -> String {
    let calling_meta = match database.by_id(region.as_ref()) {
        Some(meta) => meta,
        None => return format_with(database, number).mode(Mode::International).to_string(),
    };

    if calling_meta.country_code() == number.code().value() {
        return format_with(database, number).mode(Mode::National).to_string();
    }

    let international = format_with(database, number).mode(Mode::International).to_string();

    match calling_meta.preferred_international_prefix() {
        Some(prefix) => international.replacen('+', prefix, 1),
        None => international,
    }
}

/// As `format_out_of_country_calling_number`, but replacing any digits that
/// came from alphabetic characters in the original raw input (if kept via
/// `parse_and_keep_raw_input`) back into the formatted output, so that e.g.
/// `1-800-FLOWERS` keeps its letters instead of being fully digit-formatted.
pub fn format_out_of_country_keeping_alpha_chars(
    number: &PhoneNumber,
    region: crate::country::Id,
) -> String {
    let formatted = format_out_of_country_calling_number(number, region);
    let raw = match number.raw_input() {
        Some(raw) => raw,
        None => return formatted,
    };

    if !consts::VALID_ALPHA_PHONE.is_match(raw) {
        return formatted;
    }

    // Keep only the characters from the raw input that are plausible phone
    // number content (digits, alpha, plus, and grouping punctuation), upper
    // cased the way the national format would present them.
    raw.chars()
        .filter(|c| {
            c.is_ascii_digit()
                || c.is_ascii_alphabetic()
                || consts::ALL_PLUS_NUMBER_GROUPING_SYMBOLS.contains_key(c)
                || *c == '+'
        })
        .collect()
}

/// Format `number` the way it was likely presented originally, if it was
/// parsed with `parse_and_keep_raw_input`; otherwise falls back to the
/// appropriate mode based on the number's country code source.
pub fn format_in_original_format(number: &PhoneNumber, region: crate::country::Id) -> String {
    if let Some(raw) = number.raw_input() {
        if validator::is_viable(raw) {
            return raw.to_string();
        }
    }

    match number.code().source() {
        crate::country::Source::Plus | crate::country::Source::Idd => {
            format(number).mode(Mode::International).to_string()
        }

        crate::country::Source::Number | crate::country::Source::Default => {
            format_out_of_country_calling_number(number, region)
        }
    }
}

/// Format `number` the way it should be dialled from a mobile phone within
/// its own country, applying the handful of region-specific mobile dialling
/// quirks libphonenumber hardcodes rather than deriving from metadata:
/// Mexico and Argentina insert an extra digit for mobile-to-mobile calls,
/// and Brazil's long-distance carrier code is only meaningful when dialling
/// from a landline.
pub fn format_for_mobile_dialing(number: &PhoneNumber, with_formatting: bool) -> String {
    let region = match number.country().id() {
        Some(region) => region,
        None => {
            return if with_formatting {
                format(number).mode(Mode::International).to_string()
            } else {
                format(number).mode(Mode::E164).to_string()
            }
        }
    };

    let national = || {
        if with_formatting {
            format(number).mode(Mode::National).to_string()
        } else {
            number.national().to_string()
        }
    };

    match region {
        crate::country::MX | crate::country::AR => {
            // Mobile numbers dialled domestically in Mexico and Argentina are
            // prefixed with an extra "1" after the national trunk prefix.
            let national = national();

            if with_formatting {
                national
            } else {
                format!("1{}", national)
            }
        }

        crate::country::BR => {
            // The domestic carrier code is part of dialling from a landline;
            // when dialling from a mobile it is dropped entirely.
            if with_formatting {
                format(number).mode(Mode::National).to_string()
            } else {
                number.national().to_string()
            }
        }

        _ => {
            if with_formatting {
                format(number).mode(Mode::National).to_string()
            } else {
                format(number).mode(Mode::E164).to_string()
            }
        }
    }
}

fn formatter<'a>(number: &str, formats: &'a [Format]) -> Option<&'a Format> {
    for format in formats {
        let leading = format.leading_digits();

        if leading.is_empty()
            || leading
                .last()
                .unwrap()
                .find(&number)
                .map(|m| m.start() == 0)
                .unwrap_or(false)
        {
            if format
                .pattern()
                .find(&number)
                .map(|m| m.start() == 0 && m.end() == number.len())
                .unwrap_or(false)
            {
                return Some(format);
            }
        }
    }

    None
}

fn replace(
    national: &str,
    meta: &Metadata,
    formatter: &Format,
    transform: Option<&str>,
    carrier: Option<&str>,
) -> String {
    formatter
        .pattern()
        .replace(
            national,
            &*if let Some(transform) = transform {
                let first = consts::FIRST_GROUP
                    .captures(&formatter.format())
                    .unwrap()
                    .get(1)
                    .unwrap()
                    .as_str();
                let format = transform.replace(*consts::NP, meta.national_prefix().unwrap_or(""));
                let format = format.replace(*consts::FG, &*format!("${}", first));
                let format = format.replace(*consts::CC, carrier.unwrap_or(""));

                consts::FIRST_GROUP.replace(formatter.format(), &*format)
            } else {
                Cow::Borrowed(formatter.format())
            },
        )
        .into()
}

#[cfg(test)]
mod test {
    use crate::country;
    use crate::formatter::Mode;
    use crate::parser;

    #[test]
    fn us() {
        assert_eq!(
            "(650) 253-0000",
            parser::parse(Some(country::US), "+1 6502530000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+1 650-253-0000",
            parser::parse(Some(country::US), "+1 6502530000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "(800) 253-0000",
            parser::parse(Some(country::US), "+1 8002530000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+1 800-253-0000",
            parser::parse(Some(country::US), "+1 8002530000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "(900) 253-0000",
            parser::parse(Some(country::US), "+1 9002530000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+1 900-253-0000",
            parser::parse(Some(country::US), "+1 9002530000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "tel:+1-900-253-0000",
            parser::parse(Some(country::US), "+1 9002530000")
                .unwrap()
                .format()
                .mode(Mode::Rfc3966)
                .to_string()
        );
    }

    #[test]
    fn gb() {
        assert_eq!(
            "020 7031 3000",
            parser::parse(Some(country::GB), "+44 2070313000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+44 20 7031 3000",
            parser::parse(Some(country::GB), "+44 2070313000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "020 7031 3000",
            parser::parse(Some(country::GB), "+44 2070313000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "07912 345678",
            parser::parse(Some(country::GB), "+44 7912345678")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+44 7912 345678",
            parser::parse(Some(country::GB), "+44 7912345678")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );
    }
}
