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

use thiserror::Error;

/// Errors that can occur while parsing a phone number.
///
/// No parse path ever panics on malformed user input; every failure to turn
/// a string into a `PhoneNumber` is represented by one of these variants.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
    /// The string passed in could not be interpreted as a phone number at
    /// all (fewer than two viable characters, or no digits whatsoever).
    #[error("not a number")]
    NotANumber,

    /// The country calling code supplied did not belong to a supported
    /// region or non-geographical entity.
    #[error("invalid country code")]
    InvalidCountryCode,

    /// The string started with an international dialing prefix, but after
    /// stripping it, had fewer digits than any valid phone number (including
    /// the country calling code) could have.
    #[error("the number is too short after the international dialing prefix")]
    TooShortAfterIdd,

    /// The string, after any country calling code has been stripped, had
    /// fewer digits than any valid phone number could have.
    #[error("the number is too short after the country calling code")]
    TooShortNsn,

    /// The string had more digits than any valid phone number could have.
    #[error("the number is too long")]
    TooLongNsn,
}

impl From<std::num::ParseIntError> for ParseError {
    fn from(_: std::num::ParseIntError) -> Self {
        ParseError::InvalidCountryCode
    }
}

/// Structural errors encountered while walking the numbering-plan XML tree,
/// independent of the underlying XML tokenizer.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum MetadataError {
    /// The XML document ended before parsing completed.
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// A closing tag did not match the currently open element.
    #[error("mismatched tag: {0}")]
    MismatchedTag(String),

    /// A required attribute or child element was missing.
    #[error("{phase}: missing value: {name}")]
    MissingValue { phase: String, name: String },

    /// An XML element was not recognised in the current phase.
    #[error("{phase}: unhandled element: {name}")]
    UnhandledElement { phase: String, name: String },

    /// An XML attribute was not recognised on the current element.
    #[error("{phase}: unhandled attribute: {name}={value}")]
    UnhandledAttribute {
        phase: String,
        name: String,
        value: String,
    },

    /// An XML event was not expected in the current phase.
    #[error("{phase}: unhandled event: {event}")]
    UnhandledEvent { phase: String, event: String },
}

/// Errors that can occur while loading a `Metadata` database, either from
/// the XML numbering-plan source (build time) or from a serialized binary
/// blob (run time, via `Database::load`/`Database::parse`).
///
/// These are treated as programming/data errors: they are not expected in
/// production use of the embedded default database, and they propagate as
/// fatal rather than being recovered from.
#[derive(Error, Debug)]
pub enum LoadMetadataError {
    /// The XML tree did not have the expected shape.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Underlying XML parsing error.
    #[error(transparent)]
    Xml(#[from] xml::Error),

    /// Underlying XML attribute error.
    #[error(transparent)]
    XmlAttribute(#[from] xml::events::attributes::AttrError),

    /// A numbering-plan field did not compile as a regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// A numbering-plan field failed the build-time regex syntax check.
    #[error(transparent)]
    RegexSyntax(#[from] regex_syntax::Error),

    /// I/O error reading the source.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A numeric attribute (e.g. `countryCode`) did not parse as an integer.
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// A boolean attribute (e.g. `mainCountryForCode`) did not parse.
    #[error(transparent)]
    ParseBool(#[from] std::str::ParseBoolError),

    /// The XML document was not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// The embedded binary database failed to deserialize.
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

/// Errors from the `build/filter` DSL parser used by build tooling to
/// select which metadata fields survive into a "lite"/"special" build.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum FilterError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("{0} cannot be restricted to a set of children")]
    NotAParent(String),

    #[error("{0} cannot appear as a child field")]
    NotAChild(String),

    #[error("{0} is specified more than once")]
    Duplicate(String),

    #[error("unbalanced parentheses in filter expression")]
    UnbalancedParens,

    #[error("empty group in filter expression")]
    EmptyGroup,

    #[error("empty token in filter expression")]
    EmptyToken,
}
