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

//! Parsing, validating, formatting and geocoding phone numbers for every
//! country and non-geographical calling-code entity in the world.

#[macro_use]
extern crate lazy_static;

extern crate fnv;
extern crate quick_xml as xml;
extern crate regex;

mod consts;

pub mod error;
pub use error::ParseError;

pub mod normalize;

pub mod metadata;
pub use metadata::Metadata;

mod national_number;
pub use national_number::NationalNumber;

pub mod country;

mod extension;
pub use extension::Extension;

mod carrier;
pub use carrier::Carrier;

mod phone_number;
pub use phone_number::{Country, PhoneNumber, Type};

#[macro_use]
pub mod parser;
pub use parser::{parse, parse_and_keep_raw_input};

pub mod validator;
pub use validator::{
    is_possible_number, is_possible_number_with_reason, is_valid_number,
    is_valid_number_for_region, number_type, region_for_number, PossibleLengthReason, Validation,
};

pub mod formatter;
pub use formatter::{format, Mode};

pub mod as_you_type;
pub use as_you_type::AsYouType;

pub mod matcher;
pub use matcher::{matches, Level as MatchLevel};

pub mod scanner;
pub use scanner::find_numbers;

pub mod geocoder;
pub use geocoder::describe;
