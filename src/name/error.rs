// Copyright 2021 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implementation of the [`Error`] type for name-related errors.

use std::fmt;

/// An error type used to report why a string is not a valid domain
/// name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// A label was empty (e.g. two consecutive dots, or a leading or
    /// trailing dot).
    EmptyLabel,

    /// A label began or ended with a hyphen.
    HyphenAtLabelEdge,

    /// A label contained a character other than an ASCII letter, an
    /// ASCII digit, or a hyphen.
    InvalidCharacter,

    /// The final label was not made of at least two ASCII letters.
    InvalidTld,

    /// The name consisted of a single label, with no top-level domain.
    SingleLabel,

    /// The string was empty.
    StrEmpty,

    /// The string was not strictly ASCII.
    StrNotAscii,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::EmptyLabel => f.write_str("empty label"),
            Self::HyphenAtLabelEdge => f.write_str("label begins or ends with a hyphen"),
            Self::InvalidCharacter => f.write_str("label contains an invalid character"),
            Self::InvalidTld => f.write_str("top-level domain is not at least two letters"),
            Self::SingleLabel => f.write_str("name has no top-level domain"),
            Self::StrEmpty => f.write_str("string was empty"),
            Self::StrNotAscii => f.write_str("string was not ASCII"),
        }
    }
}

impl std::error::Error for Error {}
