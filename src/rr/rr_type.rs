// Copyright 2022 Matthew Ingwersen.
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

//! Provides the [`RecordType`] and [`Qtype`] types.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::util::Caseless;

////////////////////////////////////////////////////////////////////////
// RR TYPES                                                           //
////////////////////////////////////////////////////////////////////////

/// The RR types that the simulated zones can hold.
///
/// [`FromStr`] is ASCII-case-insensitive, and [`Display`](fmt::Display)
/// produces the conventional upper-case mnemonic.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum RecordType {
    A,
    AAAA,
    MX,
    TXT,
    CNAME,
    NS,
}

impl RecordType {
    /// Every supported type, in declaration order.
    pub const ALL: [Self; 6] = [Self::A, Self::AAAA, Self::MX, Self::TXT, Self::CNAME, Self::NS];

    /// Returns the mnemonic of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::CNAME => "CNAME",
            Self::NS => "NS",
        }
    }
}

impl FromStr for RecordType {
    type Err = &'static str;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|rr_type| Caseless(rr_type.as_str()) == Caseless(text))
            .ok_or("unknown type")
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////
// QTYPES                                                             //
////////////////////////////////////////////////////////////////////////

/// The type requested by a query.
///
/// Requests carry their type as free text. Text naming a known
/// [`RecordType`] becomes [`Qtype::Known`]; anything else is kept
/// verbatim as [`Qtype::Unknown`], so that the resolver can still
/// report it as unsupported at the proper point of the lookup.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Qtype {
    Known(RecordType),
    Unknown(Box<str>),
}

impl From<RecordType> for Qtype {
    fn from(rr_type: RecordType) -> Self {
        Self::Known(rr_type)
    }
}

impl From<&str> for Qtype {
    fn from(text: &str) -> Self {
        match text.parse() {
            Ok(rr_type) => Self::Known(rr_type),
            Err(_) => Self::Unknown(text.into()),
        }
    }
}

impl fmt::Display for Qtype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Known(rr_type) => f.write_str(rr_type.as_str()),
            Self::Unknown(ref text) => f.write_str(text),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
