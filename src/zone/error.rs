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

//! Implementation of the [`Error`] type for zone-store construction.

use std::fmt;

use crate::name;
use crate::rr::RecordType;

/// Errors that arise while populating a
/// [`ZoneStore`](super::ZoneStore) through a
/// [`ZoneStoreBuilder`](super::ZoneStoreBuilder).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// An owner or delegated name was not a valid domain name.
    InvalidName(name::Error),

    /// A top-level domain was not made of at least two letters.
    InvalidTld,

    /// A delegation from a TLD zone was for a name that is not a base
    /// domain.
    NotABaseDomain,

    /// A record of this type may only be owned by a base domain.
    ApexOnly(RecordType),

    /// A CNAME record was owned by a base domain.
    CnameAtApex,

    /// The owner already has a record of this type, and may only have
    /// one.
    DuplicateRecord(RecordType),

    /// The name was already delegated.
    DuplicateDelegation,

    /// Records of this type cannot be added to the authoritative zone.
    UnsupportedType(RecordType),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::InvalidName(e) => write!(f, "invalid domain name: {e}"),
            Self::InvalidTld => f.write_str("top-level domain is not at least two letters"),
            Self::NotABaseDomain => f.write_str("the delegated name is not a base domain"),
            Self::ApexOnly(rr_type) => write!(f, "{rr_type} records may only be owned by a base domain"),
            Self::CnameAtApex => f.write_str("a base domain cannot own a CNAME record"),
            Self::DuplicateRecord(rr_type) => {
                write!(f, "the owner already has a {rr_type} record")
            }
            Self::DuplicateDelegation => f.write_str("the name is already delegated"),
            Self::UnsupportedType(rr_type) => {
                write!(f, "{rr_type} records cannot be added to the authoritative zone")
            }
        }
    }
}

impl From<name::Error> for Error {
    fn from(error: name::Error) -> Self {
        Self::InvalidName(error)
    }
}

impl std::error::Error for Error {}
