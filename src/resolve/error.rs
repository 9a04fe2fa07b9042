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

//! Implementation of the [`ResolutionError`] type.

use std::fmt;

use crate::rr::RecordType;

/// The ways in which a resolution can fail.
///
/// These are not failures of the program: each is a legitimate outcome
/// of the simulation, reported to the caller as data alongside the
/// trace. [`ResolutionError::kind`] gives the stable machine-readable
/// code of the error, and the [`Display`](fmt::Display) implementation
/// the message shown to users.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResolutionError {
    InvalidDomain,
    CnameLoop,
    ChainTooLong,
    DomainNotFound,

    /// The base domain has no record of this type (A or AAAA).
    NoRecordOfType(RecordType),

    NoMxRecords,
    NoTxtRecord,
    NoCnameRecord,
    UnsupportedRecordType,
}

impl ResolutionError {
    /// Returns the machine-readable code of the error.
    pub fn kind(&self) -> &'static str {
        match *self {
            Self::InvalidDomain => "INVALID_DOMAIN",
            Self::CnameLoop => "CNAME_LOOP",
            Self::ChainTooLong => "CHAIN_TOO_LONG",
            Self::DomainNotFound => "DOMAIN_NOT_FOUND",
            Self::NoRecordOfType(_) => "NO_RECORD_OF_TYPE",
            Self::NoMxRecords => "NO_MX_RECORDS",
            Self::NoTxtRecord => "NO_TXT_RECORD",
            Self::NoCnameRecord => "NO_CNAME_RECORD",
            Self::UnsupportedRecordType => "UNSUPPORTED_RECORD_TYPE",
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::InvalidDomain => f.write_str("Invalid domain format"),
            Self::CnameLoop => f.write_str("CNAME loop detected"),
            Self::ChainTooLong => f.write_str("CNAME chain too long"),
            Self::DomainNotFound => f.write_str("Domain not found"),
            Self::NoRecordOfType(rr_type) => write!(f, "No {rr_type} record found"),
            Self::NoMxRecords => f.write_str("No MX records found"),
            Self::NoTxtRecord => f.write_str("No TXT record found"),
            Self::NoCnameRecord => f.write_str("No CNAME record found"),
            Self::UnsupportedRecordType => f.write_str("Unsupported record type"),
        }
    }
}

impl std::error::Error for ResolutionError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
