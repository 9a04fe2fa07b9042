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

//! Implementation of the resolution algorithm.
//!
//! [`resolve`] answers a query for a domain name and a type against a
//! [`ZoneStore`]. If the name is a subdomain that owns a CNAME record,
//! the query is re-run with the CNAME's target as the new name; this
//! takes precedence over any other lookup at the subdomain. Otherwise,
//! the query is answered from the authoritative data of the name's
//! base domain.
//!
//! Loops in a CNAME chain are detected, and at most [`MAX_CHAIN_LEN`]
//! links are followed. Resolution is a pure function of its input and
//! the store: nothing is cached, and the store is never modified.

use arrayvec::ArrayVec;
use log::debug;
use serde::Serialize;

use crate::name::Name;
use crate::rr::{Qtype, RecordType, ResourceRecord};
use crate::util::Caseless;
use crate::zone::ZoneStore;

mod error;
pub use error::ResolutionError;

/// The maximum number of links in a CNAME chain that will be followed.
/// For example, the following chain has two links:
///
/// ```text
/// a.quandary.test  CNAME  b.quandary.test
/// b.quandary.test  CNAME  quandary.test
/// quandary.test    A      192.0.2.1
/// ```
pub const MAX_CHAIN_LEN: usize = 16;

/// The names visited while following a CNAME chain, starting with the
/// name originally queried.
///
/// A chain of [`MAX_CHAIN_LEN`] links visits one more name than that,
/// so this is the capacity. Resolution fails with
/// [`ResolutionError::ChainTooLong`] when a name would not fit.
pub type Visited = ArrayVec<Name, { MAX_CHAIN_LEN + 1 }>;

/// The data that answers a query.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer<'a> {
    /// A single record (for A, AAAA, TXT, and CNAME queries).
    Record(&'a ResourceRecord),

    /// A sequence of records, in ascending order of priority (for MX
    /// queries).
    Records(&'a [ResourceRecord]),
}

/// A successful resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Found<'a> {
    pub answer: Answer<'a>,

    /// The name at which the answer was found. This differs from the
    /// name queried if a CNAME chain was followed.
    pub canonical: Name,
}

/// Resolves `domain` for records of type `qtype`.
pub fn resolve<'a>(
    store: &'a ZoneStore,
    domain: &str,
    qtype: &Qtype,
) -> Result<Found<'a>, ResolutionError> {
    resolve_from(store, domain, qtype, Visited::new())
}

/// Resolves `domain` for records of type `qtype`, given the names
/// already visited in the current CNAME chain.
///
/// The `visited` list is owned, and is threaded through each link of
/// the chain by value. [`resolve`] starts with an empty one.
pub fn resolve_from<'a>(
    store: &'a ZoneStore,
    domain: &str,
    qtype: &Qtype,
    mut visited: Visited,
) -> Result<Found<'a>, ResolutionError> {
    if visited
        .iter()
        .any(|seen| Caseless(seen.as_str()) == Caseless(domain))
    {
        debug!("CNAME loop detected at {}.", domain);
        return Err(ResolutionError::CnameLoop);
    }
    let name: Name = domain.parse().map_err(|_| ResolutionError::InvalidDomain)?;
    if visited.try_push(name.clone()).is_err() {
        debug!("CNAME chain too long at {}.", name);
        return Err(ResolutionError::ChainTooLong);
    }

    let base = name.base_domain();
    let sub = name.subdomain();
    if let Some(label) = sub {
        if let Some(cname) = store.lookup_cname(base, label) {
            debug!("Following CNAME from {} to {}.", name, cname.value());
            return resolve_from(store, cname.value(), qtype, visited);
        }
    }

    let bundle = store
        .lookup_authoritative(base)
        .ok_or(ResolutionError::DomainNotFound)?;
    let rr_type = match *qtype {
        Qtype::Known(rr_type) => rr_type,
        Qtype::Unknown(_) => return Err(ResolutionError::UnsupportedRecordType),
    };
    let answer = match rr_type {
        RecordType::A => bundle
            .a()
            .map(Answer::Record)
            .ok_or(ResolutionError::NoRecordOfType(rr_type))?,
        RecordType::AAAA => bundle
            .aaaa()
            .map(Answer::Record)
            .ok_or(ResolutionError::NoRecordOfType(rr_type))?,
        RecordType::MX => match bundle.mx() {
            [] => return Err(ResolutionError::NoMxRecords),
            records => Answer::Records(records),
        },
        RecordType::TXT => bundle
            .txt()
            .map(Answer::Record)
            .ok_or(ResolutionError::NoTxtRecord)?,
        RecordType::CNAME => sub
            .and_then(|label| bundle.cname(label))
            .map(Answer::Record)
            .ok_or(ResolutionError::NoCnameRecord)?,
        RecordType::NS => return Err(ResolutionError::UnsupportedRecordType),
    };
    Ok(Found {
        answer,
        canonical: name,
    })
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneStoreBuilder;

    fn seed() -> ZoneStore {
        ZoneStore::seed()
    }

    fn resolve_str<'a>(
        store: &'a ZoneStore,
        domain: &str,
        qtype: &str,
    ) -> Result<Found<'a>, ResolutionError> {
        resolve(store, domain, &Qtype::from(qtype))
    }

    fn record_of<'a>(found: Found<'a>) -> &'a ResourceRecord {
        match found.answer {
            Answer::Record(record) => record,
            Answer::Records(_) => panic!("expected a single record"),
        }
    }

    ////////////////////////////////////////////////////////////////////
    // DIRECT LOOKUP TESTS                                            //
    ////////////////////////////////////////////////////////////////////

    #[test]
    fn a_queries_return_the_stored_record() {
        let store = seed();
        for domain in store.domains() {
            let expected = store.lookup_authoritative(domain.as_str()).unwrap().a();
            let found = resolve_str(&store, domain.as_str(), "A").unwrap();
            assert_eq!(found.canonical, *domain);
            assert_eq!(Some(record_of(found)), expected);
        }
        let found = resolve_str(&store, "example.com", "A").unwrap();
        assert_eq!(record_of(found).value(), "93.184.216.34");
    }

    #[test]
    fn queries_are_case_insensitive() {
        let store = seed();
        assert_eq!(
            resolve_str(&store, "EXAMPLE.Com", "aaaa"),
            resolve_str(&store, "example.com", "AAAA"),
        );
    }

    #[test]
    fn mx_queries_return_records_in_priority_order() {
        let store = seed();
        let found = resolve_str(&store, "example.com", "MX").unwrap();
        match found.answer {
            Answer::Records(records) => {
                let exchanges: Vec<_> = records.iter().map(ResourceRecord::value).collect();
                assert_eq!(exchanges, ["mail.example.com", "backup-mail.example.com"]);
            }
            Answer::Record(_) => panic!("expected a sequence of records"),
        }
    }

    #[test]
    fn subdomains_without_cname_use_the_base_domain() {
        let store = seed();
        let found = resolve_str(&store, "ftp.example.com", "A").unwrap();
        assert_eq!(found.canonical.as_str(), "ftp.example.com");
        assert_eq!(record_of(found).value(), "93.184.216.34");
    }

    #[test]
    fn txt_and_cname_queries_work() {
        let store = seed();
        let found = resolve_str(&store, "google.com", "TXT").unwrap();
        assert_eq!(record_of(found).value(), "v=spf1 include:_spf.google.com ~all");

        // A CNAME query at a subdomain follows the chain first; the
        // target has no CNAME of its own.
        assert_eq!(
            resolve_str(&store, "www.example.com", "CNAME"),
            Err(ResolutionError::NoCnameRecord),
        );
        assert_eq!(
            resolve_str(&store, "example.com", "CNAME"),
            Err(ResolutionError::NoCnameRecord),
        );
    }

    ////////////////////////////////////////////////////////////////////
    // ERROR TESTS                                                    //
    ////////////////////////////////////////////////////////////////////

    #[test]
    fn invalid_domains_are_rejected() {
        let store = seed();
        for domain in ["", "example", "exa mple.com", "example.c", "-x.com", "a..com"] {
            assert_eq!(
                resolve_str(&store, domain, "A"),
                Err(ResolutionError::InvalidDomain),
                "{domain:?}",
            );
        }
    }

    #[test]
    fn long_labels_reach_the_store() {
        let store = seed();
        let domain = format!("{}.com", "a".repeat(64));
        assert_eq!(
            resolve_str(&store, &domain, "A"),
            Err(ResolutionError::DomainNotFound),
        );
    }

    #[test]
    fn missing_data_is_reported() {
        let store = seed();
        assert_eq!(
            resolve_str(&store, "nonexistent.com", "A"),
            Err(ResolutionError::DomainNotFound),
        );
        // Delegated from .com, but without authoritative data.
        assert_eq!(
            resolve_str(&store, "microsoft.com", "A"),
            Err(ResolutionError::DomainNotFound),
        );
        assert_eq!(
            resolve_str(&store, "example.com", "SRV"),
            Err(ResolutionError::UnsupportedRecordType),
        );
        assert_eq!(
            resolve_str(&store, "example.com", "NS"),
            Err(ResolutionError::UnsupportedRecordType),
        );
    }

    #[test]
    fn missing_types_are_reported() {
        let mut builder = ZoneStoreBuilder::new();
        builder
            .add(
                "www.quandary.test",
                ResourceRecord::new(RecordType::CNAME, "quandary.test", 300),
            )
            .unwrap();
        let store = builder.build();
        assert_eq!(
            resolve_str(&store, "quandary.test", "A"),
            Err(ResolutionError::NoRecordOfType(RecordType::A)),
        );
        assert_eq!(
            resolve_str(&store, "quandary.test", "AAAA"),
            Err(ResolutionError::NoRecordOfType(RecordType::AAAA)),
        );
        assert_eq!(
            resolve_str(&store, "quandary.test", "MX"),
            Err(ResolutionError::NoMxRecords),
        );
        assert_eq!(
            resolve_str(&store, "quandary.test", "TXT"),
            Err(ResolutionError::NoTxtRecord),
        );
        assert_eq!(
            resolve_str(&store, "quandary.test", "CNAME"),
            Err(ResolutionError::NoCnameRecord),
        );
    }

    ////////////////////////////////////////////////////////////////////
    // CNAME-FOLLOWING TESTS                                          //
    ////////////////////////////////////////////////////////////////////

    #[test]
    fn cname_chains_resolve_transitively() {
        let store = seed();
        for qtype in ["A", "AAAA", "MX", "TXT"] {
            let via_alias = resolve_str(&store, "www.example.com", qtype).unwrap();
            let direct = resolve_str(&store, "example.com", qtype).unwrap();
            assert_eq!(via_alias, direct);
            assert_eq!(via_alias.canonical.as_str(), "example.com");
        }
    }

    #[test]
    fn cname_targets_outside_the_store_are_not_found() {
        let store = seed();
        // mail-server.example.com has no CNAME of its own, so it is
        // answered from example.com's records.
        let found = resolve_str(&store, "mail.example.com", "A").unwrap();
        assert_eq!(found.canonical.as_str(), "mail-server.example.com");

        let mut builder = ZoneStoreBuilder::new();
        builder
            .add(
                "www.quandary.test",
                ResourceRecord::new(RecordType::CNAME, "elsewhere.test", 3600),
            )
            .unwrap();
        let store = builder.build();
        assert_eq!(
            resolve_str(&store, "www.quandary.test", "A"),
            Err(ResolutionError::DomainNotFound),
        );
    }

    #[test]
    fn cname_handling_rejects_loops() {
        let mut builder = ZoneStoreBuilder::new();
        add_cname(&mut builder, "a.quandary.test", "b.quandary.test");
        add_cname(&mut builder, "b.quandary.test", "A.Quandary.test");
        let store = builder.build();
        assert_eq!(
            resolve_str(&store, "a.quandary.test", "A"),
            Err(ResolutionError::CnameLoop),
        );
    }

    #[test]
    fn cname_handling_allows_almost_too_long_chains() {
        let store = make_chain(MAX_CHAIN_LEN);
        let found = resolve_str(&store, "a.quandary.test", "A").unwrap();
        assert_eq!(found.canonical.as_str(), "quandary.test");
    }

    #[test]
    fn cname_handling_rejects_long_chains() {
        let store = make_chain(MAX_CHAIN_LEN + 1);
        assert_eq!(
            resolve_str(&store, "a.quandary.test", "A"),
            Err(ResolutionError::ChainTooLong),
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let store = seed();
        for (domain, qtype) in [
            ("www.example.com", "A"),
            ("example.com", "MX"),
            ("nonexistent.com", "A"),
            ("bad", "TXT"),
        ] {
            assert_eq!(
                resolve_str(&store, domain, qtype),
                resolve_str(&store, domain, qtype),
            );
        }
    }

    fn add_cname(builder: &mut ZoneStoreBuilder, owner: &str, target: &str) {
        builder
            .add(owner, ResourceRecord::new(RecordType::CNAME, target, 3600))
            .unwrap();
    }

    /// Builds a store with a CNAME chain of `len` links, starting at
    /// `a.quandary.test` and ending at `quandary.test`.
    fn make_chain(len: usize) -> ZoneStore {
        let owners = ('a'..='z').collect::<Vec<char>>();
        let mut builder = ZoneStoreBuilder::new();
        builder
            .add(
                "quandary.test",
                ResourceRecord::new(RecordType::A, "192.0.2.1", 300),
            )
            .unwrap();
        for i in 0..len {
            let owner = format!("{}.quandary.test", owners[i]);
            let target = if i + 1 == len {
                "quandary.test".to_owned()
            } else {
                format!("{}.quandary.test", owners[i + 1])
            };
            add_cname(&mut builder, &owner, &target);
        }
        builder.build()
    }
}
