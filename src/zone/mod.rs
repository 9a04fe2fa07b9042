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

//! Implementation of the simulated zone hierarchy, kept in memory.

use std::collections::BTreeMap;

use crate::name::Name;
use crate::rr::{RecordType, ResourceRecord};

mod error;
mod lookup;
mod seed;
mod validation;
pub use error::Error;
pub use validation::ValidationIssue;

/// The simulated DNS database.
///
/// A `ZoneStore` models the three levels of the hierarchy that a
/// resolver walks:
///
/// * the *root zone*, which delegates each top-level domain to its
///   servers through an NS record;
/// * the *TLD zones*, which delegate each base domain (e.g.
///   `example.com`) to its authoritative servers; and
/// * the *authoritative zone*, which holds a [`RecordBundle`] for each
///   base domain.
///
/// A store is populated once, through a [`ZoneStoreBuilder`], and is
/// read-only afterwards: it has no mutation API. It can therefore be
/// shared by reference among any number of concurrent resolutions. The
/// lookups are in the `lookup` module, and semantic checks of a built
/// store in the `validation` module. [`ZoneStore::seed`] builds the
/// store with the compiled-in data set.
///
/// All maps are ordered, so that iteration (and anything derived from
/// it, such as validation reports) is deterministic.
#[derive(Debug, Default)]
pub struct ZoneStore {
    root: BTreeMap<Box<str>, ResourceRecord>,
    tlds: BTreeMap<Box<str>, BTreeMap<Name, ResourceRecord>>,
    authoritative: BTreeMap<Name, RecordBundle>,
}

/// The records that the authoritative zone holds for one base domain.
///
/// A bundle holds at most one A, one AAAA, and one TXT record for the
/// base domain itself, any number of MX records (kept in ascending
/// order of priority), and CNAME records for subdomains, keyed by the
/// label(s) that precede the base domain.
#[derive(Debug, Default)]
pub struct RecordBundle {
    a: Option<ResourceRecord>,
    aaaa: Option<ResourceRecord>,
    txt: Option<ResourceRecord>,
    mx: Vec<ResourceRecord>,
    cnames: BTreeMap<Box<str>, ResourceRecord>,
}

impl RecordBundle {
    pub fn a(&self) -> Option<&ResourceRecord> {
        self.a.as_ref()
    }

    pub fn aaaa(&self) -> Option<&ResourceRecord> {
        self.aaaa.as_ref()
    }

    pub fn txt(&self) -> Option<&ResourceRecord> {
        self.txt.as_ref()
    }

    /// Returns the MX records, in ascending order of priority.
    pub fn mx(&self) -> &[ResourceRecord] {
        &self.mx
    }

    /// Returns the CNAME record of the subdomain `label`, if any.
    pub fn cname(&self, label: &str) -> Option<&ResourceRecord> {
        self.cnames.get(label)
    }

    /// Iterates over the subdomain CNAME records, in order of label.
    pub fn cnames(&self) -> impl Iterator<Item = (&str, &ResourceRecord)> {
        self.cnames.iter().map(|(label, record)| (&**label, record))
    }
}

////////////////////////////////////////////////////////////////////////
// CONSTRUCTION                                                       //
////////////////////////////////////////////////////////////////////////

/// Populates a [`ZoneStore`].
///
/// Records are added in a flat manner, one by one, and the builder
/// files each one at the proper level of the hierarchy. Each method
/// fails if the record would break an invariant of the data model;
/// the builder is left unchanged in that case. Once everything has
/// been added, [`ZoneStoreBuilder::build`] yields the read-only store.
#[derive(Debug, Default)]
pub struct ZoneStoreBuilder {
    store: ZoneStore,
}

impl ZoneStoreBuilder {
    /// Creates a builder for an initially empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a delegation of the top-level domain `tld` to the root
    /// zone.
    pub fn delegate_tld(&mut self, tld: &str, nameserver: &str, ttl: u32) -> Result<(), Error> {
        if tld.len() < 2 || !tld.bytes().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidTld);
        }
        let tld = tld.to_ascii_lowercase().into_boxed_str();
        if self.store.root.contains_key(&tld) {
            return Err(Error::DuplicateDelegation);
        }
        self.store
            .root
            .insert(tld, ResourceRecord::new(RecordType::NS, nameserver, ttl));
        Ok(())
    }

    /// Adds a delegation of the base domain `domain` to the zone of its
    /// top-level domain.
    pub fn delegate_domain(
        &mut self,
        domain: &str,
        nameserver: &str,
        ttl: u32,
    ) -> Result<(), Error> {
        let domain: Name = domain.parse()?;
        if !domain.is_base_domain() {
            return Err(Error::NotABaseDomain);
        }
        let tld_zone = self.store.tlds.entry(domain.tld().into()).or_default();
        if tld_zone.contains_key(&domain) {
            return Err(Error::DuplicateDelegation);
        }
        tld_zone.insert(domain, ResourceRecord::new(RecordType::NS, nameserver, ttl));
        Ok(())
    }

    /// Adds a record owned by `owner` to the authoritative zone.
    ///
    /// A, AAAA, TXT, and MX records must be owned by a base domain;
    /// CNAME records must be owned by a subdomain of one. NS records
    /// belong to the delegation levels (see
    /// [`ZoneStoreBuilder::delegate_tld`] and
    /// [`ZoneStoreBuilder::delegate_domain`]) and are rejected here.
    pub fn add(&mut self, owner: &str, record: ResourceRecord) -> Result<(), Error> {
        let owner: Name = owner.parse()?;
        let rr_type = record.rr_type();
        let base: Name = owner.base_domain().parse()?;

        match (rr_type, owner.subdomain()) {
            (RecordType::NS, _) => Err(Error::UnsupportedType(rr_type)),
            (RecordType::CNAME, None) => Err(Error::CnameAtApex),
            (RecordType::CNAME, Some(label)) => {
                let bundle = self.store.authoritative.entry(base).or_default();
                if bundle.cnames.contains_key(label) {
                    Err(Error::DuplicateRecord(rr_type))
                } else {
                    bundle.cnames.insert(label.into(), record);
                    Ok(())
                }
            }
            (_, Some(_)) => Err(Error::ApexOnly(rr_type)),
            (RecordType::MX, None) => {
                let mx = &mut self.store.authoritative.entry(base).or_default().mx;
                let index = mx.partition_point(|r| r.priority() <= record.priority());
                mx.insert(index, record);
                Ok(())
            }
            (_, None) => {
                let bundle = self.store.authoritative.entry(base).or_default();
                let slot = match rr_type {
                    RecordType::A => &mut bundle.a,
                    RecordType::AAAA => &mut bundle.aaaa,
                    _ => &mut bundle.txt,
                };
                if slot.is_some() {
                    Err(Error::DuplicateRecord(rr_type))
                } else {
                    *slot = Some(record);
                    Ok(())
                }
            }
        }
    }

    /// Finishes construction, returning the read-only store.
    pub fn build(self) -> ZoneStore {
        self.store
    }
}

impl ZoneStore {
    /// Iterates over the base domains that have authoritative data, in
    /// order.
    pub fn domains(&self) -> impl Iterator<Item = &Name> {
        self.authoritative.keys()
    }

    /// Iterates over the root zone's delegations, in order of TLD.
    pub fn root_delegations(&self) -> impl Iterator<Item = (&str, &ResourceRecord)> {
        self.root.iter().map(|(tld, record)| (&**tld, record))
    }

    /// Iterates over the delegations of all TLD zones, in order.
    pub fn tld_delegations(&self) -> impl Iterator<Item = (&Name, &ResourceRecord)> {
        self.tlds.values().flat_map(|zone| zone.iter())
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
