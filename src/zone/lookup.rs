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

//! Read-only lookups into a [`ZoneStore`].
//!
//! Each level of the simulated hierarchy has its own lookup:
//! [`ZoneStore::lookup_root`] finds the delegation of a top-level
//! domain, [`ZoneStore::lookup_tld`] finds the delegation of a base
//! domain within its TLD zone, and [`ZoneStore::lookup_authoritative`]
//! and [`ZoneStore::lookup_cname`] search the authoritative data.
//!
//! Keys are expected in lower case, as produced by
//! [`Name`](crate::name::Name). A miss at any level is reported as
//! `None`.

use log::trace;

use super::{RecordBundle, ZoneStore};
use crate::name;
use crate::rr::ResourceRecord;

impl ZoneStore {
    /// Looks up the root zone's NS record for the top-level domain
    /// `tld`.
    pub fn lookup_root(&self, tld: &str) -> Option<&ResourceRecord> {
        let found = self.root.get(tld);
        trace!("Root lookup for .{}: {}.", tld, hit_or_miss(found.is_some()));
        found
    }

    /// Looks up the NS record for the base domain `domain` in the zone
    /// of its top-level domain.
    pub fn lookup_tld(&self, domain: &str) -> Option<&ResourceRecord> {
        let found = self
            .tlds
            .get(name::tld(domain))
            .and_then(|zone| zone.get(domain));
        trace!("TLD lookup for {}: {}.", domain, hit_or_miss(found.is_some()));
        found
    }

    /// Looks up the authoritative records of the base domain `base`.
    pub fn lookup_authoritative(&self, base: &str) -> Option<&RecordBundle> {
        let found = self.authoritative.get(base);
        trace!(
            "Authoritative lookup for {}: {}.",
            base,
            hit_or_miss(found.is_some()),
        );
        found
    }

    /// Looks up the CNAME record of the subdomain `label` of the base
    /// domain `base`.
    pub fn lookup_cname(&self, base: &str, label: &str) -> Option<&ResourceRecord> {
        let found = self
            .authoritative
            .get(base)
            .and_then(|bundle| bundle.cname(label));
        trace!(
            "CNAME lookup for {}.{}: {}.",
            label,
            base,
            hit_or_miss(found.is_some()),
        );
        found
    }
}

fn hit_or_miss(hit: bool) -> &'static str {
    if hit {
        "found"
    } else {
        "not found"
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::super::ZoneStoreBuilder;
    use crate::rr::{RecordType, ResourceRecord};

    fn new_store() -> super::ZoneStore {
        let mut builder = ZoneStoreBuilder::new();
        builder.delegate_tld("test", "test-servers.net", 172800).unwrap();
        builder
            .delegate_domain("quandary.test", "ns1.quandary.test", 86400)
            .unwrap();
        builder
            .add(
                "quandary.test",
                ResourceRecord::new(RecordType::A, "192.0.2.1", 300),
            )
            .unwrap();
        builder
            .add(
                "www.quandary.test",
                ResourceRecord::new(RecordType::CNAME, "quandary.test", 3600),
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn delegation_lookups_work() {
        let store = new_store();
        assert_eq!(store.lookup_root("test").unwrap().value(), "test-servers.net");
        assert!(store.lookup_root("com").is_none());
        assert_eq!(
            store.lookup_tld("quandary.test").unwrap().value(),
            "ns1.quandary.test",
        );
        assert!(store.lookup_tld("other.test").is_none());
        assert!(store.lookup_tld("quandary.com").is_none());
    }

    #[test]
    fn authoritative_lookups_work() {
        let store = new_store();
        assert!(store.lookup_authoritative("quandary.test").is_some());
        assert!(store.lookup_authoritative("other.test").is_none());
        assert_eq!(
            store.lookup_cname("quandary.test", "www").unwrap().rr_type(),
            RecordType::CNAME,
        );
        assert!(store.lookup_cname("quandary.test", "mail").is_none());
        assert!(store.lookup_cname("other.test", "www").is_none());
    }
}
