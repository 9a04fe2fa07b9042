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

//! The compiled-in data set of the simulated hierarchy.

use super::{Error, ZoneStore, ZoneStoreBuilder};
use crate::rr::{RecordType, ResourceRecord};

/// Delegations of top-level domains in the root zone:
/// `(tld, nameserver, ttl)`.
static ROOT_ZONE: &[(&str, &str, u32)] = &[
    ("com", "com-servers.net", 172800),
    ("org", "org-servers.net", 172800),
    ("net", "net-servers.net", 172800),
    ("io", "io-servers.net", 172800),
];

/// Delegations of base domains in the TLD zones:
/// `(domain, nameserver, ttl)`.
static TLD_ZONES: &[(&str, &str, u32)] = &[
    ("example.com", "ns1.example.com", 86400),
    ("google.com", "ns1.google.com", 86400),
    ("github.com", "ns1.github.com", 86400),
    ("microsoft.com", "ns1.microsoft.com", 86400),
    ("wikipedia.org", "ns1.wikipedia.org", 86400),
    ("mozilla.org", "ns1.mozilla.org", 86400),
];

/// Authoritative records: `(owner, type, MX priority, value, ttl)`.
#[rustfmt::skip]
static AUTHORITATIVE_ZONE: &[(&str, RecordType, u16, &str, u32)] = &[
    ("example.com", RecordType::A, 0, "93.184.216.34", 300),
    ("example.com", RecordType::AAAA, 0, "2606:2800:220:1:248:1893:25c8:1946", 300),
    ("example.com", RecordType::MX, 10, "mail.example.com", 3600),
    ("example.com", RecordType::MX, 20, "backup-mail.example.com", 3600),
    ("example.com", RecordType::TXT, 0, "v=spf1 include:_spf.example.com ~all", 3600),
    ("www.example.com", RecordType::CNAME, 0, "example.com", 3600),
    ("mail.example.com", RecordType::CNAME, 0, "mail-server.example.com", 3600),
    ("google.com", RecordType::A, 0, "172.217.14.206", 300),
    ("google.com", RecordType::AAAA, 0, "2607:f8b0:4004:814::200e", 300),
    ("google.com", RecordType::MX, 1, "aspmx.l.google.com", 3600),
    ("google.com", RecordType::MX, 5, "alt1.aspmx.l.google.com", 3600),
    ("google.com", RecordType::TXT, 0, "v=spf1 include:_spf.google.com ~all", 3600),
    ("github.com", RecordType::A, 0, "140.82.114.4", 300),
    ("github.com", RecordType::AAAA, 0, "2606:50c0:8000::154", 300),
    ("github.com", RecordType::MX, 1, "aspmx.l.github.com", 3600),
    ("github.com", RecordType::TXT, 0, "v=spf1 include:_spf.github.com ~all", 3600),
];

impl ZoneStore {
    /// Builds the store holding the compiled-in data set.
    ///
    /// The data set is fixed, and the tests check that it is accepted
    /// by the builder, so this does not fail in practice.
    pub fn seed() -> Self {
        match build_seed() {
            Ok(store) => store,
            Err(e) => panic!("the compiled-in zone data is invalid: {e}"),
        }
    }
}

fn build_seed() -> Result<ZoneStore, Error> {
    let mut builder = ZoneStoreBuilder::new();
    for &(tld, nameserver, ttl) in ROOT_ZONE {
        builder.delegate_tld(tld, nameserver, ttl)?;
    }
    for &(domain, nameserver, ttl) in TLD_ZONES {
        builder.delegate_domain(domain, nameserver, ttl)?;
    }
    for &(owner, rr_type, priority, value, ttl) in AUTHORITATIVE_ZONE {
        let record = if rr_type == RecordType::MX {
            ResourceRecord::mx(priority, value, ttl)
        } else {
            ResourceRecord::new(rr_type, value, ttl)
        };
        builder.add(owner, record)?;
    }
    Ok(builder.build())
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_data_is_accepted() {
        let store = build_seed().unwrap();
        assert_eq!(store.root_delegations().count(), ROOT_ZONE.len());
        assert_eq!(store.tld_delegations().count(), TLD_ZONES.len());
        let domains: Vec<_> = store.domains().map(|d| d.as_str()).collect();
        assert_eq!(domains, ["example.com", "github.com", "google.com"]);
    }

    #[test]
    fn seed_mx_records_are_ordered() {
        let store = ZoneStore::seed();
        let mx = store.lookup_authoritative("example.com").unwrap().mx();
        let priorities: Vec<_> = mx.iter().map(|r| r.priority().unwrap()).collect();
        assert_eq!(priorities, [10, 20]);
    }
}
