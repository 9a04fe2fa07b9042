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

//! Implementation of zone-store validation, to detect inconsistencies
//! between the levels of the simulated hierarchy.
//!
//! The builder already refuses data that the store cannot represent
//! (see [`ZoneStoreBuilder`](super::ZoneStoreBuilder)). What it cannot
//! check, since records arrive one at a time and in any order, is that
//! the levels agree with each other. [`ZoneStore::validate`] performs
//! these checks on a built store:
//!
//! 1. Every TLD zone must be delegated from the root zone (error).
//! 2. Every base domain with authoritative data must be delegated from
//!    its TLD zone (error).
//! 3. Every TLD delegated from the root zone should have a TLD zone
//!    (warning).
//! 4. Every base domain delegated from a TLD zone should have
//!    authoritative data; otherwise, the delegation is lame (warning).
//! 5. The target of every CNAME record should be a valid name whose
//!    base domain has authoritative data (warning). Resolving through
//!    such a record yields an error, which is legitimate data for the
//!    simulation, but usually not what the author intended.

use std::fmt;

use crate::name::Name;

use super::ZoneStore;

////////////////////////////////////////////////////////////////////////
// VALIDATION ISSUES                                                  //
////////////////////////////////////////////////////////////////////////

/// Indicates an error or warning found in a built [`ZoneStore`].
#[derive(Debug, Eq, PartialEq)]
pub enum ValidationIssue<'a> {
    UndelegatedTld(&'a str),
    UndelegatedDomain(&'a Name),
    EmptyTld(&'a str),
    LameDelegation(&'a Name),
    DanglingCname {
        label: &'a str,
        base: &'a Name,
        target: &'a str,
    },
}

impl ValidationIssue<'_> {
    /// Returns whether the `ValidationIssue` represents an error.
    /// Otherwise, it is a warning.
    pub fn is_error(&self) -> bool {
        matches!(*self, Self::UndelegatedTld(_) | Self::UndelegatedDomain(_))
    }
}

impl fmt::Display for ValidationIssue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::UndelegatedTld(tld) => {
                write!(f, "the .{tld} zone is not delegated from the root zone")
            }
            Self::UndelegatedDomain(domain) => write!(
                f,
                "{domain} has authoritative data but is not delegated from the .{} zone",
                domain.tld(),
            ),
            Self::EmptyTld(tld) => {
                write!(f, "the root zone delegates .{tld}, but there is no .{tld} zone")
            }
            Self::LameDelegation(domain) => write!(
                f,
                "the .{} zone delegates {domain}, but it has no authoritative data",
                domain.tld(),
            ),
            Self::DanglingCname {
                label,
                base,
                target,
            } => write!(
                f,
                "the CNAME record of {label}.{base} points to {target}, which has no authoritative data",
            ),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// VALIDATION LOGIC                                                   //
////////////////////////////////////////////////////////////////////////

impl ZoneStore {
    /// Checks the store for inconsistencies between its levels. The
    /// checks are listed in the documentation for the `validation`
    /// module. Issues are reported in a deterministic order.
    pub fn validate(&self) -> Vec<ValidationIssue<'_>> {
        let mut issues = Vec::new();

        // Checks 1 and 3.
        for tld in self.tlds.keys() {
            if !self.root.contains_key(tld) {
                issues.push(ValidationIssue::UndelegatedTld(tld));
            }
        }
        for tld in self.root.keys() {
            if !self.tlds.contains_key(tld) {
                issues.push(ValidationIssue::EmptyTld(tld));
            }
        }

        // Checks 2 and 4.
        for domain in self.authoritative.keys() {
            if self.lookup_tld(domain.as_str()).is_none() {
                issues.push(ValidationIssue::UndelegatedDomain(domain));
            }
        }
        for (domain, _) in self.tld_delegations() {
            if !self.authoritative.contains_key(domain) {
                issues.push(ValidationIssue::LameDelegation(domain));
            }
        }

        // Check 5.
        for (base, bundle) in &self.authoritative {
            for (label, cname) in bundle.cnames() {
                let target = cname.value();
                let resolvable = target
                    .parse::<Name>()
                    .map(|name| self.authoritative.contains_key(name.base_domain()))
                    .unwrap_or(false);
                if !resolvable {
                    issues.push(ValidationIssue::DanglingCname {
                        label,
                        base,
                        target,
                    });
                }
            }
        }

        issues
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::super::ZoneStoreBuilder;
    use super::*;
    use crate::rr::{RecordType, ResourceRecord};

    #[test]
    fn seed_store_has_no_errors() {
        let store = ZoneStore::seed();
        let issues = store.validate();
        assert!(issues.iter().all(|issue| !issue.is_error()), "{issues:?}");
        assert!(store
            .root_delegations()
            .all(|(tld, _)| crate::name::is_valid(&format!("x.{tld}"))));
    }

    #[test]
    fn seed_store_warnings_are_expected() {
        let store = ZoneStore::seed();
        let warnings: Vec<String> = store.validate().iter().map(|i| i.to_string()).collect();
        assert!(warnings.contains(&"the root zone delegates .io, but there is no .io zone".into()));
        assert!(warnings.contains(
            &"the .org zone delegates wikipedia.org, but it has no authoritative data".into()
        ));
    }

    #[test]
    fn validate_reports_each_check() {
        let mut builder = ZoneStoreBuilder::new();
        builder.delegate_tld("empty", "empty-servers.net", 172800).unwrap();
        builder
            .delegate_domain("lame.test", "ns1.lame.test", 86400)
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
                ResourceRecord::new(RecordType::CNAME, "nowhere.test", 3600),
            )
            .unwrap();
        let store = builder.build();
        let issues = store.validate();

        let quandary_test: Name = "quandary.test".parse().unwrap();
        let lame_test: Name = "lame.test".parse().unwrap();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::UndelegatedTld("test"),
                ValidationIssue::EmptyTld("empty"),
                ValidationIssue::UndelegatedDomain(&quandary_test),
                ValidationIssue::LameDelegation(&lame_test),
                ValidationIssue::DanglingCname {
                    label: "www",
                    base: &quandary_test,
                    target: "nowhere.test",
                },
            ],
        );
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }
}
