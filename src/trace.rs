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

//! Generation of the hop-by-hop trace of a simulated resolution.
//!
//! A recursive resolver answering a cold query walks the hierarchy:
//! it asks a root server for the servers of the top-level domain, asks
//! those for the domain's authoritative servers, and finally asks the
//! authoritative servers for the records. [`generate`] describes these
//! hops as a sequence of [`ResolutionStep`]s.
//!
//! The trace always has the same shape: one step for each [`Stage`],
//! in the order of [`Stage::ALL`]. The outcome of the resolution only
//! changes the descriptions of the last two steps. CNAME indirections
//! within the authoritative data are not expanded into extra hops.

use std::fmt;

use serde::Serialize;

use crate::name;
use crate::resolve::{Found, ResolutionError};
use crate::rr::Qtype;
use crate::util::Caseless;

/// The hops of a simulated resolution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    ClientToResolver,
    ResolverToRoot,
    RootToResolver,
    ResolverToTld,
    TldToResolver,
    ResolverToAuth,
    AuthToResolver,
    ResolverToClient,
}

impl Stage {
    /// Every stage, in the order in which the hops happen.
    pub const ALL: [Self; 8] = [
        Self::ClientToResolver,
        Self::ResolverToRoot,
        Self::RootToResolver,
        Self::ResolverToTld,
        Self::TldToResolver,
        Self::ResolverToAuth,
        Self::AuthToResolver,
        Self::ResolverToClient,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClientToResolver => "client-to-resolver",
            Self::ResolverToRoot => "resolver-to-root",
            Self::RootToResolver => "root-to-resolver",
            Self::ResolverToTld => "resolver-to-tld",
            Self::TldToResolver => "tld-to-resolver",
            Self::ResolverToAuth => "resolver-to-auth",
            Self::AuthToResolver => "auth-to-resolver",
            Self::ResolverToClient => "resolver-to-client",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hop of a simulated resolution.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolutionStep {
    pub stage: Stage,
    pub description: String,
}

/// Generates the trace of a resolution of `domain` for records of type
/// `qtype`, given its `result`.
///
/// The descriptions use `domain` as given by the caller, even if it is
/// not a valid name.
pub fn generate(
    domain: &str,
    qtype: &Qtype,
    result: Result<&Found, &ResolutionError>,
) -> Vec<ResolutionStep> {
    let tld = name::tld(domain);
    Stage::ALL
        .iter()
        .map(|&stage| {
            let description = match stage {
                Stage::ClientToResolver => format!("Query for {domain} ({qtype} record)"),
                Stage::ResolverToRoot => format!("Querying root servers for .{tld} servers"),
                Stage::RootToResolver => format!("Received .{tld} server information"),
                Stage::ResolverToTld => {
                    format!("Querying .{tld} servers for {domain} nameservers")
                }
                Stage::TldToResolver => {
                    format!("Received authoritative nameservers for {domain}")
                }
                Stage::ResolverToAuth => {
                    format!("Querying authoritative servers for {domain} {qtype} record")
                }
                Stage::AuthToResolver => match result {
                    Ok(found) if Caseless(found.canonical.as_str()) != Caseless(domain) => {
                        format!(
                            "Received {qtype} record for {domain} via CNAME {}",
                            found.canonical,
                        )
                    }
                    Ok(_) => format!("Received {qtype} record for {domain}"),
                    Err(error) => format!("Error: {error}"),
                },
                Stage::ResolverToClient => match result {
                    Ok(_) => format!("Returning {qtype} record to client"),
                    Err(error) => format!("Returning error to client: {error}"),
                },
            };
            ResolutionStep { stage, description }
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;

    use super::*;
    use crate::resolve::resolve;
    use crate::zone::ZoneStore;

    lazy_static! {
        static ref STORE: ZoneStore = ZoneStore::seed();
    }

    fn trace_of(domain: &str, qtype: &str) -> Vec<ResolutionStep> {
        let qtype = Qtype::from(qtype);
        let result = resolve(&STORE, domain, &qtype);
        generate(domain, &qtype, result.as_ref())
    }

    fn stages(steps: &[ResolutionStep]) -> Vec<Stage> {
        steps.iter().map(|step| step.stage).collect()
    }

    #[test]
    fn trace_has_fixed_shape() {
        for (domain, qtype) in [
            ("example.com", "A"),
            ("www.example.com", "MX"),
            ("nonexistent.com", "A"),
            ("not a domain", "A"),
            ("example.com", "SRV"),
        ] {
            let steps = trace_of(domain, qtype);
            assert_eq!(stages(&steps), Stage::ALL);
        }
    }

    #[test]
    fn success_descriptions_work() {
        let steps = trace_of("google.com", "AAAA");
        let descriptions: Vec<_> = steps.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            [
                "Query for google.com (AAAA record)",
                "Querying root servers for .com servers",
                "Received .com server information",
                "Querying .com servers for google.com nameservers",
                "Received authoritative nameservers for google.com",
                "Querying authoritative servers for google.com AAAA record",
                "Received AAAA record for google.com",
                "Returning AAAA record to client",
            ],
        );
    }

    #[test]
    fn cname_indirection_is_described() {
        let steps = trace_of("www.example.com", "A");
        assert_eq!(
            steps[6].description,
            "Received A record for www.example.com via CNAME example.com",
        );
        let steps = trace_of("Example.COM", "A");
        assert_eq!(steps[6].description, "Received A record for Example.COM");
    }

    #[test]
    fn failure_descriptions_work() {
        let steps = trace_of("nonexistent.com", "A");
        assert_eq!(steps[6].description, "Error: Domain not found");
        assert_eq!(
            steps[7].description,
            "Returning error to client: Domain not found",
        );
        let steps = trace_of("example.org", "TXT");
        assert_eq!(steps[1].description, "Querying root servers for .org servers");
    }

    #[test]
    fn stages_serialize_in_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Stage::ResolverToTld).unwrap(),
            "\"resolver-to-tld\"",
        );
        for stage in Stage::ALL {
            assert_eq!(
                serde_json::to_string(&stage).unwrap(),
                format!("\"{stage}\""),
            );
        }
    }
}
