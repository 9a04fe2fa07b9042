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

//! Implements loading, validation, and listing of the zone store.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{anyhow, Result};
use log::{debug, error, log, Level};

use dnssim::zone::{ValidationIssue, ZoneStore};

/// Loads the compiled-in zone store and validates it.
pub fn load() -> Result<ZoneStore> {
    let store = ZoneStore::seed();
    debug!(
        "Loaded {} TLD delegations and {} authoritative domains.",
        store.root_delegations().count(),
        store.domains().count(),
    );
    validate(&store)?;
    Ok(store)
}

/// Validates the store. Fails if there are errors (but not if there
/// are only warnings).
///
/// The compiled-in data deliberately includes delegations with nothing
/// behind them, so warnings only appear at the info level; the `zones`
/// command lists them regardless. Errors are logged as errors.
fn validate(store: &ZoneStore) -> Result<()> {
    let issues = store.validate();
    match summarize_issues(&issues) {
        Some((Level::Error, message)) => {
            error!("{}", message);
            Err(anyhow!("zone validation failed (see above)"))
        }
        Some((level, message)) => {
            log!(level, "{}", message);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Produces the log message for the validation `issues`, along with the
/// level to log it at, or `None` if there are no issues.
fn summarize_issues(issues: &[ValidationIssue]) -> Option<(Level, String)> {
    if issues.is_empty() {
        return None;
    }

    let have_errors = issues.iter().any(ValidationIssue::is_error);
    let have_warnings = !issues.iter().all(ValidationIssue::is_error);
    let mut message = if have_errors {
        String::from("Validation of the zone store failed for the following reasons:")
    } else {
        String::from("Validation of the zone store produced the following warnings:")
    };
    for (i, issue) in issues.iter().enumerate() {
        let marker = match (have_errors && have_warnings, issue.is_error()) {
            (false, _) => "",
            (true, true) => "(error) ",
            (true, false) => "(warning) ",
        };
        let _ = write!(message, "\n[{}] {}{}", i + 1, marker, issue);
    }

    if have_errors {
        Some((Level::Error, message))
    } else {
        message.push_str("\nDespite these warnings, the zone store will still be used.");
        Some((Level::Info, message))
    }
}

/// Writes a listing of the store and its validation issues to `out`.
pub fn list(store: &ZoneStore, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Root zone:")?;
    for (tld, record) in store.root_delegations() {
        writeln!(out, "  {:<16} {}", tld, record)?;
    }
    writeln!(out, "TLD zones:")?;
    for (domain, record) in store.tld_delegations() {
        writeln!(out, "  {:<16} {}", domain, record)?;
    }
    writeln!(out, "Authoritative zone:")?;
    for domain in store.domains() {
        writeln!(out, "  {}", domain)?;
        if let Some(bundle) = store.lookup_authoritative(domain.as_str()) {
            let singles = [bundle.a(), bundle.aaaa(), bundle.txt()];
            for record in singles.into_iter().flatten().chain(bundle.mx()) {
                writeln!(out, "    {}", record)?;
            }
            for (label, record) in bundle.cnames() {
                writeln!(out, "    {:<12} {}", label, record)?;
            }
        }
    }

    let issues = store.validate();
    if !issues.is_empty() {
        writeln!(out, "Issues:")?;
        for issue in issues {
            let kind = if issue.is_error() { "error" } else { "warning" };
            writeln!(out, "  ({}) {}", kind, issue)?;
        }
    }
    Ok(())
}
