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

//! Combines resolution and trace generation into one operation.

use log::debug;

use crate::resolve::{self, Answer, ResolutionError};
use crate::rr::Qtype;
use crate::trace::{self, ResolutionStep};
use crate::zone::ZoneStore;

/// The outcome of a simulated resolution.
///
/// Exactly one of `record` and `error` is set. The `steps` are present
/// in either case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome<'a> {
    pub steps: Vec<ResolutionStep>,
    pub record: Option<Answer<'a>>,
    pub error: Option<ResolutionError>,
}

/// Simulates the resolution of `domain` for records of type `qtype`
/// against `store`.
pub fn simulate<'a>(store: &'a ZoneStore, domain: &str, qtype: &Qtype) -> Outcome<'a> {
    let result = resolve::resolve(store, domain, qtype);
    let steps = trace::generate(domain, qtype, result.as_ref());
    match result {
        Ok(found) => Outcome {
            steps,
            record: Some(found.answer),
            error: None,
        },
        Err(error) => {
            debug!("Resolution of {} ({}) failed: {}.", domain, qtype, error);
            Outcome {
                steps,
                record: None,
                error: Some(error),
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
