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

//! The JSON request/response contract of the simulator.
//!
//! A request is a JSON object with a `domain` and an optional `type`:
//!
//! ```json
//! {"domain": "www.example.com", "type": "MX"}
//! ```
//!
//! Problems with the request itself (malformed JSON, a missing domain)
//! are [`RequestError`]s, which are distinct from the resolution errors
//! reported inside a [`Response`]. A response always carries the trace
//! and exactly one of `record` and `error`; the other is `null`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolve::Answer;
use crate::rr::{Qtype, RecordType};
use crate::simulator::{simulate, Outcome};
use crate::trace::ResolutionStep;
use crate::zone::ZoneStore;

////////////////////////////////////////////////////////////////////////
// REQUESTS                                                           //
////////////////////////////////////////////////////////////////////////

/// A request to simulate a resolution.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Request {
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub rr_type: Option<String>,
}

impl Request {
    /// Parses a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self, RequestError> {
        serde_json::from_str(text).map_err(|e| RequestError::Malformed(e.to_string()))
    }
}

/// Errors in a request, as opposed to errors in the resolution that it
/// asks for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestError {
    /// The request has no domain, or an empty one.
    DomainRequired,

    /// The request is not a valid JSON request object.
    Malformed(String),
}

impl RequestError {
    /// Serializes the error as a JSON object with an `error` field.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Body {
            error: String,
        }
        serde_json::to_string(&Body {
            error: self.to_string(),
        })
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::DomainRequired => f.write_str("Domain is required"),
            Self::Malformed(ref details) => write!(f, "Malformed request: {details}"),
        }
    }
}

impl std::error::Error for RequestError {}

/// Handles `request` against `store`. If the request has no type,
/// `default_type` is used.
pub fn handle<'a>(
    store: &'a ZoneStore,
    request: &Request,
    default_type: RecordType,
) -> Result<Outcome<'a>, RequestError> {
    let domain = match request.domain.as_deref() {
        Some(domain) if !domain.is_empty() => domain,
        _ => return Err(RequestError::DomainRequired),
    };
    let qtype = match request.rr_type.as_deref() {
        Some(text) => Qtype::from(text),
        None => Qtype::Known(default_type),
    };
    Ok(simulate(store, domain, &qtype))
}

////////////////////////////////////////////////////////////////////////
// RESPONSES                                                          //
////////////////////////////////////////////////////////////////////////

/// The serialized form of an [`Outcome`].
///
/// `error` is the human-readable message of the resolution error, and
/// `error_kind` its machine-readable code. Absent fields are serialized
/// as `null`, never omitted.
#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub steps: Vec<ResolutionStep>,
    pub record: Option<Answer<'a>>,
    pub error: Option<String>,
    pub error_kind: Option<&'static str>,
}

impl Response<'_> {
    /// Returns whether the response carries a record.
    pub fn is_success(&self) -> bool {
        self.record.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<'a> From<Outcome<'a>> for Response<'a> {
    fn from(outcome: Outcome<'a>) -> Self {
        Self {
            steps: outcome.steps,
            record: outcome.record,
            error: outcome.error.map(|e| e.to_string()),
            error_kind: outcome.error.map(|e| e.kind()),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
