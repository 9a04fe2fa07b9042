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

//! A simulator of the hierarchical DNS resolution process.
//!
//! Nothing here touches the network. A fixed, in-memory
//! [`ZoneStore`](zone::ZoneStore) models the three levels of the DNS
//! hierarchy (the root zone, top-level domain zones, and authoritative
//! zones). The [`resolve`](resolve::resolve) function walks that store
//! the way an authoritative lookup would, following CNAME chains, and
//! the [`trace`] module produces the sequence of query/response hops
//! that a real recursive resolver would make along the way. The
//! [`simulate`] function ties the two together into a single
//! [`Outcome`].
//!
//! ```
//! use dnssim::rr::Qtype;
//! use dnssim::zone::ZoneStore;
//!
//! let store = ZoneStore::seed();
//! let outcome = dnssim::simulate(&store, "www.example.com", &Qtype::from("A"));
//! assert_eq!(outcome.steps.len(), 8);
//! assert!(outcome.error.is_none());
//! ```

pub mod name;
pub mod request;
pub mod resolve;
pub mod rr;
mod simulator;
pub mod trace;
mod util;
pub mod zone;

pub use simulator::{simulate, Outcome};
