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

//! Provides the [`Ttl`] structure for record TTLs.

use std::fmt;

use serde::{Serialize, Serializer};

/// The time to live (TTL) of a simulated record, in seconds.
///
/// TTLs are stored but never enforced: nothing in the simulator
/// expires. Following [RFC 2181 § 8], values are limited to the range
/// 0 to 2³¹ - 1; `Ttl::from(u32)` maps anything larger to zero, as a
/// resolver would for a TTL with the most significant bit set.
///
/// [RFC 2181 § 8]: https://datatracker.ietf.org/doc/html/rfc2181#section-8
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Ttl(u32);

impl Ttl {
    /// Returns the TTL in seconds.
    pub fn secs(self) -> u32 {
        self.0
    }
}

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        if secs > i32::MAX as u32 {
            Self(0)
        } else {
            Self(secs)
        }
    }
}

impl fmt::Debug for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}
