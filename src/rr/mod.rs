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

//! Data structures for simulated resource records.

use std::fmt;

use serde::Serialize;

mod rr_type;
mod ttl;
pub use rr_type::{Qtype, RecordType};
pub use ttl::Ttl;

/// A resource record held by the zone store.
///
/// The owner name is not part of the record: the store keys records
/// by owner. A `ResourceRecord` cannot be modified once constructed,
/// and the store only hands out shared references to its records.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResourceRecord {
    #[serde(rename = "type")]
    rr_type: RecordType,
    value: Box<str>,
    ttl: Ttl,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u16>,
}

impl ResourceRecord {
    /// Creates a record of the given type. For MX records, use
    /// [`ResourceRecord::mx`] instead, which also takes a priority.
    pub fn new(rr_type: RecordType, value: impl Into<Box<str>>, ttl: u32) -> Self {
        Self {
            rr_type,
            value: value.into(),
            ttl: Ttl::from(ttl),
            priority: None,
        }
    }

    /// Creates an MX record.
    pub fn mx(priority: u16, exchange: impl Into<Box<str>>, ttl: u32) -> Self {
        Self {
            rr_type: RecordType::MX,
            value: exchange.into(),
            ttl: Ttl::from(ttl),
            priority: Some(priority),
        }
    }

    pub fn rr_type(&self) -> RecordType {
        self.rr_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the priority of the record. Only MX records have one.
    pub fn priority(&self) -> Option<u16> {
        self.priority
    }
}

/// Formats the record roughly as it would appear in a zone file, minus
/// the owner and class: `TYPE TTL [PRIORITY] VALUE`. TXT values are
/// quoted.
impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.rr_type, self.ttl)?;
        if let Some(priority) = self.priority {
            write!(f, " {priority}")?;
        }
        if self.rr_type == RecordType::TXT {
            write!(f, " {:?}", self.value)
        } else {
            write!(f, " {}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_display_like_zone_file_entries() {
        let a = ResourceRecord::new(RecordType::A, "93.184.216.34", 300);
        assert_eq!(a.to_string(), "A 300 93.184.216.34");
        let mx = ResourceRecord::mx(10, "mail.example.com", 3600);
        assert_eq!(mx.to_string(), "MX 3600 10 mail.example.com");
        let txt = ResourceRecord::new(RecordType::TXT, "v=spf1 ~all", 3600);
        assert_eq!(txt.to_string(), "TXT 3600 \"v=spf1 ~all\"");
    }

    #[test]
    fn priority_is_only_serialized_for_mx() {
        let a = ResourceRecord::new(RecordType::A, "93.184.216.34", 300);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            r#"{"type":"A","value":"93.184.216.34","ttl":300}"#,
        );
        let mx = ResourceRecord::mx(10, "mail.example.com", 3600);
        assert_eq!(
            serde_json::to_string(&mx).unwrap(),
            r#"{"type":"MX","value":"mail.example.com","ttl":3600,"priority":10}"#,
        );
    }
}
