// Copyright 2021 Matthew Ingwersen.
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

//! Parsing, validation, and decomposition of domain names.
//!
//! A domain name is accepted if it consists of one or more
//! dot-separated labels followed by a final, purely alphabetic label
//! (the top-level domain) of at least two characters. Each non-final
//! label is made of ASCII letters, digits, and hyphens, and may neither
//! begin nor end with a hyphen. Validation fails closed: anything that
//! does not match is rejected. No length limits are imposed on labels
//! or names.
//!
//! Two interfaces are provided. The free functions [`is_valid`],
//! [`base_domain`], [`subdomain`], and [`tld`] operate on raw text;
//! all but [`is_valid`] assume that the text has already been
//! validated, and never fail. The [`Name`] type is a validated,
//! lower-cased domain name, constructed through its [`FromStr`]
//! implementation, which reports *why* a string was rejected.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::util::is_label_char;

mod error;
pub use error::Error;

////////////////////////////////////////////////////////////////////////
// FREE FUNCTIONS OVER RAW TEXT                                       //
////////////////////////////////////////////////////////////////////////

/// Returns whether `text` is a syntactically valid domain name.
pub fn is_valid(text: &str) -> bool {
    check(text).is_ok()
}

/// Returns the base domain of `text`: its last two labels, joined by a
/// dot. A name with fewer than two labels is returned unchanged.
pub fn base_domain(text: &str) -> &str {
    match second_to_last_dot(text) {
        Some(index) => &text[index + 1..],
        None => text,
    }
}

/// Returns the label(s) of `text` preceding its base domain, or `None`
/// if `text` has at most two labels.
///
/// For `www.example.com`, this is `www`; for `a.b.example.com`, it is
/// `a.b`.
pub fn subdomain(text: &str) -> Option<&str> {
    second_to_last_dot(text).map(|index| &text[..index])
}

/// Returns the final label of `text` (its top-level domain).
pub fn tld(text: &str) -> &str {
    match text.rfind('.') {
        Some(index) => &text[index + 1..],
        None => text,
    }
}

fn second_to_last_dot(text: &str) -> Option<usize> {
    text.rmatch_indices('.').nth(1).map(|(index, _)| index)
}

/// Checks `text` against the domain-name syntax, reporting the first
/// problem found.
fn check(text: &str) -> Result<(), Error> {
    if text.is_empty() {
        return Err(Error::StrEmpty);
    } else if !text.is_ascii() {
        return Err(Error::StrNotAscii);
    }

    // The split is over ASCII text, so a name without dots yields one
    // label: the would-be TLD.
    let (labels, tld) = match text.rsplit_once('.') {
        Some(parts) => parts,
        None => return Err(Error::SingleLabel),
    };
    for label in labels.split('.') {
        check_label(label)?;
    }

    if tld.is_empty() {
        Err(Error::EmptyLabel)
    } else if tld.len() < 2 || !tld.bytes().all(|c| c.is_ascii_alphabetic()) {
        Err(Error::InvalidTld)
    } else {
        Ok(())
    }
}

/// Checks a single non-final label.
pub(crate) fn check_label(label: &str) -> Result<(), Error> {
    let octets = label.as_bytes();
    match (octets.first(), octets.last()) {
        (None, _) | (_, None) => Err(Error::EmptyLabel),
        _ if !octets.iter().copied().all(is_label_char) => Err(Error::InvalidCharacter),
        (Some(b'-'), _) | (_, Some(b'-')) => Err(Error::HyphenAtLabelEdge),
        _ => Ok(()),
    }
}

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A validated domain name.
///
/// A `Name` can only be constructed through its [`FromStr`]
/// implementation, which validates the text and converts it to lower
/// case. Since domain names compare case-insensitively, this makes the
/// derived [`Eq`], [`Ord`], and [`Hash`] implementations (which act on
/// the text) the correct ones.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name(Box<str>);

impl Name {
    /// Returns the textual representation of the `Name`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base domain of the `Name`. See [`base_domain`].
    pub fn base_domain(&self) -> &str {
        base_domain(&self.0)
    }

    /// Returns the label(s) preceding the base domain, if any. See
    /// [`subdomain`].
    pub fn subdomain(&self) -> Option<&str> {
        subdomain(&self.0)
    }

    /// Returns the top-level domain of the `Name`.
    pub fn tld(&self) -> &str {
        tld(&self.0)
    }

    /// Returns the number of labels in the `Name`.
    pub fn n_labels(&self) -> usize {
        self.0.bytes().filter(|&c| c == b'.').count() + 1
    }

    /// Returns whether the `Name` is a base domain, i.e., whether it
    /// has exactly two labels.
    pub fn is_base_domain(&self) -> bool {
        self.n_labels() == 2
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        check(text)?;
        Ok(Self(text.to_ascii_lowercase().into_boxed_str()))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
