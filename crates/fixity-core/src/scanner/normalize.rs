//! Filename canonicalization: NFKD, then ASCII only

use std::ffi::OsStr;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// ASCII-only canonical form of a filename, used as a manifest key
///
/// Two different raw names may map to the same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Borrow the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization removed every character
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key for the `n`-th occurrence of this name (`name__n`)
    #[must_use]
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}__{n}", self.0))
    }

    /// Consume and return the inner string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Canonicalize a filename
///
/// Applies Unicode compatibility decomposition (NFKD) and drops every code
/// point outside 7-bit ASCII. Combining marks, non-Latin scripts and emoji
/// are removed, not replaced, so `"café.txt"` becomes `"cafe.txt"` and
/// `"日本.txt"` becomes `".txt"`. ASCII input is returned unchanged.
#[must_use]
pub fn normalize(raw: &str) -> NormalizedName {
    NormalizedName(raw.nfkd().filter(char::is_ascii).collect())
}

/// Canonicalize a filename as returned by the OS
///
/// Names that are not valid UTF-8 are decoded lossily first; the
/// replacement characters that decoding inserts are then dropped like any
/// other non-ASCII code point.
#[must_use]
pub fn normalize_os(raw: &OsStr) -> NormalizedName {
    normalize(&raw.to_string_lossy())
}
