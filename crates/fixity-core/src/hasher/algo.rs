//! Supported digest algorithms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Digest algorithm used for file content
///
/// [`HashAlgo::Md5`] is kept for legacy manifests and non-adversarial
/// corruption checks. It is not collision resistant: someone who controls
/// file contents can craft two different files with the same MD5 digest.
/// Use [`HashAlgo::Sha256`] whenever tampering is a concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgo {
    Md5,
    #[default]
    Sha256,
}

impl HashAlgo {
    /// All supported algorithms
    pub const ALL: [Self; 2] = [Self::Md5, Self::Sha256];

    /// Length of the raw digest in bytes
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
        }
    }

    /// Lowercase identifier used in manifests and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown algorithm name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown hash algorithm: {0} (expected md5 or sha256)")]
pub struct ParseHashAlgoError(pub String);

impl FromStr for HashAlgo {
    type Err = ParseHashAlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" | "md-5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(ParseHashAlgoError(s.to_string())),
        }
    }
}
