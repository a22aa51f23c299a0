//! Hash algorithms supported for candidate matching.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Digest algorithm a job's target hash was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of a candidate under this algorithm.
    pub fn digest_hex(&self, candidate: &str) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(candidate.as_bytes())),
            Self::Sha1 => hex::encode(Sha1::digest(candidate.as_bytes())),
            Self::Sha256 => hex::encode(Sha256::digest(candidate.as_bytes())),
            Self::Sha512 => hex::encode(Sha512::digest(candidate.as_bytes())),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
