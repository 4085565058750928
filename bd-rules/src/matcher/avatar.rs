use super::{MatchResult, MatcherType};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of raw avatar bytes, lower case.
pub fn avatar_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarMatchType {
    /// Digest equals a stored hash.
    Exact,
}

/// Matches avatar digests against a set of known hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarMatcher {
    origin: String,
    match_type: AvatarMatchType,
    attributes: Vec<String>,
    hashes: Vec<String>,
}

impl AvatarMatcher {
    /// Stored hashes are lower-cased so they compare equal to [`avatar_hash`]
    /// output.
    pub fn new(
        origin: impl Into<String>,
        match_type: AvatarMatchType,
        attributes: Vec<String>,
        hashes: Vec<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            match_type,
            attributes,
            hashes: hashes.into_iter().map(|h| h.to_ascii_lowercase()).collect(),
        }
    }

    pub fn hashes(&self) -> &[String] {
        &self.hashes
    }

    pub fn matches(&self, digest: &str) -> Option<MatchResult> {
        let hit = match self.match_type {
            AvatarMatchType::Exact => self.hashes.iter().any(|h| h == digest),
        };
        hit.then(|| MatchResult::new(&self.origin, self.attributes.clone(), MatcherType::Avatar))
    }
}
