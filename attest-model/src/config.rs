use serde::{Deserialize, Serialize};

use crate::crypto::HashAlgorithm;

/// Settings threaded into signing and verification.
///
/// `ProofConfig::default()` is the process-wide default; pass a different
/// value at the call site to override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    /// Digest algorithm for transactions and epoch records.
    pub hash: HashAlgorithm,
    /// Verify the proofs of one snapshot on the rayon pool.
    pub parallel: bool,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            parallel: true,
        }
    }
}

impl ProofConfig {
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
