use std::fmt;

use attest_model::{MarshalError, SigningError, VerificationError};
use thiserror::Error;

/// Errors surfaced by proof construction and snapshot verification.
///
/// Digest, signature and verification errors carry the operation they came from
/// and the underlying cause (reachable through `Error::source`).
#[derive(Error, Debug)]
pub enum ProofError {
    #[error("Digest error in {context}: {source}")]
    Digest {
        context: &'static str,
        #[source]
        source: MarshalError,
    },

    #[error("Signature error in {context}: {source}")]
    Signature {
        context: &'static str,
        #[source]
        source: SigningError,
    },

    #[error("Verification error in {context}: {source}")]
    Verification {
        context: &'static str,
        #[source]
        source: ProofFailure,
    },

    #[error("Quorum not met: {passed}/{total} proofs verified (ratio {ratio:.3}, required {required:.3})")]
    QuorumNotMet {
        ratio: f64,
        passed: usize,
        total: usize,
        required: f64,
    },

    #[error("Pass threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
}

impl ProofError {
    /// Observed pass ratio, for quorum failures.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            ProofError::QuorumNotMet { ratio, .. } => Some(*ratio),
            _ => None,
        }
    }
}

/// Which of the two signatures in a proof tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    Transaction,
    Epoch,
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureKind::Transaction => f.write_str("transaction"),
            SignatureKind::Epoch => f.write_str("epoch"),
        }
    }
}

/// Why a single proof tuple did not verify.
///
/// Inside quorum verification these only reduce the pass count.
#[derive(Error, Debug)]
pub enum ProofFailure {
    #[error("no public key for witness {0:?}")]
    MissingKey(String),

    #[error("{kind} signature is not valid base64: {source}")]
    Encoding {
        kind: SignatureKind,
        #[source]
        source: base64::DecodeError,
    },

    #[error("transaction signature rejected: {0}")]
    TransactionSignature(#[source] VerificationError),

    #[error("epoch record digest failed: {0}")]
    EpochDigest(#[source] MarshalError),

    #[error("epoch signature rejected: {0}")]
    EpochSignature(#[source] VerificationError),
}
