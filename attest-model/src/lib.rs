//! Attest Model
//!
//! Records, digests and signature capabilities for witness attestations,
//! decoupled from the wire format and from the quorum logic.

pub mod config;
pub mod crypto;
pub mod epoch;
pub mod marshal;
pub mod transaction;
pub mod types;

// Re-exports
pub use config::ProofConfig;
pub use crypto::{
    digest, Ed25519Verifier, HashAlgorithm, SignatureVerifier, SigningError, VerificationError,
    WitnessSigner,
};
pub use epoch::EpochRecord;
pub use marshal::{Marshal, MarshalError, Unmarshal};
pub use transaction::Transaction;
pub use types::{BytesError, Digest, PubKey, Signature};

// Re-exports from dependencies
pub use ed25519_dalek::{SigningKey, VerifyingKey};
