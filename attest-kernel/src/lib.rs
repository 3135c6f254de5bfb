//! Attest Kernel
//!
//! Witness attestation and quorum verification.
//!
//! - **ProofTuple**: one witness's epoch record plus signatures over the
//!   transaction digest and the epoch record digest
//! - **Snapshot**: a transaction and every proof tuple collected for it
//! - **verify_snapshot**: per-tuple verification and the pass-ratio decision
//! - **EpochLedger**: optional per-witness epoch history kept by callers

pub mod epoch_ledger;
pub mod error;
pub mod proof;
pub mod proto;
pub mod quorum;
pub mod snapshot;

pub use epoch_ledger::{EpochError, EpochLedger};
pub use error::{ProofError, ProofFailure, SignatureKind};
pub use proof::ProofTuple;
pub use quorum::{tally, verify_snapshot, FailedProof, QuorumReport};
pub use snapshot::Snapshot;

// Re-exports from attest-model
pub use attest_model::{
    Ed25519Verifier, EpochRecord, HashAlgorithm, Marshal, MarshalError, ProofConfig, PubKey,
    SignatureVerifier, SigningKey, Transaction, Unmarshal, WitnessSigner,
};
