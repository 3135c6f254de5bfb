//! Quorum verification of snapshots.
//!
//! Every proof tuple is checked on its own: a missing key, a bad signature or
//! an undigestable epoch record only fails that tuple. The snapshot is then
//! accepted iff `passed / total >= pass`. A snapshot with no proofs is always
//! rejected, whatever the threshold.
//!
//! Tuples are independent, so with `ProofConfig::parallel` they are checked on
//! the rayon pool. The report lists failures in snapshot order either way.

use std::collections::HashMap;

use attest_model::crypto::digest;
use attest_model::{Digest, ProofConfig, SignatureVerifier};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{ProofError, ProofFailure};
use crate::proof::{check_proof, ProofTuple};
use crate::snapshot::Snapshot;

/// A proof tuple that did not verify.
#[derive(Debug)]
pub struct FailedProof {
    /// Position in `Snapshot::proofs()`.
    pub index: usize,
    /// Witness id claimed by the tuple.
    pub witness: String,
    pub reason: ProofFailure,
}

/// Outcome of checking every proof of a snapshot.
#[derive(Debug)]
pub struct QuorumReport {
    pub passed: usize,
    pub total: usize,
    /// Failed tuples in snapshot order.
    pub failures: Vec<FailedProof>,
}

impl QuorumReport {
    /// `passed / total`, or `0.0` for an empty snapshot.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64
    }

    /// Whether this report satisfies `pass`. Empty snapshots never do.
    pub fn meets(&self, pass: f64) -> bool {
        self.total > 0 && self.ratio() >= pass
    }
}

/// Verify `snapshot` against `keys` and accept it iff the pass ratio reaches
/// `pass`.
///
/// Fails with [`ProofError::Digest`] if the transaction itself cannot be
/// digested, [`ProofError::InvalidThreshold`] if `pass` is outside `[0, 1]`,
/// and [`ProofError::QuorumNotMet`] if too few tuples verify.
pub fn verify_snapshot<K, V>(
    pass: f64,
    snapshot: &Snapshot,
    keys: &HashMap<String, K>,
    verifier: &V,
    config: &ProofConfig,
) -> Result<QuorumReport, ProofError>
where
    K: Sync,
    V: SignatureVerifier<K> + Sync + ?Sized,
{
    if !(0.0..=1.0).contains(&pass) {
        return Err(ProofError::InvalidThreshold(pass));
    }

    let report = tally(snapshot, keys, verifier, config)?;
    if !report.meets(pass) {
        warn!(
            passed = report.passed,
            total = report.total,
            required = pass,
            "Snapshot rejected: quorum not met"
        );
        return Err(ProofError::QuorumNotMet {
            ratio: report.ratio(),
            passed: report.passed,
            total: report.total,
            required: pass,
        });
    }

    info!(
        passed = report.passed,
        total = report.total,
        ratio = report.ratio(),
        "Snapshot accepted"
    );
    Ok(report)
}

/// Check every proof of `snapshot` without applying a threshold.
///
/// Only a transaction digest failure is an error; everything else ends up in
/// [`QuorumReport::failures`].
pub fn tally<K, V>(
    snapshot: &Snapshot,
    keys: &HashMap<String, K>,
    verifier: &V,
    config: &ProofConfig,
) -> Result<QuorumReport, ProofError>
where
    K: Sync,
    V: SignatureVerifier<K> + Sync + ?Sized,
{
    let t_digest = digest(config.hash, snapshot.transaction()).map_err(|source| {
        ProofError::Digest {
            context: "verify_snapshot",
            source,
        }
    })?;

    let check = |(index, proof): (usize, &ProofTuple)| {
        check_one(proof, keys, verifier, &t_digest, config).err().map(|reason| {
            debug!(index, witness = %proof.witness(), error = %reason, "Proof failed verification");
            FailedProof {
                index,
                witness: proof.witness().to_owned(),
                reason,
            }
        })
    };

    let proofs = snapshot.proofs();
    let failures: Vec<FailedProof> = if config.parallel {
        proofs.par_iter().enumerate().filter_map(check).collect()
    } else {
        proofs.iter().enumerate().filter_map(check).collect()
    };

    Ok(QuorumReport {
        passed: proofs.len() - failures.len(),
        total: proofs.len(),
        failures,
    })
}

fn check_one<K, V>(
    proof: &ProofTuple,
    keys: &HashMap<String, K>,
    verifier: &V,
    t_digest: &Digest,
    config: &ProofConfig,
) -> Result<(), ProofFailure>
where
    V: SignatureVerifier<K> + ?Sized,
{
    let key = keys
        .get(proof.witness())
        .ok_or_else(|| ProofFailure::MissingKey(proof.witness().to_owned()))?;
    check_proof(proof, key, t_digest, verifier, config.hash)
}
