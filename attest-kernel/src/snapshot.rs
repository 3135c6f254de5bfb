//! Snapshot: a transaction plus every proof tuple collected for it.

use std::collections::HashMap;

use attest_model::{Marshal, MarshalError, ProofConfig, SignatureVerifier, Transaction, Unmarshal};
use prost::Message;

use crate::error::ProofError;
use crate::proof::ProofTuple;
use crate::proto::snapshot as proto;
use crate::quorum::{verify_snapshot, QuorumReport};

/// Post-transaction verification data.
///
/// The transaction is only reachable by shared reference once it is inside a
/// snapshot, so signatures collected for it cannot be invalidated by a later
/// edit. Proofs keep arrival order and are never deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    transaction: Transaction,
    proofs: Vec<ProofTuple>,
}

impl Snapshot {
    /// An empty snapshot for `transaction`.
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            proofs: Vec::new(),
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Append a proof for later verification.
    pub fn add_proof(&mut self, proof: ProofTuple) {
        self.proofs.push(proof);
    }

    /// All proofs in arrival order.
    pub fn proofs(&self) -> &[ProofTuple] {
        &self.proofs
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    pub fn into_parts(self) -> (Transaction, Vec<ProofTuple>) {
        (self.transaction, self.proofs)
    }

    /// Shorthand for [`verify_snapshot`] on this snapshot.
    pub fn verify<K, V>(
        &self,
        pass: f64,
        keys: &HashMap<String, K>,
        verifier: &V,
        config: &ProofConfig,
    ) -> Result<QuorumReport, ProofError>
    where
        K: Sync,
        V: SignatureVerifier<K> + Sync + ?Sized,
    {
        verify_snapshot(pass, self, keys, verifier, config)
    }
}

impl Extend<ProofTuple> for Snapshot {
    fn extend<I: IntoIterator<Item = ProofTuple>>(&mut self, iter: I) {
        self.proofs.extend(iter);
    }
}

impl Marshal for Snapshot {
    fn marshal(&self) -> Result<Vec<u8>, MarshalError> {
        Ok(proto::Snapshot::from(self).encode_to_vec())
    }
}

impl Unmarshal for Snapshot {
    fn unmarshal(bytes: &[u8]) -> Result<Self, MarshalError> {
        let wire = proto::Snapshot::decode(bytes).map_err(|e| MarshalError::Wire(Box::new(e)))?;
        Snapshot::try_from(wire)
    }
}
