//! Protobuf types for attestations
//!
//! Re-exports `attest-proto` and converts kernel records to and from it.

pub use attest_proto::snapshot;

use attest_model::{EpochRecord, MarshalError, Transaction};

use crate::proof::ProofTuple;
use crate::snapshot::Snapshot;

// ==================== ProofTuple ====================

impl From<&ProofTuple> for snapshot::ProofTuple {
    fn from(proof: &ProofTuple) -> Self {
        Self {
            epoch: Some(proof.epoch().into()),
            transaction_sign: proof.transaction_signature().to_owned(),
            epoch_sign: proof.epoch_signature().to_owned(),
        }
    }
}

/// Proto → Model (fallible: the epoch record is required)
impl TryFrom<snapshot::ProofTuple> for ProofTuple {
    type Error = MarshalError;

    fn try_from(proto: snapshot::ProofTuple) -> Result<Self, Self::Error> {
        let epoch = proto.epoch.ok_or(MarshalError::MissingField("epoch"))?;
        Ok(ProofTuple::from_parts(
            EpochRecord::from(epoch),
            proto.transaction_sign,
            proto.epoch_sign,
        ))
    }
}

// ==================== Snapshot ====================

impl From<&Snapshot> for snapshot::Snapshot {
    fn from(snap: &Snapshot) -> Self {
        Self {
            transaction: Some(snap.transaction().into()),
            proofs: snap.proofs().iter().map(Into::into).collect(),
        }
    }
}

/// Proto → Model (fallible: transaction and every epoch record are required)
impl TryFrom<snapshot::Snapshot> for Snapshot {
    type Error = MarshalError;

    fn try_from(proto: snapshot::Snapshot) -> Result<Self, Self::Error> {
        let tx = proto
            .transaction
            .ok_or(MarshalError::MissingField("transaction"))?;
        let mut snap = Snapshot::new(Transaction::from(tx));
        for proof in proto.proofs {
            snap.add_proof(ProofTuple::try_from(proof)?);
        }
        Ok(snap)
    }
}
