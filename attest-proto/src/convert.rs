//! Proto ↔ Model conversion for the leaf records.
//!
//! Both directions are infallible: every wire value is a valid model value.
//! Records that need validation (proofs, snapshots) convert in
//! `attest-kernel`.

use crate::snapshot as proto;
use attest_model::{EpochRecord, Transaction};

// ==================== Transaction ====================

impl From<&Transaction> for proto::Transaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            action: tx.action,
            reward: tx.reward,
            exchange: tx.exchange,
            gainer: tx.gainer.clone(),
            loser: tx.loser.clone(),
            bystanders: tx.bystanders.clone(),
        }
    }
}

impl From<proto::Transaction> for Transaction {
    fn from(proto: proto::Transaction) -> Self {
        Self {
            action: proto.action,
            reward: proto.reward,
            exchange: proto.exchange,
            gainer: proto.gainer,
            loser: proto.loser,
            bystanders: proto.bystanders,
        }
    }
}

// ==================== EpochRecord ====================

impl From<&EpochRecord> for proto::EpochRecord {
    fn from(record: &EpochRecord) -> Self {
        Self {
            id: record.id.clone(),
            epoch: record.epoch,
            balance: record.balance,
        }
    }
}

impl From<proto::EpochRecord> for EpochRecord {
    fn from(proto: proto::EpochRecord) -> Self {
        Self {
            id: proto.id,
            epoch: proto.epoch,
            balance: proto.balance,
        }
    }
}
