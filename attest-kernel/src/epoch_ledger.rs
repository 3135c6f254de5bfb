//! Per-witness epoch history.
//!
//! Verification never looks at epoch numbers. A caller that keeps a ledger
//! across snapshots uses it to reject replayed or rolled-back bookkeeping:
//! every accepted epoch for a witness must be strictly greater than the last.

use std::collections::{HashMap, HashSet};

use attest_model::EpochRecord;
use thiserror::Error;

use crate::quorum::QuorumReport;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpochError {
    #[error("Stale epoch for witness {id:?}: got {got}, last seen {last}")]
    Stale { id: String, last: i32, got: i32 },

    #[error("Report covers {report} proofs but snapshot has {snapshot}")]
    ReportMismatch { report: usize, snapshot: usize },
}

/// Latest accepted epoch per witness id.
#[derive(Debug, Clone, Default)]
pub struct EpochLedger {
    latest: HashMap<String, i32>,
}

impl EpochLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted epoch for `id` (None if never seen).
    pub fn last_epoch(&self, id: &str) -> Option<i32> {
        self.latest.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Would `record` be accepted?
    pub fn check(&self, record: &EpochRecord) -> Result<(), EpochError> {
        check_against(self.last_epoch(&record.id), record)
    }

    /// Accept `record`, advancing the witness's epoch.
    pub fn observe(&mut self, record: &EpochRecord) -> Result<(), EpochError> {
        self.check(record)?;
        self.latest.insert(record.id.clone(), record.epoch);
        Ok(())
    }

    /// Accept the epoch of every proof that passed in `report`.
    ///
    /// All-or-nothing: if any verified proof is stale (including a witness
    /// repeating an epoch within the snapshot) the ledger is left unchanged.
    /// `report` must come from verifying `snapshot`.
    pub fn observe_verified(
        &mut self,
        snapshot: &Snapshot,
        report: &QuorumReport,
    ) -> Result<(), EpochError> {
        let out_of_range = report.failures.iter().any(|f| f.index >= snapshot.len());
        if report.total != snapshot.len() || out_of_range {
            return Err(EpochError::ReportMismatch {
                report: report.total,
                snapshot: snapshot.len(),
            });
        }

        let failed: HashSet<usize> = report.failures.iter().map(|f| f.index).collect();
        let mut staged: HashMap<&str, i32> = HashMap::new();

        for (index, proof) in snapshot.proofs().iter().enumerate() {
            if failed.contains(&index) {
                continue;
            }
            let record = proof.epoch();
            let last = staged
                .get(record.id.as_str())
                .copied()
                .or_else(|| self.last_epoch(&record.id));
            check_against(last, record)?;
            staged.insert(&record.id, record.epoch);
        }

        for (id, epoch) in staged {
            self.latest.insert(id.to_owned(), epoch);
        }
        Ok(())
    }

    /// Merge another ledger into this one (takes max epoch).
    pub fn merge(&mut self, other: &EpochLedger) {
        for (id, &epoch) in &other.latest {
            let entry = self.latest.entry(id.clone()).or_insert(epoch);
            *entry = (*entry).max(epoch);
        }
    }
}

fn check_against(last: Option<i32>, record: &EpochRecord) -> Result<(), EpochError> {
    match last {
        Some(last) if record.epoch <= last => Err(EpochError::Stale {
            id: record.id.clone(),
            last,
            got: record.epoch,
        }),
        _ => Ok(()),
    }
}
