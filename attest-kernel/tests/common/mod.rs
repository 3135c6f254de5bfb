#![allow(dead_code)]

use std::collections::HashMap;

use attest_kernel::{EpochRecord, ProofConfig, ProofTuple, PubKey, SigningKey, Transaction};
use attest_model::crypto::public_key;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;

/// A witness node with a deterministic key and its own epoch counter.
pub struct TestWitness {
    pub id: String,
    pub key: SigningKey,
    pub epoch: i32,
    pub balance: f64,
}

impl TestWitness {
    pub fn new(index: u8) -> Self {
        Self {
            id: format!("witness-{index}"),
            key: SigningKey::from_bytes(&[index.wrapping_add(1); 32]),
            epoch: 0,
            balance: 100.0 * f64::from(index),
        }
    }

    /// Attest `tx`, bumping this witness's epoch first.
    pub fn attest(&mut self, tx: &Transaction, config: &ProofConfig) -> ProofTuple {
        self.epoch += 1;
        let record = EpochRecord::new(self.id.clone(), self.epoch, self.balance);
        ProofTuple::sign(tx, record, &self.key, config).expect("signing failed")
    }

    pub fn public_key(&self) -> PubKey {
        public_key(&self.key)
    }
}

pub fn witnesses(n: u8) -> Vec<TestWitness> {
    (0..n).map(TestWitness::new).collect()
}

pub fn key_table(witnesses: &[TestWitness]) -> HashMap<String, PubKey> {
    witnesses
        .iter()
        .map(|w| (w.id.clone(), w.public_key()))
        .collect()
}

/// Flip one byte of the epoch signature.
pub fn corrupt_epoch_signature(proof: ProofTuple) -> ProofTuple {
    let (epoch, t_sig, e_sig) = proof.into_parts();
    let mut raw = BASE64_ENGINE.decode(e_sig).expect("valid base64");
    raw[0] ^= 0xff;
    ProofTuple::from_parts(epoch, t_sig, BASE64_ENGINE.encode(raw))
}

pub fn scenario_transaction() -> Transaction {
    Transaction::new(10, 1.0, 5.0, "A", "B")
}
