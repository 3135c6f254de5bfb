mod common;

use attest_kernel::proto::snapshot as proto;
use attest_kernel::{
    tally, verify_snapshot, Ed25519Verifier, EpochLedger, HashAlgorithm, Marshal, ProofConfig,
    ProofError, Snapshot, Unmarshal,
};
use common::{key_table, scenario_transaction, witnesses};
use prost::Message;

#[test]
fn snapshot_verifies_after_transport() {
    let config = ProofConfig::default().with_hash(HashAlgorithm::Blake3);
    let tx = scenario_transaction().with_bystanders(["C", "D"]);
    let mut nodes = witnesses(5);
    let keys = key_table(&nodes);

    let mut snapshot = Snapshot::new(tx.clone());
    for node in nodes.iter_mut() {
        snapshot.add_proof(node.attest(&tx, &config));
    }

    let bytes = snapshot.marshal().unwrap();
    let received = Snapshot::unmarshal(&bytes).unwrap();
    assert_eq!(received, snapshot);

    let report =
        verify_snapshot(1.0, &received, &keys, &Ed25519Verifier::default(), &config).unwrap();
    assert_eq!(report.passed, 5);
}

#[test]
fn nan_transaction_from_the_wire_is_a_digest_error() {
    let wire = proto::Snapshot {
        transaction: Some(proto::Transaction {
            action: 10,
            reward: f64::NAN,
            ..Default::default()
        }),
        proofs: Vec::new(),
    };
    let snapshot = Snapshot::unmarshal(&wire.encode_to_vec()).unwrap();
    let keys = key_table(&witnesses(1));

    let err = verify_snapshot(0.5, &snapshot, &keys, &Ed25519Verifier::default(), &ProofConfig::default())
        .unwrap_err();
    assert!(matches!(err, ProofError::Digest { .. }));
}

#[test]
fn ledger_tracks_epochs_across_snapshots() {
    let config = ProofConfig::default();
    let verifier = Ed25519Verifier::default();
    let mut nodes = witnesses(3);
    let keys = key_table(&nodes);
    let mut ledger = EpochLedger::new();

    let tx = scenario_transaction();
    let mut first = Snapshot::new(tx.clone());
    for node in nodes.iter_mut() {
        first.add_proof(node.attest(&tx, &config));
    }
    let report = tally(&first, &keys, &verifier, &config).unwrap();
    ledger.observe_verified(&first, &report).unwrap();
    assert_eq!(ledger.last_epoch("witness-0"), Some(1));

    // Replaying the same snapshot is caught by the ledger, not by verification.
    let replay = Snapshot::unmarshal(&first.marshal().unwrap()).unwrap();
    let report = tally(&replay, &keys, &verifier, &config).unwrap();
    assert_eq!(report.passed, 3);
    assert!(ledger.observe_verified(&replay, &report).is_err());

    let mut second = Snapshot::new(tx.clone());
    for node in nodes.iter_mut() {
        second.add_proof(node.attest(&tx, &config));
    }
    let report = tally(&second, &keys, &verifier, &config).unwrap();
    ledger.observe_verified(&second, &report).unwrap();
    assert_eq!(ledger.last_epoch("witness-2"), Some(2));
}
