//! Generated Protobuf definitions for attestation snapshots

pub mod convert;

pub mod snapshot {
    include!(concat!(env!("OUT_DIR"), "/attest.snapshot.rs"));
}
