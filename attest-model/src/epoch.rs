//! Epoch record: a witness's bookkeeping state at attestation time.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::marshal::{from_borsh, to_borsh, Marshal, MarshalError, Unmarshal};

/// `(witness id, epoch, balance)` as reported by one witness.
///
/// `epoch` counts the transactions the witness has taken part in and must
/// strictly increase per id. Verification does not check that; callers that
/// track history do.
#[derive(Debug, Clone, PartialEq, Default, BorshSerialize, BorshDeserialize)]
pub struct EpochRecord {
    pub id: String,
    pub epoch: i32,
    pub balance: f64,
}

impl EpochRecord {
    pub fn new(id: impl Into<String>, epoch: i32, balance: f64) -> Self {
        Self {
            id: id.into(),
            epoch,
            balance,
        }
    }
}

impl Marshal for EpochRecord {
    fn marshal(&self) -> Result<Vec<u8>, MarshalError> {
        to_borsh(self)
    }
}

impl Unmarshal for EpochRecord {
    fn unmarshal(bytes: &[u8]) -> Result<Self, MarshalError> {
        from_borsh(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn borsh_roundtrip() {
        let record = EpochRecord::new("node-1", 7, 120.5);
        let bytes = record.marshal().unwrap();
        assert_eq!(EpochRecord::unmarshal(&bytes).unwrap(), record);
    }

    #[test]
    fn balance_is_part_of_encoding() {
        let a = EpochRecord::new("node-1", 7, 1.0);
        let b = EpochRecord::new("node-1", 7, 2.0);
        assert_ne!(a.marshal().unwrap(), b.marshal().unwrap());
    }

    #[test]
    fn nan_balance_is_rejected() {
        let record = EpochRecord::new("node-1", 1, f64::NAN);
        assert!(record.marshal().is_err());
    }

    proptest! {
        #[test]
        fn marshal_roundtrip(id in "[ -~]{0,32}", epoch in any::<i32>(), balance in prop::num::f64::NORMAL) {
            let record = EpochRecord { id, epoch, balance };
            let bytes = record.marshal().unwrap();
            prop_assert_eq!(EpochRecord::unmarshal(&bytes).unwrap(), record);
        }
    }
}
