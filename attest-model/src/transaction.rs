//! Transaction: the ledger record witnesses attest to.
//!
//! A transaction moves `exchange` from the losing party to the gaining party
//! and pays `reward` to every bystander. Fields are public and freely mutable
//! until the record is signed; after that any change invalidates every
//! signature taken over it.
//!
//! Serialization:
//! - Canonical **Borsh** bytes (via [`Marshal`]) are what gets hashed and
//!   signed. Borsh rejects NaN floats, so a NaN amount can never be signed.
//! - The protobuf form lives in `attest-proto` and is transport only.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::marshal::{from_borsh, to_borsh, Marshal, MarshalError, Unmarshal};

/// A transaction between a gaining party, a losing party and any number of
/// bystanders.
///
/// Field order matches the canonical Borsh serialization order.
#[derive(Debug, Clone, PartialEq, Default, BorshSerialize, BorshDeserialize)]
pub struct Transaction {
    /// Application-defined transaction type.
    pub action: i32,
    /// Amount paid to each bystander.
    pub reward: f64,
    /// Value moved from loser to gainer.
    pub exchange: f64,
    /// Gaining party id.
    pub gainer: String,
    /// Losing party id.
    pub loser: String,
    /// Bystander ids in the order given. Duplicates are kept.
    pub bystanders: Vec<String>,
}

impl Transaction {
    /// Create a transaction with no bystanders.
    pub fn new(
        action: i32,
        reward: f64,
        exchange: f64,
        gainer: impl Into<String>,
        loser: impl Into<String>,
    ) -> Self {
        Self {
            action,
            reward,
            exchange,
            gainer: gainer.into(),
            loser: loser.into(),
            bystanders: Vec::new(),
        }
    }

    /// Replace the bystander list.
    pub fn with_bystanders<I, S>(mut self, bystanders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bystanders = bystanders.into_iter().map(Into::into).collect();
        self
    }
}

impl Marshal for Transaction {
    fn marshal(&self) -> Result<Vec<u8>, MarshalError> {
        to_borsh(self)
    }
}

impl Unmarshal for Transaction {
    fn unmarshal(bytes: &[u8]) -> Result<Self, MarshalError> {
        from_borsh(bytes)
    }
}
