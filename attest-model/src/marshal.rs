//! Marshal / unmarshal capability shared by every attested record.
//!
//! Digests are taken over `marshal()` output, so an implementation must be
//! deterministic: equal records always produce equal bytes.

use thiserror::Error;

/// Errors from turning a record into bytes or back.
#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("canonical encode failed: {0}")]
    Encode(#[source] borsh::io::Error),

    #[error("canonical decode failed: {0}")]
    Decode(#[source] borsh::io::Error),

    #[error("wire decode failed: {0}")]
    Wire(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// A record that can serialize itself to bytes.
pub trait Marshal {
    fn marshal(&self) -> Result<Vec<u8>, MarshalError>;
}

/// A record that can be rebuilt from the bytes produced by [`Marshal`].
pub trait Unmarshal: Sized {
    fn unmarshal(bytes: &[u8]) -> Result<Self, MarshalError>;
}

/// Canonical Borsh encoding used by the leaf records.
pub(crate) fn to_borsh<T: borsh::BorshSerialize>(value: &T) -> Result<Vec<u8>, MarshalError> {
    borsh::to_vec(value).map_err(MarshalError::Encode)
}

pub(crate) fn from_borsh<T: borsh::BorshDeserialize>(bytes: &[u8]) -> Result<T, MarshalError> {
    borsh::from_slice(bytes).map_err(MarshalError::Decode)
}
