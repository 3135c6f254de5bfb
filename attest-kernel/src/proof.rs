//! Proof tuples: one witness's signed attestation of a transaction.
//!
//! A tuple carries the witness's epoch record and two signatures, one over
//! `digest(transaction)` and one over `digest(epoch record)`. Signatures are
//! kept as standard base64 text, exactly as they travel on the wire.

use attest_model::crypto::digest;
use attest_model::{
    Digest, EpochRecord, HashAlgorithm, Marshal, MarshalError, ProofConfig, SignatureVerifier,
    Transaction, Unmarshal, WitnessSigner,
};
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use prost::Message;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{ProofError, ProofFailure, SignatureKind};
use crate::proto::snapshot as proto;

/// A witness's joint attestation of a transaction and its own epoch record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProofTuple {
    epoch: EpochRecord,
    transaction_sign: String,
    epoch_sign: String,
}

impl ProofTuple {
    /// Sign `tx` and `epoch` with `signer`, using the OS RNG.
    ///
    /// Fails on the first digest or signing error; no partial tuple is built.
    pub fn sign<S>(
        tx: &Transaction,
        epoch: EpochRecord,
        signer: &S,
        config: &ProofConfig,
    ) -> Result<Self, ProofError>
    where
        S: WitnessSigner + ?Sized,
    {
        Self::sign_with_rng(tx, epoch, signer, config, &mut OsRng)
    }

    /// Same as [`ProofTuple::sign`] with an explicit randomness source.
    pub fn sign_with_rng<S>(
        tx: &Transaction,
        epoch: EpochRecord,
        signer: &S,
        config: &ProofConfig,
        rng: &mut dyn RngCore,
    ) -> Result<Self, ProofError>
    where
        S: WitnessSigner + ?Sized,
    {
        let t_digest = digest(config.hash, tx).map_err(|source| ProofError::Digest {
            context: "ProofTuple::sign (transaction)",
            source,
        })?;
        let transaction_sign = signer
            .sign_digest(rng, config.hash, &t_digest)
            .map_err(|source| ProofError::Signature {
                context: "ProofTuple::sign (transaction)",
                source,
            })?;

        let e_digest = digest(config.hash, &epoch).map_err(|source| ProofError::Digest {
            context: "ProofTuple::sign (epoch)",
            source,
        })?;
        let epoch_sign = signer
            .sign_digest(rng, config.hash, &e_digest)
            .map_err(|source| ProofError::Signature {
                context: "ProofTuple::sign (epoch)",
                source,
            })?;

        tracing::trace!(witness = %epoch.id, epoch = epoch.epoch, "signed proof tuple");

        Ok(Self {
            epoch,
            transaction_sign: BASE64_ENGINE.encode(transaction_sign),
            epoch_sign: BASE64_ENGINE.encode(epoch_sign),
        })
    }

    /// Assemble a tuple from already-encoded parts.
    ///
    /// The signature text is not checked here; malformed base64 fails at
    /// verification time.
    pub fn from_parts(
        epoch: EpochRecord,
        transaction_sign: impl Into<String>,
        epoch_sign: impl Into<String>,
    ) -> Self {
        Self {
            epoch,
            transaction_sign: transaction_sign.into(),
            epoch_sign: epoch_sign.into(),
        }
    }

    pub fn into_parts(self) -> (EpochRecord, String, String) {
        (self.epoch, self.transaction_sign, self.epoch_sign)
    }

    /// The embedded epoch record.
    pub fn epoch(&self) -> &EpochRecord {
        &self.epoch
    }

    /// Witness id the tuple claims to come from.
    pub fn witness(&self) -> &str {
        &self.epoch.id
    }

    /// Base64 transaction signature.
    pub fn transaction_signature(&self) -> &str {
        &self.transaction_sign
    }

    /// Base64 epoch signature.
    pub fn epoch_signature(&self) -> &str {
        &self.epoch_sign
    }

    /// Check this tuple alone against `tx` and the witness's key.
    pub fn verify<K, V>(
        &self,
        tx: &Transaction,
        key: &K,
        verifier: &V,
        config: &ProofConfig,
    ) -> Result<(), ProofError>
    where
        K: ?Sized,
        V: SignatureVerifier<K> + ?Sized,
    {
        let t_digest = digest(config.hash, tx).map_err(|source| ProofError::Digest {
            context: "ProofTuple::verify",
            source,
        })?;
        check_proof(self, key, &t_digest, verifier, config.hash).map_err(|source| {
            ProofError::Verification {
                context: "ProofTuple::verify",
                source,
            }
        })
    }
}

/// Verify both signatures of `proof` given the precomputed transaction digest.
///
/// The epoch signature is only looked at once the transaction signature has
/// passed.
pub(crate) fn check_proof<K, V>(
    proof: &ProofTuple,
    key: &K,
    t_digest: &Digest,
    verifier: &V,
    algorithm: HashAlgorithm,
) -> Result<(), ProofFailure>
where
    K: ?Sized,
    V: SignatureVerifier<K> + ?Sized,
{
    let t_sig = decode_signature(&proof.transaction_sign, SignatureKind::Transaction)?;
    verifier
        .verify(key, algorithm, t_digest, &t_sig)
        .map_err(ProofFailure::TransactionSignature)?;

    let e_digest = digest(algorithm, &proof.epoch).map_err(ProofFailure::EpochDigest)?;
    let e_sig = decode_signature(&proof.epoch_sign, SignatureKind::Epoch)?;
    verifier
        .verify(key, algorithm, &e_digest, &e_sig)
        .map_err(ProofFailure::EpochSignature)
}

fn decode_signature(text: &str, kind: SignatureKind) -> Result<Vec<u8>, ProofFailure> {
    BASE64_ENGINE
        .decode(text)
        .map_err(|source| ProofFailure::Encoding { kind, source })
}

impl Marshal for ProofTuple {
    fn marshal(&self) -> Result<Vec<u8>, MarshalError> {
        Ok(proto::ProofTuple::from(self).encode_to_vec())
    }
}

impl Unmarshal for ProofTuple {
    fn unmarshal(bytes: &[u8]) -> Result<Self, MarshalError> {
        let wire = proto::ProofTuple::decode(bytes).map_err(|e| MarshalError::Wire(Box::new(e)))?;
        ProofTuple::try_from(wire)
    }
}
