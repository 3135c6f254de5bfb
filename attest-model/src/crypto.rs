//! Digest and signature primitives for attestations.
//!
//! Every hash and every signature check in the workspace goes through this
//! module.
//!
//! # Primitives
//!
//! | Primitive   | Algorithm                 | Purpose                               |
//! |-------------|---------------------------|---------------------------------------|
//! | Digest      | SHA-256 (default, 32 B)   | Transaction and epoch record digests  |
//! |             | SHA-512 (64 B), BLAKE3 (32 B) | Alternatives via `ProofConfig`    |
//! | Signature   | Ed25519 (64 B)            | Built-in signer/verifier              |
//!
//! Other signature schemes plug in through [`WitnessSigner`] and
//! [`SignatureVerifier`].

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use thiserror::Error;

use crate::marshal::{Marshal, MarshalError};
use crate::types::{Digest, PubKey, Signature};

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Hash algorithm used for record digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
    Blake3,
}

impl HashAlgorithm {
    /// Native output length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Hash raw bytes.
    pub fn hash(self, data: &[u8]) -> Digest {
        let mut out = match self {
            HashAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
            HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        };
        // Backends never pad today; the digest length is still part of the contract.
        out.truncate(self.output_len());
        Digest(out)
    }
}

/// Compute `hash(marshal(record))`.
pub fn digest<M: Marshal + ?Sized>(
    algorithm: HashAlgorithm,
    record: &M,
) -> Result<Digest, MarshalError> {
    let bytes = record.marshal()?;
    Ok(algorithm.hash(&bytes))
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Signing failure reported by a [`WitnessSigner`].
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Ed25519 signing failed: {0}")]
    Ed25519(#[from] ed25519_dalek::SignatureError),

    #[error("signer unavailable: {0}")]
    Unavailable(String),
}

/// A private key able to sign digests.
///
/// `rng` is offered for randomized schemes; deterministic schemes ignore it.
pub trait WitnessSigner {
    fn sign_digest(
        &self,
        rng: &mut dyn RngCore,
        algorithm: HashAlgorithm,
        digest: &Digest,
    ) -> Result<Vec<u8>, SigningError>;
}

impl WitnessSigner for ed25519_dalek::SigningKey {
    fn sign_digest(
        &self,
        _rng: &mut dyn RngCore,
        _algorithm: HashAlgorithm,
        digest: &Digest,
    ) -> Result<Vec<u8>, SigningError> {
        use ed25519_dalek::Signer;
        let signature = self.try_sign(digest.as_bytes())?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Public key of an Ed25519 signing key as a strong type.
pub fn public_key(signing_key: &ed25519_dalek::SigningKey) -> PubKey {
    PubKey(signing_key.verifying_key().to_bytes())
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// A signature did not validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("malformed signature: expected {expected} bytes, got {actual}")]
    SignatureLength { expected: usize, actual: usize },
}

/// Checks a signature over a digest against a public key of type `K`.
///
/// Any `Fn(&K, HashAlgorithm, &Digest, &[u8]) -> Result<(), VerificationError>`
/// closure is a verifier.
pub trait SignatureVerifier<K: ?Sized> {
    fn verify(
        &self,
        key: &K,
        algorithm: HashAlgorithm,
        digest: &Digest,
        signature: &[u8],
    ) -> Result<(), VerificationError>;
}

impl<K: ?Sized, F> SignatureVerifier<K> for F
where
    F: Fn(&K, HashAlgorithm, &Digest, &[u8]) -> Result<(), VerificationError>,
{
    fn verify(
        &self,
        key: &K,
        algorithm: HashAlgorithm,
        digest: &Digest,
        signature: &[u8],
    ) -> Result<(), VerificationError> {
        self(key, algorithm, digest, signature)
    }
}

/// Ed25519 verifier for [`PubKey`] and `ed25519_dalek::VerifyingKey`.
///
/// `strict` switches to `verify_strict()` (rejects small-order keys and
/// non-canonical S).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier {
    pub strict: bool,
}

impl Ed25519Verifier {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl SignatureVerifier<ed25519_dalek::VerifyingKey> for Ed25519Verifier {
    fn verify(
        &self,
        key: &ed25519_dalek::VerifyingKey,
        _algorithm: HashAlgorithm,
        digest: &Digest,
        signature: &[u8],
    ) -> Result<(), VerificationError> {
        use ed25519_dalek::Verifier;
        let sig = Signature::try_from(signature).map_err(|_| VerificationError::SignatureLength {
            expected: Signature::LEN,
            actual: signature.len(),
        })?;
        let sig = ed25519_dalek::Signature::from_bytes(&sig.0);
        let result = if self.strict {
            key.verify_strict(digest.as_bytes(), &sig)
        } else {
            key.verify(digest.as_bytes(), &sig)
        };
        result.map_err(|_| VerificationError::InvalidSignature)
    }
}

impl SignatureVerifier<PubKey> for Ed25519Verifier {
    fn verify(
        &self,
        key: &PubKey,
        algorithm: HashAlgorithm,
        digest: &Digest,
        signature: &[u8],
    ) -> Result<(), VerificationError> {
        let vk = verifying_key(key)?;
        SignatureVerifier::<ed25519_dalek::VerifyingKey>::verify(self, &vk, algorithm, digest, signature)
    }
}

/// Deserialize a `PubKey` into an Ed25519 `VerifyingKey`.
///
/// Fails if the 32 bytes are not a valid curve point.
pub fn verifying_key(pubkey: &PubKey) -> Result<ed25519_dalek::VerifyingKey, VerificationError> {
    ed25519_dalek::VerifyingKey::from_bytes(&pubkey.0)
        .map_err(|_| VerificationError::InvalidPublicKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::EpochRecord;
    use crate::transaction::Transaction;
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;
    use sha2::Digest as _;

    const ALL: [HashAlgorithm; 3] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Blake3,
    ];

    #[test]
    fn digest_length_matches_algorithm() {
        let records = [
            EpochRecord::default(),
            EpochRecord::new("n".repeat(4096), i32::MAX, 1e300),
        ];
        for algorithm in ALL {
            for record in &records {
                let d = digest(algorithm, record).unwrap();
                assert_eq!(d.len(), algorithm.output_len(), "{algorithm:?}");
            }
        }
    }

    #[test]
    fn digest_is_hash_not_serialized_bytes() {
        let tx = Transaction::new(10, 1.0, 5.0, "A", "B");
        let serial = tx.marshal().unwrap();
        let d = digest(HashAlgorithm::Sha256, &tx).unwrap();
        assert_eq!(d.as_bytes(), sha2::Sha256::digest(&serial).as_slice());
        assert_ne!(d.as_bytes(), &serial[..serial.len().min(32)]);
    }

    #[test]
    fn digest_is_deterministic() {
        let a = Transaction::new(10, 1.0, 5.0, "A", "B");
        let b = a.clone();
        for algorithm in ALL {
            assert_eq!(digest(algorithm, &a).unwrap(), digest(algorithm, &b).unwrap());
        }
    }

    #[test]
    fn algorithms_disagree() {
        let tx = Transaction::new(10, 1.0, 5.0, "A", "B");
        let sha = digest(HashAlgorithm::Sha256, &tx).unwrap();
        let blake = digest(HashAlgorithm::Blake3, &tx).unwrap();
        assert_ne!(sha, blake);
    }

    #[test]
    fn digest_surfaces_marshal_error() {
        let tx = Transaction::new(10, f64::NAN, 5.0, "A", "B");
        assert!(matches!(
            digest(HashAlgorithm::Sha256, &tx),
            Err(MarshalError::Encode(_))
        ));
    }

    #[test]
    fn ed25519_sign_and_verify() {
        let key = SigningKey::from_bytes(&[42u8; 32]);
        let d = HashAlgorithm::Sha256.hash(b"payload");
        let sig = key.sign_digest(&mut OsRng, HashAlgorithm::Sha256, &d).unwrap();
        assert_eq!(sig.len(), Signature::LEN);

        let verifier = Ed25519Verifier::default();
        assert!(verifier.verify(&public_key(&key), HashAlgorithm::Sha256, &d, &sig).is_ok());
        assert!(Ed25519Verifier::strict()
            .verify(&key.verifying_key(), HashAlgorithm::Sha256, &d, &sig)
            .is_ok());
    }

    #[test]
    fn ed25519_rejects_wrong_key_and_tampering() {
        let key = SigningKey::from_bytes(&[42u8; 32]);
        let other = SigningKey::from_bytes(&[43u8; 32]);
        let d = HashAlgorithm::Sha256.hash(b"payload");
        let mut sig = key.sign_digest(&mut OsRng, HashAlgorithm::Sha256, &d).unwrap();
        let verifier = Ed25519Verifier::default();

        assert_eq!(
            verifier.verify(&public_key(&other), HashAlgorithm::Sha256, &d, &sig),
            Err(VerificationError::InvalidSignature)
        );

        let other_digest = HashAlgorithm::Sha256.hash(b"other payload");
        assert!(verifier
            .verify(&public_key(&key), HashAlgorithm::Sha256, &other_digest, &sig)
            .is_err());

        sig[10] ^= 0x01;
        assert!(verifier.verify(&public_key(&key), HashAlgorithm::Sha256, &d, &sig).is_err());
    }

    #[test]
    fn ed25519_rejects_short_signature() {
        let key = SigningKey::from_bytes(&[1u8; 32]);
        let d = HashAlgorithm::Sha256.hash(b"x");
        assert_eq!(
            Ed25519Verifier::default().verify(&public_key(&key), HashAlgorithm::Sha256, &d, &[]),
            Err(VerificationError::SignatureLength { expected: 64, actual: 0 })
        );
    }

    #[test]
    fn closure_is_a_verifier() {
        let accept_all =
            |_: &str, _: HashAlgorithm, _: &Digest, _: &[u8]| -> Result<(), VerificationError> { Ok(()) };
        let d = HashAlgorithm::Blake3.hash(b"x");
        assert!(SignatureVerifier::<str>::verify(&accept_all, "key", HashAlgorithm::Blake3, &d, b"sig").is_ok());
    }
}
