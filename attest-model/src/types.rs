//! Strong types for key, signature and digest bytes
//!
//! Fixed-size keys and signatures are generated by `define_bytes!`. Digests
//! are variable length because their size follows the configured
//! [`HashAlgorithm`](crate::crypto::HashAlgorithm).

use std::fmt;

/// Defines a fixed-size byte array newtype with hex formatting and the usual
/// conversions.
macro_rules! define_bytes {
    ($name:ident, $len:expr, $doc:expr, [$($derives:ident),*]) => {
        #[doc = $doc]
        #[derive(Clone, Copy, $($derives),*)]
        #[repr(transparent)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Length in bytes.
            pub const LEN: usize = $len;

            /// Returns the inner bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(wrapper: $name) -> [u8; $len] {
                wrapper.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = BytesError;
            fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
                <[u8; $len]>::try_from(slice)
                    .map(Self)
                    .map_err(|_| BytesError::Length { expected: $len, actual: slice.len() })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

/// Errors from parsing raw bytes into a strong type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BytesError {
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}

define_bytes!(
    PubKey,
    32,
    "32-byte Ed25519 public key",
    [PartialEq, Eq, Hash, Default, PartialOrd, Ord]
);

define_bytes!(Signature, 64, "64-byte Ed25519 signature", [PartialEq, Eq]);

/// Output of a [`HashAlgorithm`](crate::crypto::HashAlgorithm).
///
/// Always exactly the algorithm's native output length; only
/// [`crate::crypto::HashAlgorithm::hash`] constructs one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest(pub(crate) Vec<u8>);

impl Digest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}
