//! Symmetric (HMAC) signing: HS256, HS384, HS512

use crate::error::SignerError;
use crate::signer::DigestAlgorithm;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret key bytes, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct Secret(Vec<u8>);

/// Keyed-hash signer for the HS256/HS384/HS512 algorithms
///
/// Signing computes an HMAC of the payload with the configured secret and
/// returns the raw digest bytes. Verification recomputes the HMAC and compares
/// it against the presented signature in constant time, so the comparison
/// never leaks the position of the first mismatching byte.
#[derive(Clone)]
pub struct HmacSigner {
    digest: DigestAlgorithm,
    secret: Secret,
}

impl HmacSigner {
    /// Create a signer from a secret byte string and a digest
    pub fn new(digest: DigestAlgorithm, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            digest,
            secret: Secret(secret.into()),
        }
    }

    /// The algorithm identifier placed in token headers
    pub fn name(&self) -> &'static str {
        match self.digest {
            DigestAlgorithm::Sha256 => "HS256",
            DigestAlgorithm::Sha384 => "HS384",
            DigestAlgorithm::Sha512 => "HS512",
        }
    }

    /// Compute the HMAC of `payload`, returning raw digest bytes
    pub fn sign(&self, payload: &str) -> Result<Vec<u8>, SignerError> {
        match self.digest {
            DigestAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret.0)
                    .map_err(|e| SignerError::Failed(format!("invalid HMAC key: {e}")))?;
                mac.update(payload.as_bytes());
                Ok(mac.finalize().into_bytes().to_vec())
            }
            DigestAlgorithm::Sha384 => {
                let mut mac = Hmac::<Sha384>::new_from_slice(&self.secret.0)
                    .map_err(|e| SignerError::Failed(format!("invalid HMAC key: {e}")))?;
                mac.update(payload.as_bytes());
                Ok(mac.finalize().into_bytes().to_vec())
            }
            DigestAlgorithm::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(&self.secret.0)
                    .map_err(|e| SignerError::Failed(format!("invalid HMAC key: {e}")))?;
                mac.update(payload.as_bytes());
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }

    /// Recompute the HMAC and compare against `signature` in constant time
    pub fn verify(&self, payload: &str, signature: &[u8]) -> Result<bool, SignerError> {
        let expected = self.sign(payload)?;

        if signature.len() != expected.len() {
            return Ok(false);
        }

        Ok(constant_time_eq(signature, &expected))
    }
}

// Secrets never appear in debug output
impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &self.name())
            .finish_non_exhaustive()
    }
}
