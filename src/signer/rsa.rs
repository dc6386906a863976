//! Asymmetric (RSA) signing: RS256, RS384, RS512
//!
//! Signatures are RSASSA-PKCS1-v1_5 over the SHA-2 digest named by the
//! algorithm. Key material is handed over as PEM text: a public key is always
//! required, a private key (optionally passphrase-protected) only when the
//! signer is used for signing. PEM parsing happens lazily on first use; the
//! parsed handle is cached for the signer's lifetime.

use crate::error::SignerError;
use crate::signer::DigestAlgorithm;

use once_cell::sync::OnceCell;
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

/// RSA signer for the RS256/RS384/RS512 algorithms
///
/// Accepted private key PEM bodies: PKCS#8 (`BEGIN PRIVATE KEY`), encrypted
/// PKCS#8 (`BEGIN ENCRYPTED PRIVATE KEY`, requires the passphrase) and PKCS#1
/// (`BEGIN RSA PRIVATE KEY`). Public keys: SPKI (`BEGIN PUBLIC KEY`) or
/// PKCS#1 (`BEGIN RSA PUBLIC KEY`).
pub struct RsaSigner {
    digest: DigestAlgorithm,
    public_pem: String,
    private_pem: Option<Zeroizing<String>>,
    passphrase: Option<Zeroizing<String>>,
    public_key: OnceCell<RsaPublicKey>,
    private_key: OnceCell<RsaPrivateKey>,
}

impl RsaSigner {
    /// Create a signer from PEM key material
    ///
    /// Without a private key the signer can only verify; attempting to sign
    /// is a hard failure, not a silent no-op.
    pub fn new(
        digest: DigestAlgorithm,
        public_pem: impl Into<String>,
        private_pem: Option<String>,
        passphrase: Option<String>,
    ) -> Self {
        Self {
            digest,
            public_pem: public_pem.into(),
            private_pem: private_pem.map(Zeroizing::new),
            passphrase: passphrase.map(Zeroizing::new),
            public_key: OnceCell::new(),
            private_key: OnceCell::new(),
        }
    }

    /// The algorithm identifier placed in token headers
    pub fn name(&self) -> &'static str {
        match self.digest {
            DigestAlgorithm::Sha256 => "RS256",
            DigestAlgorithm::Sha384 => "RS384",
            DigestAlgorithm::Sha512 => "RS512",
        }
    }

    /// Sign `payload` with the private key, returning raw signature bytes
    pub fn sign(&self, payload: &str) -> Result<Vec<u8>, SignerError> {
        let key = self.private_key()?;

        let result = match self.digest {
            DigestAlgorithm::Sha256 => key.sign(
                Pkcs1v15Sign::new::<Sha256>(),
                &Sha256::digest(payload.as_bytes()),
            ),
            DigestAlgorithm::Sha384 => key.sign(
                Pkcs1v15Sign::new::<Sha384>(),
                &Sha384::digest(payload.as_bytes()),
            ),
            DigestAlgorithm::Sha512 => key.sign(
                Pkcs1v15Sign::new::<Sha512>(),
                &Sha512::digest(payload.as_bytes()),
            ),
        };

        result.map_err(|e| SignerError::Failed(format!("could not sign the payload: {e}")))
    }

    /// Check `signature` against `payload` with the public key
    ///
    /// A signature that simply does not match yields `Ok(false)`; unusable
    /// key material is an error.
    pub fn verify(&self, payload: &str, signature: &[u8]) -> Result<bool, SignerError> {
        let key = self.public_key()?;

        let result = match self.digest {
            DigestAlgorithm::Sha256 => key.verify(
                Pkcs1v15Sign::new::<Sha256>(),
                &Sha256::digest(payload.as_bytes()),
                signature,
            ),
            DigestAlgorithm::Sha384 => key.verify(
                Pkcs1v15Sign::new::<Sha384>(),
                &Sha384::digest(payload.as_bytes()),
                signature,
            ),
            DigestAlgorithm::Sha512 => key.verify(
                Pkcs1v15Sign::new::<Sha512>(),
                &Sha512::digest(payload.as_bytes()),
                signature,
            ),
        };

        Ok(result.is_ok())
    }

    /// Parse-and-cache the private key on first use
    fn private_key(&self) -> Result<&RsaPrivateKey, SignerError> {
        self.private_key.get_or_try_init(|| {
            let pem = self
                .private_pem
                .as_ref()
                .ok_or_else(|| {
                    SignerError::Failed("the private key is required for signing".to_string())
                })?
                .as_str();

            parse_private_pem(pem, self.passphrase.as_ref().map(|p| p.as_str()))
        })
    }

    /// Parse-and-cache the public key on first use
    fn public_key(&self) -> Result<&RsaPublicKey, SignerError> {
        self.public_key
            .get_or_try_init(|| parse_public_pem(&self.public_pem))
    }
}

// Key material never appears in debug output
impl std::fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSigner")
            .field("algorithm", &self.name())
            .field("can_sign", &self.private_pem.is_some())
            .finish_non_exhaustive()
    }
}

fn parse_private_pem(
    pem: &str,
    passphrase: Option<&str>,
) -> Result<RsaPrivateKey, SignerError> {
    if pem.contains("BEGIN ENCRYPTED PRIVATE KEY") {
        RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase.unwrap_or("").as_bytes())
            .map_err(|e| SignerError::Failed(format!("could not read the private key: {e}")))
    } else if pem.contains("BEGIN RSA PRIVATE KEY") {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .map_err(|e| SignerError::Failed(format!("could not read the private key: {e}")))
    } else {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .map_err(|e| SignerError::Failed(format!("could not read the private key: {e}")))
    }
}

fn parse_public_pem(pem: &str) -> Result<RsaPublicKey, SignerError> {
    if pem.contains("BEGIN RSA PUBLIC KEY") {
        RsaPublicKey::from_pkcs1_pem(pem)
            .map_err(|e| SignerError::Failed(format!("could not read the public key: {e}")))
    } else {
        RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| SignerError::Failed(format!("could not read the public key: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

    const PAYLOAD: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    fn generate_pem_pair() -> (String, String) {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("failed to encode private key")
            .to_string();
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("failed to encode public key");

        (public_pem, private_pem)
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (public_pem, private_pem) = generate_pem_pair();
        let signer = RsaSigner::new(
            DigestAlgorithm::Sha256,
            public_pem,
            Some(private_pem),
            None,
        );

        let signature = signer.sign(PAYLOAD).expect("signing failed");
        assert_eq!(signature.len(), 256);
        assert!(signer.verify(PAYLOAD, &signature).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let (public_pem, private_pem) = generate_pem_pair();
        let (other_public_pem, _) = generate_pem_pair();

        let signer = RsaSigner::new(
            DigestAlgorithm::Sha256,
            public_pem,
            Some(private_pem),
            None,
        );
        let other = RsaSigner::new(DigestAlgorithm::Sha256, other_public_pem, None, None);

        let signature = signer.sign(PAYLOAD).unwrap();
        assert!(!other.verify(PAYLOAD, &signature).unwrap());
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let (public_pem, private_pem) = generate_pem_pair();
        let signer = RsaSigner::new(
            DigestAlgorithm::Sha256,
            public_pem,
            Some(private_pem),
            None,
        );

        let signature = signer.sign(PAYLOAD).unwrap();
        assert!(!signer.verify("something.else", &signature).unwrap());
    }

    #[test]
    fn sign_without_private_key_fails() {
        let (public_pem, _) = generate_pem_pair();
        let signer = RsaSigner::new(DigestAlgorithm::Sha256, public_pem, None, None);

        let result = signer.sign(PAYLOAD);
        assert!(matches!(result, Err(SignerError::Failed(_))));
    }

    #[test]
    fn verify_with_garbage_public_key_fails() {
        let signer = RsaSigner::new(
            DigestAlgorithm::Sha256,
            "-----BEGIN PUBLIC KEY-----\nnot a key\n-----END PUBLIC KEY-----\n",
            None,
            None,
        );

        let result = signer.verify(PAYLOAD, &[0u8; 256]);
        assert!(matches!(result, Err(SignerError::Failed(_))));
    }

    #[test]
    fn digest_variants_produce_distinct_signatures() {
        let (public_pem, private_pem) = generate_pem_pair();

        let rs256 = RsaSigner::new(
            DigestAlgorithm::Sha256,
            public_pem.clone(),
            Some(private_pem.clone()),
            None,
        );
        let rs384 = RsaSigner::new(
            DigestAlgorithm::Sha384,
            public_pem.clone(),
            Some(private_pem.clone()),
            None,
        );
        let rs512 = RsaSigner::new(
            DigestAlgorithm::Sha512,
            public_pem,
            Some(private_pem),
            None,
        );

        let sig256 = rs256.sign(PAYLOAD).unwrap();
        let sig384 = rs384.sign(PAYLOAD).unwrap();
        let sig512 = rs512.sign(PAYLOAD).unwrap();

        assert_ne!(sig256, sig384);
        assert_ne!(sig384, sig512);

        // Each digest only verifies its own signature
        assert!(rs256.verify(PAYLOAD, &sig256).unwrap());
        assert!(!rs256.verify(PAYLOAD, &sig384).unwrap());
        assert!(!rs384.verify(PAYLOAD, &sig512).unwrap());
    }
}
