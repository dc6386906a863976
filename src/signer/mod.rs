//! Signing algorithms and the key registry
//!
//! Every token is signed and verified by a [`Signer`]: a closed set of
//! algorithm variants behind one capability surface (`name`, `sign`,
//! `verify`). Keeping the set closed — rather than an open plugin registry —
//! is what makes the algorithm-confusion check in
//! [`decode`](crate::token::decode) sound: the algorithm a key id resolves to
//! is fixed at construction time and can never be swapped by token content.
//!
//! [`SignerRegistry`] is the ordered collection the encode/decode pipeline
//! works against. Order matters: encode always signs with the *last* appended
//! signer, and decode resolves signers by the numeric index (`kid`) stored in
//! the token header.

pub mod hmac;
pub mod rsa;

pub use hmac::HmacSigner;
pub use rsa::RsaSigner;

use crate::error::SignerError;

/// SHA-2 digest selector shared by the HMAC and RSA signer families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256 (HS256 / RS256)
    Sha256,
    /// SHA-384 (HS384 / RS384)
    Sha384,
    /// SHA-512 (HS512 / RS512)
    Sha512,
}

/// One configured signing algorithm with its key material
///
/// The `None` variant produces and accepts only empty signatures. It exists
/// for explicitly unsigned tokens; nothing ever selects it implicitly — it
/// participates only when a caller registers it.
#[derive(Debug)]
pub enum Signer {
    /// Unsigned tokens: empty signature, by explicit opt-in only
    None,

    /// Keyed-hash signing (HS256/HS384/HS512)
    Hmac(HmacSigner),

    /// RSA PKCS#1 v1.5 signing (RS256/RS384/RS512)
    Rsa(RsaSigner),
}

impl Signer {
    /// The algorithm identifier embedded in token headers
    pub fn name(&self) -> &'static str {
        match self {
            Signer::None => "none",
            Signer::Hmac(signer) => signer.name(),
            Signer::Rsa(signer) => signer.name(),
        }
    }

    /// Produce the raw signature bytes for `payload`
    pub fn sign(&self, payload: &str) -> Result<Vec<u8>, SignerError> {
        match self {
            Signer::None => Ok(Vec::new()),
            Signer::Hmac(signer) => signer.sign(payload),
            Signer::Rsa(signer) => signer.sign(payload),
        }
    }

    /// Check `signature` against `payload`
    ///
    /// `Ok(false)` means the signature does not match; `Err` means the signer
    /// could not perform the check at all.
    pub fn verify(&self, payload: &str, signature: &[u8]) -> Result<bool, SignerError> {
        match self {
            Signer::None => Ok(signature.is_empty()),
            Signer::Hmac(signer) => signer.verify(payload, signature),
            Signer::Rsa(signer) => signer.verify(payload, signature),
        }
    }
}

/// Ordered collection of configured signers
///
/// Construct once, then treat as read-only: encode and decode borrow the
/// registry and never mutate it. The registry must hold at least one signer
/// before [`encode`](crate::token::encode) is called.
///
/// # Example
///
/// ```
/// use jwkit::SignerRegistry;
///
/// let registry = SignerRegistry::new()
///     .add_hs256(b"old-secret".to_vec())
///     .add_hs256(b"current-secret".to_vec());
///
/// // encode signs with "current-secret" (the last appended key);
/// // tokens signed with "old-secret" still verify through kid 0.
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SignerRegistry {
    signers: Vec<Signer>,
}

impl SignerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-built signer
    pub fn add(mut self, signer: Signer) -> Self {
        self.signers.push(signer);
        self
    }

    /// Append the none signer (explicitly unsigned tokens)
    pub fn add_none(self) -> Self {
        self.add(Signer::None)
    }

    /// Append an HS256 signer with the given secret
    pub fn add_hs256(self, secret: impl Into<Vec<u8>>) -> Self {
        self.add(Signer::Hmac(HmacSigner::new(
            DigestAlgorithm::Sha256,
            secret,
        )))
    }

    /// Append an HS384 signer with the given secret
    pub fn add_hs384(self, secret: impl Into<Vec<u8>>) -> Self {
        self.add(Signer::Hmac(HmacSigner::new(
            DigestAlgorithm::Sha384,
            secret,
        )))
    }

    /// Append an HS512 signer with the given secret
    pub fn add_hs512(self, secret: impl Into<Vec<u8>>) -> Self {
        self.add(Signer::Hmac(HmacSigner::new(
            DigestAlgorithm::Sha512,
            secret,
        )))
    }

    /// Append an RS256 signer
    ///
    /// `private_pem` (with its optional `passphrase`) is only needed when the
    /// registry will be used for encoding.
    pub fn add_rs256(
        self,
        public_pem: impl Into<String>,
        private_pem: Option<String>,
        passphrase: Option<String>,
    ) -> Self {
        self.add(Signer::Rsa(RsaSigner::new(
            DigestAlgorithm::Sha256,
            public_pem,
            private_pem,
            passphrase,
        )))
    }

    /// Append an RS384 signer
    pub fn add_rs384(
        self,
        public_pem: impl Into<String>,
        private_pem: Option<String>,
        passphrase: Option<String>,
    ) -> Self {
        self.add(Signer::Rsa(RsaSigner::new(
            DigestAlgorithm::Sha384,
            public_pem,
            private_pem,
            passphrase,
        )))
    }

    /// Append an RS512 signer
    pub fn add_rs512(
        self,
        public_pem: impl Into<String>,
        private_pem: Option<String>,
        passphrase: Option<String>,
    ) -> Self {
        self.add(Signer::Rsa(RsaSigner::new(
            DigestAlgorithm::Sha512,
            public_pem,
            private_pem,
            passphrase,
        )))
    }

    /// Number of configured signers
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the registry holds no signers
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Look up a signer by its key id (registry position)
    pub fn get(&self, index: usize) -> Option<&Signer> {
        self.signers.get(index)
    }
}
