//! Error types for token encoding and decoding
//!
//! Failures surface as one of two top-level kinds: [`EncodeError`] from
//! [`encode`](crate::token::encode) and [`DecodeError`] from
//! [`decode`](crate::token::decode). Each variant carries a fixed message and a
//! stable numeric code (see [`EncodeError::code`] / [`DecodeError::code`]), so
//! callers can match on codes across releases.
//!
//! [`SignerError`] originates inside signer implementations and never escapes
//! the orchestrator: it is re-wrapped into the corresponding encode/decode
//! variant at the boundary.

/// Errors that can occur while encoding a token
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The signer registry is empty (code 1)
    NoKeys,

    /// The header could not be serialized to JSON (code 2)
    HeaderSerialization,

    /// The claim set could not be serialized to JSON (code 3)
    ClaimsSerialization,

    /// The selected signer failed to produce a signature (code 7)
    Signing(String),

    /// The selected signer's algorithm is not supported (code 8)
    SigningUnsupported(String),
}

impl EncodeError {
    /// Stable numeric code for this error
    pub fn code(&self) -> u8 {
        match self {
            EncodeError::NoKeys => 1,
            EncodeError::HeaderSerialization => 2,
            EncodeError::ClaimsSerialization => 3,
            EncodeError::Signing(_) => 7,
            EncodeError::SigningUnsupported(_) => 8,
        }
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::NoKeys => {
                write!(f, "Needs at least 1 signing key to encode")
            }
            EncodeError::HeaderSerialization => {
                write!(f, "Could not JSON encode the header")
            }
            EncodeError::ClaimsSerialization => {
                write!(f, "Could not JSON encode the claim set")
            }
            EncodeError::Signing(msg) => {
                write!(f, "Could not create a signature: {msg}")
            }
            EncodeError::SigningUnsupported(msg) => {
                write!(
                    f,
                    "Could not create a signature, because the algorithm is not supported: {msg}"
                )
            }
        }
    }
}

/// Errors that can occur while decoding a token
///
/// Decode is fail-fast: the first failing step wins and no partially
/// validated claim set is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The token is not three dot-separated segments (code 9)
    Malformed,

    /// The header segment is not a JSON object (code 11)
    HeaderDeserialization,

    /// The claim-set segment is not a JSON object (code 12)
    ClaimsDeserialization,

    /// The header segment is not valid base64url (code 13)
    HeaderEncoding,

    /// The claim-set segment is not valid base64url (code 14)
    ClaimsEncoding,

    /// The signature segment is not valid base64url (code 15)
    SignatureEncoding,

    /// The signature does not match the token contents (code 16)
    InvalidSignature,

    /// The `nbf` claim lies in the future (code 17)
    NotYetActive,

    /// The `exp` claim lies in the past (code 18)
    Expired,

    /// The `iss` claim does not equal the expected issuer (code 19)
    IssuerMismatch,

    /// The `aud` claim does not equal the expected audience (code 20)
    AudienceMismatch,

    /// The header `alg` does not name the algorithm of the signer bound to
    /// the header's key id (code 21)
    AlgorithmMismatch,

    /// The header's key id does not resolve to a configured signer (code 22)
    KeyNotDefined,

    /// The `typ` claim does not equal the expected type (code 23)
    TypeMismatch,

    /// The `iat` claim lies in the future (code 24)
    IssuedInFuture,

    /// The signer failed while checking the signature (code 25)
    Verification(String),

    /// The signer's algorithm is not supported for verification (code 26)
    VerificationUnsupported(String),
}

impl DecodeError {
    /// Stable numeric code for this error
    pub fn code(&self) -> u8 {
        match self {
            DecodeError::Malformed => 9,
            DecodeError::HeaderDeserialization => 11,
            DecodeError::ClaimsDeserialization => 12,
            DecodeError::HeaderEncoding => 13,
            DecodeError::ClaimsEncoding => 14,
            DecodeError::SignatureEncoding => 15,
            DecodeError::InvalidSignature => 16,
            DecodeError::NotYetActive => 17,
            DecodeError::Expired => 18,
            DecodeError::IssuerMismatch => 19,
            DecodeError::AudienceMismatch => 20,
            DecodeError::AlgorithmMismatch => 21,
            DecodeError::KeyNotDefined => 22,
            DecodeError::TypeMismatch => 23,
            DecodeError::IssuedInFuture => 24,
            DecodeError::Verification(_) => 25,
            DecodeError::VerificationUnsupported(_) => 26,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Malformed => {
                write!(f, "The token is not correctly formatted")
            }
            DecodeError::HeaderDeserialization => {
                write!(f, "Could not JSON decode the header")
            }
            DecodeError::ClaimsDeserialization => {
                write!(f, "Could not JSON decode the claim set")
            }
            DecodeError::HeaderEncoding => {
                write!(f, "Could not base64 decode the header")
            }
            DecodeError::ClaimsEncoding => {
                write!(f, "Could not base64 decode the claim set")
            }
            DecodeError::SignatureEncoding => {
                write!(f, "Could not base64 decode the signature")
            }
            DecodeError::InvalidSignature => {
                write!(f, "The token is invalid")
            }
            DecodeError::NotYetActive => {
                write!(f, "The token is not active yet")
            }
            DecodeError::Expired => {
                write!(f, "The token has expired")
            }
            DecodeError::IssuerMismatch => {
                write!(f, "The token issuer does not match")
            }
            DecodeError::AudienceMismatch => {
                write!(f, "The token audience does not match")
            }
            DecodeError::AlgorithmMismatch => {
                write!(
                    f,
                    "The algorithm from the header does not match with the signer defined for the key id"
                )
            }
            DecodeError::KeyNotDefined => {
                write!(f, "The key defined in the header is not defined")
            }
            DecodeError::TypeMismatch => {
                write!(f, "The token type does not match")
            }
            DecodeError::IssuedInFuture => {
                write!(f, "The token has been issued in the future")
            }
            DecodeError::Verification(msg) => {
                write!(f, "Could not validate the signature: {msg}")
            }
            DecodeError::VerificationUnsupported(msg) => {
                write!(
                    f,
                    "Could not validate the signature, because the algorithm is not supported: {msg}"
                )
            }
        }
    }
}

/// Failures raised inside signer implementations
///
/// These never reach callers of [`encode`](crate::token::encode) or
/// [`decode`](crate::token::decode) directly; the orchestrator re-wraps them
/// into [`EncodeError::Signing`] / [`EncodeError::SigningUnsupported`] on the
/// encode path and [`DecodeError::Verification`] /
/// [`DecodeError::VerificationUnsupported`] on the decode path.
#[derive(Debug, Clone, PartialEq)]
pub enum SignerError {
    /// The signer could not complete the operation (bad key material,
    /// missing private key, underlying crypto failure)
    Failed(String),

    /// The signer's algorithm is not available
    Unsupported(String),
}

impl std::fmt::Display for SignerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignerError::Failed(msg) => write!(f, "{msg}"),
            SignerError::Unsupported(msg) => write!(f, "{msg}"),
        }
    }
}

/// A custom claim name collides with a standard claim field
///
/// Raised by [`ClaimSet::custom`](crate::claims::ClaimSet::custom) when
/// application code tries to register an extension claim under a reserved
/// name. This is a programmer error, not a runtime token failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedClaim {
    name: String,
}

impl ReservedClaim {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The rejected claim name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ReservedClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Claim with the name '{}' is reserved", self.name)
    }
}

/// A custom header name collides with a standard header field
///
/// Raised by [`Header::custom`](crate::header::Header::custom); same contract
/// as [`ReservedClaim`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedHeader {
    name: String,
}

impl ReservedHeader {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The rejected header name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ReservedHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Header with the name '{}' is reserved", self.name)
    }
}

impl std::error::Error for EncodeError {}
impl std::error::Error for DecodeError {}
impl std::error::Error for SignerError {}
impl std::error::Error for ReservedClaim {}
impl std::error::Error for ReservedHeader {}
