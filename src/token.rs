//! Encoding and decoding of tokens
//!
//! [`encode`] builds `base64url(header) . base64url(claims) . base64url(sig)`
//! from a claim set and a signer registry; [`decode`] walks the reverse path
//! and only returns a claim set once the signature and every claim check have
//! passed. Both are pure, synchronous functions over borrowed inputs.

use crate::claims::{validator, ClaimSet};
use crate::error::{DecodeError, EncodeError, SignerError};
use crate::header::Header;
use crate::signer::SignerRegistry;
use crate::utils::base64url;

use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Encode a claim set into a signed token
///
/// The signer appended to the registry *last* signs the token — appending a
/// key makes it the current signing key, while the earlier entries stay
/// resolvable for verification. The header records the signer's algorithm
/// name and registry index (`kid`).
///
/// # Errors
///
/// Fails with [`EncodeError::NoKeys`] on an empty registry, and with the
/// corresponding serialization/signing variant when any later step fails. No
/// partial token is ever returned.
///
/// # Example
///
/// ```
/// use jwkit::{encode, ClaimSet, SignerRegistry};
///
/// let registry = SignerRegistry::new().add_hs256(b"s3cr3t".to_vec());
/// let claims = ClaimSet::new().issuer("app").audience("users");
///
/// let token = encode(&claims, &registry)?;
/// assert_eq!(token.split('.').count(), 3);
/// # Ok::<(), jwkit::EncodeError>(())
/// ```
pub fn encode(claims: &ClaimSet, registry: &SignerRegistry) -> Result<String, EncodeError> {
    if registry.is_empty() {
        return Err(EncodeError::NoKeys);
    }

    // The latest appended signer is the current signing key
    let key_id = registry.len() - 1;
    let signer = registry.get(key_id).ok_or(EncodeError::NoKeys)?;

    trace!(alg = signer.name(), kid = key_id, "encoding token");

    let header = Header::new()
        .token_type("JWT")
        .algorithm(signer.name())
        .key_id(key_id as u64);

    let header_json =
        serde_json::to_string(&header.to_fields()).map_err(|_| EncodeError::HeaderSerialization)?;
    let claims_json =
        serde_json::to_string(&claims.to_fields()).map_err(|_| EncodeError::ClaimsSerialization)?;

    let payload = format!(
        "{}.{}",
        base64url::encode(header_json.as_bytes()),
        base64url::encode(claims_json.as_bytes())
    );

    let signature = match signer.sign(&payload) {
        Ok(signature) => signature,
        Err(SignerError::Failed(msg)) => return Err(EncodeError::Signing(msg)),
        Err(SignerError::Unsupported(msg)) => return Err(EncodeError::SigningUnsupported(msg)),
    };

    Ok(format!("{payload}.{}", base64url::encode(&signature)))
}

/// Decode a token and return its validated claim set
///
/// The pipeline: split into three segments, rebuild the header, resolve the
/// signer through the header's `kid`, require the header's `alg` to name that
/// signer's algorithm, verify the signature over the raw
/// `header.claims` substring, rebuild the claims and run the claim checks
/// against `expected` (see [`ClaimSet`]).
///
/// The `alg` check runs *before* any signature verification: the algorithm is
/// derived from the signer bound to `kid`, never trusted from the header
/// alone, so a token cannot relabel itself to coerce a weaker or mismatched
/// verification path.
///
/// When `expected` is `None` the claims are matched against an empty
/// template — a token carrying `iss`, `aud` or `typ` then fails with the
/// corresponding mismatch. Supply a template with the values you accept.
///
/// # Errors
///
/// Every failing step maps to a distinct [`DecodeError`] variant; the first
/// failure wins and nothing is returned.
pub fn decode(
    token: &str,
    registry: &SignerRegistry,
    expected: Option<&ClaimSet>,
) -> Result<ClaimSet, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(DecodeError::Malformed);
    }
    let (header_b64, claims_b64, signature_b64) = (parts[0], parts[1], parts[2]);

    let header_json = base64url::decode(header_b64).map_err(|_| DecodeError::HeaderEncoding)?;
    let header_fields: Map<String, Value> =
        serde_json::from_slice(&header_json).map_err(|_| DecodeError::HeaderDeserialization)?;
    let header = Header::from_fields(header_fields).map_err(|field| {
        debug!(field, "header field has the wrong type");
        DecodeError::HeaderDeserialization
    })?;

    let signature =
        base64url::decode(signature_b64).map_err(|_| DecodeError::SignatureEncoding)?;

    let key_id = header.get_key_id().ok_or(DecodeError::KeyNotDefined)?;
    let signer = usize::try_from(key_id)
        .ok()
        .and_then(|index| registry.get(index))
        .ok_or(DecodeError::KeyNotDefined)?;

    // The anti-confusion check: the claimed algorithm must equal the one
    // bound to this key id. Runs before any signature verification.
    if header.get_algorithm() != Some(signer.name()) {
        debug!(
            kid = key_id,
            claimed = header.get_algorithm().unwrap_or_default(),
            bound = signer.name(),
            "algorithm mismatch"
        );
        return Err(DecodeError::AlgorithmMismatch);
    }

    let payload = format!("{header_b64}.{claims_b64}");
    match signer.verify(&payload, &signature) {
        Ok(true) => {}
        Ok(false) => return Err(DecodeError::InvalidSignature),
        Err(SignerError::Failed(msg)) => return Err(DecodeError::Verification(msg)),
        Err(SignerError::Unsupported(msg)) => {
            return Err(DecodeError::VerificationUnsupported(msg))
        }
    }

    let claims_json = base64url::decode(claims_b64).map_err(|_| DecodeError::ClaimsEncoding)?;
    let claim_fields: Map<String, Value> =
        serde_json::from_slice(&claims_json).map_err(|_| DecodeError::ClaimsDeserialization)?;
    let claims = ClaimSet::from_fields(claim_fields).map_err(|field| {
        debug!(field, "claim has the wrong type");
        DecodeError::ClaimsDeserialization
    })?;

    validator::validate(&claims, expected).inspect_err(|err| {
        debug!(code = err.code(), "claim validation rejected the token");
    })?;

    Ok(claims)
}
