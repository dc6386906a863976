//! # jwkit - Compact Signed Token Issuing and Verification
//!
//! > Minimal JSON Web Token (JWT/JWS) encoding and decoding for Rust, built
//! > around an ordered registry of signing keys.
//!
//! **jwkit** issues and verifies the compact three-segment token format:
//! a header, a claim set and a signature, each base64url-encoded and joined
//! with dots. A party holding a key asserts a set of claims; any holder of
//! the matching key can verify those claims were not altered.
//!
//! ## Overview
//!
//! Keys live in a [`SignerRegistry`] — an ordered collection where position
//! is identity. [`encode`] always signs with the *last* appended signer and
//! records its index as the header's `kid`; [`decode`] resolves the signer by
//! that index again. Rotating keys is appending a new one: old tokens keep
//! verifying through their recorded index, new tokens pick up the new key.
//!
//! Three signer families are built in, as a closed set:
//!
//! - **none** — explicitly unsigned tokens (empty signature, opt-in only)
//! - **HMAC** (HS256/HS384/HS512) — keyed hash with a shared secret
//! - **RSA** (RS256/RS384/RS512) — PKCS#1 v1.5 over PEM key material
//!
//! ## Quick Start
//!
//! ```
//! use jwkit::{decode, encode, ClaimSet, SignerRegistry};
//! use std::time::{Duration, SystemTime};
//!
//! let registry = SignerRegistry::new().add_hs256(b"s3cr3t".to_vec());
//!
//! let claims = ClaimSet::new()
//!     .issuer("app")
//!     .audience("users")
//!     .expiration(SystemTime::now() + Duration::from_secs(3600));
//!
//! let token = encode(&claims, &registry)?;
//!
//! // The expected-claims template names the issuer and audience we accept
//! let expected = ClaimSet::new().issuer("app").audience("users");
//! let decoded = decode(&token, &registry, Some(&expected))?;
//!
//! assert_eq!(decoded.get_issuer(), Some("app"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! The algorithm used for verification is derived from the signer bound to
//! the token's `kid`, never from the header's `alg` alone. A token whose
//! `alg` names anything other than that signer's algorithm is rejected
//! before signature verification is attempted, so an attacker cannot relabel
//! an RSA-signed token as HMAC-signed and feed the public key in as an HMAC
//! secret.
//!
//! ### Timing Attack Protection
//!
//! HMAC verification compares signatures with the
//! [`constant_time_eq`](https://crates.io/crates/constant_time_eq) crate:
//! the comparison never exits early on the first mismatching byte.
//!
//! ### Unsigned Tokens Are Opt-In
//!
//! The `none` algorithm participates only when a caller registers it
//! explicitly; nothing selects it implicitly, and its tokens verify only
//! when the signature segment is empty.
//!
//! ### Strict Claim Matching
//!
//! Decoding without an expected-claims template matches against an *empty*
//! template: a token carrying `iss`, `aud` or `typ` fails closed until the
//! caller states which values it accepts.
//!
//! ## Errors
//!
//! Encoding fails with [`EncodeError`], decoding with [`DecodeError`]; every
//! variant carries a fixed message and a stable numeric code. Both paths are
//! fail-fast — on decode, either a fully validated [`ClaimSet`] comes back
//! or nothing does.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) — JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) — JSON Web Token (JWT)

pub mod claims;
pub mod error;
pub mod header;
pub mod signer;
pub mod token;
pub mod utils;

pub use claims::ClaimSet;
pub use error::{DecodeError, EncodeError, ReservedClaim, ReservedHeader, SignerError};
pub use header::Header;
pub use signer::{DigestAlgorithm, HmacSigner, RsaSigner, Signer, SignerRegistry};
pub use token::{decode, encode};
