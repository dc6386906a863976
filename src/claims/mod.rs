//! Claim sets: the typed payload of a token
//!
//! [`ClaimSet`] carries the standard claims from RFC 7519 Section 4.1 plus a
//! strictly separate extension map for application claims. It is a builder on
//! the encode side and the read-only result of [`decode`](crate::token::decode).

pub(crate) mod validator;

use crate::error::ReservedClaim;

use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claim names that cannot be used as extension keys
const RESERVED: [&str; 8] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti", "typ"];

/// A set of claims asserted by a token
///
/// Temporal claims (`exp`, `nbf`, `iat`) are held as Unix timestamps at
/// second precision; setters taking [`SystemTime`] truncate sub-second parts.
/// Unset claims are omitted from the serialized payload entirely.
///
/// # Example
///
/// ```
/// use jwkit::ClaimSet;
/// use std::time::{Duration, SystemTime};
///
/// let claims = ClaimSet::new()
///     .issuer("app")
///     .audience("users")
///     .expiration(SystemTime::now() + Duration::from_secs(3600));
///
/// assert_eq!(claims.get_issuer(), Some("app"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet {
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<String>,
    expiration: Option<i64>,
    not_before: Option<i64>,
    issued_at: Option<i64>,
    token_id: Option<String>,
    token_type: Option<String>,
    custom: Map<String, Value>,
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issuer (`iss`)
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    /// Set the subject (`sub`)
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.subject = Some(sub.into());
        self
    }

    /// Set the audience (`aud`)
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.audience = Some(aud.into());
        self
    }

    /// Set the expiration time (`exp`), truncated to whole seconds
    pub fn expiration(self, exp: SystemTime) -> Self {
        self.expiration_timestamp(unix_seconds(exp))
    }

    /// Set the expiration time (`exp`) from a Unix timestamp
    pub fn expiration_timestamp(mut self, exp: i64) -> Self {
        self.expiration = Some(exp);
        self
    }

    /// Set the not-before time (`nbf`), truncated to whole seconds
    pub fn not_before(self, nbf: SystemTime) -> Self {
        self.not_before_timestamp(unix_seconds(nbf))
    }

    /// Set the not-before time (`nbf`) from a Unix timestamp
    pub fn not_before_timestamp(mut self, nbf: i64) -> Self {
        self.not_before = Some(nbf);
        self
    }

    /// Set the issued-at time (`iat`), truncated to whole seconds
    pub fn issued_at(self, iat: SystemTime) -> Self {
        self.issued_at_timestamp(unix_seconds(iat))
    }

    /// Set the issued-at time (`iat`) from a Unix timestamp
    pub fn issued_at_timestamp(mut self, iat: i64) -> Self {
        self.issued_at = Some(iat);
        self
    }

    /// Set the token id (`jti`)
    pub fn token_id(mut self, jti: impl Into<String>) -> Self {
        self.token_id = Some(jti.into());
        self
    }

    /// Set the token type (`typ`)
    pub fn token_type(mut self, typ: impl Into<String>) -> Self {
        self.token_type = Some(typ.into());
        self
    }

    /// Add an extension claim
    ///
    /// Fails with [`ReservedClaim`] when `name` collides with one of the
    /// standard claim names.
    pub fn custom(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedClaim> {
        let name = name.into();
        if RESERVED.contains(&name.as_str()) {
            return Err(ReservedClaim::new(name));
        }

        self.custom.insert(name, value.into());
        Ok(self)
    }

    /// The issuer (`iss`), if set
    pub fn get_issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// The subject (`sub`), if set
    pub fn get_subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The audience (`aud`), if set
    pub fn get_audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    /// The expiration time (`exp`) as a Unix timestamp, if set
    pub fn get_expiration(&self) -> Option<i64> {
        self.expiration
    }

    /// The not-before time (`nbf`) as a Unix timestamp, if set
    pub fn get_not_before(&self) -> Option<i64> {
        self.not_before
    }

    /// The issued-at time (`iat`) as a Unix timestamp, if set
    pub fn get_issued_at(&self) -> Option<i64> {
        self.issued_at
    }

    /// The token id (`jti`), if set
    pub fn get_token_id(&self) -> Option<&str> {
        self.token_id.as_deref()
    }

    /// The token type (`typ`), if set
    pub fn get_token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Look up an extension claim
    pub fn get_custom(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    /// All extension claims
    pub fn custom_claims(&self) -> &Map<String, Value> {
        &self.custom
    }

    /// Flatten into the key/value map that gets serialized to JSON
    ///
    /// Temporal claims serialize as integer Unix timestamps; unset claims are
    /// omitted entirely, never emitted as null.
    pub(crate) fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();

        if let Some(iss) = &self.issuer {
            fields.insert("iss".to_string(), Value::from(iss.clone()));
        }
        if let Some(sub) = &self.subject {
            fields.insert("sub".to_string(), Value::from(sub.clone()));
        }
        if let Some(aud) = &self.audience {
            fields.insert("aud".to_string(), Value::from(aud.clone()));
        }
        if let Some(exp) = self.expiration {
            fields.insert("exp".to_string(), Value::from(exp));
        }
        if let Some(nbf) = self.not_before {
            fields.insert("nbf".to_string(), Value::from(nbf));
        }
        if let Some(iat) = self.issued_at {
            fields.insert("iat".to_string(), Value::from(iat));
        }
        if let Some(jti) = &self.token_id {
            fields.insert("jti".to_string(), Value::from(jti.clone()));
        }
        if let Some(typ) = &self.token_type {
            fields.insert("typ".to_string(), Value::from(typ.clone()));
        }

        for (key, value) in &self.custom {
            fields.insert(key.clone(), value.clone());
        }

        fields
    }

    /// Rebuild a claim set from a deserialized key/value map
    ///
    /// `exp`/`nbf`/`iat` are reinterpreted as instants from their integer
    /// timestamps; every unrecognized key lands in the extension map. A
    /// standard claim carrying the wrong JSON type fails with its claim name.
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Result<Self, &'static str> {
        let mut claims = ClaimSet::new();

        for (key, value) in fields {
            match key.as_str() {
                "iss" => claims.issuer = Some(value.as_str().ok_or("iss")?.to_string()),
                "sub" => claims.subject = Some(value.as_str().ok_or("sub")?.to_string()),
                "aud" => claims.audience = Some(value.as_str().ok_or("aud")?.to_string()),
                "exp" => claims.expiration = Some(value.as_i64().ok_or("exp")?),
                "nbf" => claims.not_before = Some(value.as_i64().ok_or("nbf")?),
                "iat" => claims.issued_at = Some(value.as_i64().ok_or("iat")?),
                "jti" => claims.token_id = Some(value.as_str().ok_or("jti")?.to_string()),
                "typ" => claims.token_type = Some(value.as_str().ok_or("typ")?.to_string()),
                _ => {
                    claims.custom.insert(key, value);
                }
            }
        }

        Ok(claims)
    }
}

fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        // Pre-epoch instants become negative timestamps
        Err(err) => -(err.duration().as_secs() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builder_sets_all_standard_claims() {
        let claims = ClaimSet::new()
            .issuer("app")
            .subject("user-1")
            .audience("users")
            .expiration_timestamp(2_000_000_000)
            .not_before_timestamp(1_000_000_000)
            .issued_at_timestamp(1_500_000_000)
            .token_id("token-1")
            .token_type("access");

        assert_eq!(claims.get_issuer(), Some("app"));
        assert_eq!(claims.get_subject(), Some("user-1"));
        assert_eq!(claims.get_audience(), Some("users"));
        assert_eq!(claims.get_expiration(), Some(2_000_000_000));
        assert_eq!(claims.get_not_before(), Some(1_000_000_000));
        assert_eq!(claims.get_issued_at(), Some(1_500_000_000));
        assert_eq!(claims.get_token_id(), Some("token-1"));
        assert_eq!(claims.get_token_type(), Some("access"));
    }

    #[test]
    fn system_time_setters_truncate_to_seconds() {
        let instant = UNIX_EPOCH + Duration::new(1_700_000_000, 999_000_000);
        let claims = ClaimSet::new().expiration(instant);
        assert_eq!(claims.get_expiration(), Some(1_700_000_000));
    }

    #[test]
    fn to_fields_omits_unset_claims() {
        let claims = ClaimSet::new().issuer("app");
        let fields = claims.to_fields();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("iss"), Some(&Value::from("app")));
        assert!(!fields.contains_key("exp"));
        assert!(!fields.contains_key("sub"));
    }

    #[test]
    fn reserved_names_are_rejected() {
        for name in RESERVED {
            let result = ClaimSet::new().custom(name, "x");
            assert!(result.is_err(), "{name} must be reserved");
            assert_eq!(result.unwrap_err().name(), name);
        }
    }

    #[test]
    fn custom_claims_round_trip() {
        let claims = ClaimSet::new()
            .issuer("app")
            .custom("role", "admin")
            .unwrap()
            .custom("level", 3)
            .unwrap();

        let rebuilt = ClaimSet::from_fields(claims.to_fields()).unwrap();
        assert_eq!(rebuilt, claims);
        assert_eq!(rebuilt.get_custom("role"), Some(&Value::from("admin")));
        assert_eq!(rebuilt.get_custom("level"), Some(&Value::from(3)));
    }

    #[test]
    fn from_fields_parses_temporal_claims_as_integers() {
        let mut fields = Map::new();
        fields.insert("exp".to_string(), Value::from(1_700_003_600));
        fields.insert("nbf".to_string(), Value::from(1_700_000_000));
        fields.insert("iat".to_string(), Value::from(1_700_000_000));

        let claims = ClaimSet::from_fields(fields).unwrap();
        assert_eq!(claims.get_expiration(), Some(1_700_003_600));
        assert_eq!(claims.get_not_before(), Some(1_700_000_000));
        assert_eq!(claims.get_issued_at(), Some(1_700_000_000));
    }

    #[test]
    fn from_fields_rejects_wrong_types() {
        let mut fields = Map::new();
        fields.insert("exp".to_string(), Value::from("tomorrow"));
        assert_eq!(ClaimSet::from_fields(fields), Err("exp"));

        let mut fields = Map::new();
        fields.insert("iss".to_string(), Value::from(17));
        assert_eq!(ClaimSet::from_fields(fields), Err("iss"));
    }

    #[test]
    fn pre_epoch_instants_become_negative_timestamps() {
        let instant = UNIX_EPOCH - Duration::from_secs(60);
        let claims = ClaimSet::new().issued_at(instant);
        assert_eq!(claims.get_issued_at(), Some(-60));
    }
}
