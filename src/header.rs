//! Token header: type, content type, key id, algorithm, extensions

use crate::error::ReservedHeader;

use serde_json::{Map, Value};

/// Header field names that cannot be used as extension keys
const RESERVED: [&str; 4] = ["typ", "cty", "kid", "alg"];

/// The metadata segment of a token
///
/// Standard fields (`typ`, `cty`, `kid`, `alg`) live as typed options; every
/// other field travels in a strictly separate extension map. During encode the
/// header is built by the orchestrator; during decode it is reconstructed from
/// the wire and treated as read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    token_type: Option<String>,
    content_type: Option<String>,
    key_id: Option<u64>,
    algorithm: Option<String>,
    custom: Map<String, Value>,
}

impl Header {
    /// Create an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token type (`typ`)
    pub fn token_type(mut self, typ: impl Into<String>) -> Self {
        self.token_type = Some(typ.into());
        self
    }

    /// Set the content type (`cty`)
    pub fn content_type(mut self, cty: impl Into<String>) -> Self {
        self.content_type = Some(cty.into());
        self
    }

    /// Set the key id (`kid`) — the signer's index in the registry
    pub fn key_id(mut self, kid: u64) -> Self {
        self.key_id = Some(kid);
        self
    }

    /// Set the algorithm name (`alg`)
    pub fn algorithm(mut self, alg: impl Into<String>) -> Self {
        self.algorithm = Some(alg.into());
        self
    }

    /// Add an extension header field
    ///
    /// Fails with [`ReservedHeader`] when `name` collides with one of the
    /// standard field names.
    pub fn custom(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedHeader> {
        let name = name.into();
        if RESERVED.contains(&name.as_str()) {
            return Err(ReservedHeader::new(name));
        }

        self.custom.insert(name, value.into());
        Ok(self)
    }

    /// The token type (`typ`), if set
    pub fn get_token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// The content type (`cty`), if set
    pub fn get_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The key id (`kid`), if set
    pub fn get_key_id(&self) -> Option<u64> {
        self.key_id
    }

    /// The algorithm name (`alg`), if set
    pub fn get_algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// Look up an extension header field
    pub fn get_custom(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    /// All extension header fields
    pub fn custom_fields(&self) -> &Map<String, Value> {
        &self.custom
    }

    /// Flatten into the key/value map that gets serialized to JSON
    ///
    /// Unset standard fields are omitted entirely, never emitted as null.
    pub(crate) fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();

        if let Some(typ) = &self.token_type {
            fields.insert("typ".to_string(), Value::from(typ.clone()));
        }
        if let Some(cty) = &self.content_type {
            fields.insert("cty".to_string(), Value::from(cty.clone()));
        }
        if let Some(kid) = self.key_id {
            fields.insert("kid".to_string(), Value::from(kid));
        }
        if let Some(alg) = &self.algorithm {
            fields.insert("alg".to_string(), Value::from(alg.clone()));
        }

        for (key, value) in &self.custom {
            fields.insert(key.clone(), value.clone());
        }

        fields
    }

    /// Rebuild a header from a deserialized key/value map
    ///
    /// Standard fields are mapped onto their typed slots with explicit
    /// conversions; every unrecognized key lands in the extension map. A
    /// standard field carrying the wrong JSON type fails with its field name.
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Result<Self, &'static str> {
        let mut header = Header::new();

        for (key, value) in fields {
            match key.as_str() {
                "typ" => {
                    header.token_type = Some(value.as_str().ok_or("typ")?.to_string());
                }
                "cty" => {
                    header.content_type = Some(value.as_str().ok_or("cty")?.to_string());
                }
                "kid" => {
                    header.key_id = Some(value.as_u64().ok_or("kid")?);
                }
                "alg" => {
                    header.algorithm = Some(value.as_str().ok_or("alg")?.to_string());
                }
                _ => {
                    header.custom.insert(key, value);
                }
            }
        }

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_standard_fields() {
        let header = Header::new()
            .token_type("JWT")
            .algorithm("HS256")
            .key_id(3)
            .content_type("application/json");

        assert_eq!(header.get_token_type(), Some("JWT"));
        assert_eq!(header.get_algorithm(), Some("HS256"));
        assert_eq!(header.get_key_id(), Some(3));
        assert_eq!(header.get_content_type(), Some("application/json"));
    }

    #[test]
    fn to_fields_omits_unset_fields() {
        let header = Header::new().token_type("JWT").algorithm("none").key_id(0);
        let fields = header.to_fields();

        assert_eq!(fields.get("typ"), Some(&Value::from("JWT")));
        assert_eq!(fields.get("alg"), Some(&Value::from("none")));
        assert_eq!(fields.get("kid"), Some(&Value::from(0u64)));
        assert!(!fields.contains_key("cty"));
    }

    #[test]
    fn custom_fields_round_trip() {
        let header = Header::new()
            .token_type("JWT")
            .custom("env", "staging")
            .unwrap();

        let fields = header.to_fields();
        assert_eq!(fields.get("env"), Some(&Value::from("staging")));

        let rebuilt = Header::from_fields(fields).unwrap();
        assert_eq!(rebuilt.get_custom("env"), Some(&Value::from("staging")));
        assert_eq!(rebuilt.get_token_type(), Some("JWT"));
    }

    #[test]
    fn reserved_names_are_rejected() {
        for name in ["typ", "cty", "kid", "alg"] {
            let result = Header::new().custom(name, "x");
            assert!(result.is_err(), "{name} must be reserved");
            assert_eq!(result.unwrap_err().name(), name);
        }
    }

    #[test]
    fn from_fields_rejects_wrong_types() {
        let mut fields = Map::new();
        fields.insert("alg".to_string(), Value::from(42));
        assert_eq!(Header::from_fields(fields), Err("alg"));

        let mut fields = Map::new();
        fields.insert("kid".to_string(), Value::from("zero"));
        assert_eq!(Header::from_fields(fields), Err("kid"));
    }

    #[test]
    fn from_fields_routes_unknown_keys_to_extensions() {
        let mut fields = Map::new();
        fields.insert("alg".to_string(), Value::from("HS256"));
        fields.insert("kid".to_string(), Value::from(1u64));
        fields.insert("x5t".to_string(), Value::from("thumbprint"));

        let header = Header::from_fields(fields).unwrap();
        assert_eq!(header.get_algorithm(), Some("HS256"));
        assert_eq!(header.get_custom("x5t"), Some(&Value::from("thumbprint")));
        assert_eq!(header.custom_fields().len(), 1);
    }
}
