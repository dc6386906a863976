//! Claim validation: temporal checks and expected-claims matching
//!
//! Validation runs in a fixed order and stops at the first failure — callers
//! get exactly one error, never an aggregate. The order is part of the
//! contract: `iat` before `exp` before `nbf`, then `iss`, `aud`, `typ`.

use crate::claims::ClaimSet;
use crate::error::DecodeError;

use std::time::{SystemTime, UNIX_EPOCH};

/// Validate `claims` against the current clock and an optional template
///
/// When no template is supplied the claims are matched against an *empty*
/// template, so a token carrying `iss`, `aud` or `typ` only decodes when the
/// caller supplies a template with the matching values. This strictness is
/// deliberate: forgetting to pass a template fails closed instead of
/// accepting any issuer.
pub(crate) fn validate(claims: &ClaimSet, expected: Option<&ClaimSet>) -> Result<(), DecodeError> {
    validate_at(claims, expected, current_timestamp())
}

pub(crate) fn validate_at(
    claims: &ClaimSet,
    expected: Option<&ClaimSet>,
    now: i64,
) -> Result<(), DecodeError> {
    let empty;
    let expected = match expected {
        Some(template) => template,
        None => {
            empty = ClaimSet::new();
            &empty
        }
    };

    if claims.get_issued_at().is_some_and(|iat| iat > now) {
        return Err(DecodeError::IssuedInFuture);
    }

    if claims.get_expiration().is_some_and(|exp| exp < now) {
        return Err(DecodeError::Expired);
    }

    if claims.get_not_before().is_some_and(|nbf| nbf > now) {
        return Err(DecodeError::NotYetActive);
    }

    if claims.get_issuer() != expected.get_issuer() {
        return Err(DecodeError::IssuerMismatch);
    }

    if claims.get_audience() != expected.get_audience() {
        return Err(DecodeError::AudienceMismatch);
    }

    if claims.get_token_type() != expected.get_token_type() {
        return Err(DecodeError::TypeMismatch);
    }

    Ok(())
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time is before the Unix epoch")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn bare_claims_pass_without_template() {
        let claims = ClaimSet::new().subject("user-1");
        assert!(validate_at(&claims, None, NOW).is_ok());
    }

    #[test]
    fn no_temporal_claims_means_no_temporal_rejection() {
        let claims = ClaimSet::new();
        assert!(validate_at(&claims, None, NOW).is_ok());
    }

    #[test]
    fn issued_in_the_future_is_rejected() {
        let claims = ClaimSet::new().issued_at_timestamp(NOW + 60);
        assert_eq!(
            validate_at(&claims, None, NOW),
            Err(DecodeError::IssuedInFuture)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = ClaimSet::new().expiration_timestamp(NOW - 1);
        assert_eq!(validate_at(&claims, None, NOW), Err(DecodeError::Expired));
    }

    #[test]
    fn not_yet_active_token_is_rejected() {
        let claims = ClaimSet::new().not_before_timestamp(NOW + 60);
        assert_eq!(
            validate_at(&claims, None, NOW),
            Err(DecodeError::NotYetActive)
        );
    }

    #[test]
    fn boundary_timestamps_are_accepted() {
        // iat == now, exp == now and nbf == now are all still valid
        let claims = ClaimSet::new()
            .issued_at_timestamp(NOW)
            .expiration_timestamp(NOW)
            .not_before_timestamp(NOW);
        assert!(validate_at(&claims, None, NOW).is_ok());
    }

    #[test]
    fn temporal_failures_win_over_identity_failures() {
        // Expired token with a mismatching issuer reports the expiry first
        let claims = ClaimSet::new()
            .issuer("app")
            .expiration_timestamp(NOW - 1);
        assert_eq!(validate_at(&claims, None, NOW), Err(DecodeError::Expired));
    }

    #[test]
    fn issuer_must_match_template() {
        let claims = ClaimSet::new().issuer("app");

        let matching = ClaimSet::new().issuer("app");
        assert!(validate_at(&claims, Some(&matching), NOW).is_ok());

        let other = ClaimSet::new().issuer("other");
        assert_eq!(
            validate_at(&claims, Some(&other), NOW),
            Err(DecodeError::IssuerMismatch)
        );
    }

    #[test]
    fn audience_must_match_template() {
        let claims = ClaimSet::new().audience("users");
        let template = ClaimSet::new().audience("admins");
        assert_eq!(
            validate_at(&claims, Some(&template), NOW),
            Err(DecodeError::AudienceMismatch)
        );
    }

    #[test]
    fn token_type_must_match_template() {
        let claims = ClaimSet::new().token_type("access");
        let template = ClaimSet::new().token_type("refresh");
        assert_eq!(
            validate_at(&claims, Some(&template), NOW),
            Err(DecodeError::TypeMismatch)
        );
    }

    #[test]
    fn missing_template_rejects_tokens_carrying_identity_claims() {
        // The strict default: without a template the expected values are
        // unset, so a token with an issuer cannot decode.
        let claims = ClaimSet::new().issuer("app");
        assert_eq!(
            validate_at(&claims, None, NOW),
            Err(DecodeError::IssuerMismatch)
        );
    }

    #[test]
    fn template_expecting_claims_rejects_bare_token() {
        let claims = ClaimSet::new();
        let template = ClaimSet::new().issuer("app");
        assert_eq!(
            validate_at(&claims, Some(&template), NOW),
            Err(DecodeError::IssuerMismatch)
        );
    }

    #[test]
    fn subject_and_custom_claims_are_not_matched() {
        let claims = ClaimSet::new().subject("user-1").custom("role", "admin").unwrap();
        let template = ClaimSet::new().subject("someone-else");
        assert!(validate_at(&claims, Some(&template), NOW).is_ok());
    }
}
