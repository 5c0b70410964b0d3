//! Session token issuance and validation.
//!
//! Sessions are stateless: a signed claims token is the only session
//! state, and validity is entirely determined by signature and expiry.
//! There is no server-side session storage and no revocation list.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use meridian_core::models::staff::{Department, StaffMember};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Fixed session lifetime: one hour.
pub const SESSION_LIFETIME_SECS: i64 = 3_600;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — staff member ID (UUID string).
    pub sub: String,
    /// Department of the authenticated staff member.
    pub role: Department,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    pub fn subject(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject claim: {e}")))
    }
}

/// Issue a signed session token for an authenticated staff member.
pub fn issue_session(staff: &StaffMember, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: staff.id.to_string(),
        role: staff.department,
        iat: now,
        exp: now + SESSION_LIFETIME_SECS,
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    let header = Header::new(config.algorithm);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("session token encode: {e}")))
}

fn decode_claims(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());

    let mut validation = Validation::new(config.algorithm);
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);
    // Expiry is checked explicitly in `validate_session` so that the
    // boundary instant counts as expired.
    validation.validate_exp = false;
    validation.leeway = 0;

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenInvalid(e.to_string()))
}

/// Verify a session token's signature and expiry and return its claims.
///
/// A token whose `exp` equals the current second is already expired.
/// Signature failure or a garbled token yields `TokenInvalid`; a
/// well-signed but stale token yields `TokenExpired`. Both tell the
/// caller to log in again.
pub fn validate_session(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let claims = decode_claims(token, config)?;
    if claims.exp <= Utc::now().timestamp() {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}

/// Extract `(subject, role)` from a token via an independent decode
/// against the same secret. Callers are expected to have validated the
/// token first; expiry is not re-checked here.
pub fn decode_session(token: &str, config: &AuthConfig) -> Result<(Uuid, Department), AuthError> {
    let claims = decode_claims(token, config)?;
    Ok((claims.subject()?, claims.role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use jsonwebtoken::Algorithm;

    fn test_config() -> AuthConfig {
        AuthConfig::new("a-very-well-kept-test-secret", Algorithm::HS256)
    }

    fn test_staff(department: Department) -> StaffMember {
        let now: DateTime<Utc> = Utc::now();
        StaffMember {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Martin".into(),
            email: "ada@meridian.test".into(),
            department,
            password_hash: "unused".into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Encode claims directly, bypassing `issue_session`, to control
    /// the expiry instant.
    fn encode_with_exp(staff: &StaffMember, exp: i64, config: &AuthConfig) -> String {
        let claims = SessionClaims {
            sub: staff.id.to_string(),
            role: staff.department,
            iat: exp - SESSION_LIFETIME_SECS,
            exp,
        };
        let key = EncodingKey::from_secret(config.secret.as_bytes());
        jsonwebtoken::encode(&Header::new(config.algorithm), &claims, &key).unwrap()
    }

    #[test]
    fn fresh_token_validates() {
        let config = test_config();
        let staff = test_staff(Department::Management);

        let token = issue_session(&staff, &config).unwrap();
        let claims = validate_session(&token, &config).unwrap();

        assert_eq!(claims.sub, staff.id.to_string());
        assert_eq!(claims.role, Department::Management);
        assert_eq!(claims.exp - claims.iat, SESSION_LIFETIME_SECS);
    }

    #[test]
    fn decode_extracts_subject_and_role() {
        let config = test_config();
        let staff = test_staff(Department::Support);

        let token = issue_session(&staff, &config).unwrap();
        let (subject, role) = decode_session(&token, &config).unwrap();

        assert_eq!(subject, staff.id);
        assert_eq!(role, Department::Support);
    }

    #[test]
    fn tampered_token_is_invalid() {
        let config = test_config();
        let staff = test_staff(Department::Commercial);

        let token = issue_session(&staff, &config).unwrap();
        let tampered = format!("{token}x");
        assert!(matches!(
            validate_session(&tampered, &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let config = test_config();
        let other = AuthConfig::new("a-different-secret", Algorithm::HS256);
        let staff = test_staff(Department::Commercial);

        let token = issue_session(&staff, &config).unwrap();
        assert!(matches!(
            validate_session(&token, &other),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let config = test_config();
        assert!(matches!(
            validate_session("not.a.token", &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn stale_token_is_expired() {
        let config = test_config();
        let staff = test_staff(Department::Management);

        // Issued two hours ago, expired one hour ago.
        let exp = Utc::now().timestamp() - SESSION_LIFETIME_SECS;
        let token = encode_with_exp(&staff, exp, &config);
        assert!(matches!(
            validate_session(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn expiry_boundary_counts_as_expired() {
        let config = test_config();
        let staff = test_staff(Department::Management);

        let token = encode_with_exp(&staff, Utc::now().timestamp(), &config);
        assert!(matches!(
            validate_session(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn token_one_minute_before_expiry_is_valid() {
        let config = test_config();
        let staff = test_staff(Department::Commercial);

        let token = encode_with_exp(&staff, Utc::now().timestamp() + 60, &config);
        assert!(validate_session(&token, &config).is_ok());
    }
}
