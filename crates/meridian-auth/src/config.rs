//! Authentication configuration.

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use meridian_core::error::{CrmError, CrmResult};

/// Environment variable holding the session signing secret.
pub const ENV_SECRET_KEY: &str = "MERIDIAN_SECRET_KEY";
/// Environment variable holding the signing algorithm name (HS256/HS384/HS512).
pub const ENV_JWT_ALGORITHM: &str = "MERIDIAN_JWT_ALGORITHM";

/// Configuration for session token signing and verification.
///
/// Both values are supplied by the process environment and validated at
/// startup; a missing key or an unusable algorithm name aborts the
/// process before any prompt is shown.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret used to sign and verify session tokens.
    pub secret: String,
    /// HMAC signing algorithm.
    pub algorithm: Algorithm,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
        }
    }

    /// Load the configuration from the process environment.
    pub fn from_env() -> CrmResult<Self> {
        let secret = require_env(ENV_SECRET_KEY)?;
        let algorithm = parse_algorithm(&require_env(ENV_JWT_ALGORITHM)?)?;
        Ok(Self { secret, algorithm })
    }
}

/// Resolve an algorithm name to a signing algorithm. The session secret
/// is a shared string, so only the HMAC family is accepted.
fn parse_algorithm(name: &str) -> CrmResult<Algorithm> {
    let algorithm = Algorithm::from_str(name)
        .map_err(|_| CrmError::Config(format!("unknown signing algorithm: {name}")))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(CrmError::Config(format!(
            "signing algorithm {name} requires key material; only HS256, HS384 and HS512 are supported"
        ))),
    }
}

fn require_env(key: &str) -> CrmResult<String> {
    std::env::var(key)
        .map_err(|_| CrmError::Config(format!("missing required environment variable {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_algorithms_are_accepted() {
        assert_eq!(parse_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm("HS512").unwrap(), Algorithm::HS512);
    }

    #[test]
    fn unknown_algorithm_is_a_config_error() {
        assert!(matches!(
            parse_algorithm("HS257"),
            Err(CrmError::Config(_))
        ));
    }

    #[test]
    fn asymmetric_algorithm_is_rejected() {
        assert!(matches!(
            parse_algorithm("RS256"),
            Err(CrmError::Config(_))
        ));
    }
}
