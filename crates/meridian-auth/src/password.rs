//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::error::AuthError;

/// Salt length in bytes.
const SALT_LEN: usize = 32;
/// Memory cost in KiB (19 MiB, OWASP ASVS recommended).
const MEMORY_COST: u32 = 19_456;
/// Iteration count.
const TIME_COST: u32 = 2;
/// Lanes.
const PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with Argon2id and a fresh random 32-byte salt.
///
/// Two calls never produce the same output, but both verify against the
/// same plaintext.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut rng = rand::rng();
    let bytes: [u8; SALT_LEN] = rand::Rng::random(&mut rng);
    let salt = SaltString::encode_b64(&bytes)
        .map_err(|e| AuthError::Crypto(format!("salt encoding error: {e}")))?;

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch (a normal
/// outcome, not an error), or `Err(AuthError::MalformedCredential)` if
/// the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::MalformedCredential(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::MalformedCredential(format!("verify error: {e}"))),
    }
}

/// True when the stored hash was produced under weaker settings than the
/// current minimums (algorithm, version, cost parameters, or salt
/// length) and should be re-hashed on the next successful login.
pub fn needs_rehash(hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::MalformedCredential(format!("invalid hash format: {e}")))?;

    if parsed.algorithm.as_str() != "argon2id" {
        return Ok(true);
    }
    if parsed.version != Some(Version::V0x13.into()) {
        return Ok(true);
    }

    let params = Params::try_from(&parsed)
        .map_err(|e| AuthError::MalformedCredential(format!("invalid hash params: {e}")))?;
    if params.m_cost() < MEMORY_COST
        || params.t_cost() < TIME_COST
        || params.p_cost() < PARALLELISM
    {
        return Ok(true);
    }

    let Some(salt) = parsed.salt else {
        return Ok(true);
    };
    let mut buf = [0u8; 64];
    let decoded = salt
        .decode_b64(&mut buf)
        .map_err(|e| AuthError::MalformedCredential(format!("invalid salt: {e}")))?;
    Ok(decoded.len() < SALT_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: hash with deliberately weak parameters, as an old
    /// deployment would have produced.
    fn weak_hash(password: &str) -> String {
        let params = Params::new(8192, 1, 1, None).unwrap();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::encode_b64(&[7u8; 16]).unwrap();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn empty_password_roundtrips() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password("nonempty", &hash).unwrap());
    }

    #[test]
    fn unicode_password_roundtrips() {
        let hash = hash_password("héllo wörld 事件管理").unwrap();
        assert!(verify_password("héllo wörld 事件管理", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_calls() {
        let h1 = hash_password("same input").unwrap();
        let h2 = hash_password("same input").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("same input", &h1).unwrap());
        assert!(verify_password("same input", &h2).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        assert!(matches!(
            verify_password("pw", "not-a-hash"),
            Err(AuthError::MalformedCredential(_))
        ));
        assert!(matches!(
            needs_rehash("not-a-hash"),
            Err(AuthError::MalformedCredential(_))
        ));
    }

    #[test]
    fn fresh_hash_does_not_need_rehash() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!needs_rehash(&hash).unwrap());
    }

    #[test]
    fn weak_parameters_need_rehash() {
        let hash = weak_hash("hunter2");
        // Still verifies...
        assert!(verify_password("hunter2", &hash).unwrap());
        // ...but is flagged for upgrade.
        assert!(needs_rehash(&hash).unwrap());
    }

    #[test]
    fn short_salt_needs_rehash() {
        // Strong cost parameters but a 16-byte salt.
        let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, None).unwrap();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::encode_b64(&[9u8; 16]).unwrap();
        let hash = argon2
            .hash_password(b"hunter2", &salt)
            .unwrap()
            .to_string();
        assert!(needs_rehash(&hash).unwrap());
    }
}
