use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::error;

/// One-way hash of an account secret, fresh salt per call.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hashing failed");
            anyhow::anyhow!("argon2: {e}")
        })?;
    Ok(hash.to_string())
}

/// Checks a plaintext secret against a stored hash. A mismatch is
/// `Ok(false)`; only an unparseable stored hash is an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored hash is not a valid argon2 string");
        anyhow::anyhow!("argon2: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_what_it_hashed() {
        let secret = "midnight-paper-lantern";
        let hash = hash_password(secret).expect("hashing should succeed");
        assert!(verify_password(secret, &hash).expect("verify should succeed"));
    }

    #[test]
    fn rejects_a_different_secret() {
        let hash = hash_password("reading-room-7").expect("hashing should succeed");
        assert!(!verify_password("reading-room-8", &hash).expect("verify should not error"));
    }

    #[test]
    fn same_secret_hashes_differently_each_time() {
        let a = hash_password("password").expect("hashing should succeed");
        let b = hash_password("password").expect("hashing should succeed");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let err = verify_password("anything", "plaintext-left-in-the-column").unwrap_err();
        assert!(err.to_string().contains("argon2"));
    }
}
