use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{RegistryError, RegistryResult};

/// One-way hashing of user secrets.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain: &str) -> RegistryResult<String>;

    /// Malformed digests verify as `false`.
    fn verify(&self, plain: &str, digest: &str) -> bool;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> RegistryResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| RegistryError::Hashing(e.to_string()))
    }

    fn verify(&self, plain: &str, digest: &str) -> bool {
        PasswordHash::new(digest)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Reversible stand-in so service tests skip the argon2 work factor.
#[cfg(test)]
pub(crate) struct PlainHasher;

#[cfg(test)]
impl CredentialHasher for PlainHasher {
    fn hash(&self, plain: &str) -> RegistryResult<String> {
        Ok(format!("plain${plain}"))
    }

    fn verify(&self, plain: &str, digest: &str) -> bool {
        digest.strip_prefix("plain$") == Some(plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_roundtrip_verifies() {
        let digest = Argon2Hasher.hash("admin123").unwrap();
        assert_ne!(digest, "admin123");
        assert!(Argon2Hasher.verify("admin123", &digest));
        assert!(!Argon2Hasher.verify("admin124", &digest));
    }

    #[test]
    fn test_argon2_salts_each_hash() {
        let a = Argon2Hasher.hash("secret").unwrap();
        let b = Argon2Hasher.hash("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_digest_never_verifies() {
        assert!(!Argon2Hasher.verify("secret", "not-a-phc-string"));
        assert!(!Argon2Hasher.verify("secret", ""));
    }
}
