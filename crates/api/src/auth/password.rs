//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself;
//! verification reads them back from the hash, so raising the cost does not
//! invalidate existing credentials.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use inkpost_core::error::CoreError;

/// Argon2id cost parameters, fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes (time cost).
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP-recommended Argon2id baseline (19 MiB, 2 passes, 1 lane).
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashCost {
    /// Load hash cost from environment variables.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `PASSWORD_HASH_MEMORY_KIB`  | `19456` |
    /// | `PASSWORD_HASH_ITERATIONS`  | `2`     |
    /// | `PASSWORD_HASH_PARALLELISM` | `1`     |
    pub fn from_env() -> Self {
        let default = Self::default();
        let read = |key: &str, fallback: u32| -> u32 {
            std::env::var(key)
                .map(|v| {
                    v.parse()
                        .unwrap_or_else(|_| panic!("{key} must be a valid u32"))
                })
                .unwrap_or(fallback)
        };

        Self {
            memory_kib: read("PASSWORD_HASH_MEMORY_KIB", default.memory_kib),
            iterations: read("PASSWORD_HASH_ITERATIONS", default.iterations),
            parallelism: read("PASSWORD_HASH_PARALLELISM", default.parallelism),
        }
    }
}

/// Argon2id hasher configured with a fixed [`HashCost`].
///
/// Also holds a decoy hash used to spend the same verification time on
/// logins for names that do not exist.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    decoy_hash: String,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Build a hasher for `cost`. Fails on parameters Argon2 rejects.
    pub fn new(cost: HashCost) -> Result<Self, CoreError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| CoreError::Internal(format!("Invalid password hash cost: {e}")))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut hasher = Self {
            argon2,
            decoy_hash: String::new(),
        };
        hasher.decoy_hash = hasher.hash("inkpost-decoy-credential")?;
        Ok(hasher)
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
    pub fn hash(&self, plaintext: &str) -> Result<String, CoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC-formatted hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
    /// A hash that cannot be parsed yields [`CoreError::CorruptCredential`].
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CoreError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| CoreError::CorruptCredential(format!("Unparseable password hash: {e}")))?;
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CoreError::CorruptCredential(format!(
                "Password hash could not be verified: {e}"
            ))),
        }
    }

    /// Run a verification against the decoy hash and discard the result.
    pub fn verify_decoy(&self, plaintext: &str) {
        let _ = self.verify(plaintext, &self.decoy_hash);
    }

    /// Hash and verify a probe value. Run once at startup.
    pub fn self_check(&self) -> Result<(), CoreError> {
        let probe = "inkpost-self-check";
        let hash = self.hash(probe)?;
        if self.verify(probe, &hash)? && !self.verify("inkpost-self-check-mismatch", &hash)? {
            Ok(())
        } else {
            Err(CoreError::CorruptCredential(
                "Password hasher self-check failed".into(),
            ))
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(self: &Arc<Self>, plaintext: String) -> Result<String, CoreError> {
        let hasher = Arc::clone(self);
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| CoreError::Internal(format!("Hashing task failed: {e}")))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    ///
    /// With `hash == None` the decoy hash is verified instead and the result
    /// is always `false`.
    pub async fn verify_blocking(
        self: &Arc<Self>,
        plaintext: String,
        hash: Option<String>,
    ) -> Result<bool, CoreError> {
        let hasher = Arc::clone(self);
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => hasher.verify(&plaintext, &hash),
            None => {
                hasher.verify_decoy(&plaintext);
                Ok(false)
            }
        })
        .await
        .map_err(|e| CoreError::Internal(format!("Verification task failed: {e}")))?
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Smallest cost Argon2 accepts comfortably; keeps tests fast.
    pub(crate) fn cheap_cost() -> HashCost {
        HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(cheap_cost()).expect("cheap cost is valid")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("correct-horse").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(hasher.verify("correct-horse", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hasher = hasher();
        let hash = hasher.hash("real-password").unwrap();
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_salt_differs_per_call() {
        let hasher = hasher();
        let a = hasher.hash("same").unwrap();
        let b = hasher.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("same", &a).unwrap());
        assert!(hasher.verify("same", &b).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_corrupt_credential() {
        let hasher = hasher();
        assert_matches!(
            hasher.verify("anything", "not-a-phc-string"),
            Err(CoreError::CorruptCredential(_))
        );
    }

    #[test]
    fn test_hash_from_other_cost_still_verifies() {
        let old = hasher();
        let hash = old.hash("legacy").unwrap();

        let stronger = PasswordHasher::new(HashCost {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(stronger.verify("legacy", &hash).unwrap());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordHasher::new(HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        });
        assert_matches!(result, Err(CoreError::Internal(_)));
    }

    #[test]
    fn test_self_check_passes() {
        hasher().self_check().unwrap();
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher = Arc::new(hasher());
        let hash = hasher.hash_blocking("s3cr3t".into()).await.unwrap();
        assert!(hasher
            .verify_blocking("s3cr3t".into(), Some(hash))
            .await
            .unwrap());
        assert!(!hasher.verify_blocking("s3cr3t".into(), None).await.unwrap());
    }
}
