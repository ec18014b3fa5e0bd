use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString},
};
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::OsRng;

use crate::config::Argon2Config;

/// Argon2id password hasher
///
/// Produces PHC strings (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`) with a
/// fresh random salt per call, so the same password never hashes twice to the
/// same value. Verification reads salt and parameters back from the string.
///
/// # Example
/// ```no_run
/// use lighter_signin::config::Argon2Config;
/// use lighter_signin::security::PasswordHasher;
///
/// let hasher = PasswordHasher::from_config(&Argon2Config::default()).unwrap();
/// let hash = hasher.hash("Secret123").unwrap();
///
/// assert!(hasher.verify("Secret123", &hash).unwrap());
/// ```
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    verifications: AtomicU64,
}

impl PasswordHasher {
    /// Fails when the parameters are out of range for Argon2
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &Argon2Config) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.hash_length as usize),
        )?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self {
            argon2,
            verifications: AtomicU64::new(0),
        })
    }

    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch, `Err` only when `hash` is not a valid PHC string
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;

        self.verifications.fetch_add(1, Ordering::Relaxed);

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Argon2 verifications run so far
    pub fn verifications(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }

    /// Whether `hash` was produced with other parameters than the current ones.
    /// Checked after a successful login so stored hashes follow config changes.
    #[tracing::instrument(skip(self, hash))]
    pub fn needs_rehash(&self, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;

        if parsed_hash.algorithm.as_str() != "argon2id" {
            return Ok(true);
        }

        let m_cost = parsed_hash.params.get_decimal("m").unwrap_or(0);
        let t_cost = parsed_hash.params.get_decimal("t").unwrap_or(0);
        let p_cost = parsed_hash.params.get_decimal("p").unwrap_or(0);
        let current = self.argon2.params();

        Ok(m_cost != current.m_cost() || t_cost != current.t_cost() || p_cost != current.p_cost())
    }
}
