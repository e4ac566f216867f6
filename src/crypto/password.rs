//! Password hashing and verification (Argon2id).
//!
//! Digests are PHC-format strings with the salt embedded, so `verify` needs
//! nothing besides the stored string. Two hashes of the same password never
//! compare equal: every call to [`PasswordHasher::hash`] draws a fresh
//! random salt.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::Error;

/// Tunable Argon2id cost parameters.
///
/// Defaults follow the `argon2` crate's recommended memory-hard settings;
/// lower them only for test fixtures.
#[derive(Debug, Clone, Copy)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// One-way hashing primitive used by the credential store. Stateless apart
/// from its cost configuration.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost) -> Result<Self, Error> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| Error::Hashing(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a raw password with a fresh random salt. Returns a PHC-format
    /// string (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`).
    pub fn hash(&self, raw_password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|e| Error::Hashing(e.to_string()))?;
        Ok(digest.to_string())
    }

    /// Verifies a raw password against a stored PHC digest.
    ///
    /// A malformed digest verifies as `false` rather than erroring, so a
    /// corrupted row can never crash a login attempt.
    pub fn verify(&self, raw_password: &str, digest: &str) -> bool {
        match PasswordHash::new(digest) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw_password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}
