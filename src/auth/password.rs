use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Errors raised by [`PasswordHasher`].
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The stored digest is not a PHC string this hasher understands.
    #[error("Invalid password hash: {0}")]
    Format(String),

    /// Cost parameters rejected by argon2.
    #[error("Invalid hash parameters: {0}")]
    Params(String),

    /// Salting or hashing failed.
    #[error("Failed to hash password: {0}")]
    Hashing(String),
}

/// Argon2id password hashing with tunable cost.
///
/// Digests are PHC strings, so the salt and the cost parameters travel with
/// the digest and [`verify`](Self::verify) needs nothing else.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl PasswordHasher {
    /// Creates a hasher with explicit argon2 cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| HashError::Params(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Hashing(e.to_string()))
    }

    /// Checks `plaintext` against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, HashError> {
        let parsed_hash =
            PasswordHash::new(digest).map_err(|e| HashError::Format(e.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Format(e.to_string())),
        }
    }
}
