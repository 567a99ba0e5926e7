use crate::error::AppError;

/// Hashes passwords and checks plaintext against stored digests.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> Result<String, AppError>;
    /// `Ok(false)` means a well-formed digest that does not match.
    fn verify(&self, raw: &str, digest: &str) -> Result<bool, AppError>;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, raw: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(raw, self.cost)?)
    }

    fn verify(&self, raw: &str, digest: &str) -> Result<bool, AppError> {
        Ok(bcrypt::verify(raw, digest)?)
    }
}
