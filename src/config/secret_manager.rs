use std::fmt;

use crate::config::EnvironmentProvider;

const JWT_SECRET_VAR: &str = "JWT_SECRET";
const PEPPER_VAR: &str = "PASSWORD_PEPPER";
const JWT_SECRET_MIN_LENGTH: usize = 32;
const PEPPER_MIN_LENGTH: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Holds the signing secret and password pepper
pub struct SecretManager {
    jwt_secret: String,
    pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(&crate::config::SystemEnvironment)
    }

    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env, JWT_SECRET_VAR, JWT_SECRET_MIN_LENGTH)?;
        let pepper = Self::load_secret(env, PEPPER_VAR, PEPPER_MIN_LENGTH)?;
        Self::new(jwt_secret, pepper)
    }

    /// Build from explicit values, applying the same length rules
    pub fn new(jwt_secret: String, pepper: String) -> Result<Self, SecretError> {
        Self::check_length(JWT_SECRET_VAR, &jwt_secret, JWT_SECRET_MIN_LENGTH)?;
        Self::check_length(PEPPER_VAR, &pepper, PEPPER_MIN_LENGTH)?;
        Ok(Self { jwt_secret, pepper })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn pepper(&self) -> &str {
        &self.pepper
    }

    fn load_secret(
        env: &dyn EnvironmentProvider,
        name: &str,
        min_length: usize,
    ) -> Result<String, SecretError> {
        let value = env.get_var(name).ok_or_else(|| SecretError::Missing {
            secret_name: name.to_string(),
        })?;
        Self::check_length(name, &value, min_length)?;
        Ok(value)
    }

    fn check_length(name: &str, value: &str, min_length: usize) -> Result<(), SecretError> {
        let actual = value.chars().count();
        if actual < min_length {
            return Err(SecretError::InvalidLength {
                secret_name: name.to_string(),
                expected: min_length,
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}
