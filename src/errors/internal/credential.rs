use thiserror::Error;

/// Failures while proving or resolving a caller's identity
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,

    /// Token was valid but its subject no longer resolves to a user of the
    /// claimed organization
    #[error("Unknown token subject: {user_id}")]
    UnknownSubject { user_id: String },

    #[error("Organization not found: {org_id}")]
    OrganizationNotFound { org_id: String },

    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
