use crate::errors::internal::{
    AccessError, CredentialError, DatabaseError, InternalError, RecordError,
};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error body returned by every endpoint
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Errors surfaced by the HTTP API
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing, malformed, expired or revoked credential
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Unknown email or wrong password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Caller may not touch this resource
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uniqueness violation
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    #[oai(status = 400)]
    InvalidInput(Json<ErrorResponse>),

    /// Request is well formed but not allowed in the current state
    #[oai(status = 422)]
    InvalidOperation(Json<ErrorResponse>),

    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated(body(
            "unauthenticated",
            "Authentication is required",
            401,
        ))
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthenticated(body("invalid_token", "Invalid or malformed token", 401))
    }

    pub fn expired_token() -> Self {
        ApiError::Unauthenticated(body("expired_token", "Token has expired", 401))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::InvalidCredentials(body(
            "invalid_credentials",
            "Invalid email or password",
            401,
        ))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(body("forbidden", message, 403))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body("not_found", message, 404))
    }

    pub fn organization_not_found() -> Self {
        ApiError::NotFound(body(
            "organization_not_found",
            "Organization not found",
            404,
        ))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body("conflict", message, 409))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(body("invalid_input", message, 400))
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        ApiError::InvalidOperation(body("invalid_operation", message, 422))
    }

    /// Generic 500; never carries internal details
    fn internal_server_error() -> Self {
        ApiError::InternalError(body(
            "internal_error",
            "An internal error occurred",
            500,
        ))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Infrastructure details are logged, never returned.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(DatabaseError::Operation { operation, .. }) => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Database(_) => {
                tracing::error!("Transaction error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Credential(CredentialError::PasswordHashingFailed(_)) => {
                tracing::error!("{}", err);
                Self::internal_server_error()
            }

            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::InvalidToken { reason }) => {
                tracing::debug!("Invalid token: {}", reason);
                Self::invalid_token()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                tracing::debug!("Expired token");
                Self::expired_token()
            }
            InternalError::Credential(CredentialError::UnknownSubject { user_id }) => {
                tracing::warn!("Token subject {} no longer resolves", user_id);
                Self::unauthenticated()
            }
            InternalError::Credential(CredentialError::OrganizationNotFound { org_id }) => {
                tracing::warn!("Organization {} not found", org_id);
                Self::organization_not_found()
            }

            InternalError::Access(AccessError::SelfRemoval) => {
                tracing::debug!("{}", err);
                Self::invalid_operation(err.to_string())
            }
            InternalError::Access(access) => {
                tracing::warn!("Access denied: {}", access);
                Self::forbidden(Self::forbidden_message(access))
            }

            InternalError::Record(RecordError::NotFound { entity, .. }) => {
                tracing::debug!("{}", err);
                Self::not_found(format!("{} not found", entity))
            }
            InternalError::Record(
                RecordError::DuplicatePhoneNumber { .. }
                | RecordError::DuplicateEmail { .. }
                | RecordError::DuplicateCall { .. },
            ) => {
                tracing::debug!("{}", err);
                Self::conflict(err.to_string())
            }
            InternalError::Record(RecordError::InvalidInput { .. }) => {
                tracing::debug!("{}", err);
                Self::invalid_input(err.to_string())
            }
        }
    }

    // Tenant ids stay out of client-visible messages
    fn forbidden_message(access: &AccessError) -> String {
        match access {
            AccessError::TenantMismatch { .. } => {
                "Resource belongs to another organization".to_string()
            }
            AccessError::NotResourceOwner { entity, .. } => {
                format!("Only the creator or an owner may modify this {}", entity)
            }
            AccessError::OwnerRequired { action } => format!("Only owners can {}", action),
            AccessError::SelfRemoval => "Owners cannot remove themselves".to_string(),
        }
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::Unauthenticated(json)
            | ApiError::InvalidCredentials(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InvalidInput(json)
            | ApiError::InvalidOperation(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }

    pub fn message(&self) -> &str {
        &self.response().message
    }

    pub fn error_code(&self) -> &str {
        &self.response().error
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
