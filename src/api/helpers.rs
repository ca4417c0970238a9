use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::AuthService;
use crate::types::internal::Caller;

/// Resolve the bearer credential of a request into the acting user
pub async fn authenticate(
    auth_service: &AuthService,
    auth: &BearerAuth,
) -> Result<Caller, ApiError> {
    auth_service
        .authenticate(&auth.0.token)
        .await
        .map_err(ApiError::from_internal_error)
}
