use std::sync::Arc;

use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::api::helpers::authenticate;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::AuthService;
use crate::types::dto::auth::{LoginRequest, LoginResponse, MeResponse};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(app_data)),
        }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password to receive a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
        let response = self.auth_service.login(&body.email, &body.password).await?;
        Ok(Json(response))
    }

    /// The authenticated user and its organization
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<MeResponse>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.auth_service.me(caller).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_app, TEST_PASSWORD};

    fn bearer(token: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: token.to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_then_me() {
        let (app_data, tenants) = setup_test_app().await;
        let api = AuthApi::new(app_data);

        let login = api
            .login(Json(LoginRequest {
                email: "alice@a.test".to_string(),
                password: TEST_PASSWORD.to_string(),
            }))
            .await
            .unwrap();

        let me = api.me(bearer(&login.0.token)).await.unwrap();
        assert_eq!(me.0.user.id, tenants.owner_a.id);
        assert_eq!(me.0.organization.map(|o| o.id), Some(tenants.org_a.id));
    }

    #[tokio::test]
    async fn test_login_failure_is_401() {
        let (app_data, _tenants) = setup_test_app().await;
        let api = AuthApi::new(app_data);

        let err = api
            .login(Json(LoginRequest {
                email: "alice@a.test".to_string(),
                password: "nope".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "invalid_credentials");
    }

    #[tokio::test]
    async fn test_me_with_garbage_token() {
        let (app_data, _tenants) = setup_test_app().await;
        let api = AuthApi::new(app_data);

        match api.me(bearer("garbage")).await {
            Err(ApiError::Unauthenticated(json)) => assert_eq!(json.0.error, "invalid_token"),
            other => panic!("Expected Unauthenticated, got {:?}", other.map(|r| r.0.user)),
        }
    }
}
