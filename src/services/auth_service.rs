use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::services::{crypto, TokenService};
use crate::stores::{OrganizationStore, UserStore};
use crate::types::dto::auth::{LoginResponse, MeResponse, OrganizationView, UserView};
use crate::types::internal::Caller;

/// Login, bearer token resolution and session introspection
pub struct AuthService {
    app_data: Arc<AppData>,
    user_store: Arc<UserStore>,
    organization_store: Arc<OrganizationStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            organization_store: Arc::clone(&app_data.organization_store),
            token_service: Arc::clone(&app_data.token_service),
            app_data,
        }
    }

    /// Verify email and password and issue a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, InternalError> {
        let db = &self.app_data.db;

        let user = self
            .user_store
            .find_by_email(db, email)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        let pepper = self.app_data.secret_manager.pepper();
        if !crypto::verify_password(pepper, password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch on login");
            return Err(CredentialError::InvalidCredentials.into());
        }

        let organization = self
            .organization_store
            .find_by_id(db, &user.org_id)
            .await?
            .ok_or_else(|| CredentialError::OrganizationNotFound {
                org_id: user.org_id.clone(),
            })?;

        let token = self.token_service.issue(&user.id, &user.org_id)?;

        tracing::info!(user_id = %user.id, org_id = %user.org_id, "User logged in");

        Ok(LoginResponse {
            user: UserView::try_from(user)?,
            organization: OrganizationView::from(organization),
            token,
        })
    }

    /// Resolve a bearer token to the acting user.
    ///
    /// The token must verify, its subject must still exist, and the subject
    /// must still belong to the organization named in the token.
    pub async fn authenticate(&self, token: &str) -> Result<Caller, InternalError> {
        let claims = self.token_service.validate(token)?;

        let user = self
            .user_store
            .find_by_id(&self.app_data.db, &claims.sub)
            .await?
            .ok_or_else(|| CredentialError::UnknownSubject {
                user_id: claims.sub.clone(),
            })?;

        if user.org_id != claims.org {
            tracing::warn!(
                user_id = %user.id,
                token_org = %claims.org,
                "Token organization no longer matches user"
            );
            return Err(CredentialError::UnknownSubject { user_id: user.id }.into());
        }

        Caller::try_from(user)
    }

    pub async fn me(&self, caller: Caller) -> Result<MeResponse, InternalError> {
        let organization = self
            .organization_store
            .find_by_id(&self.app_data.db, &caller.org_id)
            .await?
            .map(OrganizationView::from);

        Ok(MeResponse {
            user: caller.into(),
            organization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_app, TEST_PASSWORD};
    use crate::types::internal::{Claims, UserRole};

    #[tokio::test]
    async fn test_login_returns_matching_user_and_organization() {
        let (app_data, tenants) = setup_test_app().await;
        let service = AuthService::new(app_data.clone());

        let response = service.login("bob@a.test", TEST_PASSWORD).await.unwrap();

        assert_eq!(response.user.id, tenants.member_a.id);
        assert_eq!(response.user.org_id, response.organization.id);
        assert_eq!(response.organization.id, tenants.org_a.id);
        assert_eq!(response.user.role, UserRole::User);

        let claims = app_data.token_service.validate(&response.token).unwrap();
        assert_eq!(claims.sub, tenants.member_a.id);
        assert_eq!(claims.org, tenants.org_a.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (app_data, _tenants) = setup_test_app().await;
        let service = AuthService::new(app_data);

        match service.login("bob@a.test", "wrong-password").await {
            Err(InternalError::Credential(CredentialError::InvalidCredentials)) => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other.map(|r| r.user)),
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (app_data, _tenants) = setup_test_app().await;
        let service = AuthService::new(app_data);

        let result = service.login("nobody@a.test", TEST_PASSWORD).await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let (app_data, tenants) = setup_test_app().await;
        let service = AuthService::new(app_data.clone());
        let token = app_data
            .token_service
            .issue(&tenants.owner_a.id, &tenants.org_a.id)
            .unwrap();

        let caller = service.authenticate(&token).await.unwrap();

        assert_eq!(caller, tenants.owner_a());
        assert!(caller.is_owner());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_removed_user() {
        let (app_data, tenants) = setup_test_app().await;
        let service = AuthService::new(app_data.clone());
        let token = app_data
            .token_service
            .issue(&tenants.member_a.id, &tenants.org_a.id)
            .unwrap();

        app_data
            .user_store
            .delete(&app_data.db, &tenants.member_a.id)
            .await
            .unwrap();

        assert!(matches!(
            service.authenticate(&token).await,
            Err(InternalError::Credential(CredentialError::UnknownSubject { .. }))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_org_mismatch() {
        let (app_data, tenants) = setup_test_app().await;
        let service = AuthService::new(app_data.clone());
        let token = app_data
            .token_service
            .sign(&Claims {
                sub: tenants.member_a.id.clone(),
                org: tenants.org_b.id.clone(),
                iat: chrono::Utc::now().timestamp(),
                exp: chrono::Utc::now().timestamp() + 600,
                jti: "forged-org".to_string(),
            })
            .unwrap();

        assert!(service.authenticate(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_me_includes_organization() {
        let (app_data, tenants) = setup_test_app().await;
        let service = AuthService::new(app_data);

        let me = service.me(tenants.member_a()).await.unwrap();

        assert_eq!(me.user.id, tenants.member_a.id);
        assert_eq!(me.organization.map(|o| o.name), Some("Org A".to_string()));
    }
}
