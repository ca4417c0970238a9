use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::services::{crypto, guard, validation};
use crate::stores::{NewUser, UserStore};
use crate::types::dto::auth::UserView;
use crate::types::dto::common::SuccessResponse;
use crate::types::dto::users::CreateUserRequest;
use crate::types::internal::Caller;

/// Team membership within the caller's organization
pub struct TeamService {
    app_data: Arc<AppData>,
    user_store: Arc<UserStore>,
}

impl TeamService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            app_data,
        }
    }

    /// Owners add users to their own organization
    pub async fn create_user(
        &self,
        caller: &Caller,
        request: CreateUserRequest,
    ) -> Result<UserView, InternalError> {
        guard::ensure_owner(caller, "create users")?;
        validation::require_non_empty("name", &request.name)?;
        validation::validate_email(&request.email)?;
        validation::validate_password(&request.password)?;

        let db = &self.app_data.db;

        // Skip the hashing cost for an obvious duplicate; the unique index
        // still decides races
        if self.user_store.find_by_email(db, &request.email).await?.is_some() {
            return Err(RecordError::DuplicateEmail {
                email: request.email,
            }
            .into());
        }

        let password_hash =
            crypto::hash_password(self.app_data.secret_manager.pepper(), &request.password)?;

        let user = self
            .user_store
            .create(
                db,
                NewUser {
                    org_id: &caller.org_id,
                    name: &request.name,
                    email: &request.email,
                    password_hash,
                    role: request.role,
                },
            )
            .await?;

        tracing::info!(
            user_id = %user.id,
            org_id = %user.org_id,
            created_by = %caller.user_id,
            "Team member created"
        );

        UserView::try_from(user)
    }

    pub async fn list_users(&self, caller: &Caller) -> Result<Vec<UserView>, InternalError> {
        self.user_store
            .list_by_org(&self.app_data.db, &caller.org_id)
            .await?
            .into_iter()
            .map(UserView::try_from)
            .collect()
    }

    /// Owners remove other members of their organization. Contacts and calls
    /// of the removed user stay.
    pub async fn remove_user(
        &self,
        caller: &Caller,
        user_id: &str,
    ) -> Result<SuccessResponse, InternalError> {
        guard::ensure_owner(caller, "remove team members")?;
        guard::ensure_not_self(caller, user_id)?;

        let db = &self.app_data.db;
        let target = self
            .user_store
            .find_by_id(db, user_id)
            .await?
            .ok_or_else(|| RecordError::not_found("User", user_id))?;

        guard::ensure_same_tenant(caller, &target.org_id)?;

        self.user_store.delete(db, &target.id).await?;

        tracing::info!(user_id = %target.id, removed_by = %caller.user_id, "Team member removed");

        Ok(SuccessResponse::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::AccessError;
    use crate::test::utils::setup_test_app;
    use crate::types::internal::UserRole;

    fn request(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "New Hire".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_owner_creates_user_in_own_org() {
        let (app_data, tenants) = setup_test_app().await;
        let service = TeamService::new(app_data);

        let user = service
            .create_user(&tenants.owner_a(), request("new@a.test", "secret1"))
            .await
            .unwrap();

        assert_eq!(user.org_id, tenants.org_a.id);
        assert_eq!(user.role, UserRole::User);

        let listed = service.list_users(&tenants.member_a()).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().any(|u| u.email == "new@a.test"));
    }

    #[tokio::test]
    async fn test_member_cannot_create_user() {
        let (app_data, tenants) = setup_test_app().await;
        let service = TeamService::new(app_data);

        let result = service
            .create_user(&tenants.member_a(), request("new@a.test", "secret1"))
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Access(AccessError::OwnerRequired { .. }))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_across_orgs() {
        let (app_data, tenants) = setup_test_app().await;
        let service = TeamService::new(app_data);

        let result = service
            .create_user(&tenants.owner_b(), request("alice@a.test", "secret1"))
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Record(RecordError::DuplicateEmail { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_user_validates_input() {
        let (app_data, tenants) = setup_test_app().await;
        let service = TeamService::new(app_data);

        for (email, password) in [("not-an-email", "secret1"), ("ok@a.test", "12345")] {
            let result = service
                .create_user(&tenants.owner_a(), request(email, password))
                .await;
            assert!(matches!(
                result,
                Err(InternalError::Record(RecordError::InvalidInput { .. }))
            ));
        }
    }

    #[tokio::test]
    async fn test_owner_cannot_remove_self() {
        let (app_data, tenants) = setup_test_app().await;
        let service = TeamService::new(app_data);

        let result = service
            .remove_user(&tenants.owner_a(), &tenants.owner_a.id)
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Access(AccessError::SelfRemoval))
        ));
    }

    #[tokio::test]
    async fn test_remove_user_rules() {
        let (app_data, tenants) = setup_test_app().await;
        let service = TeamService::new(app_data);

        let by_member = service
            .remove_user(&tenants.member_a(), &tenants.owner_a.id)
            .await;
        assert!(matches!(
            by_member,
            Err(InternalError::Access(AccessError::OwnerRequired { .. }))
        ));

        let unknown = service.remove_user(&tenants.owner_a(), "missing").await;
        assert!(matches!(
            unknown,
            Err(InternalError::Record(RecordError::NotFound { .. }))
        ));

        let foreign = service
            .remove_user(&tenants.owner_a(), &tenants.owner_b.id)
            .await;
        assert!(matches!(
            foreign,
            Err(InternalError::Access(AccessError::TenantMismatch { .. }))
        ));

        let removed = service
            .remove_user(&tenants.owner_a(), &tenants.member_a.id)
            .await
            .unwrap();
        assert!(removed.success);
        assert_eq!(service.list_users(&tenants.owner_a()).await.unwrap().len(), 1);
    }
}
