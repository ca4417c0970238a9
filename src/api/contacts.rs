use std::sync::Arc;

use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::api::helpers::authenticate;
use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{AuthService, ContactService};
use crate::types::dto::common::SuccessResponse;
use crate::types::dto::contacts::{
    ContactView, CreateContactRequest, DeleteContactRequest, UpdateContactRequest,
};

#[derive(Tags)]
enum ContactTags {
    /// Organization contacts
    Contacts,
}

pub struct ContactsApi {
    auth_service: Arc<AuthService>,
    contact_service: Arc<ContactService>,
}

impl ContactsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(Arc::clone(&app_data))),
            contact_service: Arc::new(ContactService::new(app_data)),
        }
    }
}

#[OpenApi(prefix_path = "/contacts")]
impl ContactsApi {
    /// All contacts of an organization, newest first
    #[oai(path = "/list", method = "get", tag = "ContactTags::Contacts")]
    async fn list(
        &self,
        auth: BearerAuth,
        #[oai(name = "orgId")] org_id: Query<String>,
    ) -> Result<Json<Vec<ContactView>>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.contact_service.list(&caller, &org_id.0).await?))
    }

    #[oai(path = "/create", method = "post", tag = "ContactTags::Contacts")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateContactRequest>,
    ) -> Result<Json<ContactView>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.contact_service.create(&caller, body.0).await?))
    }

    /// Change name and/or phone number; creator or owner only
    #[oai(path = "/update", method = "post", tag = "ContactTags::Contacts")]
    async fn update(
        &self,
        auth: BearerAuth,
        body: Json<UpdateContactRequest>,
    ) -> Result<Json<ContactView>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.contact_service.update(&caller, body.0).await?))
    }

    #[oai(path = "/delete", method = "post", tag = "ContactTags::Contacts")]
    async fn delete(
        &self,
        auth: BearerAuth,
        body: Json<DeleteContactRequest>,
    ) -> Result<Json<SuccessResponse>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.contact_service.delete(&caller, &body.id).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_app, TenantFixture};
    use poem_openapi::auth::Bearer;

    fn bearer_for(app_data: &AppData, user_id: &str, org_id: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: app_data.token_service.issue(user_id, org_id).unwrap(),
        })
    }

    fn john(tenants: &TenantFixture) -> Json<CreateContactRequest> {
        Json(CreateContactRequest {
            org_id: tenants.org_a.id.clone(),
            name: "John".to_string(),
            phone_number: "+1".to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_twice_is_conflict() {
        let (app_data, tenants) = setup_test_app().await;
        let api = ContactsApi::new(app_data.clone());
        let auth = || bearer_for(&app_data, &tenants.owner_a.id, &tenants.org_a.id);

        let created = api.create(auth(), john(&tenants)).await.unwrap();
        assert_eq!(created.0.name, "John");

        match api.create(auth(), john(&tenants)).await {
            Err(ApiError::Conflict(json)) => assert_eq!(json.0.status_code, 409),
            other => panic!("Expected Conflict, got {:?}", other.map(|r| r.0)),
        }
    }

    #[tokio::test]
    async fn test_other_org_list_is_forbidden() {
        let (app_data, tenants) = setup_test_app().await;
        let api = ContactsApi::new(app_data.clone());

        let result = api
            .list(
                bearer_for(&app_data, &tenants.owner_b.id, &tenants.org_b.id),
                Query(tenants.org_a.id.clone()),
            )
            .await;

        match result {
            Err(ApiError::Forbidden(json)) => assert_eq!(json.0.error, "forbidden"),
            other => panic!("Expected Forbidden, got {:?}", other.map(|r| r.0)),
        }
    }

    #[tokio::test]
    async fn test_member_delete_of_owner_contact_forbidden() {
        let (app_data, tenants) = setup_test_app().await;
        let api = ContactsApi::new(app_data.clone());
        let created = api
            .create(
                bearer_for(&app_data, &tenants.owner_a.id, &tenants.org_a.id),
                john(&tenants),
            )
            .await
            .unwrap();

        let result = api
            .delete(
                bearer_for(&app_data, &tenants.member_a.id, &tenants.org_a.id),
                Json(DeleteContactRequest {
                    id: created.0.id.clone(),
                }),
            )
            .await;

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let (app_data, tenants) = setup_test_app().await;
        let api = ContactsApi::new(app_data.clone());

        let result = api
            .delete(
                bearer_for(&app_data, &tenants.owner_a.id, &tenants.org_a.id),
                Json(DeleteContactRequest {
                    id: "missing".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
