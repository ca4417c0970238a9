use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers::authenticate;
use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{AuthService, TeamService};
use crate::types::dto::auth::UserView;
use crate::types::dto::common::SuccessResponse;
use crate::types::dto::users::{CreateUserRequest, RemoveUserRequest};

#[derive(Tags)]
enum UserTags {
    /// Team management
    Users,
}

pub struct UsersApi {
    auth_service: Arc<AuthService>,
    team_service: Arc<TeamService>,
}

impl UsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(Arc::clone(&app_data))),
            team_service: Arc::new(TeamService::new(app_data)),
        }
    }
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// Add a user to the caller's organization (owner only)
    #[oai(path = "/create", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserView>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.team_service.create_user(&caller, body.0).await?))
    }

    /// Members of the caller's organization
    #[oai(path = "/list", method = "get", tag = "UserTags::Users")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<UserView>>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.team_service.list_users(&caller).await?))
    }

    /// Remove a member from the team (owner only, not yourself)
    #[oai(path = "/remove", method = "post", tag = "UserTags::Users")]
    async fn remove(
        &self,
        auth: BearerAuth,
        body: Json<RemoveUserRequest>,
    ) -> Result<Json<SuccessResponse>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.team_service.remove_user(&caller, &body.id).await?))
    }
}
