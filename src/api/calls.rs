use std::sync::Arc;

use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::api::helpers::authenticate;
use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::call_service::DEFAULT_LIST_LIMIT;
use crate::services::{AuthService, CallService};
use crate::types::dto::calls::{CallView, CreateCallRequest, SyncCallsRequest, SyncCallsResponse};

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

#[derive(Tags)]
enum CallTags {
    /// Call history
    Calls,
}

pub struct CallsApi {
    auth_service: Arc<AuthService>,
    call_service: Arc<CallService>,
}

impl CallsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(Arc::clone(&app_data))),
            call_service: Arc::new(CallService::new(app_data)),
        }
    }
}

#[OpenApi(prefix_path = "/calls")]
impl CallsApi {
    /// Calls of an organization, newest first. `limit` is 1 to 500.
    #[oai(path = "/list", method = "get", tag = "CallTags::Calls")]
    async fn list(
        &self,
        auth: BearerAuth,
        #[oai(name = "orgId")] org_id: Query<String>,
        #[oai(default = "default_limit")] limit: Query<i64>,
        #[oai(default)] offset: Query<i64>,
    ) -> Result<Json<Vec<CallView>>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        let calls = self
            .call_service
            .list(&caller, &org_id.0, limit.0, offset.0)
            .await?;
        Ok(Json(calls))
    }

    /// Record a single call for the caller
    #[oai(path = "/create", method = "post", tag = "CallTags::Calls")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateCallRequest>,
    ) -> Result<Json<CallView>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.call_service.create(&caller, body.0).await?))
    }

    /// Upload the device call log; already recorded calls are skipped
    #[oai(path = "/sync", method = "post", tag = "CallTags::Calls")]
    async fn sync(
        &self,
        auth: BearerAuth,
        body: Json<SyncCallsRequest>,
    ) -> Result<Json<SyncCallsResponse>, ApiError> {
        let caller = authenticate(&self.auth_service, &auth).await?;
        Ok(Json(self.call_service.sync(&caller, body.0).await?))
    }
}
