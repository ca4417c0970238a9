use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::UserRole;

fn default_role() -> UserRole {
    UserRole::User
}

/// Request model for adding a team member
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,

    /// At least 6 characters
    pub password: String,

    #[oai(default = "default_role")]
    #[serde(default = "default_role")]
    pub role: UserRole,
}

/// Request model for removing a team member
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RemoveUserRequest {
    pub id: String,
}
