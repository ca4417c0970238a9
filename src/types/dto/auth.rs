use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db::{organization, user};
use crate::types::internal::{Caller, UserRole};

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user as shown to clients. Never carries the password hash.
#[derive(Object, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: i64,
}

impl TryFrom<user::Model> for UserView {
    type Error = InternalError;

    fn try_from(u: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: u.role.parse()?,
            id: u.id,
            org_id: u.org_id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        })
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct OrganizationView {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

impl From<organization::Model> for OrganizationView {
    fn from(o: organization::Model) -> Self {
        Self {
            id: o.id,
            name: o.name,
            created_at: o.created_at,
        }
    }
}

/// Response model for a successful login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserView,
    pub organization: OrganizationView,

    /// Bearer token for subsequent requests
    pub token: String,
}

/// The authenticated caller and its organization
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: CallerView,

    /// Null when the organization row no longer exists
    pub organization: Option<OrganizationView>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CallerView {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<Caller> for CallerView {
    fn from(c: Caller) -> Self {
        Self {
            id: c.user_id,
            org_id: c.org_id,
            name: c.name,
            email: c.email,
            role: c.role,
        }
    }
}
