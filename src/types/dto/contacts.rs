use poem_openapi::Object;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::types::db::contact;

#[derive(Object, FromQueryResult, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub phone_number: String,
    pub created_by_user_id: String,

    /// Null once the creator has been removed from the team
    pub created_by_user_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ContactView {
    pub fn from_model(c: contact::Model, created_by_user_name: Option<String>) -> Self {
        Self {
            id: c.id,
            org_id: c.org_id,
            name: c.name,
            phone_number: c.phone_number,
            created_by_user_id: c.created_by_user_id,
            created_by_user_name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub org_id: String,
    pub name: String,
    pub phone_number: String,
}

/// Only the provided fields change
#[derive(Object, Debug, Default, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub id: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteContactRequest {
    pub id: String,
}
