use poem_openapi::Object;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::internal::CallDirection;

/// Row shape of the joined call listing
#[derive(FromQueryResult, Debug, Clone)]
pub struct CallWithNames {
    pub id: String,
    pub org_id: String,
    pub contact_id: Option<String>,
    pub user_id: String,
    pub phone_number: String,
    pub direction: String,
    pub start_time: i64,
    pub duration: i64,
    pub created_at: i64,
    pub contact_name: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CallView {
    pub id: String,
    pub org_id: String,
    pub contact_id: Option<String>,
    pub user_id: String,
    pub phone_number: String,
    pub direction: CallDirection,

    /// Epoch seconds
    pub start_time: i64,

    /// Seconds
    pub duration: i64,
    pub created_at: i64,
    pub contact_name: Option<String>,
    pub user_name: Option<String>,
}

impl TryFrom<CallWithNames> for CallView {
    type Error = InternalError;

    fn try_from(c: CallWithNames) -> Result<Self, Self::Error> {
        Ok(Self {
            direction: c.direction.parse()?,
            id: c.id,
            org_id: c.org_id,
            contact_id: c.contact_id,
            user_id: c.user_id,
            phone_number: c.phone_number,
            start_time: c.start_time,
            duration: c.duration,
            created_at: c.created_at,
            contact_name: c.contact_name,
            user_name: c.user_name,
        })
    }
}

/// A call observed on the device
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CallEvent {
    pub phone_number: String,
    pub direction: CallDirection,
    pub start_time: i64,
    #[oai(default)]
    #[serde(default)]
    pub duration: i64,
}

#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest {
    pub org_id: String,
    pub phone_number: String,
    pub direction: CallDirection,
    pub start_time: i64,
    #[oai(default)]
    #[serde(default)]
    pub duration: i64,
}

impl CreateCallRequest {
    pub fn event(&self) -> CallEvent {
        CallEvent {
            phone_number: self.phone_number.clone(),
            direction: self.direction,
            start_time: self.start_time,
            duration: self.duration,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SyncCallsRequest {
    pub org_id: String,
    pub calls: Vec<CallEvent>,
}

/// Outcome for one submitted event, in submission order
#[derive(Object, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Id of the inserted or already recorded call; empty when the insert failed
    pub id: String,
    pub phone_number: String,
    pub synced: bool,

    /// `already_exists` or `insert_failed` when not synced
    #[oai(skip_serializing_if_is_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncCallsResponse {
    pub synced: u32,
    pub skipped: u32,
    pub failed: u32,
    pub results: Vec<SyncResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use poem_openapi::types::ToJSON;

    fn result(reason: Option<&str>) -> SyncResult {
        SyncResult {
            id: "c1".to_string(),
            phone_number: "+1".to_string(),
            synced: reason.is_none(),
            reason: reason.map(str::to_string),
        }
    }

    #[test]
    fn test_reason_omitted_from_body_when_synced() {
        let body = result(None).to_json().unwrap();

        assert_eq!(body["synced"], true);
        assert!(body.get("reason").is_none());
    }

    #[test]
    fn test_reason_present_when_skipped() {
        let body = result(Some("already_exists")).to_json().unwrap();

        assert_eq!(body["reason"], "already_exists");
        assert_eq!(body["phoneNumber"], "+1");
    }
}
