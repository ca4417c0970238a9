use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::organization;

/// Organizations are created out-of-band (bootstrap, demo seed) and only
/// read by request handlers.
#[derive(Debug, Default)]
pub struct OrganizationStore;

impl OrganizationStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<organization::Model, InternalError> {
        let model = organization::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        model
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_organization", e))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
    ) -> Result<Option<organization::Model>, InternalError> {
        organization::Entity::find_by_id(org_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_organization", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn test_create_and_find_organization() {
        let db = setup_test_db().await;
        let store = OrganizationStore::new();

        let org = store.create(&db, "Acme").await.unwrap();
        let found = store.find_by_id(&db, &org.id).await.unwrap();

        assert_eq!(found, Some(org));
        assert!(store.find_by_id(&db, "missing").await.unwrap().is_none());
    }
}
