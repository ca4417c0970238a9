use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::{contact, user};
use crate::types::dto::contacts::ContactView;

#[derive(Debug, Default)]
pub struct ContactStore;

impl ContactStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a contact; a phone number already used in the org fails with
    /// `DuplicatePhoneNumber`
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
        name: &str,
        phone_number: &str,
        created_by_user_id: &str,
    ) -> Result<contact::Model, InternalError> {
        let now = Utc::now().timestamp();
        let model = contact::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            org_id: Set(org_id.to_string()),
            name: Set(name.to_string()),
            phone_number: Set(phone_number.to_string()),
            created_by_user_id: Set(created_by_user_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(conn)
            .await
            .map_err(|e| Self::map_write_error("create_contact", phone_number, e))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        contact_id: &str,
    ) -> Result<Option<contact::Model>, InternalError> {
        contact::Entity::find_by_id(contact_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_contact", e))
    }

    /// Contact resolver: the org's contact whose stored phone number equals
    /// `phone_number` exactly. No normalisation, so "+1 555" and "+1555"
    /// are different numbers. Absence is not an error.
    pub async fn resolve(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
        phone_number: &str,
    ) -> Result<Option<contact::Model>, InternalError> {
        contact::Entity::find()
            .filter(contact::Column::OrgId.eq(org_id))
            .filter(contact::Column::PhoneNumber.eq(phone_number))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("resolve_contact", e))
    }

    /// Apply the provided fields and bump `updated_at`
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: contact::Model,
        name: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<contact::Model, InternalError> {
        let attempted_phone = phone_number.unwrap_or(&existing.phone_number).to_string();
        let mut model = existing.into_active_model();
        if let Some(name) = name {
            model.name = Set(name.to_string());
        }
        if let Some(phone_number) = phone_number {
            model.phone_number = Set(phone_number.to_string());
        }
        model.updated_at = Set(Utc::now().timestamp());

        model
            .update(conn)
            .await
            .map_err(|e| Self::map_write_error("update_contact", &attempted_phone, e))
    }

    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        contact_id: &str,
    ) -> Result<(), InternalError> {
        let result = contact::Entity::delete_by_id(contact_id.to_string())
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_contact", e))?;

        if result.rows_affected == 0 {
            return Err(RecordError::not_found("Contact", contact_id).into());
        }
        Ok(())
    }

    /// Contacts of an org with their creator's display name, newest first
    pub async fn list_by_org(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
    ) -> Result<Vec<ContactView>, InternalError> {
        contact::Entity::find()
            .select_only()
            .columns([
                contact::Column::Id,
                contact::Column::OrgId,
                contact::Column::Name,
                contact::Column::PhoneNumber,
                contact::Column::CreatedByUserId,
                contact::Column::CreatedAt,
                contact::Column::UpdatedAt,
            ])
            .column_as(user::Column::Name, "created_by_user_name")
            .join(JoinType::LeftJoin, contact::Relation::Creator.def())
            .filter(contact::Column::OrgId.eq(org_id))
            .order_by_desc(contact::Column::CreatedAt)
            .order_by_asc(contact::Column::Name)
            .into_model::<ContactView>()
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_contacts", e))
    }

    fn map_write_error(operation: &str, phone_number: &str, err: sea_orm::DbErr) -> InternalError {
        if is_unique_violation(&err) {
            InternalError::Record(RecordError::DuplicatePhoneNumber {
                phone_number: phone_number.to_string(),
            })
        } else {
            InternalError::database(operation, err)
        }
    }
}
