use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::{call, contact, user};
use crate::types::dto::calls::CallWithNames;
use crate::types::internal::CallDirection;

/// Fields for a call row. The natural key is
/// `(org_id, phone_number, start_time, user_id)`.
pub struct NewCall<'a> {
    pub org_id: &'a str,
    pub user_id: &'a str,
    pub contact_id: Option<String>,
    pub phone_number: &'a str,
    pub direction: CallDirection,
    pub start_time: i64,
    pub duration: i64,
}

/// Calls are append-only: create, look up, list.
#[derive(Debug, Default)]
pub struct CallStore;

impl CallStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a call. A row with the same natural key fails with
    /// `DuplicateCall`.
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        new_call: NewCall<'_>,
    ) -> Result<call::Model, InternalError> {
        let model = call::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            org_id: Set(new_call.org_id.to_string()),
            contact_id: Set(new_call.contact_id),
            user_id: Set(new_call.user_id.to_string()),
            phone_number: Set(new_call.phone_number.to_string()),
            direction: Set(new_call.direction.as_str().to_string()),
            start_time: Set(new_call.start_time),
            duration: Set(new_call.duration),
            created_at: Set(Utc::now().timestamp()),
        };

        model.insert(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Record(RecordError::DuplicateCall {
                    phone_number: new_call.phone_number.to_string(),
                    start_time: new_call.start_time,
                })
            } else {
                InternalError::database("create_call", e)
            }
        })
    }

    pub async fn find_by_natural_key(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
        phone_number: &str,
        start_time: i64,
        user_id: &str,
    ) -> Result<Option<call::Model>, InternalError> {
        call::Entity::find()
            .filter(call::Column::OrgId.eq(org_id))
            .filter(call::Column::PhoneNumber.eq(phone_number))
            .filter(call::Column::StartTime.eq(start_time))
            .filter(call::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_call_by_natural_key", e))
    }

    /// Calls of an org, newest `start_time` first, with contact and user
    /// display names
    pub async fn list_by_org(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<CallWithNames>, InternalError> {
        call::Entity::find()
            .select_only()
            .columns([
                call::Column::Id,
                call::Column::OrgId,
                call::Column::ContactId,
                call::Column::UserId,
                call::Column::PhoneNumber,
                call::Column::Direction,
                call::Column::StartTime,
                call::Column::Duration,
                call::Column::CreatedAt,
            ])
            .column_as(contact::Column::Name, "contact_name")
            .column_as(user::Column::Name, "user_name")
            .join(JoinType::LeftJoin, call::Relation::Contact.def())
            .join(JoinType::LeftJoin, call::Relation::User.def())
            .filter(call::Column::OrgId.eq(org_id))
            .order_by_desc(call::Column::StartTime)
            .order_by_asc(call::Column::Id)
            .limit(limit)
            .offset(offset)
            .into_model::<CallWithNames>()
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_calls", e))
    }

    /// Drop back-references to a deleted contact
    pub async fn clear_contact(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
        contact_id: &str,
    ) -> Result<u64, InternalError> {
        let result = call::Entity::update_many()
            .col_expr(call::Column::ContactId, Expr::value(Option::<String>::None))
            .filter(call::Column::OrgId.eq(org_id))
            .filter(call::Column::ContactId.eq(contact_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_call_contact", e))?;

        Ok(result.rows_affected)
    }

    pub async fn count_by_org(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
    ) -> Result<u64, InternalError> {
        call::Entity::find()
            .filter(call::Column::OrgId.eq(org_id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_calls", e))
    }
}
