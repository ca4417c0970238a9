use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::user;
use crate::types::internal::UserRole;

/// Fields for a user row. The password must already be hashed.
pub struct NewUser<'a> {
    pub org_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Default)]
pub struct UserStore;

impl UserStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a user; a taken email fails with `DuplicateEmail`
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        new_user: NewUser<'_>,
    ) -> Result<user::Model, InternalError> {
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            org_id: Set(new_user.org_id.to_string()),
            name: Set(new_user.name.to_string()),
            email: Set(new_user.email.to_string()),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.as_str().to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        model.insert(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Record(RecordError::DuplicateEmail {
                    email: new_user.email.to_string(),
                })
            } else {
                InternalError::database("create_user", e)
            }
        })
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find_by_id(user_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_by_email(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Members of an organization, newest first
    pub async fn list_by_org(
        &self,
        conn: &impl ConnectionTrait,
        org_id: &str,
    ) -> Result<Vec<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::OrgId.eq(org_id))
            .order_by_desc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Email)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Delete the user row only; contacts and calls keep the dangling id
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<(), InternalError> {
        let result = user::Entity::delete_by_id(user_id.to_string())
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(RecordError::not_found("User", user_id).into());
        }
        Ok(())
    }
}
