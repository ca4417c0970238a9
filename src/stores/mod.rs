// Stores layer - tenant-scoped data access
pub mod call_store;
pub mod contact_store;
pub mod organization_store;
pub mod user_store;

pub use call_store::{CallStore, NewCall};
pub use contact_store::ContactStore;
pub use organization_store::OrganizationStore;
pub use user_store::{NewUser, UserStore};

use sea_orm::{DbErr, SqlErr};

/// True when the error came from a unique index rejecting the write
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
