// Internal types - not persisted, not serialized as API payloads
pub mod auth;
pub mod direction;
pub mod role;

pub use auth::{Caller, Claims};
pub use direction::CallDirection;
pub use role::UserRole;
