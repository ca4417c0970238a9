// API layer - HTTP endpoints
pub mod auth;
pub mod calls;
pub mod contacts;
pub mod health;
pub mod helpers;
pub mod users;

pub use auth::{AuthApi, BearerAuth};
pub use calls::CallsApi;
pub use contacts::ContactsApi;
pub use health::HealthApi;
pub use users::UsersApi;
