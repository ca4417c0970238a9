// Database entities - SeaORM models
pub mod call;
pub mod contact;
pub mod organization;
pub mod user;
