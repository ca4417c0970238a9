// Errors layer
pub mod api;
pub mod internal;

pub use api::ApiError;
pub use internal::InternalError;
