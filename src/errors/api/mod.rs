// API-facing error types
pub mod error;

pub use error::{ApiError, ErrorResponse};

#[cfg(test)]
mod error_test;
