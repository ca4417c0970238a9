use thiserror::Error;

/// Row level failures: missing rows, uniqueness violations and bad input
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("A contact with phone number {phone_number} already exists")]
    DuplicatePhoneNumber { phone_number: String },

    #[error("A user with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("Call from {phone_number} at {start_time} is already recorded")]
    DuplicateCall { phone_number: String, start_time: i64 },

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl RecordError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}
