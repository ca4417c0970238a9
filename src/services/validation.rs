use crate::errors::internal::RecordError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn require_non_empty(field: &str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::invalid_input(field, "must not be empty"));
    }
    Ok(())
}

/// Shape check only: one `@`, non-empty local part, dotted domain
pub fn validate_email(email: &str) -> Result<(), RecordError> {
    let invalid = || RecordError::invalid_input("email", "must be a valid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), RecordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RecordError::invalid_input(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}
