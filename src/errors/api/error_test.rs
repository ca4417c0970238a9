use crate::errors::internal::{AccessError, CredentialError, InternalError, RecordError};
use crate::errors::ApiError;
use sea_orm::DbErr;

#[test]
fn test_database_error_is_generic_internal_error() {
    let err = ApiError::from_internal_error(InternalError::database(
        "insert_call",
        DbErr::Custom("disk I/O error".to_string()),
    ));

    assert_eq!(err.status_code(), 500);
    assert_eq!(err.error_code(), "internal_error");
    assert_eq!(err.message(), "An internal error occurred");
}

#[test]
fn test_crypto_error_is_generic_internal_error() {
    let err = ApiError::from_internal_error(InternalError::crypto("argon2_init", "bad secret"));

    assert_eq!(err.status_code(), 500);
    assert!(!err.message().contains("argon2"));
}

#[test]
fn test_credential_errors_map_to_401() {
    let cases = [
        (CredentialError::InvalidCredentials, "invalid_credentials"),
        (CredentialError::invalid_token("bad signature"), "invalid_token"),
        (CredentialError::ExpiredToken, "expired_token"),
        (
            CredentialError::UnknownSubject {
                user_id: "u-1".to_string(),
            },
            "unauthenticated",
        ),
    ];

    for (credential_err, code) in cases {
        let err = ApiError::from(InternalError::from(credential_err));
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), code);
    }
}

#[test]
fn test_organization_not_found_is_404() {
    let err = ApiError::from(InternalError::from(CredentialError::OrganizationNotFound {
        org_id: "org-1".to_string(),
    }));

    match err {
        ApiError::NotFound(json) => assert_eq!(json.0.error, "organization_not_found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_access_errors_map_to_forbidden_without_leaking_ids() {
    let err = ApiError::from(InternalError::from(AccessError::TenantMismatch {
        resource_org: "org-secret-a".to_string(),
        caller_org: "org-secret-b".to_string(),
    }));

    assert_eq!(err.status_code(), 403);
    assert!(!err.message().contains("org-secret-a"));
}

#[test]
fn test_self_removal_is_invalid_operation() {
    let err = ApiError::from(InternalError::from(AccessError::SelfRemoval));

    match err {
        ApiError::InvalidOperation(json) => assert_eq!(json.0.status_code, 422),
        other => panic!("Expected InvalidOperation, got {:?}", other),
    }
}

#[test]
fn test_record_errors() {
    let not_found = ApiError::from(InternalError::from(RecordError::not_found("Contact", "c-1")));
    assert_eq!(not_found.status_code(), 404);
    assert_eq!(not_found.message(), "Contact not found");

    let conflict = ApiError::from(InternalError::from(RecordError::DuplicateEmail {
        email: "a@b.c".to_string(),
    }));
    assert_eq!(conflict.status_code(), 409);

    let invalid = ApiError::from(InternalError::from(RecordError::invalid_input(
        "limit",
        "must be between 1 and 500",
    )));
    assert_eq!(invalid.status_code(), 400);
    assert_eq!(invalid.message(), "Invalid limit: must be between 1 and 500");
}
