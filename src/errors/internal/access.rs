use thiserror::Error;

/// Authorization refusals for an authenticated caller
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("Resource belongs to organization {resource_org}, caller is in {caller_org}")]
    TenantMismatch {
        resource_org: String,
        caller_org: String,
    },

    #[error("User {user_id} did not create {entity} {id}")]
    NotResourceOwner {
        user_id: String,
        entity: &'static str,
        id: String,
    },

    #[error("Owner role required for {action}")]
    OwnerRequired { action: &'static str },

    #[error("Owners cannot remove themselves from the team")]
    SelfRemoval,
}
