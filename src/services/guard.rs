//! Pure authorization checks. Each returns the refusal instead of acting on
//! it, so callers decide which error to surface.

use crate::errors::internal::AccessError;
use crate::types::db::contact;
use crate::types::internal::Caller;

/// The resource must live in the caller's organization
pub fn ensure_same_tenant(caller: &Caller, resource_org_id: &str) -> Result<(), AccessError> {
    if caller.org_id != resource_org_id {
        return Err(AccessError::TenantMismatch {
            resource_org: resource_org_id.to_string(),
            caller_org: caller.org_id.clone(),
        });
    }
    Ok(())
}

/// Contacts may be changed by their creator or any owner of the org
pub fn ensure_can_modify_contact(
    caller: &Caller,
    contact: &contact::Model,
) -> Result<(), AccessError> {
    ensure_same_tenant(caller, &contact.org_id)?;
    if contact.created_by_user_id == caller.user_id || caller.is_owner() {
        return Ok(());
    }
    Err(AccessError::NotResourceOwner {
        user_id: caller.user_id.clone(),
        entity: "contact",
        id: contact.id.clone(),
    })
}

pub fn ensure_owner(caller: &Caller, action: &'static str) -> Result<(), AccessError> {
    if caller.is_owner() {
        Ok(())
    } else {
        Err(AccessError::OwnerRequired { action })
    }
}

pub fn ensure_not_self(caller: &Caller, target_user_id: &str) -> Result<(), AccessError> {
    if caller.user_id == target_user_id {
        Err(AccessError::SelfRemoval)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::UserRole;

    fn caller(id: &str, org: &str, role: UserRole) -> Caller {
        Caller {
            user_id: id.to_string(),
            org_id: org.to_string(),
            name: id.to_string(),
            email: format!("{}@example.com", id),
            role,
        }
    }

    fn contact_by(creator: &str, org: &str) -> contact::Model {
        contact::Model {
            id: "c-1".to_string(),
            org_id: org.to_string(),
            name: "John".to_string(),
            phone_number: "+1".to_string(),
            created_by_user_id: creator.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_tenant_mismatch() {
        let u = caller("u1", "org-a", UserRole::Owner);

        assert!(ensure_same_tenant(&u, "org-a").is_ok());
        assert_eq!(
            ensure_same_tenant(&u, "org-b"),
            Err(AccessError::TenantMismatch {
                resource_org: "org-b".to_string(),
                caller_org: "org-a".to_string(),
            })
        );
    }

    #[test]
    fn test_contact_ownership() {
        let creator = caller("u1", "org-a", UserRole::User);
        let colleague = caller("u2", "org-a", UserRole::User);
        let owner = caller("u3", "org-a", UserRole::Owner);
        let contact = contact_by("u1", "org-a");

        assert!(ensure_can_modify_contact(&creator, &contact).is_ok());
        assert!(ensure_can_modify_contact(&owner, &contact).is_ok());
        assert!(matches!(
            ensure_can_modify_contact(&colleague, &contact),
            Err(AccessError::NotResourceOwner { .. })
        ));
    }

    #[test]
    fn test_owner_of_other_org_cannot_modify_contact() {
        let foreign_owner = caller("u9", "org-b", UserRole::Owner);

        assert!(matches!(
            ensure_can_modify_contact(&foreign_owner, &contact_by("u1", "org-a")),
            Err(AccessError::TenantMismatch { .. })
        ));
    }

    #[test]
    fn test_role_gate_and_self_removal() {
        let owner = caller("u1", "org-a", UserRole::Owner);
        let member = caller("u2", "org-a", UserRole::User);

        assert!(ensure_owner(&owner, "create users").is_ok());
        assert_eq!(
            ensure_owner(&member, "create users"),
            Err(AccessError::OwnerRequired { action: "create users" })
        );
        assert_eq!(ensure_not_self(&owner, "u1"), Err(AccessError::SelfRemoval));
        assert!(ensure_not_self(&owner, "u2").is_ok());
    }
}
