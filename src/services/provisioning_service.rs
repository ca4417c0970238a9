use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::app_data::AppData;
use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::services::{crypto, validation};
use crate::stores::{NewCall, NewUser};
use crate::types::db::{organization, user};
use crate::types::internal::{CallDirection, UserRole};

pub const DEMO_ORGANIZATION_NAME: &str = "Admin Organization";
pub const DEMO_OWNER_NAME: &str = "Admin User";
pub const DEMO_OWNER_EMAIL: &str = "admin@crm.com";
pub const DEMO_OWNER_PASSWORD: &str = "admin123";

const DEMO_CONTACTS: [(&str, &str); 3] = [
    ("John Smith", "+1234567890"),
    ("Sarah Johnson", "+1234567891"),
    ("Michael Brown", "+1234567892"),
];

/// (phone number, direction, seconds before now, duration)
const DEMO_CALLS: [(&str, CallDirection, i64, i64); 3] = [
    ("+1234567890", CallDirection::Incoming, 2 * 3600, 180),
    ("+1234567891", CallDirection::Outgoing, 5 * 3600, 420),
    ("+1234567899", CallDirection::Incoming, 24 * 3600, 60),
];

/// A freshly created organization and its first owner
#[derive(Debug)]
pub struct ProvisionedTenant {
    pub organization: organization::Model,
    pub owner: user::Model,
}

/// Out-of-band tenant creation used by the CLI
pub struct ProvisioningService {
    app_data: Arc<AppData>,
}

impl ProvisioningService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }

    /// Create an organization together with its owner, atomically
    pub async fn bootstrap(
        &self,
        org_name: &str,
        owner_name: &str,
        owner_email: &str,
        password: &str,
    ) -> Result<ProvisionedTenant, InternalError> {
        validation::require_non_empty("org-name", org_name)?;
        validation::require_non_empty("owner-name", owner_name)?;
        validation::validate_email(owner_email)?;
        validation::validate_password(password)?;

        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let tenant = self
            .create_tenant(&txn, org_name, owner_name, owner_email, password)
            .await?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(
            org_id = %tenant.organization.id,
            owner_id = %tenant.owner.id,
            "Organization bootstrapped"
        );

        Ok(tenant)
    }

    async fn create_tenant(
        &self,
        conn: &impl ConnectionTrait,
        org_name: &str,
        owner_name: &str,
        owner_email: &str,
        password: &str,
    ) -> Result<ProvisionedTenant, InternalError> {
        let password_hash = crypto::hash_password(self.app_data.secret_manager.pepper(), password)?;

        let organization = self.app_data.organization_store.create(conn, org_name).await?;
        let owner = self
            .app_data
            .user_store
            .create(
                conn,
                NewUser {
                    org_id: &organization.id,
                    name: owner_name,
                    email: owner_email,
                    password_hash,
                    role: UserRole::Owner,
                },
            )
            .await?;

        Ok(ProvisionedTenant { organization, owner })
    }

    /// Create the demo tenant with sample contacts and calls.
    ///
    /// Returns `None` without writing anything when the demo owner exists.
    pub async fn seed_demo(&self) -> Result<Option<ProvisionedTenant>, InternalError> {
        let existing = self
            .app_data
            .user_store
            .find_by_email(&self.app_data.db, DEMO_OWNER_EMAIL)
            .await?;
        if existing.is_some() {
            tracing::info!("Demo tenant already present, nothing to seed");
            return Ok(None);
        }

        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let tenant = match self
            .create_tenant(
                &txn,
                DEMO_ORGANIZATION_NAME,
                DEMO_OWNER_NAME,
                DEMO_OWNER_EMAIL,
                DEMO_OWNER_PASSWORD,
            )
            .await
        {
            Ok(tenant) => tenant,
            // Another seeder got there first
            Err(InternalError::Record(RecordError::DuplicateEmail { .. })) => return Ok(None),
            Err(err) => return Err(err),
        };
        let org_id = &tenant.organization.id;
        let owner_id = &tenant.owner.id;

        for (name, phone_number) in DEMO_CONTACTS {
            self.app_data
                .contact_store
                .create(&txn, org_id, name, phone_number, owner_id)
                .await?;
        }

        let now = Utc::now().timestamp();
        for (phone_number, direction, ago, duration) in DEMO_CALLS {
            let contact_id = self
                .app_data
                .contact_store
                .resolve(&txn, org_id, phone_number)
                .await?
                .map(|c| c.id);
            self.app_data
                .call_store
                .create(
                    &txn,
                    NewCall {
                        org_id,
                        user_id: owner_id,
                        contact_id,
                        phone_number,
                        direction,
                        start_time: now - ago,
                        duration,
                    },
                )
                .await?;
        }

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(org_id = %org_id, "Demo tenant seeded");

        Ok(Some(tenant))
    }
}
