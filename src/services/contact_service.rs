use std::sync::Arc;

use sea_orm::TransactionTrait;

use crate::app_data::AppData;
use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::services::{guard, validation};
use crate::stores::{CallStore, ContactStore, UserStore};
use crate::types::dto::common::SuccessResponse;
use crate::types::dto::contacts::{ContactView, CreateContactRequest, UpdateContactRequest};
use crate::types::internal::Caller;

/// Tenant-scoped contact management
pub struct ContactService {
    app_data: Arc<AppData>,
    contact_store: Arc<ContactStore>,
    call_store: Arc<CallStore>,
    user_store: Arc<UserStore>,
}

impl ContactService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            contact_store: Arc::clone(&app_data.contact_store),
            call_store: Arc::clone(&app_data.call_store),
            user_store: Arc::clone(&app_data.user_store),
            app_data,
        }
    }

    pub async fn list(
        &self,
        caller: &Caller,
        org_id: &str,
    ) -> Result<Vec<ContactView>, InternalError> {
        guard::ensure_same_tenant(caller, org_id)?;

        self.contact_store.list_by_org(&self.app_data.db, org_id).await
    }

    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateContactRequest,
    ) -> Result<ContactView, InternalError> {
        guard::ensure_same_tenant(caller, &request.org_id)?;
        validation::require_non_empty("name", &request.name)?;
        validation::require_non_empty("phoneNumber", &request.phone_number)?;

        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        if self
            .contact_store
            .resolve(&txn, &request.org_id, &request.phone_number)
            .await?
            .is_some()
        {
            return Err(RecordError::DuplicatePhoneNumber {
                phone_number: request.phone_number,
            }
            .into());
        }

        let contact = self
            .contact_store
            .create(
                &txn,
                &request.org_id,
                &request.name,
                &request.phone_number,
                &caller.user_id,
            )
            .await?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(contact_id = %contact.id, org_id = %contact.org_id, "Contact created");

        Ok(ContactView::from_model(contact, Some(caller.name.clone())))
    }

    /// Change name and/or phone number. Only the creator or an owner may.
    pub async fn update(
        &self,
        caller: &Caller,
        request: UpdateContactRequest,
    ) -> Result<ContactView, InternalError> {
        if let Some(name) = &request.name {
            validation::require_non_empty("name", name)?;
        }
        if let Some(phone_number) = &request.phone_number {
            validation::require_non_empty("phoneNumber", phone_number)?;
        }

        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let existing = self
            .contact_store
            .find_by_id(&txn, &request.id)
            .await?
            .ok_or_else(|| RecordError::not_found("Contact", &request.id))?;

        guard::ensure_can_modify_contact(caller, &existing)?;

        if let Some(phone_number) = &request.phone_number {
            let holder = self
                .contact_store
                .resolve(&txn, &existing.org_id, phone_number)
                .await?;
            if holder.is_some_and(|other| other.id != existing.id) {
                return Err(RecordError::DuplicatePhoneNumber {
                    phone_number: phone_number.clone(),
                }
                .into());
            }
        }

        let updated = self
            .contact_store
            .update(
                &txn,
                existing,
                request.name.as_deref(),
                request.phone_number.as_deref(),
            )
            .await?;

        let creator_name = self
            .user_store
            .find_by_id(&txn, &updated.created_by_user_id)
            .await?
            .map(|u| u.name);

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(contact_id = %updated.id, user_id = %caller.user_id, "Contact updated");

        Ok(ContactView::from_model(updated, creator_name))
    }

    /// Delete a contact and clear it from the org's calls
    pub async fn delete(
        &self,
        caller: &Caller,
        contact_id: &str,
    ) -> Result<SuccessResponse, InternalError> {
        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let existing = self
            .contact_store
            .find_by_id(&txn, contact_id)
            .await?
            .ok_or_else(|| RecordError::not_found("Contact", contact_id))?;

        guard::ensure_can_modify_contact(caller, &existing)?;

        self.contact_store.delete(&txn, &existing.id).await?;
        let detached = self
            .call_store
            .clear_contact(&txn, &existing.org_id, &existing.id)
            .await?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(
            contact_id = %existing.id,
            detached_calls = detached,
            "Contact deleted"
        );

        Ok(SuccessResponse::ok())
    }
}
