use std::sync::Arc;

use sea_orm::TransactionTrait;

use crate::app_data::AppData;
use crate::errors::internal::RecordError;
use crate::errors::InternalError;
use crate::services::{guard, validation};
use crate::stores::{CallStore, ContactStore, NewCall};
use crate::types::dto::calls::{
    CallEvent, CallView, CallWithNames, CreateCallRequest, SyncCallsRequest, SyncCallsResponse,
    SyncResult,
};
use crate::types::internal::Caller;

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 500;
pub const MAX_SYNC_BATCH: usize = 1000;

pub const REASON_ALREADY_EXISTS: &str = "already_exists";
pub const REASON_INSERT_FAILED: &str = "insert_failed";

/// What happened to one sync element
#[derive(Debug, PartialEq)]
enum SyncOutcome {
    Inserted(String),
    AlreadyExists(String),
}

/// Call creation, listing and device call-log sync
pub struct CallService {
    app_data: Arc<AppData>,
    call_store: Arc<CallStore>,
    contact_store: Arc<ContactStore>,
}

impl CallService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            call_store: Arc::clone(&app_data.call_store),
            contact_store: Arc::clone(&app_data.contact_store),
            app_data,
        }
    }

    pub async fn list(
        &self,
        caller: &Caller,
        org_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CallView>, InternalError> {
        guard::ensure_same_tenant(caller, org_id)?;
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(RecordError::invalid_input(
                "limit",
                format!("must be between 1 and {}", MAX_LIST_LIMIT),
            )
            .into());
        }
        if offset < 0 {
            return Err(RecordError::invalid_input("offset", "must not be negative").into());
        }

        self.call_store
            .list_by_org(&self.app_data.db, org_id, limit as u64, offset as u64)
            .await?
            .into_iter()
            .map(CallView::try_from)
            .collect()
    }

    /// Record one call. There is no dedup lookup; an exact natural-key
    /// duplicate is rejected by the store.
    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateCallRequest,
    ) -> Result<CallView, InternalError> {
        guard::ensure_same_tenant(caller, &request.org_id)?;
        let event = request.event();
        Self::validate_event("", &event)?;

        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let contact = self
            .contact_store
            .resolve(&txn, &caller.org_id, &event.phone_number)
            .await?;
        let contact_name = contact.as_ref().map(|c| c.name.clone());

        let call = self
            .call_store
            .create(&txn, Self::new_call(caller, &event, contact.map(|c| c.id)))
            .await?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(call_id = %call.id, org_id = %call.org_id, "Call recorded");

        CallView::try_from(CallWithNames {
            id: call.id,
            org_id: call.org_id,
            contact_id: call.contact_id,
            user_id: call.user_id,
            phone_number: call.phone_number,
            direction: call.direction,
            start_time: call.start_time,
            duration: call.duration,
            created_at: call.created_at,
            contact_name,
            user_name: Some(caller.name.clone()),
        })
    }

    /// Reconcile a batch of device call-log entries against recorded calls.
    ///
    /// The whole batch is validated before anything is written. Elements are
    /// then processed in order, each in its own transaction. A failing
    /// element is reported and does not stop the batch.
    pub async fn sync(
        &self,
        caller: &Caller,
        request: SyncCallsRequest,
    ) -> Result<SyncCallsResponse, InternalError> {
        guard::ensure_same_tenant(caller, &request.org_id)?;
        if request.calls.len() > MAX_SYNC_BATCH {
            return Err(RecordError::invalid_input(
                "calls",
                format!("at most {} calls per sync", MAX_SYNC_BATCH),
            )
            .into());
        }
        for (index, event) in request.calls.iter().enumerate() {
            Self::validate_event(&format!("calls[{}].", index), event)?;
        }

        let mut response = SyncCallsResponse {
            synced: 0,
            skipped: 0,
            failed: 0,
            results: Vec::with_capacity(request.calls.len()),
        };

        for event in &request.calls {
            let result = match self.sync_one(caller, event).await {
                Ok(SyncOutcome::Inserted(id)) => {
                    response.synced += 1;
                    SyncResult {
                        id,
                        phone_number: event.phone_number.clone(),
                        synced: true,
                        reason: None,
                    }
                }
                Ok(SyncOutcome::AlreadyExists(id)) => {
                    response.skipped += 1;
                    SyncResult {
                        id,
                        phone_number: event.phone_number.clone(),
                        synced: false,
                        reason: Some(REASON_ALREADY_EXISTS.to_string()),
                    }
                }
                Err(err) => {
                    tracing::error!(
                        user_id = %caller.user_id,
                        start_time = event.start_time,
                        "Failed to sync call: {}",
                        err
                    );
                    response.failed += 1;
                    SyncResult {
                        id: String::new(),
                        phone_number: event.phone_number.clone(),
                        synced: false,
                        reason: Some(REASON_INSERT_FAILED.to_string()),
                    }
                }
            };
            response.results.push(result);
        }

        tracing::info!(
            user_id = %caller.user_id,
            synced = response.synced,
            skipped = response.skipped,
            failed = response.failed,
            "Call sync finished"
        );

        Ok(response)
    }

    /// Check-then-insert for one event. First write wins: an existing
    /// record is never updated.
    async fn sync_one(
        &self,
        caller: &Caller,
        event: &CallEvent,
    ) -> Result<SyncOutcome, InternalError> {
        let txn = self
            .app_data
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let existing = self
            .call_store
            .find_by_natural_key(
                &txn,
                &caller.org_id,
                &event.phone_number,
                event.start_time,
                &caller.user_id,
            )
            .await?;
        if let Some(existing) = existing {
            txn.commit().await.map_err(InternalError::transaction_commit)?;
            return Ok(SyncOutcome::AlreadyExists(existing.id));
        }

        let contact_id = self
            .contact_store
            .resolve(&txn, &caller.org_id, &event.phone_number)
            .await?
            .map(|c| c.id);

        let inserted = self
            .call_store
            .create(&txn, Self::new_call(caller, event, contact_id))
            .await;

        match inserted {
            Ok(call) => {
                txn.commit().await.map_err(InternalError::transaction_commit)?;
                Ok(SyncOutcome::Inserted(call.id))
            }
            // Lost a race against a concurrent sync of the same call
            Err(InternalError::Record(RecordError::DuplicateCall { .. })) => {
                txn.rollback()
                    .await
                    .map_err(|e| InternalError::database("rollback_sync_call", e))?;

                let winner = self
                    .call_store
                    .find_by_natural_key(
                        &self.app_data.db,
                        &caller.org_id,
                        &event.phone_number,
                        event.start_time,
                        &caller.user_id,
                    )
                    .await?
                    .ok_or_else(|| RecordError::not_found("Call", &event.phone_number))?;
                Ok(SyncOutcome::AlreadyExists(winner.id))
            }
            Err(err) => Err(err),
        }
    }

    fn new_call<'a>(
        caller: &'a Caller,
        event: &'a CallEvent,
        contact_id: Option<String>,
    ) -> NewCall<'a> {
        NewCall {
            org_id: &caller.org_id,
            user_id: &caller.user_id,
            contact_id,
            phone_number: &event.phone_number,
            direction: event.direction,
            start_time: event.start_time,
            duration: event.duration,
        }
    }

    fn validate_event(prefix: &str, event: &CallEvent) -> Result<(), RecordError> {
        validation::require_non_empty(&format!("{}phoneNumber", prefix), &event.phone_number)?;
        if event.start_time < 0 {
            return Err(RecordError::invalid_input(
                format!("{}startTime", prefix),
                "must not be negative",
            ));
        }
        if event.duration < 0 {
            return Err(RecordError::invalid_input(
                format!("{}duration", prefix),
                "must not be negative",
            ));
        }
        Ok(())
    }
}
