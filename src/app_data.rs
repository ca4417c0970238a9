use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::SecretManager;
use crate::services::TokenService;
use crate::stores::{CallStore, ContactStore, OrganizationStore, UserStore};

/// Shared application state, created once in main and handed to services.
///
/// ```text
/// main.rs
///   ├─ connect + migrate database
///   ├─ SecretManager::init()
///   └─ AppData::new(db, secrets, token lifetime)
///        ├─ token_service
///        └─ organization / user / contact / call stores
///   ↓ Arc<AppData>
///   ├─ AuthService, ContactService, CallService, TeamService
///   └─ ProvisioningService (CLI)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub token_service: Arc<TokenService>,
    pub organization_store: Arc<OrganizationStore>,
    pub user_store: Arc<UserStore>,
    pub contact_store: Arc<ContactStore>,
    pub call_store: Arc<CallStore>,
}

impl AppData {
    /// The database must already be migrated
    pub fn new(
        db: DatabaseConnection,
        secret_manager: Arc<SecretManager>,
        token_lifetime_minutes: i64,
    ) -> Self {
        tracing::debug!("Creating application data");

        let token_service = Arc::new(TokenService::new(
            secret_manager.jwt_secret().to_string(),
            token_lifetime_minutes,
        ));

        Self {
            db,
            secret_manager,
            token_service,
            organization_store: Arc::new(OrganizationStore::new()),
            user_store: Arc::new(UserStore::new()),
            contact_store: Arc::new(ContactStore::new()),
            call_store: Arc::new(CallStore::new()),
        }
    }
}
