// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use calldesk_backend::config::{connect_database, migrate_database, SecretManager};
use calldesk_backend::services::{AuthService, ProvisioningService, TeamService};
use calldesk_backend::types::dto::users::CreateUserRequest;
use calldesk_backend::types::internal::{Caller, UserRole};
use calldesk_backend::AppData;

pub const JWT_SECRET: &str = "integration-secret-key-at-least-32-chars";
pub const PEPPER: &str = "integration-pepper-value";
pub const PASSWORD: &str = "password123";

/// Application state over a fresh, migrated in-memory database
pub async fn setup_app() -> Arc<AppData> {
    setup_app_at("sqlite::memory:").await
}

/// Application state over the given database, migrated first
pub async fn setup_app_at(database_url: &str) -> Arc<AppData> {
    let db = connect_database(database_url)
        .await
        .expect("Failed to create test database");
    migrate_database(&db).await.expect("Failed to run migrations");

    let secrets = SecretManager::new(JWT_SECRET.to_string(), PEPPER.to_string())
        .expect("Test secrets should be valid");

    Arc::new(AppData::new(db, Arc::new(secrets), 60))
}

/// An organization with an owner and one plain user, both able to log in
/// with [`PASSWORD`].
pub struct Tenant {
    pub org_id: String,
    pub owner: Caller,
    pub owner_token: String,
    pub member: Caller,
    pub member_token: String,
}

pub async fn provision_tenant(app_data: &Arc<AppData>, slug: &str) -> Tenant {
    let owner_email = format!("owner@{}.test", slug);
    let member_email = format!("member@{}.test", slug);

    ProvisioningService::new(Arc::clone(app_data))
        .bootstrap(&format!("Org {}", slug), "Owner", &owner_email, PASSWORD)
        .await
        .expect("Bootstrap should succeed");

    let auth = AuthService::new(Arc::clone(app_data));
    let owner_login = auth.login(&owner_email, PASSWORD).await.unwrap();
    let owner = auth.authenticate(&owner_login.token).await.unwrap();

    TeamService::new(Arc::clone(app_data))
        .create_user(
            &owner,
            CreateUserRequest {
                name: "Member".to_string(),
                email: member_email.clone(),
                password: PASSWORD.to_string(),
                role: UserRole::User,
            },
        )
        .await
        .expect("Owner should be able to add a member");

    let member_login = auth.login(&member_email, PASSWORD).await.unwrap();
    let member = auth.authenticate(&member_login.token).await.unwrap();

    Tenant {
        org_id: owner.org_id.clone(),
        owner,
        owner_token: owner_login.token,
        member,
        member_token: member_login.token,
    }
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Environment variables are process-global, so tests that modify them
/// must run serially.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
