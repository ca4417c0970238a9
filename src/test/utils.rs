// Test utilities shared by unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::SecretManager;
use crate::services::crypto;
use crate::stores::{NewUser, OrganizationStore, UserStore};
use crate::types::db::{organization, user};
use crate::types::internal::{Caller, UserRole};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_PASSWORD: &str = "password123";

/// Fresh in-memory database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Two organizations: A with an owner and a plain user, B with an owner.
/// Every user's password is [`TEST_PASSWORD`].
pub struct TenantFixture {
    pub org_a: organization::Model,
    pub owner_a: user::Model,
    pub member_a: user::Model,
    pub org_b: organization::Model,
    pub owner_b: user::Model,
}

impl TenantFixture {
    pub fn owner_a(&self) -> Caller {
        caller_for(&self.owner_a)
    }

    pub fn member_a(&self) -> Caller {
        caller_for(&self.member_a)
    }

    pub fn owner_b(&self) -> Caller {
        caller_for(&self.owner_b)
    }
}

pub fn caller_for(user: &user::Model) -> Caller {
    Caller::try_from(user.clone()).expect("fixture user has a valid role")
}

pub async fn seed_tenants(db: &DatabaseConnection) -> TenantFixture {
    let orgs = OrganizationStore::new();
    let users = UserStore::new();
    let password_hash =
        crypto::hash_password(TEST_PEPPER, TEST_PASSWORD).expect("Failed to hash test password");

    let org_a = orgs.create(db, "Org A").await.expect("create org A");
    let org_b = orgs.create(db, "Org B").await.expect("create org B");

    let owner_a = add_user(
        db,
        &users,
        &org_a.id,
        "Alice Owner",
        "alice@a.test",
        &password_hash,
        UserRole::Owner,
    )
    .await;
    let member_a = add_user(
        db,
        &users,
        &org_a.id,
        "Bob Member",
        "bob@a.test",
        &password_hash,
        UserRole::User,
    )
    .await;
    let owner_b = add_user(
        db,
        &users,
        &org_b.id,
        "Carol Owner",
        "carol@b.test",
        &password_hash,
        UserRole::Owner,
    )
    .await;

    TenantFixture {
        org_a,
        owner_a,
        member_a,
        org_b,
        owner_b,
    }
}

async fn add_user(
    db: &DatabaseConnection,
    users: &UserStore,
    org_id: &str,
    name: &str,
    email: &str,
    password_hash: &str,
    role: UserRole,
) -> user::Model {
    users
        .create(
            db,
            NewUser {
                org_id,
                name,
                email,
                password_hash: password_hash.to_string(),
                role,
            },
        )
        .await
        .expect("create fixture user")
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(
        SecretManager::new(TEST_JWT_SECRET.to_string(), TEST_PEPPER.to_string())
            .expect("test secrets satisfy length rules"),
    )
}

/// Migrated database, seeded tenants and application data around them
pub async fn setup_test_app() -> (Arc<AppData>, TenantFixture) {
    let db = setup_test_db().await;
    let tenants = seed_tenants(&db).await;
    let app_data = Arc::new(AppData::new(db, test_secret_manager(), 60));
    (app_data, tenants)
}
