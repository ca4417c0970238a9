mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_manager;
mod settings;

pub use database::{connect_database, migrate_database};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ConfigError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use secret_manager::{SecretError, SecretManager};
pub use settings::ServerSettings;
