// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod call_service;
pub mod contact_service;
pub mod crypto;
pub mod guard;
pub mod provisioning_service;
pub mod team_service;
pub mod token_service;
pub mod validation;

pub use auth_service::AuthService;
pub use call_service::CallService;
pub use contact_service::ContactService;
pub use provisioning_service::{ProvisionedTenant, ProvisioningService};
pub use team_service::TeamService;
pub use token_service::TokenService;
