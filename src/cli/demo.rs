// Demo seed command

use std::sync::Arc;

use crate::app_data::AppData;
use crate::services::provisioning_service::{DEMO_OWNER_EMAIL, DEMO_OWNER_PASSWORD};
use crate::services::ProvisioningService;

/// Seed the demo tenant. Returns whether anything was written.
pub async fn seed_demo(app_data: Arc<AppData>) -> Result<bool, Box<dyn std::error::Error>> {
    match ProvisioningService::new(app_data).seed_demo().await? {
        Some(tenant) => {
            println!("Demo organization created: {}", tenant.organization.name);
            println!("  Email:    {}", DEMO_OWNER_EMAIL);
            println!("  Password: {}", DEMO_OWNER_PASSWORD);
            Ok(true)
        }
        None => {
            println!("Demo organization already exists, nothing to do");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_db, test_secret_manager};

    #[tokio::test]
    async fn test_second_run_writes_nothing() {
        let app_data = Arc::new(AppData::new(setup_test_db().await, test_secret_manager(), 60));

        assert!(seed_demo(app_data.clone()).await.unwrap());
        assert!(!seed_demo(app_data).await.unwrap());
    }
}
