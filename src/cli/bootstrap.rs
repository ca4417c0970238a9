// Bootstrap command implementation
// Creates an organization and its owner, then prints the credentials once

use std::sync::Arc;

use serde::Serialize;

use crate::app_data::AppData;
use crate::cli::OutputFormat;
use crate::services::crypto::generate_secure_password;
use crate::services::{ProvisionedTenant, ProvisioningService};

/// Credentials shown to the operator after provisioning
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCredentials {
    pub org_id: String,
    pub org_name: String,
    pub owner_id: String,
    pub email: String,
    pub password: String,
}

impl OwnerCredentials {
    pub fn new(tenant: &ProvisionedTenant, password: String) -> Self {
        Self {
            org_id: tenant.organization.id.clone(),
            org_name: tenant.organization.name.clone(),
            owner_id: tenant.owner.id.clone(),
            email: tenant.owner.email.clone(),
            password,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(format!(
                "Organization: {} ({})\nOwner id:     {}\nEmail:        {}\nPassword:     {}",
                self.org_name, self.org_id, self.owner_id, self.email, self.password
            )),
        }
    }
}

/// Create an organization with its first owner.
///
/// A random password is generated when none is supplied. The password is
/// printed once and never logged.
pub async fn bootstrap_organization(
    app_data: Arc<AppData>,
    org_name: &str,
    owner_name: &str,
    owner_email: &str,
    password: Option<String>,
    format: OutputFormat,
) -> Result<OwnerCredentials, Box<dyn std::error::Error>> {
    let password = password.unwrap_or_else(generate_secure_password);

    let tenant = ProvisioningService::new(app_data)
        .bootstrap(org_name, owner_name, owner_email, &password)
        .await?;

    let credentials = OwnerCredentials::new(&tenant, password);
    if format == OutputFormat::Text {
        println!("\n=== Organization Bootstrapped ===\n");
    }
    println!("{}", credentials.render(format)?);

    Ok(credentials)
}
