// CLI module for administrative operations requiring database access

pub mod bootstrap;
pub mod demo;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app_data::AppData;

/// Calldesk server and administrative CLI
#[derive(Parser, Debug)]
#[command(name = "calldesk")]
#[command(about = "Multi-tenant call log and contact backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Create an organization together with its first owner
    Bootstrap {
        #[arg(long)]
        org_name: String,

        #[arg(long)]
        owner_name: String,

        #[arg(long)]
        owner_email: String,

        /// Generated when omitted
        #[arg(long)]
        password: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Create the demo organization with sample contacts and calls
    SeedDemo,
}

/// How provisioned credentials are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run an administrative command. `Serve` is handled by the binary.
pub async fn execute_command(
    command: Commands,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {
            return Err("serve is not an administrative command".into());
        }
        Commands::Bootstrap {
            org_name,
            owner_name,
            owner_email,
            password,
            format,
        } => {
            bootstrap::bootstrap_organization(
                app_data,
                &org_name,
                &owner_name,
                &owner_email,
                password,
                format,
            )
            .await?;
        }
        Commands::SeedDemo => {
            demo::seed_demo(app_data).await?;
        }
    }

    Ok(())
}
