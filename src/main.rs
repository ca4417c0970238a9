use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use calldesk_backend::api::{AuthApi, CallsApi, ContactsApi, HealthApi, UsersApi};
use calldesk_backend::cli::{self, Cli, Commands};
use calldesk_backend::config::{
    connect_database, init_logging, migrate_database, SecretManager, ServerSettings,
};
use calldesk_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let settings = ServerSettings::from_env()?;
    tracing::info!(database_url = %settings.database_url(), "Connecting to database");

    let db = connect_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    let secret_manager = Arc::new(SecretManager::init()?);
    let app_data = Arc::new(AppData::new(
        db,
        secret_manager,
        settings.token_lifetime_minutes(),
    ));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(app_data, &settings).await?,
        command => cli::execute_command(command, app_data).await?,
    }

    Ok(())
}

async fn serve(app_data: Arc<AppData>, settings: &ServerSettings) -> Result<(), std::io::Error> {
    let address = settings.server_address();

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(Arc::clone(&app_data)),
            ContactsApi::new(Arc::clone(&app_data)),
            CallsApi::new(Arc::clone(&app_data)),
            UsersApi::new(app_data),
        ),
        "Calldesk API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", address));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await
}
