/// Moon Server - media catalog backend
use clap::{Parser, Subcommand};
use moon_server::{
    api,
    config::ServerConfig,
    services::{AccessControl, AuthService, FileStorage, NewAccount},
    state::AppState,
};
use moon_core::Storage;
use moon_storage::Database;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "moon-server")]
#[command(about = "Moon media catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MOON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user with the default playlists
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        #[arg(long, default_value = "")]
        firstname: String,
        #[arg(long, default_value = "")]
        lastname: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moon_server=info,moon_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            firstname,
            lastname,
        } => {
            add_user(
                &config,
                NewAccount {
                    username,
                    password,
                    firstname,
                    lastname,
                },
            )
            .await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
    }

    Ok(())
}

fn auth_service(config: &ServerConfig) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.access_token_expire_minutes,
        config.auth.bcrypt_cost,
    ))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Moon Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(Database::new(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    // Initialize file storage
    let file_storage = FileStorage::new(config.storage.media_dir.clone());
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!(
        "File storage initialized at {}",
        config.storage.media_dir.display()
    );

    let auth_service = auth_service(&config);
    tracing::info!(
        "Auth service initialized (tokens live {} minutes)",
        config.auth.access_token_expire_minutes
    );

    let app_state = AppState::new(db, auth_service, file_storage)
        .with_public_url(config.server.public_url.clone());

    let app = api::router(app_state, config.max_upload_bytes());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: &ServerConfig, account: NewAccount) -> anyhow::Result<()> {
    config.validate()?;
    let db = Arc::new(Database::new(&config.storage.database_url).await?);
    let access = AccessControl::new(db, auth_service(config));

    let user = access.signup(account).await?;
    println!("Created user {} - {}", user.id, user.username);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = Database::new(&config.storage.database_url).await?;
    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} ({} {})",
            user.id, user.username, user.firstname, user.lastname
        );
    }

    Ok(())
}
