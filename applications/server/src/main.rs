/// Users Server - CRUD REST API for the users resource
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users_core::{UserFields, UserStore};
use users_server::{config::ServerConfig, create_router, state::AppState, Environment};
use users_storage::{MemoryUserStore, SchemaStatus, SqliteUserStore};

#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users CRUD REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server backed by the SQLite database
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Start a throwaway server backed by an in-memory store
    Demo {
        /// Listen port
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// List all users
    ListUsers {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Verify the database is reachable and the schema is in place
    CheckDb {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "users_server=info,users_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Demo { port } => {
            demo(port).await?;
        }
        Commands::ListUsers { config } => {
            list_users(config).await?;
        }
        Commands::CheckDb { config } => {
            check_db(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load_from(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteUserStore> {
    // SQLite creates the file but not its directory
    if let Some(file) = config.database.url.strip_prefix("sqlite://") {
        let file = file.split('?').next().unwrap_or(file);
        if let Some(parent) = std::path::Path::new(file).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    let pool = users_storage::create_pool(&config.database.url, &config.pool_settings()).await?;
    Ok(SqliteUserStore::new(pool))
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Users Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Environment: {}", config.server.environment);

    let store = open_store(&config).await?;

    // A failed self-check is reported by /health instead of stopping startup
    match users_storage::ensure_schema(store.pool()).await {
        Ok(SchemaStatus::Created) => tracing::info!("Database schema created"),
        Ok(SchemaStatus::Existing) => tracing::info!("Database schema verified"),
        Err(e) => tracing::error!("Database self-check failed: {}", e),
    }

    let app_state = AppState::new(Arc::new(store), config.server.environment);
    run(app_state, &config).await
}

async fn demo(port: u16) -> anyhow::Result<()> {
    let mut config = ServerConfig::default();
    config.server.port = port;
    config.server.web_dir = None;

    let seed: Vec<UserFields> = [
        ("Erik", "erik"),
        ("Debora", "debora"),
        ("Eike", "eike"),
        ("Julia", "julia"),
    ]
    .into_iter()
    .map(|(name, local)| UserFields {
        name: name.to_string(),
        email: format!("{}@example.com", local),
    })
    .collect();
    let store = MemoryUserStore::seeded(&seed)?;

    tracing::info!("Starting demo server with {} in-memory users", seed.len());

    let app_state = AppState::new(Arc::new(store), Environment::Development);
    run(app_state, &config).await
}

async fn run(app_state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_router(app_state, &config.server)?;

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Users API: http://{}/users", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn list_users(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config).await?;
    users_storage::ensure_schema(store.pool()).await?;

    let users = store.list().await?;

    println!("Users ({}):", users.len());
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

async fn check_db(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config).await?;

    if !store.ping().await {
        anyhow::bail!("Database at {} is not reachable", config.database.url);
    }
    println!("Database reachable: {}", config.database.url);

    match users_storage::ensure_schema(store.pool()).await? {
        SchemaStatus::Created => println!("Table 'users' was missing and has been created"),
        SchemaStatus::Existing => println!("Table 'users' present"),
    }

    Ok(())
}
