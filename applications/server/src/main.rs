/// Muse Server - Browser-based music streaming server
use clap::{Parser, Subcommand};
use muse_extractor::{InnertubeProvider, VideoProvider, YtDlpProvider};
use muse_server::{
    app::create_router,
    config::{ProviderKind, ServerConfig},
    state::AppState,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "muse-server")]
#[command(about = "Muse browser-based music streaming server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Delete stale anonymous sessions with no playlists
    PruneSessions {
        /// Only prune sessions older than this many days
        #[arg(short, long, default_value_t = 30)]
        days: u32,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print database statistics
    Stats {
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
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muse_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::PruneSessions { days, config } => {
            prune_sessions(days, config.as_deref()).await?;
        }
        Commands::Stats { config } => {
            stats(config.as_deref()).await?;
        }
    }

    Ok(())
}

fn build_provider(config: &ServerConfig) -> anyhow::Result<Arc<dyn VideoProvider>> {
    Ok(match config.extractor.provider {
        ProviderKind::Ytdlp => Arc::new(YtDlpProvider::new(config.extractor.ytdlp_path.clone())),
        ProviderKind::Innertube => Arc::new(InnertubeProvider::new()?),
    })
}

async fn serve(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    tracing::info!("Starting Muse Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = muse_storage::create_pool(&config.storage.database_url).await?;
    muse_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let provider = build_provider(&config)?;
    tracing::info!("Extraction provider: {}", provider.name());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let state = AppState::new(pool, provider, Arc::new(config));
    let app = create_router(state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn prune_sessions(days: u32, config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path)?;
    let pool = muse_storage::create_pool(&config.storage.database_url).await?;
    muse_storage::run_migrations(&pool).await?;

    let removed = muse_storage::users::prune_stale(&pool, days).await?;
    println!("Pruned {removed} stale sessions (older than {days} days, no playlists)");

    Ok(())
}

async fn stats(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path)?;
    let pool = muse_storage::create_pool(&config.storage.database_url).await?;
    muse_storage::run_migrations(&pool).await?;

    let users = muse_storage::users::count(&pool).await?;
    let playlists = muse_storage::playlists::count(&pool).await?;
    let songs = muse_storage::songs::count(&pool).await?;

    println!("Users:     {users}");
    println!("Playlists: {playlists}");
    println!("Songs:     {songs}");

    Ok(())
}
