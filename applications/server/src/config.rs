/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_extractor")]
    pub extractor: ExtractorSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default = "default_web")]
    pub web: WebSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorSettings {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

/// Which external extraction implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Shell out to the yt-dlp binary
    Ytdlp,
    /// Scrape YouTube's Innertube JSON API over HTTP
    Innertube,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    #[serde(default = "default_queue_cookie_name")]
    pub queue_cookie_name: String,

    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebSettings {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables. The section separator is a
        // double underscore so keys like `storage.database_url` stay
        // addressable: MUSE_STORAGE__DATABASE_URL.
        settings = settings.add_source(
            config::Environment::with_prefix("MUSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.extractor.search_limit == 0 || self.extractor.search_limit > 50 {
            return Err(ServerError::Config(
                "extractor.search_limit must be between 1 and 50".to_string(),
            ));
        }

        if self.session.cookie_name.is_empty()
            || !cookie_name_is_token(&self.session.cookie_name)
            || !cookie_name_is_token(&self.session.queue_cookie_name)
        {
            return Err(ServerError::Config(
                "session cookie names must be non-empty header tokens".to_string(),
            ));
        }

        if self.session.cookie_name == self.session.queue_cookie_name {
            return Err(ServerError::Config(
                "session and queue cookies must use different names".to_string(),
            ));
        }

        Ok(())
    }
}

fn cookie_name_is_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/muse.db".to_string()
}

fn default_extractor() -> ExtractorSettings {
    ExtractorSettings {
        provider: default_provider(),
        ytdlp_path: default_ytdlp_path(),
        search_limit: default_search_limit(),
    }
}

fn default_provider() -> ProviderKind {
    ProviderKind::Ytdlp
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_search_limit() -> usize {
    20
}

fn default_session() -> SessionSettings {
    SessionSettings {
        cookie_name: default_cookie_name(),
        queue_cookie_name: default_queue_cookie_name(),
        max_age_days: default_max_age_days(),
    }
}

fn default_cookie_name() -> String {
    "muse_session".to_string()
}

fn default_queue_cookie_name() -> String {
    "muse_queue".to_string()
}

fn default_max_age_days() -> u32 {
    365
}

fn default_web() -> WebSettings {
    WebSettings {
        static_dir: default_static_dir(),
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            extractor: default_extractor(),
            session: default_session(),
            web: default_web(),
        }
    }
}
