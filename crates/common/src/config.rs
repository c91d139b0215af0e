use std::time::Duration;

/// Default per-request timeout for upstream calls, in seconds.
const DEFAULT_GOTIFY_TIMEOUT_SECS: u64 = 10;

/// Default listen port for the API server.
const DEFAULT_API_PORT: u16 = 3000;

/// Connection settings for a Gotify server.
///
/// Frozen after construction; the client keeps its own copy of what it needs.
#[derive(Clone)]
pub struct GotifyConfig {
    /// Base URL of the Gotify server (no trailing slash)
    pub url: String,

    /// Client or application token sent as `X-Gotify-Key`
    pub key: String,

    /// Timeout applied to every outbound request (default: 10s)
    pub timeout: Duration,

    /// Optional upper bound on the number of `/message` pages fetched per count.
    /// `None` keeps paging until the server reports the last page.
    pub max_pages: Option<u64>,
}

impl GotifyConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.into(),
            timeout: Duration::from_secs(DEFAULT_GOTIFY_TIMEOUT_SECS),
            max_pages: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<u64>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl std::fmt::Debug for GotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GotifyConfig")
            .field("url", &self.url)
            .field("key", &"***")
            .field("timeout", &self.timeout)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gotify upstream settings
    pub gotify: GotifyConfig,

    /// Port the API server listens on (default: 3000)
    pub api_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("GOTIFY_URL")
            .ok_or_else(|| anyhow::anyhow!("GOTIFY_URL environment variable is required"))?;
        let key = lookup("GOTIFY_KEY")
            .ok_or_else(|| anyhow::anyhow!("GOTIFY_KEY environment variable is required"))?;

        let timeout_secs: u64 = lookup("GOTIFY_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_GOTIFY_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("GOTIFY_TIMEOUT_SECS must be a valid u64"))?;

        let max_pages = match lookup("GOTIFY_MAX_PAGES") {
            Some(raw) => {
                let pages: u64 = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("GOTIFY_MAX_PAGES must be a valid u64"))?;
                if pages == 0 {
                    anyhow::bail!("GOTIFY_MAX_PAGES must be greater than zero");
                }
                Some(pages)
            }
            None => None,
        };

        let api_port: u16 = lookup("API_PORT")
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?;

        let gotify = GotifyConfig::new(url, key)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_max_pages(max_pages);

        tracing::debug!(?gotify, api_port, "Configuration loaded");

        Ok(Self { gotify, api_port })
    }
}
