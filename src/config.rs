use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Key expected in the `x-api-key` header on inbound requests
    pub api_key: String,

    /// OpenAI API key
    pub openai_api_key: String,

    /// OpenAI API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// YouTube Data API v3 key
    pub youtube_api_key: String,

    /// YouTube Data API v3 base URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// Rotating proxy username for transcript fetches
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// Rotating proxy password for transcript fetches
    #[serde(default)]
    pub proxy_password: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Proxy credentials for the transcript provider, if both halves are set
    pub fn proxy_credentials(&self) -> Option<(String, String)> {
        match (&self.proxy_username, &self.proxy_password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}
