use std::env;
use std::path::PathBuf;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub data_dir: PathBuf,
    pub layer_config_path: Option<PathBuf>,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("CHORA_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3180);

        let cors_origin =
            env::var("CHORA_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3100".to_string());

        let data_dir = env::var("CHORA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public/data"));

        let layer_config_path = env::var("CHORA_LAYER_CONFIG").ok().map(PathBuf::from);

        Self {
            port,
            cors_origin,
            data_dir,
            layer_config_path,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
