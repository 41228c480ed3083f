//! QR generation front end: configuration, request decoding and the
//! generator service shared by the CLI and integration tests.

pub mod config;
pub mod request;
pub mod service;

pub use config::{AppConfig, SettingsManager};
pub use request::{GenerateRequest, StyleRequest};
pub use service::{GeneratedQr, QrGenerator};

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env, then build the configuration from the environment.
pub fn init_config() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load(&SettingsManager::from_env())?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}
