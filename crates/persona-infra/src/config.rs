//! Client configuration loader for Persona.
//!
//! Reads `config.toml` from the data directory (`~/.persona/` by default) and
//! deserializes it into [`ClientConfig`]. Falls back to defaults when the file
//! is missing or malformed.

use std::path::{Path, PathBuf};

use persona_types::config::ClientConfig;

/// Lower bound on the per-request timeout.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Resolve the data directory.
///
/// Uses `PERSONA_DATA_DIR` if set, otherwise `~/.persona`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PERSONA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".persona");
    }

    PathBuf::from(".persona")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`ClientConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(mut config) => {
            config.request_timeout_secs = config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Apply command-line overrides on top of the file configuration.
///
/// A flag (or its environment variable) wins over `config.toml`; blank values
/// are ignored.
pub fn apply_overrides(
    mut config: ClientConfig,
    base_url: Option<String>,
    user_id: Option<String>,
) -> ClientConfig {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }
    if let Some(user) = user_id.filter(|u| !u.trim().is_empty()) {
        config.user_id = user.trim().to_string();
    }
    config
}
