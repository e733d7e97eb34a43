//! Application state for the CLI.
//!
//! Resolves the configuration (file, then flag overrides) and builds the one
//! HTTP client every command shares.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use persona_infra::client::HttpPersonaClient;
use persona_infra::config::{apply_overrides, load_client_config, resolve_data_dir};
use persona_types::config::ClientConfig;

pub struct AppState {
    pub client: Arc<HttpPersonaClient>,
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load `config.toml`, apply `--api-url` / `--user`, and build the client.
    pub async fn init(api_url: Option<String>, user_id: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let file_config = load_client_config(&data_dir).await;
        let config = apply_overrides(file_config, api_url, user_id);

        let client = HttpPersonaClient::from_config(&config)
            .with_context(|| format!("Cannot use persona service at '{}'", config.base_url))?;

        debug!(
            base_url = client.base_url(),
            user_id = %config.user_id,
            data_dir = %data_dir.display(),
            "Client configured"
        );

        Ok(Self {
            client: Arc::new(client),
            config,
            data_dir,
        })
    }
}
