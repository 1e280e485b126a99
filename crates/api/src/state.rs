use std::sync::Arc;

use advisor_client::submission::SubmissionClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the evaluation backend. Holds the pooled reqwest client.
    pub client: Arc<SubmissionClient>,
}

impl AppState {
    /// Build state from configuration, including the outbound HTTP client.
    pub fn from_config(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.backend_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let client = SubmissionClient::with_client(http, config.backend_url.clone());

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
        })
    }
}
