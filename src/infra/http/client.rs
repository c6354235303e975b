//! Shared HTTP client construction

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder};

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    pub connect_timeout_secs: u64,

    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("TechMap/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(&config.user_agent)
        .use_rustls_tls()
        .build()
        .context("failed to create HTTP client")
}
