//! Environment-driven configuration shared by the CLI and the web UI.

use std::net::SocketAddr;

pub const DEFAULT_CATALOG_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UI_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog service, without a trailing slash.
    pub catalog_url: String,
    pub ui_bind: SocketAddr,
    /// Ranking size used when a request does not name one.
    pub default_top_k: usize,
}

impl ClientConfig {
    /// Reads `CATALOG_URL`, `UI_BIND` and `TOP_K`, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let catalog_url =
            std::env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());
        let ui_bind: SocketAddr = std::env::var("UI_BIND")
            .unwrap_or_else(|_| DEFAULT_UI_BIND.to_string())
            .parse()?;
        let default_top_k = match std::env::var("TOP_K") {
            Ok(raw) => raw.trim().parse()?,
            Err(_) => DEFAULT_TOP_K,
        };

        Ok(Self {
            catalog_url: normalize_base_url(&catalog_url, DEFAULT_CATALOG_URL),
            ui_bind,
            default_top_k,
        })
    }

    pub fn with_catalog_url(mut self, url: &str) -> Self {
        self.catalog_url = normalize_base_url(url, &self.catalog_url);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            ui_bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

/// Trims the candidate, adds `http://` when no scheme is given and strips
/// trailing slashes. A blank candidate yields `fallback` unchanged.
pub fn normalize_base_url(candidate: &str, fallback: &str) -> String {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}
