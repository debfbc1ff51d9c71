use serde::Deserialize;

/// Global application configuration loaded from environment variables.
///
/// Every variable has a default, so the binary runs with no environment at
/// all — the run must never fail before it can write a diagnostic.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Orders source endpoint (GET, JSON array of orders)
    pub orders_url: String,

    /// Alert sink endpoint (POST, one call per delivered item)
    pub alerts_url: String,

    /// Update sink endpoint (POST, one batched call per run)
    pub update_url: String,

    /// Path of the append-only diagnostic log
    pub diag_log_path: String,

    /// Outbound HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            orders_url: std::env::var("ORDERS_API_URL")
                .unwrap_or_else(|_| "https://orders-api.com/orders".to_string()),
            alerts_url: std::env::var("ALERTS_API_URL")
                .unwrap_or_else(|_| "https://alert-api.com/alerts".to_string()),
            update_url: std::env::var("UPDATE_API_URL")
                .unwrap_or_else(|_| "https://update-api.com/update".to_string()),
            diag_log_path: std::env::var("DIAG_LOG_PATH")
                .unwrap_or_else(|_| "herald.log".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))?,
        })
    }
}
