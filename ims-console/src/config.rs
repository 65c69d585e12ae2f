/// Console configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | IMS_API_BASE_URL | http://localhost:8080 | Backend base URL |
/// | IMS_REQUEST_TIMEOUT_SECS | 30 | HTTP request timeout |
/// | IMS_SCAN_INTERVAL_MS | 1500 | Delay between decode attempts |
/// | IMS_PAGE_SIZE | 10 | Rows per page in list views |
/// | IMS_SESSION_FILE | ./ims-session.json | Persisted session |
/// | IMS_LOG_LEVEL | info | Log level |
/// | IMS_LOG_JSON | false | JSON log output |
///
/// A `.env` file is honoured when the binary calls `dotenvy::dotenv()` first.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub scan_interval_ms: u64,
    pub page_size: usize,
    pub session_file: String,
    pub log_level: String,
    pub log_json: bool,
}

impl ConsoleConfig {
    /// Load from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("IMS_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            request_timeout_secs: std::env::var("IMS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            scan_interval_ms: std::env::var("IMS_SCAN_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(1500),
            page_size: std::env::var("IMS_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
            session_file: std::env::var("IMS_SESSION_FILE")
                .unwrap_or_else(|_| "./ims-session.json".into()),
            log_level: std::env::var("IMS_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("IMS_LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn client_config(&self) -> ims_client::ClientConfig {
        ims_client::ClientConfig::new(&self.api_base_url).with_timeout(self.request_timeout_secs)
    }

    pub fn scan_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scan_interval_ms)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
