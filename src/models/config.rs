//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub backend_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Per-request timeout for backend calls, in seconds.
    pub request_timeout_secs: u64,
    /// How long a fetched collection snapshot stays fresh, in seconds.
    pub snapshot_max_age_secs: u64,
}
