//! Configuration schema definitions.
//!
//! All sections derive Serde traits and default every field, so an empty
//! file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Inbound request timeouts.
    pub timeouts: TimeoutConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Replace the port of the bind address, keeping the host.
    pub fn override_port(&mut self, port: u16) {
        let host = match self.listener.bind_address.rsplit_once(':') {
            Some((host, _)) => host.to_string(),
            None => self.listener.bind_address.clone(),
        };
        self.listener.bind_address = format!("{}:{}", host, port);
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9000".to_string(),
        }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// User-Agent sent to upstream servers.
    pub user_agent: String,

    /// Connection establishment timeout in seconds (client default if unset).
    pub connect_timeout_secs: Option<u64>,

    /// Total upstream request timeout in seconds (client default if unset).
    pub timeout_secs: Option<u64>,

    /// Maximum redirects followed per request.
    pub max_redirects: usize,

    /// Honor HTTP(S)_PROXY environment variables.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirects: 10,
            system_proxy: true,
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "Mozilla/5.0 (compatible; origin-relay/{})",
        env!("CARGO_PKG_VERSION")
    )
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Limits on inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size (POST data) in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "origin_relay=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.upstream.max_redirects, 10);
        assert!(config.upstream.timeout_secs.is_none());
        assert!(config.upstream.user_agent.contains("origin-relay/"));
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
            [upstream]
            timeout_secs = 15

            [observability]
            metrics_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.timeout_secs, Some(15));
        assert_eq!(config.upstream.max_redirects, 10);
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
    }

    #[test]
    fn test_override_port() {
        let mut config = RelayConfig::default();
        config.override_port(8123);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8123");

        config.listener.bind_address = "[::1]:80".to_string();
        config.override_port(81);
        assert_eq!(config.listener.bind_address, "[::1]:81");
    }
}
