//! Environment configuration for the server
//!
//! | Variable                | Meaning                                   |
//! |-------------------------|-------------------------------------------|
//! | `APP_ADDR`              | full bind address, wins over `PORT`       |
//! | `PORT`                  | port on `0.0.0.0` (default 3000)          |
//! | `ALLOWED_ORIGINS`       | comma separated CORS allow-list           |
//! | `UPSTREAM_BASE_URL`     | upstream site (default https://yt1d.com)  |
//! | `UPSTREAM_TIMEOUT_SECS` | outbound timeout, unset means none        |

use ytmate_core::ClientConfig;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
    pub client: ClientConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).and_then(|value| non_empty(&value).map(ToString::to_string));

        let bind_addr = read("APP_ADDR").unwrap_or_else(|| {
            let port = read("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT);
            format!("0.0.0.0:{port}")
        });

        let allowed_origins = read("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut client = ClientConfig::default();
        if let Some(base_url) = read("UPSTREAM_BASE_URL") {
            client.base_url = base_url;
        }
        client.timeout_secs = read("UPSTREAM_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0);

        Self {
            bind_addr,
            allowed_origins,
            client,
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.client.base_url, "https://yt1d.com");
        assert_eq!(config.client.timeout_secs, None);
    }

    #[test]
    fn test_port_variable() {
        let config = config_from(&[("PORT", "8080")]);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_app_addr_wins_over_port() {
        let config = config_from(&[("APP_ADDR", "127.0.0.1:9999"), ("PORT", "8080")]);
        assert_eq!(config.bind_addr, "127.0.0.1:9999");
    }

    #[test]
    fn test_allowed_origins_split() {
        let config = config_from(&[(
            "ALLOWED_ORIGINS",
            " https://a.example , ,http://localhost:5173",
        )]);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_upstream_settings() {
        let config = config_from(&[
            ("UPSTREAM_BASE_URL", "http://127.0.0.1:4000"),
            ("UPSTREAM_TIMEOUT_SECS", "15"),
        ]);
        assert_eq!(config.client.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.client.timeout_secs, Some(15));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = config_from(&[("UPSTREAM_TIMEOUT_SECS", "0")]);
        assert_eq!(config.client.timeout_secs, None);
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = config_from(&[("APP_ADDR", "   "), ("UPSTREAM_BASE_URL", "")]);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.client.base_url, "https://yt1d.com");
    }
}
