use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8010";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid BLOG_BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid BLOG_ALLOWED_ORIGIN {0:?}")]
    AllowedOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` keeps everything in memory.
    pub store_path: Option<PathBuf>,
    /// `None` allows any origin.
    pub allowed_origin: Option<axum::http::HeaderValue>,
}

impl Config {
    /// Reads `BLOG_*` variables, after loading a `.env` file if there is one.
    pub fn from_env() -> Result<Config, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded environment from {path:?}"),
            Err(err) if err.not_found() => (),
            Err(err) => tracing::warn!("ignoring unreadable .env file: {err}"),
        }

        Config::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let bind_addr = lookup("BLOG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_addr.clone(),
                source,
            })?;

        let store_path = lookup("BLOG_STORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let allowed_origin = match lookup("BLOG_ALLOWED_ORIGIN") {
            Some(origin) => Some(
                axum::http::HeaderValue::from_str(&origin)
                    .map_err(|_| ConfigError::AllowedOrigin(origin))?,
            ),
            None => None,
        };

        Ok(Config {
            bind_addr,
            store_path,
            allowed_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert!(config.store_path.is_none());
        assert!(config.allowed_origin.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BLOG_BIND_ADDR", "127.0.0.1:3000"),
            ("BLOG_STORE_PATH", "/var/lib/blog"),
            ("BLOG_ALLOWED_ORIGIN", "https://example.com"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.store_path, Some(PathBuf::from("/var/lib/blog")));
        assert_eq!(
            config.allowed_origin,
            Some(axum::http::HeaderValue::from_static("https://example.com"))
        );
    }

    #[test]
    fn blank_store_path_means_memory() {
        let config = config_from(&[("BLOG_STORE_PATH", "  ")]).unwrap();
        assert!(config.store_path.is_none());
    }

    #[test]
    fn rejects_bad_bind_addr() {
        assert!(matches!(
            config_from(&[("BLOG_BIND_ADDR", "nowhere")]),
            Err(ConfigError::BindAddr { .. })
        ));
    }
}
