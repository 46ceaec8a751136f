use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub moviecards: MovieCardsConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

/// Remote moviecards-service settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MovieCardsConfig {
    #[serde(default)]
    pub service_url: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfilesConfig {
    #[serde(default)]
    pub active: Vec<String>,
}

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); without a readable file the
    /// server section comes from `SERVER_HOST`/`SERVER_PORT`/`TOKIO_WORKER_THREADS`.
    /// The moviecards section is always completed from the environment.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path(), env_lookup)
    }

    /// Only a missing file falls back to the environment; unreadable or
    /// malformed files are errors.
    pub fn load_and_validate_from<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig { server: ServerConfig::from_env_with(&lookup), ..Default::default() },
            Err(e) => return Err(e.context(format!("cannot load config file {path}"))),
        };
        cfg.normalize_and_validate_with(&lookup)?;
        Ok(cfg)
    }

    pub fn normalize_and_validate_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.normalize()?;
        self.moviecards.normalize_from(&lookup);
        self.moviecards.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("SERVER_HOST").unwrap_or(defaults.host);
        let port = lookup("SERVER_PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let worker_threads = lookup("TOKIO_WORKER_THREADS")
            .and_then(|w| w.trim().parse::<usize>().ok())
            .or(defaults.worker_threads);
        Self { host, port, worker_threads }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl MovieCardsConfig {
    /// Fill blanks from `MOVIECARDS_SERVICE_URL` / `MOVIECARDS_SERVICE_TIMEOUT`,
    /// then from the built-in defaults.
    pub fn normalize_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.service_url.trim().is_empty() {
            self.service_url = lookup("MOVIECARDS_SERVICE_URL")
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        }
        self.service_url = self.service_url.trim().trim_end_matches('/').to_string();

        if self.timeout_ms.is_none() {
            self.timeout_ms = Some(
                lookup("MOVIECARDS_SERVICE_TIMEOUT")
                    .and_then(|t| t.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            );
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.service_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("moviecards.service_url must start with http:// or https://"));
        }
        if self.timeout_ms == Some(0) {
            return Err(anyhow!("moviecards.timeout_ms must be a positive number of milliseconds"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_gets_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate_with(no_env).unwrap();
        assert_eq!(cfg.moviecards.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(cfg.moviecards.timeout(), Duration::from_millis(5000));
        assert_eq!(cfg.server.port, 8081);
        assert!(cfg.profiles.active.is_empty());
    }

    #[test]
    fn file_values_win_over_environment() {
        let mut cfg = load_from_str(
            r#"
            [moviecards]
            service_url = "http://cards.internal:9000/api/"
            timeout_ms = 1500

            [profiles]
            active = ["integration-test"]
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate_with(|name| match name {
            "MOVIECARDS_SERVICE_URL" => Some("http://ignored".into()),
            "MOVIECARDS_SERVICE_TIMEOUT" => Some("10".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.moviecards.service_url, "http://cards.internal:9000/api");
        assert_eq!(cfg.moviecards.timeout_ms, Some(1500));
        assert_eq!(cfg.profiles.active, vec!["integration-test".to_string()]);
    }

    #[test]
    fn environment_fills_missing_values() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate_with(|name| match name {
            "MOVIECARDS_SERVICE_URL" => Some("https://cards.example.com/api".into()),
            "MOVIECARDS_SERVICE_TIMEOUT" => Some("250".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.moviecards.service_url, "https://cards.example.com/api");
        assert_eq!(cfg.moviecards.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn zero_timeout_and_bad_scheme_are_rejected() {
        let mut cfg = load_from_str("[moviecards]\ntimeout_ms = 0\n").unwrap();
        assert!(cfg.normalize_and_validate_with(no_env).is_err());

        let mut cfg = load_from_str("[moviecards]\nservice_url = \"ftp://x\"\n").unwrap();
        assert!(cfg.normalize_and_validate_with(no_env).is_err());
    }

    #[test]
    fn server_section_from_env() {
        let s = ServerConfig::from_env_with(|name| match name {
            "SERVER_HOST" => Some("0.0.0.0".into()),
            "SERVER_PORT" => Some("9090".into()),
            _ => None,
        });
        assert_eq!(s.bind_addr().unwrap().to_string(), "0.0.0.0:9090");
        assert_eq!(s.worker_threads, Some(4));
    }

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("moviecards-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn partial_server_section_keeps_other_sections() {
        let path = write_temp(
            "partial",
            "[server]\nport = 9000\n\n[moviecards]\nservice_url = \"http://cards:9000/api\"\n\n[profiles]\nactive = [\"test\"]\n",
        );
        let cfg = AppConfig::load_and_validate_from(path.to_str().unwrap(), no_env).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.moviecards.service_url, "http://cards:9000/api");
        assert_eq!(cfg.profiles.active, vec!["test".to_string()]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = write_temp("malformed", "[server]\nport = \"not a number\"\n");
        let err = AppConfig::load_and_validate_from(path.to_str().unwrap(), no_env).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("cannot load config file"));
    }

    #[test]
    fn missing_file_falls_back_to_environment() {
        let missing = std::env::temp_dir().join("moviecards-surely-missing-config.toml");
        let cfg = AppConfig::load_and_validate_from(missing.to_str().unwrap(), |name| match name {
            "SERVER_PORT" => Some("7070".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.server.port, 7070);
        assert_eq!(cfg.moviecards.service_url, DEFAULT_SERVICE_URL);
    }
}
