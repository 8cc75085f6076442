use serde::{Deserialize, Serialize};
use vantage_core::{EngineSettings, LoggingConfig};

/// The HTTP-listener half of the server's configuration. `EngineSettings`
/// (rule timeout, auto-fix gate, ...) lives in `vantage-core` so the
/// analysis crates can be configured identically outside of a server
/// context (e.g. in tests or a future CLI); this struct only adds what's
/// specific to running the axum binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("VANTAGE_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("VANTAGE_PORT") {
            if let Ok(parsed) = port.parse() {
                self.port = parsed;
            }
        }
        if let Ok(timeout) = std::env::var("VANTAGE_REQUEST_TIMEOUT_SECONDS") {
            if let Ok(parsed) = timeout.parse() {
                self.request_timeout_seconds = parsed;
            }
        }
    }
}

/// Top-level server configuration: defaults, overridden by environment
/// variables, validated. Mirrors the teacher's `AppConfig::load` shape, with
/// the engine half delegated to `EngineSettings::load` so its own
/// env/TOML-file layering is not duplicated here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineSettings,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let mut server = ServerConfig::default();
        server.apply_env();

        if server.port == 0 {
            anyhow::bail!("server port must be greater than 0");
        }

        let engine = EngineSettings::load()?;
        let logging = LoggingConfig::default();

        Ok(Self {
            server,
            engine,
            logging,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_nonzero_port() {
        assert_ne!(ServerConfig::default().port, 0);
    }
}
