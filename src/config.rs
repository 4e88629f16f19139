// Layered runtime configuration: built-in defaults, then a TOML file, then
// CROP_ADVISOR_* environment variables (nested keys split on "__").

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::artifact_loader::ArtifactPaths;
use crate::errors::{AdvisorError, AdvisorResult};

pub const DEFAULT_CONFIG_FILE: &str = "crop_advisor.toml";
pub const ENV_PREFIX: &str = "CROP_ADVISOR_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive, overridden by RUST_LOG
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            ansi: default_ansi(),
        }
    }
}

impl AdvisorConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn figment(path: Option<&Path>) -> Figment {
    let file = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    Figment::from(Serialized::defaults(AdvisorConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load configuration. A missing default `crop_advisor.toml` is not an error,
/// but a path passed explicitly must exist.
pub fn load_config(path: Option<&Path>) -> AdvisorResult<AdvisorConfig> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(AdvisorError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
    }

    let config: AdvisorConfig = figment(path).extract()?;

    if config.logging.level.trim().is_empty() {
        return Err(AdvisorError::config("logging.level must not be empty"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AdvisorConfig::default());
            assert_eq!(config.artifacts.model_path, PathBuf::from("model.json"));
            assert_eq!(config.bind_address(), "0.0.0.0:8080");
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [artifacts]
                model_path = "models/crop.onnx"
                scaler_path = "models/scaler.json"

                [server]
                port = 9000
                "#,
            )?;

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.artifacts.model_path, PathBuf::from("models/crop.onnx"));
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[server]\nport = 9000\n")?;
            jail.set_env("CROP_ADVISOR_SERVER__PORT", "7070");
            jail.set_env("CROP_ADVISOR_LOGGING__LEVEL", "debug");

            let config = load_config(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 7070);
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn empty_log_level_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CROP_ADVISOR_LOGGING__LEVEL", " ");
            assert!(load_config(None).is_err());
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("CROP_ADVISOR_SERVER__PORT", "7070");

            let err = load_config(Some(Path::new("absent.toml")))
                .expect_err("an explicit path must exist");
            assert!(matches!(err, AdvisorError::Config { .. }));
            assert!(err.to_string().contains("absent.toml"));
            Ok(())
        });
    }
}
