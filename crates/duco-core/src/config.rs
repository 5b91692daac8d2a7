// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session configuration.
//!
//! Files are YAML, TOML or JSON, chosen by extension:
//!
//! ```yaml
//! connection:
//!   type: tcp
//!   host: ducobox.local
//!   port: 502
//!   unit_id: 1
//!   timeout: 1s
//! logging:
//!   level: info
//!   format: text
//! ```
//!
//! # Environment Variable Override
//!
//! ```text
//! DUCO_HOST=192.168.1.20   (TCP only)
//! DUCO_UNIT_ID=1
//! DUCO_LOG_LEVEL=debug
//! ```

use std::env;
use std::fs;
use std::path::Path;

use duco_modbus::{ModbusConfig, ModbusRtuConfig, ModbusTcpConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use crate::error::{ConfigError, ConfigResult};
use crate::logging::{try_parse_level, LogFormat};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "DUCO";

// =============================================================================
// DucoConfig
// =============================================================================

/// Configuration of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DucoConfig {
    /// Bus connection.
    #[serde(default)]
    pub connection: ModbusConfig,

    /// Logging settings for [`init_logging`](crate::logging::init_logging).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DucoConfig {
    /// Creates a TCP configuration for `host` on port 502.
    pub fn tcp(host: impl Into<String>) -> Self {
        Self {
            connection: ModbusTcpConfig::new(host).into(),
            logging: LoggingConfig::default(),
        }
    }

    /// Creates a 9600 8N1 serial configuration for `port`.
    pub fn serial(port: impl Into<String>) -> Self {
        Self {
            connection: ModbusRtuConfig::new(port).into(),
            logging: LoggingConfig::default(),
        }
    }

    /// Creates a configuration from a client type and port.
    ///
    /// `"tcp"` connects to `ducobox.local` on the given TCP port; `"serial"`
    /// opens the given serial device at 9600 8N1.
    pub fn for_client(kind: &str, port: &str, unit_id: u8) -> ConfigResult<Self> {
        let connection = match kind {
            "tcp" => {
                let port: u16 = port
                    .parse()
                    .map_err(|_| ConfigError::validation("connection.port", format!("'{port}' is not a TCP port")))?;
                ModbusTcpConfig::default().with_port(port).with_unit_id(unit_id).into()
            }
            "serial" => ModbusRtuConfig::new(port).with_unit_id(unit_id).into(),
            other => {
                return Err(ConfigError::validation(
                    "connection.type",
                    format!("client type must be serial or tcp, got '{other}'"),
                ));
            }
        };

        Ok(Self {
            connection,
            logging: LoggingConfig::default(),
        })
    }

    /// Returns the unit id of the ventilation master.
    pub fn unit_id(&self) -> u8 {
        self.connection.unit_id()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.connection
            .validate()
            .map_err(|e| ConfigError::validation("connection", e.to_string()))?;
        self.logging.validate()
    }

    /// Applies `DUCO_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| format!("{ENV_PREFIX}_{suffix}");

        if let Some(value) = lookup(&var("HOST")) {
            if let ModbusConfig::Tcp(tcp) = &mut self.connection {
                tcp.host = value;
            }
        }

        if let Some(value) = lookup(&var("UNIT_ID")) {
            let unit_id: u8 = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(var("UNIT_ID"), "expected a unit id"))?;
            match &mut self.connection {
                ModbusConfig::Tcp(tcp) => tcp.unit_id = unit_id,
                ModbusConfig::Serial(rtu) => rtu.unit_id = unit_id,
            }
        }

        if let Some(value) = lookup(&var("LOG_LEVEL")) {
            if try_parse_level(&value).is_none() {
                return Err(ConfigError::invalid_env_var(var("LOG_LEVEL"), "expected a log level"));
            }
            self.logging.level = value;
        }

        Ok(())
    }
}

// =============================================================================
// LoggingConfig
// =============================================================================

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level name (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Validates the level name.
    pub fn validate(&self) -> ConfigResult<()> {
        if try_parse_level(&self.level).is_none() {
            return Err(ConfigError::validation(
                "logging.level",
                format!("unknown level '{}'", self.level),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }
}

/// Loads, overrides from the environment and validates a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<DucoConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    if !path.exists() {
        return Err(ConfigError::file_not_found(path));
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

    let format = ConfigFormat::from_path(path)?;
    let mut config: DucoConfig =
        parse_str(&content, format).map_err(|message| ConfigError::parse(path, message))?;

    config.apply_env_overrides()?;
    config.validate()?;

    debug!(connection = ?config.connection, "Configuration loaded");
    Ok(config)
}

/// Parses and validates configuration content. No environment overrides
/// are applied.
pub fn parse_config(content: &str, format: ConfigFormat) -> ConfigResult<DucoConfig> {
    let config: DucoConfig =
        parse_str(content, format).map_err(|message| ConfigError::parse("<string>", message))?;
    config.validate()?;
    Ok(config)
}

fn parse_str<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> Result<T, String> {
    match format {
        ConfigFormat::Yaml => yaml_parse(content),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// YAML goes through the `config` crate.
fn yaml_parse<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MASTER_DEFAULT_UNIT_ID;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_for_client() {
        let config = DucoConfig::for_client("tcp", "502", 1).unwrap();
        match &config.connection {
            ModbusConfig::Tcp(tcp) => {
                assert_eq!(tcp.host, "ducobox.local");
                assert_eq!(tcp.port, 502);
            }
            other => panic!("unexpected {other:?}"),
        }

        let config = DucoConfig::for_client("serial", "/dev/ttyUSB0", 2).unwrap();
        match &config.connection {
            ModbusConfig::Serial(rtu) => {
                assert_eq!(rtu.frame_notation(), "8N1");
                assert_eq!(rtu.baud_rate, 9600);
                assert_eq!(rtu.unit_id, 2);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(DucoConfig::for_client("usb", "x", 1).is_err());
        assert!(DucoConfig::for_client("tcp", "not-a-port", 1).is_err());
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[connection]
type = "tcp"
host = "10.0.0.5"
timeout = "500ms"

[logging]
level = "debug"
format = "json"
"#;
        let config = parse_config(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.connection.timeout(), Duration::from_millis(500));
        assert_eq!(config.unit_id(), MASTER_DEFAULT_UNIT_ID);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_json_defaults() {
        let config = parse_config("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config, DucoConfig::default());
    }

    #[test]
    fn test_validation() {
        let content = r#"{"connection": {"type": "tcp", "unit_id": 0}}"#;
        assert!(parse_config(content, ConfigFormat::Json).is_err());

        let content = r#"{"logging": {"level": "loud"}}"#;
        assert!(matches!(
            parse_config(content, ConfigFormat::Json),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> =
            [("DUCO_HOST", "box.lan"), ("DUCO_UNIT_ID", "3"), ("DUCO_LOG_LEVEL", "warn")].into();
        let mut config = DucoConfig::tcp("ducobox.local");
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.unit_id(), 3);
        assert_eq!(config.logging.level, "warn");
        assert!(matches!(&config.connection, ModbusConfig::Tcp(tcp) if tcp.host == "box.lan"));

        let mut config = DucoConfig::serial("/dev/ttyS0");
        let result = config.apply_overrides(|name| (name == "DUCO_UNIT_ID").then(|| "x".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "connection:\n  type: serial\n  port: /dev/ttyUSB0\n  baud_rate: 19200").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.connection.is_tcp());
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            load_config("/nonexistent/duco.yaml"),
            Err(ConfigError::FileNotFound { .. })
        ));

        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }
}
