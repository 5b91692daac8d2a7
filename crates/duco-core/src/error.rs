// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error hierarchy for node composition and sessions.
//!
//! # Error Hierarchy
//!
//! ```text
//! DucoError (root)
//! ├── Register              - register/bus errors from duco-modbus
//! ├── OutOfRangeValue       - a write value failed a domain check
//! ├── UnsupportedDeviceType - no node layout for this module code
//! ├── InvalidNodeId         - node id outside the addressable range
//! └── Config                - configuration loading and validation
//! ```
//!
//! Validation errors are raised before any bus call is made.
//!
//! # Examples
//!
//! ```
//! use duco_core::error::DucoError;
//!
//! let error = DucoError::out_of_range(37, 0, 5, 100);
//! assert!(error.is_out_of_range());
//! assert_eq!(error.to_string(), "Value 37 must be within 0 and 100 with steps of 5");
//! ```

use std::path::PathBuf;

use duco_modbus::ModbusError;
use thiserror::Error;

// =============================================================================
// DucoError - Root Error Type
// =============================================================================

/// The root error type for duco-core.
#[derive(Debug, Error)]
pub enum DucoError {
    /// Register or bus error.
    #[error("Register error: {0}")]
    Register(#[from] ModbusError),

    /// The value is not on the accepted lattice for the target register.
    #[error("Value {value} must be within {start} and {stop} with steps of {step}")]
    OutOfRangeValue {
        /// Rejected value.
        value: i64,
        /// First accepted value.
        start: i64,
        /// Distance between accepted values.
        step: i64,
        /// Last accepted value.
        stop: i64,
    },

    /// No node layout exists for the module code.
    #[error("Module type not implemented: {code} ({name})")]
    UnsupportedDeviceType {
        /// Raw module type code.
        code: u16,
        /// Module type name, or `unknown`.
        name: &'static str,
    },

    /// Node id outside the addressable range.
    #[error("Invalid node id {node_id}: {reason}")]
    InvalidNodeId {
        /// Offending node id.
        node_id: u16,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DucoError {
    /// Creates an out-of-range error.
    pub fn out_of_range(value: i64, start: i64, step: i64, stop: i64) -> Self {
        Self::OutOfRangeValue {
            value,
            start,
            step,
            stop,
        }
    }

    /// Creates an unsupported device type error.
    pub fn unsupported_device_type(code: u16) -> Self {
        let name = crate::types::ModuleType::from_code(code)
            .map(|t| t.name())
            .unwrap_or("unknown");
        Self::UnsupportedDeviceType { code, name }
    }

    /// Creates an invalid node id error.
    pub fn invalid_node_id(node_id: u16, reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            node_id,
            reason: reason.into(),
        }
    }

    /// Returns `true` if a write targeted a read-only register.
    pub fn is_invalid_write_target(&self) -> bool {
        matches!(self, Self::Register(e) if e.is_invalid_write_target())
    }

    /// Returns `true` if a value failed a domain check.
    pub fn is_out_of_range(&self) -> bool {
        match self {
            Self::OutOfRangeValue { .. } => true,
            Self::Register(e) => e.is_out_of_range(),
            _ => false,
        }
    }

    /// Returns `true` if the module type has no node layout.
    pub fn is_unsupported_device_type(&self) -> bool {
        matches!(self, Self::UnsupportedDeviceType { .. })
    }

    /// Returns `true` if the bus failed to answer.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Register(e) if e.is_transport_failure())
    }

    /// Returns the error type as a string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::OutOfRangeValue { .. } => "out_of_range",
            Self::UnsupportedDeviceType { .. } => "unsupported_device_type",
            Self::InvalidNodeId { .. } => "invalid_node_id",
            Self::Config(_) => "config",
        }
    }
}

/// Result type for duco-core operations.
pub type DucoResult<T> = Result<T, DucoError>;

// =============================================================================
// ConfigError
// =============================================================================

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration content.
    #[error("Failed to parse config '{path}': {message}")]
    Parse {
        /// Path to the configuration file, or `<string>`.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// File I/O error.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Unsupported configuration format.
    #[error("Unsupported configuration format: {format}")]
    UnsupportedFormat {
        /// The unsupported format.
        format: String,
    },

    /// Invalid environment variable value.
    #[error("Invalid environment variable value for '{name}': {message}")]
    InvalidEnvVar {
        /// The environment variable name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates a parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an invalid environment variable error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use duco_modbus::OperationError;

    #[test]
    fn test_out_of_range() {
        let error = DucoError::out_of_range(7, 0, 1, 5);
        assert!(error.is_out_of_range());
        assert!(!error.is_invalid_write_target());
        assert_eq!(error.error_type(), "out_of_range");
    }

    #[test]
    fn test_register_errors_are_classified() {
        let error: DucoError =
            ModbusError::operation(OperationError::invalid_write_target("Zone", 19)).into();
        assert!(error.is_invalid_write_target());
        assert!(!error.is_transport_failure());

        let error: DucoError = ModbusError::no_response(11, 1).into();
        assert!(error.is_transport_failure());
    }

    #[test]
    fn test_unsupported_device_type() {
        let error = DucoError::unsupported_device_type(17);
        assert!(error.is_unsupported_device_type());
        assert_eq!(error.to_string(), "Module type not implemented: 17 (CTRL_WINDOW_VENT)");

        let error = DucoError::unsupported_device_type(21);
        assert_eq!(error.to_string(), "Module type not implemented: 21 (unknown)");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::validation("connection.unit_id", "must be 1-247");
        assert_eq!(error.to_string(), "Validation failed for 'connection.unit_id': must be 1-247");

        let error: DucoError = error.into();
        assert_eq!(error.error_type(), "config");
    }
}
