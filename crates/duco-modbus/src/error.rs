// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Register and bus error types with diagnostics.
//!
//! # Error Categories
//!
//! ```text
//! ModbusError
//! ├── Connection    - transport not connected, refused, I/O
//! ├── Protocol      - exception responses, unexpected replies
//! ├── Operation     - read/write failures, write-target and range checks
//! ├── Conversion    - malformed register payloads
//! ├── Configuration - invalid transport or register settings
//! └── Timeout       - no answer within the configured window
//! ```
//!
//! Everything except `Operation::InvalidWriteTarget`, `Operation::ValueOutOfRange`
//! and `Configuration` counts as a *transport failure*: the register layer
//! absorbs those on the read path and keeps serving the cached value.
//!
//! # Examples
//!
//! ```
//! use duco_modbus::error::{ModbusError, OperationError};
//!
//! let error = ModbusError::operation(OperationError::invalid_write_target("Fan actual", 12));
//! assert!(!error.is_transport_failure());
//! assert!(!error.is_retryable());
//! ```

use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

// =============================================================================
// ModbusError - Main Error Type
// =============================================================================

/// The main error type for register and bus operations.
#[derive(Debug, Error)]
pub enum ModbusError {
    /// Connection-related errors (TCP/RTU).
    #[error("{0}")]
    Connection(#[from] ConnectionError),

    /// Modbus protocol errors (exception codes, unexpected replies).
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Operation errors (read/write failures and pre-write validation).
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// Register payload conversion errors.
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    /// Configuration errors.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// Timeout errors.
    #[error("{0}")]
    Timeout(#[from] TimeoutError),
}

impl ModbusError {
    // =========================================================================
    // Factory Methods
    // =========================================================================

    /// Creates a connection error.
    #[inline]
    pub fn connection(error: ConnectionError) -> Self {
        Self::Connection(error)
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(error: ProtocolError) -> Self {
        Self::Protocol(error)
    }

    /// Creates an operation error.
    #[inline]
    pub fn operation(error: OperationError) -> Self {
        Self::Operation(error)
    }

    /// Creates a conversion error.
    #[inline]
    pub fn conversion(error: ConversionError) -> Self {
        Self::Conversion(error)
    }

    /// Creates a configuration error.
    #[inline]
    pub fn configuration(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(error: TimeoutError) -> Self {
        Self::Timeout(error)
    }

    /// Creates a not connected error.
    pub fn not_connected() -> Self {
        Self::Connection(ConnectionError::NotConnected)
    }

    /// Creates an exception response error.
    pub fn exception(function_code: u8, exception_code: u8) -> Self {
        Self::Protocol(ProtocolError::exception_response(function_code, exception_code))
    }

    /// Creates a read failure with no response from the device.
    pub fn no_response(address: u16, count: u16) -> Self {
        Self::Operation(OperationError::read_failed(address, count, "no response"))
    }

    // =========================================================================
    // Error Properties
    // =========================================================================

    /// Returns `true` if the failure came from the bus rather than from
    /// validation performed before any bus call.
    pub fn is_transport_failure(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Protocol(_) | Self::Timeout(_) | Self::Conversion(_) => {
                true
            }
            Self::Operation(e) => e.is_transport_failure(),
            Self::Configuration(_) => false,
        }
    }

    /// Returns `true` if the write was rejected because the register is read-only.
    pub fn is_invalid_write_target(&self) -> bool {
        matches!(self, Self::Operation(OperationError::InvalidWriteTarget { .. }))
    }

    /// Returns `true` if the value did not fit the register domain.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Operation(OperationError::ValueOutOfRange { .. }))
    }

    /// Returns `true` if this error is retryable.
    ///
    /// The register layer never retries on its own; this is a hint for the
    /// bus driver that owns the retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(e) => e.is_retryable(),
            Self::Protocol(e) => e.is_retryable(),
            Self::Operation(e) => e.is_transport_failure(),
            Self::Timeout(_) => true,
            Self::Conversion(_) | Self::Configuration(_) => false,
        }
    }

    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Connection(e) => e.severity(),
            Self::Protocol(_) => ErrorSeverity::Error,
            Self::Operation(e) => e.severity(),
            Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Conversion(_) => ErrorSeverity::Warning,
            Self::Configuration(_) => ErrorSeverity::Critical,
        }
    }

    /// Returns the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Protocol(_) => "protocol",
            Self::Operation(_) => "operation",
            Self::Timeout(_) => "timeout",
            Self::Conversion(_) => "conversion",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Returns a unique error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection(e) => e.error_code(),
            Self::Protocol(e) => e.error_code(),
            Self::Operation(e) => e.error_code(),
            Self::Conversion(e) => e.error_code(),
            Self::Configuration(e) => e.error_code(),
            Self::Timeout(e) => e.error_code(),
        }
    }

    /// Returns the tracing level for this error.
    pub fn tracing_level(&self) -> Level {
        self.severity().to_tracing_level()
    }

    /// Logs this error with appropriate level and context.
    pub fn log(&self, context: &str) {
        let code = self.error_code();

        match self.tracing_level() {
            Level::ERROR => tracing::error!(
                error_code = %code,
                category = self.category(),
                context = context,
                retryable = self.is_retryable(),
                "{self}"
            ),
            Level::WARN => tracing::warn!(
                error_code = %code,
                category = self.category(),
                context = context,
                retryable = self.is_retryable(),
                "{self}"
            ),
            _ => tracing::debug!(
                error_code = %code,
                category = self.category(),
                context = context,
                retryable = self.is_retryable(),
                "{self}"
            ),
        }
    }
}

// =============================================================================
// ConnectionError
// =============================================================================

/// Connection-related errors for TCP and RTU.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// TCP connection refused.
    #[error("Connection refused to {host}:{port}")]
    Refused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
        /// Underlying error.
        #[source]
        source: Option<io::Error>,
    },

    /// Serial port could not be opened (RTU).
    #[error("Serial port '{port}' unavailable: {message}")]
    SerialPortUnavailable {
        /// Port path.
        port: String,
        /// Error message.
        message: String,
    },

    /// Connection closed unexpectedly.
    #[error("Connection closed unexpectedly")]
    Closed {
        /// Reason for closure.
        reason: Option<String>,
    },

    /// Not connected.
    #[error("Not connected to the Modbus master")]
    NotConnected,

    /// Generic I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl ConnectionError {
    /// Creates a connection refused error.
    pub fn refused(host: impl Into<String>, port: u16) -> Self {
        Self::Refused {
            host: host.into(),
            port,
            source: None,
        }
    }

    /// Creates a connection refused error with source.
    pub fn refused_with(host: impl Into<String>, port: u16, source: io::Error) -> Self {
        Self::Refused {
            host: host.into(),
            port,
            source: Some(source),
        }
    }

    /// Creates a serial port unavailable error.
    pub fn serial_unavailable(port: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SerialPortUnavailable {
            port: port.into(),
            message: message.into(),
        }
    }

    /// Creates a connection closed error.
    pub fn closed(reason: Option<String>) -> Self {
        Self::Closed { reason }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Refused { .. } | Self::Closed { .. } | Self::NotConnected => true,
            Self::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::Interrupted
            ),
            Self::SerialPortUnavailable { .. } => false,
        }
    }

    /// Returns the severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotConnected | Self::Closed { .. } => ErrorSeverity::Warning,
            Self::SerialPortUnavailable { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Refused { .. } => ErrorCode::new(1, 1),
            Self::SerialPortUnavailable { .. } => ErrorCode::new(1, 2),
            Self::Closed { .. } => ErrorCode::new(1, 3),
            Self::NotConnected => ErrorCode::new(1, 4),
            Self::Io { .. } => ErrorCode::new(1, 5),
        }
    }
}

impl From<io::Error> for ConnectionError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused {
                host: "unknown".to_string(),
                port: 0,
                source: Some(error),
            },
            io::ErrorKind::NotConnected => Self::NotConnected,
            io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset => Self::Closed {
                reason: Some(error.to_string()),
            },
            _ => Self::Io {
                message: error.to_string(),
                source: error,
            },
        }
    }
}

// =============================================================================
// ProtocolError
// =============================================================================

/// Modbus protocol-level errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Modbus exception response received.
    #[error("Modbus exception: function code {function_code:#04x}, exception {exception_code} ({exception_name})")]
    ExceptionResponse {
        /// The function code that caused the exception.
        function_code: u8,
        /// The exception code.
        exception_code: u8,
        /// Human-readable exception name.
        exception_name: String,
    },

    /// The device answered with something the client could not interpret.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Error message.
        message: String,
    },
}

impl ProtocolError {
    /// Creates an exception response error.
    pub fn exception_response(function_code: u8, exception_code: u8) -> Self {
        Self::ExceptionResponse {
            function_code,
            exception_code,
            exception_name: Self::exception_name(exception_code).to_string(),
        }
    }

    /// Creates an unexpected response error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// Returns the standard name of a Modbus exception code.
    pub fn exception_name(code: u8) -> &'static str {
        match code {
            0x01 => "Illegal Function",
            0x02 => "Illegal Data Address",
            0x03 => "Illegal Data Value",
            0x04 => "Server Device Failure",
            0x05 => "Acknowledge",
            0x06 => "Server Device Busy",
            0x08 => "Memory Parity Error",
            0x0A => "Gateway Path Unavailable",
            0x0B => "Gateway Target Device Failed to Respond",
            _ => "Unknown Exception",
        }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExceptionResponse { exception_code, .. } => {
                matches!(exception_code, 0x05 | 0x06 | 0x0B)
            }
            Self::UnexpectedResponse { .. } => true,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ExceptionResponse { .. } => ErrorCode::new(2, 1),
            Self::UnexpectedResponse { .. } => ErrorCode::new(2, 2),
        }
    }
}

// =============================================================================
// OperationError
// =============================================================================

/// Read/write operation errors.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Read operation failed.
    #[error("Read failed at address {address} (count: {count}): {message}")]
    ReadFailed {
        /// Start address.
        address: u16,
        /// Register count.
        count: u16,
        /// Error message.
        message: String,
    },

    /// Write operation failed.
    #[error("Write failed at address {address} (value: {value}): {message}")]
    WriteFailed {
        /// Register address.
        address: u16,
        /// Word that was being written.
        value: u16,
        /// Error message.
        message: String,
    },

    /// Write attempted on an input register.
    #[error("Register '{name}' at address {address} is read-only")]
    InvalidWriteTarget {
        /// Register display name.
        name: String,
        /// Register address.
        address: u16,
    },

    /// Value does not fit into a single 16-bit register.
    #[error("Value {value} does not fit register at address {address}")]
    ValueOutOfRange {
        /// Register address.
        address: u16,
        /// Requested value.
        value: i64,
    },
}

impl OperationError {
    /// Creates a read failed error.
    pub fn read_failed(address: u16, count: u16, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            address,
            count,
            message: message.into(),
        }
    }

    /// Creates a write failed error.
    pub fn write_failed(address: u16, value: u16, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            address,
            value,
            message: message.into(),
        }
    }

    /// Creates an invalid write target error.
    pub fn invalid_write_target(name: impl Into<String>, address: u16) -> Self {
        Self::InvalidWriteTarget {
            name: name.into(),
            address,
        }
    }

    /// Creates a value out of range error.
    pub fn value_out_of_range(address: u16, value: i64) -> Self {
        Self::ValueOutOfRange { address, value }
    }

    /// Returns `true` for failures reported by the bus.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::ReadFailed { .. } | Self::WriteFailed { .. })
    }

    /// Returns the severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ReadFailed { .. } => ErrorSeverity::Warning,
            Self::WriteFailed { .. } => ErrorSeverity::Error,
            Self::InvalidWriteTarget { .. } | Self::ValueOutOfRange { .. } => ErrorSeverity::Info,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ReadFailed { .. } => ErrorCode::new(3, 1),
            Self::WriteFailed { .. } => ErrorCode::new(3, 2),
            Self::InvalidWriteTarget { .. } => ErrorCode::new(3, 3),
            Self::ValueOutOfRange { .. } => ErrorCode::new(3, 4),
        }
    }
}

// =============================================================================
// ConversionError
// =============================================================================

/// Register payload conversion errors.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The response carried fewer words than the register needs.
    #[error("Not enough data: expected {expected} words, got {actual}")]
    InsufficientData {
        /// Expected words.
        expected: usize,
        /// Actual words.
        actual: usize,
    },

    /// The response carried more words than were requested.
    #[error("Too much data: expected {expected} words, got {actual}")]
    ExcessData {
        /// Expected words.
        expected: usize,
        /// Actual words.
        actual: usize,
    },

    /// The register layout cannot be decoded.
    #[error("Invalid register layout: {message}")]
    InvalidLayout {
        /// Error message.
        message: String,
    },
}

impl ConversionError {
    /// Creates an insufficient data error.
    pub fn insufficient_data(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }

    /// Creates an excess data error.
    pub fn excess_data(expected: usize, actual: usize) -> Self {
        Self::ExcessData { expected, actual }
    }

    /// Creates an invalid layout error.
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            message: message.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InsufficientData { .. } => ErrorCode::new(4, 1),
            Self::ExcessData { .. } => ErrorCode::new(4, 2),
            Self::InvalidLayout { .. } => ErrorCode::new(4, 3),
        }
    }
}

// =============================================================================
// ConfigurationError
// =============================================================================

/// Transport and register configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid host address.
    #[error("Invalid host '{address}': {reason}")]
    InvalidHost {
        /// The invalid address.
        address: String,
        /// Reason.
        reason: String,
    },

    /// Invalid unit ID.
    #[error("Invalid unit ID {unit_id}: must be 1-247")]
    InvalidUnitId {
        /// The invalid unit ID.
        unit_id: u8,
    },

    /// Invalid register definition.
    #[error("Invalid register '{name}': {reason}")]
    InvalidRegister {
        /// Register name.
        name: String,
        /// Reason.
        reason: String,
    },
}

impl ConfigurationError {
    /// Creates an invalid host error.
    pub fn invalid_host(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHost {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid unit ID error.
    pub fn invalid_unit_id(unit_id: u8) -> Self {
        Self::InvalidUnitId { unit_id }
    }

    /// Creates an invalid register error.
    pub fn invalid_register(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRegister {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidHost { .. } => ErrorCode::new(5, 1),
            Self::InvalidUnitId { .. } => ErrorCode::new(5, 2),
            Self::InvalidRegister { .. } => ErrorCode::new(5, 3),
        }
    }
}

// =============================================================================
// TimeoutError
// =============================================================================

/// Timeout errors.
#[derive(Debug, Error)]
pub enum TimeoutError {
    /// Connection establishment timed out.
    #[error("Connection timed out after {duration:?}")]
    Connection {
        /// Timeout duration.
        duration: Duration,
    },

    /// The device did not answer in time.
    #[error("Response timed out after {duration:?}")]
    Response {
        /// Timeout duration.
        duration: Duration,
    },
}

impl TimeoutError {
    /// Creates a connection timeout.
    pub fn connection(duration: Duration) -> Self {
        Self::Connection { duration }
    }

    /// Creates a response timeout.
    pub fn response(duration: Duration) -> Self {
        Self::Response { duration }
    }

    /// Returns the timeout duration.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Connection { duration } | Self::Response { duration } => *duration,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection { .. } => ErrorCode::new(6, 1),
            Self::Response { .. } => ErrorCode::new(6, 2),
        }
    }
}

// =============================================================================
// ErrorSeverity
// =============================================================================

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational - no action required.
    Info,
    /// Warning - action may be required.
    Warning,
    /// Error - action required, but recoverable.
    Error,
    /// Critical - immediate action required.
    Critical,
}

impl ErrorSeverity {
    /// Converts to tracing level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Info => Level::INFO,
            Self::Warning => Level::WARN,
            Self::Error | Self::Critical => Level::ERROR,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ErrorCode
// =============================================================================

/// Structured error code for categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category (1=connection, 2=protocol, 3=operation, 4=conversion, 5=config, 6=timeout).
    pub category: u8,
    /// Specific error within category.
    pub code: u8,
}

impl ErrorCode {
    /// Creates a new error code.
    pub const fn new(category: u8, code: u8) -> Self {
        Self { category, code }
    }

    /// Returns the full error code as a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.category as u16) << 8) | (self.code as u16)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MB-{:02X}{:02X}", self.category, self.code)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// A Result type with ModbusError.
pub type ModbusResult<T> = Result<T, ModbusError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_classification() {
        assert!(ModbusError::not_connected().is_transport_failure());
        assert!(ModbusError::no_response(12, 1).is_transport_failure());
        assert!(ModbusError::exception(0x04, 0x02).is_transport_failure());
        assert!(
            ModbusError::conversion(ConversionError::insufficient_data(2, 1))
                .is_transport_failure()
        );

        let read_only = ModbusError::operation(OperationError::invalid_write_target("Zone", 19));
        assert!(!read_only.is_transport_failure());
        assert!(read_only.is_invalid_write_target());

        let range = ModbusError::operation(OperationError::value_out_of_range(10, 70_000));
        assert!(!range.is_transport_failure());
        assert!(range.is_out_of_range());
    }

    #[test]
    fn test_exception_names() {
        assert_eq!(ProtocolError::exception_name(0x01), "Illegal Function");
        assert_eq!(ProtocolError::exception_name(0x02), "Illegal Data Address");
        assert_eq!(ProtocolError::exception_name(0x42), "Unknown Exception");
    }

    #[test]
    fn test_retryable() {
        assert!(ConnectionError::NotConnected.is_retryable());
        assert!(!ConnectionError::serial_unavailable("/dev/ttyUSB0", "busy").is_retryable());
        assert!(ProtocolError::exception_response(0x03, 0x06).is_retryable());
        assert!(!ProtocolError::exception_response(0x03, 0x02).is_retryable());
        assert!(ModbusError::timeout(TimeoutError::response(Duration::from_secs(1))).is_retryable());
    }

    #[test]
    fn test_error_code() {
        let code = ErrorCode::new(3, 3);
        assert_eq!(code.to_string(), "MB-0303");
        assert_eq!(code.as_u16(), 0x0303);

        let error = ModbusError::operation(OperationError::invalid_write_target("Zone", 19));
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_error_category_and_severity() {
        assert_eq!(ModbusError::not_connected().category(), "connection");
        assert_eq!(ModbusError::not_connected().severity(), ErrorSeverity::Warning);
        assert_eq!(
            ModbusError::configuration(ConfigurationError::invalid_unit_id(0)).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(ErrorSeverity::Critical.to_tracing_level(), Level::ERROR);
    }

    #[test]
    fn test_io_error_mapping() {
        let refused: ConnectionError = io::Error::from(io::ErrorKind::ConnectionRefused).into();
        assert!(matches!(refused, ConnectionError::Refused { .. }));

        let reset: ConnectionError = io::Error::from(io::ErrorKind::ConnectionReset).into();
        assert!(matches!(reset, ConnectionError::Closed { .. }));
    }

    #[test]
    fn test_messages() {
        let error = OperationError::invalid_write_target("Fan actual", 12);
        assert!(error.to_string().contains("Fan actual"));
        assert!(error.to_string().contains("read-only"));

        let error = ConfigurationError::invalid_unit_id(0);
        assert!(error.to_string().contains("1-247"));
    }
}
