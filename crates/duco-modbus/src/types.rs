// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Register and transport type definitions.
//!
//! - **RegisterKind**: input (read-only) or holding (read/write) registers
//! - **Encoding**: integer or IEEE-754 float payload
//! - **RegisterSpec**: everything needed to poll and decode one quantity
//! - **FormattedValue** / **RegisterState**: what consumers observe
//! - **ModbusTcpConfig** / **ModbusRtuConfig**: transport settings
//!
//! # Examples
//!
//! ```
//! use duco_modbus::types::{RegisterSpec, RegisterKind};
//!
//! let spec = RegisterSpec::input("Temperature", 13)
//!     .with_unit("°C")
//!     .with_scale(0.1)
//!     .with_precision(1);
//!
//! assert_eq!(spec.kind, RegisterKind::Input);
//! assert!(spec.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ModbusError};

// =============================================================================
// RegisterKind
// =============================================================================

/// The two word-register tables a ventilation node exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterKind {
    /// Input Register (read-only, 16 bits)
    ///
    /// - Function code 4: Read Input Registers
    #[default]
    Input,

    /// Holding Register (read/write, 16 bits)
    ///
    /// - Function code 3: Read Holding Registers
    /// - Function code 6: Write Single Register
    Holding,
}

impl RegisterKind {
    /// Returns `true` if this register kind accepts writes.
    #[inline]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::Holding)
    }

    /// Returns the function code for reading this register kind.
    #[inline]
    pub const fn read_function_code(&self) -> u8 {
        match self {
            Self::Holding => 0x03,
            Self::Input => 0x04,
        }
    }

    /// Returns the function code for writing a single value.
    ///
    /// Returns `None` for input registers.
    #[inline]
    pub const fn write_function_code(&self) -> Option<u8> {
        match self {
            Self::Holding => Some(0x06),
            Self::Input => None,
        }
    }

    /// Returns the short name for this register kind.
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Input => "IR",
            Self::Holding => "HR",
        }
    }

    /// Returns the full name for this register kind.
    pub const fn full_name(&self) -> &'static str {
        match self {
            Self::Input => "Input Register",
            Self::Holding => "Holding Register",
        }
    }
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for RegisterKind {
    type Err = ModbusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IR" | "INPUT" | "INPUT_REGISTER" | "3X" => Ok(Self::Input),
            "HR" | "HOLDING" | "HOLDING_REGISTER" | "4X" => Ok(Self::Holding),
            _ => Err(ModbusError::configuration(
                ConfigurationError::invalid_register(s, "expected input or holding"),
            )),
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// How the polled words are turned into a raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// One word as a signed 16-bit integer, or two words summed low word first.
    #[default]
    Integer,

    /// Two words concatenated big-endian into an IEEE-754 single.
    Float32,
}

impl Encoding {
    /// Returns the word counts this encoding can be used with.
    pub const fn allows_word_count(&self, word_count: u16) -> bool {
        match self {
            Self::Integer => matches!(word_count, 1 | 2),
            Self::Float32 => word_count == 2,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "int"),
            Self::Float32 => write!(f, "float"),
        }
    }
}

impl FromStr for Encoding {
    type Err = ModbusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Integer),
            "float" | "float32" | "f32" | "real" => Ok(Self::Float32),
            _ => Err(ModbusError::configuration(
                ConfigurationError::invalid_register(s, "expected int or float"),
            )),
        }
    }
}

// =============================================================================
// RegisterSpec
// =============================================================================

/// Static description of one bus-addressable quantity.
///
/// The decoded engineering value is `scale * raw + offset`, rendered with
/// `precision` decimal digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSpec {
    /// Display label.
    pub name: String,
    /// Absolute bus address.
    pub address: u16,
    /// Input or holding register.
    pub kind: RegisterKind,
    /// Display unit, may be empty.
    #[serde(default)]
    pub unit: String,
    /// Number of 16-bit words (1 or 2).
    #[serde(default = "default_word_count")]
    pub word_count: u16,
    /// Multiplier applied to the raw value.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Bias added after scaling.
    #[serde(default)]
    pub offset: f64,
    /// Decimal digits in the formatted value.
    #[serde(default)]
    pub precision: usize,
    /// Payload encoding.
    #[serde(default)]
    pub encoding: Encoding,
}

fn default_word_count() -> u16 {
    1
}

fn default_scale() -> f64 {
    1.0
}

impl RegisterSpec {
    /// Creates a single-word integer spec.
    pub fn new(name: impl Into<String>, address: u16, kind: RegisterKind) -> Self {
        Self {
            name: name.into(),
            address,
            kind,
            unit: String::new(),
            word_count: default_word_count(),
            scale: default_scale(),
            offset: 0.0,
            precision: 0,
            encoding: Encoding::Integer,
        }
    }

    /// Creates an input register spec.
    pub fn input(name: impl Into<String>, address: u16) -> Self {
        Self::new(name, address, RegisterKind::Input)
    }

    /// Creates a holding register spec.
    pub fn holding(name: impl Into<String>, address: u16) -> Self {
        Self::new(name, address, RegisterKind::Holding)
    }

    /// Sets the display unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the number of words.
    pub fn with_word_count(mut self, word_count: u16) -> Self {
        self.word_count = word_count;
        self
    }

    /// Sets the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the display precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the payload encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Switches to a two-word IEEE-754 float.
    pub fn float32(self) -> Self {
        self.with_word_count(2).with_encoding(Encoding::Float32)
    }

    /// Returns `true` if this register accepts writes.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.kind.is_writable()
    }

    /// Returns the last address covered by this register.
    pub fn end_address(&self) -> u16 {
        self.address
            .saturating_add(self.word_count.saturating_sub(1))
    }

    /// Validates the word count / encoding combination.
    pub fn validate(&self) -> Result<(), ModbusError> {
        if !matches!(self.word_count, 1 | 2) {
            return Err(ModbusError::configuration(ConfigurationError::invalid_register(
                &self.name,
                format!("word count {} not in 1..=2", self.word_count),
            )));
        }

        if !self.encoding.allows_word_count(self.word_count) {
            return Err(ModbusError::configuration(ConfigurationError::invalid_register(
                &self.name,
                format!("{} encoding needs 2 words, got {}", self.encoding, self.word_count),
            )));
        }

        if !self.scale.is_finite() || !self.offset.is_finite() {
            return Err(ModbusError::configuration(ConfigurationError::invalid_register(
                &self.name,
                "scale and offset must be finite",
            )));
        }

        Ok(())
    }
}

impl fmt::Display for RegisterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.address)?;
        if self.word_count > 1 {
            write!(f, ":{}:{}", self.word_count, self.encoding)?;
        }
        Ok(())
    }
}

// =============================================================================
// FormattedValue
// =============================================================================

/// An engineering value rendered to a fixed number of decimals.
///
/// The string form is the contract: `"21.6"`, `"37.54"`, `"42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedValue(String);

impl FormattedValue {
    /// Formats `value` with `precision` decimal digits.
    pub fn format(value: f64, precision: usize) -> Self {
        if value.is_nan() {
            return Self("nan".to_string());
        }
        Self(format!("{value:.precision$}"))
    }

    /// Returns the formatted string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the value back into a float.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }

    /// Returns the value as an integer if it has no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        let value = self.as_f64()?;
        if value.fract() == 0.0 && value.is_finite() {
            Some(value as i64)
        } else {
            None
        }
    }

    /// Formats the value again with the given precision.
    pub fn reformat(&self, precision: usize) -> Self {
        match self.as_f64() {
            Some(value) => Self::format(value, precision),
            None => self.clone(),
        }
    }

    /// Consumes the value, returning the string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormattedValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FormattedValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FormattedValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// RegisterState
// =============================================================================

/// Snapshot of one register for status output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterState {
    /// Display label.
    pub name: String,
    /// Last known value, `None` until the first successful poll.
    pub value: Option<FormattedValue>,
    /// Display unit.
    pub unit: String,
}

impl fmt::Display for RegisterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) if self.unit.is_empty() => write!(f, "{}: {}", self.name, value),
            Some(value) => write!(f, "{}: {} {}", self.name, value, self.unit),
            None => write!(f, "{}: -", self.name),
        }
    }
}

// =============================================================================
// ModbusTcpConfig
// =============================================================================

/// Configuration for Modbus TCP connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModbusTcpConfig {
    /// Target host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Target port (default: 502).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Unit ID of the ventilation master (default: 1).
    #[serde(default = "default_unit_id")]
    pub unit_id: u8,

    /// Response timeout.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_host() -> String {
    "ducobox.local".to_string()
}

fn default_port() -> u16 {
    502
}

fn default_unit_id() -> u8 {
    1
}

fn default_timeout() -> Duration {
    Duration::from_secs(1)
}

impl ModbusTcpConfig {
    /// Creates a configuration for the given host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the unit ID.
    pub fn with_unit_id(mut self, unit_id: u8) -> Self {
        self.unit_id = unit_id;
        self
    }

    /// Sets the response timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the socket address string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ModbusError> {
        if self.host.trim().is_empty() {
            return Err(ModbusError::configuration(ConfigurationError::invalid_host(
                &self.host,
                "host must not be empty",
            )));
        }
        validate_unit_id(self.unit_id)?;
        validate_timeout(self.timeout)
    }
}

impl Default for ModbusTcpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            unit_id: default_unit_id(),
            timeout: default_timeout(),
        }
    }
}

// =============================================================================
// ModbusRtuConfig
// =============================================================================

/// Configuration for Modbus RTU (serial) connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModbusRtuConfig {
    /// Serial port path (e.g., "/dev/ttyUSB0" or "COM1").
    pub port: String,

    /// Baud rate.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Data bits.
    #[serde(default)]
    pub data_bits: DataBits,

    /// Parity.
    #[serde(default)]
    pub parity: Parity,

    /// Stop bits.
    #[serde(default)]
    pub stop_bits: StopBits,

    /// Unit ID of the ventilation master.
    #[serde(default = "default_unit_id")]
    pub unit_id: u8,

    /// Response timeout.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_baud_rate() -> u32 {
    9600
}

impl ModbusRtuConfig {
    /// Creates a 9600 8N1 configuration for the given port.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: default_baud_rate(),
            data_bits: DataBits::default(),
            parity: Parity::default(),
            stop_bits: StopBits::default(),
            unit_id: default_unit_id(),
            timeout: default_timeout(),
        }
    }

    /// Sets the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the unit ID.
    pub fn with_unit_id(mut self, unit_id: u8) -> Self {
        self.unit_id = unit_id;
        self
    }

    /// Sets the response timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the frame settings in the usual `8N1` notation.
    pub fn frame_notation(&self) -> String {
        format!("{}{}{}", self.data_bits, self.parity, self.stop_bits)
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ModbusError> {
        if self.port.trim().is_empty() {
            return Err(ModbusError::configuration(ConfigurationError::invalid_host(
                &self.port,
                "serial port must not be empty",
            )));
        }

        const VALID_BAUD_RATES: &[u32] = &[
            1200, 2400, 4800, 9600, 14400, 19200, 38400, 57600, 115200,
        ];

        if !VALID_BAUD_RATES.contains(&self.baud_rate) {
            return Err(ModbusError::configuration(ConfigurationError::invalid_host(
                &self.port,
                format!("unsupported baud rate {}", self.baud_rate),
            )));
        }

        validate_unit_id(self.unit_id)?;
        validate_timeout(self.timeout)
    }
}

fn validate_unit_id(unit_id: u8) -> Result<(), ModbusError> {
    if unit_id == 0 || unit_id > 247 {
        return Err(ModbusError::configuration(ConfigurationError::invalid_unit_id(unit_id)));
    }
    Ok(())
}

fn validate_timeout(timeout: Duration) -> Result<(), ModbusError> {
    if timeout.is_zero() {
        return Err(ModbusError::configuration(ConfigurationError::invalid_register(
            "timeout",
            "timeout must be greater than 0",
        )));
    }
    Ok(())
}

// =============================================================================
// Serial Port Settings
// =============================================================================

/// Data bits configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataBits {
    /// 7 data bits.
    Seven,
    /// 8 data bits (default).
    #[default]
    Eight,
}

impl DataBits {
    /// Returns the number of bits.
    pub const fn bits(&self) -> u8 {
        match self {
            Self::Seven => 7,
            Self::Eight => 8,
        }
    }
}

impl fmt::Display for DataBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Parity configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// No parity (default).
    #[default]
    None,
    /// Odd parity.
    Odd,
    /// Even parity.
    Even,
}

impl Parity {
    /// Returns the short character representation.
    pub const fn char(&self) -> char {
        match self {
            Self::None => 'N',
            Self::Odd => 'O',
            Self::Even => 'E',
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Stop bits configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopBits {
    /// 1 stop bit (default).
    #[default]
    One,
    /// 2 stop bits.
    Two,
}

impl StopBits {
    /// Returns the number of stop bits.
    pub const fn bits(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// =============================================================================
// ModbusConfig (Unified)
// =============================================================================

/// Unified transport configuration, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModbusConfig {
    /// Modbus TCP configuration.
    Tcp(ModbusTcpConfig),

    /// Modbus RTU configuration.
    Serial(ModbusRtuConfig),
}

impl ModbusConfig {
    /// Returns `true` if this is a TCP configuration.
    pub const fn is_tcp(&self) -> bool {
        matches!(self, Self::Tcp(_))
    }

    /// Returns the unit ID of the ventilation master.
    pub fn unit_id(&self) -> u8 {
        match self {
            Self::Tcp(c) => c.unit_id,
            Self::Serial(c) => c.unit_id,
        }
    }

    /// Returns the response timeout.
    pub fn timeout(&self) -> Duration {
        match self {
            Self::Tcp(c) => c.timeout,
            Self::Serial(c) => c.timeout,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ModbusError> {
        match self {
            Self::Tcp(c) => c.validate(),
            Self::Serial(c) => c.validate(),
        }
    }
}

impl Default for ModbusConfig {
    fn default() -> Self {
        Self::Tcp(ModbusTcpConfig::default())
    }
}

impl From<ModbusTcpConfig> for ModbusConfig {
    fn from(config: ModbusTcpConfig) -> Self {
        Self::Tcp(config)
    }
}

impl From<ModbusRtuConfig> for ModbusConfig {
    fn from(config: ModbusRtuConfig) -> Self {
        Self::Serial(config)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_kind_properties() {
        assert!(RegisterKind::Holding.is_writable());
        assert!(!RegisterKind::Input.is_writable());
        assert_eq!(RegisterKind::Input.read_function_code(), 0x04);
        assert_eq!(RegisterKind::Holding.write_function_code(), Some(0x06));
        assert_eq!(RegisterKind::Input.write_function_code(), None);
        assert_eq!("holding".parse::<RegisterKind>().unwrap(), RegisterKind::Holding);
        assert_eq!("IR".parse::<RegisterKind>().unwrap(), RegisterKind::Input);
    }

    #[test]
    fn test_spec_validation() {
        assert!(RegisterSpec::input("Fan actual", 12).validate().is_ok());
        assert!(RegisterSpec::holding("Energy", 100).float32().validate().is_ok());
        assert!(RegisterSpec::input("Counter", 100).with_word_count(2).validate().is_ok());

        let single_word_float = RegisterSpec::input("Broken", 100).with_encoding(Encoding::Float32);
        assert!(single_word_float.validate().is_err());

        let three_words = RegisterSpec::input("Broken", 100).with_word_count(3);
        assert!(three_words.validate().is_err());
    }

    #[test]
    fn test_spec_display() {
        assert_eq!(RegisterSpec::input("Zone", 19).to_string(), "IR:19");
        assert_eq!(RegisterSpec::holding("Energy", 40).float32().to_string(), "HR:40:2:float");
        assert_eq!(RegisterSpec::holding("Energy", 40).float32().end_address(), 41);
    }

    #[test]
    fn test_formatted_value() {
        let value = FormattedValue::format(21.6, 1);
        assert_eq!(value, "21.6");
        assert_eq!(value.as_f64(), Some(21.6));
        assert_eq!(value.as_i64(), None);

        let value = FormattedValue::format(42.0, 0);
        assert_eq!(value.as_str(), "42");
        assert_eq!(value.as_i64(), Some(42));

        assert_eq!(FormattedValue::format(37.5, 2).to_string(), "37.50");
        assert_eq!(FormattedValue::format(37.54, 2).reformat(2), "37.54");
    }

    #[test]
    fn test_register_state_display() {
        let state = RegisterState {
            name: "Temperature".to_string(),
            value: Some(FormattedValue::format(21.6, 1)),
            unit: "°C".to_string(),
        };
        assert_eq!(state.to_string(), "Temperature: 21.6 °C");

        let unset = RegisterState {
            name: "Zone".to_string(),
            value: None,
            unit: String::new(),
        };
        assert_eq!(unset.to_string(), "Zone: -");
    }

    #[test]
    fn test_tcp_config_defaults() {
        let config = ModbusTcpConfig::default();
        assert_eq!(config.host, "ducobox.local");
        assert_eq!(config.port, 502);
        assert_eq!(config.unit_id, 1);
        assert_eq!(config.socket_addr(), "ducobox.local:502");
        assert!(config.validate().is_ok());

        assert!(ModbusTcpConfig::new("").validate().is_err());
        assert!(ModbusTcpConfig::default().with_unit_id(0).validate().is_err());
    }

    #[test]
    fn test_rtu_config() {
        let config = ModbusRtuConfig::new("/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.frame_notation(), "8N1");
        assert!(config.validate().is_ok());
        assert!(config.clone().with_baud_rate(12345).validate().is_err());
    }

    #[test]
    fn test_modbus_config_serde() {
        let json = r#"{"type":"serial","port":"/dev/ttyUSB0","timeout":"500ms"}"#;
        let config: ModbusConfig = serde_json::from_str(json).unwrap();
        assert!(!config.is_tcp());
        assert_eq!(config.unit_id(), 1);
        assert_eq!(config.timeout(), Duration::from_millis(500));

        let json = r#"{"type":"tcp","host":"10.0.0.5"}"#;
        let config: ModbusConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_tcp());
        assert!(config.validate().is_ok());
    }
}
