// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # duco-modbus
//!
//! Register value model and Modbus bus access for the Duco ventilation system.
//!
//! - **Register handles**: one typed accessor per bus quantity, with scale,
//!   offset, precision and a cached last value
//! - **Decoding**: 16-bit two's complement, two-word integers and IEEE-754
//!   floats, formatted to a fixed number of decimals
//! - **Bus abstraction**: the [`RegisterBus`] primitives the register layer
//!   needs, shared as [`SharedBus`]
//! - **Transports**: Modbus TCP and RTU on `tokio-modbus` behind
//!   [`ModbusHub`](client::ModbusHub)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       RegisterHandle                            │
//! │          (decode, format, cache, validated writes)              │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   RegisterBus / SharedBus                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              ModbusHub<T: RegisterTransport>                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `tcp` (default): Modbus TCP transport
//! - `rtu`: Modbus RTU transport over a serial port
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use duco_modbus::client::open_bus;
//! use duco_modbus::register::RegisterHandle;
//! use duco_modbus::types::{ModbusConfig, ModbusTcpConfig, RegisterSpec};
//!
//! let bus = open_bus(&ModbusConfig::Tcp(ModbusTcpConfig::new("192.168.1.20")))?;
//! let temperature = RegisterHandle::new(
//!     RegisterSpec::input("Temperature", 13).with_unit("°C").with_scale(0.1).with_precision(1),
//!     bus.clone(),
//! )?;
//! println!("{:?}", temperature.read());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod bus;
pub mod client;
pub mod conversion;
pub mod error;
pub mod register;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ConfigurationError, ConnectionError, ConversionError, ErrorCode, ErrorSeverity, ModbusError,
    ModbusResult, OperationError, ProtocolError, TimeoutError,
};

pub use types::{
    DataBits, Encoding, FormattedValue, ModbusConfig, ModbusRtuConfig, ModbusTcpConfig, Parity,
    RegisterKind, RegisterSpec, RegisterState, StopBits,
};

pub use bus::{RegisterBus, SharedBus};
pub use client::{open_bus, HubStats, ModbusHub, RegisterTransport, TransportState};
pub use conversion::{twos_complement, RawValue};
pub use register::RegisterHandle;

#[cfg(feature = "tcp")]
pub use client::ModbusTcpTransport;

#[cfg(feature = "rtu")]
pub use client::ModbusRtuTransport;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
