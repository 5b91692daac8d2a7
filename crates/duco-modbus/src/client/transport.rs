// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Blocking transport layer underneath [`ModbusHub`](super::ModbusHub).
//!
//! A [`RegisterTransport`] owns one physical connection and needs exclusive
//! access (`&mut self`) for every request. The hub wraps it in a mutex so the
//! register layer can share it.

use std::fmt;

use crate::error::ModbusResult;

// =============================================================================
// TransportState
// =============================================================================

/// Connection state of a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportState {
    /// Transport is disconnected.
    #[default]
    Disconnected,
    /// Transport is connected and ready.
    Connected,
    /// The last request failed at the connection level.
    Error,
}

impl TransportState {
    /// Returns `true` if the transport is connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Error => "error",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// RegisterTransport Trait
// =============================================================================

/// A blocking request/response connection to one ventilation master.
///
/// # Implementors
///
/// - [`ModbusTcpTransport`](super::tcp::ModbusTcpTransport) (feature `tcp`)
/// - [`ModbusRtuTransport`](super::rtu::ModbusRtuTransport) (feature `rtu`)
pub trait RegisterTransport: Send {
    /// Establishes the connection.
    fn connect(&mut self) -> ModbusResult<()>;

    /// Closes the connection. Closing a closed transport is a no-op.
    fn disconnect(&mut self) -> ModbusResult<()>;

    /// Returns the current transport state.
    fn state(&self) -> TransportState;

    /// Returns `true` if the transport is connected.
    fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Drops the current connection and connects again.
    fn reconnect(&mut self) -> ModbusResult<()> {
        self.disconnect()?;
        self.connect()
    }

    /// Reads input registers (FC 04).
    fn read_input_registers(&mut self, address: u16, count: u16) -> ModbusResult<Vec<u16>>;

    /// Reads holding registers (FC 03).
    fn read_holding_registers(&mut self, address: u16, count: u16) -> ModbusResult<Vec<u16>>;

    /// Writes a single holding register (FC 06).
    fn write_single_register(&mut self, address: u16, value: u16) -> ModbusResult<()>;

    /// Returns the unit ID (slave address).
    fn unit_id(&self) -> u8;

    /// Returns a display name for this transport.
    fn display_name(&self) -> String;
}

// =============================================================================
// Tests
// =============================================================================
