// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Modbus TCP transport on the blocking `tokio-modbus` client.

use std::net::{SocketAddr, ToSocketAddrs};

use tokio_modbus::client::sync::{self, Reader, Writer};
use tokio_modbus::Slave;
use tracing::{debug, warn};

use crate::error::{ConnectionError, ModbusError, ModbusResult};
use crate::types::ModbusTcpConfig;

use super::mapping::{
    is_connection_lost, map_response, FC_READ_HOLDING, FC_READ_INPUT, FC_WRITE_SINGLE,
};
use super::transport::{RegisterTransport, TransportState};

// =============================================================================
// ModbusTcpTransport
// =============================================================================

/// Modbus TCP transport.
///
/// # Example
///
/// ```rust,ignore
/// use duco_modbus::client::{ModbusHub, ModbusTcpTransport};
/// use duco_modbus::types::ModbusTcpConfig;
///
/// let hub = ModbusHub::new(ModbusTcpTransport::new(ModbusTcpConfig::new("192.168.1.20")));
/// hub.connect()?;
/// ```
pub struct ModbusTcpTransport {
    config: ModbusTcpConfig,
    context: Option<sync::Context>,
    state: TransportState,
}

impl ModbusTcpTransport {
    /// Creates a new TCP transport with the given configuration.
    pub fn new(config: ModbusTcpConfig) -> Self {
        Self {
            config,
            context: None,
            state: TransportState::Disconnected,
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &ModbusTcpConfig {
        &self.config
    }

    fn resolve_address(&self) -> ModbusResult<SocketAddr> {
        let addr_str = self.config.socket_addr();

        addr_str
            .to_socket_addrs()
            .map_err(|e| ModbusError::connection(ConnectionError::io(format!("resolve {addr_str}"), e)))?
            .next()
            .ok_or_else(|| {
                ModbusError::connection(ConnectionError::refused(&self.config.host, self.config.port))
            })
    }

    fn context(&mut self) -> ModbusResult<&mut sync::Context> {
        self.context.as_mut().ok_or_else(ModbusError::not_connected)
    }

    fn track<T>(&mut self, result: ModbusResult<T>) -> ModbusResult<T> {
        if let Err(e) = &result {
            if is_connection_lost(e) {
                warn!(host = %self.config.host, "TCP connection lost");
                self.context = None;
                self.state = TransportState::Error;
            }
        }
        result
    }
}

impl RegisterTransport for ModbusTcpTransport {
    fn connect(&mut self) -> ModbusResult<()> {
        if self.state.is_connected() {
            return Ok(());
        }

        let socket_addr = self.resolve_address()?;
        let slave = Slave(self.config.unit_id);

        match sync::tcp::connect_slave_with_timeout(socket_addr, slave, Some(self.config.timeout)) {
            Ok(context) => {
                debug!(addr = %socket_addr, unit_id = self.config.unit_id, "TCP transport connected");
                self.context = Some(context);
                self.state = TransportState::Connected;
                Ok(())
            }
            Err(e) => {
                self.state = TransportState::Error;
                Err(ModbusError::connection(ConnectionError::refused_with(
                    &self.config.host,
                    self.config.port,
                    e,
                )))
            }
        }
    }

    fn disconnect(&mut self) -> ModbusResult<()> {
        self.context = None;
        self.state = TransportState::Disconnected;
        Ok(())
    }

    fn state(&self) -> TransportState {
        self.state
    }

    fn read_input_registers(&mut self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        let timeout = self.config.timeout;
        let result = self
            .context()
            .and_then(|ctx| map_response(ctx.read_input_registers(address, count), FC_READ_INPUT, timeout));
        self.track(result)
    }

    fn read_holding_registers(&mut self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        let timeout = self.config.timeout;
        let result = self.context().and_then(|ctx| {
            map_response(ctx.read_holding_registers(address, count), FC_READ_HOLDING, timeout)
        });
        self.track(result)
    }

    fn write_single_register(&mut self, address: u16, value: u16) -> ModbusResult<()> {
        let timeout = self.config.timeout;
        let result = self.context().and_then(|ctx| {
            map_response(ctx.write_single_register(address, value), FC_WRITE_SINGLE, timeout)
        });
        self.track(result)
    }

    fn unit_id(&self) -> u8 {
        self.config.unit_id
    }

    fn display_name(&self) -> String {
        format!("Modbus TCP {}", self.config.socket_addr())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transport_is_disconnected() {
        let transport = ModbusTcpTransport::new(ModbusTcpConfig::new("127.0.0.1").with_port(1502));
        assert_eq!(transport.state(), TransportState::Disconnected);
        assert_eq!(transport.unit_id(), 1);
        assert_eq!(transport.display_name(), "Modbus TCP 127.0.0.1:1502");
    }

    #[test]
    fn test_request_without_connection() {
        let mut transport = ModbusTcpTransport::new(ModbusTcpConfig::default());
        let error = transport.read_input_registers(10, 1).unwrap_err();
        assert!(matches!(error, ModbusError::Connection(ConnectionError::NotConnected)));
        assert_eq!(transport.state(), TransportState::Error);
    }
}
