// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Modbus RTU transport over a serial port.
//!
//! The ventilation master answers on RS-485, 9600 baud 8N1 by default.

use tokio_modbus::client::sync::{self, Reader, Writer};
use tokio_modbus::Slave;
use tracing::{debug, warn};

use crate::error::{ConnectionError, ModbusError, ModbusResult};
use crate::types::{DataBits, ModbusRtuConfig, Parity, StopBits};

use super::mapping::{
    is_connection_lost, map_response, FC_READ_HOLDING, FC_READ_INPUT, FC_WRITE_SINGLE,
};
use super::transport::{RegisterTransport, TransportState};

/// Modbus RTU transport.
pub struct ModbusRtuTransport {
    config: ModbusRtuConfig,
    context: Option<sync::Context>,
    state: TransportState,
}

impl ModbusRtuTransport {
    /// Creates a new RTU transport with the given configuration.
    pub fn new(config: ModbusRtuConfig) -> Self {
        Self {
            config,
            context: None,
            state: TransportState::Disconnected,
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &ModbusRtuConfig {
        &self.config
    }

    fn serial_builder(&self) -> tokio_serial::SerialPortBuilder {
        let data_bits = match self.config.data_bits {
            DataBits::Seven => tokio_serial::DataBits::Seven,
            DataBits::Eight => tokio_serial::DataBits::Eight,
        };
        let parity = match self.config.parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        };
        let stop_bits = match self.config.stop_bits {
            StopBits::One => tokio_serial::StopBits::One,
            StopBits::Two => tokio_serial::StopBits::Two,
        };

        tokio_serial::new(&self.config.port, self.config.baud_rate)
            .data_bits(data_bits)
            .parity(parity)
            .stop_bits(stop_bits)
            .timeout(self.config.timeout)
    }

    fn context(&mut self) -> ModbusResult<&mut sync::Context> {
        self.context.as_mut().ok_or_else(ModbusError::not_connected)
    }

    fn track<T>(&mut self, result: ModbusResult<T>) -> ModbusResult<T> {
        if let Err(e) = &result {
            if is_connection_lost(e) {
                warn!(port = %self.config.port, "Serial connection lost");
                self.context = None;
                self.state = TransportState::Error;
            }
        }
        result
    }
}

impl RegisterTransport for ModbusRtuTransport {
    fn connect(&mut self) -> ModbusResult<()> {
        if self.state.is_connected() {
            return Ok(());
        }

        let builder = self.serial_builder();
        let slave = Slave(self.config.unit_id);

        match sync::rtu::connect_slave_with_timeout(&builder, slave, Some(self.config.timeout)) {
            Ok(context) => {
                debug!(
                    port = %self.config.port,
                    baud_rate = self.config.baud_rate,
                    frame = %self.config.frame_notation(),
                    "RTU transport connected"
                );
                self.context = Some(context);
                self.state = TransportState::Connected;
                Ok(())
            }
            Err(e) => {
                self.state = TransportState::Error;
                Err(ModbusError::connection(ConnectionError::serial_unavailable(
                    &self.config.port,
                    e.to_string(),
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
        format!("Modbus RTU {} ({} {})", self.config.port, self.config.baud_rate, self.config.frame_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtu_transport_metadata() {
        let transport = ModbusRtuTransport::new(ModbusRtuConfig::new("/dev/ttyUSB0"));
        assert_eq!(transport.state(), TransportState::Disconnected);
        assert_eq!(transport.display_name(), "Modbus RTU /dev/ttyUSB0 (9600 8N1)");
    }
}
