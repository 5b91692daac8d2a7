// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bus driver built on blocking transports.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 RegisterHandle (× every node)                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │  SharedBus
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         ModbusHub                               │
//! │            (RegisterBus impl, one lock per request)             │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     RegisterTransport                           │
//! └─────────────────────────────────────────────────────────────────┘
//!            │                                     │
//!            ▼                                     ▼
//! ┌─────────────────────┐             ┌─────────────────────┐
//! │  ModbusTcpTransport │             │  ModbusRtuTransport │
//! │  (tokio-modbus sync)│             │  (tokio-modbus sync)│
//! └─────────────────────┘             └─────────────────────┘
//! ```
//!
//! The hub performs no retries; a failed request is reported once. After a
//! lost connection the next request reconnects first.

pub mod transport;

#[cfg(any(feature = "tcp", feature = "rtu"))]
mod mapping;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "rtu")]
pub mod rtu;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::bus::{RegisterBus, SharedBus};
use crate::error::{ModbusError, ModbusResult};
use crate::types::ModbusConfig;

pub use transport::{RegisterTransport, TransportState};

#[cfg(feature = "tcp")]
pub use tcp::ModbusTcpTransport;

#[cfg(feature = "rtu")]
pub use rtu::ModbusRtuTransport;

// =============================================================================
// ModbusHub
// =============================================================================

/// Serialises every bus request through one lock around the transport.
///
/// `ModbusHub` is the production [`RegisterBus`]; register handles share it
/// through a [`SharedBus`].
pub struct ModbusHub<T: RegisterTransport> {
    transport: Mutex<T>,
    stats: HubStats,
}

impl<T: RegisterTransport> ModbusHub<T> {
    /// Creates a hub over a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            stats: HubStats::new(),
        }
    }

    /// Returns the request statistics.
    pub fn stats(&self) -> &HubStats {
        &self.stats
    }

    /// Connects the underlying transport.
    pub fn connect(&self) -> ModbusResult<()> {
        let mut transport = self.transport.lock();
        transport.connect()?;
        self.stats.record_connection();
        info!(transport = %transport.display_name(), "Bus connected");
        Ok(())
    }

    /// Disconnects the underlying transport.
    pub fn disconnect(&self) -> ModbusResult<()> {
        let mut transport = self.transport.lock();
        transport.disconnect()?;
        info!(transport = %transport.display_name(), "Bus disconnected");
        Ok(())
    }

    /// Returns `true` if the transport is connected.
    pub fn is_connected(&self) -> bool {
        self.transport.lock().is_connected()
    }

    /// Returns the transport state.
    pub fn state(&self) -> TransportState {
        self.transport.lock().state()
    }

    fn execute<R>(&self, operation: impl FnOnce(&mut T) -> ModbusResult<R>) -> ModbusResult<R> {
        let mut transport = self.transport.lock();
        match transport.state() {
            TransportState::Connected => {}
            TransportState::Error => {
                // one reconnect attempt per request after a lost connection
                if let Err(e) = transport.reconnect() {
                    self.stats.record_error();
                    return Err(e);
                }
                self.stats.record_connection();
                info!(transport = %transport.display_name(), "Bus reconnected");
            }
            TransportState::Disconnected => {
                self.stats.record_error();
                return Err(ModbusError::not_connected());
            }
        }

        let start = Instant::now();
        let result = operation(&mut transport);
        match &result {
            Ok(_) => self.stats.record_success(start.elapsed()),
            Err(_) => self.stats.record_error(),
        }
        result
    }
}

impl<T: RegisterTransport> RegisterBus for ModbusHub<T> {
    fn read_input_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        debug!(address = address, count = count, "Reading input registers");
        self.execute(|t| t.read_input_registers(address, count))
    }

    fn read_holding_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        debug!(address = address, count = count, "Reading holding registers");
        self.execute(|t| t.read_holding_registers(address, count))
    }

    fn write_single_register(&self, address: u16, value: u16) -> ModbusResult<()> {
        debug!(address = address, value = value, "Writing holding register");
        self.execute(|t| t.write_single_register(address, value))
    }

    fn unit_id(&self) -> u8 {
        self.transport.lock().unit_id()
    }

    fn display_name(&self) -> String {
        self.transport.lock().display_name()
    }
}

impl<T: RegisterTransport> Drop for ModbusHub<T> {
    fn drop(&mut self) {
        let transport = self.transport.get_mut();
        if transport.is_connected() {
            if let Err(e) = transport.disconnect() {
                e.log("disconnect on drop");
            }
        }
    }
}

/// Opens and connects a hub for the given configuration.
///
/// Fails with a configuration error if the transport for the requested
/// connection type was not compiled in.
pub fn open_bus(config: &ModbusConfig) -> ModbusResult<SharedBus> {
    config.validate()?;

    match config {
        #[cfg(feature = "tcp")]
        ModbusConfig::Tcp(tcp) => {
            let hub = ModbusHub::new(ModbusTcpTransport::new(tcp.clone()));
            hub.connect()?;
            Ok(std::sync::Arc::new(hub))
        }
        #[cfg(feature = "rtu")]
        ModbusConfig::Serial(rtu) => {
            let hub = ModbusHub::new(ModbusRtuTransport::new(rtu.clone()));
            hub.connect()?;
            Ok(std::sync::Arc::new(hub))
        }
        #[allow(unreachable_patterns)]
        other => Err(ModbusError::configuration(
            crate::error::ConfigurationError::invalid_host(
                match other {
                    ModbusConfig::Tcp(c) => c.socket_addr(),
                    ModbusConfig::Serial(c) => c.port.clone(),
                },
                "transport not enabled in this build",
            ),
        )),
    }
}

// =============================================================================
// HubStats
// =============================================================================

/// Request statistics for a [`ModbusHub`].
#[derive(Debug)]
pub struct HubStats {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    total_response_time_us: AtomicU64,
    connections: AtomicU64,
}

impl HubStats {
    /// Creates new statistics.
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            successful_requests: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            total_response_time_us: AtomicU64::new(0),
            connections: AtomicU64::new(0),
        }
    }

    /// Records a successful request.
    pub fn record_success(&self, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Records a failed request.
    pub fn record_error(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a connection.
    pub fn record_connection(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of requests.
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Returns the number of successful requests.
    pub fn successful_requests(&self) -> u64 {
        self.successful_requests.load(Ordering::Relaxed)
    }

    /// Returns the number of failed requests.
    pub fn failed_requests(&self) -> u64 {
        self.failed_requests.load(Ordering::Relaxed)
    }

    /// Returns the success rate (0.0 - 1.0).
    pub fn success_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 1.0;
        }
        self.successful_requests() as f64 / total as f64
    }

    /// Returns the average response time of successful requests.
    pub fn average_response_time(&self) -> Duration {
        let success = self.successful_requests();
        if success == 0 {
            return Duration::ZERO;
        }
        let total_us = self.total_response_time_us.load(Ordering::Relaxed);
        Duration::from_micros(total_us / success)
    }

    /// Returns the number of connections established.
    pub fn connections(&self) -> u64 {
        self.connections.load(Ordering::Relaxed)
    }
}

impl Default for HubStats {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
