// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The bus primitives the register layer depends on.
//!
//! Every [`RegisterHandle`](crate::register::RegisterHandle) holds a clone of
//! the same [`SharedBus`]. Implementations serialise access to the shared
//! medium themselves; the register layer treats each call as atomic.

use std::sync::Arc;

use crate::error::ModbusResult;
use crate::types::RegisterKind;

/// Synchronous read/write access to the device bus.
pub trait RegisterBus: Send + Sync {
    /// Reads `count` input registers starting at `address`.
    fn read_input_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>>;

    /// Reads `count` holding registers starting at `address`.
    fn read_holding_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>>;

    /// Writes one holding register.
    fn write_single_register(&self, address: u16, value: u16) -> ModbusResult<()>;

    /// Returns the unit ID of the ventilation master.
    fn unit_id(&self) -> u8;

    /// Returns a display name for logs.
    fn display_name(&self) -> String;

    /// Reads registers of the given kind.
    fn read_registers(&self, kind: RegisterKind, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        match kind {
            RegisterKind::Input => self.read_input_registers(address, count),
            RegisterKind::Holding => self.read_holding_registers(address, count),
        }
    }
}

/// Handle shared by all registers of all nodes in a session.
pub type SharedBus = Arc<dyn RegisterBus>;

impl<B: RegisterBus + ?Sized> RegisterBus for Arc<B> {
    fn read_input_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        (**self).read_input_registers(address, count)
    }

    fn read_holding_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        (**self).read_holding_registers(address, count)
    }

    fn write_single_register(&self, address: u16, value: u16) -> ModbusResult<()> {
        (**self).write_single_register(address, value)
    }

    fn unit_id(&self) -> u8 {
        (**self).unit_id()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}
