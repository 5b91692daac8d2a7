// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory bus for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use duco_modbus::{ModbusError, ModbusResult, RegisterBus, SharedBus};
use parking_lot::Mutex;

#[derive(Default)]
pub(crate) struct TestBus {
    input: Mutex<HashMap<u16, u16>>,
    holding: Mutex<HashMap<u16, u16>>,
    writes: Mutex<Vec<(u16, u16)>>,
}

impl TestBus {
    pub(crate) fn shared() -> (Arc<TestBus>, SharedBus) {
        let bus = Arc::new(TestBus::default());
        let shared: SharedBus = bus.clone();
        (bus, shared)
    }

    pub(crate) fn set_input(&self, address: u16, word: u16) {
        self.input.lock().insert(address, word);
    }

    pub(crate) fn set_holding(&self, address: u16, word: u16) {
        self.holding.lock().insert(address, word);
    }

    pub(crate) fn clear_input(&self, address: u16) {
        self.input.lock().remove(&address);
    }

    pub(crate) fn writes(&self) -> Vec<(u16, u16)> {
        self.writes.lock().clone()
    }

    fn read(table: &Mutex<HashMap<u16, u16>>, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        let table = table.lock();
        (address..address + count)
            .map(|a| table.get(&a).copied().ok_or_else(|| ModbusError::no_response(address, count)))
            .collect()
    }
}

impl RegisterBus for TestBus {
    fn read_input_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        Self::read(&self.input, address, count)
    }

    fn read_holding_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        Self::read(&self.holding, address, count)
    }

    fn write_single_register(&self, address: u16, value: u16) -> ModbusResult<()> {
        self.writes.lock().push((address, value));
        self.holding.lock().insert(address, value);
        Ok(())
    }

    fn unit_id(&self) -> u8 {
        1
    }

    fn display_name(&self) -> String {
        "test bus".to_string()
    }
}
