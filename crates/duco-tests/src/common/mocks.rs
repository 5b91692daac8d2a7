// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! An in-memory register bus for exercising registers and nodes without a
//! ventilation master.
//!
//! - Input and holding tables keyed by address
//! - Recording of reads and writes for verification
//! - Error injection for reads and writes

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use duco_modbus::{
    ModbusError, ModbusResult, OperationError, ProtocolError, RegisterBus, RegisterKind, SharedBus,
};

// =============================================================================
// MockBus
// =============================================================================

/// A configurable in-memory register bus.
///
/// Reading an address with no stored word fails like an unanswered request.
/// Successful writes are stored in the holding table.
#[derive(Debug, Default)]
pub struct MockBus {
    /// Input register words keyed by address.
    input: Mutex<HashMap<u16, u16>>,

    /// Holding register words keyed by address.
    holding: Mutex<HashMap<u16, u16>>,

    /// Force next read to fail.
    fail_next_read: AtomicBool,

    /// Force all reads to fail.
    fail_all_reads: AtomicBool,

    /// Force all writes to fail.
    fail_all_writes: AtomicBool,

    /// Answer reads with one word too few.
    short_reads: AtomicBool,

    /// Read count for verification.
    read_count: AtomicU64,

    /// Read history for verification.
    read_history: Mutex<Vec<(RegisterKind, u16, u16)>>,

    /// Write history for verification.
    write_history: Mutex<Vec<(u16, u16)>>,
}

impl MockBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bus and a shared handle to it.
    pub fn shared() -> (Arc<MockBus>, SharedBus) {
        let mock = Arc::new(Self::new());
        let bus: SharedBus = mock.clone();
        (mock, bus)
    }

    /// Stores an input register word.
    pub fn set_input(&self, address: u16, word: u16) {
        self.input.lock().insert(address, word);
    }

    /// Stores consecutive input register words.
    pub fn set_input_words(&self, address: u16, words: &[u16]) {
        let mut input = self.input.lock();
        for (address, word) in (address..).zip(words) {
            input.insert(address, *word);
        }
    }

    /// Stores a holding register word.
    pub fn set_holding(&self, address: u16, word: u16) {
        self.holding.lock().insert(address, word);
    }

    /// Removes an input register word so reads of it fail.
    pub fn remove_input(&self, address: u16) {
        self.input.lock().remove(&address);
    }

    /// Returns the stored holding register word.
    pub fn holding(&self, address: u16) -> Option<u16> {
        self.holding.lock().get(&address).copied()
    }

    /// Stores the module type code of a node.
    pub fn add_node(&self, node_id: u16, code: u16) {
        self.set_input(node_id * 10, code);
    }

    /// Force next read to fail.
    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }

    /// Force all reads to fail.
    pub fn fail_all_reads(&self, fail: bool) {
        self.fail_all_reads.store(fail, Ordering::SeqCst);
    }

    /// Force all writes to fail.
    pub fn fail_all_writes(&self, fail: bool) {
        self.fail_all_writes.store(fail, Ordering::SeqCst);
    }

    /// Answer reads with one word too few.
    pub fn short_reads(&self, enabled: bool) {
        self.short_reads.store(enabled, Ordering::SeqCst);
    }

    /// Returns the number of read requests.
    pub fn get_read_count(&self) -> u64 {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Returns the read requests as `(kind, address, count)`.
    pub fn get_read_history(&self) -> Vec<(RegisterKind, u16, u16)> {
        self.read_history.lock().clone()
    }

    /// Returns the number of write requests.
    pub fn get_write_count(&self) -> usize {
        self.write_history.lock().len()
    }

    /// Returns the write requests as `(address, word)`.
    pub fn get_write_history(&self) -> Vec<(u16, u16)> {
        self.write_history.lock().clone()
    }

    /// Clears history and failure flags. Stored words are kept.
    pub fn reset(&self) {
        self.fail_next_read.store(false, Ordering::SeqCst);
        self.fail_all_reads.store(false, Ordering::SeqCst);
        self.fail_all_writes.store(false, Ordering::SeqCst);
        self.short_reads.store(false, Ordering::SeqCst);
        self.read_count.store(0, Ordering::SeqCst);
        self.read_history.lock().clear();
        self.write_history.lock().clear();
    }

    fn read(&self, kind: RegisterKind, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        self.read_history.lock().push((kind, address, count));

        if self.fail_next_read.swap(false, Ordering::SeqCst) || self.fail_all_reads.load(Ordering::SeqCst) {
            return Err(ModbusError::no_response(address, count));
        }

        let table = match kind {
            RegisterKind::Input => self.input.lock(),
            RegisterKind::Holding => self.holding.lock(),
        };

        let mut words = (address..address.saturating_add(count))
            .map(|a| table.get(&a).copied())
            .collect::<Option<Vec<u16>>>()
            .ok_or_else(|| {
                ModbusError::protocol(ProtocolError::exception_response(kind.read_function_code(), 0x02))
            })?;

        if self.short_reads.load(Ordering::SeqCst) {
            words.pop();
        }
        Ok(words)
    }
}

impl RegisterBus for MockBus {
    fn read_input_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        self.read(RegisterKind::Input, address, count)
    }

    fn read_holding_registers(&self, address: u16, count: u16) -> ModbusResult<Vec<u16>> {
        self.read(RegisterKind::Holding, address, count)
    }

    fn write_single_register(&self, address: u16, value: u16) -> ModbusResult<()> {
        self.write_history.lock().push((address, value));

        if self.fail_all_writes.load(Ordering::SeqCst) {
            return Err(ModbusError::operation(OperationError::write_failed(
                address,
                value,
                "mock write failure",
            )));
        }

        self.holding.lock().insert(address, value);
        Ok(())
    }

    fn unit_id(&self) -> u8 {
        1
    }

    fn display_name(&self) -> String {
        "Mock bus".to_string()
    }
}
