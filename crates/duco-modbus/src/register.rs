// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed accessor for one bus-addressable quantity.
//!
//! A [`RegisterHandle`] polls its words through the shared bus, decodes them
//! with [`conversion`](crate::conversion), and caches the last successfully
//! decoded value. A failed poll keeps the cached value (or leaves it unset).
//!
//! # Examples
//!
//! ```ignore
//! let temperature = RegisterHandle::new(
//!     RegisterSpec::input("Temperature", 13).with_unit("°C").with_scale(0.1).with_precision(1),
//!     bus.clone(),
//! )?;
//! if let Some(value) = temperature.read() {
//!     println!("{value}");
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::bus::SharedBus;
use crate::conversion::{decode_value, encode_word, format_scaled, twos_complement, RawValue};
use crate::error::{ModbusError, ModbusResult, OperationError};
use crate::types::{FormattedValue, RegisterKind, RegisterSpec, RegisterState};

/// One register bound to the shared bus, with its cached value.
pub struct RegisterHandle {
    spec: RegisterSpec,
    bus: SharedBus,
    last_value: RwLock<Option<FormattedValue>>,
}

impl RegisterHandle {
    /// Creates a handle with no cached value.
    ///
    /// Fails if the spec has an unsupported word count, or an encoding that
    /// does not fit it.
    pub fn new(spec: RegisterSpec, bus: SharedBus) -> ModbusResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            bus,
            last_value: RwLock::new(None),
        })
    }

    /// Returns the static description.
    pub fn spec(&self) -> &RegisterSpec {
        &self.spec
    }

    /// Returns the display label.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Returns the absolute bus address.
    pub fn address(&self) -> u16 {
        self.spec.address
    }

    /// Returns the register kind.
    pub fn kind(&self) -> RegisterKind {
        self.spec.kind
    }

    /// Returns the display unit.
    pub fn unit(&self) -> &str {
        &self.spec.unit
    }

    /// Returns the cached value without polling.
    pub fn value(&self) -> Option<FormattedValue> {
        self.last_value.read().clone()
    }

    /// Polls the bus once and refreshes the cache.
    ///
    /// Returns `true` if a new value was decoded. Failures are logged and
    /// leave the cache untouched.
    pub fn update(&self) -> bool {
        match self.poll() {
            Ok(value) => {
                trace!(register = %self.spec.name, address = self.spec.address, value = %value, "Register updated");
                *self.last_value.write() = Some(value);
                true
            }
            Err(e) => {
                e.log(&format!("poll {} at {}", self.spec.name, self.spec));
                false
            }
        }
    }

    /// Polls the bus and returns the current value.
    ///
    /// On a failed poll this is the previous value, or `None` if the register
    /// has never been read successfully.
    pub fn read(&self) -> Option<FormattedValue> {
        self.update();
        self.value()
    }

    /// Writes a raw register-domain integer.
    ///
    /// No scale or offset is applied. Input registers are rejected before any
    /// bus call, as are values that do not fit one word.
    pub fn write(&self, value: i32) -> ModbusResult<()> {
        if !self.spec.is_writable() {
            return Err(ModbusError::operation(OperationError::invalid_write_target(
                &self.spec.name,
                self.spec.address,
            )));
        }

        let word = encode_word(self.spec.address, value)?;

        debug!(register = %self.spec.name, address = self.spec.address, value = value, "Writing register");
        self.bus
            .write_single_register(self.spec.address, word)
            .map_err(|e| {
                if e.is_transport_failure() {
                    ModbusError::operation(OperationError::write_failed(
                        self.spec.address,
                        word,
                        e.to_string(),
                    ))
                } else {
                    e
                }
            })?;

        // cache what the next poll of this word decodes to
        let raw = twos_complement(u32::from(word), 16);
        let written = format_scaled(&self.spec, RawValue::Integer(raw));
        *self.last_value.write() = Some(written);
        Ok(())
    }

    /// Polls and returns a snapshot for status output.
    pub fn state(&self) -> RegisterState {
        RegisterState {
            name: self.spec.name.clone(),
            value: self.read(),
            unit: self.spec.unit.clone(),
        }
    }

    fn poll(&self) -> ModbusResult<FormattedValue> {
        let words = self
            .bus
            .read_registers(self.spec.kind, self.spec.address, self.spec.word_count)?;
        decode_value(&self.spec, &words)
    }
}

impl fmt::Debug for RegisterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterHandle")
            .field("spec", &self.spec)
            .field("bus", &self.bus.display_name())
            .field("last_value", &*self.last_value.read())
            .finish()
    }
}

impl fmt::Display for RegisterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = RegisterState {
            name: self.spec.name.clone(),
            value: self.value(),
            unit: self.spec.unit.clone(),
        };
        write!(f, "{state}")
    }
}

// =============================================================================
// Tests
// =============================================================================
