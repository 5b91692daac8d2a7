// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Indoor air temperature.

use std::fmt;

use duco_modbus::{FormattedValue, RegisterHandle, RegisterSpec, SharedBus};

use super::{fmt_registers, node_register, Capability, CapabilityKind};
use crate::address::input;
use crate::error::DucoResult;
use crate::types::{TEMPERATURE_PRECISION, TEMPERATURE_SCALE};

/// Temperature input register in tenths of a degree.
#[derive(Debug)]
pub struct TemperatureSensing {
    temperature: RegisterHandle,
}

impl TemperatureSensing {
    /// Builds the fragment for `node_id`.
    pub fn new(node_id: u16, bus: &SharedBus) -> DucoResult<Self> {
        Ok(Self {
            temperature: node_register(
                node_id,
                input::TEMPERATURE,
                RegisterSpec::input("Temperature", 0)
                    .with_unit("°C")
                    .with_scale(TEMPERATURE_SCALE)
                    .with_precision(TEMPERATURE_PRECISION),
                bus,
            )?,
        })
    }

    /// Polls the measured temperature.
    pub fn temperature(&self) -> Option<FormattedValue> {
        self.temperature.read()
    }
}

impl Capability for TemperatureSensing {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Temperature
    }

    fn registers(&self) -> Vec<&RegisterHandle> {
        vec![&self.temperature]
    }
}

impl fmt::Display for TemperatureSensing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_registers(f, &self.registers())
    }
}
