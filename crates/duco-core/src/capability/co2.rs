// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CO2 concentration and setpoint.

use std::fmt;

use duco_modbus::{FormattedValue, RegisterHandle, RegisterSpec, SharedBus};

use super::{fmt_registers, node_register, Capability, CapabilityKind};
use crate::address::{holding, input};
use crate::error::DucoResult;

/// Measured and desired CO2 concentration in ppm.
#[derive(Debug)]
pub struct Co2Sensing {
    co2_value: RegisterHandle,
    co2_setpoint: RegisterHandle,
}

impl Co2Sensing {
    /// Builds the fragment for `node_id`.
    pub fn new(node_id: u16, bus: &SharedBus) -> DucoResult<Self> {
        Ok(Self {
            co2_value: node_register(
                node_id,
                input::CO2_ACTUAL,
                RegisterSpec::input("CO2 value", 0).with_unit("ppm"),
                bus,
            )?,
            co2_setpoint: node_register(
                node_id,
                holding::CO2_SETPOINT,
                RegisterSpec::holding("CO2 setpoint", 0).with_unit("ppm"),
                bus,
            )?,
        })
    }

    /// Polls the measured concentration.
    pub fn co2_value(&self) -> Option<FormattedValue> {
        self.co2_value.read()
    }

    /// Polls the desired concentration.
    pub fn co2_setpoint(&self) -> Option<FormattedValue> {
        self.co2_setpoint.read()
    }
}

impl Capability for Co2Sensing {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Co2
    }

    fn registers(&self) -> Vec<&RegisterHandle> {
        vec![&self.co2_value, &self.co2_setpoint]
    }
}

impl fmt::Display for Co2Sensing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_registers(f, &self.registers())
    }
}
