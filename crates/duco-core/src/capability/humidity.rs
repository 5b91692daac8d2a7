// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Relative humidity sensing.

use std::fmt;

use duco_modbus::{FormattedValue, RegisterHandle, RegisterSpec, SharedBus};

use super::{fmt_registers, node_register, Capability, CapabilityKind};
use crate::address::{holding, input};
use crate::error::DucoResult;
use crate::types::{RH_PRECISION, RH_SCALE};

/// Measured humidity (hundredths of a percent), setpoint and delta control.
#[derive(Debug)]
pub struct HumiditySensing {
    rh_value: RegisterHandle,
    rh_setpoint: RegisterHandle,
    rh_delta: RegisterHandle,
}

impl HumiditySensing {
    /// Builds the fragment for `node_id`.
    pub fn new(node_id: u16, bus: &SharedBus) -> DucoResult<Self> {
        Ok(Self {
            rh_value: node_register(
                node_id,
                input::RH_ACTUAL,
                RegisterSpec::input("RH value", 0)
                    .with_unit("%")
                    .with_scale(RH_SCALE)
                    .with_precision(RH_PRECISION),
                bus,
            )?,
            rh_setpoint: node_register(
                node_id,
                holding::RH_SETPOINT,
                RegisterSpec::holding("RH setpoint", 0).with_unit("%"),
                bus,
            )?,
            rh_delta: node_register(
                node_id,
                holding::RH_DELTA,
                RegisterSpec::holding("RH delta", 0).with_unit("-"),
                bus,
            )?,
        })
    }

    /// Polls the measured relative humidity.
    pub fn rh_value(&self) -> Option<FormattedValue> {
        self.rh_value.read()
    }

    /// Polls the desired relative humidity.
    pub fn rh_setpoint(&self) -> Option<FormattedValue> {
        self.rh_setpoint.read()
    }

    /// Polls whether delta control is enabled.
    pub fn is_rh_delta_enabled(&self) -> Option<bool> {
        self.rh_delta
            .read()
            .and_then(|value| value.as_i64())
            .map(|flag| flag != 0)
    }
}

impl Capability for HumiditySensing {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Humidity
    }

    fn registers(&self) -> Vec<&RegisterHandle> {
        vec![&self.rh_value, &self.rh_setpoint, &self.rh_delta]
    }
}

impl fmt::Display for HumiditySensing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_registers(f, &self.registers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestBus;

    #[test]
    fn test_rh_value_scaling() {
        let (mock, bus) = TestBus::shared();
        mock.set_input(25, 3754);
        let sensor = HumiditySensing::new(2, &bus).unwrap();
        assert_eq!(sensor.rh_value().unwrap(), "37.54");
    }

    #[test]
    fn test_delta_flag() {
        let (mock, bus) = TestBus::shared();
        let sensor = HumiditySensing::new(2, &bus).unwrap();
        assert_eq!(sensor.is_rh_delta_enabled(), None);

        mock.set_holding(23, 1);
        assert_eq!(sensor.is_rh_delta_enabled(), Some(true));
        mock.set_holding(23, 0);
        assert_eq!(sensor.is_rh_delta_enabled(), Some(false));
    }
}
