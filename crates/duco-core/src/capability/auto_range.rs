// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Auto-min/max fan bounds.

use std::fmt;

use duco_modbus::{FormattedValue, RegisterHandle, RegisterSpec, SharedBus};

use super::{fmt_registers, node_register, Capability, CapabilityKind};
use crate::address::holding;
use crate::error::DucoResult;
use crate::validate::set_bounded_percentage;

/// Lower and upper fan bound in automatic mode, in percent.
#[derive(Debug)]
pub struct AutoRange {
    auto_min: RegisterHandle,
    auto_max: RegisterHandle,
}

impl AutoRange {
    /// Builds the fragment for `node_id`.
    pub fn new(node_id: u16, bus: &SharedBus) -> DucoResult<Self> {
        Ok(Self {
            auto_min: node_register(
                node_id,
                holding::AUTO_MIN,
                RegisterSpec::holding("AutoMin", 0).with_unit("%"),
                bus,
            )?,
            auto_max: node_register(
                node_id,
                holding::AUTO_MAX,
                RegisterSpec::holding("AutoMax", 0).with_unit("%"),
                bus,
            )?,
        })
    }

    /// Polls the lower bound.
    pub fn auto_min(&self) -> Option<FormattedValue> {
        self.auto_min.read()
    }

    /// Sets the lower bound (0, 5, ..., 100).
    pub fn set_auto_min(&self, value: i64) -> DucoResult<()> {
        set_bounded_percentage(&self.auto_min, value)
    }

    /// Polls the upper bound.
    pub fn auto_max(&self) -> Option<FormattedValue> {
        self.auto_max.read()
    }

    /// Sets the upper bound (0, 5, ..., 100).
    pub fn set_auto_max(&self, value: i64) -> DucoResult<()> {
        set_bounded_percentage(&self.auto_max, value)
    }
}

impl Capability for AutoRange {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::AutoRange
    }

    fn registers(&self) -> Vec<&RegisterHandle> {
        vec![&self.auto_min, &self.auto_max]
    }
}

impl fmt::Display for AutoRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_registers(f, &self.registers())
    }
}
