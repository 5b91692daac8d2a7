// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Setpoint buttons of user controllers and room sensors.

use std::fmt;

use duco_modbus::{FormattedValue, RegisterHandle, RegisterSpec, SharedBus};

use super::{fmt_registers, node_register, Capability, CapabilityKind};
use crate::address::holding;
use crate::error::{DucoError, DucoResult};
use crate::validate::set_bounded_percentage;

/// Three configurable setpoint buttons and the manual mode duration.
#[derive(Debug)]
pub struct UserButtons {
    buttons: [RegisterHandle; 3],
    manual_time: RegisterHandle,
}

impl UserButtons {
    /// Number of setpoint buttons.
    pub const BUTTON_COUNT: usize = 3;

    /// Builds the fragment for `node_id`.
    pub fn new(node_id: u16, bus: &SharedBus) -> DucoResult<Self> {
        let button = |name: &str, offset: u16| {
            node_register(node_id, offset, RegisterSpec::holding(name, 0).with_unit("%"), bus)
        };

        Ok(Self {
            buttons: [
                button("Button 1", holding::BUTTON_1)?,
                button("Button 2", holding::BUTTON_2)?,
                button("Button 3", holding::BUTTON_3)?,
            ],
            manual_time: node_register(
                node_id,
                holding::MANUAL_TIME,
                RegisterSpec::holding("Manual time", 0).with_unit("minutes"),
                bus,
            )?,
        })
    }

    /// Polls the setpoint behind button `number` (1-based).
    pub fn button(&self, number: usize) -> DucoResult<Option<FormattedValue>> {
        Ok(self.handle(number)?.read())
    }

    /// Sets the setpoint behind button `number` (0, 5, ..., 100).
    pub fn set_button(&self, number: usize, value: i64) -> DucoResult<()> {
        set_bounded_percentage(self.handle(number)?, value)
    }

    /// Polls the setpoint behind button 1.
    pub fn button1(&self) -> Option<FormattedValue> {
        self.buttons[0].read()
    }

    /// Polls the setpoint behind button 2.
    pub fn button2(&self) -> Option<FormattedValue> {
        self.buttons[1].read()
    }

    /// Polls the setpoint behind button 3.
    pub fn button3(&self) -> Option<FormattedValue> {
        self.buttons[2].read()
    }

    /// Polls the manual mode duration in minutes.
    pub fn manual_time(&self) -> Option<FormattedValue> {
        self.manual_time.read()
    }

    fn handle(&self, number: usize) -> DucoResult<&RegisterHandle> {
        number
            .checked_sub(1)
            .and_then(|index| self.buttons.get(index))
            .ok_or_else(|| DucoError::out_of_range(number as i64, 1, 1, Self::BUTTON_COUNT as i64))
    }
}

impl Capability for UserButtons {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::UserButtons
    }

    fn registers(&self) -> Vec<&RegisterHandle> {
        let mut registers: Vec<&RegisterHandle> = self.buttons.iter().collect();
        registers.push(&self.manual_time);
        registers
    }
}

impl fmt::Display for UserButtons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_registers(f, &self.registers())
    }
}
