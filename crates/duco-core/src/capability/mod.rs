// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Capability fragments composed into device nodes.
//!
//! Each fragment owns the register handles for one feature of a module and
//! computes their addresses from the owning node id. Which fragments a node
//! carries is fixed by its [`ModuleType`](crate::types::ModuleType) in
//! [`factory`](crate::factory).
//!
//! | Fragment      | Registers                                     |
//! |---------------|-----------------------------------------------|
//! | AutoRange     | auto-min, auto-max (holding, %)               |
//! | Temperature   | temperature (input, 0.1 °C)                   |
//! | Humidity      | RH value (input, 0.01 %), setpoint, delta     |
//! | Co2           | CO2 value (input, ppm), setpoint              |
//! | UserButtons   | button 1-3 (holding, %), manual time          |

pub mod auto_range;
pub mod co2;
pub mod humidity;
pub mod temperature;
pub mod user_buttons;

use std::fmt;

use duco_modbus::{RegisterHandle, RegisterSpec, RegisterState, SharedBus};
use serde::{Deserialize, Serialize};

use crate::address::register_address;
use crate::error::DucoResult;

pub use auto_range::AutoRange;
pub use co2::Co2Sensing;
pub use humidity::HumiditySensing;
pub use temperature::TemperatureSensing;
pub use user_buttons::UserButtons;

/// Identifies a capability fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    /// Auto-min/max bounds.
    AutoRange,
    /// Temperature sensing.
    Temperature,
    /// Relative humidity sensing.
    Humidity,
    /// CO2 sensing.
    Co2,
    /// Setpoint buttons and manual duration.
    UserButtons,
}

impl CapabilityKind {
    /// Returns the short name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AutoRange => "auto_range",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Co2 => "co2",
            Self::UserButtons => "user_buttons",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Behaviour shared by all capability fragments.
pub trait Capability: Send + Sync {
    /// Returns which fragment this is.
    fn kind(&self) -> CapabilityKind;

    /// Returns the fragment's registers in display order.
    fn registers(&self) -> Vec<&RegisterHandle>;

    /// Polls every register and returns their states.
    fn state(&self) -> Vec<RegisterState> {
        self.registers().into_iter().map(RegisterHandle::state).collect()
    }
}

/// Builds a handle for `node_id` at `offset` from a spec template.
///
/// The template's address is replaced by the node-relative address.
pub(crate) fn node_register(
    node_id: u16,
    offset: u16,
    mut spec: RegisterSpec,
    bus: &SharedBus,
) -> DucoResult<RegisterHandle> {
    spec.address = register_address(node_id, offset)?;
    Ok(RegisterHandle::new(spec, bus.clone())?)
}

/// Writes one indented line per register, as nodes render their fragments.
pub(crate) fn fmt_registers(f: &mut fmt::Formatter<'_>, registers: &[&RegisterHandle]) -> fmt::Result {
    for register in registers {
        write!(f, "\n      {register}")?;
    }
    Ok(())
}
