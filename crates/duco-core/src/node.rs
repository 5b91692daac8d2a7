// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Composed device nodes.
//!
//! A [`DeviceNode`] owns the base register set every module exposes plus the
//! capability fragments its [`ModuleType`] selects. Fragments are fixed at
//! construction; see [`factory`](crate::factory).
//!
//! Base registers per node:
//!
//! | Register      | Table   | Offset |
//! |---------------|---------|--------|
//! | Zone status   | input   | 1      |
//! | Fan actual    | input   | 2      |
//! | Zone          | input   | 9      |
//! | Zone setpoint | holding | 0      |
//! | Zone action   | holding | 9      |

use std::fmt;

use duco_modbus::{FormattedValue, RegisterHandle, RegisterSpec, RegisterState, SharedBus};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::{holding, input};
use crate::capability::{
    node_register, AutoRange, Capability, CapabilityKind, Co2Sensing, HumiditySensing,
    TemperatureSensing, UserButtons,
};
use crate::error::DucoResult;
use crate::types::{ActionRequest, ModuleType, ZoneStatus};
use crate::validate::{write_on_lattice, ACTION};

/// Optional fragments of a node.
#[derive(Debug, Default)]
pub(crate) struct Fragments {
    pub(crate) auto_range: Option<AutoRange>,
    pub(crate) temperature: Option<TemperatureSensing>,
    pub(crate) humidity: Option<HumiditySensing>,
    pub(crate) co2: Option<Co2Sensing>,
    pub(crate) user_buttons: Option<UserButtons>,
}

/// One module on the ventilation bus.
#[derive(Debug)]
pub struct DeviceNode {
    node_id: u16,
    module_type: ModuleType,
    status: RegisterHandle,
    fan_actual: RegisterHandle,
    zone: RegisterHandle,
    setpoint: RegisterHandle,
    action: RegisterHandle,
    fragments: Fragments,
}

impl DeviceNode {
    pub(crate) fn new(
        node_id: u16,
        module_type: ModuleType,
        bus: &SharedBus,
        fragments: Fragments,
    ) -> DucoResult<Self> {
        let node = Self {
            node_id,
            module_type,
            status: node_register(node_id, input::STATUS, RegisterSpec::input("Zone status", 0), bus)?,
            fan_actual: node_register(
                node_id,
                input::FAN_ACTUAL,
                RegisterSpec::input("Fan actual", 0).with_unit("%"),
                bus,
            )?,
            zone: node_register(node_id, input::GROUP, RegisterSpec::input("Zone", 0), bus)?,
            setpoint: node_register(
                node_id,
                holding::FAN_SETPOINT,
                RegisterSpec::holding("Zone setpoint", 0).with_unit("%"),
                bus,
            )?,
            action: node_register(node_id, holding::ACTION, RegisterSpec::holding("Zone action", 0), bus)?,
            fragments,
        };

        debug!(
            node_id = node_id,
            module_type = %module_type,
            registers = node.registers().len(),
            "Node constructed"
        );
        Ok(node)
    }

    /// Returns the node id.
    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    /// Returns the module type.
    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    /// Polls the zone status.
    ///
    /// `None` if the register has never been read or holds an unknown code.
    pub fn status(&self) -> Option<ZoneStatus> {
        self.status.read().and_then(|v| v.as_i64()).and_then(ZoneStatus::from_raw)
    }

    /// Polls the actual fan speed in percent.
    pub fn fan_actual(&self) -> Option<FormattedValue> {
        self.fan_actual.read()
    }

    /// Polls the zone the node belongs to.
    pub fn zone(&self) -> Option<FormattedValue> {
        self.zone.read()
    }

    /// Polls the fan setpoint in percent.
    pub fn setpoint(&self) -> Option<FormattedValue> {
        self.setpoint.read()
    }

    /// The action register is write-only; there is nothing to read back.
    pub fn action(&self) -> Option<FormattedValue> {
        None
    }

    /// Writes a zone action.
    ///
    /// Accepts a raw word in `0..=5` or a [`ZoneAction`](crate::types::ZoneAction),
    /// which is shifted to its raw word first. Out-of-range values fail
    /// before any bus call.
    pub fn set_action(&self, action: impl Into<ActionRequest>) -> DucoResult<()> {
        let request = action.into();
        debug!(node_id = self.node_id, action = ?request, "Setting zone action");
        write_on_lattice(&self.action, &ACTION, request.raw())
    }

    /// Returns the auto-min/max fragment, if the module has one.
    pub fn auto_range(&self) -> Option<&AutoRange> {
        self.fragments.auto_range.as_ref()
    }

    /// Returns the temperature fragment, if the module has one.
    pub fn temperature(&self) -> Option<&TemperatureSensing> {
        self.fragments.temperature.as_ref()
    }

    /// Returns the humidity fragment, if the module has one.
    pub fn humidity(&self) -> Option<&HumiditySensing> {
        self.fragments.humidity.as_ref()
    }

    /// Returns the CO2 fragment, if the module has one.
    pub fn co2(&self) -> Option<&Co2Sensing> {
        self.fragments.co2.as_ref()
    }

    /// Returns the user button fragment, if the module has one.
    pub fn user_buttons(&self) -> Option<&UserButtons> {
        self.fragments.user_buttons.as_ref()
    }

    /// Returns the fragments in display order.
    pub fn capabilities(&self) -> Vec<&dyn Capability> {
        let Fragments {
            auto_range,
            temperature,
            humidity,
            co2,
            user_buttons,
        } = &self.fragments;

        let mut capabilities: Vec<&dyn Capability> = Vec::new();
        if let Some(c) = auto_range {
            capabilities.push(c);
        }
        if let Some(c) = user_buttons {
            capabilities.push(c);
        }
        if let Some(c) = temperature {
            capabilities.push(c);
        }
        if let Some(c) = co2 {
            capabilities.push(c);
        }
        if let Some(c) = humidity {
            capabilities.push(c);
        }
        capabilities
    }

    /// Returns the fragment kinds in display order.
    pub fn capability_kinds(&self) -> Vec<CapabilityKind> {
        self.capabilities().iter().map(|c| c.kind()).collect()
    }

    /// Returns `true` if the node carries the fragment.
    pub fn has_capability(&self, kind: CapabilityKind) -> bool {
        self.capabilities().iter().any(|c| c.kind() == kind)
    }

    /// Returns the base registers.
    pub fn base_registers(&self) -> Vec<&RegisterHandle> {
        vec![&self.status, &self.fan_actual, &self.zone, &self.setpoint, &self.action]
    }

    /// Returns every register of the node, base registers first.
    pub fn registers(&self) -> Vec<&RegisterHandle> {
        let mut registers = self.base_registers();
        for capability in self.capabilities() {
            registers.extend(capability.registers());
        }
        registers
    }

    /// Polls every readable register and returns a snapshot.
    ///
    /// The write-only action register is skipped.
    pub fn state(&self) -> NodeState {
        let base = [&self.status, &self.zone, &self.fan_actual, &self.setpoint]
            .into_iter()
            .map(RegisterHandle::state)
            .collect();

        NodeState {
            node_id: self.node_id,
            module_type: self.module_type,
            base,
            capabilities: self
                .capabilities()
                .into_iter()
                .map(|c| CapabilityState {
                    kind: c.kind(),
                    registers: c.state(),
                })
                .collect(),
        }
    }

    fn cached_status(&self) -> Option<ZoneStatus> {
        self.status.value().and_then(|v| v.as_i64()).and_then(ZoneStatus::from_raw)
    }
}

impl fmt::Display for DeviceNode {
    /// Renders the cached values; nothing is polled.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " Node {}:", self.node_id)?;
        write!(f, "\n      {}", self.module_type)?;
        write!(f, "\n      {}", self.zone)?;
        match self.cached_status() {
            Some(status) => write!(f, "\n      {}: {}", self.status.name(), status)?,
            None => write!(f, "\n      {}", self.status)?,
        }
        write!(f, "\n      {}", self.fan_actual)?;
        write!(f, "\n      {}", self.setpoint)?;
        for capability in self.capabilities() {
            for register in capability.registers() {
                write!(f, "\n      {register}")?;
            }
        }
        Ok(())
    }
}

/// Register snapshot of one fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityState {
    /// Fragment kind.
    pub kind: CapabilityKind,
    /// Register states in display order.
    pub registers: Vec<RegisterState>,
}

/// Register snapshot of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    /// Node id.
    pub node_id: u16,
    /// Module type.
    pub module_type: ModuleType,
    /// Base register states: status, zone, fan actual, setpoint.
    pub base: Vec<RegisterState>,
    /// Fragment states in display order.
    pub capabilities: Vec<CapabilityState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestBus;
    use crate::types::ZoneAction;

    fn master(bus: &SharedBus) -> DeviceNode {
        let fragments = Fragments {
            auto_range: Some(AutoRange::new(1, bus).unwrap()),
            ..Default::default()
        };
        DeviceNode::new(1, ModuleType::Master, bus, fragments).unwrap()
    }

    #[test]
    fn test_base_addresses() {
        let (_, bus) = TestBus::shared();
        let node = master(&bus);
        let addresses: Vec<u16> = node.base_registers().iter().map(|r| r.address()).collect();
        assert_eq!(addresses, vec![11, 12, 19, 10, 19]);
        assert_eq!(node.registers().len(), 7);
    }

    #[test]
    fn test_status_decoding() {
        let (mock, bus) = TestBus::shared();
        let node = master(&bus);
        assert_eq!(node.status(), None);

        mock.set_input(11, 0);
        assert_eq!(node.status(), Some(ZoneStatus::Auto));
        mock.set_input(11, 7);
        assert_eq!(node.status(), Some(ZoneStatus::Away));
        mock.set_input(11, 42);
        assert_eq!(node.status(), None);
    }

    #[test]
    fn test_set_action() {
        let (mock, bus) = TestBus::shared();
        let node = master(&bus);

        node.set_action(ZoneAction::ZoneToAuto).unwrap();
        node.set_action(0i64).unwrap();
        node.set_action(ZoneAction::NodeVisibilityOff).unwrap();
        assert!(node.set_action(6i64).unwrap_err().is_out_of_range());
        assert!(node.set_action(-1i64).unwrap_err().is_out_of_range());

        assert_eq!(mock.writes(), vec![(19, 5), (19, 0), (19, 0)]);
        assert_eq!(node.action(), None);
    }

    #[test]
    fn test_display_uses_cache() {
        let (mock, bus) = TestBus::shared();
        let node = master(&bus);
        mock.set_input(11, 0);
        mock.set_input(12, 40);
        mock.set_input(19, 1);
        node.status();
        node.fan_actual();

        let text = node.to_string();
        assert!(text.starts_with(" Node 1:\n      MASTER\n      Zone: -\n"));
        assert!(text.contains("\n      Zone status: AUTO"));
        assert!(text.contains("\n      Fan actual: 40 %"));
        assert!(text.ends_with("\n      AutoMin: -\n      AutoMax: -"));
    }

    #[test]
    fn test_state_snapshot() {
        let (mock, bus) = TestBus::shared();
        let node = master(&bus);
        mock.set_holding(15, 10);

        let state = node.state();
        assert_eq!(state.base.len(), 4);
        assert_eq!(state.capabilities.len(), 1);
        assert_eq!(state.capabilities[0].kind, CapabilityKind::AutoRange);
        assert_eq!(state.capabilities[0].registers[0].value.as_ref().unwrap(), "10");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["module_type"], "MASTER");
    }
}
