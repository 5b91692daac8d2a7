// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Module type to node layout mapping.
//!
//! | Module type       | Fragments                               |
//! |-------------------|-----------------------------------------|
//! | MASTER            | AutoRange                               |
//! | VALVE_SENSORLESS  | AutoRange, Temperature                  |
//! | VALVE_CO2         | AutoRange, Temperature, Co2             |
//! | VALVE_RH          | AutoRange, Temperature, Humidity        |
//! | USER_CONTROLLER   | UserButtons                             |
//! | ROOM_SENSOR_CO2   | UserButtons, Co2                        |
//! | ROOM_SENSOR_RH    | UserButtons, Humidity                   |
//!
//! Any other code fails with
//! [`DucoError::UnsupportedDeviceType`](crate::error::DucoError::UnsupportedDeviceType).

use duco_modbus::SharedBus;
use tracing::debug;

use crate::address::validate_node_id;
use crate::capability::{
    AutoRange, CapabilityKind, Co2Sensing, HumiditySensing, TemperatureSensing, UserButtons,
};
use crate::error::{DucoError, DucoResult};
use crate::node::{DeviceNode, Fragments};
use crate::types::ModuleType;

use crate::capability::CapabilityKind::{AutoRange as Range, Co2, Humidity, Temperature, UserButtons as Buttons};

/// Returns the fragments a module type carries, or `None` if it has no
/// node layout.
pub fn capabilities_for(module_type: ModuleType) -> Option<&'static [CapabilityKind]> {
    let kinds: &'static [CapabilityKind] = match module_type {
        ModuleType::Master => &[Range],
        ModuleType::ValveSensorless => &[Range, Temperature],
        ModuleType::ValveCo2 => &[Range, Temperature, Co2],
        ModuleType::ValveRh => &[Range, Temperature, Humidity],
        ModuleType::UserController => &[Buttons],
        ModuleType::RoomSensorCo2 => &[Buttons, Co2],
        ModuleType::RoomSensorRh => &[Buttons, Humidity],
        ModuleType::CtrlWindowVent | ModuleType::RoomSwitch | ModuleType::ActuatorPrint => {
            return None;
        }
    };
    Some(kinds)
}

/// Builds the node for a raw module code read from the bus.
pub fn create_node(node_id: u16, code: u16, bus: &SharedBus) -> DucoResult<DeviceNode> {
    let module_type = ModuleType::from_code(code).ok_or_else(|| DucoError::unsupported_device_type(code))?;
    create_node_for(node_id, module_type, bus)
}

/// Builds the node for a known module type.
pub fn create_node_for(node_id: u16, module_type: ModuleType, bus: &SharedBus) -> DucoResult<DeviceNode> {
    validate_node_id(node_id)?;
    let kinds = capabilities_for(module_type)
        .ok_or_else(|| DucoError::unsupported_device_type(module_type.code()))?;

    debug!(node_id = node_id, module_type = %module_type, capabilities = ?kinds, "Creating node");

    let mut fragments = Fragments::default();
    for kind in kinds {
        match kind {
            Range => fragments.auto_range = Some(AutoRange::new(node_id, bus)?),
            Temperature => fragments.temperature = Some(TemperatureSensing::new(node_id, bus)?),
            Humidity => fragments.humidity = Some(HumiditySensing::new(node_id, bus)?),
            Co2 => fragments.co2 = Some(Co2Sensing::new(node_id, bus)?),
            Buttons => fragments.user_buttons = Some(UserButtons::new(node_id, bus)?),
        }
    }

    DeviceNode::new(node_id, module_type, bus, fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestBus;

    #[test]
    fn test_capability_table() {
        for module_type in ModuleType::ALL {
            assert_eq!(capabilities_for(module_type).is_some(), module_type.is_supported());
        }
    }

    #[test]
    fn test_node_matches_table() {
        let (_, bus) = TestBus::shared();
        for module_type in ModuleType::ALL.into_iter().filter(ModuleType::is_supported) {
            let node = create_node(2, module_type.code(), &bus).unwrap();
            assert_eq!(node.module_type(), module_type);

            let mut expected = capabilities_for(module_type).unwrap().to_vec();
            let mut actual = node.capability_kinds();
            expected.sort_by_key(|k| k.as_str());
            actual.sort_by_key(|k| k.as_str());
            assert_eq!(actual, expected, "{module_type}");
        }
    }

    #[test]
    fn test_room_sensor_co2_layout() {
        let (_, bus) = TestBus::shared();
        let node = create_node(5, 15, &bus).unwrap();

        let registers = node.registers();
        let fragment_registers = registers.len() - node.base_registers().len();
        assert_eq!(fragment_registers, 6);
        assert!(node.user_buttons().is_some());
        assert!(node.co2().is_some());
        assert!(node.auto_range().is_none());
    }

    #[test]
    fn test_unsupported_codes() {
        let (_, bus) = TestBus::shared();
        for code in [17, 18, 19, 0, 9, 20, 255] {
            let error = create_node(1, code, &bus).unwrap_err();
            assert!(error.is_unsupported_device_type(), "code {code}");
        }
    }

    #[test]
    fn test_invalid_node_id() {
        let (_, bus) = TestBus::shared();
        assert!(create_node(0, 10, &bus).is_err());
    }
}
