// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Node layouts and register words shared by the integration suites.

use std::sync::Arc;

use duco_core::types::ModuleType;
use duco_modbus::{RegisterHandle, RegisterSpec, SharedBus};

use super::mocks::MockBus;

// =============================================================================
// Register Fixtures
// =============================================================================

/// Register specs and words used across tests.
pub struct RegisterFixtures;

impl RegisterFixtures {
    /// Raw temperature word for 21.6 °C.
    pub const TEMPERATURE_WORD: u16 = 216;

    /// Raw humidity word for 37.54 %.
    pub const HUMIDITY_WORD: u16 = 3754;

    /// A temperature input register at `address`.
    pub fn temperature(address: u16) -> RegisterSpec {
        RegisterSpec::input("Temperature", address)
            .with_unit("°C")
            .with_scale(0.1)
            .with_precision(1)
    }

    /// A humidity input register at `address`.
    pub fn humidity(address: u16) -> RegisterSpec {
        RegisterSpec::input("RH value", address)
            .with_unit("%")
            .with_scale(0.01)
            .with_precision(2)
    }

    /// A percentage holding register at `address`.
    pub fn percentage(address: u16) -> RegisterSpec {
        RegisterSpec::holding("Setpoint", address).with_unit("%")
    }

    /// Builds a handle on `bus`. Panics on an invalid spec.
    pub fn handle(spec: RegisterSpec, bus: &SharedBus) -> RegisterHandle {
        RegisterHandle::new(spec, bus.clone()).expect("fixture register spec is valid")
    }
}

// =============================================================================
// Node Fixtures
// =============================================================================

/// Node trees to seed a [`MockBus`] with.
pub struct NodeFixtures;

impl NodeFixtures {
    /// A typical installation: box, two valves, a controller and a sensor.
    pub fn installation() -> Vec<(u16, ModuleType)> {
        vec![
            (1, ModuleType::Master),
            (2, ModuleType::ValveCo2),
            (3, ModuleType::ValveRh),
            (4, ModuleType::UserController),
            (5, ModuleType::RoomSensorCo2),
        ]
    }

    /// Every module type that has a node layout.
    pub fn supported_types() -> Vec<ModuleType> {
        ModuleType::ALL.into_iter().filter(|t| t.is_supported()).collect()
    }

    /// Returns a bus answering for `nodes`.
    pub fn bus_with(nodes: &[(u16, ModuleType)]) -> (Arc<MockBus>, SharedBus) {
        let (mock, bus) = MockBus::shared();
        for (node_id, module_type) in nodes {
            mock.add_node(*node_id, module_type.code());
        }
        (mock, bus)
    }
}
