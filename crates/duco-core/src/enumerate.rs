// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Linear node discovery.
//!
//! Node ids are probed from 1 upward by reading the module type input
//! register. The first node that does not answer ends the scan, so a gap in
//! the id range hides every node behind it.

use duco_modbus::{RegisterBus, SharedBus};
use tracing::{debug, info};

use crate::address::{input, register_address, MAX_NODE_ID};
use crate::error::DucoResult;
use crate::factory::create_node;
use crate::node::DeviceNode;

/// Reads the raw module type code of `node_id`.
///
/// Returns `None` if the node does not answer or the id is not addressable.
pub fn probe(bus: &dyn RegisterBus, node_id: u16) -> Option<u16> {
    let address = register_address(node_id, input::MODULE_TYPE).ok()?;
    match bus.read_input_registers(address, 1) {
        Ok(words) => {
            let code = words.first().copied();
            debug!(node_id = node_id, address = address, code = ?code, "Probed node");
            code
        }
        Err(e) => {
            debug!(node_id = node_id, address = address, error = %e, "No answer from node");
            None
        }
    }
}

/// Discovers and builds every node on the bus.
///
/// Fails with
/// [`DucoError::UnsupportedDeviceType`](crate::error::DucoError::UnsupportedDeviceType)
/// as soon as a node reports a module type without a node layout; nodes
/// built so far are dropped.
pub fn enumerate_node_tree(bus: &SharedBus) -> DucoResult<Vec<DeviceNode>> {
    let mut nodes = Vec::new();

    for node_id in 1..=MAX_NODE_ID {
        let Some(code) = probe(bus.as_ref(), node_id) else {
            break;
        };
        nodes.push(create_node(node_id, code, bus)?);
    }

    info!(bus = %bus.display_name(), nodes = nodes.len(), "Node tree enumerated");
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestBus;
    use crate::types::ModuleType;

    #[test]
    fn test_probe() {
        let (mock, bus) = TestBus::shared();
        mock.set_input(10, 10);
        assert_eq!(probe(bus.as_ref(), 1), Some(10));
        assert_eq!(probe(bus.as_ref(), 2), None);
        assert_eq!(probe(bus.as_ref(), 0), None);
    }

    #[test]
    fn test_stops_at_first_gap() {
        let (mock, bus) = TestBus::shared();
        mock.set_input(10, 10);
        mock.set_input(20, 12);
        mock.set_input(40, 15);

        let nodes = enumerate_node_tree(&bus).unwrap();
        let types: Vec<ModuleType> = nodes.iter().map(|n| n.module_type()).collect();
        assert_eq!(types, vec![ModuleType::Master, ModuleType::ValveCo2]);
    }

    #[test]
    fn test_unsupported_type_aborts() {
        let (mock, bus) = TestBus::shared();
        mock.set_input(10, 10);
        mock.set_input(20, 17);
        mock.set_input(30, 11);

        let error = enumerate_node_tree(&bus).unwrap_err();
        assert!(error.is_unsupported_device_type());
    }

    #[test]
    fn test_empty_bus() {
        let (mock, bus) = TestBus::shared();
        mock.set_input(10, 10);
        mock.clear_input(10);
        assert!(enumerate_node_tree(&bus).unwrap().is_empty());
    }
}
