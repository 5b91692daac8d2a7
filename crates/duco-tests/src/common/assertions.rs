// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Assertion helpers with failure messages that name the register or node.

use duco_core::capability::CapabilityKind;
use duco_core::node::DeviceNode;
use duco_modbus::RegisterHandle;

// =============================================================================
// Register Assertions
// =============================================================================

/// Assertion extensions for RegisterHandle.
pub trait RegisterAssertions {
    /// Assert the cached value, without polling.
    fn assert_cached(&self, expected: Option<&str>);

    /// Assert the register address.
    fn assert_address(&self, expected: u16);
}

impl RegisterAssertions for RegisterHandle {
    fn assert_cached(&self, expected: Option<&str>) {
        let actual = self.value();
        assert_eq!(
            actual.as_ref().map(|v| v.as_str()),
            expected,
            "Expected cached value {:?}, but got {:?} for {}",
            expected,
            actual,
            self.name()
        );
    }

    fn assert_address(&self, expected: u16) {
        assert_eq!(
            self.address(),
            expected,
            "Expected address {}, but got {} for {}",
            expected,
            self.address(),
            self.name()
        );
    }
}

// =============================================================================
// Node Assertions
// =============================================================================

/// Assertion extensions for DeviceNode.
pub trait NodeAssertions {
    /// Assert the node exposes exactly these `(name, address)` pairs, in order.
    fn assert_registers(&self, expected: &[(&str, u16)]);

    /// Assert the node carries exactly these fragments, in display order.
    fn assert_capabilities(&self, expected: &[CapabilityKind]);
}

impl NodeAssertions for DeviceNode {
    fn assert_registers(&self, expected: &[(&str, u16)]) {
        let actual: Vec<(&str, u16)> = self
            .registers()
            .into_iter()
            .map(|r| (r.name(), r.address()))
            .collect();
        assert_eq!(
            actual, expected,
            "Unexpected registers for node {} ({})",
            self.node_id(),
            self.module_type()
        );
    }

    fn assert_capabilities(&self, expected: &[CapabilityKind]) {
        assert_eq!(
            self.capability_kinds(),
            expected,
            "Unexpected capabilities for node {} ({})",
            self.node_id(),
            self.module_type()
        );
    }
}

/// Asserts that all addresses are distinct within each register table.
pub fn assert_unique_addresses(nodes: &[DeviceNode]) {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    for node in nodes {
        for register in node.registers() {
            // the action register shares offset 9 with the zone input register
            let key = (register.kind(), register.address());
            assert!(
                seen.insert(key),
                "Duplicate {} address {} on node {}",
                register.kind().short_name(),
                register.address(),
                node.node_id()
            );
        }
    }
}
