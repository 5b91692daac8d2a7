// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bus address layout.
//!
//! Every node owns a block of ten registers per table:
//!
//! ```text
//! address = node_id * NODE_STRIDE + offset
//!
//!  offset │ input register   │ holding register
//! ────────┼──────────────────┼──────────────────────
//!    0    │ module type      │ fan setpoint
//!    1    │ zone status      │ CO2 setpoint
//!    2    │ fan actual       │ RH setpoint
//!    3    │ temperature      │ RH delta
//!    4    │ CO2 actual       │ button 1
//!    5    │ RH actual        │ auto-min / button 2
//!    6    │                  │ auto-max / button 3
//!    7    │                  │ manual time
//!    9    │ group (zone)     │ action
//! ```
//!
//! # Examples
//!
//! ```
//! use duco_core::address::{register_address, input};
//!
//! assert_eq!(register_address(5, input::CO2_ACTUAL).unwrap(), 54);
//! ```

use crate::error::{DucoError, DucoResult};

/// Registers per node block.
pub const NODE_STRIDE: u16 = 10;

/// Largest offset inside a node block.
pub const MAX_FIELD_OFFSET: u16 = NODE_STRIDE - 1;

/// Highest node id whose whole block fits in the 16-bit address space.
pub const MAX_NODE_ID: u16 = (u16::MAX - MAX_FIELD_OFFSET) / NODE_STRIDE;

/// Input register offsets.
pub mod input {
    /// Module type code.
    pub const MODULE_TYPE: u16 = 0;
    /// Zone status.
    pub const STATUS: u16 = 1;
    /// Actual fan speed.
    pub const FAN_ACTUAL: u16 = 2;
    /// Temperature.
    pub const TEMPERATURE: u16 = 3;
    /// Actual CO2 concentration.
    pub const CO2_ACTUAL: u16 = 4;
    /// Actual relative humidity.
    pub const RH_ACTUAL: u16 = 5;
    /// Zone (group) membership.
    pub const GROUP: u16 = 9;

    /// All input offsets.
    pub const ALL: [u16; 7] = [MODULE_TYPE, STATUS, FAN_ACTUAL, TEMPERATURE, CO2_ACTUAL, RH_ACTUAL, GROUP];
}

/// Holding register offsets.
pub mod holding {
    /// Fan setpoint.
    pub const FAN_SETPOINT: u16 = 0;
    /// CO2 setpoint.
    pub const CO2_SETPOINT: u16 = 1;
    /// RH setpoint.
    pub const RH_SETPOINT: u16 = 2;
    /// RH delta control enable.
    pub const RH_DELTA: u16 = 3;
    /// Button 1 setpoint.
    pub const BUTTON_1: u16 = 4;
    /// Auto-min bound.
    pub const AUTO_MIN: u16 = 5;
    /// Button 2 setpoint; shares the auto-min slot.
    pub const BUTTON_2: u16 = 5;
    /// Auto-max bound.
    pub const AUTO_MAX: u16 = 6;
    /// Button 3 setpoint; shares the auto-max slot.
    pub const BUTTON_3: u16 = 6;
    /// Manual mode duration.
    pub const MANUAL_TIME: u16 = 7;
    /// Zone action command.
    pub const ACTION: u16 = 9;

    /// All distinct holding offsets.
    pub const ALL: [u16; 9] = [
        FAN_SETPOINT,
        CO2_SETPOINT,
        RH_SETPOINT,
        RH_DELTA,
        BUTTON_1,
        AUTO_MIN,
        AUTO_MAX,
        MANUAL_TIME,
        ACTION,
    ];
}

/// Computes the absolute bus address of a node field.
///
/// Fails for node 0, for node ids above [`MAX_NODE_ID`], and for offsets
/// outside the node block.
pub fn register_address(node_id: u16, offset: u16) -> DucoResult<u16> {
    validate_node_id(node_id)?;

    if offset > MAX_FIELD_OFFSET {
        return Err(DucoError::invalid_node_id(
            node_id,
            format!("field offset {offset} outside the node block"),
        ));
    }

    Ok(node_id * NODE_STRIDE + offset)
}

/// Checks that a node id is addressable.
pub fn validate_node_id(node_id: u16) -> DucoResult<()> {
    if node_id == 0 {
        return Err(DucoError::invalid_node_id(node_id, "node ids start at 1"));
    }
    if node_id > MAX_NODE_ID {
        return Err(DucoError::invalid_node_id(
            node_id,
            format!("node ids end at {MAX_NODE_ID}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_register_address() {
        assert_eq!(register_address(1, input::MODULE_TYPE).unwrap(), 10);
        assert_eq!(register_address(1, holding::ACTION).unwrap(), 19);
        assert_eq!(register_address(23, input::FAN_ACTUAL).unwrap(), 232);
        assert_eq!(register_address(MAX_NODE_ID, MAX_FIELD_OFFSET).unwrap(), 65529);
    }

    #[test]
    fn test_register_address_rejects_bad_input() {
        assert!(register_address(0, input::STATUS).is_err());
        assert!(register_address(MAX_NODE_ID + 1, 0).is_err());
        assert!(register_address(1, 10).is_err());
    }

    #[test]
    fn test_addresses_are_injective() {
        for offsets in [&input::ALL[..], &holding::ALL[..]] {
            let mut seen = HashSet::new();
            for node_id in 1..=200 {
                for &offset in offsets {
                    let address = register_address(node_id, offset).unwrap();
                    assert_eq!(address, node_id * 10 + offset);
                    assert!(seen.insert(address), "duplicate address {address}");
                }
            }
        }
    }
}
