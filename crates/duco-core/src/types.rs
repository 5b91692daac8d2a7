// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Device family enumerations and constants.
//!
//! - [`ModuleType`]: the module code a node reports at offset 0
//! - [`ZoneStatus`]: decoded zone status (1-based, stored 0-based)
//! - [`ZoneAction`]: zone commands (1-based, written 0-based)
//! - [`ActionRequest`]: a raw action code or a [`ZoneAction`]

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Scale factor of the temperature input register (tenths of a degree).
pub const TEMPERATURE_SCALE: f64 = 0.1;

/// Display precision of the temperature register.
pub const TEMPERATURE_PRECISION: usize = 1;

/// Scale factor of the relative humidity input register (hundredths).
pub const RH_SCALE: f64 = 0.01;

/// Display precision of the relative humidity register.
pub const RH_PRECISION: usize = 2;

/// Added to the raw status word to obtain a [`ZoneStatus`] code.
pub const ZONE_STATUS_OFFSET: i64 = 1;

/// Subtracted from a [`ZoneAction`] code to obtain the raw action word.
pub const ACTION_OFFSET: i64 = 1;

/// First accepted raw action word.
pub const ACTION_RANGE_START: i64 = 0;

/// Step between accepted raw action words.
pub const ACTION_RANGE_STEP: i64 = 1;

/// Last accepted raw action word.
pub const ACTION_RANGE_STOP: i64 = 5;

/// First value on the percentage lattice.
pub const PCT_RANGE_START: i64 = 0;

/// Step of the percentage lattice.
pub const PCT_RANGE_STEP: i64 = 5;

/// Last value on the percentage lattice.
pub const PCT_RANGE_STOP: i64 = 100;

/// Unit ID of the ventilation master on the bus.
pub const MASTER_DEFAULT_UNIT_ID: u8 = 1;

// =============================================================================
// ModuleType
// =============================================================================

/// Module type code reported by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum ModuleType {
    /// Ventilation box (master).
    Master = 10,
    /// Valve without sensor.
    ValveSensorless = 11,
    /// Valve with CO2 sensor.
    ValveCo2 = 12,
    /// Valve with humidity sensor.
    ValveRh = 13,
    /// User controller with setpoint buttons.
    UserController = 14,
    /// Room sensor measuring CO2.
    RoomSensorCo2 = 15,
    /// Room sensor measuring humidity.
    RoomSensorRh = 16,
    /// Window ventilation controller.
    CtrlWindowVent = 17,
    /// Room switch.
    RoomSwitch = 18,
    /// Actuator print.
    ActuatorPrint = 19,
}

impl ModuleType {
    /// All module types in code order.
    pub const ALL: [ModuleType; 10] = [
        Self::Master,
        Self::ValveSensorless,
        Self::ValveCo2,
        Self::ValveRh,
        Self::UserController,
        Self::RoomSensorCo2,
        Self::RoomSensorRh,
        Self::CtrlWindowVent,
        Self::RoomSwitch,
        Self::ActuatorPrint,
    ];

    /// Looks up a module type by its code.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Returns the module code.
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Returns `true` if a node layout exists for this module type.
    pub const fn is_supported(&self) -> bool {
        !matches!(
            self,
            Self::CtrlWindowVent | Self::RoomSwitch | Self::ActuatorPrint
        )
    }

    /// Returns the vendor name of this module type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Master => "MASTER",
            Self::ValveSensorless => "VALVE_SENSORLESS",
            Self::ValveCo2 => "VALVE_CO2",
            Self::ValveRh => "VALVE_RH",
            Self::UserController => "USER_CONTROLLER",
            Self::RoomSensorCo2 => "ROOM_SENSOR_CO2",
            Self::RoomSensorRh => "ROOM_SENSOR_RH",
            Self::CtrlWindowVent => "CTRL_WINDOW_VENT",
            Self::RoomSwitch => "ROOM_SWITCH",
            Self::ActuatorPrint => "ACTUATOR_PRINT",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u16> for ModuleType {
    type Error = crate::error::DucoError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| crate::error::DucoError::unsupported_device_type(code))
    }
}

// =============================================================================
// ZoneStatus
// =============================================================================

/// Ventilation status of the zone a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ZoneStatus {
    /// Automatic mode.
    Auto = 1,
    /// High for 10 minutes.
    High10Min = 2,
    /// High for 20 minutes.
    High20Min = 3,
    /// High for 30 minutes.
    High30Min = 4,
    /// Manual low.
    ManualLow = 5,
    /// Manual medium.
    ManualMedium = 6,
    /// Manual high.
    ManualHigh = 7,
    /// Away.
    Away = 8,
    /// Error.
    Error = 9,
}

impl ZoneStatus {
    /// All statuses in code order.
    pub const ALL: [ZoneStatus; 9] = [
        Self::Auto,
        Self::High10Min,
        Self::High20Min,
        Self::High30Min,
        Self::ManualLow,
        Self::ManualMedium,
        Self::ManualHigh,
        Self::Away,
        Self::Error,
    ];

    /// Looks up a status by its 1-based code.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| i64::from(s.code()) == code)
    }

    /// Decodes the raw status word.
    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::from_code(raw + ZONE_STATUS_OFFSET)
    }

    /// Returns the 1-based code.
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Returns the vendor name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::High10Min => "HIGH_10MIN",
            Self::High20Min => "HIGH_20MIN",
            Self::High30Min => "HIGH_30MIN",
            Self::ManualLow => "MANUAL_LOW",
            Self::ManualMedium => "MANUAL_MEDIUM",
            Self::ManualHigh => "MANUAL_HIGH",
            Self::Away => "AWAY",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// ZoneAction
// =============================================================================

/// Command written to a node's action register.
///
/// Codes are 1-based; the written word is `code - ACTION_OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ZoneAction {
    /// Hide the node.
    NodeVisibilityOff = 1,
    /// Show the node.
    NodeVisibilityOn = 2,
    /// Zone to manual step 1.
    ZoneToManual1 = 3,
    /// Zone to manual step 2.
    ZoneToManual2 = 4,
    /// Zone to manual step 3.
    ZoneToManual3 = 5,
    /// Zone back to automatic.
    ZoneToAuto = 6,
    // Away (code 7, word 6) lies outside the 0..=5 action range and cannot be written.
}

impl ZoneAction {
    /// All actions in code order.
    pub const ALL: [ZoneAction; 6] = [
        Self::NodeVisibilityOff,
        Self::NodeVisibilityOn,
        Self::ZoneToManual1,
        Self::ZoneToManual2,
        Self::ZoneToManual3,
        Self::ZoneToAuto,
    ];

    /// Returns the 1-based code.
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Returns the word written to the action register.
    pub const fn raw(&self) -> i64 {
        self.code() as i64 - ACTION_OFFSET
    }
}

impl fmt::Display for ZoneAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NodeVisibilityOff => "NODE_VISIBILITY_OFF",
            Self::NodeVisibilityOn => "NODE_VISIBILITY_ON",
            Self::ZoneToManual1 => "ZONE_TO_MANUAL_1",
            Self::ZoneToManual2 => "ZONE_TO_MANUAL_2",
            Self::ZoneToManual3 => "ZONE_TO_MANUAL_3",
            Self::ZoneToAuto => "ZONE_TO_AUTO",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// ActionRequest
// =============================================================================

/// Input accepted by [`DeviceNode::set_action`](crate::node::DeviceNode::set_action).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    /// A raw action word, validated against `0..=5`.
    Raw(i64),
    /// A symbolic action, shifted by [`ACTION_OFFSET`] first.
    Zone(ZoneAction),
}

impl ActionRequest {
    /// Returns the raw word before range validation.
    pub const fn raw(&self) -> i64 {
        match self {
            Self::Raw(value) => *value,
            Self::Zone(action) => action.raw(),
        }
    }
}

impl From<i64> for ActionRequest {
    fn from(value: i64) -> Self {
        Self::Raw(value)
    }
}

impl From<i32> for ActionRequest {
    fn from(value: i32) -> Self {
        Self::Raw(i64::from(value))
    }
}

impl From<ZoneAction> for ActionRequest {
    fn from(action: ZoneAction) -> Self {
        Self::Zone(action)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_type_codes() {
        assert_eq!(ModuleType::from_code(10), Some(ModuleType::Master));
        assert_eq!(ModuleType::from_code(16), Some(ModuleType::RoomSensorRh));
        assert_eq!(ModuleType::from_code(9), None);
        assert_eq!(ModuleType::from_code(20), None);

        for t in ModuleType::ALL {
            assert_eq!(ModuleType::from_code(t.code()), Some(t));
        }

        let supported: Vec<_> = ModuleType::ALL.into_iter().filter(|t| t.is_supported()).collect();
        assert_eq!(supported.len(), 7);
        assert!(ModuleType::try_from(18).is_ok());
        assert!(ModuleType::try_from(21).unwrap_err().is_unsupported_device_type());
    }

    #[test]
    fn test_zone_status_offset() {
        assert_eq!(ZoneStatus::from_raw(0), Some(ZoneStatus::Auto));
        assert_eq!(ZoneStatus::from_raw(8), Some(ZoneStatus::Error));
        assert_eq!(ZoneStatus::from_raw(-1), None);
        assert_eq!(ZoneStatus::from_raw(9), None);
    }

    #[test]
    fn test_zone_action_raw() {
        let raws: Vec<i64> = ZoneAction::ALL.iter().map(|a| a.raw()).collect();
        assert_eq!(raws, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(ActionRequest::from(ZoneAction::ZoneToAuto).raw(), 5);
        assert_eq!(ActionRequest::from(3i64).raw(), 3);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ModuleType::ValveCo2.to_string(), "VALVE_CO2");
        assert_eq!(ZoneStatus::High10Min.to_string(), "HIGH_10MIN");
        assert_eq!(ZoneAction::ZoneToManual2.to_string(), "ZONE_TO_MANUAL_2");
    }
}
