// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # duco-core
//!
//! Node composition, discovery and sessions for the Duco ventilation system.
//!
//! - **Types**: module types, zone status and zone actions
//! - **Address**: the `node_id * 10 + offset` register layout
//! - **Capability**: reusable register fragments (temperature, humidity,
//!   CO2, auto-min/max, user buttons)
//! - **Node**: [`DeviceNode`], a base register set plus its fragments
//! - **Factory**: module type to node layout
//! - **Enumerate**: linear probe of the node tree
//! - **System**: [`DucoSystem`], the session owning bus and nodes
//! - **Config / Logging**: file configuration and subscriber setup
//!
//! ## Feature Flags
//!
//! - `tcp` (default): Modbus TCP transport for [`DucoSystem::connect`]
//! - `rtu`: Modbus RTU transport over a serial port
//!
//! ## Example
//!
//! ```rust,ignore
//! use duco_core::{DucoConfig, DucoSystem, ZoneAction};
//!
//! let mut system = DucoSystem::connect(DucoConfig::for_client("tcp", "502", 1)?)?;
//! system.enumerate()?;
//!
//! if let Some(node) = system.node(2) {
//!     if let Some(temperature) = node.temperature() {
//!         println!("{:?}", temperature.temperature());
//!     }
//!     node.set_action(ZoneAction::ZoneToAuto)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod address;
pub mod error;
pub mod types;
pub mod validate;

// =============================================================================
// Node Modules
// =============================================================================

pub mod capability;
pub mod enumerate;
pub mod factory;
pub mod node;
pub mod system;

// =============================================================================
// Ambient Modules
// =============================================================================

pub mod config;
pub mod logging;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use address::{register_address, MAX_NODE_ID, NODE_STRIDE};
pub use capability::{
    AutoRange, Capability, CapabilityKind, Co2Sensing, HumiditySensing, TemperatureSensing,
    UserButtons,
};
pub use config::{load_config, parse_config, ConfigFormat, DucoConfig, LoggingConfig};
pub use enumerate::{enumerate_node_tree, probe};
pub use error::{ConfigError, ConfigResult, DucoError, DucoResult};
pub use factory::{capabilities_for, create_node, create_node_for};
pub use logging::{init_logging, LogFormat};
pub use node::{CapabilityState, DeviceNode, NodeState};
pub use system::DucoSystem;
pub use types::{ActionRequest, ModuleType, ZoneAction, ZoneStatus};
pub use validate::{set_bounded_percentage, Lattice};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
