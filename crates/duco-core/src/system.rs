// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session owning the bus and the discovered node tree.

use std::fmt;

use duco_modbus::{open_bus, SharedBus};
use tracing::info;

use crate::config::DucoConfig;
use crate::enumerate::enumerate_node_tree;
use crate::error::DucoResult;
use crate::node::DeviceNode;

/// A connected ventilation system.
///
/// ```ignore
/// use duco_core::{DucoConfig, DucoSystem};
///
/// let mut system = DucoSystem::connect(DucoConfig::tcp("ducobox.local"))?;
/// system.enumerate()?;
/// for node in system.nodes() {
///     println!("{node}");
/// }
/// ```
pub struct DucoSystem {
    config: DucoConfig,
    bus: SharedBus,
    nodes: Vec<DeviceNode>,
}

impl DucoSystem {
    /// Opens the configured transport.
    pub fn connect(config: DucoConfig) -> DucoResult<Self> {
        config.validate()?;
        let bus = open_bus(&config.connection)?;
        info!(bus = %bus.display_name(), "Connected to ventilation master");
        Ok(Self::with_bus(config, bus))
    }

    /// Wraps an already opened bus.
    pub fn with_bus(config: DucoConfig, bus: SharedBus) -> Self {
        Self {
            config,
            bus,
            nodes: Vec::new(),
        }
    }

    /// Probes the bus and rebuilds the node list.
    ///
    /// On failure the previous node list is kept.
    pub fn enumerate(&mut self) -> DucoResult<&[DeviceNode]> {
        self.nodes = enumerate_node_tree(&self.bus)?;
        Ok(&self.nodes)
    }

    /// Returns the discovered nodes.
    pub fn nodes(&self) -> &[DeviceNode] {
        &self.nodes
    }

    /// Returns the node with `node_id`.
    pub fn node(&self, node_id: u16) -> Option<&DeviceNode> {
        self.nodes.iter().find(|n| n.node_id() == node_id)
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &DucoConfig {
        &self.config
    }

    /// Returns the shared bus.
    pub fn bus(&self) -> &SharedBus {
        &self.bus
    }

    /// Drops the node tree and releases the bus.
    ///
    /// The transport disconnects once the last handle is gone.
    pub fn close(self) {
        info!(bus = %self.bus.display_name(), nodes = self.nodes.len(), "Closing session");
    }
}

impl fmt::Debug for DucoSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DucoSystem")
            .field("config", &self.config)
            .field("bus", &self.bus.display_name())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl fmt::Display for DucoSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bus.display_name())?;
        for node in &self.nodes {
            write!(f, "\n{node}")?;
        }
        Ok(())
    }
}
