// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # System Integration Tests
//!
//! - `test_enumerate_*`: node tree discovery
//! - `test_session_*`: the session object
//! - `test_config_*`: configuration files

use std::io::Write;
use std::time::Duration;

use duco_core::config::{load_config, ConfigError, DucoConfig};
use duco_core::enumerate::{enumerate_node_tree, probe};
use duco_core::logging::LogFormat;
use duco_core::system::DucoSystem;
use duco_core::types::ModuleType;
use duco_modbus::{ModbusConfig, RegisterKind};
use duco_tests::common::{init_test_logging, temp_test_dir};
use duco_tests::prelude::*;

// =============================================================================
// Enumeration
// =============================================================================

#[test]
fn test_enumerate_installation() {
    init_test_logging();
    let installation = NodeFixtures::installation();
    let (_, bus) = NodeFixtures::bus_with(&installation);

    let nodes = enumerate_node_tree(&bus).unwrap();
    let found: Vec<(u16, ModuleType)> = nodes.iter().map(|n| (n.node_id(), n.module_type())).collect();
    assert_eq!(found, installation);
    assert_unique_addresses(&nodes);
}

#[test]
fn test_enumerate_stops_at_first_gap() {
    let (mock, bus) = NodeFixtures::bus_with(&[
        (1, ModuleType::Master),
        (2, ModuleType::ValveSensorless),
        (4, ModuleType::ValveCo2),
    ]);

    let nodes = enumerate_node_tree(&bus).unwrap();
    assert_eq!(nodes.len(), 2);

    let probed: Vec<u16> = mock.get_read_history().iter().map(|(_, address, _)| *address).collect();
    assert_eq!(probed, vec![10, 20, 30]);
}

#[test]
fn test_enumerate_unsupported_type_halts() {
    let (_, bus) = NodeFixtures::bus_with(&[(1, ModuleType::Master), (2, ModuleType::RoomSwitch)]);
    let error = enumerate_node_tree(&bus).unwrap_err();
    assert!(error.is_unsupported_device_type());
    assert!(error.to_string().contains("ROOM_SWITCH"));
}

#[test]
fn test_enumerate_probe() {
    let (mock, bus) = MockBus::shared();
    mock.add_node(7, ModuleType::RoomSensorRh.code());

    assert_eq!(probe(bus.as_ref(), 7), Some(16));
    assert_eq!(probe(bus.as_ref(), 8), None);
    assert_eq!(
        mock.get_read_history(),
        vec![(RegisterKind::Input, 70, 1), (RegisterKind::Input, 80, 1)]
    );
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_session_nodes() {
    let (mock, bus) = NodeFixtures::bus_with(&NodeFixtures::installation());
    let mut system = DucoSystem::with_bus(DucoConfig::tcp("ducobox.local"), bus);

    system.enumerate().unwrap();
    assert_eq!(system.nodes().len(), 5);

    mock.set_input(23, 205);
    let valve = system.node(2).unwrap();
    assert_eq!(valve.temperature().unwrap().temperature().unwrap(), "20.5");

    valve.set_action(duco_core::types::ZoneAction::ZoneToManual2).unwrap();
    assert_eq!(mock.get_write_history(), vec![(29, 3)]);

    assert!(system.config().connection.is_tcp());
    system.close();
}

#[test]
fn test_session_shares_bus() {
    let (mock, bus) = NodeFixtures::bus_with(&[(1, ModuleType::Master)]);
    let mut system = DucoSystem::with_bus(DucoConfig::default(), bus);
    system.enumerate().unwrap();

    mock.reset();
    mock.fail_all_reads(true);
    let node = system.node(1).unwrap();
    assert_eq!(node.fan_actual(), None);
    assert_eq!(mock.get_read_count(), 1);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_yaml_file() {
    let dir = temp_test_dir("duco-config");
    let path = dir.path().join("duco.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "connection:\n  type: tcp\n  host: 192.168.1.20\n  port: 5020\n  timeout: 2s\nlogging:\n  level: debug\n  format: compact"
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    match &config.connection {
        ModbusConfig::Tcp(tcp) => {
            assert_eq!(tcp.host, "192.168.1.20");
            assert_eq!(tcp.port, 5020);
            assert_eq!(tcp.timeout, Duration::from_secs(2));
        }
        other => panic!("unexpected connection {other:?}"),
    }
    assert_eq!(config.logging.format, LogFormat::Compact);
}

#[test]
fn test_config_toml_serial_file() {
    let dir = temp_test_dir("duco-config");
    let path = dir.path().join("duco.toml");
    std::fs::write(
        &path,
        "[connection]\ntype = \"serial\"\nport = \"/dev/ttyUSB0\"\nunit_id = 2\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    match &config.connection {
        ModbusConfig::Serial(rtu) => {
            assert_eq!(rtu.baud_rate, 9600);
            assert_eq!(rtu.frame_notation(), "8N1");
            assert_eq!(rtu.unit_id, 2);
        }
        other => panic!("unexpected connection {other:?}"),
    }
}

#[test]
fn test_config_json_roundtrip() {
    let config = DucoConfig::for_client("serial", "/dev/ttyAMA0", 1).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"type\":\"serial\""));
    assert!(json.contains("\"timeout\":\"1s\""));

    let dir = temp_test_dir("duco-config");
    let path = dir.path().join("duco.json");
    std::fs::write(&path, json).unwrap();
    assert_eq!(load_config(&path).unwrap(), config);
}

#[test]
fn test_config_invalid_file() {
    let dir = temp_test_dir("duco-config");
    let path = dir.path().join("duco.toml");
    std::fs::write(&path, "[connection]\ntype = \"carrier-pigeon\"\n").unwrap();

    assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
}
