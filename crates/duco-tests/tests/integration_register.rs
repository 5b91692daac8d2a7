// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Register Integration Tests
//!
//! - `test_decode_*`: word decoding, scaling and formatting
//! - `test_stale_*`: cache behaviour after failed polls
//! - `test_write_*`: write validation and encoding

use duco_core::validate::set_bounded_percentage;
use duco_modbus::conversion::twos_complement;
use duco_modbus::{Encoding, FormattedValue, RegisterHandle, RegisterKind, RegisterSpec};
use duco_tests::prelude::*;

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn test_decode_temperature() {
    let (mock, bus) = MockBus::shared();
    mock.set_input(13, RegisterFixtures::TEMPERATURE_WORD);
    let register = RegisterFixtures::handle(RegisterFixtures::temperature(13), &bus);

    assert_eq!(register.read().unwrap(), "21.6");
    assert_eq!(register.to_string(), "Temperature: 21.6 °C");
    assert_eq!(mock.get_read_history(), vec![(RegisterKind::Input, 13, 1)]);
}

#[test]
fn test_decode_humidity() {
    let (mock, bus) = MockBus::shared();
    mock.set_input(25, RegisterFixtures::HUMIDITY_WORD);
    let register = RegisterFixtures::handle(RegisterFixtures::humidity(25), &bus);

    assert_eq!(register.read().unwrap(), "37.54");
}

#[test]
fn test_decode_signed_word() {
    let (mock, bus) = MockBus::shared();
    mock.set_input(13, 0xFFFF);
    let register = RegisterFixtures::handle(RegisterFixtures::temperature(13), &bus);

    assert_eq!(register.read().unwrap(), "-0.1");
}

#[test]
fn test_decode_trailing_zeros() {
    let (mock, bus) = MockBus::shared();
    mock.set_input(13, 200);
    let register = RegisterFixtures::handle(RegisterFixtures::temperature(13), &bus);

    assert_eq!(register.read().unwrap(), "20.0");
}

#[test]
fn test_decode_two_word_integer_is_unsigned() {
    // words are summed low word first, without sign correction
    let (mock, bus) = MockBus::shared();
    mock.set_input_words(30, &[0xFFFF, 0xFFFF]);
    let register = RegisterFixtures::handle(RegisterSpec::input("Counter", 30).with_word_count(2), &bus);

    assert_eq!(register.read().unwrap(), "4294967295");
    assert_eq!(mock.get_read_history(), vec![(RegisterKind::Input, 30, 2)]);
}

#[test]
fn test_decode_float32() {
    let (mock, bus) = MockBus::shared();
    mock.set_input_words(40, &[0x4248, 0x0000]);
    let register = RegisterFixtures::handle(
        RegisterSpec::input("Flow", 40).float32().with_precision(1),
        &bus,
    );

    assert_eq!(register.read().unwrap(), "50.0");
}

#[test]
fn test_twos_complement_property() {
    for word in 0..=u16::MAX {
        let expected = if word < 0x8000 { i64::from(word) } else { i64::from(word) - 0x1_0000 };
        assert_eq!(twos_complement(u32::from(word), 16), expected);
    }
    for byte in 0..=u8::MAX {
        let expected = if byte < 0x80 { i64::from(byte) } else { i64::from(byte) - 0x100 };
        assert_eq!(twos_complement(u32::from(byte), 8), expected);
    }
}

#[test]
fn test_format_is_idempotent() {
    for raw in [-32768i64, -1, 0, 1, 216, 3754, 32767] {
        for (scale, precision) in [(1.0, 0), (0.1, 1), (0.01, 2), (0.5, 3)] {
            let formatted = FormattedValue::format(scale * raw as f64, precision);
            assert_eq!(formatted.reformat(precision), formatted, "{raw} * {scale}");
        }
    }
}

// =============================================================================
// Stale values
// =============================================================================

#[test]
fn test_stale_unset_on_first_failure() {
    let (mock, bus) = MockBus::shared();
    mock.fail_all_reads(true);
    let register = RegisterFixtures::handle(RegisterFixtures::humidity(25), &bus);

    assert_eq!(register.read(), None);
    register.assert_cached(None);
}

#[test]
fn test_stale_value_kept_after_failure() {
    let (mock, bus) = MockBus::shared();
    mock.set_input(25, RegisterFixtures::HUMIDITY_WORD);
    let register = RegisterFixtures::handle(RegisterFixtures::humidity(25), &bus);
    assert_eq!(register.read().unwrap(), "37.54");

    mock.fail_next_read();
    assert_eq!(register.read().unwrap(), "37.54");
    mock.fail_next_read();
    assert!(!register.update());
    register.assert_cached(Some("37.54"));

    mock.short_reads(true);
    assert_eq!(register.read().unwrap(), "37.54");
    mock.reset();

    mock.set_input(25, 4000);
    assert_eq!(register.read().unwrap(), "40.00");
}

#[test]
fn test_stale_state_snapshot() {
    let (mock, bus) = MockBus::shared();
    let register = RegisterFixtures::handle(RegisterFixtures::temperature(13), &bus);

    let state = register.state();
    assert_eq!(state.value, None);
    assert_eq!(state.to_string(), "Temperature: -");

    mock.set_input(13, 216);
    let json = serde_json::to_value(register.state()).unwrap();
    assert_eq!(json["value"], "21.6");
    assert_eq!(json["unit"], "°C");
}

// =============================================================================
// Writes
// =============================================================================

#[test]
fn test_write_input_register_rejected() {
    let (mock, bus) = MockBus::shared();
    let register = RegisterFixtures::handle(RegisterFixtures::temperature(13), &bus);

    let error = register.write(200).unwrap_err();
    assert!(error.is_invalid_write_target());
    assert_eq!(mock.get_write_count(), 0);
}

#[test]
fn test_write_bounded_percentage() {
    let (mock, bus) = MockBus::shared();
    let register = RegisterFixtures::handle(RegisterFixtures::percentage(15), &bus);

    let error = set_bounded_percentage(&register, 37).unwrap_err();
    assert!(error.is_out_of_range());
    assert_eq!(mock.get_write_count(), 0);

    set_bounded_percentage(&register, 35).unwrap();
    assert_eq!(mock.get_write_history(), vec![(15, 35)]);
    register.assert_cached(Some("35"));
}

#[test]
fn test_write_negative_value_encoding() {
    let (mock, bus) = MockBus::shared();
    let register = RegisterFixtures::handle(RegisterSpec::holding("Offset", 20), &bus);

    register.write(-2).unwrap();
    assert_eq!(mock.holding(20), Some(0xFFFE));
    register.assert_cached(Some("-2"));

    assert!(register.write(70_000).unwrap_err().is_out_of_range());
    assert_eq!(mock.get_write_count(), 1);
}

#[test]
fn test_write_cache_matches_next_read() {
    let (mock, bus) = MockBus::shared();
    let register = RegisterFixtures::handle(RegisterSpec::holding("Offset", 20), &bus);

    register.write(40_000).unwrap();
    assert_eq!(mock.holding(20), Some(40_000));
    register.assert_cached(Some("-25536"));
    assert_eq!(register.read().unwrap(), "-25536");
}

#[test]
fn test_invalid_register_spec_rejected() {
    let (mock, bus) = MockBus::shared();
    mock.set_input(13, RegisterFixtures::TEMPERATURE_WORD);

    let one_word_float = RegisterSpec::input("Temperature", 13).with_encoding(Encoding::Float32);
    assert!(RegisterHandle::new(one_word_float, bus.clone()).is_err());

    let empty = RegisterSpec::input("Temperature", 13).with_word_count(0);
    assert!(RegisterHandle::new(empty, bus.clone()).is_err());
    assert_eq!(mock.get_read_count(), 0);
}

#[test]
fn test_write_failure_keeps_cache() {
    let (mock, bus) = MockBus::shared();
    mock.set_holding(15, 20);
    let register = RegisterFixtures::handle(RegisterFixtures::percentage(15), &bus);
    register.read();

    mock.fail_all_writes(true);
    let error = register.write(40).unwrap_err();
    assert!(error.is_transport_failure());
    register.assert_cached(Some("20"));
}
