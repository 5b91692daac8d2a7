// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Domain checks applied before a write reaches the bus.

use duco_modbus::RegisterHandle;
use tracing::debug;

use crate::error::{DucoError, DucoResult};
use crate::types::{
    ACTION_RANGE_START, ACTION_RANGE_STEP, ACTION_RANGE_STOP, PCT_RANGE_START, PCT_RANGE_STEP,
    PCT_RANGE_STOP,
};

/// A discrete set of accepted values: `start, start + step, ..., stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    /// First accepted value.
    pub start: i64,
    /// Distance between accepted values.
    pub step: i64,
    /// Last accepted value.
    pub stop: i64,
}

/// Percentage setpoints: 0, 5, ..., 100.
pub const PERCENTAGE: Lattice = Lattice::new(PCT_RANGE_START, PCT_RANGE_STEP, PCT_RANGE_STOP);

/// Raw action words: 0..=5.
pub const ACTION: Lattice = Lattice::new(ACTION_RANGE_START, ACTION_RANGE_STEP, ACTION_RANGE_STOP);

impl Lattice {
    /// Creates a lattice. `step` must be positive.
    pub const fn new(start: i64, step: i64, stop: i64) -> Self {
        Self { start, step, stop }
    }

    /// Returns `true` if `value` is on the lattice.
    pub fn contains(&self, value: i64) -> bool {
        self.step > 0
            && (self.start..=self.stop).contains(&value)
            && (value - self.start) % self.step == 0
    }

    /// Returns `Ok(())` if `value` is on the lattice.
    pub fn check(&self, value: i64) -> DucoResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(DucoError::out_of_range(value, self.start, self.step, self.stop))
        }
    }

    /// Iterates the accepted values.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        let count = if self.step > 0 && self.stop >= self.start {
            (self.stop - self.start) / self.step + 1
        } else {
            0
        };
        (0..count).map(move |i| self.start + i * self.step)
    }
}

/// Writes `value` to `handle` if it lies on `lattice`.
pub fn write_on_lattice(handle: &RegisterHandle, lattice: &Lattice, value: i64) -> DucoResult<()> {
    lattice.check(value)?;
    // lattice bounds keep the value inside i32
    let raw = i32::try_from(value)
        .map_err(|_| DucoError::out_of_range(value, lattice.start, lattice.step, lattice.stop))?;

    debug!(register = handle.name(), address = handle.address(), value = value, "Validated write");
    handle.write(raw)?;
    Ok(())
}

/// Writes a percentage setpoint on the 0/5/.../100 lattice.
///
/// Values off the lattice fail with [`DucoError::OutOfRangeValue`] and no
/// bus call is made.
pub fn set_bounded_percentage(handle: &RegisterHandle, value: i64) -> DucoResult<()> {
    write_on_lattice(handle, &PERCENTAGE, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_lattice() {
        assert!(PERCENTAGE.contains(0));
        assert!(PERCENTAGE.contains(35));
        assert!(PERCENTAGE.contains(100));
        assert!(!PERCENTAGE.contains(37));
        assert!(!PERCENTAGE.contains(-5));
        assert!(!PERCENTAGE.contains(105));
        assert_eq!(PERCENTAGE.values().count(), 21);
    }

    #[test]
    fn test_action_lattice() {
        let values: Vec<i64> = ACTION.values().collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
        assert!(ACTION.check(-1).unwrap_err().is_out_of_range());
        assert!(ACTION.check(6).is_err());
    }

    #[test]
    fn test_error_message() {
        let error = PERCENTAGE.check(37).unwrap_err();
        assert_eq!(error.to_string(), "Value 37 must be within 0 and 100 with steps of 5");
    }

    #[test]
    fn test_degenerate_lattice() {
        let empty = Lattice::new(10, 5, 0);
        assert_eq!(empty.values().count(), 0);
        assert!(!Lattice::new(0, 0, 10).contains(0));
    }
}
