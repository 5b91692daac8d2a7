// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Duco Integration Tests
//!
//! Integration tests for the register value model, node composition and
//! sessions, run against an in-memory bus.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `mocks`: [`MockBus`](common::mocks::MockBus), a scripted register bus
//!   - `fixtures`: node layouts and register words
//!   - `assertions`: register and node assertion helpers
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p duco-tests
//! cargo test -p duco-tests --test integration_register
//! cargo test -p duco-tests --test integration_nodes
//! cargo test -p duco-tests --test integration_system
//! ```
//!
//! ## Test Categories
//!
//! ### Register Tests (`integration_register.rs`)
//! - Decoding, scaling and formatting
//! - Stale values after failed polls
//! - Write validation
//!
//! ### Node Tests (`integration_nodes.rs`)
//! - Factory table and register addresses
//! - Zone actions and percentage setpoints
//!
//! ### System Tests (`integration_system.rs`)
//! - Enumeration
//! - Configuration files

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
}
