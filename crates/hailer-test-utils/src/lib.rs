// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hailer integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockGeocode`], [`MockFares`], [`MockLogin`], [`MockRides`] - mock
//!   service adapters with scriptable responses and call counters
//! - [`TestHarness`] - a complete [`DialogEngine`] over mocks, driven one
//!   turn at a time with [`TurnBuilder`]
//!
//! [`DialogEngine`]: hailer_dialog::DialogEngine

pub mod harness;
pub mod mock_adapters;

pub use harness::{TestHarness, TurnBuilder};
pub use mock_adapters::{MockFares, MockGeocode, MockLogin, MockRides};
