// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ride-booking dialog: a slot-filling state machine.
//!
//! The crate splits into a pure core and a thin driver. [`transition`]
//! maps (state, turn, event) to the next step with no I/O; all wording
//! lives in [`prompts`] and all cross-turn state in the string attribute
//! bag behind [`TurnContext`]. [`DialogEngine`] owns the adapters, runs
//! the effects the transition requests, and loops until the turn yields
//! its single dialog action.

pub mod context;
pub mod engine;
pub mod prompts;
pub mod state;
pub mod transition;

pub use context::TurnContext;
pub use engine::DialogEngine;
pub use state::DialogState;
pub use transition::{transition, DialogPolicy, Effect, Event, Outcome, Step};
