// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Hailer service boundary.
//!
//! All adapters extend the [`ServiceAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod fares;
pub mod geocode;
pub mod login;
pub mod rides;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use adapter::ServiceAdapter;
pub use fares::FareAdapter;
pub use geocode::GeocodeAdapter;
pub use login::LoginAdapter;
pub use rides::RideAdapter;
pub use store::SessionStore;
