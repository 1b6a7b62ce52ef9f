// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end dialog testing.
//!
//! `TestHarness` assembles a complete [`DialogEngine`] over mock adapters
//! and a session store (in-memory by default, temp SQLite on request).
//! Tests drive it one turn at a time, threading the returned session
//! attributes into the next [`TurnBuilder`] exactly as the gateway would.

use std::collections::HashMap;
use std::sync::Arc;

use hailer_core::{
    BOOK_RIDE_INTENT, ConfirmationStatus, Coordinates, DialogAction, HailerError, RideEstimate,
    SessionAttributes, SessionStore, Turn,
};
use hailer_dialog::{DialogEngine, DialogPolicy};
use hailer_storage::{MemorySessionStore, SqliteSessionStore};

use crate::mock_adapters::{MockFares, MockGeocode, MockLogin, MockRides};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    addresses: Vec<(String, Coordinates)>,
    estimates: Option<Vec<RideEstimate>>,
    accepted_pin: Option<String>,
    policy: DialogPolicy,
    sqlite: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            addresses: Vec::new(),
            estimates: None,
            accepted_pin: None,
            policy: DialogPolicy::default(),
            sqlite: false,
        }
    }

    /// Register an address the mock geocoder will resolve.
    pub fn with_address(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.addresses
            .push((address.to_string(), Coordinates { lat, lng }));
        self
    }

    /// Set the fare estimates the mock provider returns.
    pub fn with_estimates(mut self, estimates: Vec<RideEstimate>) -> Self {
        self.estimates = Some(estimates);
        self
    }

    /// Set the PIN the mock login backend accepts.
    pub fn with_accepted_pin(mut self, pin: &str) -> Self {
        self.accepted_pin = Some(pin.to_string());
        self
    }

    /// Override the dialog policy.
    pub fn with_policy(mut self, policy: DialogPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a temp-file SQLite session store instead of the in-memory one.
    pub fn with_sqlite_store(mut self) -> Self {
        self.sqlite = true;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, HailerError> {
        let geocode = Arc::new(MockGeocode::new());
        for (address, coords) in &self.addresses {
            geocode.add_address(address, *coords).await;
        }

        let fares = Arc::new(match self.estimates {
            Some(estimates) => MockFares::with_estimates(estimates),
            None => MockFares::new(),
        });
        let login = Arc::new(match self.accepted_pin {
            Some(pin) => MockLogin::with_accepted_pin(&pin),
            None => MockLogin::new(),
        });
        let rides = Arc::new(MockRides::new());

        let mut temp_dir = None;
        let store: Arc<dyn SessionStore> = if self.sqlite {
            let dir = tempfile::TempDir::new()
                .map_err(|e| HailerError::Storage { source: e.into() })?;
            let db_path = dir.path().join("test.db").to_string_lossy().to_string();
            let sqlite = SqliteSessionStore::new(db_path);
            sqlite.initialize().await?;
            temp_dir = Some(dir);
            Arc::new(sqlite)
        } else {
            Arc::new(MemorySessionStore::new())
        };

        let engine = DialogEngine::new(
            geocode.clone(),
            fares.clone(),
            login.clone(),
            rides.clone(),
            store.clone(),
            self.policy,
        );

        Ok(TestHarness {
            geocode,
            fares,
            login,
            rides,
            store,
            engine,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment: a [`DialogEngine`] over mock adapters.
///
/// The mocks stay accessible for scripting and call-count assertions.
pub struct TestHarness {
    /// The mock geocoder.
    pub geocode: Arc<MockGeocode>,
    /// The mock fare estimator.
    pub fares: Arc<MockFares>,
    /// The mock login backend.
    pub login: Arc<MockLogin>,
    /// The mock ride backend.
    pub rides: Arc<MockRides>,
    /// The session store behind the engine.
    pub store: Arc<dyn SessionStore>,
    /// The engine under test.
    pub engine: DialogEngine,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Process one turn through the engine.
    pub async fn send(
        &self,
        turn: Turn,
    ) -> Result<(DialogAction, SessionAttributes), HailerError> {
        self.engine.advance(turn).await
    }
}

/// Fluent builder for a [`Turn`], defaulting to the booking intent and a
/// fixed test user.
pub struct TurnBuilder {
    turn: Turn,
}

impl TurnBuilder {
    pub fn new() -> Self {
        Self {
            turn: Turn {
                intent_name: BOOK_RIDE_INTENT.to_string(),
                user_id: "15555550100".to_string(),
                slots: HashMap::new(),
                session_attributes: SessionAttributes::new(),
                confirmation_status: ConfirmationStatus::None,
            },
        }
    }

    /// Carry the attributes returned by the previous turn.
    pub fn attributes(mut self, attrs: SessionAttributes) -> Self {
        self.turn.session_attributes = attrs;
        self
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.turn.user_id = user_id.to_string();
        self
    }

    pub fn intent(mut self, intent_name: &str) -> Self {
        self.turn.intent_name = intent_name.to_string();
        self
    }

    pub fn slot(mut self, name: &str, value: &str) -> Self {
        self.turn
            .slots
            .insert(name.to_string(), Some(value.to_string()));
        self
    }

    /// Add a slot that exists on the intent but was not filled.
    pub fn empty_slot(mut self, name: &str) -> Self {
        self.turn.slots.insert(name.to_string(), None);
        self
    }

    pub fn confirmed(mut self) -> Self {
        self.turn.confirmation_status = ConfirmationStatus::Confirmed;
        self
    }

    pub fn denied(mut self) -> Self {
        self.turn.confirmation_status = ConfirmationStatus::Denied;
        self
    }

    pub fn build(self) -> Turn {
        self.turn
    }
}

impl Default for TurnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
