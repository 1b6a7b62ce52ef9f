// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock service adapters for deterministic testing.
//!
//! Each mock implements the corresponding adapter trait with scriptable
//! responses, enabling fast, CI-runnable tests without external API calls.
//! All mocks count their calls so tests can assert how often the engine
//! reached for a backend.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use hailer_core::{
    AuthorizationCode, Coordinates, Credentials, FareAdapter, GeocodeAdapter, HailerError,
    HealthStatus, LoginAdapter, LoginSession, RideAdapter, RideEstimate, RideId, RideStatus,
    ServiceAdapter,
};

fn mock_version() -> semver::Version {
    semver::Version::new(0, 1, 0)
}

/// A mock geocoder backed by an address table.
///
/// Unknown addresses resolve to a validation error, the same class a real
/// geocoder returns for a zero-result lookup. `fail_next_with_outage`
/// makes the next call fail as an upstream outage instead.
pub struct MockGeocode {
    addresses: Mutex<HashMap<String, Coordinates>>,
    outage: AtomicBool,
    calls: AtomicU32,
}

impl MockGeocode {
    pub fn new() -> Self {
        Self {
            addresses: Mutex::new(HashMap::new()),
            outage: AtomicBool::new(false),
            calls: AtomicU32::new(0),
        }
    }

    /// Register an address the mock will resolve. Matching ignores case.
    pub async fn add_address(&self, address: &str, coords: Coordinates) {
        self.addresses
            .lock()
            .await
            .insert(address.to_ascii_lowercase(), coords);
    }

    /// Make the next `geocode` call fail as an upstream outage.
    pub fn fail_next_with_outage(&self) {
        self.outage.store(true, Ordering::SeqCst);
    }

    /// Number of `geocode` calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockGeocode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockGeocode {
    fn name(&self) -> &str {
        "mock-geocode"
    }

    fn version(&self) -> semver::Version {
        mock_version()
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        Ok(())
    }
}

#[async_trait]
impl GeocodeAdapter for MockGeocode {
    async fn geocode(&self, address: &str) -> Result<Coordinates, HailerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.outage.swap(false, Ordering::SeqCst) {
            return Err(HailerError::upstream("mock-geocode", "simulated outage"));
        }
        self.addresses
            .lock()
            .await
            .get(&address.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| {
                HailerError::validation(format!("no geocoding result for {address:?}"))
            })
    }
}

/// A mock fare estimator returning a fixed estimate list.
pub struct MockFares {
    estimates: Mutex<Vec<RideEstimate>>,
    outage: AtomicBool,
    calls: AtomicU32,
}

impl MockFares {
    /// Create a mock with a single default "Lyft" estimate.
    pub fn new() -> Self {
        Self::with_estimates(vec![RideEstimate {
            ride_type: "Lyft".to_string(),
            min_cost_cents: 1100,
            max_cost_cents: 1500,
            eta_seconds: 300,
        }])
    }

    pub fn with_estimates(estimates: Vec<RideEstimate>) -> Self {
        Self {
            estimates: Mutex::new(estimates),
            outage: AtomicBool::new(false),
            calls: AtomicU32::new(0),
        }
    }

    /// Make the next `estimate_fares` call fail as an upstream outage.
    pub fn fail_next_with_outage(&self) {
        self.outage.store(true, Ordering::SeqCst);
    }

    /// Number of `estimate_fares` calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockFares {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockFares {
    fn name(&self) -> &str {
        "mock-fares"
    }

    fn version(&self) -> semver::Version {
        mock_version()
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        Ok(())
    }
}

#[async_trait]
impl FareAdapter for MockFares {
    async fn estimate_fares(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
    ) -> Result<Vec<RideEstimate>, HailerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.outage.swap(false, Ordering::SeqCst) {
            return Err(HailerError::upstream("mock-fares", "simulated outage"));
        }
        Ok(self.estimates.lock().await.clone())
    }
}

/// A mock login backend with one accepted PIN.
///
/// Each `login_start` hands out a fresh numbered session so tests can see
/// that a failed attempt triggered a re-send.
pub struct MockLogin {
    accepted_pin: String,
    sessions_started: AtomicU32,
    outage: AtomicBool,
}

impl MockLogin {
    /// Create a mock accepting the default PIN `"1234"`.
    pub fn new() -> Self {
        Self::with_accepted_pin("1234")
    }

    pub fn with_accepted_pin(pin: &str) -> Self {
        Self {
            accepted_pin: pin.to_string(),
            sessions_started: AtomicU32::new(0),
            outage: AtomicBool::new(false),
        }
    }

    /// Make the next `login_start` call fail as an upstream outage.
    pub fn fail_next_with_outage(&self) {
        self.outage.store(true, Ordering::SeqCst);
    }

    /// Number of login sessions started (PINs "sent") so far.
    pub fn sessions_started(&self) -> u32 {
        self.sessions_started.load(Ordering::SeqCst)
    }
}

impl Default for MockLogin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockLogin {
    fn name(&self) -> &str {
        "mock-login"
    }

    fn version(&self) -> semver::Version {
        mock_version()
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        Ok(())
    }
}

#[async_trait]
impl LoginAdapter for MockLogin {
    async fn login_start(&self, _user_id: &str) -> Result<LoginSession, HailerError> {
        if self.outage.swap(false, Ordering::SeqCst) {
            return Err(HailerError::upstream("mock-login", "simulated outage"));
        }
        let n = self.sessions_started.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(LoginSession(format!("mock-session-{n}")))
    }

    async fn login_continue(
        &self,
        session: &LoginSession,
        pin: &str,
    ) -> Result<Option<AuthorizationCode>, HailerError> {
        Ok((pin == self.accepted_pin)
            .then(|| AuthorizationCode(format!("mock-code-{}", session.0))))
    }

    async fn exchange_token(
        &self,
        code: &AuthorizationCode,
    ) -> Result<Credentials, HailerError> {
        Ok(Credentials {
            access_token: format!("mock-access-{}", code.0),
            refresh_token: format!("mock-refresh-{}", code.0),
        })
    }
}

/// A mock ride backend with a scriptable status sequence.
///
/// Statuses are popped from a FIFO queue; an empty queue reports
/// [`RideStatus::Pending`].
pub struct MockRides {
    statuses: Mutex<VecDeque<RideStatus>>,
    booking_fails: AtomicBool,
    bookings: AtomicU32,
    status_polls: AtomicU32,
}

impl MockRides {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(VecDeque::new()),
            booking_fails: AtomicBool::new(false),
            bookings: AtomicU32::new(0),
            status_polls: AtomicU32::new(0),
        }
    }

    /// Queue the statuses successive `ride_status` calls will report.
    pub async fn script_statuses(&self, statuses: Vec<RideStatus>) {
        self.statuses.lock().await.extend(statuses);
    }

    /// Make every `request_ride` call fail.
    pub fn fail_bookings(&self) {
        self.booking_fails.store(true, Ordering::SeqCst);
    }

    /// Number of `request_ride` calls so far.
    pub fn bookings(&self) -> u32 {
        self.bookings.load(Ordering::SeqCst)
    }

    /// Number of `ride_status` calls so far.
    pub fn status_polls(&self) -> u32 {
        self.status_polls.load(Ordering::SeqCst)
    }
}

impl Default for MockRides {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockRides {
    fn name(&self) -> &str {
        "mock-rides"
    }

    fn version(&self) -> semver::Version {
        mock_version()
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        Ok(())
    }
}

#[async_trait]
impl RideAdapter for MockRides {
    async fn request_ride(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _ride_type: &str,
        _access_token: &str,
    ) -> Result<RideId, HailerError> {
        let n = self.bookings.fetch_add(1, Ordering::SeqCst) + 1;
        if self.booking_fails.load(Ordering::SeqCst) {
            return Err(HailerError::upstream("mock-rides", "booking rejected"));
        }
        Ok(RideId(format!("mock-ride-{n}")))
    }

    async fn ride_status(
        &self,
        _access_token: &str,
        _ride_id: &RideId,
    ) -> Result<RideStatus, HailerError> {
        self.status_polls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .statuses
            .lock()
            .await
            .pop_front()
            .unwrap_or(RideStatus::Pending))
    }
}
