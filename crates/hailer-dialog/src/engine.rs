// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dialog engine: drives [`transition`] and runs its effects.
//!
//! The engine owns the service adapters and the per-turn loop. All dialog
//! policy lives in [`transition`]; the engine contributes only the things a
//! pure function cannot do itself: initial-state resolution against the
//! session store, effect execution, credential persistence, and the step
//! bound that turns a transition cycle into an error instead of a hang.

use std::sync::Arc;

use hailer_core::{
    BOOK_RIDE_INTENT, DialogAction, FareAdapter, GeocodeAdapter, HailerError, LoginAdapter,
    RideAdapter, ServiceAdapter, SessionAttributes, SessionStore, Turn,
};
use tracing::{debug, info, instrument, warn};

use crate::context::TurnContext;
use crate::state::DialogState;
use crate::transition::{transition, DialogPolicy, Effect, Event, Outcome, Step};

/// Upper bound on transition steps within one turn. The longest legitimate
/// chain is a handful of states; hitting the bound means a transition cycle.
const MAX_STEPS_PER_TURN: usize = 16;

/// Drives the booking dialog, one turn at a time.
///
/// Holds the adapters behind trait objects so backends can be swapped at
/// startup (and mocked in tests) without touching dialog logic.
pub struct DialogEngine {
    geocode: Arc<dyn GeocodeAdapter>,
    fares: Arc<dyn FareAdapter>,
    login: Arc<dyn LoginAdapter>,
    rides: Arc<dyn RideAdapter>,
    store: Arc<dyn SessionStore>,
    policy: DialogPolicy,
}

impl DialogEngine {
    pub fn new(
        geocode: Arc<dyn GeocodeAdapter>,
        fares: Arc<dyn FareAdapter>,
        login: Arc<dyn LoginAdapter>,
        rides: Arc<dyn RideAdapter>,
        store: Arc<dyn SessionStore>,
        policy: DialogPolicy,
    ) -> Self {
        Self {
            geocode,
            fares,
            login,
            rides,
            store,
            policy,
        }
    }

    /// The session store this engine persists credentials into.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Processes one user turn and returns the dialog action to send back
    /// along with the session attributes to carry into the next turn.
    ///
    /// Fails with [`HailerError::Protocol`] for unknown intents or corrupt
    /// session attributes; upstream failures never surface here, they are
    /// folded into the returned action.
    #[instrument(skip_all, fields(user_id = %turn.user_id, intent = %turn.intent_name))]
    pub async fn advance(
        &self,
        turn: Turn,
    ) -> Result<(DialogAction, SessionAttributes), HailerError> {
        if turn.intent_name != BOOK_RIDE_INTENT {
            return Err(HailerError::protocol(format!(
                "unsupported intent {:?}",
                turn.intent_name
            )));
        }

        let mut ctx = TurnContext::new(turn.session_attributes.clone());
        let mut state = match ctx.state()? {
            Some(state) => state,
            None => self.initial_state(&turn.user_id, &mut ctx).await,
        };
        debug!(%state, "turn started");

        let mut event = Event::Enter;
        for _ in 0..MAX_STEPS_PER_TURN {
            match transition(state, &turn, &mut ctx, event, &self.policy)? {
                Step::Goto(next) => {
                    debug!(from = %state, to = %next, "state change");
                    state = next;
                    event = Event::Enter;
                }
                Step::Run(effect) => {
                    let outcome = self.run_effect(&turn.user_id, effect).await;
                    event = Event::Outcome(outcome);
                }
                Step::Emit(action) => {
                    debug!(?action, "turn complete");
                    return Ok((action, ctx.into_attributes()));
                }
            }
        }
        Err(HailerError::Internal(format!(
            "no action after {MAX_STEPS_PER_TURN} steps, last state {state}"
        )))
    }

    /// Resolves the state for a turn with no dialog progress on record:
    /// returning users with stored credentials skip the login sub-protocol.
    /// A store failure degrades to a fresh login rather than failing the
    /// turn.
    async fn initial_state(&self, user_id: &str, ctx: &mut TurnContext) -> DialogState {
        match self.store.get(user_id).await {
            Ok(Some(credentials)) => {
                info!("returning user, skipping login");
                ctx.set_credentials(&credentials);
                DialogState::AwaitingPickupAddress
            }
            Ok(None) => DialogState::AwaitingLogin,
            Err(error) => {
                warn!(%error, store = self.store.name(), "credential lookup failed");
                DialogState::AwaitingLogin
            }
        }
    }

    /// Executes one effect. Never returns `Err`: failures travel inside the
    /// [`Outcome`] so the transition decides what they mean for the dialog.
    async fn run_effect(&self, user_id: &str, effect: Effect) -> Outcome {
        match effect {
            Effect::StartLogin => Outcome::LoginStarted(self.login.login_start(user_id).await),
            Effect::CheckPin { session, pin } => {
                Outcome::PinChecked(self.check_pin(user_id, &session, &pin).await)
            }
            Effect::Geocode { leg: _, address } => {
                Outcome::Geocoded(self.geocode.geocode(&address).await)
            }
            Effect::EstimateFares {
                origin,
                destination,
            } => Outcome::FaresEstimated(self.fares.estimate_fares(origin, destination).await),
            Effect::RequestRide {
                origin,
                destination,
                ride_type,
                access_token,
            } => Outcome::RideRequested(
                self.rides
                    .request_ride(origin, destination, &ride_type, &access_token)
                    .await,
            ),
            Effect::PollStatus {
                access_token,
                ride_id,
            } => Outcome::StatusPolled(self.rides.ride_status(&access_token, &ride_id).await),
        }
    }

    /// Verifies a PIN and, when the provider accepts it, exchanges the
    /// authorization code for credentials and persists them. Persistence
    /// failure only costs the user the login skip next session, so it is
    /// logged and swallowed.
    async fn check_pin(
        &self,
        user_id: &str,
        session: &hailer_core::LoginSession,
        pin: &str,
    ) -> Result<Option<hailer_core::Credentials>, HailerError> {
        let Some(code) = self.login.login_continue(session, pin).await? else {
            return Ok(None);
        };
        let credentials = self.login.exchange_token(&code).await?;
        if let Err(error) = self.store.put(user_id, &credentials).await {
            warn!(%error, store = self.store.name(), "credential persist failed");
        }
        Ok(Some(credentials))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use hailer_core::{
        AuthorizationCode, ConfirmationStatus, Coordinates, Credentials, HealthStatus,
        LoginSession, RideEstimate, RideId, RideStatus, slots,
    };

    use super::*;

    fn version() -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    macro_rules! base_adapter {
        ($ty:ty, $name:literal) => {
            #[async_trait]
            impl ServiceAdapter for $ty {
                fn name(&self) -> &str {
                    $name
                }
                fn version(&self) -> semver::Version {
                    version()
                }
                async fn health_check(&self) -> Result<HealthStatus, HailerError> {
                    Ok(HealthStatus::Healthy)
                }
                async fn shutdown(&self) -> Result<(), HailerError> {
                    Ok(())
                }
            }
        };
    }

    #[derive(Default)]
    struct StubGeocode {
        calls: Mutex<u32>,
    }
    base_adapter!(StubGeocode, "stub-geocode");

    #[async_trait]
    impl GeocodeAdapter for StubGeocode {
        async fn geocode(&self, address: &str) -> Result<Coordinates, HailerError> {
            *self.calls.lock().unwrap() += 1;
            if address.contains("Nowhere") {
                return Err(HailerError::validation("no match"));
            }
            Ok(Coordinates { lat: 1.0, lng: 2.0 })
        }
    }

    #[derive(Default)]
    struct StubFares;
    base_adapter!(StubFares, "stub-fares");

    #[async_trait]
    impl FareAdapter for StubFares {
        async fn estimate_fares(
            &self,
            _origin: Coordinates,
            _destination: Coordinates,
        ) -> Result<Vec<RideEstimate>, HailerError> {
            Ok(vec![RideEstimate {
                ride_type: "Lyft".into(),
                min_cost_cents: 700,
                max_cost_cents: 700,
                eta_seconds: 120,
            }])
        }
    }

    #[derive(Default)]
    struct StubLogin;
    base_adapter!(StubLogin, "stub-login");

    #[async_trait]
    impl LoginAdapter for StubLogin {
        async fn login_start(&self, _user_id: &str) -> Result<LoginSession, HailerError> {
            Ok(LoginSession("sess".into()))
        }
        async fn login_continue(
            &self,
            _session: &LoginSession,
            pin: &str,
        ) -> Result<Option<AuthorizationCode>, HailerError> {
            Ok((pin == "1234").then(|| AuthorizationCode("code".into())))
        }
        async fn exchange_token(
            &self,
            _code: &AuthorizationCode,
        ) -> Result<Credentials, HailerError> {
            Ok(Credentials {
                access_token: "access".into(),
                refresh_token: "refresh".into(),
            })
        }
    }

    #[derive(Default)]
    struct StubRides;
    base_adapter!(StubRides, "stub-rides");

    #[async_trait]
    impl RideAdapter for StubRides {
        async fn request_ride(
            &self,
            _origin: Coordinates,
            _destination: Coordinates,
            _ride_type: &str,
            _access_token: &str,
        ) -> Result<RideId, HailerError> {
            Ok(RideId("ride-1".into()))
        }
        async fn ride_status(
            &self,
            _access_token: &str,
            _ride_id: &RideId,
        ) -> Result<RideStatus, HailerError> {
            Ok(RideStatus::Pending)
        }
    }

    #[derive(Default)]
    struct StubStore {
        entries: Mutex<HashMap<String, Credentials>>,
        fail_get: bool,
    }
    base_adapter!(StubStore, "stub-store");

    #[async_trait]
    impl SessionStore for StubStore {
        async fn get(&self, user_id: &str) -> Result<Option<Credentials>, HailerError> {
            if self.fail_get {
                return Err(HailerError::Internal("store down".into()));
            }
            Ok(self.entries.lock().unwrap().get(user_id).cloned())
        }
        async fn put(
            &self,
            user_id: &str,
            credentials: &Credentials,
        ) -> Result<(), HailerError> {
            self.entries
                .lock()
                .unwrap()
                .insert(user_id.to_string(), credentials.clone());
            Ok(())
        }
    }

    fn engine_with_store(store: Arc<StubStore>) -> DialogEngine {
        DialogEngine::new(
            Arc::new(StubGeocode::default()),
            Arc::new(StubFares),
            Arc::new(StubLogin),
            Arc::new(StubRides),
            store,
            DialogPolicy::default(),
        )
    }

    fn engine() -> DialogEngine {
        engine_with_store(Arc::new(StubStore::default()))
    }

    fn turn(
        attrs: SessionAttributes,
        slot_values: &[(&str, &str)],
        confirmation: ConfirmationStatus,
    ) -> Turn {
        let mut slot_map: HashMap<String, Option<String>> = HashMap::new();
        for (name, value) in slot_values {
            slot_map.insert((*name).to_string(), Some((*value).to_string()));
        }
        Turn {
            intent_name: BOOK_RIDE_INTENT.to_string(),
            user_id: "15555550100".to_string(),
            slots: slot_map,
            session_attributes: attrs,
            confirmation_status: confirmation,
        }
    }

    #[tokio::test]
    async fn unknown_intents_are_rejected() {
        let mut bad = turn(SessionAttributes::new(), &[], ConfirmationStatus::None);
        bad.intent_name = "OrderPizza".into();
        let err = engine().advance(bad).await.unwrap_err();
        assert!(matches!(err, HailerError::Protocol { .. }));
    }

    #[tokio::test]
    async fn first_turn_starts_login_and_elicits_the_pin() {
        let (action, attrs) = engine()
            .advance(turn(SessionAttributes::new(), &[], ConfirmationStatus::None))
            .await
            .unwrap();

        match action {
            DialogAction::ElicitSlot { slot_name, .. } => {
                assert_eq!(slot_name, slots::LYFT_PIN)
            }
            other => panic!("expected elicit, got {other:?}"),
        }
        assert_eq!(attrs.get("state").map(String::as_str), Some("AwaitingPin"));
    }

    #[tokio::test]
    async fn stored_credentials_skip_login() {
        let store = Arc::new(StubStore::default());
        store
            .put(
                "15555550100",
                &Credentials {
                    access_token: "a".into(),
                    refresh_token: "r".into(),
                },
            )
            .await
            .unwrap();

        let (action, attrs) = engine_with_store(store)
            .advance(turn(SessionAttributes::new(), &[], ConfirmationStatus::None))
            .await
            .unwrap();

        match action {
            DialogAction::ElicitSlot { slot_name, .. } => {
                assert_eq!(slot_name, slots::PICKUP_ADDRESS)
            }
            other => panic!("expected elicit, got {other:?}"),
        }
        assert_eq!(attrs.get("access_token").map(String::as_str), Some("a"));
    }

    #[tokio::test]
    async fn a_broken_store_degrades_to_fresh_login() {
        let store = Arc::new(StubStore {
            fail_get: true,
            ..StubStore::default()
        });
        let (action, _) = engine_with_store(store)
            .advance(turn(SessionAttributes::new(), &[], ConfirmationStatus::None))
            .await
            .unwrap();
        match action {
            DialogAction::ElicitSlot { slot_name, .. } => {
                assert_eq!(slot_name, slots::LYFT_PIN)
            }
            other => panic!("expected elicit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_verified_pin_is_persisted_and_moves_to_pickup() {
        let store = Arc::new(StubStore::default());
        let engine = engine_with_store(Arc::clone(&store));

        let (_, attrs) = engine
            .advance(turn(SessionAttributes::new(), &[], ConfirmationStatus::None))
            .await
            .unwrap();
        let (action, attrs) = engine
            .advance(turn(
                attrs,
                &[(slots::LYFT_PIN, "1234")],
                ConfirmationStatus::None,
            ))
            .await
            .unwrap();

        match action {
            DialogAction::ElicitSlot { slot_name, .. } => {
                assert_eq!(slot_name, slots::PICKUP_ADDRESS)
            }
            other => panic!("expected elicit, got {other:?}"),
        }
        assert_eq!(
            attrs.get("state").map(String::as_str),
            Some("ConfirmingPickupAddress")
        );
        assert!(
            store.get("15555550100").await.unwrap().is_some(),
            "credentials persisted for the next session"
        );
    }

    #[tokio::test]
    async fn a_wrong_pin_is_resent_with_an_error_prompt() {
        let engine = engine();
        let (_, attrs) = engine
            .advance(turn(SessionAttributes::new(), &[], ConfirmationStatus::None))
            .await
            .unwrap();
        let (action, attrs) = engine
            .advance(turn(
                attrs,
                &[(slots::LYFT_PIN, "0000")],
                ConfirmationStatus::None,
            ))
            .await
            .unwrap();

        match action {
            DialogAction::ElicitSlot { slot_name, prompt } => {
                assert_eq!(slot_name, slots::LYFT_PIN);
                assert!(prompt.contains("error with the PIN you entered 0000"));
            }
            other => panic!("expected elicit, got {other:?}"),
        }
        assert_eq!(attrs.get("pin_attempts").map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn a_confirmed_address_is_geocoded_in_one_turn() {
        let engine = engine();
        let mut attrs = SessionAttributes::new();
        attrs.insert("state".into(), "ValidatingPickupAddress".into());

        let (action, attrs) = engine
            .advance(turn(
                attrs,
                &[
                    (slots::PICKUP_ADDRESS, "30th Street Station"),
                    (slots::PICKUP_ADDRESS_CONFIRM, "yes"),
                ],
                ConfirmationStatus::None,
            ))
            .await
            .unwrap();

        // Geocode succeeded and the dialog chained straight into asking
        // for the dropoff.
        match action {
            DialogAction::ElicitSlot { slot_name, .. } => {
                assert_eq!(slot_name, slots::DROPOFF_ADDRESS)
            }
            other => panic!("expected elicit, got {other:?}"),
        }
        assert_eq!(attrs.get("pickup_lat").map(String::as_str), Some("1"));
        assert_eq!(
            attrs.get("state").map(String::as_str),
            Some("ConfirmingDropoffAddress")
        );
    }

    #[tokio::test]
    async fn an_unresolvable_address_is_reasked() {
        let engine = engine();
        let mut attrs = SessionAttributes::new();
        attrs.insert("state".into(), "ValidatingPickupAddress".into());

        let (action, attrs) = engine
            .advance(turn(
                attrs,
                &[
                    (slots::PICKUP_ADDRESS, "Nowhere Land"),
                    (slots::PICKUP_ADDRESS_CONFIRM, "yes"),
                ],
                ConfirmationStatus::None,
            ))
            .await
            .unwrap();

        match action {
            DialogAction::ElicitSlot { slot_name, prompt } => {
                assert_eq!(slot_name, slots::PICKUP_ADDRESS);
                assert!(prompt.contains("could not be found"));
            }
            other => panic!("expected elicit, got {other:?}"),
        }
        assert_eq!(
            attrs.get("state").map(String::as_str),
            Some("ConfirmingPickupAddress")
        );
    }

    #[tokio::test]
    async fn corrupt_state_attribute_is_a_protocol_error() {
        let mut attrs = SessionAttributes::new();
        attrs.insert("state".into(), "NotAState".into());
        let err = engine()
            .advance(turn(attrs, &[], ConfirmationStatus::None))
            .await
            .unwrap_err();
        assert!(matches!(err, HailerError::Protocol { .. }));
    }
}
