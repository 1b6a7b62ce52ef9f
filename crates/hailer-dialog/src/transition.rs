// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure state transition function.
//!
//! `transition` never performs I/O. When a state needs an external call
//! it returns [`Step::Run`] naming the [`Effect`]; the engine executes it
//! and re-enters with the [`Outcome`], errors included. Every leaf-call
//! failure is therefore handled here, as data, and becomes a dialog
//! action — the one place a failure policy could silently diverge from
//! the happy path is the same `match` that implements the happy path.
//!
//! Within one turn a transition may chain through several states
//! ([`Step::Goto`]) before exactly one [`Step::Emit`] ends the turn.

use hailer_core::{
    ConfirmationStatus, Coordinates, Credentials, DialogAction, FulfillmentState, HailerError,
    LoginSession, RideEstimate, RideId, RideStatus, Turn, slots,
};

use crate::context::TurnContext;
use crate::prompts::{self, Leg};
use crate::state::DialogState;

/// Dialog policy knobs, sourced from configuration.
#[derive(Debug, Clone)]
pub struct DialogPolicy {
    /// Failed PIN entries allowed before the dialog closes as failed.
    pub max_pin_attempts: u32,
}

impl Default for DialogPolicy {
    fn default() -> Self {
        Self {
            max_pin_attempts: 3,
        }
    }
}

/// What drives a transition: entering a state, or an effect completing.
#[derive(Debug)]
pub enum Event {
    Enter,
    Outcome(Outcome),
}

/// An external call the engine must perform on the transition's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Begin the PIN exchange (triggers an SMS to the user).
    StartLogin,
    /// Verify a PIN and, on success, exchange it for credentials.
    CheckPin { session: LoginSession, pin: String },
    /// Resolve a free-text address.
    Geocode { leg: Leg, address: String },
    /// Fetch fare estimates for the validated trip.
    EstimateFares {
        origin: Coordinates,
        destination: Coordinates,
    },
    /// Place the ride request.
    RequestRide {
        origin: Coordinates,
        destination: Coordinates,
        ride_type: String,
        access_token: String,
    },
    /// Poll the booked ride.
    PollStatus {
        access_token: String,
        ride_id: RideId,
    },
}

/// The result of an [`Effect`], errors included.
#[derive(Debug)]
pub enum Outcome {
    LoginStarted(Result<LoginSession, HailerError>),
    /// `Ok(None)` means the provider rejected the PIN.
    PinChecked(Result<Option<Credentials>, HailerError>),
    Geocoded(Result<Coordinates, HailerError>),
    FaresEstimated(Result<Vec<RideEstimate>, HailerError>),
    RideRequested(Result<RideId, HailerError>),
    StatusPolled(Result<RideStatus, HailerError>),
}

/// One step of a turn.
#[derive(Debug)]
pub enum Step {
    /// Continue processing in another state within the same turn.
    Goto(DialogState),
    /// Execute an effect and re-enter with its outcome.
    Run(Effect),
    /// The turn's single dialog action. Ends processing.
    Emit(DialogAction),
}

fn elicit(slot_name: &str, prompt: impl Into<String>) -> Step {
    Step::Emit(DialogAction::ElicitSlot {
        slot_name: slot_name.to_string(),
        prompt: prompt.into(),
    })
}

fn close(outcome: FulfillmentState, message: impl Into<String>) -> Step {
    Step::Emit(DialogAction::Close {
        outcome,
        message: message.into(),
    })
}

/// Advances one step. Pure: same state, turn, context, and event always
/// produce the same step. Only protocol violations and engine bugs error;
/// leaf failures arrive inside the [`Outcome`] and leave as actions.
pub fn transition(
    state: DialogState,
    turn: &Turn,
    ctx: &mut TurnContext,
    event: Event,
    policy: &DialogPolicy,
) -> Result<Step, HailerError> {
    use DialogState as S;

    match (state, event) {
        // --- Login sub-protocol ---
        (S::AwaitingLogin, Event::Enter) => Ok(Step::Run(Effect::StartLogin)),

        (S::AwaitingLogin, Event::Outcome(Outcome::LoginStarted(Ok(session)))) => {
            ctx.set_login_session(&session.0);
            ctx.set_state(S::AwaitingPin);
            let prompt = match ctx.failed_pin() {
                Some(pin) => prompts::pin_retry(pin),
                None => prompts::PIN.to_string(),
            };
            Ok(elicit(slots::LYFT_PIN, prompt))
        }
        (S::AwaitingLogin, Event::Outcome(Outcome::LoginStarted(Err(_)))) => {
            // Stay in AwaitingLogin; the next turn retries the PIN send.
            ctx.set_state(S::AwaitingLogin);
            Ok(elicit(
                slots::LYFT_PIN,
                prompts::upstream_apology("Say anything to try again."),
            ))
        }

        (S::AwaitingPin, Event::Enter) => match turn.slot(slots::LYFT_PIN) {
            None => {
                ctx.set_state(S::AwaitingPin);
                Ok(elicit(slots::LYFT_PIN, prompts::PIN))
            }
            Some(pin) => match ctx.login_session() {
                // No session handle on record: restart the exchange.
                None => Ok(Step::Goto(S::AwaitingLogin)),
                Some(session) => Ok(Step::Run(Effect::CheckPin {
                    session: LoginSession(session),
                    pin: pin.to_string(),
                })),
            },
        },
        (S::AwaitingPin, Event::Outcome(Outcome::PinChecked(Ok(Some(credentials))))) => {
            ctx.set_credentials(&credentials);
            ctx.reset_pin_attempts();
            Ok(Step::Goto(S::AwaitingPickupAddress))
        }
        (S::AwaitingPin, Event::Outcome(Outcome::PinChecked(Ok(None)))) => {
            let attempts = ctx.record_pin_failure();
            if attempts >= policy.max_pin_attempts {
                return Ok(close(FulfillmentState::Failed, prompts::PIN_LOCKOUT));
            }
            if let Some(pin) = turn.slot(slots::LYFT_PIN) {
                ctx.note_failed_pin(pin);
            }
            // A fresh PIN is sent before re-asking.
            Ok(Step::Goto(S::AwaitingLogin))
        }
        (S::AwaitingPin, Event::Outcome(Outcome::PinChecked(Err(_)))) => {
            // Exchange failure reads the same as a bad PIN to the user,
            // but does not count against the attempt limit.
            if let Some(pin) = turn.slot(slots::LYFT_PIN) {
                ctx.note_failed_pin(pin);
            }
            Ok(Step::Goto(S::AwaitingLogin))
        }

        // --- Pickup address ---
        (S::AwaitingPickupAddress, Event::Enter) => {
            ctx.set_state(S::ConfirmingPickupAddress);
            Ok(elicit(slots::PICKUP_ADDRESS, prompts::address(Leg::Pickup)))
        }
        (S::ConfirmingPickupAddress, Event::Enter) => {
            enter_confirming(Leg::Pickup, turn, ctx)
        }
        (S::ValidatingPickupAddress, Event::Enter) => {
            enter_validating(Leg::Pickup, turn)
        }
        (S::ValidatingPickupAddress, Event::Outcome(Outcome::Geocoded(result))) => {
            geocoded(Leg::Pickup, result, turn, ctx)
        }

        // --- Dropoff address ---
        (S::AwaitingDropoffAddress, Event::Enter) => {
            ctx.set_state(S::ConfirmingDropoffAddress);
            Ok(elicit(
                slots::DROPOFF_ADDRESS,
                prompts::address(Leg::Dropoff),
            ))
        }
        (S::ConfirmingDropoffAddress, Event::Enter) => {
            enter_confirming(Leg::Dropoff, turn, ctx)
        }
        (S::ValidatingDropoffAddress, Event::Enter) => {
            enter_validating(Leg::Dropoff, turn)
        }
        (S::ValidatingDropoffAddress, Event::Outcome(Outcome::Geocoded(result))) => {
            geocoded(Leg::Dropoff, result, turn, ctx)
        }

        // --- Fare estimates ---
        (S::AwaitingRideType, Event::Enter) => {
            let Some(origin) = ctx.pickup_coordinates() else {
                return Ok(Step::Goto(S::AwaitingPickupAddress));
            };
            let Some(destination) = ctx.dropoff_coordinates() else {
                return Ok(Step::Goto(S::AwaitingDropoffAddress));
            };
            Ok(Step::Run(Effect::EstimateFares {
                origin,
                destination,
            }))
        }
        (S::AwaitingRideType, Event::Outcome(Outcome::FaresEstimated(Ok(estimates)))) => {
            ctx.set_estimates(&estimates);
            ctx.set_state(S::AwaitingBookingConfirmation);
            Ok(elicit(slots::RIDE_TYPE, prompts::estimates(&estimates)))
        }
        (S::AwaitingRideType, Event::Outcome(Outcome::FaresEstimated(Err(_)))) => {
            ctx.set_state(S::AwaitingRideType);
            Ok(elicit(
                slots::RIDE_TYPE,
                prompts::upstream_apology("Say anything to try again."),
            ))
        }

        // --- Booking confirmation ---
        (S::AwaitingBookingConfirmation, Event::Enter) => {
            // A denial rolls the whole booking back, whatever the slots say.
            if turn.confirmation_status == ConfirmationStatus::Denied {
                ctx.clear_transient();
                ctx.set_state(S::AwaitingPickupAddress);
                return Ok(Step::Emit(DialogAction::Delegate));
            }

            let Some(estimates) = ctx.estimates() else {
                // Cache lost (expired session attributes): re-fetch.
                return Ok(Step::Goto(S::AwaitingRideType));
            };
            let Some(chosen) = turn.slot(slots::RIDE_TYPE) else {
                ctx.set_state(S::AwaitingBookingConfirmation);
                return Ok(elicit(slots::RIDE_TYPE, prompts::estimates(&estimates)));
            };
            let Some(estimate) = estimates
                .iter()
                .find(|e| e.ride_type.eq_ignore_ascii_case(chosen))
            else {
                ctx.set_state(S::AwaitingBookingConfirmation);
                return Ok(elicit(
                    slots::RIDE_TYPE,
                    prompts::unknown_ride_type(chosen, &estimates),
                ));
            };

            match turn.confirmation_status {
                ConfirmationStatus::None => {
                    let pickup = turn
                        .slot(slots::PICKUP_ADDRESS)
                        .unwrap_or("your pickup address");
                    let dropoff = turn
                        .slot(slots::DROPOFF_ADDRESS)
                        .unwrap_or("your destination");
                    ctx.set_state(S::AwaitingBookingConfirmation);
                    Ok(Step::Emit(DialogAction::ConfirmIntent {
                        prompt: prompts::booking_confirm(
                            &estimate.ride_type,
                            pickup,
                            dropoff,
                            estimate,
                        ),
                    }))
                }
                ConfirmationStatus::Confirmed => {
                    ctx.set_ride_type(&estimate.ride_type);
                    Ok(Step::Goto(S::Booking))
                }
                ConfirmationStatus::Denied => unreachable!("denial handled above"),
            }
        }

        // --- Booking ---
        (S::Booking, Event::Enter) => {
            let Some(credentials) = ctx.credentials() else {
                return Ok(Step::Goto(S::AwaitingLogin));
            };
            let Some(origin) = ctx.pickup_coordinates() else {
                return Ok(Step::Goto(S::AwaitingPickupAddress));
            };
            let Some(destination) = ctx.dropoff_coordinates() else {
                return Ok(Step::Goto(S::AwaitingDropoffAddress));
            };
            let Some(ride_type) = ctx.ride_type() else {
                return Ok(Step::Goto(S::AwaitingBookingConfirmation));
            };
            Ok(Step::Run(Effect::RequestRide {
                origin,
                destination,
                ride_type,
                access_token: credentials.access_token,
            }))
        }
        (S::Booking, Event::Outcome(Outcome::RideRequested(Ok(ride_id)))) => {
            ctx.set_ride_id(&ride_id);
            ctx.set_state(S::AwaitingStatus);
            Ok(elicit(slots::CONFIRMATION, prompts::BOOKED))
        }
        (S::Booking, Event::Outcome(Outcome::RideRequested(Err(_)))) => {
            // The one upstream failure that is terminal: a blind retry
            // could book two cars.
            Ok(close(FulfillmentState::Failed, prompts::BOOKING_FAILED))
        }

        // --- Status polling ---
        (S::AwaitingStatus, Event::Enter) => {
            let asked_for_status = turn
                .slot(slots::CONFIRMATION)
                .is_some_and(|v| v.eq_ignore_ascii_case("status"));
            if !asked_for_status {
                ctx.set_state(S::AwaitingStatus);
                return Ok(elicit(slots::CONFIRMATION, prompts::STATUS_HELP));
            }
            let (Some(credentials), Some(ride_id)) = (ctx.credentials(), ctx.ride_id()) else {
                return Ok(close(FulfillmentState::Failed, prompts::RIDE_LOST));
            };
            Ok(Step::Run(Effect::PollStatus {
                access_token: credentials.access_token,
                ride_id,
            }))
        }
        (S::AwaitingStatus, Event::Outcome(Outcome::StatusPolled(Ok(status)))) => {
            if status.is_terminal() {
                return Ok(close(FulfillmentState::Fulfilled, prompts::ride_status(status)));
            }
            ctx.set_state(S::AwaitingStatus);
            Ok(elicit(slots::CONFIRMATION, prompts::ride_status(status)))
        }
        (S::AwaitingStatus, Event::Outcome(Outcome::StatusPolled(Err(_)))) => {
            ctx.set_state(S::AwaitingStatus);
            Ok(elicit(
                slots::CONFIRMATION,
                prompts::upstream_apology("Say status to try again."),
            ))
        }

        // An outcome arriving in a state that did not request it is an
        // engine bug, not a user error.
        (state, Event::Outcome(outcome)) => Err(HailerError::Internal(format!(
            "unexpected outcome {outcome:?} in state {state}"
        ))),
    }
}

/// The address slot was just filled; read it back for confirmation.
fn enter_confirming(leg: Leg, turn: &Turn, ctx: &mut TurnContext) -> Result<Step, HailerError> {
    let (slot, ask_state, validate_state) = leg_slots(leg);
    match turn.slot(slot) {
        None => Ok(Step::Goto(ask_state)),
        Some(addr) => {
            ctx.set_state(validate_state);
            Ok(elicit(confirm_slot(leg), prompts::address_confirm(addr)))
        }
    }
}

/// The yes/no read-back arrived. Missing reads as "no": confirmation is
/// never implicit.
fn enter_validating(leg: Leg, turn: &Turn) -> Result<Step, HailerError> {
    let (slot, ask_state, _) = leg_slots(leg);
    let denied = match turn.slot(confirm_slot(leg)) {
        None => true,
        Some(answer) => answer.eq_ignore_ascii_case("no"),
    };
    if denied {
        return Ok(Step::Goto(ask_state));
    }
    match turn.slot(slot) {
        None => Ok(Step::Goto(ask_state)),
        Some(address) => Ok(Step::Run(Effect::Geocode {
            leg,
            address: address.to_string(),
        })),
    }
}

fn geocoded(
    leg: Leg,
    result: Result<Coordinates, HailerError>,
    turn: &Turn,
    ctx: &mut TurnContext,
) -> Result<Step, HailerError> {
    let (slot, _, _) = leg_slots(leg);
    match result {
        Ok(coords) => {
            match leg {
                Leg::Pickup => {
                    ctx.set_pickup_coordinates(coords);
                    Ok(Step::Goto(DialogState::AwaitingDropoffAddress))
                }
                Leg::Dropoff => {
                    ctx.set_dropoff_coordinates(coords);
                    Ok(Step::Goto(DialogState::AwaitingRideType))
                }
            }
        }
        Err(HailerError::Validation { .. }) => {
            // No match for the address: recoverable, re-ask the same slot.
            let addr = turn.slot(slot).unwrap_or_default();
            ctx.set_state(confirming_state(leg));
            Ok(elicit(slot, prompts::address_not_found(leg, addr)))
        }
        Err(_) => {
            ctx.set_state(confirming_state(leg));
            let retry = match leg {
                Leg::Pickup => "Please give the pickup address again.",
                Leg::Dropoff => "Please give the dropoff address again.",
            };
            Ok(elicit(slot, prompts::upstream_apology(retry)))
        }
    }
}

fn leg_slots(leg: Leg) -> (&'static str, DialogState, DialogState) {
    match leg {
        Leg::Pickup => (
            slots::PICKUP_ADDRESS,
            DialogState::AwaitingPickupAddress,
            DialogState::ValidatingPickupAddress,
        ),
        Leg::Dropoff => (
            slots::DROPOFF_ADDRESS,
            DialogState::AwaitingDropoffAddress,
            DialogState::ValidatingDropoffAddress,
        ),
    }
}

fn confirm_slot(leg: Leg) -> &'static str {
    match leg {
        Leg::Pickup => slots::PICKUP_ADDRESS_CONFIRM,
        Leg::Dropoff => slots::DROPOFF_ADDRESS_CONFIRM,
    }
}

fn confirming_state(leg: Leg) -> DialogState {
    match leg {
        Leg::Pickup => DialogState::ConfirmingPickupAddress,
        Leg::Dropoff => DialogState::ConfirmingDropoffAddress,
    }
}
