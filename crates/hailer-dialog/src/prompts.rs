// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing message strings.
//!
//! Every prompt the dialog can say lives here, so the transition logic
//! stays free of string formatting and the wording is testable in one
//! place. Costs render as whole dollars; ETAs as whole minutes, rounded
//! up.

use hailer_core::{RideEstimate, RideStatus};

/// Which address leg a prompt refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Pickup,
    Dropoff,
}

impl Leg {
    fn noun(self) -> &'static str {
        match self {
            Leg::Pickup => "pickup",
            Leg::Dropoff => "dropoff",
        }
    }
}

pub const PIN: &str = "A Lyft PIN was just texted to you, please say the 4 digits.";

pub fn pin_retry(failed_pin: &str) -> String {
    format!(
        "There was an error with the PIN you entered {failed_pin}. \
         A Lyft PIN was just texted to you, please say the 4 digits."
    )
}

pub const PIN_LOCKOUT: &str =
    "Too many failed PIN attempts. Please try booking again later.";

pub fn address(leg: Leg) -> String {
    match leg {
        Leg::Pickup => "At what address would you like to be picked up?".into(),
        Leg::Dropoff => "At what address would you like to be dropped off?".into(),
    }
}

pub fn address_confirm(addr: &str) -> String {
    format!("Was that {addr}?")
}

pub fn address_not_found(leg: Leg, addr: &str) -> String {
    format!(
        "The {} address you specified, {addr}, could not be found. Try again.",
        leg.noun()
    )
}

/// "I found N ride types. A Lyft will cost 11 dollars. ..." in provider
/// order, ending with the ride-type question.
pub fn estimates(estimates: &[RideEstimate]) -> String {
    let mut out = format!("I found {} ride types. ", estimates.len());
    for estimate in estimates {
        out.push_str(&format!(
            "A {} will cost {} dollars. ",
            estimate.ride_type,
            cost_phrase(estimate)
        ));
    }
    out.push_str("Which type of ride would you like?");
    out
}

pub fn booking_confirm(
    ride_type: &str,
    pickup: &str,
    dropoff: &str,
    estimate: &RideEstimate,
) -> String {
    let min = dollars(estimate.min_cost_cents);
    let max = dollars(estimate.max_cost_cents);
    let cost = if min == max {
        format!("{min}")
    } else {
        format!("{min}-{max}")
    };
    format!(
        "Should I confirm your {ride_type} ride from {pickup} to {dropoff}, \
         arriving in {} minutes, for ${cost}?",
        eta_minutes(estimate)
    )
}

/// "I didn't recognize X." followed by the full summary so the user can
/// pick again without re-fetching.
pub fn unknown_ride_type(chosen: &str, available: &[RideEstimate]) -> String {
    format!("I didn't recognize {chosen}. {}", estimates(available))
}

pub const BOOKED: &str = "Ride booked! say status at any time to check on it.";

pub const RIDE_LOST: &str =
    "Sorry, I lost track of your ride. Please check the Lyft app directly.";

pub const BOOKING_FAILED: &str = "Ride could not be booked.";

pub const STATUS_HELP: &str = "Say status at any time to check on your ride.";

/// Status report. Terminal statuses read as a send-off; the rest invite
/// another poll.
pub fn ride_status(status: RideStatus) -> String {
    let phrase = match status {
        RideStatus::Pending => "Your ride is pending, we are finding you a driver.",
        RideStatus::Accepted => "A driver has accepted your ride and is on the way.",
        RideStatus::Arrived => "Your driver has arrived at the pickup address.",
        RideStatus::PickedUp => "You have been picked up and are on your way.",
        RideStatus::DroppedOff => {
            "You have arrived at your destination. Thanks for riding!"
        }
        RideStatus::Canceled => "Your ride has been canceled.",
    };
    if status.is_terminal() {
        phrase.to_string()
    } else {
        format!("{phrase} Say status for an update.")
    }
}

/// Generic apology for an upstream failure, with a state-appropriate
/// retry clause appended.
pub fn upstream_apology(retry_clause: &str) -> String {
    format!("Sorry, something went wrong on our end. {retry_clause}")
}

/// "11" when the range collapses, "11 and 15" otherwise, in whole dollars.
fn cost_phrase(estimate: &RideEstimate) -> String {
    let min = dollars(estimate.min_cost_cents);
    let max = dollars(estimate.max_cost_cents);
    if min == max {
        format!("{min}")
    } else {
        format!("between {min} and {max}")
    }
}

fn dollars(cents: i64) -> i64 {
    (cents as f64 / 100.0).round() as i64
}

fn eta_minutes(estimate: &RideEstimate) -> i64 {
    (estimate.eta_seconds + 59).div_euclid(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(name: &str, min: i64, max: i64, eta: i64) -> RideEstimate {
        RideEstimate {
            ride_type: name.into(),
            min_cost_cents: min,
            max_cost_cents: max,
            eta_seconds: eta,
        }
    }

    #[test]
    fn estimates_summary_lists_every_ride_type_in_order() {
        let list = vec![
            estimate("Lyft Line", 700, 700, 180),
            estimate("Lyft", 1100, 1500, 300),
            estimate("Lyft XL", 2049, 2551, 420),
        ];
        let summary = estimates(&list);

        assert!(summary.starts_with("I found 3 ride types. "));
        assert!(summary.contains("A Lyft Line will cost 7 dollars. "));
        assert!(summary.contains("A Lyft will cost between 11 and 15 dollars. "));
        assert!(summary.contains("A Lyft XL will cost between 20 and 26 dollars. "));
        assert!(summary.ends_with("Which type of ride would you like?"));

        let line = summary.find("Lyft Line").unwrap();
        let xl = summary.find("Lyft XL").unwrap();
        assert!(line < xl, "provider order must be preserved");
    }

    #[test]
    fn booking_confirm_rounds_eta_up() {
        let msg = booking_confirm(
            "Lyft",
            "30th Street Station",
            "Penn Museum",
            &estimate("Lyft", 1100, 1100, 301),
        );
        assert_eq!(
            msg,
            "Should I confirm your Lyft ride from 30th Street Station to \
             Penn Museum, arriving in 6 minutes, for $11?"
        );
    }

    #[test]
    fn booking_confirm_renders_a_cost_range() {
        let msg = booking_confirm("Lyft XL", "A", "B", &estimate("Lyft XL", 2000, 2600, 60));
        assert!(msg.ends_with("arriving in 1 minutes, for $20-26?"));
    }

    #[test]
    fn pin_retry_includes_the_rejected_pin() {
        let msg = pin_retry("0000");
        assert!(msg.starts_with("There was an error with the PIN you entered 0000."));
        assert!(msg.ends_with("please say the 4 digits."));
    }

    #[test]
    fn terminal_statuses_do_not_invite_another_poll() {
        assert!(ride_status(RideStatus::Pending).ends_with("Say status for an update."));
        assert!(ride_status(RideStatus::PickedUp).ends_with("Say status for an update."));
        assert!(!ride_status(RideStatus::DroppedOff).contains("Say status"));
        assert!(!ride_status(RideStatus::Canceled).contains("Say status"));
    }

    #[test]
    fn not_found_names_the_leg_and_address() {
        assert_eq!(
            address_not_found(Leg::Pickup, "Nowhere Land"),
            "The pickup address you specified, Nowhere Land, could not be found. Try again."
        );
        assert!(address_not_found(Leg::Dropoff, "x").starts_with("The dropoff address"));
    }
}
