// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of dialog states.

use strum::{Display, EnumString};

/// Where a booking dialog currently stands.
///
/// Exactly one state is current per session, stored under the `state`
/// session attribute by its `Display` name. Transitions form a graph, not
/// a line: confirmation denials and validation failures move backwards.
///
/// The naming convention is what the state is *waiting on*: a state named
/// `AwaitingX` means the previous turn asked for X and this turn should
/// carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum DialogState {
    /// No login yet; the next turn starts the PIN exchange.
    AwaitingLogin,
    /// A PIN was texted to the user; this turn should carry it.
    AwaitingPin,
    /// Ask for the pickup address.
    AwaitingPickupAddress,
    /// The pickup address was asked for; this turn carries it, to be read
    /// back for confirmation.
    ConfirmingPickupAddress,
    /// The read-back was asked; this turn carries yes/no, and a yes sends
    /// the address to the geocoder.
    ValidatingPickupAddress,
    /// Ask for the dropoff address.
    AwaitingDropoffAddress,
    /// Dropoff counterpart of [`ConfirmingPickupAddress`](Self::ConfirmingPickupAddress).
    ConfirmingDropoffAddress,
    /// Dropoff counterpart of [`ValidatingPickupAddress`](Self::ValidatingPickupAddress).
    ValidatingDropoffAddress,
    /// Both addresses validated; fetch fare estimates and ask for a ride
    /// type.
    AwaitingRideType,
    /// A ride type was chosen; put the full booking to the user for
    /// confirmation.
    AwaitingBookingConfirmation,
    /// The user confirmed; place the ride request.
    Booking,
    /// A ride is booked; "status" polls it until a terminal status ends
    /// the dialog.
    AwaitingStatus,
}
