//! Booking reservations: a ticket temporarily earmarked for a buyer.

use serde::{Deserialize, Serialize};

use crate::ids::Address;

/// A hold on ticket units pending the buyer's fulfilment or cancellation.
///
/// Keyed by (ticket, owner, buyer). A second booking for the same triple
/// overwrites the first (last booking wins). Cancellation and fulfilment
/// both remove the whole entry; there are no partial reservation amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub key: String,
    /// Key of the reserved ticket.
    pub ticket: String,
    pub owner: Address,
    pub buyer: Address,
    pub amount: u32,
}
