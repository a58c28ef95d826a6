//! Allowances and membership restrictions.

use serde::{Deserialize, Serialize};

use crate::ids::Address;

/// A capped, address-restricted right to acquire units of a token.
///
/// Created on grant, decremented on consumption, deleted on explicit
/// removal together with its entry in the owning token's allowance list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allowance {
    pub key: String,
    /// Remaining consumptions. Never goes negative; a consume on an
    /// exhausted allowance is reported as an anomaly instead.
    pub amount: u32,
    /// Permitted addresses, in grant order.
    pub allowed_addresses: Vec<Address>,
}

impl Allowance {
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.amount == 0
    }
}

/// A membership-gating entry on a ticket: holders of the listed token ids
/// from `contract` may buy the ticket.
///
/// The token-id sequence keeps insertion order and does not deduplicate —
/// upstream assigns duplicates deliberately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restriction {
    pub key: String,
    /// Key of the gated ticket.
    pub ticket: String,
    /// The restricting membership contract.
    pub contract: Address,
    pub token_ids: Vec<u64>,
}
