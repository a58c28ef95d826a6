//! The user registry entry.

use serde::{Deserialize, Serialize};

use crate::ids::Address;

/// An account the indexer has seen. Created on first sight and never
/// removed; balances and transfers reference users by address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub address: Address,
}

impl User {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}
