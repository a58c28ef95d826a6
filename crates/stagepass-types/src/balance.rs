//! The balance aggregate: per-(token, owner) holdings and active ask.
//!
//! The core mutable aggregate of the indexer. At most one balance exists per
//! (token, owner, kind) key; when `amount_owned` reaches zero the aggregate
//! is deleted, never kept around zeroed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{Address, TokenKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub key: String,
    /// Key of the token this balance holds.
    pub token: String,
    pub kind: TokenKind,
    /// Key of the owning event container. Ticket balances only.
    pub event: Option<String>,
    pub owner: Address,
    pub amount_owned: u32,
    /// Amount currently listed for sale. Set lazily: not validated against
    /// `amount_owned` at listing time, only at consumption.
    pub amount_on_sell: u32,
    pub asking_price: Option<Decimal>,
    /// Whether the owner is the organizer of the owning event. Recomputed by
    /// the ownership cascade.
    pub is_event_owner: bool,
}

impl Balance {
    /// Whether the owner holds at least `amount`.
    #[must_use]
    pub fn has_owned(&self, amount: u32) -> bool {
        self.amount_owned >= amount
    }

    /// Whether at least `amount` is listed for sale.
    #[must_use]
    pub fn has_on_sell(&self, amount: u32) -> bool {
        self.amount_on_sell >= amount
    }

    /// Whether the seller's current ask matches the given price.
    #[must_use]
    pub fn price_matches(&self, price: Decimal) -> bool {
        self.asking_price == Some(price)
    }

    /// The listing-consistency invariant: `0 <= on_sell <= owned`.
    /// Lazy asks can break this transiently between set and consumption;
    /// every *committed* sale mutation must leave it holding.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.amount_on_sell <= self.amount_owned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(owned: u32, on_sell: u32) -> Balance {
        Balance {
            key: "tt0x0-0xaa".into(),
            token: "tt0x0".into(),
            kind: TokenKind::Ticket,
            event: Some("e0x0".into()),
            owner: Address::ZERO,
            amount_owned: owned,
            amount_on_sell: on_sell,
            asking_price: None,
            is_event_owner: false,
        }
    }

    #[test]
    fn has_owned_boundary() {
        let b = balance(5, 0);
        assert!(b.has_owned(5));
        assert!(!b.has_owned(6));
        assert!(b.has_owned(0));
    }

    #[test]
    fn has_on_sell_boundary() {
        let b = balance(5, 3);
        assert!(b.has_on_sell(3));
        assert!(!b.has_on_sell(4));
    }

    #[test]
    fn price_matching() {
        let mut b = balance(5, 3);
        assert!(!b.price_matches(Decimal::new(100, 0)));
        b.asking_price = Some(Decimal::new(100, 0));
        assert!(b.price_matches(Decimal::new(100, 0)));
        assert!(!b.price_matches(Decimal::new(99, 0)));
    }

    #[test]
    fn consistency_invariant() {
        assert!(balance(5, 5).is_consistent());
        assert!(balance(5, 0).is_consistent());
        assert!(!balance(2, 5).is_consistent());
    }
}
