//! Booking reservations.
//!
//! A reservation is a hold on `(ticket, owner, buyer)` and nothing more.
//! It never moves balances; the eventual fulfilment's token transfer does
//! that through the regular transfer path. Cancel and fulfil are therefore
//! the same state change with different business meanings.

use tracing::warn;

use stagepass_state::StateStore;
use stagepass_types::{Address, IndexError, Reservation, Result, TokenId, TokenKind, keys};

/// Reservation mutations over the state store.
pub struct ReservationTracker<'a> {
    store: &'a mut StateStore,
}

impl<'a> ReservationTracker<'a> {
    pub fn new(store: &'a mut StateStore) -> Self {
        Self { store }
    }

    /// Place a hold of `amount` units of the owner's ticket for the buyer.
    ///
    /// A second booking for the same `(ticket, owner, buyer)` replaces the
    /// first and is logged; upstream emits this when a buyer re-books
    /// before the seller acts.
    ///
    /// # Errors
    /// `TokenNotFound` if the ticket has never been seen.
    pub fn book(
        &mut self,
        ticket_id: TokenId,
        owner: Address,
        buyer: Address,
        amount: u32,
    ) -> Result<()> {
        let tkey = keys::token_key(TokenKind::Ticket, ticket_id);
        if self.store.token(&tkey).is_none() {
            return Err(IndexError::TokenNotFound(tkey));
        }

        let key = keys::reservation_key(ticket_id, &owner, &buyer);
        if let Some(existing) = self.store.reservation(&key) {
            warn!(
                key = %key,
                previous = existing.amount,
                amount,
                "booking replaced an open reservation"
            );
        }
        self.store.save_reservation(Reservation {
            key,
            ticket: tkey,
            owner,
            buyer,
            amount,
        });
        Ok(())
    }

    /// Drop the hold without a sale.
    ///
    /// # Errors
    /// `ReservationNotFound` if no hold is open for the triple.
    pub fn cancel(&mut self, ticket_id: TokenId, owner: &Address, buyer: &Address) -> Result<()> {
        self.release(ticket_id, owner, buyer)
    }

    /// Close the hold because the sale went through. The balance movement
    /// arrives as its own token transfer.
    ///
    /// # Errors
    /// `ReservationNotFound` if no hold is open for the triple.
    pub fn fulfil(&mut self, ticket_id: TokenId, owner: &Address, buyer: &Address) -> Result<()> {
        self.release(ticket_id, owner, buyer)
    }

    fn release(&mut self, ticket_id: TokenId, owner: &Address, buyer: &Address) -> Result<()> {
        let key = keys::reservation_key(ticket_id, owner, buyer);
        self.store
            .remove_reservation(&key)
            .ok_or(IndexError::ReservationNotFound(key))?;
        Ok(())
    }
}
