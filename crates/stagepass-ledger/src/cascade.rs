//! Event-level cascades.
//!
//! Ownership and royalty changes on an event fan out to its dependent
//! tokens and balances. Both run in two phases: validate every target
//! against the event's dependent lists, then write. A dangling list entry
//! aborts the whole cascade before the first mutation.

use tracing::info;

use stagepass_state::StateStore;
use stagepass_types::{Address, EventId, IndexError, Result, keys};

/// Fan-out mutations rooted at a single event.
pub struct CascadeRunner<'a> {
    store: &'a mut StateStore,
}

impl<'a> CascadeRunner<'a> {
    pub fn new(store: &'a mut StateStore) -> Self {
        Self { store }
    }

    /// Hand the event to a new organizer.
    ///
    /// Rewrites the organizer on the event and on every dependent token,
    /// then recomputes each dependent balance's `is_event_owner` against
    /// the new organizer and the attendee counter along with it. The new
    /// organizer gets a registry entry if they have none.
    ///
    /// # Errors
    /// `EventNotFound`, or `TokenNotFound` / `BalanceNotFound` when a
    /// dependent list entry no longer resolves. Nothing is written on error.
    pub fn transfer_ownership(&mut self, event_id: EventId, new_owner: Address) -> Result<()> {
        let ekey = keys::event_key(event_id);
        let event = self
            .store
            .event(&ekey)
            .ok_or_else(|| IndexError::EventNotFound(ekey.clone()))?;
        let old_owner = event.organizer;
        let ticket_keys = event.tickets.clone();
        let balance_keys = event.balances.clone();

        for tkey in &ticket_keys {
            if self.store.token(tkey).is_none() {
                return Err(IndexError::TokenNotFound(tkey.clone()));
            }
        }
        for bkey in &balance_keys {
            if self.store.balance(bkey).is_none() {
                return Err(IndexError::BalanceNotFound(bkey.clone()));
            }
        }

        self.store.ensure_user(new_owner);
        if let Some(event) = self.store.event_mut(&ekey) {
            event.organizer = new_owner;
        }
        for tkey in &ticket_keys {
            if let Some(token) = self.store.token_mut(tkey) {
                token.organizer = Some(new_owner);
            }
        }
        let mut attendees: u64 = 0;
        for bkey in &balance_keys {
            if let Some(balance) = self.store.balance_mut(bkey) {
                balance.is_event_owner = balance.owner == new_owner;
                if !balance.is_event_owner {
                    attendees += 1;
                }
            }
        }
        if let Some(event) = self.store.event_mut(&ekey) {
            event.attendees = attendees;
        }

        info!(
            event = %ekey,
            from = %old_owner,
            to = %new_owner,
            tickets = ticket_keys.len(),
            balances = balance_keys.len(),
            "event ownership transferred"
        );
        Ok(())
    }

    /// Apply a new creator royalty to every token published under the
    /// event.
    ///
    /// # Errors
    /// Same validation contract as [`Self::transfer_ownership`].
    pub fn modify_royalty(&mut self, event_id: EventId, royalty: u32) -> Result<()> {
        let ekey = keys::event_key(event_id);
        let event = self
            .store
            .event(&ekey)
            .ok_or_else(|| IndexError::EventNotFound(ekey.clone()))?;
        let ticket_keys = event.tickets.clone();

        for tkey in &ticket_keys {
            if self.store.token(tkey).is_none() {
                return Err(IndexError::TokenNotFound(tkey.clone()));
            }
        }

        for tkey in &ticket_keys {
            if let Some(token) = self.store.token_mut(tkey) {
                token.creator_royalty = royalty;
            }
        }
        info!(event = %ekey, royalty, tickets = ticket_keys.len(), "event royalty modified");
        Ok(())
    }
}
