//! Allowance grants and membership restrictions.
//!
//! Both relations are small, ordered, list-valued: the owning token keeps
//! the keys and the aggregates live in the store. Removal always updates
//! both sides in the same logical step — a key missing on either side
//! aborts with no partial removal.

use stagepass_state::StateStore;
use stagepass_types::{
    Address, Allowance, AllowanceId, IndexError, Restriction, Result, Token, TokenId, TokenKind,
    keys,
};

/// Allowance and restriction mutations over the state store.
pub struct AllowanceStore<'a> {
    store: &'a mut StateStore,
}

impl<'a> AllowanceStore<'a> {
    pub fn new(store: &'a mut StateStore) -> Self {
        Self { store }
    }

    /// Record a new allowance and attach it to the owning token.
    ///
    /// A grant observed before the token's publish creates a placeholder
    /// token so the allowance is not orphaned; the later publish fills the
    /// placeholder in and keeps the accumulated list.
    pub fn grant(
        &mut self,
        kind: TokenKind,
        token_id: TokenId,
        allowance_id: AllowanceId,
        amount: u32,
        allowed_addresses: Vec<Address>,
    ) -> Result<()> {
        let akey = keys::allowance_key(kind, allowance_id);
        self.store.save_allowance(Allowance {
            key: akey.clone(),
            amount,
            allowed_addresses,
        });

        let tkey = keys::token_key(kind, token_id);
        if let Some(token) = self.store.token_mut(&tkey) {
            token.allowances.push(akey);
        } else {
            let mut token = Token::placeholder(kind, token_id);
            token.allowances.push(akey);
            self.store.save_token(token);
        }
        Ok(())
    }

    /// Consume one unit of an allowance.
    ///
    /// # Errors
    /// `AllowanceNotFound` for an unknown id; `AllowanceExhausted` when
    /// nothing remains — the remaining amount never goes negative.
    pub fn consume(&mut self, kind: TokenKind, allowance_id: AllowanceId) -> Result<()> {
        let akey = keys::allowance_key(kind, allowance_id);
        let allowance = self
            .store
            .allowance_mut(&akey)
            .ok_or_else(|| IndexError::AllowanceNotFound(akey.clone()))?;
        if allowance.is_exhausted() {
            return Err(IndexError::AllowanceExhausted(akey));
        }
        allowance.amount -= 1;
        Ok(())
    }

    /// Remove an allowance: delete the aggregate AND drop its key from the
    /// owning token's list, atomically from the caller's point of view.
    ///
    /// # Errors
    /// `TokenNotFound` / `AllowanceNotFound` — including when the id is
    /// known but not listed on the token. Nothing is mutated on error.
    pub fn remove(
        &mut self,
        kind: TokenKind,
        token_id: TokenId,
        allowance_id: AllowanceId,
    ) -> Result<()> {
        let akey = keys::allowance_key(kind, allowance_id);
        let tkey = keys::token_key(kind, token_id);

        if self.store.allowance(&akey).is_none() {
            return Err(IndexError::AllowanceNotFound(akey));
        }
        let token = self
            .store
            .token(&tkey)
            .ok_or_else(|| IndexError::TokenNotFound(tkey.clone()))?;
        let Some(pos) = token.allowances.iter().position(|k| k == &akey) else {
            return Err(IndexError::AllowanceNotFound(format!(
                "{akey} (not listed on {tkey})"
            )));
        };

        if let Some(token) = self.store.token_mut(&tkey) {
            token.allowances.remove(pos);
        }
        self.store.remove_allowance(&akey);
        Ok(())
    }

    /// Attach a membership restriction to a ticket. The permitted token-id
    /// sequence keeps insertion order and duplicates, as assigned upstream.
    ///
    /// Like a grant, an assignment may precede the ticket's publish and
    /// creates a placeholder in that case.
    pub fn assign_restriction(
        &mut self,
        ticket_id: TokenId,
        contract: Address,
        token_ids: Vec<u64>,
    ) -> Result<()> {
        let tkey = keys::token_key(TokenKind::Ticket, ticket_id);
        let rkey = keys::restriction_key(ticket_id, &contract);

        self.store.save_restriction(Restriction {
            key: rkey.clone(),
            ticket: tkey.clone(),
            contract,
            token_ids,
        });

        if let Some(token) = self.store.token_mut(&tkey) {
            token.restrictions.push(rkey);
        } else {
            let mut token = Token::placeholder(TokenKind::Ticket, ticket_id);
            token.restrictions.push(rkey);
            self.store.save_token(token);
        }
        Ok(())
    }

    /// Drop one permitted token id from a restriction entry.
    ///
    /// # Errors
    /// `TokenNotFound` / `RestrictionNotFound`.
    pub fn revoke_restriction_token(
        &mut self,
        ticket_id: TokenId,
        contract: &Address,
        token_id: u64,
    ) -> Result<()> {
        let tkey = keys::token_key(TokenKind::Ticket, ticket_id);
        if self.store.token(&tkey).is_none() {
            return Err(IndexError::TokenNotFound(tkey));
        }
        let rkey = keys::restriction_key(ticket_id, contract);
        let restriction = self
            .store
            .restriction_mut(&rkey)
            .ok_or(IndexError::RestrictionNotFound(rkey.clone()))?;
        restriction.token_ids.retain(|id| *id != token_id);
        Ok(())
    }

    /// Remove a whole restriction entry from a ticket: both the aggregate
    /// and the ticket's list entry.
    ///
    /// # Errors
    /// `TokenNotFound` / `RestrictionNotFound`; no partial removal.
    pub fn revoke_restriction(&mut self, ticket_id: TokenId, contract: &Address) -> Result<()> {
        let tkey = keys::token_key(TokenKind::Ticket, ticket_id);
        let rkey = keys::restriction_key(ticket_id, contract);

        if self.store.token(&tkey).is_none() {
            return Err(IndexError::TokenNotFound(tkey));
        }
        if self.store.restriction(&rkey).is_none() {
            return Err(IndexError::RestrictionNotFound(rkey));
        }

        if let Some(token) = self.store.token_mut(&tkey) {
            token.restrictions.retain(|k| k != &rkey);
        }
        self.store.remove_restriction(&rkey);
        Ok(())
    }
}
