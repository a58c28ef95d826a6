//! The balance ledger.
//!
//! Owns every mutation of per-(token, owner) holdings. Debit and credit are
//! deliberately separate primitives: a sale must independently validate the
//! seller's listed amount and the seller's owned amount, then
//! create-or-augment the buyer side, and keeping the operations apart makes
//! each invariant testable on its own.

use rust_decimal::Decimal;
use stagepass_state::StateStore;
use stagepass_types::{Address, Balance, IndexError, Result, TokenId, TokenKind, keys};

/// Balance mutations over the state store.
pub struct BalanceLedger<'a> {
    store: &'a mut StateStore,
}

impl<'a> BalanceLedger<'a> {
    pub fn new(store: &'a mut StateStore) -> Self {
        Self { store }
    }

    /// Add `amount` to the owner's holding, creating the balance on first
    /// receipt.
    ///
    /// On creation, `is_event_owner` is derived by comparing the owner to
    /// the token's controller (the owning event's organizer for tickets,
    /// the publishing organizer for memberships), and a ticket balance for
    /// a non-organizer bumps the event's attendee counter.
    ///
    /// # Errors
    /// `TokenNotFound` / `EventNotFound` when the balance must be created
    /// but its token or owning event is unknown; `Internal` when the credit
    /// would overflow the holding.
    pub fn credit(
        &mut self,
        kind: TokenKind,
        token_id: TokenId,
        owner: &Address,
        amount: u32,
    ) -> Result<()> {
        let key = keys::balance_key(kind, token_id, owner);
        if let Some(balance) = self.store.balance_mut(&key) {
            balance.amount_owned = balance
                .amount_owned
                .checked_add(amount)
                .ok_or_else(|| IndexError::Internal(format!("balance overflow on {key}")))?;
            return Ok(());
        }

        let token_key = keys::token_key(kind, token_id);
        let token = self
            .store
            .token(&token_key)
            .ok_or_else(|| IndexError::TokenNotFound(token_key.clone()))?;
        let event_key = token.event.clone();
        let token_organizer = token.organizer;

        let is_event_owner = match &event_key {
            Some(ek) => self
                .store
                .event(ek)
                .ok_or_else(|| IndexError::EventNotFound(ek.clone()))?
                .is_organizer(owner),
            None => token_organizer.is_some_and(|org| org == *owner),
        };

        if let Some(ek) = &event_key {
            if let Some(event) = self.store.event_mut(ek) {
                if !is_event_owner {
                    event.attendees += 1;
                }
                event.balances.push(key.clone());
            }
        }

        self.store.save_balance(Balance {
            key,
            token: token_key,
            kind,
            event: event_key,
            owner: *owner,
            amount_owned: amount,
            amount_on_sell: 0,
            asking_price: None,
            is_event_owner,
        });
        Ok(())
    }

    /// Remove `amount` from the owner's holding.
    ///
    /// A balance that reaches zero is deleted in the same step — the
    /// attendee counter is decremented first (non-organizer ticket holders
    /// only), and a zero-amount aggregate never stays live.
    ///
    /// # Errors
    /// `BalanceNotFound` if the balance does not exist,
    /// `InsufficientBalance` if `amount` exceeds the holding.
    pub fn debit(
        &mut self,
        kind: TokenKind,
        token_id: TokenId,
        owner: &Address,
        amount: u32,
    ) -> Result<()> {
        let key = keys::balance_key(kind, token_id, owner);
        let balance = self
            .store
            .balance(&key)
            .ok_or_else(|| IndexError::BalanceNotFound(key.clone()))?;
        if !balance.has_owned(amount) {
            return Err(IndexError::InsufficientBalance {
                key,
                needed: amount,
                available: balance.amount_owned,
            });
        }

        let (now_zero, was_event_owner, event_key) = {
            let balance = self
                .store
                .balance_mut(&key)
                .ok_or_else(|| IndexError::BalanceNotFound(key.clone()))?;
            balance.amount_owned -= amount;
            (
                balance.amount_owned == 0,
                balance.is_event_owner,
                balance.event.clone(),
            )
        };

        if now_zero {
            if let Some(ek) = &event_key {
                if let Some(event) = self.store.event_mut(ek) {
                    if !was_event_owner {
                        event.attendees = event.attendees.saturating_sub(1);
                    }
                    event.balances.retain(|k| k != &key);
                }
            }
            self.store.remove_balance(&key);
        }
        Ok(())
    }

    /// Declare an ask: `amount` offered at `price`.
    ///
    /// Set lazily — not validated against `amount_owned` here; the
    /// conservation check happens when the ask is consumed.
    ///
    /// # Errors
    /// `BalanceNotFound` if the seller has no balance for the token.
    pub fn set_ask(
        &mut self,
        kind: TokenKind,
        token_id: TokenId,
        seller: &Address,
        amount: u32,
        price: Decimal,
    ) -> Result<()> {
        let key = keys::balance_key(kind, token_id, seller);
        let balance = self
            .store
            .balance_mut(&key)
            .ok_or(IndexError::BalanceNotFound(key.clone()))?;
        balance.amount_on_sell = amount;
        balance.asking_price = Some(price);
        Ok(())
    }

    /// Consume `amount` from the seller's listing. Adjusts the listed
    /// amount only; the owned amount moves via the paired debit/credit of
    /// the same sale event.
    ///
    /// # Errors
    /// `BalanceNotFound` / `InsufficientListed`.
    pub fn consume_ask(
        &mut self,
        kind: TokenKind,
        token_id: TokenId,
        seller: &Address,
        amount: u32,
    ) -> Result<()> {
        let key = keys::balance_key(kind, token_id, seller);
        let balance = self
            .store
            .balance_mut(&key)
            .ok_or_else(|| IndexError::BalanceNotFound(key.clone()))?;
        if !balance.has_on_sell(amount) {
            let listed = balance.amount_on_sell;
            return Err(IndexError::InsufficientListed {
                key,
                needed: amount,
                listed,
            });
        }
        balance.amount_on_sell -= amount;
        Ok(())
    }

    /// Withdraw the listing entirely: zero on-sell, no asking price.
    ///
    /// # Errors
    /// `BalanceNotFound` if the balance is absent — reported, not a silent
    /// no-op.
    pub fn clear_ask(&mut self, kind: TokenKind, token_id: TokenId, seller: &Address) -> Result<()> {
        let key = keys::balance_key(kind, token_id, seller);
        let balance = self
            .store
            .balance_mut(&key)
            .ok_or(IndexError::BalanceNotFound(key.clone()))?;
        balance.amount_on_sell = 0;
        balance.asking_price = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagepass_types::{Event, EventId, Token};

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address(bytes)
    }

    /// Event `e0x0` organized by `org`, with ticket `tt0x1` published under it.
    fn seed(store: &mut StateStore, org: Address) {
        let event = Event::new(EventId(0), org);
        let mut token = Token::placeholder(TokenKind::Ticket, TokenId(1));
        token.event = Some(event.key.clone());
        token.organizer = Some(org);
        store.save_event(event);
        store.save_token(token);
    }

    #[test]
    fn credit_creates_balance_and_counts_attendee() {
        let mut store = StateStore::new();
        let org = addr(1);
        let holder = addr(2);
        seed(&mut store, org);

        BalanceLedger::new(&mut store)
            .credit(TokenKind::Ticket, TokenId(1), &holder, 5)
            .unwrap();

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &holder);
        let balance = store.balance(&key).unwrap();
        assert_eq!(balance.amount_owned, 5);
        assert_eq!(balance.amount_on_sell, 0);
        assert!(!balance.is_event_owner);
        assert_eq!(store.event("e0x0").unwrap().attendees, 1);
        assert!(store.event("e0x0").unwrap().balances.contains(&key));
    }

    #[test]
    fn credit_for_organizer_skips_attendee_count() {
        let mut store = StateStore::new();
        let org = addr(1);
        seed(&mut store, org);

        BalanceLedger::new(&mut store)
            .credit(TokenKind::Ticket, TokenId(1), &org, 10)
            .unwrap();

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &org);
        assert!(store.balance(&key).unwrap().is_event_owner);
        assert_eq!(store.event("e0x0").unwrap().attendees, 0);
    }

    #[test]
    fn credit_augments_existing_balance() {
        let mut store = StateStore::new();
        let holder = addr(2);
        seed(&mut store, addr(1));

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &holder, 3)
            .unwrap();
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &holder, 2)
            .unwrap();

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &holder);
        assert_eq!(store.balance(&key).unwrap().amount_owned, 5);
        // attendee counted once, on creation
        assert_eq!(store.event("e0x0").unwrap().attendees, 1);
    }

    #[test]
    fn credit_overflow_is_reported_not_wrapped() {
        let mut store = StateStore::new();
        let holder = addr(2);
        seed(&mut store, addr(1));
        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &holder);
        store.save_balance(Balance {
            key: key.clone(),
            token: "tt0x1".into(),
            kind: TokenKind::Ticket,
            event: Some("e0x0".into()),
            owner: holder,
            amount_owned: u32::MAX,
            amount_on_sell: 0,
            asking_price: None,
            is_event_owner: false,
        });

        let err = BalanceLedger::new(&mut store)
            .credit(TokenKind::Ticket, TokenId(1), &holder, 1)
            .unwrap_err();
        assert!(matches!(err, IndexError::Internal(_)));
        assert_eq!(store.balance(&key).unwrap().amount_owned, u32::MAX);
    }

    #[test]
    fn credit_unknown_token_fails() {
        let mut store = StateStore::new();
        let err = BalanceLedger::new(&mut store)
            .credit(TokenKind::Ticket, TokenId(9), &addr(2), 1)
            .unwrap_err();
        assert!(matches!(err, IndexError::TokenNotFound(_)));
    }

    #[test]
    fn debit_removes_balance_at_zero() {
        let mut store = StateStore::new();
        let holder = addr(2);
        seed(&mut store, addr(1));

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &holder, 2)
            .unwrap();
        ledger
            .debit(TokenKind::Ticket, TokenId(1), &holder, 2)
            .unwrap();

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &holder);
        assert!(store.balance(&key).is_none(), "zero balance must not persist");
        assert_eq!(store.event("e0x0").unwrap().attendees, 0);
        assert!(!store.event("e0x0").unwrap().balances.contains(&key));
    }

    #[test]
    fn debit_insufficient_leaves_state_unchanged() {
        let mut store = StateStore::new();
        let holder = addr(2);
        seed(&mut store, addr(1));

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &holder, 2)
            .unwrap();
        let err = ledger
            .debit(TokenKind::Ticket, TokenId(1), &holder, 3)
            .unwrap_err();
        assert!(matches!(err, IndexError::InsufficientBalance { .. }));

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &holder);
        assert_eq!(store.balance(&key).unwrap().amount_owned, 2);
    }

    #[test]
    fn debit_missing_balance_fails() {
        let mut store = StateStore::new();
        seed(&mut store, addr(1));
        let err = BalanceLedger::new(&mut store)
            .debit(TokenKind::Ticket, TokenId(1), &addr(9), 1)
            .unwrap_err();
        assert!(matches!(err, IndexError::BalanceNotFound(_)));
    }

    #[test]
    fn ask_lifecycle() {
        let mut store = StateStore::new();
        let seller = addr(2);
        seed(&mut store, addr(1));

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &seller, 5)
            .unwrap();
        ledger
            .set_ask(TokenKind::Ticket, TokenId(1), &seller, 3, Decimal::new(100, 0))
            .unwrap();
        ledger
            .consume_ask(TokenKind::Ticket, TokenId(1), &seller, 3)
            .unwrap();
        ledger
            .clear_ask(TokenKind::Ticket, TokenId(1), &seller)
            .unwrap();

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &seller);
        let balance = store.balance(&key).unwrap();
        assert_eq!(balance.amount_on_sell, 0);
        assert!(balance.asking_price.is_none());
    }

    #[test]
    fn ask_is_lazy_at_set_time() {
        let mut store = StateStore::new();
        let seller = addr(2);
        seed(&mut store, addr(1));

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &seller, 2)
            .unwrap();
        // listing more than owned is accepted at set time
        ledger
            .set_ask(TokenKind::Ticket, TokenId(1), &seller, 10, Decimal::ONE)
            .unwrap();
        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &seller);
        assert_eq!(store.balance(&key).unwrap().amount_on_sell, 10);
    }

    #[test]
    fn consume_beyond_listed_fails_without_clamping() {
        let mut store = StateStore::new();
        let seller = addr(2);
        seed(&mut store, addr(1));

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Ticket, TokenId(1), &seller, 5)
            .unwrap();
        ledger
            .set_ask(TokenKind::Ticket, TokenId(1), &seller, 2, Decimal::ONE)
            .unwrap();
        let err = ledger
            .consume_ask(TokenKind::Ticket, TokenId(1), &seller, 3)
            .unwrap_err();
        assert!(matches!(err, IndexError::InsufficientListed { .. }));

        let key = keys::balance_key(TokenKind::Ticket, TokenId(1), &seller);
        assert_eq!(store.balance(&key).unwrap().amount_on_sell, 2);
    }

    #[test]
    fn clear_ask_on_missing_balance_is_reported() {
        let mut store = StateStore::new();
        seed(&mut store, addr(1));
        let err = BalanceLedger::new(&mut store)
            .clear_ask(TokenKind::Ticket, TokenId(1), &addr(9))
            .unwrap_err();
        assert!(matches!(err, IndexError::BalanceNotFound(_)));
    }

    #[test]
    fn membership_credit_uses_token_organizer() {
        let mut store = StateStore::new();
        let org = addr(1);
        let mut token = Token::placeholder(TokenKind::Membership, TokenId(3));
        token.organizer = Some(org);
        store.save_token(token);

        let mut ledger = BalanceLedger::new(&mut store);
        ledger
            .credit(TokenKind::Membership, TokenId(3), &org, 4)
            .unwrap();
        ledger
            .credit(TokenKind::Membership, TokenId(3), &addr(2), 1)
            .unwrap();

        let org_key = keys::balance_key(TokenKind::Membership, TokenId(3), &org);
        let other_key = keys::balance_key(TokenKind::Membership, TokenId(3), &addr(2));
        assert!(store.balance(&org_key).unwrap().is_event_owner);
        assert!(!store.balance(&other_key).unwrap().is_event_owner);
    }
}
