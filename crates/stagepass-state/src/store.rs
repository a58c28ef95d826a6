//! The aggregate state store.
//!
//! Typed load/save/remove per aggregate kind. Every aggregate is exclusively
//! owned by its key; a `save_*` call replaces the stored value wholesale.

use std::collections::HashMap;

use stagepass_types::{
    Address, Allowance, Balance, Event, Reservation, Restriction, Token, Transfer, TxHash, User,
};

/// In-memory aggregate storage, one map per aggregate kind.
#[derive(Debug, Default)]
pub struct StateStore {
    events: HashMap<String, Event>,
    tokens: HashMap<String, Token>,
    balances: HashMap<String, Balance>,
    allowances: HashMap<String, Allowance>,
    restrictions: HashMap<String, Restriction>,
    reservations: HashMap<String, Reservation>,
    transfers: HashMap<String, Transfer>,
    users: HashMap<Address, User>,
    /// Next sequence index per transaction hash (see transfer recorder).
    transfer_seqs: HashMap<TxHash, u32>,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- events ----------------------------------------------------------

    #[must_use]
    pub fn event(&self, key: &str) -> Option<&Event> {
        self.events.get(key)
    }

    pub fn event_mut(&mut self, key: &str) -> Option<&mut Event> {
        self.events.get_mut(key)
    }

    pub fn save_event(&mut self, event: Event) {
        self.events.insert(event.key.clone(), event);
    }

    pub fn remove_event(&mut self, key: &str) -> Option<Event> {
        self.events.remove(key)
    }

    // -- tokens ----------------------------------------------------------

    #[must_use]
    pub fn token(&self, key: &str) -> Option<&Token> {
        self.tokens.get(key)
    }

    pub fn token_mut(&mut self, key: &str) -> Option<&mut Token> {
        self.tokens.get_mut(key)
    }

    pub fn save_token(&mut self, token: Token) {
        self.tokens.insert(token.key.clone(), token);
    }

    pub fn remove_token(&mut self, key: &str) -> Option<Token> {
        self.tokens.remove(key)
    }

    // -- balances --------------------------------------------------------

    #[must_use]
    pub fn balance(&self, key: &str) -> Option<&Balance> {
        self.balances.get(key)
    }

    pub fn balance_mut(&mut self, key: &str) -> Option<&mut Balance> {
        self.balances.get_mut(key)
    }

    pub fn save_balance(&mut self, balance: Balance) {
        self.balances.insert(balance.key.clone(), balance);
    }

    pub fn remove_balance(&mut self, key: &str) -> Option<Balance> {
        self.balances.remove(key)
    }

    /// All live balances, in no particular order.
    pub fn balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances.values()
    }

    /// Total owned amount of a token across all balances. The conservation
    /// invariant: unchanged by any transfer.
    #[must_use]
    pub fn token_supply(&self, token_key: &str) -> u64 {
        self.balances
            .values()
            .filter(|b| b.token == token_key)
            .map(|b| u64::from(b.amount_owned))
            .sum()
    }

    #[must_use]
    pub fn balance_count(&self) -> usize {
        self.balances.len()
    }

    // -- allowances ------------------------------------------------------

    #[must_use]
    pub fn allowance(&self, key: &str) -> Option<&Allowance> {
        self.allowances.get(key)
    }

    pub fn allowance_mut(&mut self, key: &str) -> Option<&mut Allowance> {
        self.allowances.get_mut(key)
    }

    pub fn save_allowance(&mut self, allowance: Allowance) {
        self.allowances.insert(allowance.key.clone(), allowance);
    }

    pub fn remove_allowance(&mut self, key: &str) -> Option<Allowance> {
        self.allowances.remove(key)
    }

    // -- restrictions ----------------------------------------------------

    #[must_use]
    pub fn restriction(&self, key: &str) -> Option<&Restriction> {
        self.restrictions.get(key)
    }

    pub fn restriction_mut(&mut self, key: &str) -> Option<&mut Restriction> {
        self.restrictions.get_mut(key)
    }

    pub fn save_restriction(&mut self, restriction: Restriction) {
        self.restrictions.insert(restriction.key.clone(), restriction);
    }

    pub fn remove_restriction(&mut self, key: &str) -> Option<Restriction> {
        self.restrictions.remove(key)
    }

    // -- reservations ----------------------------------------------------

    #[must_use]
    pub fn reservation(&self, key: &str) -> Option<&Reservation> {
        self.reservations.get(key)
    }

    pub fn save_reservation(&mut self, reservation: Reservation) {
        self.reservations
            .insert(reservation.key.clone(), reservation);
    }

    pub fn remove_reservation(&mut self, key: &str) -> Option<Reservation> {
        self.reservations.remove(key)
    }

    #[must_use]
    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    // -- transfers -------------------------------------------------------

    #[must_use]
    pub fn transfer(&self, key: &str) -> Option<&Transfer> {
        self.transfers.get(key)
    }

    pub fn transfer_mut(&mut self, key: &str) -> Option<&mut Transfer> {
        self.transfers.get_mut(key)
    }

    pub fn save_transfer(&mut self, transfer: Transfer) {
        self.transfers.insert(transfer.key.clone(), transfer);
    }

    #[must_use]
    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    /// Claim the next sequence index for a transaction hash.
    pub fn next_transfer_seq(&mut self, tx: &TxHash) -> u32 {
        let seq = self.transfer_seqs.entry(tx.clone()).or_insert(0);
        let claimed = *seq;
        *seq += 1;
        claimed
    }

    /// Number of movements recorded so far for a transaction hash.
    #[must_use]
    pub fn recorded_transfers(&self, tx: &TxHash) -> u32 {
        self.transfer_seqs.get(tx).copied().unwrap_or(0)
    }

    // -- users -----------------------------------------------------------

    #[must_use]
    pub fn user(&self, address: &Address) -> Option<&User> {
        self.users.get(address)
    }

    /// Load-or-create the registry entry for an address.
    pub fn ensure_user(&mut self, address: Address) -> &User {
        self.users.entry(address).or_insert_with(|| User::new(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagepass_types::{TokenId, TokenKind, keys};

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address(bytes)
    }

    fn seed_balance(store: &mut StateStore, token: &str, owner: Address, owned: u32) {
        let key = format!("{token}-{owner}");
        store.save_balance(Balance {
            key,
            token: token.to_string(),
            kind: TokenKind::Ticket,
            event: Some("e0x0".into()),
            owner,
            amount_owned: owned,
            amount_on_sell: 0,
            asking_price: None,
            is_event_owner: false,
        });
    }

    #[test]
    fn save_load_remove_token() {
        let mut store = StateStore::new();
        let token = Token::placeholder(TokenKind::Ticket, TokenId(1));
        let key = token.key.clone();
        store.save_token(token);
        assert!(store.token(&key).is_some());
        assert!(store.remove_token(&key).is_some());
        assert!(store.token(&key).is_none());
        assert!(store.remove_token(&key).is_none());
    }

    #[test]
    fn save_replaces_wholesale() {
        let mut store = StateStore::new();
        let mut token = Token::placeholder(TokenKind::Ticket, TokenId(1));
        store.save_token(token.clone());
        token.total_amount = 50;
        store.save_token(token);
        assert_eq!(store.token("tt0x1").map(|t| t.total_amount), Some(50));
    }

    #[test]
    fn token_supply_sums_per_token() {
        let mut store = StateStore::new();
        let t = keys::token_key(TokenKind::Ticket, TokenId(1));
        seed_balance(&mut store, &t, addr(1), 5);
        seed_balance(&mut store, &t, addr(2), 3);
        seed_balance(&mut store, "tt0x9", addr(3), 100);
        assert_eq!(store.token_supply(&t), 8);
    }

    #[test]
    fn transfer_seq_increments_per_tx() {
        let mut store = StateStore::new();
        let a = TxHash::new("0xaaaa");
        let b = TxHash::new("0xbbbb");
        assert_eq!(store.next_transfer_seq(&a), 0);
        assert_eq!(store.next_transfer_seq(&a), 1);
        assert_eq!(store.next_transfer_seq(&b), 0);
        assert_eq!(store.recorded_transfers(&a), 2);
        assert_eq!(store.recorded_transfers(&b), 1);
    }

    #[test]
    fn ensure_user_is_idempotent() {
        let mut store = StateStore::new();
        let a = addr(9);
        store.ensure_user(a);
        store.ensure_user(a);
        assert_eq!(store.user(&a), Some(&User::new(a)));
    }
}
