//! Deterministic aggregate-key derivation.
//!
//! Every aggregate is addressed by a string key derived purely from upstream
//! identifiers. Keys are stable under replay and collision-free across token
//! kinds: each kind contributes its own prefix, so ticket `0x1` and
//! membership `0x1` never share a key.

use crate::constants::EVENT_KEY_PREFIX;
use crate::ids::{Address, AllowanceId, EventId, TokenId, TokenKind, TxHash};

/// Key of a token aggregate: `tt0x1f` / `mb0x1f`.
#[must_use]
pub fn token_key(kind: TokenKind, id: TokenId) -> String {
    format!("{}{}", kind.token_prefix(), id)
}

/// Key of an event container: `e0x1f`.
#[must_use]
pub fn event_key(id: EventId) -> String {
    format!("{EVENT_KEY_PREFIX}{id}")
}

/// Key of a balance aggregate: `<token_key>-<owner>`.
#[must_use]
pub fn balance_key(kind: TokenKind, id: TokenId, owner: &Address) -> String {
    format!("{}-{owner}", token_key(kind, id))
}

/// Key of an allowance aggregate: `ta-0x1f` / `ma-0x1f`.
#[must_use]
pub fn allowance_key(kind: TokenKind, id: AllowanceId) -> String {
    format!("{}-{id}", kind.allowance_prefix())
}

/// Key of a restriction entry: `<ticket_key>-<contract>`.
/// Restrictions only exist on tickets.
#[must_use]
pub fn restriction_key(ticket_id: TokenId, contract: &Address) -> String {
    format!("{}-{contract}", token_key(TokenKind::Ticket, ticket_id))
}

/// Key of a reservation: `<ticket_key>-<owner>-<buyer>`.
#[must_use]
pub fn reservation_key(ticket_id: TokenId, owner: &Address, buyer: &Address) -> String {
    format!(
        "{}-{owner}-{buyer}",
        token_key(TokenKind::Ticket, ticket_id)
    )
}

/// Key of a transfer history record: `<tx>-<seq>`.
///
/// The sequence index distinguishes the individual movements of a batched
/// transfer sharing one transaction hash.
#[must_use]
pub fn transfer_key(tx: &TxHash, seq: u32) -> String {
    format!("{tx}-{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address(bytes)
    }

    #[test]
    fn token_keys_carry_kind_prefix() {
        assert_eq!(token_key(TokenKind::Ticket, TokenId(1)), "tt0x1");
        assert_eq!(token_key(TokenKind::Membership, TokenId(1)), "mb0x1");
    }

    #[test]
    fn kinds_never_collide() {
        let id = TokenId(42);
        let owner = addr(7);
        assert_ne!(
            token_key(TokenKind::Ticket, id),
            token_key(TokenKind::Membership, id)
        );
        assert_ne!(
            balance_key(TokenKind::Ticket, id, &owner),
            balance_key(TokenKind::Membership, id, &owner)
        );
        assert_ne!(
            allowance_key(TokenKind::Ticket, AllowanceId(42)),
            allowance_key(TokenKind::Membership, AllowanceId(42))
        );
    }

    #[test]
    fn balance_key_is_idempotent() {
        let owner = addr(0x8f);
        let a = balance_key(TokenKind::Ticket, TokenId(0), &owner);
        let b = balance_key(TokenKind::Ticket, TokenId(0), &owner);
        assert_eq!(a, b);
        assert!(a.starts_with("tt0x0-0x"));
    }

    #[test]
    fn event_key_shape() {
        assert_eq!(event_key(EventId(0)), "e0x0");
        assert_eq!(event_key(EventId(31)), "e0x1f");
    }

    #[test]
    fn allowance_key_shape() {
        assert_eq!(allowance_key(TokenKind::Ticket, AllowanceId(1)), "ta-0x1");
        assert_eq!(
            allowance_key(TokenKind::Membership, AllowanceId(1)),
            "ma-0x1"
        );
    }

    #[test]
    fn reservation_key_contains_both_parties() {
        let owner = addr(1);
        let buyer = addr(2);
        let key = reservation_key(TokenId(1), &owner, &buyer);
        assert!(key.contains(&owner.to_string()));
        assert!(key.contains(&buyer.to_string()));
        assert_ne!(key, reservation_key(TokenId(1), &buyer, &owner));
    }

    #[test]
    fn transfer_keys_distinguish_batch_legs() {
        let tx = TxHash::new("0xfeed");
        assert_eq!(transfer_key(&tx, 0), "0xfeed-0");
        assert_ne!(transfer_key(&tx, 0), transfer_key(&tx, 1));
    }
}
