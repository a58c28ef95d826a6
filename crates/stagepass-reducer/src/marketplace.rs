//! Marketplace-plane handlers: token publish/edit/delete, royalty edits,
//! sales, asks, and allowances. Tickets and memberships share every
//! handler; the kind only decides key prefixes and event linkage.

use stagepass_ledger::{AllowanceStore, BalanceLedger, TransferRecorder};
use stagepass_state::{
    MetadataConfig, MetadataResolver, StateStore, metadata::parse_token_metadata,
};
use stagepass_types::{
    AllowanceAdded, AllowanceConsumed, AllowanceRemoved, AskRemoved, AskSet, Balance, IndexError,
    Result, Token, TokenBought, TokenEdited, TokenKind, TokenPublished, TokenRoyaltyModified,
    TokensDeleted, keys,
};

/// Publish a token: fill in (or create) the token aggregate and mint the
/// organizer's opening balance with the initial listing.
///
/// A placeholder left by an early allowance grant or restriction assignment
/// is filled in, keeping its accumulated lists. Unresolvable metadata
/// degrades the parse status and still commits.
///
/// # Errors
/// `Internal` for a ticket without an owning event id, `EventNotFound` for
/// an unknown owning event, `BalanceAlreadyExists` for a republish of a
/// token whose opening balance is still live.
pub(crate) fn token_published<R: MetadataResolver>(
    store: &mut StateStore,
    resolver: &R,
    cfg: &MetadataConfig,
    p: TokenPublished,
) -> Result<()> {
    let tkey = keys::token_key(p.kind, p.token_id);
    let event_key = match (p.kind, p.event_id) {
        (TokenKind::Ticket, Some(event_id)) => {
            let ekey = keys::event_key(event_id);
            if store.event(&ekey).is_none() {
                return Err(IndexError::EventNotFound(ekey));
            }
            Some(ekey)
        }
        (TokenKind::Ticket, None) => {
            return Err(IndexError::Internal(format!(
                "ticket {tkey} published without an owning event"
            )));
        }
        (TokenKind::Membership, _) => None,
    };
    let bkey = keys::balance_key(p.kind, p.token_id, &p.organizer);
    if store.balance(&bkey).is_some() {
        return Err(IndexError::BalanceAlreadyExists(bkey));
    }

    store.ensure_user(p.organizer);
    let mut token = store
        .remove_token(&tkey)
        .unwrap_or_else(|| Token::placeholder(p.kind, p.token_id));
    token.event = event_key.clone();
    token.organizer = Some(p.organizer);
    token.creator_royalty = p.sale_info.royalty;
    token.is_resellable = p.sale_info.is_resellable;
    token.is_private = p.sale_info.is_private;
    token.total_amount = p.amount;
    token.metadata_uri = Some(p.uri.clone());
    parse_token_metadata(resolver, cfg, &p.uri, &mut token);
    store.save_token(token);

    // a republish after a full sell-off must not stack list entries
    if let Some(ekey) = &event_key {
        if let Some(event) = store.event_mut(ekey) {
            if !event.tickets.contains(&tkey) {
                event.tickets.push(tkey.clone());
            }
            if !event.balances.contains(&bkey) {
                event.balances.push(bkey.clone());
            }
        }
    }
    store.save_balance(Balance {
        key: bkey,
        token: tkey,
        kind: p.kind,
        event: event_key,
        owner: p.organizer,
        amount_owned: p.amount,
        amount_on_sell: p.sale_info.amount_to_sell,
        asking_price: Some(p.sale_info.price),
        is_event_owner: true,
    });
    Ok(())
}

/// Point a token at a new metadata document. Unlike an event edit, a token
/// edit only lands when the new document parses; otherwise the stored
/// token is untouched and the edit is rejected.
pub(crate) fn token_edited<R: MetadataResolver>(
    store: &mut StateStore,
    resolver: &R,
    cfg: &MetadataConfig,
    p: TokenEdited,
) -> Result<()> {
    let tkey = keys::token_key(p.kind, p.token_id);
    let existing = store
        .token(&tkey)
        .ok_or_else(|| IndexError::TokenNotFound(tkey.clone()))?;
    let mut updated = existing.clone();
    if !parse_token_metadata(resolver, cfg, &p.new_uri, &mut updated) {
        return Err(IndexError::MetadataParseFailure { uri: p.new_uri });
    }
    updated.metadata_uri = Some(p.new_uri);
    store.save_token(updated);
    Ok(())
}

/// Burn token units from one owner, one debit per id. Aborts on the first
/// failing debit; earlier debits in the batch stay committed, matching the
/// per-movement granularity of the source events.
pub(crate) fn tokens_deleted(store: &mut StateStore, p: TokensDeleted) -> Result<()> {
    if p.ids.len() != p.amounts.len() {
        return Err(IndexError::Internal(format!(
            "deletion batch mismatch: {} ids, {} amounts",
            p.ids.len(),
            p.amounts.len()
        )));
    }
    let mut ledger = BalanceLedger::new(store);
    for (id, amount) in p.ids.iter().zip(&p.amounts) {
        ledger.debit(p.kind, *id, &p.owner, *amount)?;
    }
    Ok(())
}

pub(crate) fn token_royalty_modified(
    store: &mut StateStore,
    p: TokenRoyaltyModified,
) -> Result<()> {
    let tkey = keys::token_key(p.kind, p.token_id);
    let token = store
        .token_mut(&tkey)
        .ok_or(IndexError::TokenNotFound(tkey))?;
    token.creator_royalty = p.new_royalty;
    Ok(())
}

/// A marketplace purchase: consume the seller's listing and flag the
/// transaction's latest movement as a sale at the paid price. The movement
/// itself arrived as the transfer event preceding this one in the same
/// transaction; a purchase with no recorded movement is rejected up front,
/// before the listing is touched.
pub(crate) fn token_bought(store: &mut StateStore, p: TokenBought) -> Result<()> {
    if store.recorded_transfers(&p.tx) == 0 {
        return Err(IndexError::TransferNotFound(p.tx.as_str().to_string()));
    }
    store.ensure_user(p.buyer);
    BalanceLedger::new(store).consume_ask(p.kind, p.token_id, &p.seller, p.amount)?;
    TransferRecorder::new(store).mark_sale(&p.tx, p.price)
}

pub(crate) fn ask_set(store: &mut StateStore, p: AskSet) -> Result<()> {
    BalanceLedger::new(store).set_ask(p.kind, p.token_id, &p.seller, p.amount, p.price)
}

pub(crate) fn ask_removed(store: &mut StateStore, p: AskRemoved) -> Result<()> {
    BalanceLedger::new(store).clear_ask(p.kind, p.token_id, &p.seller)
}

pub(crate) fn allowance_added(store: &mut StateStore, p: AllowanceAdded) -> Result<()> {
    AllowanceStore::new(store).grant(
        p.kind,
        p.token_id,
        p.allowance_id,
        p.amount,
        p.allowed_addresses,
    )
}

pub(crate) fn allowance_consumed(store: &mut StateStore, p: AllowanceConsumed) -> Result<()> {
    AllowanceStore::new(store).consume(p.kind, p.allowance_id)
}

pub(crate) fn allowance_removed(store: &mut StateStore, p: AllowanceRemoved) -> Result<()> {
    AllowanceStore::new(store).remove(p.kind, p.token_id, p.allowance_id)
}
