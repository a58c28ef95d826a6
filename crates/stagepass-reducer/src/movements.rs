//! Token-plane handlers: raw single and batch transfers.
//!
//! Every leg runs the same sequence: validate the sender's holding, credit
//! the receiver, append the history record, then debit the sender. The
//! guard up front means the debit cannot fail after the credit, so a leg
//! either commits whole or not at all. Legs touching the zero address are
//! mints and burns; the publish and deletion events own those balance
//! changes, so the legs are skipped here.

use chrono::{DateTime, Utc};
use tracing::debug;

use stagepass_ledger::{BalanceLedger, TransferRecorder};
use stagepass_state::StateStore;
use stagepass_types::{
    Address, IndexError, Result, TokenId, TokenKind, TransferBatch, TransferDraft, TransferSingle,
    TxHash, keys,
};

pub(crate) fn transfer_single(store: &mut StateStore, p: TransferSingle) -> Result<()> {
    transfer_leg(
        store, p.kind, p.token_id, &p.from, &p.to, p.amount, &p.tx, p.timestamp,
    )
}

/// A batch is its legs, in order, under one transaction hash; each leg gets
/// its own sequence index and history record. A failing leg stops the
/// batch; earlier legs stay committed.
pub(crate) fn transfer_batch(store: &mut StateStore, p: TransferBatch) -> Result<()> {
    if p.ids.len() != p.amounts.len() {
        return Err(IndexError::Internal(format!(
            "transfer batch mismatch: {} ids, {} amounts",
            p.ids.len(),
            p.amounts.len()
        )));
    }
    for (id, amount) in p.ids.iter().zip(&p.amounts) {
        transfer_leg(
            store, p.kind, *id, &p.from, &p.to, *amount, &p.tx, p.timestamp,
        )?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn transfer_leg(
    store: &mut StateStore,
    kind: TokenKind,
    token_id: TokenId,
    from: &Address,
    to: &Address,
    amount: u32,
    tx: &TxHash,
    at: DateTime<Utc>,
) -> Result<()> {
    if from.is_zero() || to.is_zero() {
        debug!(tx = tx.as_str(), "mint/burn leg skipped");
        return Ok(());
    }

    let token_key = keys::token_key(kind, token_id);
    let sender_key = keys::balance_key(kind, token_id, from);
    let sender = store
        .balance(&sender_key)
        .ok_or_else(|| IndexError::BalanceNotFound(sender_key.clone()))?;
    if !sender.has_owned(amount) {
        return Err(IndexError::InsufficientBalance {
            key: sender_key,
            needed: amount,
            available: sender.amount_owned,
        });
    }
    let event = sender.event.clone();

    store.ensure_user(*from);
    store.ensure_user(*to);
    BalanceLedger::new(store).credit(kind, token_id, to, amount)?;
    let receiver_key = keys::balance_key(kind, token_id, to);
    TransferRecorder::new(store).record(
        tx,
        TransferDraft {
            token: token_key,
            event,
            sender: *from,
            sender_balance: sender_key.clone(),
            receiver: *to,
            receiver_balance: receiver_key,
            amount,
            created_at: at,
        },
    );
    BalanceLedger::new(store).debit(kind, token_id, from, amount)
}
