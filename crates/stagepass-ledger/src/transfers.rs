//! The transfer history.
//!
//! Every balance movement is recorded under `(tx, seq)`, where `seq` is the
//! per-transaction arrival index. Keying on the pair keeps every movement
//! of a batch addressable; keying on the hash alone would overwrite all but
//! the last leg.

use rust_decimal::Decimal;

use stagepass_state::StateStore;
use stagepass_types::{IndexError, Result, Transfer, TransferDraft, TxHash, keys};

/// Append-only movement history over the state store.
pub struct TransferRecorder<'a> {
    store: &'a mut StateStore,
}

impl<'a> TransferRecorder<'a> {
    pub fn new(store: &'a mut StateStore) -> Self {
        Self { store }
    }

    /// Append one movement under the transaction's next sequence index and
    /// return its key. The record starts as a plain transfer; a marketplace
    /// purchase in the same transaction upgrades it via [`Self::mark_sale`].
    pub fn record(&mut self, tx: &TxHash, draft: TransferDraft) -> String {
        let seq = self.store.next_transfer_seq(tx);
        let key = keys::transfer_key(tx, seq);
        self.store.save_transfer(Transfer {
            key: key.clone(),
            tx: tx.clone(),
            seq,
            token: draft.token,
            event: draft.event,
            sender: draft.sender,
            sender_balance: draft.sender_balance,
            receiver: draft.receiver,
            receiver_balance: draft.receiver_balance,
            amount: draft.amount,
            is_sale: false,
            price: None,
            created_at: draft.created_at,
        });
        key
    }

    /// Upgrade the transaction's latest movement to a sale at `price`.
    ///
    /// Purchase events trail the token transfer they pay for within the
    /// same transaction, so "latest recorded" is the leg the purchase
    /// belongs to.
    ///
    /// # Errors
    /// `TransferNotFound` when no movement has been recorded for `tx`.
    pub fn mark_sale(&mut self, tx: &TxHash, price: Decimal) -> Result<()> {
        let recorded = self.store.recorded_transfers(tx);
        if recorded == 0 {
            return Err(IndexError::TransferNotFound(tx.as_str().to_string()));
        }
        let key = keys::transfer_key(tx, recorded - 1);
        let transfer = self
            .store
            .transfer_mut(&key)
            .ok_or_else(|| IndexError::TransferNotFound(key.clone()))?;
        transfer.is_sale = true;
        transfer.price = Some(price);
        Ok(())
    }
}
