//! Transfer history records.
//!
//! One record per economically distinct movement. Batched movements share a
//! transaction hash but each leg gets its own sequence index, so a batch
//! never collapses into a single overwritten record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{Address, TxHash};

/// A recorded value movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    /// `<tx>-<seq>`.
    pub key: String,
    pub tx: TxHash,
    /// Index of this movement within its transaction.
    pub seq: u32,
    /// Key of the moved token.
    pub token: String,
    /// Key of the owning event container, when the token has one.
    pub event: Option<String>,
    pub sender: Address,
    /// Balance key the movement debited.
    pub sender_balance: String,
    pub receiver: Address,
    /// Balance key the movement credited.
    pub receiver_balance: String,
    pub amount: u32,
    /// Set only when the movement is a marketplace sale.
    pub is_sale: bool,
    /// Sale price; set together with `is_sale`.
    pub price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// The recorder's input: everything but the key fields it derives itself.
#[derive(Debug, Clone)]
pub struct TransferDraft {
    pub token: String,
    pub event: Option<String>,
    pub sender: Address,
    pub sender_balance: String,
    pub receiver: Address,
    pub receiver_balance: String,
    pub amount: u32,
    pub created_at: DateTime<Utc>,
}
