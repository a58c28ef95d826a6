//! Error types for the stagepass indexer.
//!
//! All errors use the `SP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Missing / duplicate aggregates
//! - 2xx: Quantity errors (insufficient owned / listed / remaining)
//! - 3xx: Metadata errors
//! - 9xx: General / internal errors
//!
//! A handler-level error always means the offending event was skipped and
//! previously committed state is untouched; nothing here is fatal to the
//! indexing process.

use thiserror::Error;

/// Central error enum for all indexer operations.
#[derive(Debug, Error)]
pub enum IndexError {
    // =================================================================
    // Missing / duplicate aggregates (1xx)
    // =================================================================
    /// The referenced event container does not exist.
    #[error("SP_ERR_100: event not found: {0}")]
    EventNotFound(String),

    /// The referenced token (ticket or membership) does not exist.
    #[error("SP_ERR_101: token not found: {0}")]
    TokenNotFound(String),

    /// The referenced balance does not exist.
    #[error("SP_ERR_102: balance not found: {0}")]
    BalanceNotFound(String),

    /// The referenced allowance does not exist (or is not listed on the
    /// owning token).
    #[error("SP_ERR_103: allowance not found: {0}")]
    AllowanceNotFound(String),

    /// The referenced restriction entry does not exist.
    #[error("SP_ERR_104: restriction not found: {0}")]
    RestrictionNotFound(String),

    /// The referenced reservation does not exist.
    #[error("SP_ERR_105: reservation not found: {0}")]
    ReservationNotFound(String),

    /// No transfer has been recorded for the transaction yet.
    #[error("SP_ERR_106: no transfer recorded for tx: {0}")]
    TransferNotFound(String),

    /// A publish event hit an already-existing balance.
    #[error("SP_ERR_110: balance already exists: {0}")]
    BalanceAlreadyExists(String),

    // =================================================================
    // Quantity errors (2xx)
    // =================================================================
    /// A debit exceeds the amount the owner actually holds.
    #[error("SP_ERR_200: insufficient balance on {key}: need {needed}, have {available}")]
    InsufficientBalance {
        key: String,
        needed: u32,
        available: u32,
    },

    /// A sale consumes more than the seller has listed.
    #[error("SP_ERR_201: insufficient listed amount on {key}: need {needed}, listed {listed}")]
    InsufficientListed {
        key: String,
        needed: u32,
        listed: u32,
    },

    /// A consumption hit an allowance with nothing remaining. The remaining
    /// amount never goes negative; the anomaly is reported instead.
    #[error("SP_ERR_202: allowance exhausted: {0}")]
    AllowanceExhausted(String),

    // =================================================================
    // Metadata errors (3xx)
    // =================================================================
    /// The metadata document could not be resolved or parsed. Degrades the
    /// entity's parse status; never aborts the surrounding ledger mutation.
    #[error("SP_ERR_300: metadata parse failure for uri: {uri}")]
    MetadataParseFailure { uri: String },

    // =================================================================
    // General / internal (9xx)
    // =================================================================
    /// An address literal from upstream failed validation. Should not occur
    /// for well-formed events; treated as fatal by the caller.
    #[error("SP_ERR_900: invalid address literal: {0}")]
    InvalidAddress(String),

    /// Unrecoverable internal error.
    #[error("SP_ERR_901: internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, IndexError>;
