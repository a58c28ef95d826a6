//! # stagepass-types
//!
//! Shared types, errors, and key derivation for the **stagepass** indexer.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`TokenId`], [`EventId`], [`AllowanceId`], [`TxHash`], [`TokenKind`]
//! - **Key derivation**: deterministic aggregate keys in [`keys`]
//! - **Aggregates**: [`Token`], [`Event`], [`Balance`], [`Allowance`], [`Restriction`], [`Reservation`], [`Transfer`], [`User`]
//! - **Incoming events**: the [`ChainEvent`] enum with typed payloads
//! - **Errors**: [`IndexError`] with `SP_ERR_` prefix codes
//! - **Constants**: key prefixes and marketplace defaults

pub mod allowance;
pub mod balance;
pub mod chain;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod keys;
pub mod reservation;
pub mod token;
pub mod transfer;
pub mod user;

// Re-export all primary types at crate root for ergonomic imports:
//   use stagepass_types::{Balance, ChainEvent, IndexError, ...};

pub use allowance::*;
pub use balance::*;
pub use chain::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use reservation::*;
pub use token::*;
pub use transfer::*;
pub use user::*;

// Key derivation is accessed via `stagepass_types::keys::balance_key(..)`
// (not re-exported — the module path reads better at call sites).
