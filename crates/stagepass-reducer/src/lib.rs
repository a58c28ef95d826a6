//! # stagepass-reducer
//!
//! The top of the pipeline: a [`Reducer`] takes one typed
//! [`ChainEvent`](stagepass_types::ChainEvent) at a time and projects it
//! onto the aggregate state, routing through the ledger components.
//!
//! Handlers are grouped by emitting plane:
//!
//! - [`admin`]: event containers, collaborators, restrictions, bookings
//! - [`marketplace`]: publish/edit/delete, sales, asks, allowances
//! - [`movements`]: raw token transfers (single and batch)
//!
//! A rejected event is logged and skipped; it never rolls back previously
//! committed state and never halts the stream.

mod admin;
mod marketplace;
mod movements;
pub mod reducer;

pub use reducer::Reducer;
