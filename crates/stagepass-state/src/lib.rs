//! # stagepass-state
//!
//! **Persistence plane**: the aggregate state store and the metadata
//! resolver seam.
//!
//! The [`StateStore`] is the source of truth for all derived state. It is
//! synchronous and immediately consistent — the processing model is strictly
//! single-threaded, one event at a time, so no locking is needed. The maps
//! here stand in for the host's durable storage with the same
//! load/save/remove contract.
//!
//! Metadata documents live behind the [`MetadataResolver`] trait: the core
//! never fetches anything itself, and a resolver failure only degrades an
//! entity's parse status.

pub mod metadata;
pub mod store;

pub use metadata::{FixtureResolver, MetadataConfig, MetadataResolver, NullResolver};
pub use store::StateStore;
