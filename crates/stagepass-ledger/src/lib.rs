//! # stagepass-ledger
//!
//! **Mutation plane**: the components that turn validated event payloads
//! into aggregate mutations.
//!
//! 1. **[`BalanceLedger`]**: per-(token, owner) holdings — credit, debit,
//!    ask lifecycle, removal-on-zero
//! 2. **[`AllowanceStore`]**: allowance grants/consumption and membership
//!    restrictions on tickets
//! 3. **[`CascadeRunner`]**: ownership and royalty propagation across an
//!    event's dependents, two-phase (validate every target, then write)
//! 4. **[`ReservationTracker`]**: booking holds, independent of the
//!    balance-transfer path
//! 5. **[`TransferRecorder`]**: the `(tx, seq)`-keyed movement history
//!
//! Every operation validates its reads before the first write, so a failed
//! operation leaves the store exactly as it found it.

pub mod allowances;
pub mod balances;
pub mod cascade;
pub mod reservations;
pub mod transfers;

pub use allowances::AllowanceStore;
pub use balances::BalanceLedger;
pub use cascade::CascadeRunner;
pub use reservations::ReservationTracker;
pub use transfers::TransferRecorder;
