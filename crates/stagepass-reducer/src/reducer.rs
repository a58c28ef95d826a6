//! Event dispatch.

use tracing::{debug, error, info};

use stagepass_state::{MetadataConfig, MetadataResolver, StateStore};
use stagepass_types::{
    ChainEvent, Result,
    constants::{ENGINE_NAME, VERSION},
};

use crate::{admin, marketplace, movements};

/// Projects a stream of domain events onto aggregate state.
///
/// Single-writer by construction: `apply` takes `&mut self`, events commit
/// in arrival order, and no mutation survives a handler error (handlers
/// validate every read before their first write).
pub struct Reducer<R: MetadataResolver> {
    store: StateStore,
    resolver: R,
    metadata_cfg: MetadataConfig,
}

impl<R: MetadataResolver> Reducer<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_metadata_config(resolver, MetadataConfig::default())
    }

    pub fn with_metadata_config(resolver: R, metadata_cfg: MetadataConfig) -> Self {
        info!(engine = ENGINE_NAME, version = VERSION, "reducer initialized");
        Self {
            store: StateStore::new(),
            resolver,
            metadata_cfg,
        }
    }

    /// The projected state, for queries.
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> StateStore {
        self.store
    }

    /// Apply one event. On rejection the error is logged under the
    /// handler's label and returned; committed state is untouched.
    pub fn apply(&mut self, event: ChainEvent) -> Result<()> {
        let label = event.label();
        debug!(handler = label, "applying event");
        let outcome = self.dispatch(event);
        if let Err(err) = &outcome {
            error!(handler = label, error = %err, "event rejected");
        }
        outcome
    }

    /// Apply a whole stream, skipping rejected events. Returns how many
    /// committed.
    pub fn apply_all<I: IntoIterator<Item = ChainEvent>>(&mut self, events: I) -> usize {
        let mut applied = 0;
        for event in events {
            if self.apply(event).is_ok() {
                applied += 1;
            }
        }
        applied
    }

    fn dispatch(&mut self, event: ChainEvent) -> Result<()> {
        let store = &mut self.store;
        let resolver = &self.resolver;
        let cfg = &self.metadata_cfg;
        match event {
            // Admin plane
            ChainEvent::EventCreated(p) => admin::event_created(store, resolver, cfg, p),
            ChainEvent::EventEdited(p) => admin::event_edited(store, resolver, cfg, p),
            ChainEvent::EventDeleted(p) => admin::event_deleted(store, p),
            ChainEvent::EventOwnershipTransferred(p) => admin::event_ownership_transferred(store, p),
            ChainEvent::EventRoyaltyModified(p) => admin::event_royalty_modified(store, p),
            ChainEvent::EventPaused(p) => admin::event_paused(store, p),
            ChainEvent::CollaboratorAdded(p) => admin::collaborator_added(store, p),
            ChainEvent::CollaboratorRemoved(p) => admin::collaborator_removed(store, p),
            ChainEvent::MembershipAssigned(p) => admin::membership_assigned(store, p),
            ChainEvent::MembershipTokenIdRevoked(p) => admin::membership_token_id_revoked(store, p),
            ChainEvent::MembershipRevoked(p) => admin::membership_revoked(store, p),
            ChainEvent::TicketBooked(p) => admin::ticket_booked(store, p),
            ChainEvent::BookingCancelled(p) => admin::booking_cancelled(store, p),
            ChainEvent::BookingFulfilled(p) => admin::booking_fulfilled(store, p),
            // Marketplace plane
            ChainEvent::TokenPublished(p) => marketplace::token_published(store, resolver, cfg, p),
            ChainEvent::TokenEdited(p) => marketplace::token_edited(store, resolver, cfg, p),
            ChainEvent::TokensDeleted(p) => marketplace::tokens_deleted(store, p),
            ChainEvent::TokenRoyaltyModified(p) => marketplace::token_royalty_modified(store, p),
            ChainEvent::TokenBought(p) => marketplace::token_bought(store, p),
            ChainEvent::AskSet(p) => marketplace::ask_set(store, p),
            ChainEvent::AskRemoved(p) => marketplace::ask_removed(store, p),
            ChainEvent::AllowanceAdded(p) => marketplace::allowance_added(store, p),
            ChainEvent::AllowanceConsumed(p) => marketplace::allowance_consumed(store, p),
            ChainEvent::AllowanceRemoved(p) => marketplace::allowance_removed(store, p),
            // Token plane
            ChainEvent::TransferSingle(p) => movements::transfer_single(store, p),
            ChainEvent::TransferBatch(p) => movements::transfer_batch(store, p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagepass_state::NullResolver;
    use stagepass_types::{Address, EventCreated, EventDeleted, EventId, ParseStatus};

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address(bytes)
    }

    #[test]
    fn rejected_event_leaves_state_untouched() {
        let mut reducer = Reducer::new(NullResolver);
        let err = reducer
            .apply(ChainEvent::EventDeleted(EventDeleted { event_id: EventId(1) }))
            .unwrap_err();
        assert!(matches!(err, stagepass_types::IndexError::EventNotFound(_)));
        assert!(reducer.store().event("e0x1").is_none());
    }

    #[test]
    fn apply_all_skips_rejections_and_counts_commits() {
        let mut reducer = Reducer::new(NullResolver);
        let applied = reducer.apply_all(vec![
            ChainEvent::EventDeleted(EventDeleted { event_id: EventId(1) }),
            ChainEvent::EventCreated(EventCreated {
                event_id: EventId(1),
                organizer: addr(1),
                uri: "ipfs://missing".into(),
            }),
        ]);
        assert_eq!(applied, 1);
        // created despite unresolvable metadata, with degraded status
        let event = reducer.store().event("e0x1").unwrap();
        assert_eq!(event.parse_status, ParseStatus::Failed);
    }
}
