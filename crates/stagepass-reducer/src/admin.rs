//! Admin-plane handlers: event containers, collaborators, membership
//! restrictions on tickets, and booking holds.

use stagepass_ledger::{AllowanceStore, CascadeRunner, ReservationTracker};
use stagepass_state::{
    MetadataConfig, MetadataResolver, StateStore, metadata::parse_event_metadata,
};
use stagepass_types::{
    BookingCancelled, BookingFulfilled, CollaboratorAdded, CollaboratorRemoved, Event,
    EventCreated, EventDeleted, EventEdited, EventOwnershipTransferred, EventPaused,
    EventRoyaltyModified, IndexError, MembershipAssigned, MembershipRevoked,
    MembershipTokenIdRevoked, Result, TicketBooked, keys,
};

/// Create (or recreate) an event container. Unresolvable metadata degrades
/// the parse status but still commits the container.
pub(crate) fn event_created<R: MetadataResolver>(
    store: &mut StateStore,
    resolver: &R,
    cfg: &MetadataConfig,
    p: EventCreated,
) -> Result<()> {
    store.ensure_user(p.organizer);
    let ekey = keys::event_key(p.event_id);
    let mut event = store
        .remove_event(&ekey)
        .unwrap_or_else(|| Event::new(p.event_id, p.organizer));
    event.organizer = p.organizer;
    event.metadata_uri = Some(p.uri.clone());
    parse_event_metadata(resolver, cfg, &p.uri, &mut event);
    store.save_event(event);
    Ok(())
}

/// Point the container at a new metadata document. The URI is stored even
/// when the document fails to resolve; the stale attributes stay and the
/// parse status says so.
pub(crate) fn event_edited<R: MetadataResolver>(
    store: &mut StateStore,
    resolver: &R,
    cfg: &MetadataConfig,
    p: EventEdited,
) -> Result<()> {
    let ekey = keys::event_key(p.event_id);
    let event = store
        .event_mut(&ekey)
        .ok_or_else(|| IndexError::EventNotFound(ekey.clone()))?;
    event.metadata_uri = Some(p.new_uri.clone());
    parse_event_metadata(resolver, cfg, &p.new_uri, event);
    Ok(())
}

/// Remove the container. Tokens and balances published under it stay; only
/// the grouping disappears.
pub(crate) fn event_deleted(store: &mut StateStore, p: EventDeleted) -> Result<()> {
    let ekey = keys::event_key(p.event_id);
    store
        .remove_event(&ekey)
        .ok_or(IndexError::EventNotFound(ekey))?;
    Ok(())
}

pub(crate) fn event_ownership_transferred(
    store: &mut StateStore,
    p: EventOwnershipTransferred,
) -> Result<()> {
    CascadeRunner::new(store).transfer_ownership(p.event_id, p.new_owner)
}

pub(crate) fn event_royalty_modified(
    store: &mut StateStore,
    p: EventRoyaltyModified,
) -> Result<()> {
    CascadeRunner::new(store).modify_royalty(p.event_id, p.new_royalty)
}

pub(crate) fn event_paused(store: &mut StateStore, p: EventPaused) -> Result<()> {
    let ekey = keys::event_key(p.event_id);
    let event = store
        .event_mut(&ekey)
        .ok_or(IndexError::EventNotFound(ekey))?;
    event.paused = p.paused;
    Ok(())
}

pub(crate) fn collaborator_added(store: &mut StateStore, p: CollaboratorAdded) -> Result<()> {
    store.ensure_user(p.collaborator);
    let ekey = keys::event_key(p.event_id);
    let event = store
        .event_mut(&ekey)
        .ok_or(IndexError::EventNotFound(ekey))?;
    if !event.collaborators.contains(&p.collaborator) {
        event.collaborators.push(p.collaborator);
    }
    Ok(())
}

pub(crate) fn collaborator_removed(store: &mut StateStore, p: CollaboratorRemoved) -> Result<()> {
    let ekey = keys::event_key(p.event_id);
    let event = store
        .event_mut(&ekey)
        .ok_or(IndexError::EventNotFound(ekey))?;
    event.collaborators.retain(|c| c != &p.collaborator);
    Ok(())
}

pub(crate) fn membership_assigned(store: &mut StateStore, p: MembershipAssigned) -> Result<()> {
    AllowanceStore::new(store).assign_restriction(p.ticket_id, p.contract, p.token_ids)
}

pub(crate) fn membership_token_id_revoked(
    store: &mut StateStore,
    p: MembershipTokenIdRevoked,
) -> Result<()> {
    AllowanceStore::new(store).revoke_restriction_token(p.ticket_id, &p.contract, p.token_id)
}

pub(crate) fn membership_revoked(store: &mut StateStore, p: MembershipRevoked) -> Result<()> {
    AllowanceStore::new(store).revoke_restriction(p.ticket_id, &p.contract)
}

pub(crate) fn ticket_booked(store: &mut StateStore, p: TicketBooked) -> Result<()> {
    store.ensure_user(p.buyer);
    ReservationTracker::new(store).book(p.ticket_id, p.owner, p.buyer, p.amount)
}

pub(crate) fn booking_cancelled(store: &mut StateStore, p: BookingCancelled) -> Result<()> {
    ReservationTracker::new(store).cancel(p.ticket_id, &p.owner, &p.buyer)
}

pub(crate) fn booking_fulfilled(store: &mut StateStore, p: BookingFulfilled) -> Result<()> {
    ReservationTracker::new(store).fulfil(p.ticket_id, &p.owner, &p.buyer)
}
