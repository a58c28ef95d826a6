//! Incoming domain events.
//!
//! The upstream source decodes raw logs into these typed payloads; the
//! reducer routes each [`ChainEvent`] variant to exactly one handler
//! sequence. Adding an event kind means adding a variant and a match arm —
//! the payload travels strongly typed end to end.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{Address, AllowanceId, EventId, TokenId, TokenKind, TxHash};

/// Sale terms attached to a publish event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInfo {
    pub price: Decimal,
    pub amount_to_sell: u32,
    /// Creator royalty in basis points.
    pub royalty: u32,
    pub is_resellable: bool,
    pub is_private: bool,
}

// ---------------------------------------------------------------------------
// Admin plane payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreated {
    pub event_id: EventId,
    pub organizer: Address,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEdited {
    pub event_id: EventId,
    pub new_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeleted {
    pub event_id: EventId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOwnershipTransferred {
    pub event_id: EventId,
    pub new_owner: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRoyaltyModified {
    pub event_id: EventId,
    /// New creator royalty in basis points, propagated to every ticket.
    pub new_royalty: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPaused {
    pub event_id: EventId,
    pub paused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorAdded {
    pub event_id: EventId,
    pub collaborator: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorRemoved {
    pub event_id: EventId,
    pub collaborator: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipAssigned {
    pub ticket_id: TokenId,
    /// The restricting membership contract.
    pub contract: Address,
    pub token_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipTokenIdRevoked {
    pub ticket_id: TokenId,
    pub contract: Address,
    pub token_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRevoked {
    pub ticket_id: TokenId,
    pub contract: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketBooked {
    pub ticket_id: TokenId,
    pub owner: Address,
    pub buyer: Address,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelled {
    pub ticket_id: TokenId,
    pub owner: Address,
    pub buyer: Address,
}

/// The booked units changed hands. Removes the hold only — the value
/// movement arrives as its own transfer event within the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingFulfilled {
    pub ticket_id: TokenId,
    pub owner: Address,
    pub buyer: Address,
}

// ---------------------------------------------------------------------------
// Marketplace plane payloads (tickets and memberships, symmetric)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPublished {
    pub kind: TokenKind,
    pub token_id: TokenId,
    /// Owning event. Required for tickets, absent for memberships.
    pub event_id: Option<EventId>,
    pub organizer: Address,
    pub uri: String,
    /// Total minted amount.
    pub amount: u32,
    pub sale_info: SaleInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEdited {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub new_uri: String,
}

/// Batch deletion of token units from one owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensDeleted {
    pub kind: TokenKind,
    pub owner: Address,
    pub ids: Vec<TokenId>,
    pub amounts: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRoyaltyModified {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub new_royalty: u32,
}

/// A marketplace sale. The paired transfer event in the same transaction
/// moves the units; this event consumes the listing and flags the history
/// record as a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBought {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub seller: Address,
    pub buyer: Address,
    pub amount: u32,
    pub price: Decimal,
    pub tx: TxHash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskSet {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub seller: Address,
    pub amount: u32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRemoved {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub seller: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceAdded {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub allowance_id: AllowanceId,
    pub amount: u32,
    pub allowed_addresses: Vec<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceConsumed {
    pub kind: TokenKind,
    pub allowance_id: AllowanceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceRemoved {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub allowance_id: AllowanceId,
}

// ---------------------------------------------------------------------------
// Token plane payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSingle {
    pub kind: TokenKind,
    pub token_id: TokenId,
    pub from: Address,
    pub to: Address,
    pub amount: u32,
    pub tx: TxHash,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferBatch {
    pub kind: TokenKind,
    pub from: Address,
    pub to: Address,
    pub ids: Vec<TokenId>,
    pub amounts: Vec<u32>,
    pub tx: TxHash,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// The event enum
// ---------------------------------------------------------------------------

/// One incoming event, tagged by kind with its typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChainEvent {
    // Admin plane
    EventCreated(EventCreated),
    EventEdited(EventEdited),
    EventDeleted(EventDeleted),
    EventOwnershipTransferred(EventOwnershipTransferred),
    EventRoyaltyModified(EventRoyaltyModified),
    EventPaused(EventPaused),
    CollaboratorAdded(CollaboratorAdded),
    CollaboratorRemoved(CollaboratorRemoved),
    MembershipAssigned(MembershipAssigned),
    MembershipTokenIdRevoked(MembershipTokenIdRevoked),
    MembershipRevoked(MembershipRevoked),
    TicketBooked(TicketBooked),
    BookingCancelled(BookingCancelled),
    BookingFulfilled(BookingFulfilled),
    // Marketplace plane
    TokenPublished(TokenPublished),
    TokenEdited(TokenEdited),
    TokensDeleted(TokensDeleted),
    TokenRoyaltyModified(TokenRoyaltyModified),
    TokenBought(TokenBought),
    AskSet(AskSet),
    AskRemoved(AskRemoved),
    AllowanceAdded(AllowanceAdded),
    AllowanceConsumed(AllowanceConsumed),
    AllowanceRemoved(AllowanceRemoved),
    // Token plane
    TransferSingle(TransferSingle),
    TransferBatch(TransferBatch),
}

impl ChainEvent {
    /// Stable handler label for log output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::EventCreated(_) => "event_created",
            Self::EventEdited(_) => "event_edited",
            Self::EventDeleted(_) => "event_deleted",
            Self::EventOwnershipTransferred(_) => "event_ownership_transferred",
            Self::EventRoyaltyModified(_) => "event_royalty_modified",
            Self::EventPaused(_) => "event_paused",
            Self::CollaboratorAdded(_) => "collaborator_added",
            Self::CollaboratorRemoved(_) => "collaborator_removed",
            Self::MembershipAssigned(_) => "membership_assigned",
            Self::MembershipTokenIdRevoked(_) => "membership_token_id_revoked",
            Self::MembershipRevoked(_) => "membership_revoked",
            Self::TicketBooked(_) => "ticket_booked",
            Self::BookingCancelled(_) => "booking_cancelled",
            Self::BookingFulfilled(_) => "booking_fulfilled",
            Self::TokenPublished(_) => "token_published",
            Self::TokenEdited(_) => "token_edited",
            Self::TokensDeleted(_) => "tokens_deleted",
            Self::TokenRoyaltyModified(_) => "token_royalty_modified",
            Self::TokenBought(_) => "token_bought",
            Self::AskSet(_) => "ask_set",
            Self::AskRemoved(_) => "ask_removed",
            Self::AllowanceAdded(_) => "allowance_added",
            Self::AllowanceConsumed(_) => "allowance_consumed",
            Self::AllowanceRemoved(_) => "allowance_removed",
            Self::TransferSingle(_) => "transfer_single",
            Self::TransferBatch(_) => "transfer_batch",
        }
    }
}
