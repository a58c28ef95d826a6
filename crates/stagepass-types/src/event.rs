//! The event container aggregate.
//!
//! An `Event` groups tickets and their balances under one organizer. It is
//! the unit of access-control cascading: an ownership transfer recomputes
//! every dependent balance's `is_event_owner` flag, and an event-level
//! royalty change propagates to every owned ticket.

use serde::{Deserialize, Serialize};

use crate::ids::{Address, EventId};
use crate::keys;
use crate::token::ParseStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub key: String,
    pub id: EventId,
    pub organizer: Address,
    pub collaborators: Vec<Address>,
    pub paused: bool,
    /// Number of live non-organizer balances under this event.
    pub attendees: u64,
    pub metadata_uri: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub parse_status: ParseStatus,
    /// Keys of the tickets published under this event.
    pub tickets: Vec<String>,
    /// Keys of every live balance under this event (tickets only).
    pub balances: Vec<String>,
}

impl Event {
    #[must_use]
    pub fn new(id: EventId, organizer: Address) -> Self {
        Self {
            key: keys::event_key(id),
            id,
            organizer,
            collaborators: Vec::new(),
            paused: false,
            attendees: 0,
            metadata_uri: None,
            title: None,
            description: None,
            category: None,
            image: None,
            parse_status: ParseStatus::Placeholder,
            tickets: Vec::new(),
            balances: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_organizer(&self, addr: &Address) -> bool {
        self.organizer == *addr
    }
}
