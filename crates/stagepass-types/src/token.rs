//! Token aggregates: the tickets and memberships the marketplace trades.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PRIMARY_MARKETPLACE_ROYALTY, DEFAULT_SECONDARY_MARKETPLACE_ROYALTY, ROYALTY_SCALE_BPS,
};
use crate::ids::{Address, TokenId, TokenKind};
use crate::keys;

/// Outcome of metadata resolution for a token or event container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseStatus {
    /// Metadata was resolved and recognized attributes were extracted.
    Parsed,
    /// Resolution or extraction failed; stored attributes are stale or empty.
    Failed,
    /// Created as a stub by an out-of-order event (e.g. an allowance grant
    /// observed before the publish); awaiting the publish to fill it in.
    Placeholder,
}

/// A ticket or membership token type.
///
/// Created on first publish (or as a [`ParseStatus::Placeholder`] by an
/// early allowance grant or restriction assignment); mutated by edit and
/// royalty events; removed only by an explicit deletion event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub key: String,
    pub id: TokenId,
    pub kind: TokenKind,
    /// Key of the owning event container. Tickets only.
    pub event: Option<String>,
    /// The publishing organizer. `None` while still a placeholder.
    pub organizer: Option<Address>,
    /// Creator royalty in basis points.
    pub creator_royalty: u32,
    pub is_resellable: bool,
    pub is_private: bool,
    /// Total minted amount at publish time.
    pub total_amount: u32,
    pub metadata_uri: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parse_status: ParseStatus,
    /// Keys of the allowances granted for this token, in grant order.
    pub allowances: Vec<String>,
    /// Keys of membership restrictions gating this ticket. Tickets only.
    pub restrictions: Vec<String>,
    /// Minimum memberships a buyer must hold across restrictions.
    pub min_restriction_amount: u32,
    /// Marketplace cut on primary sales, basis points.
    pub primary_marketplace_royalty: u32,
    /// Marketplace cut on secondary sales, basis points.
    pub secondary_marketplace_royalty: u32,
}

impl Token {
    /// A stub token created by an event that arrived before the publish.
    /// The publish fills in the real attributes and keeps whatever
    /// allowances/restrictions accumulated in the meantime.
    #[must_use]
    pub fn placeholder(kind: TokenKind, id: TokenId) -> Self {
        Self {
            key: keys::token_key(kind, id),
            id,
            kind,
            event: None,
            organizer: None,
            creator_royalty: 0,
            is_resellable: false,
            is_private: false,
            total_amount: 0,
            metadata_uri: None,
            name: None,
            description: None,
            image: None,
            parse_status: ParseStatus::Placeholder,
            allowances: Vec::new(),
            restrictions: Vec::new(),
            min_restriction_amount: 0,
            primary_marketplace_royalty: DEFAULT_PRIMARY_MARKETPLACE_ROYALTY,
            secondary_marketplace_royalty: DEFAULT_SECONDARY_MARKETPLACE_ROYALTY,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.parse_status == ParseStatus::Placeholder
    }

    /// Creator royalty as a fraction of the sale price.
    #[must_use]
    pub fn creator_royalty_fraction(&self) -> Decimal {
        Decimal::from(self.creator_royalty) / Decimal::from(ROYALTY_SCALE_BPS)
    }
}
