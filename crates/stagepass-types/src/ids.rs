//! Identifiers used throughout stagepass.
//!
//! All identifiers are derived from upstream event data (numeric contract
//! ids, account addresses, transaction hashes) — nothing is generated here,
//! so replays always resolve to the same entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address. Transfers from/to it are mint/burn legs and are
    /// outside the ledger's scope.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Parse a `0x`-prefixed (or bare) hex literal.
    ///
    /// # Errors
    /// Returns [`IndexError::InvalidAddress`] if the literal is not exactly
    /// 20 bytes of valid hex.
    pub fn from_hex(raw: &str) -> Result<Self> {
        let stripped = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes =
            hex::decode(stripped).map_err(|_| IndexError::InvalidAddress(raw.to_string()))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| IndexError::InvalidAddress(raw.to_string()))?;
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Shortened form for log output.
    #[must_use]
    pub fn short(&self) -> String {
        format!("0x{}", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// TokenKind
// ---------------------------------------------------------------------------

/// Discriminates the two token families the marketplace trades.
///
/// The discriminator is baked into every derived key so ticket and
/// membership aggregates can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Ticket,
    Membership,
}

impl TokenKind {
    /// Prefix used in token keys (`tt0x..` / `mb0x..`).
    #[must_use]
    pub fn token_prefix(self) -> &'static str {
        match self {
            Self::Ticket => crate::constants::TICKET_TOKEN_PREFIX,
            Self::Membership => crate::constants::MEMBERSHIP_TOKEN_PREFIX,
        }
    }

    /// Prefix used in allowance keys (`ta-0x..` / `ma-0x..`).
    #[must_use]
    pub fn allowance_prefix(self) -> &'static str {
        match self {
            Self::Ticket => crate::constants::TICKET_ALLOWANCE_PREFIX,
            Self::Membership => crate::constants::MEMBERSHIP_ALLOWANCE_PREFIX,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticket => write!(f, "Ticket"),
            Self::Membership => write!(f, "Membership"),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric ids
// ---------------------------------------------------------------------------

/// Contract-level numeric id of a token (ticket or membership).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Contract-level numeric id of an event container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Contract-level numeric id of an allowance grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AllowanceId(pub u64);

impl fmt::Display for AllowanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TxHash
// ---------------------------------------------------------------------------

/// Transaction hash of the envelope an event arrived in.
///
/// Stored lowercased so history keys derived from it are stable regardless
/// of the upstream decoder's casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxHash(String);

impl TxHash {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
