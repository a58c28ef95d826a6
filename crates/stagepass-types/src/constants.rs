//! System-wide constants for the stagepass indexer.

/// Key prefix for ticket tokens (`tt0x1f`).
pub const TICKET_TOKEN_PREFIX: &str = "tt";

/// Key prefix for membership tokens (`mb0x1f`).
pub const MEMBERSHIP_TOKEN_PREFIX: &str = "mb";

/// Key prefix for event containers (`e0x1f`).
pub const EVENT_KEY_PREFIX: &str = "e";

/// Key prefix for ticket allowances (`ta-0x1f`).
pub const TICKET_ALLOWANCE_PREFIX: &str = "ta";

/// Key prefix for membership allowances (`ma-0x1f`).
pub const MEMBERSHIP_ALLOWANCE_PREFIX: &str = "ma";

/// Royalties are expressed in basis points; 10_000 = 100%.
pub const ROYALTY_SCALE_BPS: u32 = 10_000;

/// Default primary-market marketplace royalty (basis points).
pub const DEFAULT_PRIMARY_MARKETPLACE_ROYALTY: u32 = 1_500;

/// Default secondary-market marketplace royalty (basis points).
pub const DEFAULT_SECONDARY_MARKETPLACE_ROYALTY: u32 = 750;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "stagepass";
