//! Shared constants and harvest defaults

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Minimum qualifying transfer amount in SOL (inclusive)
pub const DEFAULT_MIN_AMOUNT_SOL: f64 = 0.05;

/// Signatures requested per pagination call
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Signatures resolved concurrently per batch
pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// Attempts per signature before it is dropped
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base backoff delay; doubles after each failed attempt
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 200;

/// Delay between successive signature pages (single endpoint)
pub const DEFAULT_PAGE_DELAY_MS: u64 = 50;

/// Delay between batches (aggregate request-rate throttle)
pub const DEFAULT_BATCH_DELAY_MS: u64 = 200;

/// HTTP timeout for a single RPC call
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
