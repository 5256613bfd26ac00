//! Error taxonomy for the harvesting pipeline
//!
//! Only pagination failures are fatal: a silently truncated signature set
//! would corrupt the aggregation without any indication. Per-signature fetch
//! failures are retried and then dropped, never surfaced individually.

use thiserror::Error;

/// Failure of a single JSON-RPC call.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The body was an HTML error page where a JSON payload was expected.
    /// Proxies and gateways serve these when rate-limiting, so it is treated
    /// like any other transient transport failure.
    #[error("rate limited (HTML response body)")]
    RateLimited,

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fatal harvest errors surfaced to the caller.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("signature pagination failed on page {page}: {source}")]
    Pagination {
        page: usize,
        #[source]
        source: RpcError,
    },

    #[error("endpoint pool is empty: configure at least one RPC URL")]
    EmptyEndpointPool,
}
