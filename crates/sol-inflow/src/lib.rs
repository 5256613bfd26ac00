//! Harvests every inbound SOL payment to an address and ranks the senders.
//!
//! The pipeline paginates the signature index of a target address, resolves
//! each signature to a fully parsed transaction with bounded-parallel fetches
//! spread across a pool of interchangeable RPC endpoints, and aggregates
//! qualifying native transfers by sender. Progress flows out through an
//! injected [`progress::ProgressSink`]; the caller (CLI, chat bot) owns the
//! presentation.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod fetcher;
pub mod harvest;
pub mod progress;
pub mod retry;
pub mod rpc;
pub mod signatures;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregate::{HarvestResult, SenderAggregate, Transfer};
pub use config::{FileConfig, HarvestConfig};
pub use endpoints::EndpointPool;
pub use error::{HarvestError, RpcError};
pub use harvest::{run_harvest, HarvestSummary};
pub use progress::{ChannelSink, NullSink, ProgressEvent, ProgressSink};
pub use rpc::{HttpRpcClient, LedgerRpc, SignatureRecord, TransactionRecord};
