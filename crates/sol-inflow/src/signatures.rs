//! Signature index pagination
//!
//! Walks the signature index of the target address backward in time, cursor
//! by cursor, on the pool's primary endpoint. Pagination is all-or-nothing:
//! a truncated signature set would silently corrupt the aggregation, so any
//! transport or protocol error here aborts the entire harvest.

use tokio::time::sleep;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::rpc::{LedgerRpc, SignatureRecord};

/// Collect every signature for `address`, newest first.
///
/// Each call requests `page_size` records with a `before` cursor set to the
/// last signature of the previous page. An empty page means the index is
/// exhausted; a short page is the oldest page and is still included. A fixed
/// delay separates page requests to avoid hammering the single endpoint.
pub async fn collect_signatures(
    rpc: &dyn LedgerRpc,
    config: &HarvestConfig,
    address: &str,
    sink: &dyn ProgressSink,
) -> Result<Vec<SignatureRecord>, HarvestError> {
    let endpoint = config.pool.primary();
    let mut all_signatures: Vec<SignatureRecord> = Vec::new();
    let mut before: Option<String> = None;
    let mut page = 1usize;

    loop {
        let records = rpc
            .list_signatures(endpoint, address, config.page_size, before.as_deref())
            .await
            .map_err(|source| HarvestError::Pagination { page, source })?;

        if records.is_empty() {
            break;
        }

        let page_len = records.len();
        before = records.last().map(|r| r.signature.clone());
        all_signatures.extend(records);

        sink.publish(ProgressEvent::Pagination {
            pages_done: page,
            signatures: all_signatures.len(),
        });

        // A short page is the oldest one; no further cursor to follow
        if page_len < config.page_size {
            break;
        }

        page += 1;
        sleep(config.page_delay).await;
    }

    Ok(all_signatures)
}
