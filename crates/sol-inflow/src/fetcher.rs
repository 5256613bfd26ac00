//! Bounded-parallel transaction detail retrieval
//!
//! Signatures are resolved in fixed-size batches. Batches run strictly in
//! sequence; within a batch every signature is fetched concurrently, each
//! task owning its own retry state. Results are merged only after the whole
//! batch settles, so no mutable state is shared across tasks. Partial failure
//! is expected here: a signature that exhausts its retries is dropped and the
//! harvest carries on.

use futures::future::join_all;
use tokio::time::sleep;

use crate::config::HarvestConfig;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::retry::retry_with_backoff;
use crate::rpc::{LedgerRpc, SignatureRecord, TransactionRecord};

/// Resolve each signature to its full transaction record.
///
/// The output holds one entry per successfully resolved signature; failed or
/// unknown signatures are dropped without occupying a slot. Endpoint choice
/// is round-robin by batch-relative index, spreading load (and retry bursts)
/// evenly across the pool.
pub async fn resolve_transactions(
    rpc: &dyn LedgerRpc,
    config: &HarvestConfig,
    signatures: &[SignatureRecord],
    sink: &dyn ProgressSink,
) -> Vec<TransactionRecord> {
    let total_batches = signatures.len().div_ceil(config.batch_size);
    let mut transactions = Vec::new();
    let mut items_processed = 0usize;
    let mut dropped = 0usize;

    for (batch_index, batch) in signatures.chunks(config.batch_size).enumerate() {
        let fetches = batch.iter().enumerate().map(|(i, record)| {
            let endpoint = config.pool.select(i);
            async move {
                retry_with_backoff(config.max_attempts, config.backoff_base, || {
                    rpc.get_transaction(endpoint, &record.signature)
                })
                .await
            }
        });

        for settled in join_all(fetches).await {
            match settled {
                Ok(Some(tx)) => transactions.push(tx),
                // Unknown to the node (pruned history): dropped, not an error
                Ok(None) => {}
                Err(_) => dropped += 1,
            }
        }

        items_processed += batch.len();
        sink.publish(ProgressEvent::Resolution {
            batches_done: batch_index + 1,
            total_batches,
            items_processed,
        });

        if batch_index + 1 < total_batches {
            sleep(config.batch_delay).await;
        }
    }

    if dropped > 0 {
        eprintln!(
            "    Warning: dropped {} of {} signatures after {} failed attempts each",
            dropped,
            signatures.len(),
            config.max_attempts
        );
    }

    transactions
}
