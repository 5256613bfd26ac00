//! Harvest orchestration
//!
//! Drives the three phases strictly in sequence: collect every signature for
//! the target address, resolve signatures to transactions batch by batch,
//! then aggregate qualifying transfers by sender. Only the pagination phase
//! can fail; everything later degrades to partial data instead of erroring.

use crate::aggregate::{aggregate, HarvestResult};
use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::fetcher::resolve_transactions;
use crate::progress::ProgressSink;
use crate::rpc::LedgerRpc;
use crate::signatures::collect_signatures;

/// A finished harvest, with counters for caller-facing status lines.
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// Signatures found in the index (before resolution)
    pub signatures_found: usize,
    /// Transactions successfully resolved (after drops)
    pub transactions_resolved: usize,
    pub result: HarvestResult,
}

impl HarvestSummary {
    /// The address had no transaction history at all, as opposed to having
    /// history but no qualifying transfers.
    pub fn no_history(&self) -> bool {
        self.signatures_found == 0
    }
}

/// Run a full harvest of inbound transfers to `target`.
pub async fn run_harvest(
    rpc: &dyn LedgerRpc,
    config: &HarvestConfig,
    target: &str,
    sink: &dyn ProgressSink,
) -> Result<HarvestSummary, HarvestError> {
    let signatures = collect_signatures(rpc, config, target, sink).await?;

    if signatures.is_empty() {
        return Ok(HarvestSummary {
            signatures_found: 0,
            transactions_resolved: 0,
            result: HarvestResult {
                senders: Vec::new(),
                total_qualifying_transfers: 0,
            },
        });
    }

    let transactions = resolve_transactions(rpc, config, &signatures, sink).await;
    let result = aggregate(&transactions, target, config.min_amount_lamports);

    Ok(HarvestSummary {
        signatures_found: signatures.len(),
        transactions_resolved: transactions.len(),
        result,
    })
}
