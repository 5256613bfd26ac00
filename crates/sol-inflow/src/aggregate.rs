//! Sender aggregation and ranking
//!
//! Pure, deterministic scan over resolved transactions: no I/O, no errors.
//! All amounts are kept as u64 lamports so totals are exact sums; SOL values
//! are computed at display time only.

use crate::constants::LAMPORTS_PER_SOL;
use crate::rpc::TransactionRecord;
use std::collections::HashMap;

/// One qualifying transfer attributed to a sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Primary signature of the containing transaction
    pub signature: String,
    pub lamports: u64,
    pub block_time: Option<i64>,
}

impl Transfer {
    pub fn amount_sol(&self) -> f64 {
        self.lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

/// Everything one sender contributed to the target address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderAggregate {
    pub address: String,
    /// Qualifying transfers in the order they were scanned
    pub transfers: Vec<Transfer>,
    /// Exact sum of the transfers' lamports
    pub total_lamports: u64,
}

impl SenderAggregate {
    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    pub fn total_sol(&self) -> f64 {
        self.total_lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

/// Ranked output of one harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestResult {
    /// Senders ordered by total amount descending; ties keep first-seen order
    pub senders: Vec<SenderAggregate>,
    /// Grand total of qualifying transfers across all senders
    pub total_qualifying_transfers: usize,
}

/// Scan resolved transactions for native transfers into `target` of at least
/// `min_amount_lamports` (inclusive) and rank the senders by total amount.
///
/// A transaction with no instructions, no transfer instructions, or malformed
/// instruction data contributes nothing. A sender equal to the target (a
/// transfer to self) is counted like any other sender.
pub fn aggregate(
    transactions: &[TransactionRecord],
    target: &str,
    min_amount_lamports: u64,
) -> HarvestResult {
    let mut senders: Vec<SenderAggregate> = Vec::new();
    let mut index_by_address: HashMap<String, usize> = HashMap::new();
    let mut total_qualifying_transfers = 0usize;

    for tx in transactions {
        let Some(signature) = tx.primary_signature() else {
            continue;
        };

        for instruction in &tx.transaction.message.instructions {
            let Some(transfer) = instruction.native_transfer() else {
                continue;
            };
            if transfer.destination != target || transfer.lamports < min_amount_lamports {
                continue;
            }

            let index = *index_by_address
                .entry(transfer.source.clone())
                .or_insert_with(|| {
                    senders.push(SenderAggregate {
                        address: transfer.source.clone(),
                        transfers: Vec::new(),
                        total_lamports: 0,
                    });
                    senders.len() - 1
                });

            let sender = &mut senders[index];
            sender.transfers.push(Transfer {
                signature: signature.to_string(),
                lamports: transfer.lamports,
                block_time: tx.block_time,
            });
            sender.total_lamports = sender.total_lamports.saturating_add(transfer.lamports);
            total_qualifying_transfers += 1;
        }
    }

    // Stable sort: tied totals keep first-seen order
    senders.sort_by(|a, b| b.total_lamports.cmp(&a.total_lamports));

    HarvestResult {
        senders,
        total_qualifying_transfers,
    }
}
