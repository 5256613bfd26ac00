//! In-memory test doubles for the RPC transport and progress sink

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::HarvestConfig;
use crate::endpoints::EndpointPool;
use crate::error::RpcError;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::rpc::{
    Instruction, LedgerRpc, SignatureRecord, TransactionEnvelope, TransactionMessage,
    TransactionRecord,
};

/// Small, fast harvest config for tests
pub fn test_config(endpoint_count: usize) -> HarvestConfig {
    let endpoints = (0..endpoint_count.max(1))
        .map(|i| format!("https://rpc-{i}.test"))
        .collect();

    HarvestConfig {
        pool: EndpointPool::new(endpoints).unwrap(),
        min_amount_lamports: 50_000_000,
        page_size: 5,
        batch_size: 4,
        max_attempts: 3,
        backoff_base: Duration::from_millis(1),
        page_delay: Duration::from_millis(1),
        batch_delay: Duration::from_millis(1),
        request_timeout: Duration::from_secs(1),
    }
}

/// Build a transaction whose instructions are the given native transfers
pub fn transfer_tx(
    signature: &str,
    block_time: Option<i64>,
    transfers: &[(&str, &str, u64)],
) -> TransactionRecord {
    let instructions = transfers
        .iter()
        .map(|(source, destination, lamports)| Instruction {
            program: Some("system".to_string()),
            parsed: Some(json!({
                "type": "transfer",
                "info": {
                    "source": source,
                    "destination": destination,
                    "lamports": lamports,
                }
            })),
        })
        .collect();

    TransactionRecord {
        block_time,
        transaction: TransactionEnvelope {
            signatures: vec![signature.to_string()],
            message: TransactionMessage { instructions },
        },
    }
}

/// Scripted `LedgerRpc` implementation.
///
/// Signature pages are served in order; transactions are looked up by
/// signature, with optional per-signature failure counts to exercise the
/// retry path. Every call is recorded for assertions.
#[derive(Default)]
pub struct MockRpc {
    pages: Mutex<VecDeque<Vec<SignatureRecord>>>,
    fail_signatures_after: Option<usize>,
    signature_calls: AtomicUsize,
    cursors: Mutex<Vec<Option<String>>>,

    transactions: Mutex<HashMap<String, TransactionRecord>>,
    /// signature -> remaining failures before the lookup succeeds
    failures: Mutex<HashMap<String, u32>>,
    transaction_endpoints: Mutex<Vec<String>>,
    transaction_calls: AtomicUsize,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature_pages(self, pages: Vec<Vec<SignatureRecord>>) -> Self {
        *self.pages.lock().unwrap() = pages.into();
        self
    }

    /// Fail every `list_signatures` call after the first `calls` successes
    pub fn failing_signatures_after(mut self, calls: usize) -> Self {
        self.fail_signatures_after = Some(calls);
        self
    }

    pub fn with_transaction(self, tx: TransactionRecord) -> Self {
        let signature = tx
            .primary_signature()
            .expect("test transaction needs a signature")
            .to_string();
        self.transactions.lock().unwrap().insert(signature, tx);
        self
    }

    /// Make `get_transaction` for `signature` fail `count` times before
    /// serving the stored record (if any)
    pub fn with_failures(self, signature: &str, count: u32) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(signature.to_string(), count);
        self
    }

    pub fn signature_calls(&self) -> usize {
        self.signature_calls.load(Ordering::SeqCst)
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_endpoints(&self) -> Vec<String> {
        self.transaction_endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerRpc for MockRpc {
    async fn list_signatures(
        &self,
        _endpoint: &str,
        _address: &str,
        _limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureRecord>, RpcError> {
        let call = self.signature_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors
            .lock()
            .unwrap()
            .push(before.map(|s| s.to_string()));

        if let Some(limit) = self.fail_signatures_after {
            if call >= limit {
                return Err(RpcError::RateLimited);
            }
        }

        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn get_transaction(
        &self,
        endpoint: &str,
        signature: &str,
    ) -> Result<Option<TransactionRecord>, RpcError> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        self.transaction_endpoints
            .lock()
            .unwrap()
            .push(endpoint.to_string());

        if let Some(remaining) = self.failures.lock().unwrap().get_mut(signature) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(RpcError::RateLimited);
            }
        }

        Ok(self.transactions.lock().unwrap().get(signature).cloned())
    }
}

/// Sink that records every event it receives
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn publish(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
