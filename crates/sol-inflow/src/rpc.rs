//! JSON-RPC transport and wire types
//!
//! Raw `getSignaturesForAddress` / `getTransaction` calls over HTTP. The
//! transport sits behind the `LedgerRpc` trait so the pagination and fetch
//! logic can be exercised against an in-memory implementation in tests.
//!
//! Rate-limit detection is body-based: proxies in front of public RPC
//! endpoints answer with HTML error pages when throttling, while a genuine
//! RPC response is always JSON. An HTML body is therefore classified as
//! `RpcError::RateLimited` and retried like any transient failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::RpcError;

/// One entry from the signature index of an address.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureRecord {
    pub signature: String,
    #[serde(rename = "blockTime")]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub slot: u64,
}

/// Fully parsed transaction detail for one signature.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub block_time: Option<i64>,
    pub transaction: TransactionEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEnvelope {
    #[serde(default)]
    pub signatures: Vec<String>,
    pub message: TransactionMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionMessage {
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// A single instruction in `jsonParsed` encoding. `parsed` is kept as raw
/// JSON: its shape varies by program (objects for system/token programs,
/// bare strings for memos) and anything unrecognized simply never qualifies.
#[derive(Debug, Clone, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub parsed: Option<serde_json::Value>,
}

/// Decoded `system::transfer` payload.
#[derive(Debug, Clone, Deserialize)]
struct ParsedPayload {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    info: TransferInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TransferInfo {
    source: Option<String>,
    destination: Option<String>,
    lamports: Option<u64>,
}

/// A native transfer extracted from one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTransfer {
    pub source: String,
    pub destination: String,
    pub lamports: u64,
}

impl Instruction {
    /// Decode this instruction as a system-program native transfer.
    /// Returns `None` for any other program, instruction type, or malformed
    /// payload; malformed data is "does not qualify", never an error.
    pub fn native_transfer(&self) -> Option<NativeTransfer> {
        if self.program.as_deref() != Some("system") {
            return None;
        }
        let payload: ParsedPayload = serde_json::from_value(self.parsed.clone()?).ok()?;
        if payload.kind != "transfer" {
            return None;
        }
        Some(NativeTransfer {
            source: payload.info.source?,
            destination: payload.info.destination?,
            lamports: payload.info.lamports?,
        })
    }
}

impl TransactionRecord {
    /// The transaction's primary signature, if present.
    pub fn primary_signature(&self) -> Option<&str> {
        self.transaction.signatures.first().map(|s| s.as_str())
    }
}

/// Ledger queries used by the harvest pipeline.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// `getSignaturesForAddress`, newest first, optionally continuing before
    /// a cursor signature.
    async fn list_signatures(
        &self,
        endpoint: &str,
        address: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureRecord>, RpcError>;

    /// `getTransaction` with `jsonParsed` encoding. `Ok(None)` means the node
    /// does not know the signature (pruned history); that is a successful
    /// call, not a retryable failure.
    async fn get_transaction(
        &self,
        endpoint: &str,
        signature: &str,
    ) -> Result<Option<TransactionRecord>, RpcError>;
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Heuristic for upstream rate limiting: the expected body is always JSON,
/// so an HTML document means a proxy error page.
pub(crate) fn looks_like_html(body: &str) -> bool {
    // Covers <!DOCTYPE ...>, <html>, and bare XML-ish gateway errors
    body.trim_start().starts_with('<')
}

/// HTTP JSON-RPC client.
pub struct HttpRpcClient {
    client: reqwest::Client,
}

impl HttpRpcClient {
    /// Build a client with an explicit timeout to prevent hangs on stalled
    /// endpoints.
    pub fn new(timeout: Duration) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<Option<T>, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params: &params,
        };

        let response = self.client.post(endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(RpcError::HttpStatus(response.status()));
        }

        let text = response.text().await?;
        if looks_like_html(&text) {
            return Err(RpcError::RateLimited);
        }

        let parsed: RpcResponse<T> = serde_json::from_str(&text)?;
        if let Some(err) = parsed.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(parsed.result)
    }
}

#[async_trait]
impl LedgerRpc for HttpRpcClient {
    async fn list_signatures(
        &self,
        endpoint: &str,
        address: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureRecord>, RpcError> {
        let mut opts = serde_json::json!({ "limit": limit });
        if let Some(cursor) = before {
            opts["before"] = serde_json::json!(cursor);
        }
        let params = serde_json::json!([address, opts]);

        let result: Option<Vec<SignatureRecord>> = self
            .call(endpoint, "getSignaturesForAddress", params)
            .await?;
        Ok(result.unwrap_or_default())
    }

    async fn get_transaction(
        &self,
        endpoint: &str,
        signature: &str,
    ) -> Result<Option<TransactionRecord>, RpcError> {
        let params = serde_json::json!([signature, { "encoding": "jsonParsed" }]);
        self.call(endpoint, "getTransaction", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_body_detected_as_rate_limit() {
        assert!(looks_like_html("<!DOCTYPE html><html>..."));
        assert!(looks_like_html("  <html><body>503</body></html>"));
        assert!(!looks_like_html(r#"{"jsonrpc":"2.0","result":null,"id":1}"#));
    }

    #[test]
    fn test_parse_signature_page() {
        let body = r#"[
            {"signature": "sigA", "slot": 100, "blockTime": 1700000000, "err": null},
            {"signature": "sigB", "slot": 99, "blockTime": null}
        ]"#;
        let records: Vec<SignatureRecord> = serde_json::from_str(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].signature, "sigA");
        assert_eq!(records[0].block_time, Some(1700000000));
        assert_eq!(records[1].block_time, None);
    }

    #[test]
    fn test_parse_transaction_and_extract_transfer() {
        let body = r#"{
            "blockTime": 1700000123,
            "transaction": {
                "signatures": ["primarySig", "extraSig"],
                "message": {
                    "instructions": [
                        {"program": "spl-memo", "parsed": "hello"},
                        {"program": "system", "parsed": {
                            "type": "transfer",
                            "info": {"source": "src1", "destination": "dst1", "lamports": 60000000}
                        }}
                    ]
                }
            }
        }"#;
        let tx: TransactionRecord = serde_json::from_str(body).unwrap();

        assert_eq!(tx.primary_signature(), Some("primarySig"));
        assert_eq!(tx.block_time, Some(1700000123));

        let transfers: Vec<NativeTransfer> = tx
            .transaction
            .message
            .instructions
            .iter()
            .filter_map(|ix| ix.native_transfer())
            .collect();
        assert_eq!(
            transfers,
            vec![NativeTransfer {
                source: "src1".to_string(),
                destination: "dst1".to_string(),
                lamports: 60_000_000,
            }]
        );
    }

    #[test]
    fn test_malformed_parsed_payload_does_not_qualify() {
        // createAccount is a system instruction but not a transfer
        let ix: Instruction = serde_json::from_str(
            r#"{"program": "system", "parsed": {"type": "createAccount", "info": {}}}"#,
        )
        .unwrap();
        assert!(ix.native_transfer().is_none());

        // transfer missing its source never qualifies
        let ix: Instruction = serde_json::from_str(
            r#"{"program": "system", "parsed": {
                "type": "transfer",
                "info": {"destination": "dst", "lamports": 1}
            }}"#,
        )
        .unwrap();
        assert!(ix.native_transfer().is_none());

        // non-object payload (memo-style) is skipped
        let ix: Instruction =
            serde_json::from_str(r#"{"program": "system", "parsed": "garbage"}"#).unwrap();
        assert!(ix.native_transfer().is_none());

        // no parsed data at all
        let ix: Instruction = serde_json::from_str(r#"{"programIdIndex": 3}"#).unwrap();
        assert!(ix.native_transfer().is_none());
    }

    #[test]
    fn test_rpc_error_object_surfaced() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32005,"message":"node is behind"},"id":1}"#;
        let parsed: RpcResponse<Vec<SignatureRecord>> = serde_json::from_str(body).unwrap();
        let err = parsed.error.unwrap();
        assert_eq!(err.code, -32005);
        assert_eq!(err.message, "node is behind");
    }
}
