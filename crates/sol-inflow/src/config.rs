//! Configuration for the inflow harvester

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::constants;
use crate::endpoints::EndpointPool;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// RPC endpoint URLs, in priority order (first is used for pagination)
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub harvest: HarvestSection,
}

/// Harvest tunables, all optional with production defaults
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HarvestSection {
    /// Minimum qualifying transfer amount in SOL (inclusive)
    pub min_amount_sol: f64,
    /// Signatures requested per pagination call
    pub page_size: usize,
    /// Signatures resolved concurrently per batch
    pub batch_size: usize,
    /// Attempts per signature before it is dropped
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds (doubles per attempt)
    pub backoff_base_ms: u64,
    /// Delay between signature pages in milliseconds
    pub page_delay_ms: u64,
    /// Delay between resolution batches in milliseconds
    pub batch_delay_ms: u64,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for HarvestSection {
    fn default() -> Self {
        Self {
            min_amount_sol: constants::DEFAULT_MIN_AMOUNT_SOL,
            page_size: constants::DEFAULT_PAGE_SIZE,
            batch_size: constants::DEFAULT_BATCH_SIZE,
            max_attempts: constants::DEFAULT_MAX_ATTEMPTS,
            backoff_base_ms: constants::DEFAULT_BACKOFF_BASE_MS,
            page_delay_ms: constants::DEFAULT_PAGE_DELAY_MS,
            batch_delay_ms: constants::DEFAULT_BATCH_DELAY_MS,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            "Failed to parse config.toml. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (strings vs numbers)\n\n\
             See config.toml.example for the expected format."
        })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Main configuration struct with parsed values
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// RPC endpoint pool (validated non-empty)
    pub pool: EndpointPool,
    /// Minimum qualifying transfer amount in lamports (inclusive)
    pub min_amount_lamports: u64,
    /// Signatures requested per pagination call
    pub page_size: usize,
    /// Signatures resolved concurrently per batch
    pub batch_size: usize,
    /// Attempts per signature before it is dropped
    pub max_attempts: u32,
    /// Base backoff delay (doubles per attempt)
    pub backoff_base: Duration,
    /// Delay between signature pages
    pub page_delay: Duration,
    /// Delay between resolution batches
    pub batch_delay: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl HarvestConfig {
    /// Create config from file config with optional endpoint and threshold
    /// overrides (CLI flags or the RPC_URLS environment variable).
    pub fn from_file(
        file_config: &FileConfig,
        endpoint_override: Option<Vec<String>>,
        min_sol_override: Option<f64>,
    ) -> Result<Self> {
        let endpoints = endpoint_override.unwrap_or_else(|| file_config.endpoints.clone());
        let pool = EndpointPool::new(endpoints)
            .context("No RPC endpoints configured (set `endpoints` in config.toml or pass --rpc-url)")?;

        let harvest = &file_config.harvest;
        let min_amount_sol = min_sol_override.unwrap_or(harvest.min_amount_sol);

        anyhow::ensure!(
            min_amount_sol >= 0.0,
            "harvest.min_amount_sol must be non-negative"
        );
        anyhow::ensure!(harvest.page_size > 0, "harvest.page_size must be positive");
        anyhow::ensure!(harvest.batch_size > 0, "harvest.batch_size must be positive");
        anyhow::ensure!(
            harvest.max_attempts > 0,
            "harvest.max_attempts must be positive"
        );

        Ok(Self {
            pool,
            min_amount_lamports: sol_to_lamports(min_amount_sol),
            page_size: harvest.page_size,
            batch_size: harvest.batch_size,
            max_attempts: harvest.max_attempts,
            backoff_base: Duration::from_millis(harvest.backoff_base_ms),
            page_delay: Duration::from_millis(harvest.page_delay_ms),
            batch_delay: Duration::from_millis(harvest.batch_delay_ms),
            request_timeout: Duration::from_secs(harvest.request_timeout_secs),
        })
    }
}

/// Convert a SOL threshold to lamports, rounding to the nearest lamport
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * constants::LAMPORTS_PER_SOL as f64).round() as u64
}
