//! Round-robin endpoint pool
//!
//! An ordered, immutable set of interchangeable RPC endpoints. Consumers pick
//! one per call by index; spreading batch-relative indices across the pool
//! keeps retry load off any single endpoint.

use crate::error::HarvestError;

/// Immutable pool of RPC endpoint URLs. Safe to share across concurrent
/// fetch tasks since it is never mutated after construction.
#[derive(Debug, Clone)]
pub struct EndpointPool {
    endpoints: Vec<String>,
}

impl EndpointPool {
    /// Build a pool from configured URLs. Fails fast on an empty list.
    pub fn new(endpoints: Vec<String>) -> Result<Self, HarvestError> {
        if endpoints.is_empty() {
            return Err(HarvestError::EmptyEndpointPool);
        }
        Ok(Self { endpoints })
    }

    /// Select an endpoint by round-robin: `pool[index % len]`.
    pub fn select(&self, index: usize) -> &str {
        &self.endpoints[index % self.endpoints.len()]
    }

    /// Endpoint used for pagination (always the first configured URL).
    pub fn primary(&self) -> &str {
        self.select(0)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
