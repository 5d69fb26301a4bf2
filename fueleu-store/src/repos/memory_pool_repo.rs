//! In-Memory Pool Repository

use async_trait::async_trait;
use fueleu_core::{ComplianceResult, Pool, PoolRepository};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// In-memory implementation of PoolRepository
#[derive(Debug, Default)]
pub struct MemoryPoolRepository {
    pools: Arc<RwLock<Vec<Pool>>>,
}

impl MemoryPoolRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PoolRepository for MemoryPoolRepository {
    async fn create(&self, pool: Pool) -> ComplianceResult<Pool> {
        let mut pools = self.pools.write().await;
        if pools.iter().any(|p| p.id == pool.id) {
            return Err(StoreError::duplicate("Pool", pool.id).into());
        }
        pools.push(pool.clone());
        Ok(pool)
    }

    async fn list(&self, year: Option<i32>) -> ComplianceResult<Vec<Pool>> {
        let pools = self.pools.read().await;
        Ok(pools
            .iter()
            .filter(|p| year.map_or(true, |y| p.year == y))
            .cloned()
            .collect())
    }
}
