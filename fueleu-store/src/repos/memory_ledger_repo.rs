//! In-Memory Ledger Repository
//!
//! Append-only: entries are never updated in place. The store stamps each
//! entry with a monotonically increasing sequence for stable ordering.

use async_trait::async_trait;
use fueleu_core::{sort_entries, BankEntry, ComplianceResult, LedgerRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// In-memory implementation of LedgerRepository
#[derive(Debug, Default)]
pub struct MemoryLedgerRepository {
    /// route_id -> entries in append order
    entries: Arc<RwLock<HashMap<String, Vec<BankEntry>>>>,
    sequence: AtomicU64,
}

impl MemoryLedgerRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entry count across routes
    pub async fn len(&self) -> usize {
        self.entries.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl LedgerRepository for MemoryLedgerRepository {
    async fn append(&self, mut entry: BankEntry) -> ComplianceResult<BankEntry> {
        if !entry.is_well_formed() {
            return Err(StoreError::validation(format!(
                "entry {} must carry exactly one positive movement",
                entry.id
            ))
            .into());
        }

        let mut entries = self.entries.write().await;
        let route_entries = entries.entry(entry.route_id.clone()).or_default();
        if route_entries.iter().any(|e| e.id == entry.id) {
            return Err(StoreError::duplicate("BankEntry", entry.id).into());
        }

        entry.sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        route_entries.push(entry.clone());
        Ok(entry)
    }

    async fn entries_for_route(&self, route_id: &str) -> ComplianceResult<Vec<BankEntry>> {
        let entries = self.entries.read().await;
        let mut found = entries.get(route_id).cloned().unwrap_or_default();
        sort_entries(&mut found);
        Ok(found)
    }

    async fn reset(&self) -> ComplianceResult<u64> {
        let mut entries = self.entries.write().await;
        let removed = entries.values().map(Vec::len).sum::<usize>() as u64;
        entries.clear();
        Ok(removed)
    }
}
