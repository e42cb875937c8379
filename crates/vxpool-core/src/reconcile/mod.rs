//! Reconcile the allocation table with the configured VNI ranges.
//!
//! Unallocated rows outside the ranges are deleted, covered VNIs without a row
//! are inserted as free, and allocated rows are never touched. Everything runs
//! in one locked transaction; chunking only bounds statement size.

mod plan;

pub use plan::SyncPlan;

use anyhow::Result;

use crate::alloc_db::records::{delete_chunk, fetch_all_ordered, insert_free_chunk};
use crate::alloc_db::{AllocDb, Vni};
use crate::config::MAX_BULK_SIZE;
use crate::ranges::RangeSet;

/// What one reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Free rows inserted for newly covered VNIs.
    pub added: u64,
    /// Unallocated rows deleted because no range covers them anymore.
    pub removed: u64,
    /// Allocated rows left in place although no range covers them.
    pub retained_outside: u64,
}

impl SyncStats {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl AllocDb {
    /// Bring the table in line with `ranges`, writing at most `bulk_size` rows
    /// per statement (clamped to `1..=MAX_BULK_SIZE`). Any error rolls the
    /// whole pass back.
    pub async fn sync_allocations(&self, ranges: &RangeSet, bulk_size: usize) -> Result<SyncStats> {
        let bulk_size = bulk_size.clamp(1, MAX_BULK_SIZE);
        let mut tx = self.begin_locked().await?;

        let existing = fetch_all_ordered(&mut *tx).await?;
        let plan = SyncPlan::new(&existing, ranges);
        let mut stats = SyncStats {
            retained_outside: plan.retained_outside,
            ..SyncStats::default()
        };

        for chunk in plan.to_remove.chunks(bulk_size) {
            stats.removed += delete_chunk(&mut *tx, chunk).await?;
            tracing::debug!(count = chunk.len(), first = chunk[0], "removed unallocated VNIs");
        }

        let existing_ids: Vec<Vni> = existing.iter().map(|a| a.vni).collect();
        let mut missing = ranges.missing_from(&existing_ids);
        let mut chunk: Vec<Vni> = Vec::with_capacity(bulk_size);
        loop {
            chunk.clear();
            chunk.extend(missing.by_ref().take(bulk_size));
            if chunk.is_empty() {
                break;
            }
            stats.added += insert_free_chunk(&mut *tx, &chunk).await?;
            tracing::debug!(count = chunk.len(), first = chunk[0], "inserted free VNIs");
        }

        tx.commit().await?;

        tracing::info!(
            added = stats.added,
            removed = stats.removed,
            retained_outside = stats.retained_outside,
            "synced VXLAN VNI allocations"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests;
