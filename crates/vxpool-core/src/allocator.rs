//! Per-row allocate and release against the allocation table.
//!
//! Every operation runs in its own transaction opened with
//! [`AllocDb::begin_locked`], so the status check and the mutation happen under
//! the same write lock and concurrent callers (threads or processes) can never
//! both win the same VNI. Any error drops the transaction, which rolls it back.

use anyhow::Result;
use sqlx::Row;

use crate::alloc_db::records::{delete_one, fetch_one, set_allocated};
use crate::alloc_db::{AllocDb, Vni};
use crate::ranges::RangeSet;

/// Result of [`AllocDb::allocate_specific`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecificAllocation {
    /// Row was free and is now allocated.
    Allocated,
    /// Row exists and was already allocated; nothing changed.
    InUse,
    /// No row for this VNI.
    NotFound,
}

/// Result of [`AllocDb::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// VNI is inside the configured ranges and went back to the pool.
    Returned,
    /// VNI is outside the configured ranges; its row was deleted.
    Pruned,
    /// No row for this VNI.
    NotFound,
}

impl AllocDb {
    /// Allocate the lowest free VNI. Returns None if every row is allocated.
    pub async fn allocate_any(&self) -> Result<Option<Vni>> {
        let mut tx = self.begin_locked().await?;
        let row = sqlx::query(
            r#"
            SELECT vni FROM vni_allocations
            WHERE allocated = 0
            ORDER BY vni ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };
        let vni: Vni = row.get("vni");
        set_allocated(&mut *tx, vni, true).await?;
        tx.commit().await?;

        tracing::debug!(vni, "allocated free VNI");
        Ok(Some(vni))
    }

    /// Allocate exactly `vni` if it is tracked and free.
    pub async fn allocate_specific(&self, vni: Vni) -> Result<SpecificAllocation> {
        let mut tx = self.begin_locked().await?;
        let outcome = match fetch_one(&mut *tx, vni).await? {
            None => SpecificAllocation::NotFound,
            Some(alloc) if alloc.allocated => SpecificAllocation::InUse,
            Some(_) => {
                set_allocated(&mut *tx, vni, true).await?;
                SpecificAllocation::Allocated
            }
        };
        tx.commit().await?;

        tracing::debug!(vni, ?outcome, "allocate specific VNI");
        Ok(outcome)
    }

    /// Release `vni`. Inside `ranges` it returns to the pool; outside it the
    /// row is deleted so stale VNIs are not recycled.
    pub async fn release(&self, vni: Vni, ranges: &RangeSet) -> Result<ReleaseOutcome> {
        let inside = ranges.contains(vni);
        let mut tx = self.begin_locked().await?;
        let count = if inside {
            set_allocated(&mut *tx, vni, false).await?
        } else {
            delete_one(&mut *tx, vni).await?
        };
        tx.commit().await?;

        let outcome = match (count, inside) {
            (0, _) => ReleaseOutcome::NotFound,
            (_, true) => {
                tracing::debug!(vni, "releasing VXLAN VNI to pool");
                ReleaseOutcome::Returned
            }
            (_, false) => {
                tracing::debug!(vni, "releasing VXLAN VNI outside pool");
                ReleaseOutcome::Pruned
            }
        };
        Ok(outcome)
    }
}
