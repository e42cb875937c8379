//! Deletion side of a reconciliation pass, computed from a snapshot of the table.

use crate::alloc_db::{Vni, VniAllocation};
use crate::ranges::RangeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Unallocated VNIs outside every range, ascending.
    pub to_remove: Vec<Vni>,
    /// Allocated rows outside every range. Kept until released.
    pub retained_outside: u64,
}

impl SyncPlan {
    pub fn new(existing: &[VniAllocation], ranges: &RangeSet) -> Self {
        let mut plan = SyncPlan::default();
        for alloc in existing.iter().filter(|a| !ranges.contains(a.vni)) {
            if alloc.allocated {
                plan.retained_outside += 1;
            } else {
                plan.to_remove.push(alloc.vni);
            }
        }
        plan
    }
}
