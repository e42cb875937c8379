//! Types used by the allocation database.

pub use crate::ranges::Vni;

/// One row of `vni_allocations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VniAllocation {
    pub vni: Vni,
    pub allocated: bool,
}

/// Row counts used by the CLI `status` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationCounts {
    pub total: i64,
    pub allocated: i64,
}

impl AllocationCounts {
    pub fn free(&self) -> i64 {
        self.total - self.allocated
    }
}
