//! `vxpool sync` – reconcile the allocation table with the configured ranges.

use vxpool_core::driver::VxlanTypeDriver;

/// Reconciliation already ran during driver initialization; report what it did.
pub fn run_sync(driver: &VxlanTypeDriver) {
    let stats = driver.sync_stats();
    println!(
        "Synced VNI pool: {} added, {} removed, {} allocated outside ranges kept",
        stats.added, stats.removed, stats.retained_outside
    );
}
