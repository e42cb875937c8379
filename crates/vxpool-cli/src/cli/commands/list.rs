//! `vxpool list` – show tracked VNIs.

use anyhow::Result;
use vxpool_core::driver::VxlanTypeDriver;

pub async fn run_list(driver: &VxlanTypeDriver, only_allocated: bool) -> Result<()> {
    let rows = driver.db().list_allocations(only_allocated).await?;
    if rows.is_empty() {
        println!("No VNIs in database.");
        return Ok(());
    }

    println!("{:<10} {:<10} {}", "VNI", "STATE", "IN RANGE");
    for row in rows {
        let state = if row.allocated { "allocated" } else { "free" };
        let in_range = if driver.range_set().contains(row.vni) { "yes" } else { "no" };
        println!("{:<10} {:<10} {}", row.vni, state, in_range);
    }
    Ok(())
}
