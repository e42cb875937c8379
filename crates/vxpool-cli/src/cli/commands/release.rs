//! `vxpool release <vni>` – return a VNI to the pool.

use anyhow::Result;
use vxpool_core::allocator::ReleaseOutcome;
use vxpool_core::driver::VxlanTypeDriver;

pub async fn run_release(driver: &VxlanTypeDriver, vni: i64) -> Result<()> {
    match driver.release(vni).await? {
        ReleaseOutcome::Returned => println!("Released VNI {vni} to pool"),
        ReleaseOutcome::Pruned => println!("Released VNI {vni} (outside configured ranges, removed)"),
        ReleaseOutcome::NotFound => println!("VNI {vni} is not tracked; nothing released"),
    }
    Ok(())
}
