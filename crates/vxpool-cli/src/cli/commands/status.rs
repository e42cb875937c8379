//! `vxpool status` – pool counts and configured ranges.

use anyhow::Result;
use vxpool_core::driver::VxlanTypeDriver;

pub async fn run_status(driver: &VxlanTypeDriver) -> Result<()> {
    let counts = driver.db().count_allocations().await?;
    let ranges: Vec<String> = driver.ranges().iter().map(|r| r.to_string()).collect();

    println!("Type:      {}", driver.get_type());
    if ranges.is_empty() {
        println!("Ranges:    (none)");
    } else {
        println!("Ranges:    {}", ranges.join(", "));
    }
    println!("Tracked:   {}", counts.total);
    println!("Allocated: {}", counts.allocated);
    println!("Free:      {}", counts.free());
    Ok(())
}
