//! `vxpool allocate [--vni N]` – allocate a specific or any free VNI.

use anyhow::Result;
use vxpool_core::driver::{Segment, VxlanTypeDriver};

pub async fn run_allocate(driver: &VxlanTypeDriver, vni: Option<i64>, json: bool) -> Result<()> {
    let request = match vni {
        Some(vni) => Segment::vxlan(vni),
        None => Segment::partial(),
    };
    driver.validate_provider_segment(&request)?;
    let segment = driver.reserve_provider_segment(&request).await?;

    if json {
        println!("{}", serde_json::to_string(&segment)?);
    } else if let Some(vni) = segment.segmentation_id {
        println!("Allocated VNI {vni}");
    }
    Ok(())
}
