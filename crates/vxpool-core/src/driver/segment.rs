//! Network segment descriptor exchanged with the plugin.

use serde::{Deserialize, Serialize};

use crate::alloc_db::Vni;

pub const TYPE_H3C_VXLAN: &str = "h3c_vxlan";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub network_type: String,
    /// Always None for VXLAN; tunnels are not bound to a physical network.
    #[serde(default)]
    pub physical_network: Option<String>,
    /// None for a partially specified request.
    #[serde(default)]
    pub segmentation_id: Option<Vni>,
}

impl Segment {
    /// Fully specified VXLAN segment for `vni`.
    pub fn vxlan(vni: Vni) -> Self {
        Self {
            network_type: TYPE_H3C_VXLAN.to_string(),
            physical_network: None,
            segmentation_id: Some(vni),
        }
    }

    /// Segment request that leaves the VNI choice to the allocator.
    pub fn partial() -> Self {
        Self {
            network_type: TYPE_H3C_VXLAN.to_string(),
            physical_network: None,
            segmentation_id: None,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.segmentation_id.is_none()
    }
}
