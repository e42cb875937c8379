//! VXLAN type driver: the front door used by the surrounding network plugin.
//!
//! `initialize` validates the configured ranges and reconciles the allocation
//! table; afterwards requests are routed by shape. A request naming a VNI goes
//! to `allocate_specific`, one without goes to `allocate_any`.

mod endpoints;
mod segment;

pub use endpoints::{EndpointRegistry, TunnelEndpoint};
pub use segment::{Segment, TYPE_H3C_VXLAN};

use crate::alloc_db::{AllocDb, Vni};
use crate::allocator::{ReleaseOutcome, SpecificAllocation};
use crate::config::VxpoolConfig;
use crate::error::DriverError;
use crate::ranges::{is_valid_vni, parse_ranges, RangeSet, VniRange};
use crate::reconcile::SyncStats;

pub struct VxlanTypeDriver {
    db: AllocDb,
    ranges: Vec<VniRange>,
    range_set: RangeSet,
    sync_stats: SyncStats,
}

impl VxlanTypeDriver {
    /// Validate `cfg.vni_ranges` and reconcile the table against them.
    ///
    /// Any error here means the pool is in an unknown state; callers must not
    /// start serving requests.
    pub async fn initialize(db: AllocDb, cfg: &VxpoolConfig) -> Result<Self, DriverError> {
        tracing::info!("VxlanTypeDriver initialize");
        let ranges = parse_ranges(&cfg.vni_ranges).map_err(|e| {
            tracing::error!("failed to parse vni_ranges: {e}");
            e
        })?;
        let range_set = RangeSet::from_ranges(&ranges);
        let sync_stats = db
            .sync_allocations(&range_set, cfg.bulk_size)
            .await
            .map_err(|e| {
                tracing::error!("failed to sync VXLAN VNI allocations: {e:#}");
                DriverError::Storage(e)
            })?;

        Ok(Self {
            db,
            ranges,
            range_set,
            sync_stats,
        })
    }

    pub fn get_type(&self) -> &'static str {
        TYPE_H3C_VXLAN
    }

    /// Validated ranges in configuration order.
    pub fn ranges(&self) -> &[VniRange] {
        &self.ranges
    }

    pub fn range_set(&self) -> &RangeSet {
        &self.range_set
    }

    /// What reconciliation changed during `initialize`.
    pub fn sync_stats(&self) -> SyncStats {
        self.sync_stats
    }

    pub fn db(&self) -> &AllocDb {
        &self.db
    }

    /// Allocate `vni` if given, otherwise any free VNI.
    pub async fn allocate(&self, vni: Option<Vni>) -> Result<Vni, DriverError> {
        match vni {
            Some(vni) => match self.db.allocate_specific(vni).await? {
                SpecificAllocation::Allocated => Ok(vni),
                SpecificAllocation::InUse => Err(DriverError::ResourceInUse(vni)),
                SpecificAllocation::NotFound => Err(DriverError::ResourceUnavailable(vni)),
            },
            None => self.db.allocate_any().await?.ok_or(DriverError::PoolExhausted),
        }
    }

    /// Allocate a tenant network segment. None when the pool is exhausted.
    pub async fn allocate_tenant_segment(&self) -> Result<Option<Segment>, DriverError> {
        match self.allocate(None).await {
            Ok(vni) => Ok(Some(Segment::vxlan(vni))),
            Err(DriverError::PoolExhausted) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check a provider segment request before reserving it.
    pub fn validate_provider_segment(&self, segment: &Segment) -> Result<(), DriverError> {
        if let Some(physnet) = &segment.physical_network {
            return Err(DriverError::InvalidSegment(format!(
                "provider:physical_network specified for {} network: {physnet}",
                self.get_type()
            )));
        }
        if let Some(vni) = segment.segmentation_id {
            if !is_valid_vni(vni) {
                return Err(DriverError::InvalidSegment(format!(
                    "segmentation_id {vni} is not a valid VXLAN VNI"
                )));
            }
        }
        Ok(())
    }

    /// Reserve the VNI of a provider segment, or any free VNI if it is partial.
    pub async fn reserve_provider_segment(&self, segment: &Segment) -> Result<Segment, DriverError> {
        let vni = self.allocate(segment.segmentation_id).await?;
        Ok(Segment::vxlan(vni))
    }

    /// Release the VNI carried by `segment`.
    pub async fn release_segment(&self, segment: &Segment) -> Result<(), DriverError> {
        let vni = segment
            .segmentation_id
            .ok_or_else(|| DriverError::InvalidSegment("segment has no segmentation_id".into()))?;
        self.release(vni).await.map(|_| ())
    }

    /// Release `vni`. An untracked VNI is logged and otherwise ignored.
    pub async fn release(&self, vni: Vni) -> Result<ReleaseOutcome, DriverError> {
        let outcome = self.db.release(vni, &self.range_set).await?;
        if outcome == ReleaseOutcome::NotFound {
            tracing::warn!("vxlan_vni {} not found", vni);
        }
        Ok(outcome)
    }
}
