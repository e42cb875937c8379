//! Errors surfaced by the VXLAN type driver.

use thiserror::Error;

use crate::ranges::{RangeError, Vni};

#[derive(Debug, Error)]
pub enum DriverError {
    /// `vni_ranges` is malformed. Fatal at initialization.
    #[error(transparent)]
    Range(#[from] RangeError),
    /// A fully specified request targeted an allocated VNI.
    #[error("VXLAN VNI {0} is already in use")]
    ResourceInUse(Vni),
    /// A fully specified request targeted a VNI with no backing row.
    #[error("VXLAN VNI {0} is not available for allocation")]
    ResourceUnavailable(Vni),
    /// A partially specified request found no free VNI.
    #[error("no VXLAN VNI available for allocation")]
    PoolExhausted,
    #[error("invalid segment: {0}")]
    InvalidSegment(String),
    /// The allocation database failed; the transaction was rolled back.
    #[error("allocation store error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl DriverError {
    /// Storage failures leave no partial mutation behind, so callers may retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, DriverError::Storage(_))
    }
}
