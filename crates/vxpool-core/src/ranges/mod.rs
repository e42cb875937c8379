//! VNI ranges: parsing `<low>:<high>` entries from config and set arithmetic
//! over the validated intervals.

mod parse;
mod set;

pub use parse::{is_valid_vni, parse_range, parse_ranges, FormatCause, RangeError, VniRange};
pub use set::{Missing, RangeSet};

/// VXLAN network identifier. Stored as SQLite INTEGER.
pub type Vni = i64;

/// Smallest valid VXLAN VNI.
pub const ID_MIN: Vni = 1;

/// Largest valid VXLAN VNI (24-bit field).
pub const ID_MAX: Vni = (1 << 24) - 1;
