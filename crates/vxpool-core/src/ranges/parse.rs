//! Range entry parsing and validation.

use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

use super::{Vni, ID_MAX, ID_MIN};

/// Inclusive VNI range `low..=high`, validated so that `low <= high` and both
/// bounds lie in `ID_MIN..=ID_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VniRange {
    pub low: Vni,
    pub high: Vni,
}

impl VniRange {
    pub fn contains(&self, vni: Vni) -> bool {
        self.low <= vni && vni <= self.high
    }

    /// Number of VNIs covered by this range.
    pub fn len(&self) -> u64 {
        (self.high - self.low) as u64 + 1
    }
}

impl fmt::Display for VniRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.low, self.high)
    }
}

/// Why a range entry could not be split into two integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatCause {
    #[error("expected <low>:<high>, found {0} token(s)")]
    TokenCount(usize),
    #[error(transparent)]
    Int(#[from] ParseIntError),
}

/// Configuration error in `vni_ranges`. Always fatal at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Entry is not `<low>:<high>` with integer bounds.
    #[error("invalid VNI range {entry:?}: {cause}")]
    Format {
        entry: String,
        #[source]
        cause: FormatCause,
    },
    /// A bound lies outside `ID_MIN..=ID_MAX`; `id` is the first offending one.
    #[error("invalid VNI range {low}:{high}: {id} is not a valid VNI (1..=16777215)")]
    Value { low: Vni, high: Vni, id: Vni },
    #[error("invalid VNI range {low}:{high}: end of range is less than start of range")]
    Order { low: Vni, high: Vni },
}

pub fn is_valid_vni(vni: Vni) -> bool {
    (ID_MIN..=ID_MAX).contains(&vni)
}

/// Parse and validate a single `<low>:<high>` entry. Whitespace around the entry
/// and around each bound is ignored.
pub fn parse_range(entry: &str) -> Result<VniRange, RangeError> {
    let entry = entry.trim();
    let format_err = |cause: FormatCause| RangeError::Format {
        entry: entry.to_string(),
        cause,
    };

    let tokens: Vec<&str> = entry.split(':').collect();
    let [low, high] = tokens.as_slice() else {
        return Err(format_err(FormatCause::TokenCount(tokens.len())));
    };
    let low: Vni = low.trim().parse().map_err(|e: ParseIntError| format_err(e.into()))?;
    let high: Vni = high.trim().parse().map_err(|e: ParseIntError| format_err(e.into()))?;

    for id in [low, high] {
        if !is_valid_vni(id) {
            return Err(RangeError::Value { low, high, id });
        }
    }
    if high < low {
        return Err(RangeError::Order { low, high });
    }

    Ok(VniRange { low, high })
}

/// Parse every entry, preserving input order. The first bad entry aborts the
/// whole parse; nothing is returned for the entries before it.
pub fn parse_ranges<S: AsRef<str>>(entries: &[S]) -> Result<Vec<VniRange>, RangeError> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        out.push(parse_range(entry.as_ref())?);
    }

    let shown: Vec<String> = out.iter().map(VniRange::to_string).collect();
    tracing::info!("VXLAN VNI ranges: [{}]", shown.join(", "));
    Ok(out)
}
