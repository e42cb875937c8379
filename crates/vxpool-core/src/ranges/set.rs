//! Interval set over validated VNI ranges.
//!
//! Configured ranges can cover millions of VNIs, so membership and set
//! difference are computed on merged intervals instead of materialized sets.

use super::{Vni, VniRange};

/// Union of configured ranges, stored as sorted, disjoint, non-adjacent spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    spans: Vec<VniRange>,
}

impl RangeSet {
    pub fn from_ranges(ranges: &[VniRange]) -> Self {
        let mut sorted = ranges.to_vec();
        sorted.sort();

        let mut spans: Vec<VniRange> = Vec::with_capacity(sorted.len());
        for r in sorted {
            match spans.last_mut() {
                Some(last) if r.low <= last.high.saturating_add(1) => {
                    last.high = last.high.max(r.high);
                }
                _ => spans.push(r),
            }
        }
        Self { spans }
    }

    /// Merged spans in ascending order.
    pub fn spans(&self) -> &[VniRange] {
        &self.spans
    }

    pub fn contains(&self, vni: Vni) -> bool {
        let idx = self.spans.partition_point(|s| s.high < vni);
        self.spans.get(idx).is_some_and(|s| s.low <= vni)
    }

    /// Number of distinct VNIs covered.
    pub fn len(&self) -> u64 {
        self.spans.iter().map(VniRange::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Covered VNIs that do not appear in `existing`, in ascending order.
    ///
    /// `existing` must be sorted ascending (as returned by an `ORDER BY vni` scan).
    pub fn missing_from<'a>(&'a self, existing: &'a [Vni]) -> Missing<'a> {
        Missing {
            spans: &self.spans,
            span: 0,
            next: Vni::MIN,
            existing,
            pos: 0,
        }
    }
}

/// Iterator returned by [`RangeSet::missing_from`].
#[derive(Debug, Clone)]
pub struct Missing<'a> {
    spans: &'a [VniRange],
    span: usize,
    next: Vni,
    existing: &'a [Vni],
    pos: usize,
}

impl Iterator for Missing<'_> {
    type Item = Vni;

    fn next(&mut self) -> Option<Vni> {
        loop {
            let span = self.spans.get(self.span)?;
            if self.next < span.low {
                self.next = span.low;
            }
            if self.next > span.high {
                self.span += 1;
                continue;
            }

            let candidate = self.next;
            self.next += 1;

            // Skip past existing ids below the candidate; they belong to
            // earlier gaps or lie outside every span.
            let rest = &self.existing[self.pos..];
            self.pos += rest.partition_point(|&v| v < candidate);
            if self.existing.get(self.pos) == Some(&candidate) {
                self.pos += 1;
                continue;
            }
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(low: Vni, high: Vni) -> VniRange {
        VniRange { low, high }
    }

    #[test]
    fn from_ranges_merges_overlapping_and_adjacent() {
        let set = RangeSet::from_ranges(&[r(20, 30), r(1, 5), r(6, 8), r(25, 40), r(100, 100)]);
        assert_eq!(set.spans(), &[r(1, 8), r(20, 40), r(100, 100)]);
        assert_eq!(set.len(), 8 + 21 + 1);
    }

    #[test]
    fn contains_checks_span_bounds() {
        let set = RangeSet::from_ranges(&[r(10, 20), r(40, 50)]);
        for vni in [10, 15, 20, 40, 50] {
            assert!(set.contains(vni), "{vni}");
        }
        for vni in [0, 9, 21, 39, 51, 1000] {
            assert!(!set.contains(vni), "{vni}");
        }
        assert!(!RangeSet::default().contains(1));
        assert!(RangeSet::default().is_empty());
    }

    #[test]
    fn missing_from_empty_store_yields_every_vni() {
        let set = RangeSet::from_ranges(&[r(5, 7), r(1, 2)]);
        let missing: Vec<Vni> = set.missing_from(&[]).collect();
        assert_eq!(missing, vec![1, 2, 5, 6, 7]);
    }

    #[test]
    fn missing_from_skips_existing_ids() {
        let set = RangeSet::from_ranges(&[r(100, 105), r(200, 201)]);
        let existing = [3, 100, 102, 105, 150, 201, 999];
        let missing: Vec<Vni> = set.missing_from(&existing).collect();
        assert_eq!(missing, vec![101, 103, 104, 200]);
    }

    #[test]
    fn missing_from_fully_populated_is_empty() {
        let set = RangeSet::from_ranges(&[r(1, 4)]);
        assert_eq!(set.missing_from(&[1, 2, 3, 4]).count(), 0);
    }

    #[test]
    fn missing_from_large_range_is_lazy() {
        let set = RangeSet::from_ranges(&[r(1, 16_777_215)]);
        assert_eq!(set.len(), 16_777_215);
        let first: Vec<Vni> = set.missing_from(&[1, 3]).take(3).collect();
        assert_eq!(first, vec![2, 4, 5]);
    }
}
