use crate::core_types::{IdeoIdx, Link, Score};
use rayon::prelude::*;

/// Sentinel slot for ideograms absent from the order.
const NO_SLOT: usize = usize::MAX;

/// A link laid out on the concatenated axis, `start <= end`.
pub type Segment = (f64, f64);

#[inline(always)]
fn inside(x: f64, seg: Segment) -> bool {
    x > seg.0 && x < seg.1
}

/// Two segments cross when each has exactly one endpoint strictly inside the other.
/// Nested, disjoint and endpoint-sharing segments do not cross.
#[inline(always)]
pub fn crosses(a: Segment, b: Segment) -> bool {
    (inside(b.0, a) != inside(b.1, a)) && (inside(a.0, b) != inside(a.1, b))
}

/// Places every link on the axis implied by `order`.
/// Links with an end outside the order are dropped.
pub fn layout_segments(order: &[IdeoIdx], links: &[Link], ideogram_count: usize) -> Vec<Segment> {
    let mut slots = vec![NO_SLOT; ideogram_count];
    for (slot, &idx) in order.iter().enumerate() {
        slots[idx] = slot;
    }

    let mut segments: Vec<Segment> = links
        .iter()
        .filter_map(|l| {
            let s1 = slots[l.ideo1];
            let s2 = slots[l.ideo2];
            if s1 == NO_SLOT || s2 == NO_SLOT {
                return None;
            }
            let p1 = s1 as f64 + l.frac1;
            let p2 = s2 as f64 + l.frac2;
            Some(if p1 <= p2 { (p1, p2) } else { (p2, p1) })
        })
        .collect();

    // Sorted by start, a segment can only cross later segments that begin before it ends.
    segments.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    segments
}

#[inline]
fn crossings_from(segments: &[Segment], i: usize) -> Score {
    let a = segments[i];
    let mut count = 0;
    for &b in &segments[i + 1..] {
        if b.0 >= a.1 {
            break;
        }
        if crosses(a, b) {
            count += 1;
        }
    }
    count
}

/// Counts crossing pairs among segments sorted by [`layout_segments`].
pub fn count_crossings(segments: &[Segment]) -> Score {
    (0..segments.len())
        .map(|i| crossings_from(segments, i))
        .sum()
}

pub fn count_crossings_par(segments: &[Segment]) -> Score {
    (0..segments.len())
        .into_par_iter()
        .map(|i| crossings_from(segments, i))
        .sum()
}

/// Reference count over every unordered pair, without sorting or pruning.
pub fn count_crossings_naive(segments: &[Segment]) -> Score {
    let mut count = 0;
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if crosses(segments[i], segments[j]) {
                count += 1;
            }
        }
    }
    count
}
