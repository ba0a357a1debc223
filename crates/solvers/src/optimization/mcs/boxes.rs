use std::cmp::Ordering;

use ndarray::Array1;

use super::quadratic::Quadratic;

/// The inverse golden ratio, `(√5 - 1) / 2`.
pub(super) const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Whether a box is still a candidate for splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStatus {
    /// A leaf at the given split level.
    Active { level: usize },

    /// Already split into children.
    Split,
}

/// A node of the box partition.
///
/// Boxes live in an append-only arena and refer to their parent by index.
/// Split boxes stay in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBox {
    /// Arena index of the parent, `None` for the root.
    pub parent: Option<usize>,

    /// One-based position among the children of the same split, 0 for the root.
    pub ordinal: usize,

    /// Split level or split marker.
    pub status: BoxStatus,

    /// Objective value at `point`.
    pub value: f64,

    /// Representative point, inside the closed box.
    pub point: Array1<f64>,

    /// Lower corner.
    pub lower: Array1<f64>,

    /// Upper corner.
    pub upper: Array1<f64>,
}

impl SearchBox {
    /// Returns the split level of an active box.
    #[must_use]
    pub fn level(&self) -> Option<usize> {
        match self.status {
            BoxStatus::Active { level } => Some(level),
            BoxStatus::Split => None,
        }
    }

    /// Returns `true` if the box has not been split.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, BoxStatus::Active { .. })
    }

    /// Returns `true` if `x` lies in the closed box.
    #[must_use]
    pub fn contains(&self, x: &Array1<f64>) -> bool {
        x.len() == self.lower.len()
            && x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(x, (lo, hi))| lo <= x && x <= hi)
    }

    /// Returns the box's extent along `axis`.
    #[must_use]
    pub fn width(&self, axis: usize) -> f64 {
        self.upper[axis] - self.lower[axis]
    }
}

/// Objective samples along one axis, sorted by coordinate without duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct AxisSamples {
    pub(super) coords: Vec<f64>,
    pub(super) values: Vec<f64>,
}

impl AxisSamples {
    /// Sorts `(coordinate, value)` pairs and drops repeated coordinates,
    /// keeping the first value seen.
    pub(super) fn from_pairs(mut pairs: Vec<(f64, f64)>) -> Self {
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        pairs.dedup_by(|later, earlier| later.0 == earlier.0);

        let (coords, values) = pairs.into_iter().unzip();
        Self { coords, values }
    }

    pub(super) fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns the index of `coord`, if sampled.
    pub(super) fn position(&self, coord: f64) -> Option<usize> {
        self.coords.iter().position(|&c| c == coord)
    }

    /// Fits a quadratic to the three samples centred on `index` (shifted
    /// inward at the ends) and returns its minimizer on `[a, b]`.
    ///
    /// Returns `None` with fewer than three samples.
    pub(super) fn quadratic_min(&self, index: usize, a: f64, b: f64) -> Option<f64> {
        if self.len() < 3 {
            return None;
        }
        let start = index.saturating_sub(1).min(self.len() - 3);
        let x = [self.coords[start], self.coords[start + 1], self.coords[start + 2]];
        let f = [self.values[start], self.values[start + 1], self.values[start + 2]];

        Quadratic::new(x, f).map(|q| q.find_min(a, b))
    }
}

/// Splits `parent` along `axis` at the sampled coordinates and returns the
/// arena indices of the children in axis order.
///
/// Each child's representative point is `base` with its `axis` coordinate
/// replaced by a sample. Between two adjacent samples the interval is cut by
/// the golden ratio so the sample with the lower value keeps the larger
/// share, one level deeper than the parent; the other share goes two levels
/// deeper. The stretches between the outermost samples and the parent's
/// faces become boxes one level deeper. Levels saturate at `smax`.
///
/// The parent is marked [`BoxStatus::Split`]. Nothing happens if it is
/// already split or no samples are given.
pub(super) fn split(
    boxes: &mut Vec<SearchBox>,
    parent: usize,
    axis: usize,
    base: &Array1<f64>,
    samples: &AxisSamples,
    smax: usize,
) -> Vec<usize> {
    let Some(level) = boxes[parent].level() else {
        return Vec::new();
    };
    let (Some(&first), Some(&last)) = (samples.coords.first(), samples.coords.last()) else {
        return Vec::new();
    };

    let lower = boxes[parent].lower.clone();
    let upper = boxes[parent].upper.clone();
    let level_at = |depth: usize| BoxStatus::Active {
        level: (level + depth).min(smax),
    };

    // (lower face, upper face, depth, sample index)
    let mut pieces = Vec::with_capacity(2 * samples.len());
    if first > lower[axis] {
        pieces.push((lower[axis], first, 1, 0));
    }
    for j in 0..samples.len() - 1 {
        let (a, b) = (samples.coords[j], samples.coords[j + 1]);
        let (ratio, near, far) = if samples.values[j] < samples.values[j + 1] {
            (INV_PHI, 1, 2)
        } else {
            (1.0 - INV_PHI, 2, 1)
        };
        let cut = a + ratio * (b - a);
        pieces.push((a, cut, near, j));
        pieces.push((cut, b, far, j + 1));
    }
    if last < upper[axis] {
        pieces.push((last, upper[axis], 1, samples.len() - 1));
    }

    let mut children = Vec::with_capacity(pieces.len());
    for (ordinal, (lo, hi, depth, sample)) in pieces.into_iter().enumerate() {
        let mut child_lower = lower.clone();
        let mut child_upper = upper.clone();
        child_lower[axis] = lo;
        child_upper[axis] = hi;
        let mut point = base.clone();
        point[axis] = samples.coords[sample];

        children.push(boxes.len());
        boxes.push(SearchBox {
            parent: Some(parent),
            ordinal: ordinal + 1,
            status: level_at(depth),
            value: samples.values[sample],
            point,
            lower: child_lower,
            upper: child_upper,
        });
    }

    boxes[parent].status = BoxStatus::Split;
    children
}
