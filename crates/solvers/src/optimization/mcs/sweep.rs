use ndarray::Array1;
use plumb_core::Objective;
use tracing::debug;

use super::{
    Config, Error,
    boxes::{AxisSamples, INV_PHI, SearchBox, split},
    incumbent::Incumbent,
};

/// Minimum distance, relative to the box width, between a quadratic sample
/// and the coordinates already sampled.
const DISTINCT: f64 = 1e-6;

/// Returns the index of the lowest-valued active box on each level below
/// `smax`.
///
/// Boxes are scanned in arena order; a later box replaces a record only when
/// its value is strictly lower.
pub(super) fn find_ranks(boxes: &[SearchBox], smax: usize) -> Vec<Option<usize>> {
    let mut records: Vec<Option<usize>> = vec![None; smax];
    for (index, search_box) in boxes.iter().enumerate() {
        if let Some(level) = search_box.level().filter(|&level| level < smax) {
            offer(&mut records[level], boxes, index);
        }
    }
    records
}

/// Splits the record box of every level once, shallowest first.
///
/// Returns `false` without evaluating anything if no active box remains
/// below `smax`.
pub(super) fn sweep<F: Objective>(
    function: &F,
    config: &Config,
    boxes: &mut Vec<SearchBox>,
    incumbent: &mut Incumbent,
) -> Result<bool, Error> {
    let smax = config.smax();
    let mut records = find_ranks(boxes, smax);
    if records.iter().all(Option::is_none) {
        return Ok(false);
    }

    let range = config.upper() - config.lower();
    for level in 0..smax {
        let Some(record) = records[level] else {
            continue;
        };

        let axis = widest_axis(&boxes[record], &range);
        let base = boxes[record].point.clone();
        let line = sample_axis(function, &boxes[record], axis, incumbent)?;
        let children = split(boxes, record, axis, &base, &line, smax);

        debug!(level, record, axis, children = children.len(), "box split");

        for child in children {
            if let Some(deeper) = boxes[child].level().filter(|&l| l > level && l < smax) {
                offer(&mut records[deeper], boxes, child);
            }
        }
    }

    Ok(true)
}

fn offer(record: &mut Option<usize>, boxes: &[SearchBox], candidate: usize) {
    match *record {
        Some(current) if boxes[current].value <= boxes[candidate].value => {}
        _ => *record = Some(candidate),
    }
}

/// Returns the axis along which the box is widest relative to the bounds.
fn widest_axis(search_box: &SearchBox, range: &Array1<f64>) -> usize {
    let mut axis = 0;
    let mut widest = f64::NEG_INFINITY;
    for (i, full) in range.iter().enumerate() {
        let relative = search_box.width(i) / full;
        if relative > widest {
            axis = i;
            widest = relative;
        }
    }
    axis
}

/// Samples the box along `axis` through its representative point.
///
/// Two golden-section points go on the wider side of the point. When the
/// three samples admit a quadratic model, its minimizer over the box is added
/// if it is interior and not too close to an existing sample.
fn sample_axis<F: Objective>(
    function: &F,
    search_box: &SearchBox,
    axis: usize,
    incumbent: &mut Incumbent,
) -> Result<AxisSamples, Error> {
    let (lo, hi) = (search_box.lower[axis], search_box.upper[axis]);
    let centre = search_box.point[axis];

    let span = if hi - centre >= centre - lo {
        hi - centre
    } else {
        lo - centre
    };
    let mut coords = vec![centre + (1.0 - INV_PHI) * span, centre + INV_PHI * span];

    let at = |coord: f64, incumbent: &mut Incumbent| {
        let mut x = search_box.point.clone();
        x[axis] = coord;
        incumbent.evaluate(function, &x).map(|value| (coord, value))
    };

    let mut pairs = vec![(centre, search_box.value)];
    for &coord in &coords {
        pairs.push(at(coord, incumbent)?);
    }
    coords.push(centre);

    let line = AxisSamples::from_pairs(pairs.clone());
    let candidate = line.quadratic_min(1, lo, hi);
    if let Some(coord) = candidate {
        let width = hi - lo;
        let interior = lo < coord && coord < hi;
        let distinct = coords
            .iter()
            .all(|&c| (c - coord).abs() >= DISTINCT * width);
        if interior && distinct {
            pairs.push(at(coord, incumbent)?);
            return Ok(AxisSamples::from_pairs(pairs));
        }
    }

    Ok(line)
}
