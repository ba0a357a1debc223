use plumb_core::Objective;
use tracing::debug;

use super::{
    Config, Error,
    boxes::{AxisSamples, BoxStatus, SearchBox, split},
    incumbent::Incumbent,
};

/// Evaluates the initial samples and splits the root once along every axis.
///
/// The base point takes, axis by axis, the sample coordinate that lowered the
/// objective most given the coordinates already chosen. Each axis then splits
/// the box holding the base point at the sample coordinates, and the next
/// axis continues in the child next to the base point on the side where a
/// quadratic fit through the samples has its minimum.
pub(super) fn initialize<F: Objective>(
    function: &F,
    config: &Config,
) -> Result<(Vec<SearchBox>, Incumbent), Error> {
    let samples = config.samples();
    let smax = config.smax();

    let mut incumbent = Incumbent::start(function, &samples[0])?;
    let mut base = samples[0].clone();
    let mut base_value = incumbent.value;
    for sample in &samples[1..] {
        incumbent.evaluate(function, sample)?;
    }

    for axis in 0..config.dimension() {
        let mut best = base[axis];
        for sample in &samples[1..] {
            if sample[axis] == best {
                continue;
            }
            let mut x = base.clone();
            x[axis] = sample[axis];
            let value = incumbent.evaluate(function, &x)?;
            if value < base_value {
                best = sample[axis];
                base_value = value;
            }
        }
        base[axis] = best;
    }

    let mut boxes = vec![SearchBox {
        parent: None,
        ordinal: 0,
        status: BoxStatus::Active { level: 0 },
        value: base_value,
        point: base.clone(),
        lower: config.lower().clone(),
        upper: config.upper().clone(),
    }];

    let mut parent = 0;
    for axis in 0..config.dimension() {
        let mut pairs = Vec::with_capacity(samples.len());
        for sample in &samples {
            let coord = sample[axis];
            let value = if coord == base[axis] {
                base_value
            } else {
                let mut x = base.clone();
                x[axis] = coord;
                incumbent.evaluate(function, &x)?
            };
            pairs.push((coord, value));
        }
        let line = AxisSamples::from_pairs(pairs);

        let quadratic_min = line
            .position(base[axis])
            .and_then(|index| {
                let (first, last) = (line.coords[0], line.coords[line.len() - 1]);
                line.quadratic_min(index, first, last)
            })
            .unwrap_or(base[axis]);

        let children = split(&mut boxes, parent, axis, &base, &line, smax);
        parent = next_parent(&boxes, &children, axis, base[axis], quadratic_min).unwrap_or(parent);
    }

    debug!(
        boxes = boxes.len(),
        value = incumbent.value,
        "initial boxes created"
    );

    Ok((boxes, incumbent))
}

/// Picks the child whose face touches `coord` on the side of `toward`.
fn next_parent(
    boxes: &[SearchBox],
    children: &[usize],
    axis: usize,
    coord: f64,
    toward: f64,
) -> Option<usize> {
    let left = children.iter().copied().find(|&c| boxes[c].upper[axis] == coord);
    let right = children.iter().copied().find(|&c| boxes[c].lower[axis] == coord);

    if toward < coord {
        left.or(right)
    } else {
        right.or(left)
    }
}
