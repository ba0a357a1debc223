/// A quadratic through three samples, in Newton divided-difference form.
///
/// `q(t) = c0 + c1 (t - x0) + c2 (t - x0)(t - x1)`
///
/// Used by multilevel coordinate search to place split points along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    x: [f64; 3],
    coeff: [f64; 3],
}

impl Quadratic {
    /// Fits the quadratic through `(x[k], f[k])`.
    ///
    /// Returns `None` unless the `x` are finite and strictly increasing and
    /// the `f` are finite.
    #[must_use]
    pub fn new(x: [f64; 3], f: [f64; 3]) -> Option<Self> {
        let finite = x.iter().chain(&f).all(|v| v.is_finite());
        if !finite || !(x[0] < x[1] && x[1] < x[2]) {
            return None;
        }

        let d01 = (f[1] - f[0]) / (x[1] - x[0]);
        let d12 = (f[2] - f[1]) / (x[2] - x[1]);
        let coeff = [f[0], d01, (d12 - d01) / (x[2] - x[0])];

        Some(Self { x, coeff })
    }

    /// Returns the coefficients `[c0, c1, c2]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 3] {
        self.coeff
    }

    /// Evaluates the quadratic at `t`.
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        let [c0, c1, c2] = self.coeff;
        c0 + c1 * (t - self.x[0]) + c2 * (t - self.x[0]) * (t - self.x[1])
    }

    /// Returns the minimizer of the quadratic on `[a, b]`.
    ///
    /// A linear model (zero curvature) yields the endpoint its slope points
    /// toward. A convex model yields its vertex when inside `[a, b]`. Every
    /// other case yields the endpoint with the smaller model value.
    #[must_use]
    pub fn find_min(&self, a: f64, b: f64) -> f64 {
        self.extremum(a, b, 1.0)
    }

    /// Returns the maximizer of the quadratic on `[a, b]`.
    ///
    /// Mirrors [`find_min`](Self::find_min) on the negated model.
    #[must_use]
    pub fn find_max(&self, a: f64, b: f64) -> f64 {
        self.extremum(a, b, -1.0)
    }

    fn extremum(&self, a: f64, b: f64, sign: f64) -> f64 {
        let [_, c1, c2] = self.coeff.map(|c| sign * c);
        let better_endpoint = || {
            if sign * self.value(a) < sign * self.value(b) {
                a
            } else {
                b
            }
        };

        if c2 == 0.0 {
            return if c1 > 0.0 { a } else { b };
        }
        if c2 > 0.0 {
            let vertex = 0.5 * (self.x[0] + self.x[1]) - 0.5 * c1 / c2;
            if a <= vertex && vertex <= b {
                return vertex;
            }
        }
        better_endpoint()
    }
}
