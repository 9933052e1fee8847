use log::debug;

/// Root finding by bisection over a bracket whose ends straddle zero.
///
/// The function may rise or fall across the bracket; all that is required
/// is that its sign differs at the two ends, which is checked up front.
#[derive(Debug, Clone, Copy)]
pub struct Bisection {
    /// Stop once the function's magnitude falls below this.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for Bisection {
    fn default() -> Self {
        Bisection {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl Bisection {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Bisection {
            tolerance,
            max_iterations,
        }
    }

    /// Finds `x` in `[low, high]` with `f(x)` within tolerance of zero.
    ///
    /// Returns `None` if the bracket does not straddle a sign change, or
    /// if `f` cannot be evaluated. When the iteration cap is reached the
    /// midpoint of the remaining bracket is returned.
    pub fn root<F>(&self, mut f: F, mut low: f64, mut high: f64) -> Option<f64>
    where
        F: FnMut(f64) -> Option<f64>,
    {
        let at_low = f(low)?;
        let at_high = f(high)?;

        if at_low.is_nan() || at_high.is_nan() {
            return None;
        }

        if at_low.abs() <= self.tolerance {
            return Some(low);
        }

        if at_high.abs() <= self.tolerance {
            return Some(high);
        }

        if at_low.signum() == at_high.signum() {
            return None;
        }

        let rising = at_low < 0.0;

        for _ in 0..self.max_iterations {
            let middle = 0.5 * (low + high);
            let value = f(middle).filter(|value| !value.is_nan())?;

            if value.abs() <= self.tolerance || high - low <= f64::EPSILON * middle.abs().max(1.0) {
                return Some(middle);
            }

            if (value < 0.0) == rising {
                low = middle;
            } else {
                high = middle;
            }
        }

        debug!("Bisection reached {} iterations without converging", self.max_iterations);
        Some(0.5 * (low + high))
    }
}
