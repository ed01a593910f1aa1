//! Weighted combination of sub-scores into a bounded score.
//!
//! The confidence model, the additive predictor, and the quality combiner
//! all reduce to `clamp(base + Σ value·weight)`. They share this module so
//! the bounds handling (including non-finite input) lives in one place.

/// Closed interval a score is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound, also the value used for non-finite results.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Bounds {
    /// Create bounds. `min` must not exceed `max`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the bounds. Non-finite values map to `min`.
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.min
        }
    }

    /// Whether `value` lies inside the bounds.
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// One weighted input to [`combine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted {
    /// The sub-score or delta.
    pub value: f64,
    /// Its multiplier.
    pub weight: f64,
}

impl Weighted {
    /// Pair a value with its weight.
    pub const fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }

    /// A value that enters the sum unscaled.
    pub const fn unit(value: f64) -> Self {
        Self { value, weight: 1.0 }
    }
}

/// Compute `clamp(base + Σ value·weight, bounds)`.
pub fn combine<I>(base: f64, terms: I, bounds: Bounds) -> f64
where
    I: IntoIterator<Item = Weighted>,
{
    let total = terms
        .into_iter()
        .fold(base, |acc, t| t.value.mul_add(t.weight, acc));
    bounds.clamp(total)
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to `places` decimal places.
pub fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}
