pub mod bs;
pub mod payoff;

/// Standard normal helpers shared by the closed form and its Greeks
pub mod utils {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    /// Standard normal cumulative distribution function Φ.
    ///
    /// Written through `erfc` rather than `1 + erf` so that the left tail keeps
    /// its relative precision instead of cancelling against 1.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
    }

    /// Standard normal density φ.
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

}
