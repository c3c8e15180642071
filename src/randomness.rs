// randomness.rs

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;

use crate::error::PersonalityError;

/// Injected random-number capability.
///
/// The core consumes this sequentially; it never stores a source across
/// calls. `gauss` is part of the capability contract for compatibility
/// with caller-supplied sources, even though the sampling engine itself
/// only draws through `uniform`.
pub trait RandomSource {
    /// Draws a uniform value in `[a, b]`.
    fn uniform(&mut self, a: f64, b: f64) -> f64;

    /// Draws a Gaussian value with the given mean and stddev.
    fn gauss(&mut self, mean: f64, stddev: f64) -> f64;
}

/// Default seedable random source backed by a PCG generator.
///
/// Every stream is fully reproducible from its seed: two sources built
/// with the same seed produce identical draw sequences.
pub struct DefaultRandomSource {
    rng: Pcg64Mcg,
}

impl DefaultRandomSource {
    /// Creates a source with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64Mcg::from_entropy(),
        }
    }
}

impl RandomSource for DefaultRandomSource {
    fn uniform(&mut self, a: f64, b: f64) -> f64 {
        self.rng.gen_range(a..=b)
    }

    fn gauss(&mut self, mean: f64, stddev: f64) -> f64 {
        match Normal::new(mean, stddev) {
            Ok(dist) => dist.sample(&mut self.rng),
            // The capability signature cannot report a bad stddev, so a
            // degenerate distribution collapses to its mean.
            Err(_) => mean,
        }
    }
}

/// Draws one value from a Gaussian truncated to `[min_value, max_value]`.
///
/// Implemented by inverse-CDF mapping: a uniform draw over
/// `[CDF(min_value), CDF(max_value)]` is pushed back through the inverse
/// normal CDF, which yields an exact truncated-normal sample with no
/// rejection loop. A collapsed interval (`min_value == max_value`)
/// returns that bound directly without consulting the random source.
///
/// # Arguments
/// * `mean` - Mean of the underlying Gaussian.
/// * `stddev` - Stddev of the underlying Gaussian, must be positive.
/// * `min_value` - Lower truncation bound.
/// * `max_value` - Upper truncation bound, must be >= `min_value`.
/// * `rng` - The random source consumed for the single uniform draw.
///
/// # Returns
/// * `Ok(value)` with `value` in `[min_value, max_value]`.
/// * `Err(PersonalityError)` on a non-positive stddev or inverted bounds.
pub fn random_gaussian(
    mean: f64,
    stddev: f64,
    min_value: f64,
    max_value: f64,
    rng: &mut dyn RandomSource,
) -> Result<f64, PersonalityError> {
    if stddev <= 0.0 {
        return Err(PersonalityError::NonPositiveStddev { stddev });
    }
    if min_value > max_value {
        return Err(PersonalityError::InvalidBounds {
            min_value,
            max_value,
        });
    }
    if min_value == max_value {
        return Ok(min_value);
    }

    let cdf_lo = normal_cdf(min_value, mean, stddev);
    let cdf_hi = normal_cdf(max_value, mean, stddev);
    let u = rng.uniform(cdf_lo, cdf_hi);
    let value = normal_inverse_cdf(u, mean, stddev);

    // The inversion is numeric, so pin the result to the interval.
    Ok(value.clamp(min_value, max_value))
}

/// Normal CDF under `(mean, stddev)` via the error function.
fn normal_cdf(x: f64, mean: f64, stddev: f64) -> f64 {
    let z = (x - mean) / (stddev * std::f64::consts::SQRT_2);
    0.5 * (1.0 + erf(z))
}

/// Error function, Abramowitz & Stegun approximation 7.1.26.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Inverse normal CDF under `(mean, stddev)`.
fn normal_inverse_cdf(p: f64, mean: f64, stddev: f64) -> f64 {
    mean + stddev * standard_normal_quantile(p)
}

/// Standard normal quantile: Acklam's rational approximation refined
/// with Halley steps against `normal_cdf`, so that the quantile is the
/// numeric inverse of the CDF used above.
fn standard_normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    // Truncated tails cannot reach exactly 0 or 1.
    let p = p.clamp(f64::MIN_POSITIVE, 1.0 - 1e-16);

    let mut x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p > 1.0 - P_LOW {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    };

    // Refine in the central region only; further out the CDF saturates
    // and the rational approximation alone is already tighter than the
    // truncation bounds the sampler clamps to.
    if x.abs() < 8.0 {
        const SQRT_2PI: f64 = 2.5066282746310002;
        for _ in 0..2 {
            let e = normal_cdf(x, 0.0, 1.0) - p;
            let u = e * SQRT_2PI * (x * x / 2.0).exp();
            x -= u / (1.0 + x * u / 2.0);
        }
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the midpoint of the requested interval.
    struct MidpointRandom;

    impl RandomSource for MidpointRandom {
        fn uniform(&mut self, a: f64, b: f64) -> f64 {
            (a + b) / 2.0
        }

        fn gauss(&mut self, _mean: f64, _stddev: f64) -> f64 {
            panic!("gauss is not expected in this test");
        }
    }

    /// Fails the test if the sampler touches the random source at all.
    struct UntouchableRandom;

    impl RandomSource for UntouchableRandom {
        fn uniform(&mut self, _a: f64, _b: f64) -> f64 {
            panic!("uniform is not expected in this test");
        }

        fn gauss(&mut self, _mean: f64, _stddev: f64) -> f64 {
            panic!("gauss is not expected in this test");
        }
    }

    /// Returns a fixed fraction of the way through the interval.
    struct FractionRandom(f64);

    impl RandomSource for FractionRandom {
        fn uniform(&mut self, a: f64, b: f64) -> f64 {
            a + (b - a) * self.0
        }

        fn gauss(&mut self, _mean: f64, _stddev: f64) -> f64 {
            panic!("gauss is not expected in this test");
        }
    }

    #[test]
    fn random_gaussian_stays_within_bounds() {
        let mut rng = MidpointRandom;
        let value = random_gaussian(0.6, 0.1, 0.01, 1.0, &mut rng).unwrap();
        assert!((0.01..=1.0).contains(&value));
    }

    #[test]
    fn random_gaussian_boundary_draws_return_the_bounds() {
        let min = random_gaussian(0.5, 0.2, 0.2, 0.9, &mut FractionRandom(0.0)).unwrap();
        let max = random_gaussian(0.5, 0.2, 0.2, 0.9, &mut FractionRandom(1.0)).unwrap();
        assert!((min - 0.2).abs() < 1e-6, "got {min}");
        assert!((max - 0.9).abs() < 1e-6, "got {max}");
    }

    #[test]
    fn random_gaussian_midpoint_of_symmetric_bounds_is_the_mean() {
        let mut rng = MidpointRandom;
        let value = random_gaussian(0.5, 0.1, 0.2, 0.8, &mut rng).unwrap();
        assert!((value - 0.5).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn random_gaussian_clamps_when_bounds_collapse() {
        let mut rng = UntouchableRandom;
        let value = random_gaussian(0.8, 0.1, 0.25, 0.25, &mut rng).unwrap();
        assert_eq!(value, 0.25);
    }

    #[test]
    fn random_gaussian_rejects_non_positive_stddev() {
        let mut rng = UntouchableRandom;
        let err = random_gaussian(0.5, 0.0, 0.0, 1.0, &mut rng).unwrap_err();
        assert!(err.to_string().starts_with("stddev must be positive"));
    }

    #[test]
    fn random_gaussian_rejects_invalid_bounds() {
        let mut rng = UntouchableRandom;
        let err = random_gaussian(0.5, 0.1, 0.9, 0.1, &mut rng).unwrap_err();
        assert!(err.to_string().starts_with("min_value must be <= max_value"));
    }

    #[test]
    fn inverse_cdf_round_trips_through_cdf() {
        for &x in &[0.1, 0.3, 0.5, 0.6, 0.85, 0.99] {
            let p = normal_cdf(x, 0.6, 0.1);
            let back = normal_inverse_cdf(p, 0.6, 0.1);
            assert!((back - x).abs() < 1e-6, "x = {x}, back = {back}");
        }
    }

    #[test]
    fn default_source_is_reproducible_for_a_seed() {
        let mut a = DefaultRandomSource::new(42);
        let mut b = DefaultRandomSource::new(42);
        for _ in 0..10 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }

    #[test]
    fn default_source_gauss_is_finite() {
        let mut rng = DefaultRandomSource::new(7);
        for _ in 0..10 {
            assert!(rng.gauss(0.5, 0.1).is_finite());
        }
    }
}
