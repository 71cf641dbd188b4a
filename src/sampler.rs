//! Bounded-normal sampling around point values
//!
//! A range `[min, max]` is read as ±3 standard deviations around its midpoint.
//! Draws are NOT truncated: roughly 0.27% of samples land outside the range,
//! as a plain normal would put them.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Standard deviations spanned by each half of a sampling range
const SIGMAS_PER_HALF_RANGE: f64 = 3.0;

/// Creates a seeded, reproducible random number generator.
///
/// # Examples
/// ```
/// use closure_delay::sampler::{create_rng, sample_bounded};
/// let mut a = create_rng(42);
/// let mut b = create_rng(42);
/// assert_eq!(sample_bounded(&mut a, 0.0, 6.0), sample_bounded(&mut b, 0.0, 6.0));
/// ```
pub fn create_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator seeded from operating system entropy
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

/// Draw one value from N((min+max)/2, (max−min)/6).
///
/// Consumes exactly one standard-normal draw. NaN or infinite bounds are not
/// guarded and propagate into the result.
pub fn sample_bounded<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let mean = min + (max - min) / 2.0;
    let std_dev = ((max - min) / 2.0) / SIGMAS_PER_HALF_RANGE;
    let z: f64 = rng.sample(StandardNormal);
    z * std_dev + mean
}

/// Bounds used by [`sample_around`]: `(-value·flex, value·(1+flex))`.
///
/// The lower bound is NOT `value·(1−flex)`. With `flex = 0.2` a value of 100
/// is sampled over `[-20, 120]`, centred on 50.
pub fn flex_bounds(value: f64, flex: f64) -> (f64, f64) {
    (value * (0.0 - flex), value * (1.0 + flex))
}

/// Perturb a point value using the range from [`flex_bounds`]
pub fn sample_around<R: Rng + ?Sized>(rng: &mut R, value: f64, flex: f64) -> f64 {
    let (min, max) = flex_bounds(value, flex);
    sample_bounded(rng, min, max)
}
