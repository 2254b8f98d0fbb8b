use rand::Rng;

use crate::geo::LatLng;

/// Latitude band for random views; the poles make poor demo material.
pub const RANDOM_LAT_RANGE: (f64, f64) = (-60.0, 70.0);
pub const RANDOM_LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// Uniform real in `[min, max)`. Returns `min` for an empty or inverted range.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Uniform integer in `[min, max]`. Returns `min` when `max < min`.
pub fn random_int_inclusive<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max < min {
        return min;
    }
    rng.gen_range(min..=max)
}

pub fn random_coordinates<R: Rng + ?Sized>(rng: &mut R) -> LatLng {
    LatLng::new(
        random_in_range(rng, RANDOM_LAT_RANGE.0, RANDOM_LAT_RANGE.1),
        random_in_range(rng, RANDOM_LNG_RANGE.0, RANDOM_LNG_RANGE.1),
    )
}
