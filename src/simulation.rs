//! Synthetic readings standing in for real sensor hardware.

use rand::Rng;

/// Coldest reading the simulated sensor can produce, in °C.
pub const MIN_TEMP_C: f64 = -15.0;
/// Warmest reading the simulated sensor can produce, in °C.
pub const MAX_TEMP_C: f64 = 30.0;

/// Draw a uniformly distributed temperature in `[MIN_TEMP_C, MAX_TEMP_C]`,
/// rounded to 2 decimal places.
pub fn random_temperature() -> f64 {
    round2(rand::thread_rng().gen_range(MIN_TEMP_C..=MAX_TEMP_C))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
