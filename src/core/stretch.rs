//! Percentile stretch for quicklook rendering.
//!
//! Pigment concentrations are strictly positive and span orders of magnitude,
//! so valid pixels are log10-transformed before a 5th..95th percentile linear
//! rescale. Missing pixels are carried as NaN and excluded from every
//! statistic. The rescale is a stretch, not a clip: values outside the
//! percentile band land outside [0, 1] and stay there.
use ndarray::Array2;
use tracing::debug;

use crate::error::{Error, Result};

pub const LOW_PERCENTILE: f64 = 5.0;
pub const HIGH_PERCENTILE: f64 = 95.0;

/// Percentile band used for the linear rescale, in log10 space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StretchRange {
    pub low: f32,
    pub high: f32,
}

/// Replace every pixel equal to the nodata sentinel with NaN so it drops out
/// of all subsequent statistics.
pub fn mask_nodata(data: &mut Array2<f32>, nodata: f64) {
    let sentinel = nodata as f32;
    data.mapv_inplace(|v| if v == sentinel { f32::NAN } else { v });
}

/// Base-10 logarithm of every valid pixel, in place.
///
/// Valid pixels must be strictly positive; a non-positive measurement means
/// the upstream retrieval produced something that is not a concentration.
pub fn log10_valid(data: &mut Array2<f32>, context: &str) -> Result<()> {
    if data.iter().any(|v| !v.is_nan() && *v <= 0.0) {
        return Err(Error::InvalidRange {
            context: context.to_string(),
            reason: "valid pixels must be > 0 for log scaling",
        });
    }
    data.mapv_inplace(|v| if v.is_nan() { v } else { v.log10() });
    Ok(())
}

/// Percentile of an ascending-sorted, NaN-free slice with linear
/// interpolation between the two nearest ranks.
pub fn percentile(sorted: &[f32], p: f64) -> f32 {
    debug_assert!(!sorted.is_empty());
    let rank = (p / 100.0) * ((sorted.len() - 1) as f64);
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = (rank - lo as f64) as f32;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Rescale every valid pixel to `(v - p05) / (p95 - p05)`, in place.
///
/// Returns `None` when there are no valid pixels. A degenerate band
/// (p95 == p05) maps every valid pixel to the low end of the scale.
pub fn rescale_to_percentile_band(data: &mut Array2<f32>) -> Option<StretchRange> {
    let mut valid: Vec<f32> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.is_empty() {
        return None;
    }
    valid.sort_unstable_by(f32::total_cmp);

    let low = percentile(&valid, LOW_PERCENTILE);
    let high = percentile(&valid, HIGH_PERCENTILE);
    let span = high - low;
    debug!(
        valid = valid.len(),
        low = f64::from(low),
        high = f64::from(high),
        "quicklook percentile stretch"
    );

    if span == 0.0 {
        data.mapv_inplace(|v| if v.is_nan() { v } else { 0.0 });
    } else {
        data.mapv_inplace(|v| if v.is_nan() { v } else { (v - low) / span });
    }
    Some(StretchRange { low, high })
}
