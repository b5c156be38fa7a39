//! Forward and inverse transforms between real samples and scaled spectra
//!
//! Two implementations of the same forward contract: [`Dft`] computes the
//! direct summation and works for any working length, [`Fft`] is the fast
//! path for power-of-two working lengths. Callers pick one based on size;
//! for equal inputs and working lengths the two agree bin for bin.

pub mod dft;
pub mod fft;

pub use dft::Dft;
pub use fft::Fft;

use num_complex::Complex;

use crate::error::{Result, SpectrumError};

/// Common capability of the direct and fast forward transforms.
///
/// Implementations are immutable once constructed, so a single configured
/// instance can serve concurrent calls on independent inputs.
pub trait SpectrumTransform {
    /// Transform `input_length()` real samples into the scaled half-spectrum.
    fn transform(&self, samples: &[f64]) -> Result<Vec<Complex<f64>>>;

    /// Number of samples each call expects.
    fn input_length(&self) -> usize;

    /// Transform size actually used (input length plus zero padding).
    fn working_length(&self) -> usize;

    /// Number of retained output bins: `working_length / 2 + 1`.
    fn num_bins(&self) -> usize {
        self.working_length() / 2 + 1
    }
}

/// Bin-center frequencies `[0, fs/N, 2*fs/N, ...]` up to Nyquist.
///
/// Companion X axis for plotting a half-spectrum produced with the given
/// working length.
pub fn frequency_span(sample_rate: f64, working_length: usize) -> Vec<f64> {
    let step = sample_rate / working_length as f64;
    (0..=working_length / 2).map(|k| k as f64 * step).collect()
}

/// Scale raw transform sums into the half-spectrum convention.
///
/// Only the first `N/2 + 1` bins of a real-input transform are retained; the
/// mirrored negative-frequency energy is folded into the interior bins, which
/// therefore carry `2/N` times the raw sum. DC and (for even `N`) Nyquist
/// have no mirror image and stay at `1/N`.
pub(crate) fn scale_half_spectrum(bins: &mut [Complex<f64>], working_length: usize) {
    let n = working_length as f64;
    let nyquist = (working_length % 2 == 0).then_some(working_length / 2);
    for (k, bin) in bins.iter_mut().enumerate() {
        let scale = if k == 0 || Some(k) == nyquist {
            1.0 / n
        } else {
            2.0 / n
        };
        *bin *= scale;
    }
}

pub(crate) fn check_finite(samples: &[f64]) -> Result<()> {
    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SpectrumError::NumericDomain(index)),
        None => Ok(()),
    }
}

pub(crate) fn check_finite_complex(bins: &[Complex<f64>]) -> Result<()> {
    match bins
        .iter()
        .position(|c| !c.re.is_finite() || !c.im.is_finite())
    {
        Some(index) => Err(SpectrumError::NumericDomain(index)),
        None => Ok(()),
    }
}

pub(crate) fn check_length(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SpectrumError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Validate the size parameters shared by both transforms.
pub(crate) fn check_sizes(input_length: usize, working_length: usize) -> Result<()> {
    if input_length < 1 {
        return Err(SpectrumError::Configuration(
            "input length must be at least 1".into(),
        ));
    }
    if working_length < input_length {
        return Err(SpectrumError::Configuration(format!(
            "working length {working_length} is shorter than input length {input_length}"
        )));
    }
    Ok(())
}
