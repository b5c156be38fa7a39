//! Direct discrete transform by explicit summation
//!
//! Exact for any working length and intentionally simple; serves as the
//! reference implementation the fast path is tested against, and as the
//! fallback for lengths the radix-2 path does not support.

use std::f64::consts::PI;

use num_complex::Complex;

use super::{check_finite, check_length, check_sizes, scale_half_spectrum, SpectrumTransform};
use crate::error::Result;

/// Direct O(n²) transform for real-valued signals
///
/// Configured once with fixed input and working lengths; the twiddle table is
/// derived at construction and only read afterwards, so one instance can be
/// shared across threads and invoked repeatedly.
pub struct Dft {
    /// Number of samples each call expects
    input_len: usize,

    /// Transform size after zero padding
    working_len: usize,

    /// e^(-i*2*pi*j/N) for j = 0..N, indexed by (k*n) mod N
    twiddles: Vec<Complex<f64>>,
}

impl Dft {
    /// Create a transform with no zero padding.
    pub fn new(input_length: usize) -> Result<Self> {
        Self::with_working_length(input_length, input_length)
    }

    /// Create a transform that zero-pads the input up to `working_length`.
    ///
    /// Padding interpolates the spectrum onto a finer frequency grid without
    /// adding information. `working_length` must be at least `input_length`.
    pub fn with_working_length(input_length: usize, working_length: usize) -> Result<Self> {
        check_sizes(input_length, working_length)?;

        let n = working_length as f64;
        let twiddles = (0..working_length)
            .map(|j| Complex::from_polar(1.0, -2.0 * PI * j as f64 / n))
            .collect();

        Ok(Self {
            input_len: input_length,
            working_len: working_length,
            twiddles,
        })
    }

    /// Compute the scaled half-spectrum of `samples`.
    ///
    /// # Arguments
    /// * `samples` - Exactly `input_length()` finite real samples
    ///
    /// # Returns
    /// `working_length()/2 + 1` complex bins with the half-spectrum scaling
    /// applied: interior bins carry twice the raw sum over the working
    /// length, DC and Nyquist carry it once.
    pub fn transform(&self, samples: &[f64]) -> Result<Vec<Complex<f64>>> {
        check_length(self.input_len, samples.len())?;
        check_finite(samples)?;

        let bins = self.working_len / 2 + 1;
        let mut spectrum = Vec::with_capacity(bins);
        for k in 0..bins {
            let mut sum = Complex::new(0.0, 0.0);
            // Padding samples are zero and contribute nothing, so the sum
            // only runs over the actual input.
            for (n, &x) in samples.iter().enumerate() {
                sum += x * self.twiddles[(k * n) % self.working_len];
            }
            spectrum.push(sum);
        }

        scale_half_spectrum(&mut spectrum, self.working_len);
        Ok(spectrum)
    }

    /// Number of samples each call expects
    pub fn input_length(&self) -> usize {
        self.input_len
    }

    /// Transform size actually used
    pub fn working_length(&self) -> usize {
        self.working_len
    }

    /// Number of retained output bins
    pub fn num_bins(&self) -> usize {
        self.working_len / 2 + 1
    }
}

impl SpectrumTransform for Dft {
    fn transform(&self, samples: &[f64]) -> Result<Vec<Complex<f64>>> {
        Dft::transform(self, samples)
    }

    fn input_length(&self) -> usize {
        self.input_len
    }

    fn working_length(&self) -> usize {
        self.working_len
    }
}
