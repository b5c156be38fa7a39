//! Fast transform backed by cached FFT plans
//!
//! Forward path uses a real-to-complex plan, inverse path a complex plan over
//! the internally reconstructed conjugate-mirror spectrum. Output matches the
//! direct transform's half-spectrum convention bin for bin.

use std::sync::Arc;

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::FftPlanner;

use super::{
    check_finite, check_finite_complex, check_length, check_sizes, scale_half_spectrum,
    SpectrumTransform,
};
use crate::error::{Result, SpectrumError};

/// Fast transform for real-valued signals, radix-2 working lengths only
///
/// Plans are derived once at construction and shared read-only afterwards;
/// every call allocates its own scratch, so independent `forward`/`inverse`
/// calls may run concurrently on one instance.
pub struct Fft {
    /// Number of samples each call expects
    input_len: usize,

    /// Transform size after zero padding (power of two)
    working_len: usize,

    /// Forward real-to-complex plan
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Inverse complex plan for the reconstructed full spectrum
    c2c_inverse: Arc<dyn rustfft::Fft<f64>>,
}

impl Fft {
    /// Create a transform with no zero padding.
    pub fn new(input_length: usize) -> Result<Self> {
        Self::with_working_length(input_length, input_length)
    }

    /// Create a transform that zero-pads the input up to `working_length`.
    ///
    /// `working_length` must be a power of two; other lengths fail with
    /// [`SpectrumError::UnsupportedLength`] here rather than at call time.
    /// Lengths that do not decompose this way belong to [`super::Dft`].
    pub fn with_working_length(input_length: usize, working_length: usize) -> Result<Self> {
        check_sizes(input_length, working_length)?;
        if !working_length.is_power_of_two() {
            return Err(SpectrumError::UnsupportedLength(working_length));
        }

        let r2c = RealFftPlanner::<f64>::new().plan_fft_forward(working_length);
        let c2c_inverse = FftPlanner::new().plan_fft_inverse(working_length);

        Ok(Self {
            input_len: input_length,
            working_len: working_length,
            r2c,
            c2c_inverse,
        })
    }

    /// Compute the scaled half-spectrum of `samples`.
    ///
    /// Same contract and output convention as [`super::Dft::transform`]; the
    /// two are numerically equivalent for equal inputs and working lengths.
    pub fn forward(&self, samples: &[f64]) -> Result<Vec<Complex<f64>>> {
        check_length(self.input_len, samples.len())?;
        check_finite(samples)?;

        // Copy into the padded working buffer
        let mut input = self.r2c.make_input_vec();
        input[..samples.len()].copy_from_slice(samples);

        let mut spectrum = self.r2c.make_output_vec();
        self.r2c
            .process(&mut input, &mut spectrum)
            .expect("buffer sizes are fixed at construction");

        scale_half_spectrum(&mut spectrum, self.working_len);
        Ok(spectrum)
    }

    /// Reconstruct `working_length()` complex time samples from a scaled
    /// half-spectrum.
    ///
    /// Accepts exactly what [`Fft::forward`] produces: `working_length/2 + 1`
    /// bins in the half-spectrum convention. The discarded conjugate-mirror
    /// half is rebuilt internally, so for a round trip the real parts match
    /// the zero-padded input and the imaginary parts are numerical noise.
    pub fn inverse(&self, spectrum: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
        check_length(self.working_len / 2 + 1, spectrum.len())?;
        check_finite_complex(spectrum)?;

        let n = self.working_len;
        let scale = n as f64;

        // Undo the half-spectrum scaling back to raw transform sums and
        // mirror the interior bins. DC and Nyquist carry no imaginary part
        // for a real signal.
        let mut full = vec![Complex::new(0.0, 0.0); n];
        full[0] = Complex::new(spectrum[0].re * scale, 0.0);
        full[n / 2] = Complex::new(spectrum[n / 2].re * scale, 0.0);
        for k in 1..n / 2 {
            let raw = spectrum[k] * (scale / 2.0);
            full[k] = raw;
            full[n - k] = raw.conj();
        }

        let mut samples = full;
        self.c2c_inverse.process(&mut samples);

        let norm = 1.0 / n as f64;
        for value in samples.iter_mut() {
            *value *= norm;
        }
        Ok(samples)
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

impl SpectrumTransform for Fft {
    fn transform(&self, samples: &[f64]) -> Result<Vec<Complex<f64>>> {
        self.forward(samples)
    }

    fn input_length(&self) -> usize {
        self.input_len
    }

    fn working_length(&self) -> usize {
        self.working_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpectrumError;
    use crate::generate;
    use crate::spectrum::convert;
    use crate::transform::Dft;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_unsupported_length_at_construction() {
        assert_eq!(
            Fft::new(1000).err(),
            Some(SpectrumError::UnsupportedLength(1000))
        );
        assert!(Fft::new(1024).is_ok());
        // Padding a non-power-of-two input up to a power of two is fine
        assert!(Fft::with_working_length(1000, 1024).is_ok());
    }

    #[test]
    fn test_forward_matches_direct_transform() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let fft = Fft::new(256).unwrap();
        let dft = Dft::new(256).unwrap();

        let random: Vec<f64> = (0..256).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let tone = generate::tone_sampling(0.7, 3_000.0, 48_000.0, 256);

        for signal in [random, tone] {
            let fast = fft.forward(&signal).unwrap();
            let direct = dft.transform(&signal).unwrap();
            assert_eq!(fast.len(), direct.len());
            for (k, (a, b)) in fast.iter().zip(&direct).enumerate() {
                assert!(
                    (a - b).norm() < 1e-9,
                    "bin {k} differs: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_forward_matches_direct_with_padding() {
        let fft = Fft::with_working_length(100, 512).unwrap();
        let dft = Dft::with_working_length(100, 512).unwrap();
        let signal = generate::tone_sampling(1.0, 1_000.0, 8_000.0, 100);

        let fast = fft.forward(&signal).unwrap();
        let direct = dft.transform(&signal).unwrap();
        for (a, b) in fast.iter().zip(&direct) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let fft = Fft::new(512).unwrap();
        let signal: Vec<f64> = (0..512).map(|_| rng.gen_range(-1.0..1.0)).collect();

        let reconstructed = fft.inverse(&fft.forward(&signal).unwrap()).unwrap();

        assert_eq!(reconstructed.len(), 512);
        for (n, (x, y)) in signal.iter().zip(&reconstructed).enumerate() {
            assert!((x - y.re).abs() < 1e-10, "sample {n}: {x} vs {}", y.re);
            assert!(y.im.abs() < 1e-10);
        }
    }

    #[test]
    fn test_round_trip_reconstructs_padding() {
        let fft = Fft::with_working_length(300, 1024).unwrap();
        let signal = generate::tone_sampling(2.0, 440.0, 44_100.0, 300);

        let reconstructed = fft.inverse(&fft.forward(&signal).unwrap()).unwrap();

        assert_eq!(reconstructed.len(), 1024);
        for (x, y) in signal.iter().zip(&reconstructed) {
            assert!((x - y.re).abs() < 1e-10);
        }
        // The padded tail comes back as zeros
        for y in &reconstructed[300..] {
            assert!(y.re.abs() < 1e-10);
            assert!(y.im.abs() < 1e-10);
        }
    }

    #[test]
    fn test_parseval_energy_conservation() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 1024;
        let fft = Fft::new(n).unwrap();
        let signal: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();

        let spectrum = fft.forward(&signal).unwrap();

        // Undo the half-spectrum scaling so both sides of Parseval's theorem
        // are in raw-transform units: sum(|X_raw|^2) = N * sum(x^2).
        let mut raw_energy = 0.0;
        for (k, bin) in spectrum.iter().enumerate() {
            let raw = bin.norm_sqr() * (n as f64).powi(2);
            if k == 0 || k == n / 2 {
                raw_energy += raw;
            } else {
                // Interior bins were doubled and stand for two mirror bins
                raw_energy += 2.0 * raw / 4.0;
            }
        }
        let time_energy: f64 = signal.iter().map(|x| x * x).sum();

        let ratio = raw_energy / (n as f64 * time_energy);
        assert!((ratio - 1.0).abs() < 1e-9, "Parseval ratio {ratio}");
    }

    #[test]
    fn test_inverse_rejects_full_spectrum() {
        let fft = Fft::new(64).unwrap();
        let full = vec![Complex::new(0.0, 0.0); 64];

        assert_eq!(
            fft.inverse(&full),
            Err(SpectrumError::LengthMismatch {
                expected: 33,
                actual: 64
            })
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let fft = Fft::new(8).unwrap();

        let mut signal = vec![0.0; 8];
        signal[3] = f64::NAN;
        assert_eq!(fft.forward(&signal), Err(SpectrumError::NumericDomain(3)));

        let mut spectrum = vec![Complex::new(0.0, 0.0); 5];
        spectrum[2].im = f64::INFINITY;
        assert_eq!(fft.inverse(&spectrum), Err(SpectrumError::NumericDomain(2)));
    }

    #[test]
    fn test_magnitude_peak_of_sine() {
        let fft = Fft::new(1024).unwrap();
        let signal = generate::tone_cycles(1.0, 100.0, 1024, 0.0);

        let magnitude = convert::magnitude(&fft.forward(&signal).unwrap());

        assert!((magnitude[100] - 1.0).abs() < 1e-9);
    }
}
