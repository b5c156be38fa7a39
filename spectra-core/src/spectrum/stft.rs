//! Short-time transform with overlap-add reconstruction
//!
//! Segments a long signal into overlapping frames, windows and transforms
//! each one, and reassembles the frames back into a time-domain signal by
//! inverse-transforming and overlap-adding.

use num_complex::Complex;

use crate::error::{Result, SpectrumError};
use crate::transform::{check_finite, Fft};
use crate::window::{self, WindowType};

/// Accumulated window envelope below this is left unnormalized; it only
/// occurs in the edge-taper region where no frame carries real energy.
const ENVELOPE_FLOOR: f64 = 1e-8;

/// Short-time transform processor
///
/// Configured once with a frame length, hop size and window; the window table
/// and FFT plans are derived at construction and shared by every call.
pub struct Stft {
    /// Samples per frame (power of two)
    frame_len: usize,

    /// Samples between consecutive frame starts
    hop: usize,

    /// Window family applied to each frame
    window_type: WindowType,

    /// Cached window coefficients, one per frame sample
    window: Vec<f64>,

    /// Per-frame transform
    fft: Fft,
}

impl Stft {
    /// Create a processor.
    ///
    /// # Arguments
    /// * `frame_length` - Samples per frame; must be a power of two
    /// * `hop` - Frame advance; `0 < hop <= frame_length`
    ///   (`frame_length - hop` samples of overlap)
    /// * `window` - Window family applied to each frame
    pub fn new(frame_length: usize, hop: usize, window: WindowType) -> Result<Self> {
        if frame_length < 1 {
            return Err(SpectrumError::Configuration(
                "frame length must be at least 1".into(),
            ));
        }
        if hop == 0 || hop > frame_length {
            return Err(SpectrumError::Configuration(format!(
                "hop size {hop} must be between 1 and the frame length {frame_length}"
            )));
        }

        let coefs = window::coefficients(window, frame_length)?;
        let fft = Fft::new(frame_length)?;

        Ok(Self {
            frame_len: frame_length,
            hop,
            window_type: window,
            window: coefs,
            fft,
        })
    }

    /// Create a processor from an overlap count instead of a hop size.
    pub fn with_overlap(frame_length: usize, overlap: usize, window: WindowType) -> Result<Self> {
        if overlap >= frame_length {
            return Err(SpectrumError::Configuration(format!(
                "overlap {overlap} must be smaller than the frame length {frame_length}"
            )));
        }
        Self::new(frame_length, frame_length - overlap, window)
    }

    /// Samples per frame
    pub fn frame_length(&self) -> usize {
        self.frame_len
    }

    /// Samples between consecutive frame starts
    pub fn hop_size(&self) -> usize {
        self.hop
    }

    /// Samples shared by consecutive frames
    pub fn overlap(&self) -> usize {
        self.frame_len - self.hop
    }

    /// Window family applied to each frame
    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Number of complete frames in a signal of `signal_length` samples.
    pub fn num_frames(&self, signal_length: usize) -> usize {
        if signal_length < self.frame_len {
            0
        } else {
            (signal_length - self.frame_len) / self.hop + 1
        }
    }

    /// Transform a signal into per-frame scaled half-spectra, in frame order.
    ///
    /// Frame `f` covers samples `[f*hop, f*hop + frame_length)`; each frame
    /// is windowed and forward-transformed. Trailing samples that do not fill
    /// a complete frame are ignored.
    pub fn direct(&self, samples: &[f64]) -> Result<Vec<Vec<Complex<f64>>>> {
        if samples.len() < self.frame_len {
            return Err(SpectrumError::InsufficientSamples {
                needed: self.frame_len,
                actual: samples.len(),
            });
        }
        check_finite(samples)?;

        let frames = self.num_frames(samples.len());
        let mut spectra = Vec::with_capacity(frames);
        for f in 0..frames {
            let start = f * self.hop;
            let frame = &samples[start..start + self.frame_len];
            let windowed: Vec<f64> = frame
                .iter()
                .zip(&self.window)
                .map(|(&s, &w)| s * w)
                .collect();
            spectra.push(self.fft.forward(&windowed)?);
        }
        Ok(spectra)
    }

    /// Reassemble per-frame spectra into a time-domain signal.
    ///
    /// Each spectrum is inverse-transformed and its real part added into the
    /// output at the frame's offset; overlapping regions sum. The result is
    /// then normalized by the accumulated window envelope, so the
    /// reconstruction matches the original amplitude wherever the window
    /// overlap covers the signal. Only the leading and trailing
    /// `frame_length - hop` samples, where the taper leaves no coverage,
    /// deviate.
    ///
    /// Reconstructed length is `(frames - 1) * hop + frame_length`.
    pub fn inverse(&self, spectra: &[Vec<Complex<f64>>]) -> Result<Vec<f64>> {
        if spectra.is_empty() {
            return Ok(Vec::new());
        }

        let output_len = (spectra.len() - 1) * self.hop + self.frame_len;
        let mut accumulator = vec![0.0; output_len];
        let mut envelope = vec![0.0; output_len];

        // Sequential overlap-add; overlapping output regions are only ever
        // written from this single loop.
        for (f, spectrum) in spectra.iter().enumerate() {
            let frame = self.fft.inverse(spectrum)?;
            let start = f * self.hop;
            for (i, value) in frame.iter().enumerate() {
                accumulator[start + i] += value.re;
                envelope[start + i] += self.window[i];
            }
        }

        for (value, &gain) in accumulator.iter_mut().zip(&envelope) {
            if gain > ENVELOPE_FLOOR {
                *value /= gain;
            }
        }
        Ok(accumulator)
    }
}
