//! High-level spectrum analyzer
//!
//! Bundles the full measurement pipeline - window, forward transform, scale
//! correction, magnitude conversion - behind one configured object, plus a
//! few scalar helpers for reading results.

use crate::error::{Result, SpectrumError};
use crate::spectrum::convert;
use crate::transform::{check_length, frequency_span, Fft};
use crate::window::{self, WindowType};

/// How the magnitude spectrum is corrected for the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingMode {
    /// Raw half-spectrum magnitudes, no window correction
    None,

    /// Signal scale factor: calibrated tone amplitudes.
    /// Use when measuring discrete tones.
    Amplitude,

    /// Noise scale factor: power-spectral-density readings.
    /// Use when measuring broadband or noise energy.
    NoiseDensity,
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Samples per analysis call
    pub input_len: usize,

    /// Transform size; equal to `input_len` or larger for zero padding
    /// (must be a power of two)
    pub working_len: usize,

    /// Window applied before transforming
    pub window: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Which scale factor corrects the spectrum
    pub scaling: ScalingMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input_len: 2048,
            working_len: 2048,
            window: WindowType::Hann,
            sample_rate: 48_000.0,
            scaling: ScalingMode::Amplitude,
        }
    }
}

/// One-stop windowed spectrum analyzer
///
/// Window table, transform plans and the scale factor are derived once at
/// construction; `analyze` is `&self` and can run concurrently.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft: Fft,
    window: Vec<f64>,
    scale_factor: f64,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let fft = Fft::with_working_length(config.input_len, config.working_len)?;
        let window = window::coefficients(config.window, config.input_len)?;
        let scale_factor = match config.scaling {
            ScalingMode::None => 1.0,
            ScalingMode::Amplitude => window::signal_scale_factor(&window),
            ScalingMode::NoiseDensity => {
                if config.sample_rate <= 0.0 {
                    return Err(SpectrumError::Configuration(
                        "sample rate must be positive for noise-density scaling".into(),
                    ));
                }
                window::noise_scale_factor(&window, config.sample_rate)
            }
        };

        Ok(Self {
            config,
            fft,
            window,
            scale_factor,
        })
    }

    /// Window, transform and scale-correct a signal into a linear magnitude
    /// spectrum.
    pub fn analyze(&self, samples: &[f64]) -> Result<Vec<f64>> {
        check_length(self.config.input_len, samples.len())?;

        let windowed: Vec<f64> = samples
            .iter()
            .zip(&self.window)
            .map(|(&s, &w)| s * w)
            .collect();
        let spectrum = self.fft.forward(&windowed)?;

        Ok(convert::magnitude(&spectrum)
            .iter()
            .map(|m| m * self.scale_factor)
            .collect())
    }

    /// Like [`SpectrumAnalyzer::analyze`], in dB relative to `reference`.
    pub fn analyze_db(&self, samples: &[f64], reference: f64) -> Result<Vec<f64>> {
        let magnitude = self.analyze(samples)?;
        Ok(magnitude
            .iter()
            .map(|&m| 20.0 * (m.max(1e-10) / reference).log10())
            .collect())
    }

    /// Bin-center frequencies in Hz for the analyzer's output.
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        frequency_span(self.config.sample_rate, self.config.working_len)
    }

    /// Number of output bins
    pub fn num_bins(&self) -> usize {
        self.fft.num_bins()
    }

    /// Current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The window correction factor in effect
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

/// Mean of `data` ignoring `skip_front` leading and `skip_back` trailing
/// values; 0.0 when nothing remains.
pub fn find_mean(data: &[f64], skip_front: usize, skip_back: usize) -> f64 {
    if skip_front + skip_back >= data.len() {
        return 0.0;
    }
    let slice = &data[skip_front..data.len() - skip_back];
    slice.iter().sum::<f64>() / slice.len() as f64
}

/// Largest value in `data`; 0.0 for an empty slice.
pub fn find_max_value(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

/// Index of the largest value in `data`; 0 for an empty slice.
pub fn find_max_position(data: &[f64]) -> usize {
    data.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
