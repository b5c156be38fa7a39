//! Spectra - spectral analysis core
//!
//! Turns real-valued time-domain samples into scaled, physically meaningful
//! frequency-domain spectra and back: direct and fast transforms with a
//! common half-spectrum convention, window functions with principled scale
//! factors, spectrum conversion and phase unwrapping, and a short-time
//! transform with overlap-add reconstruction.

pub mod error;
pub mod generate;
pub mod spectrum;
pub mod transform;
pub mod window;

pub use error::{Result, SpectrumError};
pub use spectrum::{AnalyzerConfig, ScalingMode, SpectrumAnalyzer, Stft};
pub use transform::{frequency_span, Dft, Fft, SpectrumTransform};
pub use window::WindowType;
