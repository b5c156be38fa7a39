//! Spectrum post-processing, short-time analysis and the high-level analyzer

pub mod analysis;
pub mod convert;
pub mod stft;

pub use analysis::{AnalyzerConfig, ScalingMode, SpectrumAnalyzer};
pub use stft::Stft;
