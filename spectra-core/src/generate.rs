//! Synthetic test-signal generation
//!
//! Calibration and test sources for the analysis pipeline. The core
//! transforms make no assumptions about where their samples come from; these
//! generators exist so measurements have known right answers.

use std::f64::consts::PI;

use rand::Rng;

/// Sine tone of a given peak amplitude.
///
/// # Arguments
/// * `amplitude` - Peak amplitude
/// * `frequency_hz` - Tone frequency
/// * `sampling_rate_hz` - Sample rate
/// * `length` - Number of samples
pub fn tone_sampling(
    amplitude: f64,
    frequency_hz: f64,
    sampling_rate_hz: f64,
    length: usize,
) -> Vec<f64> {
    let step = 2.0 * PI * frequency_hz / sampling_rate_hz;
    (0..length)
        .map(|n| amplitude * (step * n as f64).sin())
        .collect()
}

/// Sine tone with an exact number of cycles across the buffer.
///
/// `cycles` whole periods span `length` samples, so an integer cycle count
/// lands the tone exactly on transform bin `cycles`. `phase_deg` shifts the
/// tone's starting phase.
pub fn tone_cycles(amplitude: f64, cycles: f64, length: usize, phase_deg: f64) -> Vec<f64> {
    let step = 2.0 * PI * cycles / length as f64;
    let phase = phase_deg.to_radians();
    (0..length)
        .map(|n| amplitude * (step * n as f64 + phase).sin())
        .collect()
}

/// Unit-amplitude sine tone.
pub fn sine(frequency_hz: f64, sampling_rate_hz: f64, length: usize) -> Vec<f64> {
    tone_sampling(1.0, frequency_hz, sampling_rate_hz, length)
}

/// Gaussian white noise with a given one-sided power spectral density.
///
/// `psd_amplitude` is in V/sqrt(Hz); the generated samples have variance
/// `psd_amplitude^2 * sampling_rate_hz / 2`, spreading that density evenly
/// from DC to Nyquist.
pub fn noise_psd(psd_amplitude: f64, sampling_rate_hz: f64, length: usize) -> Vec<f64> {
    noise_psd_with(&mut rand::thread_rng(), psd_amplitude, sampling_rate_hz, length)
}

/// [`noise_psd`] driven by a caller-supplied generator, for reproducible
/// sequences.
pub fn noise_psd_with<R: Rng>(
    rng: &mut R,
    psd_amplitude: f64,
    sampling_rate_hz: f64,
    length: usize,
) -> Vec<f64> {
    let sigma = psd_amplitude * (sampling_rate_hz / 2.0).sqrt();
    (0..length)
        .map(|_| {
            // Box-Muller from two uniforms
            let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
            let u2: f64 = rng.gen();
            sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
        })
        .collect()
}
