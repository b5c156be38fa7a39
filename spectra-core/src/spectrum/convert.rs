//! Conversions from complex spectra to presentation formats
//!
//! Pure, stateless functions; every one returns a new array and leaves its
//! input untouched.

use num_complex::Complex;

/// Magnitudes below this clamp to the dBV floor instead of producing -inf.
const DBV_MIN_MAGNITUDE: f64 = 1e-10;

/// Elementwise modulus of a spectrum.
pub fn magnitude(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Elementwise squared modulus.
///
/// Preferred basis for averaging repeated noise spectra: averaging power and
/// converting to magnitude afterwards avoids the bias that averaging
/// amplitudes introduces.
pub fn magnitude_squared(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm_sqr()).collect()
}

/// Magnitude in dBV: `20*log10(|X|)` referenced to 1.0.
///
/// A magnitude of exactly zero maps to the -200 dBV floor rather than -inf.
pub fn magnitude_dbv(spectrum: &[Complex<f64>]) -> Vec<f64> {
    magnitudes_to_dbv(&magnitude(spectrum))
}

/// Convert an already-computed (and possibly scale-corrected) magnitude
/// array to dBV.
pub fn magnitudes_to_dbv(magnitudes: &[f64]) -> Vec<f64> {
    magnitudes
        .iter()
        .map(|&m| 20.0 * m.max(DBV_MIN_MAGNITUDE).log10())
        .collect()
}

/// Elementwise phase in degrees, range (-180, 180].
pub fn phase_degrees(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|c| {
            let deg = c.im.atan2(c.re).to_degrees();
            // atan2 can land on exactly -180 for negative real axis values
            if deg <= -180.0 {
                deg + 360.0
            } else {
                deg
            }
        })
        .collect()
}

/// Remove artificial ±360° discontinuities from a phase sequence.
///
/// Walks the sequence in order; whenever the step between consecutive values
/// leaves (-180, 180], a multiple of 360° is folded into the running offset
/// so the output continues smoothly. Steps spanning several full turns are
/// corrected repeatedly, and running the function on its own output changes
/// nothing.
pub fn unwrap_phase_degrees(phase: &[f64]) -> Vec<f64> {
    let mut unwrapped = Vec::with_capacity(phase.len());
    let mut offset = 0.0;
    let mut previous = 0.0;
    for (i, &p) in phase.iter().enumerate() {
        if i > 0 {
            let mut delta = p + offset - previous;
            while delta > 180.0 {
                offset -= 360.0;
                delta -= 360.0;
            }
            while delta < -180.0 {
                offset += 360.0;
                delta += 360.0;
            }
        }
        previous = p + offset;
        unwrapped.push(previous);
    }
    unwrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_and_squared() {
        let spectrum = vec![Complex::new(3.0, 4.0), Complex::new(0.0, -2.0)];

        assert_eq!(magnitude(&spectrum), vec![5.0, 2.0]);
        assert_eq!(magnitude_squared(&spectrum), vec![25.0, 4.0]);
    }

    #[test]
    fn test_dbv_of_unit_magnitude() {
        let spectrum = vec![Complex::new(1.0, 0.0), Complex::new(10.0, 0.0)];
        let dbv = magnitude_dbv(&spectrum);

        assert!(dbv[0].abs() < 1e-12);
        assert!((dbv[1] - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_dbv_floor_for_zero_magnitude() {
        let dbv = magnitude_dbv(&[Complex::new(0.0, 0.0)]);

        assert!((dbv[0] - (-200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_phase_degrees_range() {
        let spectrum = vec![
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, -1.0),
            Complex::new(-1.0, -0.0),
        ];
        let phase = phase_degrees(&spectrum);

        assert!((phase[0] - 0.0).abs() < 1e-12);
        assert!((phase[1] - 90.0).abs() < 1e-12);
        assert!((phase[2] - 180.0).abs() < 1e-12);
        assert!((phase[3] + 90.0).abs() < 1e-12);
        // Negative real axis always reports +180, never -180
        assert!((phase[4] - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_unwrap_restores_linear_ramp() {
        // A ramp climbing 0..720 in 15° steps, wrapped into (-180, 180]
        let true_ramp: Vec<f64> = (0..48).map(|i| i as f64 * 15.0).collect();
        let wrapped: Vec<f64> = true_ramp
            .iter()
            .map(|&p| {
                let mut w = p;
                while w > 180.0 {
                    w -= 360.0;
                }
                w
            })
            .collect();

        let unwrapped = unwrap_phase_degrees(&wrapped);

        for (a, b) in unwrapped.iter().zip(&true_ramp) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unwrap_idempotent() {
        let wrapped = vec![0.0, 170.0, -160.0, -30.0, 120.0, -110.0];
        let once = unwrap_phase_degrees(&wrapped);
        let twice = unwrap_phase_degrees(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unwrap_multiple_consecutive_wraps() {
        // A single step of more than one full turn needs repeated correction
        let phase = vec![0.0, 10.0, 760.0, 770.0];
        let unwrapped = unwrap_phase_degrees(&phase);

        assert!((unwrapped[2] - 40.0).abs() < 1e-9);
        assert!((unwrapped[3] - 50.0).abs() < 1e-9);
        // No remaining step exceeds 180°
        for pair in unwrapped.windows(2) {
            assert!((pair[1] - pair[0]).abs() <= 180.0);
        }
    }

    #[test]
    fn test_unwrap_downward_ramp() {
        let true_ramp: Vec<f64> = (0..40).map(|i| -20.0 * i as f64).collect();
        let wrapped: Vec<f64> = true_ramp
            .iter()
            .map(|&p| {
                let mut w = p;
                while w <= -180.0 {
                    w += 360.0;
                }
                w
            })
            .collect();

        let unwrapped = unwrap_phase_degrees(&wrapped);

        for (a, b) in unwrapped.iter().zip(&true_ramp) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
