//! Zero-point fluctuation scales.
//!
//! For a circuit with inductive energy `El` and capacitive energy `Ec` the
//! phase and charge fluctuation scales are
//!
//!   φ_zpf = sqrt(Ec / El),   n_zpf = sqrt(El / Ec)
//!
//! so that φ_zpf · n_zpf = 1.

use serde::{Deserialize, Serialize};

use crate::error::{QubitError, QubitResult};

/// Phase and charge zero-point fluctuation scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroPointFluctuation {
    /// Phase scale φ_zpf.
    pub phi: f64,
    /// Charge scale n_zpf.
    pub n: f64,
}

impl ZeroPointFluctuation {
    /// Scales for the harmonic approximation: `(sqrt(Ec/El), sqrt(El/Ec))`.
    ///
    /// # Errors
    /// [`QubitError::InvalidParameter`] if either energy is not a finite,
    /// strictly positive number, or if their ratio over- or underflows.
    pub fn new(el: f64, ec: f64) -> QubitResult<Self> {
        check_energy("el", el)?;
        check_energy("ec", ec)?;
        Self {
            phi: (ec / el).sqrt(),
            n: (el / ec).sqrt(),
        }
        .checked(el, ec)
    }

    /// Scales of the fluxonium oscillator basis:
    /// `φ_zpf = (2Ec/El)^¼`, `n_zpf = (El/32Ec)^¼`.
    ///
    /// Their product is exactly ½ (the `[φ, n] = i` normalization).
    pub fn fluxonium(el: f64, ec: f64) -> QubitResult<Self> {
        check_energy("el", el)?;
        check_energy("ec", ec)?;
        Self {
            phi: (2.0 * ec / el).powf(0.25),
            n: (el / (32.0 * ec)).powf(0.25),
        }
        .checked(el, ec)
    }

    /// Both scales must be finite and non-zero.
    fn checked(self, el: f64, ec: f64) -> QubitResult<Self> {
        let usable = |x: f64| x.is_finite() && x > 0.0;
        if usable(self.phi) && usable(self.n) {
            Ok(self)
        } else {
            Err(QubitError::invalid(
                "ec/el",
                format!("{ec}/{el}"),
                "energy ratio out of range",
            ))
        }
    }

    /// φ_zpf · n_zpf.
    pub fn product(&self) -> f64 {
        self.phi * self.n
    }
}

/// Phase zero-point scale `sqrt(Ec / El)`.
pub fn phi_zpf(el: f64, ec: f64) -> QubitResult<f64> {
    ZeroPointFluctuation::new(el, ec).map(|z| z.phi)
}

/// Charge zero-point scale `sqrt(El / Ec)`.
pub fn n_zpf(el: f64, ec: f64) -> QubitResult<f64> {
    ZeroPointFluctuation::new(el, ec).map(|z| z.n)
}

/// Linear oscillator (plasma) frequency `sqrt(8 · El · Ec)`.
pub fn harmonic_frequency(el: f64, ec: f64) -> QubitResult<f64> {
    check_energy("el", el)?;
    check_energy("ec", ec)?;
    let w = (8.0 * el * ec).sqrt();
    if !w.is_finite() || w == 0.0 {
        return Err(QubitError::invalid(
            "el*ec",
            format!("{el}*{ec}"),
            "energy product out of range",
        ));
    }
    Ok(w)
}

pub(crate) fn check_energy(name: &'static str, value: f64) -> QubitResult<()> {
    if !value.is_finite() {
        return Err(QubitError::invalid(name, value, "energy must be finite"));
    }
    if value <= 0.0 {
        return Err(QubitError::invalid(name, value, "energy must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales() {
        let z = ZeroPointFluctuation::new(1.0, 0.5).unwrap();
        assert!((z.phi - 0.5f64.sqrt()).abs() < 1e-15);
        assert!((z.n - 2.0f64.sqrt()).abs() < 1e-15);
        assert!((z.product() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(
            ZeroPointFluctuation::new(0.0, 1.0),
            Err(QubitError::InvalidParameter { name: "el", .. })
        ));
        assert!(matches!(
            ZeroPointFluctuation::new(1.0, -2.0),
            Err(QubitError::InvalidParameter { name: "ec", .. })
        ));
        assert!(phi_zpf(f64::NAN, 1.0).is_err());
        assert!(n_zpf(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_fluxonium_product_is_half() {
        let z = ZeroPointFluctuation::fluxonium(0.5, 1.2).unwrap();
        assert!((z.product() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_ratio_is_rejected() {
        for (el, ec) in [(1e-200, 1e200), (1e200, 1e-200)] {
            assert!(matches!(
                ZeroPointFluctuation::new(el, ec),
                Err(QubitError::InvalidParameter { name: "ec/el", .. })
            ));
            assert!(matches!(
                ZeroPointFluctuation::fluxonium(el, ec),
                Err(QubitError::InvalidParameter { name: "ec/el", .. })
            ));
        }
        // Wide but representable ratios still satisfy the product invariant.
        let z = ZeroPointFluctuation::new(1e-100, 1e100).unwrap();
        assert!((z.product() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_frequency() {
        let w = harmonic_frequency(2.0, 1.0).unwrap();
        assert!((w - 4.0).abs() < 1e-12);
        assert!(harmonic_frequency(-1.0, 1.0).is_err());
        assert!(matches!(
            harmonic_frequency(1e200, 1e200),
            Err(QubitError::InvalidParameter { name: "el*ec", .. })
        ));
    }
}
