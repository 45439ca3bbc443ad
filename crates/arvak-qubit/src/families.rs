//! Qubit families.
//!
//! `Flux`, `Transmon` and `Fluxonium` are the reference single-mode models:
//! each term is a scalar multiple of the identity on the truncated basis.
//!
//! | Family    | Linear                          | Nonlinear       |
//! |-----------|---------------------------------|-----------------|
//! | Flux      | ½((φ_zpf·φ_ext)² + n_zpf²)      | −El·cos(φ_ext)  |
//! | Transmon  | Ec                              | −Ec·cos(1)      |
//! | Fluxonium | El                              | −El·cos(2)      |
//!
//! `FullFluxonium` is the operator-valued fluxonium model in the oscillator
//! basis:
//!
//!   H = ω (a†a + ½) − Ej [cos φ · cos 2πφ_ext + sin φ · sin 2πφ_ext]
//!
//! with ω = sqrt(8 Ec El).
//!
//! `ChargeTransmon` is the offset-charge-sensitive transmon in the charge
//! basis `|−N⟩ … |N⟩` (n counts electrons):
//!
//!   H = Ec (n − 2 ng)² − Ej cos φ,   cos φ = ½ Σ |n⟩⟨n+2| + h.c.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::error::{QubitError, QubitResult};
use crate::hamiltonian::QubitFamily;
use crate::linalg::{cosm, sinm};
use crate::operator::{
    Matrix, OperatorFactory, OperatorKind, c, charge_cos_half_phi, charge_cos_phi,
    charge_number, charge_sin_half_phi, hermitian_part, scaled_identity,
};
use crate::spec::QubitSpec;
use crate::zpf::{ZeroPointFluctuation, harmonic_frequency};

/// The Josephson energy of `spec`, required by junction-explicit families.
fn require_ej(spec: &QubitSpec, reason: &'static str) -> QubitResult<f64> {
    spec.ej.ok_or_else(|| QubitError::invalid("ej", "none", reason))
}

/// Flux qubit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flux;

impl QubitFamily for Flux {
    fn tag(&self) -> &str {
        "flux"
    }

    fn linear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        let zpf = ops.zpf();
        let phi = zpf.phi * spec.phi_ext;
        let n = zpf.n;
        scaled_identity(ops.dim(), 0.5 * (phi * phi + n * n))
    }

    fn nonlinear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        scaled_identity(ops.dim(), -spec.el * spec.phi_ext.cos())
    }
}

/// Transmon.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transmon;

impl QubitFamily for Transmon {
    fn tag(&self) -> &str {
        "transmon"
    }

    fn linear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        scaled_identity(ops.dim(), spec.ec)
    }

    fn nonlinear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        scaled_identity(ops.dim(), -spec.ec * 1.0f64.cos())
    }
}

/// Fluxonium.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fluxonium;

impl QubitFamily for Fluxonium {
    fn tag(&self) -> &str {
        "fluxonium"
    }

    fn linear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        scaled_identity(ops.dim(), spec.el)
    }

    // TODO: sum the phase-offset cosine contributions once the compound
    // potential parameters are part of QubitSpec; FullFluxonium covers the
    // operator-valued form meanwhile.
    fn nonlinear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        scaled_identity(ops.dim(), -spec.el * 2.0f64.cos())
    }
}

/// Operator-valued fluxonium, registered under `fluxonium_full`.
///
/// Requires `ej`. Uses the fluxonium zero-point scales
/// ([`ZeroPointFluctuation::fluxonium`]) and a flux bias in units of the
/// flux quantum.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFluxonium;

impl FullFluxonium {
    /// Registry tag.
    pub const TAG: &'static str = "fluxonium_full";

    /// Oscillator frequency ω = sqrt(8 Ec El).
    pub fn linear_frequency(spec: &QubitSpec) -> f64 {
        (8.0 * spec.ec * spec.el).sqrt()
    }

    /// Classical potential at reduced flux `phi` (flux-quantum units).
    ///
    /// # Errors
    /// [`QubitError::InvalidParameter`] if `spec` has no Josephson energy.
    pub fn potential(spec: &QubitSpec, phi: f64) -> QubitResult<f64> {
        let ej = require_ej(spec, MISSING_EJ_FLUXONIUM)?;
        let v_linear = 0.5 * spec.el * (2.0 * PI * phi).powi(2);
        let v_nonlinear = -ej * (2.0 * PI * (phi - spec.phi_ext)).cos();
        Ok(v_linear + v_nonlinear)
    }
}

const MISSING_EJ_FLUXONIUM: &str = "fluxonium_full requires a Josephson energy";

impl QubitFamily for FullFluxonium {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn validate(&self, spec: &QubitSpec) -> QubitResult<()> {
        require_ej(spec, MISSING_EJ_FLUXONIUM)?;
        harmonic_frequency(spec.el, spec.ec)?;
        Ok(())
    }

    fn zero_point(&self, spec: &QubitSpec) -> QubitResult<ZeroPointFluctuation> {
        ZeroPointFluctuation::fluxonium(spec.el, spec.ec)
    }

    fn linear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        let w = Self::linear_frequency(spec);
        (ops.number() + ops.identity() * c(0.5)) * c(w)
    }

    fn nonlinear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix {
        let phi = ops.phase();
        let bias = 2.0 * PI * spec.phi_ext;
        let ej = spec.ej.unwrap_or_default();
        let h_cos = cosm(&phi) * c(bias.cos()) + sinm(&phi) * c(bias.sin());
        hermitian_part(&(h_cos * c(-ej)))
    }
}

/// Offset-charge-sensitive transmon in the charge basis, registered under
/// `transmon_charge`.
///
/// The basis holds `2·cutoff + 1` charge states, so `truncation_dim` must be
/// odd (see [`QubitSpec::with_charge_cutoff`]). Requires `ej`; `ng` is the
/// gate offset charge. The linear term is the charging energy and the
/// nonlinear term the Josephson cosine. Charge and the periodic operators
/// are given in the charge basis; the ladder operators and φ fall back to
/// the oscillator basis with transmon scales `(2Ec/Ej)^¼`, `(Ej/32Ec)^¼`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeTransmon;

const MISSING_EJ_TRANSMON: &str = "transmon_charge requires a Josephson energy";

impl ChargeTransmon {
    /// Registry tag.
    pub const TAG: &'static str = "transmon_charge";

    /// Charging energy `Ec (n − 2 ng)²` for each basis state, lowest charge
    /// first.
    pub fn charging_energies(spec: &QubitSpec) -> Vec<f64> {
        let cutoff = spec.charge_cutoff() as isize;
        (-cutoff..=cutoff)
            .map(|n| spec.ec * (n as f64 - 2.0 * spec.ng).powi(2))
            .collect()
    }
}

impl QubitFamily for ChargeTransmon {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn validate(&self, spec: &QubitSpec) -> QubitResult<()> {
        require_ej(spec, MISSING_EJ_TRANSMON)?;
        if spec.truncation_dim % 2 == 0 {
            return Err(QubitError::invalid(
                "truncation_dim",
                spec.truncation_dim,
                "charge basis needs an odd dimension 2·cutoff + 1",
            ));
        }
        Ok(())
    }

    fn zero_point(&self, spec: &QubitSpec) -> QubitResult<ZeroPointFluctuation> {
        let ej = require_ej(spec, MISSING_EJ_TRANSMON)?;
        ZeroPointFluctuation::fluxonium(ej, spec.ec)
    }

    fn operator(&self, spec: &QubitSpec, ops: &OperatorFactory, kind: OperatorKind) -> Matrix {
        let cutoff = spec.charge_cutoff();
        match kind {
            OperatorKind::Charge => charge_number(cutoff),
            OperatorKind::CosPhase => charge_cos_phi(cutoff),
            OperatorKind::CosHalfPhase => charge_cos_half_phi(cutoff),
            OperatorKind::SinHalfPhase => charge_sin_half_phi(cutoff),
            other => ops.operator(other),
        }
    }

    fn linear(&self, spec: &QubitSpec, _ops: &OperatorFactory) -> Matrix {
        let energies: Vec<_> = Self::charging_energies(spec).into_iter().map(c).collect();
        Matrix::from_diag(&Array1::from(energies))
    }

    fn nonlinear(&self, spec: &QubitSpec, _ops: &OperatorFactory) -> Matrix {
        let ej = spec.ej.unwrap_or_default();
        charge_cos_phi(spec.charge_cutoff()) * c(-ej)
    }
}
