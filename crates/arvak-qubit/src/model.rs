//! Per-qubit model.
//!
//! A [`QubitModel`] validates its parameters and resolves its family once,
//! at construction. Every query afterwards is infallible and deterministic.

use std::sync::Arc;

use arvak_profile::Profiler;
use tracing::debug;

use crate::error::QubitResult;
use crate::hamiltonian::{FamilyRegistry, HamiltonianTerm, QubitFamily, assemble};
use crate::operator::{Matrix, OperatorFactory, OperatorKind};
use crate::profiled::ProfiledQubit;
use crate::spec::{QubitSpec, QubitVariant};
use crate::zpf::ZeroPointFluctuation;

/// A validated qubit together with its family and operator basis.
#[derive(Debug, Clone)]
pub struct QubitModel {
    spec: QubitSpec,
    family: Arc<dyn QubitFamily>,
    operators: OperatorFactory,
}

impl QubitModel {
    /// Build a model against the built-in families.
    ///
    /// # Errors
    /// [`QubitError::InvalidParameter`](crate::QubitError::InvalidParameter)
    /// for bad circuit parameters,
    /// [`QubitError::UnsupportedQubitType`](crate::QubitError::UnsupportedQubitType)
    /// for an unregistered variant.
    pub fn new(spec: QubitSpec) -> QubitResult<Self> {
        Self::with_registry(spec, &FamilyRegistry::builtin())
    }

    /// Build a model against a caller-supplied registry.
    pub fn with_registry(spec: QubitSpec, registry: &FamilyRegistry) -> QubitResult<Self> {
        let (family, operators) = registry.resolve(&spec)?;
        Ok(Self::from_parts(spec, family, operators))
    }

    pub(crate) fn from_parts(
        spec: QubitSpec,
        family: Arc<dyn QubitFamily>,
        operators: OperatorFactory,
    ) -> Self {
        debug!(
            family = family.tag(),
            el = spec.el,
            ec = spec.ec,
            phi_ext = spec.phi_ext,
            dim = spec.truncation_dim,
            "constructed qubit model"
        );
        Self {
            spec,
            family,
            operators,
        }
    }

    /// Build a built-in model from a tag with zero flux bias and the
    /// default truncation.
    pub fn from_tag(tag: &str, el: f64, ec: f64) -> QubitResult<Self> {
        let variant: QubitVariant = tag.parse()?;
        Self::new(QubitSpec::new(variant, el, ec))
    }

    /// Circuit parameters.
    pub fn spec(&self) -> &QubitSpec {
        &self.spec
    }

    /// Qubit family tag.
    pub fn variant(&self) -> &QubitVariant {
        &self.spec.variant
    }

    /// Resolved family.
    pub fn family(&self) -> &dyn QubitFamily {
        self.family.as_ref()
    }

    /// Truncation dimension.
    pub fn dim(&self) -> usize {
        self.operators.dim()
    }

    /// Zero-point scales of the model's basis.
    pub fn zero_point(&self) -> ZeroPointFluctuation {
        self.operators.zpf()
    }

    /// Operator basis.
    pub fn operators(&self) -> &OperatorFactory {
        &self.operators
    }

    /// Build an operator by kind, in the family's basis.
    pub fn operator(&self, kind: OperatorKind) -> Matrix {
        self.family.operator(&self.spec, &self.operators, kind)
    }

    /// Linear (quadratic) Hamiltonian term.
    pub fn linear_hamiltonian(&self) -> Matrix {
        self.hamiltonian(HamiltonianTerm::Linear)
    }

    /// Nonlinear (periodic) Hamiltonian term.
    pub fn nonlinear_hamiltonian(&self) -> Matrix {
        self.hamiltonian(HamiltonianTerm::Nonlinear)
    }

    /// Linear + nonlinear.
    pub fn full_hamiltonian(&self) -> Matrix {
        self.hamiltonian(HamiltonianTerm::Full)
    }

    /// Build one Hamiltonian term.
    pub fn hamiltonian(&self, term: HamiltonianTerm) -> Matrix {
        assemble(self.family.as_ref(), &self.spec, &self.operators, term)
    }

    /// View of this model whose queries are timed into `profiler`.
    pub fn profiled<'a>(&'a self, profiler: &'a Profiler) -> ProfiledQubit<'a> {
        ProfiledQubit::new(self, profiler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QubitError;

    #[test]
    fn test_from_tag() {
        let model = QubitModel::from_tag("transmon", 2.0, 1.0).unwrap();
        assert_eq!(model.variant(), &QubitVariant::Transmon);
        assert_eq!(model.dim(), 2);
        assert_eq!(model.family().tag(), "transmon");
    }

    #[test]
    fn test_from_tag_unknown() {
        assert_eq!(
            QubitModel::from_tag("quaternion", 1.0, 1.0).unwrap_err(),
            QubitError::UnsupportedQubitType("quaternion".into())
        );
    }

    #[test]
    fn test_construction_fails_eagerly() {
        let spec = QubitSpec::new(QubitVariant::Fluxonium, 1.0, 0.0);
        assert!(matches!(
            QubitModel::new(spec),
            Err(QubitError::InvalidParameter { name: "ec", .. })
        ));
    }

    #[test]
    fn test_full_is_sum() {
        let spec = QubitSpec::new(QubitVariant::Flux, 1.0, 0.5)
            .with_phi_ext(0.3)
            .with_truncation(4);
        let model = QubitModel::new(spec).unwrap();
        let full = model.full_hamiltonian();
        let sum = model.linear_hamiltonian() + model.nonlinear_hamiltonian();
        assert_eq!(full, sum);
    }

    #[test]
    fn test_operator_forwarding() {
        let model = QubitModel::from_tag("flux", 1.0, 0.5).unwrap();
        assert_eq!(
            model.operator(OperatorKind::Phase),
            model.operators().phase()
        );
    }
}
