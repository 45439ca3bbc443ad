//! Hamiltonian assembly dispatched by qubit family.
//!
//! A qubit Hamiltonian is split into a linear (quadratic, harmonic) part and
//! a nonlinear (periodic, cosine) part:
//!
//!   H = H_linear + H_nonlinear
//!
//! Each family supplies both generators through [`QubitFamily`] and is looked
//! up by tag in a [`FamilyRegistry`]. Adding a family means registering a new
//! implementation; existing families are untouched.
//!
//! # Example
//!
//! ```rust
//! use arvak_qubit::hamiltonian::HamiltonianBuilder;
//! use arvak_qubit::spec::{QubitSpec, QubitVariant};
//!
//! let builder = HamiltonianBuilder::default();
//! let spec = QubitSpec::new(QubitVariant::Transmon, 2.0, 1.0);
//! let h = builder.linear_hamiltonian(&spec).unwrap();
//! assert_eq!(h.dim(), (2, 2));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QubitError, QubitResult};
use crate::families::{ChargeTransmon, Flux, Fluxonium, FullFluxonium, Transmon};
use crate::operator::{Matrix, OperatorFactory, OperatorKind};
use crate::spec::{QubitSpec, QubitVariant};
use crate::zpf::ZeroPointFluctuation;

/// Which part of the Hamiltonian to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HamiltonianTerm {
    /// Quadratic (harmonic) part.
    Linear,
    /// Periodic (Josephson-type) part.
    Nonlinear,
    /// Linear + nonlinear.
    Full,
}

impl HamiltonianTerm {
    /// Short name used in scope labels.
    pub fn name(self) -> &'static str {
        match self {
            HamiltonianTerm::Linear => "linear",
            HamiltonianTerm::Nonlinear => "nonlinear",
            HamiltonianTerm::Full => "full",
        }
    }
}

impl fmt::Display for HamiltonianTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One qubit family: how to turn circuit parameters into Hamiltonian terms.
///
/// Both generators must return Hermitian `dim × dim` matrices, where `dim`
/// is `ops.dim()`.
pub trait QubitFamily: Send + Sync + fmt::Debug {
    /// Registry tag.
    fn tag(&self) -> &str;

    /// Family-specific parameter checks, run after [`QubitSpec::validate`].
    fn validate(&self, _spec: &QubitSpec) -> QubitResult<()> {
        Ok(())
    }

    /// Zero-point scales of the family's oscillator basis.
    fn zero_point(&self, spec: &QubitSpec) -> QubitResult<ZeroPointFluctuation> {
        ZeroPointFluctuation::new(spec.el, spec.ec)
    }

    /// Operator `kind` in the family's basis. Defaults to the oscillator
    /// basis of `ops`.
    fn operator(&self, _spec: &QubitSpec, ops: &OperatorFactory, kind: OperatorKind) -> Matrix {
        ops.operator(kind)
    }

    /// Linear (quadratic) term.
    fn linear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix;

    /// Nonlinear (periodic) term.
    fn nonlinear(&self, spec: &QubitSpec, ops: &OperatorFactory) -> Matrix;
}

/// Tag → family lookup table.
#[derive(Debug, Clone, Default)]
pub struct FamilyRegistry {
    families: BTreeMap<String, Arc<dyn QubitFamily>>,
}

impl FamilyRegistry {
    /// A registry with no families.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flux, transmon and fluxonium.
    pub fn builtin() -> Self {
        Self::empty().with(Flux).with(Transmon).with(Fluxonium)
    }

    /// The built-in families plus the operator-valued fluxonium and the
    /// charge-basis transmon.
    pub fn with_physical() -> Self {
        Self::builtin().with(FullFluxonium).with(ChargeTransmon)
    }

    /// Register a family, returning the one it replaced under the same tag.
    ///
    /// Tags are matched case-insensitively, like [`QubitVariant`] tags.
    pub fn register(&mut self, family: impl QubitFamily + 'static) -> Option<Arc<dyn QubitFamily>> {
        let tag = family.tag().trim().to_ascii_lowercase();
        debug!(tag = %tag, "registering qubit family");
        self.families.insert(tag, Arc::new(family))
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, family: impl QubitFamily + 'static) -> Self {
        self.register(family);
        self
    }

    /// Whether a family is registered for `variant`.
    pub fn contains(&self, variant: &QubitVariant) -> bool {
        self.families.contains_key(variant.tag())
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Look up the family for `variant`.
    ///
    /// # Errors
    /// [`QubitError::UnsupportedQubitType`] if nothing is registered under
    /// the variant's tag.
    pub fn get(&self, variant: &QubitVariant) -> QubitResult<Arc<dyn QubitFamily>> {
        self.families
            .get(variant.tag())
            .cloned()
            .ok_or_else(|| QubitError::UnsupportedQubitType(variant.tag().to_string()))
    }

    /// Validate `spec` and resolve its family and operator basis.
    pub(crate) fn resolve(
        &self,
        spec: &QubitSpec,
    ) -> QubitResult<(Arc<dyn QubitFamily>, OperatorFactory)> {
        spec.validate()?;
        let family = self.get(&spec.variant)?;
        family.validate(spec)?;
        let zpf = family.zero_point(spec)?;
        let ops = OperatorFactory::new(spec.truncation_dim, zpf)?;
        Ok((family, ops))
    }
}

/// Builds Hamiltonian terms for arbitrary specs against a registry.
///
/// Every call validates the spec. For repeated queries on one qubit,
/// construct a [`QubitModel`](crate::model::QubitModel) instead.
#[derive(Debug, Clone)]
pub struct HamiltonianBuilder {
    registry: FamilyRegistry,
}

impl Default for HamiltonianBuilder {
    fn default() -> Self {
        Self::new(FamilyRegistry::builtin())
    }
}

impl HamiltonianBuilder {
    /// Create a builder over `registry`.
    pub fn new(registry: FamilyRegistry) -> Self {
        Self { registry }
    }

    /// The registry used for dispatch.
    pub fn registry(&self) -> &FamilyRegistry {
        &self.registry
    }

    /// Linear term of `spec`.
    pub fn linear_hamiltonian(&self, spec: &QubitSpec) -> QubitResult<Matrix> {
        self.build(spec, HamiltonianTerm::Linear)
    }

    /// Nonlinear term of `spec`.
    pub fn nonlinear_hamiltonian(&self, spec: &QubitSpec) -> QubitResult<Matrix> {
        self.build(spec, HamiltonianTerm::Nonlinear)
    }

    /// Linear + nonlinear.
    pub fn full_hamiltonian(&self, spec: &QubitSpec) -> QubitResult<Matrix> {
        self.build(spec, HamiltonianTerm::Full)
    }

    /// Build one term of `spec`.
    pub fn build(&self, spec: &QubitSpec, term: HamiltonianTerm) -> QubitResult<Matrix> {
        let (family, ops) = self.registry.resolve(spec)?;
        Ok(assemble(family.as_ref(), spec, &ops, term))
    }
}

pub(crate) fn assemble(
    family: &dyn QubitFamily,
    spec: &QubitSpec,
    ops: &OperatorFactory,
    term: HamiltonianTerm,
) -> Matrix {
    debug!(
        family = family.tag(),
        term = term.name(),
        dim = ops.dim(),
        "assembling Hamiltonian term"
    );
    match term {
        HamiltonianTerm::Linear => family.linear(spec, ops),
        HamiltonianTerm::Nonlinear => family.nonlinear(spec, ops),
        HamiltonianTerm::Full => family.linear(spec, ops) + family.nonlinear(spec, ops),
    }
}
