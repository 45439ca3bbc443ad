//! Timed model construction and queries.
//!
//! Scopes are labelled `<family>::<query>`; sub-steps of a query are nested
//! below it (`fluxonium::full_hamiltonian/nonlinear`).

use arvak_profile::Profiler;

use crate::error::{QubitError, QubitResult};
use crate::hamiltonian::{FamilyRegistry, HamiltonianTerm};
use crate::model::QubitModel;
use crate::operator::{Matrix, OperatorFactory, OperatorKind};
use crate::spec::QubitSpec;

/// Construct a model, timing each construction step.
///
/// Records `<variant>::construct` with `validate`, `family` and `operators`
/// sub-scopes. On failure both the failing sub-scope and the parent are
/// marked failed and the error is returned unchanged.
pub fn construct(
    profiler: &Profiler,
    spec: QubitSpec,
    registry: &FamilyRegistry,
) -> QubitResult<QubitModel> {
    let mut scope = profiler.scope(format!("{}::construct", spec.variant));

    let steps = || {
        scope.try_instrumented("validate", || spec.validate())?;
        let family = scope.try_instrumented("family", || {
            let family = registry.get(&spec.variant)?;
            family.validate(&spec)?;
            Ok::<_, QubitError>(family)
        })?;
        let operators = scope.try_instrumented("operators", || {
            family
                .zero_point(&spec)
                .and_then(|zpf| OperatorFactory::new(spec.truncation_dim, zpf))
        })?;
        Ok::<_, QubitError>((family, operators))
    };
    let resolved = steps();

    match resolved {
        Ok((family, operators)) => Ok(QubitModel::from_parts(spec, family, operators)),
        Err(e) => {
            scope.fail();
            Err(e)
        }
    }
}

/// A [`QubitModel`] whose queries are timed into a [`Profiler`].
///
/// Results are identical to the unprofiled model's.
#[derive(Debug, Clone, Copy)]
pub struct ProfiledQubit<'a> {
    model: &'a QubitModel,
    profiler: &'a Profiler,
}

impl<'a> ProfiledQubit<'a> {
    /// Wrap `model`.
    pub fn new(model: &'a QubitModel, profiler: &'a Profiler) -> Self {
        Self { model, profiler }
    }

    /// The wrapped model.
    pub fn model(&self) -> &'a QubitModel {
        self.model
    }

    fn label(&self, query: &str) -> String {
        format!("{}::{}", self.model.family().tag(), query)
    }

    /// Timed [`QubitModel::operator`].
    pub fn operator(&self, kind: OperatorKind) -> Matrix {
        self.profiler
            .instrumented(self.label(&format!("operator/{kind}")), || {
                self.model.operator(kind)
            })
    }

    /// Timed [`QubitModel::linear_hamiltonian`].
    pub fn linear_hamiltonian(&self) -> Matrix {
        self.profiler
            .instrumented(self.label("linear_hamiltonian"), || {
                self.model.linear_hamiltonian()
            })
    }

    /// Timed [`QubitModel::nonlinear_hamiltonian`].
    pub fn nonlinear_hamiltonian(&self) -> Matrix {
        self.profiler
            .instrumented(self.label("nonlinear_hamiltonian"), || {
                self.model.nonlinear_hamiltonian()
            })
    }

    /// Timed full Hamiltonian with `linear`, `nonlinear` and `sum`
    /// sub-scopes.
    pub fn full_hamiltonian(&self) -> Matrix {
        let scope = self.profiler.scope(self.label("full_hamiltonian"));
        let linear = scope.instrumented(HamiltonianTerm::Linear.name(), || {
            self.model.linear_hamiltonian()
        });
        let nonlinear = scope.instrumented(HamiltonianTerm::Nonlinear.name(), || {
            self.model.nonlinear_hamiltonian()
        });
        scope.instrumented("sum", || linear + nonlinear)
    }
}
