//! `arvak-qubit` — superconducting qubit operators and Hamiltonians.
//!
//! Builds truncated-basis operators and single-qubit Hamiltonians for flux,
//! transmon and fluxonium circuits from a handful of circuit parameters:
//!
//! - **Zero-point scales** φ_zpf, n_zpf from the inductive and capacitive
//!   energies ([`zpf`])
//! - **Operators** a, a†, φ, n and the periodic cos φ, cos(φ/2), sin(φ/2) on
//!   a truncated oscillator or charge basis ([`operator`])
//! - **Hamiltonians** split into linear and nonlinear terms, dispatched by
//!   qubit family through an open registry ([`hamiltonian`], [`families`])
//! - **Profiling** of construction and queries via `arvak-profile`
//!   ([`profiled`])
//!
//! # Quick start
//!
//! ```rust
//! use arvak_qubit::{QubitModel, QubitSpec, QubitVariant};
//!
//! let spec = QubitSpec::new(QubitVariant::Flux, 1.0, 0.5).with_phi_ext(0.3);
//! let model = QubitModel::new(spec).unwrap();
//!
//! let h = model.nonlinear_hamiltonian();
//! assert!((h[[0, 0]].re - (-(0.3f64).cos())).abs() < 1e-12);
//! ```

pub mod error;
pub mod families;
pub mod hamiltonian;
pub mod linalg;
pub mod model;
pub mod operator;
pub mod profiled;
pub mod spec;
pub mod zpf;

pub use error::{QubitError, QubitResult};
pub use families::{ChargeTransmon, Flux, Fluxonium, FullFluxonium, Transmon};
pub use hamiltonian::{FamilyRegistry, HamiltonianBuilder, HamiltonianTerm, QubitFamily};
pub use model::QubitModel;
pub use operator::{Matrix, OperatorFactory, OperatorKind};
pub use profiled::ProfiledQubit;
pub use spec::{CustomTag, QubitSpec, QubitVariant};
pub use zpf::ZeroPointFluctuation;
