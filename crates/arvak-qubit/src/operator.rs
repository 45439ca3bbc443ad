//! Truncated-basis ladder operators and the observables derived from them.
//!
//! In a harmonic-oscillator basis truncated to `dim` levels:
//!
//!   a        = Σ_k sqrt(k+1) |k⟩⟨k+1|
//!   a†       = (a)†
//!   φ        = φ_zpf · (a + a†)
//!   n        = i · n_zpf · (a† − a)
//!
//! The periodic observables `cos φ`, `cos(φ/2)` and `sin(φ/2)` are matrix
//! functions of φ. In a charge basis `|−N⟩ … |N⟩` the same observables are
//! plain shift matrices; see [`charge_number`] and friends.
//!
//! # Example
//!
//! ```rust
//! use arvak_qubit::operator::{OperatorFactory, OperatorKind, is_hermitian};
//! use arvak_qubit::zpf::ZeroPointFluctuation;
//!
//! let zpf = ZeroPointFluctuation::new(1.0, 0.5).unwrap();
//! let ops = OperatorFactory::new(4, zpf).unwrap();
//! assert!(is_hermitian(&ops.operator(OperatorKind::Phase), 1e-12));
//! assert!(is_hermitian(&ops.operator(OperatorKind::Charge), 1e-12));
//! ```

use std::fmt;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{QubitError, QubitResult};
use crate::linalg::{cosm, sinm};
use crate::zpf::ZeroPointFluctuation;

/// Dense complex square matrix.
pub type Matrix = Array2<Complex64>;

/// Smallest admissible truncation dimension.
pub const MIN_TRUNCATION: usize = 2;

/// Operators available on a truncated qubit basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// Lowering operator a.
    Annihilation,
    /// Raising operator a†.
    Creation,
    /// Phase φ = φ_zpf (a + a†).
    Phase,
    /// Charge n = i n_zpf (a† − a).
    Charge,
    /// Identity on the truncated basis.
    Identity,
    /// Number operator a†a.
    Number,
    /// cos φ.
    CosPhase,
    /// cos(φ/2).
    CosHalfPhase,
    /// sin(φ/2).
    SinHalfPhase,
}

impl OperatorKind {
    /// Every operator kind.
    pub const ALL: [OperatorKind; 9] = [
        OperatorKind::Annihilation,
        OperatorKind::Creation,
        OperatorKind::Phase,
        OperatorKind::Charge,
        OperatorKind::Identity,
        OperatorKind::Number,
        OperatorKind::CosPhase,
        OperatorKind::CosHalfPhase,
        OperatorKind::SinHalfPhase,
    ];

    /// Short name used in scope labels.
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Annihilation => "a",
            OperatorKind::Creation => "a_dag",
            OperatorKind::Phase => "phi",
            OperatorKind::Charge => "n",
            OperatorKind::Identity => "id",
            OperatorKind::Number => "num",
            OperatorKind::CosPhase => "cos_phi",
            OperatorKind::CosHalfPhase => "cos_phi_2",
            OperatorKind::SinHalfPhase => "sin_phi_2",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
pub(crate) fn c(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

pub(crate) fn check_truncation(dim: usize) -> QubitResult<()> {
    if dim < MIN_TRUNCATION {
        return Err(QubitError::invalid(
            "truncation_dim",
            dim,
            "truncation dimension must be at least 2",
        ));
    }
    Ok(())
}

/// Annihilation operator on `dim` levels.
///
/// # Errors
/// [`QubitError::InvalidParameter`] if `dim < 2`.
pub fn annihilation(dim: usize) -> QubitResult<Matrix> {
    check_truncation(dim)?;
    let mut a = Matrix::zeros((dim, dim));
    for k in 0..dim - 1 {
        a[[k, k + 1]] = c(((k + 1) as f64).sqrt());
    }
    Ok(a)
}

/// Creation operator on `dim` levels, the conjugate transpose of
/// [`annihilation`].
pub fn creation(dim: usize) -> QubitResult<Matrix> {
    annihilation(dim).map(|a| dagger(&a))
}

/// Identity on `dim` levels.
pub fn identity(dim: usize) -> Matrix {
    Matrix::from_diag_elem(dim, c(1.0))
}

/// `value · I` on `dim` levels.
pub fn scaled_identity(dim: usize, value: f64) -> Matrix {
    Matrix::from_diag_elem(dim, c(value))
}

/// Conjugate transpose.
pub fn dagger(m: &Matrix) -> Matrix {
    m.t().mapv(|x| x.conj())
}

/// Whether `m` equals its conjugate transpose within `tol` (entry-wise).
pub fn is_hermitian(m: &Matrix, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    m.indexed_iter()
        .all(|((i, j), v)| (v - m[[j, i]].conj()).norm() <= tol)
}

/// Project onto the Hermitian part `(m + m†) / 2`.
pub fn hermitian_part(m: &Matrix) -> Matrix {
    (m + &dagger(m)) * c(0.5)
}

/// Phase operator `φ_zpf (a + a†)`.
pub fn phase(a: &Matrix, a_dag: &Matrix, phi_zpf: f64) -> Matrix {
    (a + a_dag) * c(phi_zpf)
}

/// Charge operator `i n_zpf (a† − a)`.
pub fn charge(a: &Matrix, a_dag: &Matrix, n_zpf: f64) -> Matrix {
    (a_dag - a) * Complex64::new(0.0, n_zpf)
}

/// Matrix with ones on the `k`-th superdiagonal (`k < 0`: subdiagonal).
fn offset_eye(dim: usize, k: isize) -> Matrix {
    let mut m = Matrix::zeros((dim, dim));
    for i in 0..dim {
        let j = i as isize + k;
        if (0..dim as isize).contains(&j) {
            m[[i, j as usize]] = c(1.0);
        }
    }
    m
}

/// Charge number `Σ n |n⟩⟨n|` on the basis `n = −cutoff ..= cutoff`.
///
/// `n` counts electrons, so a Cooper pair moves it by 2.
pub fn charge_number(cutoff: usize) -> Matrix {
    let values: Vec<Complex64> = (-(cutoff as isize)..=cutoff as isize)
        .map(|n| c(n as f64))
        .collect();
    Matrix::from_diag(&Array1::from(values))
}

/// `cos φ = ½ Σ |n⟩⟨n+2| + h.c.` in the charge basis.
pub fn charge_cos_phi(cutoff: usize) -> Matrix {
    let dim = 2 * cutoff + 1;
    (offset_eye(dim, 2) + offset_eye(dim, -2)) * c(0.5)
}

/// `cos(φ/2) = ½ Σ |n⟩⟨n+1| + h.c.` in the charge basis.
pub fn charge_cos_half_phi(cutoff: usize) -> Matrix {
    let dim = 2 * cutoff + 1;
    (offset_eye(dim, 1) + offset_eye(dim, -1)) * c(0.5)
}

/// `sin(φ/2) = (i/2) Σ |n⟩⟨n+1| + h.c.` in the charge basis.
pub fn charge_sin_half_phi(cutoff: usize) -> Matrix {
    let dim = 2 * cutoff + 1;
    (offset_eye(dim, 1) - offset_eye(dim, -1)) * Complex64::new(0.0, 0.5)
}

/// Builds operators for one truncation and set of zero-point scales.
///
/// The ladder pair is built once; derived operators are assembled on
/// each call.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorFactory {
    dim: usize,
    zpf: ZeroPointFluctuation,
    a: Matrix,
    a_dag: Matrix,
}

impl OperatorFactory {
    /// Create a factory for `dim` levels.
    ///
    /// # Errors
    /// [`QubitError::InvalidParameter`] if `dim < 2`.
    pub fn new(dim: usize, zpf: ZeroPointFluctuation) -> QubitResult<Self> {
        let a = annihilation(dim)?;
        let a_dag = dagger(&a);
        Ok(Self { dim, zpf, a, a_dag })
    }

    /// Truncation dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Zero-point scales used for φ and n.
    pub fn zpf(&self) -> ZeroPointFluctuation {
        self.zpf
    }

    /// Lowering operator.
    pub fn annihilation(&self) -> &Matrix {
        &self.a
    }

    /// Raising operator.
    pub fn creation(&self) -> &Matrix {
        &self.a_dag
    }

    /// Phase operator.
    pub fn phase(&self) -> Matrix {
        phase(&self.a, &self.a_dag, self.zpf.phi)
    }

    /// Charge operator.
    pub fn charge(&self) -> Matrix {
        charge(&self.a, &self.a_dag, self.zpf.n)
    }

    /// Number operator a†a.
    pub fn number(&self) -> Matrix {
        self.a_dag.dot(&self.a)
    }

    /// Identity on the truncated basis.
    pub fn identity(&self) -> Matrix {
        identity(self.dim)
    }

    /// cos φ as a matrix function of the phase operator.
    pub fn cos_phase(&self) -> Matrix {
        cosm(&self.phase())
    }

    /// cos(φ/2).
    pub fn cos_half_phase(&self) -> Matrix {
        cosm(&(self.phase() * c(0.5)))
    }

    /// sin(φ/2).
    pub fn sin_half_phase(&self) -> Matrix {
        sinm(&(self.phase() * c(0.5)))
    }

    /// Build an operator by kind.
    pub fn operator(&self, kind: OperatorKind) -> Matrix {
        match kind {
            OperatorKind::Annihilation => self.a.clone(),
            OperatorKind::Creation => self.a_dag.clone(),
            OperatorKind::Phase => self.phase(),
            OperatorKind::Charge => self.charge(),
            OperatorKind::Identity => self.identity(),
            OperatorKind::Number => self.number(),
            OperatorKind::CosPhase => self.cos_phase(),
            OperatorKind::CosHalfPhase => self.cos_half_phase(),
            OperatorKind::SinHalfPhase => self.sin_half_phase(),
        }
    }
}
