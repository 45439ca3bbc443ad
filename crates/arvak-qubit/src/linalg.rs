//! Matrix functions for operator-valued potentials.
//!
//! `cos(φ)` and `sin(φ)` of an operator are formed from the matrix
//! exponential, itself computed by scaling-and-squaring with a Padé(13)
//! approximant (Higham 2005). Truncated qubit bases are small, so a dense
//! Gaussian-elimination solve is sufficient.

use ndarray::{Array2, s};
use num_complex::Complex64;
use tracing::warn;

use crate::operator::{Matrix, c};

/// Padé(13,13) coefficients b_0..b_13, Higham (2005) table 10.4.
///
/// Only ratios matter in `(V − U)⁻¹ (V + U)`, so the integers are used
/// as is.
const PADE_COEFFS: [f64; 14] = [
    64_764_752_532_480_000.0,
    32_382_376_266_240_000.0,
    7_771_770_303_897_600.0,
    1_187_353_796_428_800.0,
    129_060_195_264_000.0,
    10_559_470_521_600.0,
    670_442_572_800.0,
    33_522_128_640.0,
    1_323_241_920.0,
    40_840_800.0,
    960_960.0,
    16_380.0,
    182.0,
    1.0,
];

/// Norm bound below which Padé(13) needs no scaling.
const THETA_13: f64 = 5.371_920_351_148_152;

/// Matrix exponential `exp(m)` of a square matrix.
///
/// Returns `None` for non-finite entries or a singular Padé denominator.
pub fn try_expm(m: &Matrix) -> Option<Matrix> {
    let n = m.nrows();
    debug_assert_eq!(n, m.ncols(), "expm requires a square matrix");

    let norm = one_norm(m);
    if !norm.is_finite() {
        return None;
    }

    match n {
        0 => return Some(Matrix::zeros((0, 0))),
        1 => return Some(Matrix::from_elem((1, 1), m[[0, 0]].exp())),
        _ => {}
    }

    let squarings = if norm > THETA_13 {
        (norm / THETA_13).log2().ceil() as i32
    } else {
        0
    };

    let scaled = m * c(2f64.powi(-squarings));
    let mut result = pade13(&scaled)?;
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    Some(result)
}

/// Matrix exponential `exp(m)`.
///
/// Where [`try_expm`] fails the result is filled with NaN so the failure
/// cannot pass for a plausible matrix.
pub fn expm(m: &Matrix) -> Matrix {
    try_expm(m).unwrap_or_else(|| {
        warn!(dim = m.nrows(), "matrix exponential failed, returning NaN");
        Matrix::from_elem(m.dim(), Complex64::new(f64::NAN, f64::NAN))
    })
}

/// Operator cosine `(exp(i m) + exp(-i m)) / 2`.
pub fn cosm(m: &Matrix) -> Matrix {
    let (plus, minus) = exp_pm_i(m);
    (plus + minus) * c(0.5)
}

/// Operator sine `(exp(i m) - exp(-i m)) / 2i`.
pub fn sinm(m: &Matrix) -> Matrix {
    let (plus, minus) = exp_pm_i(m);
    (plus - minus) * Complex64::new(0.0, -0.5)
}

fn exp_pm_i(m: &Matrix) -> (Matrix, Matrix) {
    let im = m * Complex64::new(0.0, 1.0);
    let plus = expm(&im);
    let minus = expm(&(-&im));
    (plus, minus)
}

fn pade13(a: &Matrix) -> Option<Matrix> {
    let n = a.nrows();
    let eye = Matrix::from_diag_elem(n, c(1.0));

    let a2 = a.dot(a);
    let a4 = a2.dot(&a2);
    let a6 = a2.dot(&a4);

    let w1 = &a6 * c(PADE_COEFFS[13]) + &a4 * c(PADE_COEFFS[11]) + &a2 * c(PADE_COEFFS[9]);
    let w2 = w1.dot(&a6)
        + &a6 * c(PADE_COEFFS[7])
        + &a4 * c(PADE_COEFFS[5])
        + &a2 * c(PADE_COEFFS[3])
        + &eye * c(PADE_COEFFS[1]);
    let u = a.dot(&w2);

    let v1 = &a6 * c(PADE_COEFFS[12]) + &a4 * c(PADE_COEFFS[10]) + &a2 * c(PADE_COEFFS[8]);
    let v = v1.dot(&a6)
        + &a6 * c(PADE_COEFFS[6])
        + &a4 * c(PADE_COEFFS[4])
        + &a2 * c(PADE_COEFFS[2])
        + &eye * c(PADE_COEFFS[0]);

    // (V - U)^{-1} (V + U)
    solve(&v - &u, &v + &u)
}

/// Solve `A X = B` by Gaussian elimination with partial pivoting.
///
/// `None` if a pivot vanishes or is not finite.
fn solve(a: Matrix, b: Matrix) -> Option<Matrix> {
    let n = a.nrows();
    let m = b.ncols();

    let mut aug: Array2<Complex64> = Array2::zeros((n, n + m));
    aug.slice_mut(s![.., ..n]).assign(&a);
    aug.slice_mut(s![.., n..]).assign(&b);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&x, &y| aug[[x, col]].norm().total_cmp(&aug[[y, col]].norm()))
            .unwrap_or(col);
        if pivot_row != col {
            for j in 0..n + m {
                aug.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        if pivot.norm() == 0.0 || !pivot.is_finite() {
            return None;
        }

        for row in col + 1..n {
            let factor = aug[[row, col]] / pivot;
            for j in col..n + m {
                let val = aug[[col, j]];
                aug[[row, j]] -= factor * val;
            }
        }
    }

    let mut x = Matrix::zeros((n, m));
    for row in (0..n).rev() {
        let pivot = aug[[row, row]];
        for j in 0..m {
            let mut sum = aug[[row, n + j]];
            for k in row + 1..n {
                sum -= aug[[row, k]] * x[[k, j]];
            }
            x[[row, j]] = sum / pivot;
        }
    }
    Some(x)
}

/// Maximum absolute column sum.
fn one_norm(m: &Matrix) -> f64 {
    m.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}
