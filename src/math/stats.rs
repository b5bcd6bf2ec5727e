//! Statistical primitives for fixed-size symptom vectors.

use crate::cohort::SYMPTOM_COUNT;

pub type Vector = [f64; SYMPTOM_COUNT];
pub type Matrix = [[f64; SYMPTOM_COUNT]; SYMPTOM_COUNT];

const JACOBI_MAX_SWEEPS: usize = 50;
const PINV_RELATIVE_TOLERANCE: f64 = 1e-12;

pub fn column_means(rows: &[Vector]) -> Vector {
    let mut means = [0.0; SYMPTOM_COUNT];
    if rows.is_empty() {
        return means;
    }
    for row in rows {
        for (mean, value) in means.iter_mut().zip(row) {
            *mean += value;
        }
    }
    for mean in &mut means {
        *mean /= rows.len() as f64;
    }
    means
}

/// Sample covariance with the n-1 denominator. Fewer than two rows have no
/// measurable spread and yield the zero matrix.
pub fn sample_covariance(rows: &[Vector]) -> Matrix {
    let mut cov = [[0.0; SYMPTOM_COUNT]; SYMPTOM_COUNT];
    if rows.len() < 2 {
        return cov;
    }
    let means = column_means(rows);
    for row in rows {
        for i in 0..SYMPTOM_COUNT {
            for j in 0..SYMPTOM_COUNT {
                cov[i][j] += (row[i] - means[i]) * (row[j] - means[j]);
            }
        }
    }
    let denom = (rows.len() - 1) as f64;
    for row in &mut cov {
        for value in row {
            *value /= denom;
        }
    }
    cov
}

/// Moore-Penrose pseudo-inverse of a symmetric matrix. Eigenvalues below the
/// relative tolerance count as zero, so a rank-deficient or outright zero
/// covariance is accepted instead of failing.
pub fn pseudo_inverse(matrix: &Matrix) -> Matrix {
    let (eigenvalues, eigenvectors) = jacobi_eigen(matrix);
    let largest = eigenvalues.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let tolerance = largest * PINV_RELATIVE_TOLERANCE;

    let mut out = [[0.0; SYMPTOM_COUNT]; SYMPTOM_COUNT];
    for k in 0..SYMPTOM_COUNT {
        if eigenvalues[k].abs() <= tolerance {
            continue;
        }
        let inv = 1.0 / eigenvalues[k];
        for i in 0..SYMPTOM_COUNT {
            for j in 0..SYMPTOM_COUNT {
                out[i][j] += inv * eigenvectors[i][k] * eigenvectors[j][k];
            }
        }
    }
    out
}

/// Mahalanobis distance between two points given an inverse covariance.
pub fn mahalanobis(a: &Vector, b: &Vector, inv_cov: &Matrix) -> f64 {
    let mut diff = [0.0; SYMPTOM_COUNT];
    for i in 0..SYMPTOM_COUNT {
        diff[i] = a[i] - b[i];
    }
    let mut acc = 0.0;
    for i in 0..SYMPTOM_COUNT {
        for j in 0..SYMPTOM_COUNT {
            acc += diff[i] * inv_cov[i][j] * diff[j];
        }
    }
    // Rounding can push the quadratic form a hair below zero.
    acc.max(0.0).sqrt()
}

/// Cyclic Jacobi eigendecomposition for a symmetric matrix. Returns the
/// eigenvalues and the matrix whose columns are the matching eigenvectors.
fn jacobi_eigen(matrix: &Matrix) -> (Vector, Matrix) {
    let mut a = *matrix;
    let mut v = [[0.0; SYMPTOM_COUNT]; SYMPTOM_COUNT];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for _ in 0..JACOBI_MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..SYMPTOM_COUNT {
            for q in (p + 1)..SYMPTOM_COUNT {
                off += a[p][q].abs();
            }
        }
        let scale: f64 = (0..SYMPTOM_COUNT).map(|i| a[i][i].abs()).sum();
        if off <= PINV_RELATIVE_TOLERANCE * scale.max(1.0) {
            break;
        }

        for p in 0..SYMPTOM_COUNT {
            for q in (p + 1)..SYMPTOM_COUNT {
                if a[p][q].abs() <= f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = if theta.abs() > 1e12 {
                    0.5 / theta
                } else {
                    theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt())
                };
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                // A <- G^T A G for the Givens rotation G in the (p, q) plane.
                for k in 0..SYMPTOM_COUNT {
                    let akp = a[k][p];
                    let akq = a[k][q];
                    a[k][p] = c * akp - s * akq;
                    a[k][q] = s * akp + c * akq;
                }
                for k in 0..SYMPTOM_COUNT {
                    let apk = a[p][k];
                    let aqk = a[q][k];
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for k in 0..SYMPTOM_COUNT {
                    let vkp = v[k][p];
                    let vkq = v[k][q];
                    v[k][p] = c * vkp - s * vkq;
                    v[k][q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut eigenvalues = [0.0; SYMPTOM_COUNT];
    for i in 0..SYMPTOM_COUNT {
        eigenvalues[i] = a[i][i];
    }
    (eigenvalues, v)
}
