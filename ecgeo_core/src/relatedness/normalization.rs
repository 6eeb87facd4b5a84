//! Normalizations of a square co-occurrence count matrix.
//!
//! With `col[j] = Σ_i C[i,j]`, `row[i] = Σ_j C[i,j]` and `T = Σ_j col[j]`:
//!
//! | scheme      | entry `(i, j)`                                             |
//! |-------------|------------------------------------------------------------|
//! | Jaccard     | `C / (col[j] + row[i] − C)`                                |
//! | Cosine      | `C / sqrt(col[j] · row[i])`                                |
//! | Association | `T · C / (col[j] · row[i])`                                |
//! | Steijn      | `C / ((col/T)(row/(T−col)) + (row/T)(col/(T−row))) / (T/2)` |
//!
//! An entry whose row or column sum is zero is 0. The diagonal is always 0.

use ndarray::{Array1, Array2, ArrayView2, Zip};

use crate::error::GeoResult;
use crate::matrix::{col_sums, deterministic_sum_iter, ensure_square, row_sums};

struct Marginals {
    col: Array1<f64>,
    row: Array1<f64>,
    total: f64,
}

impl Marginals {
    fn of(counts: ArrayView2<'_, f64>) -> GeoResult<Self> {
        ensure_square(counts, "co_occur_mat")?;
        let col = col_sums(counts);
        let row = row_sums(counts);
        let total = deterministic_sum_iter(col.iter().copied());
        Ok(Self { col, row, total })
    }
}

fn normalize_with<F>(counts: ArrayView2<'_, f64>, cell: F) -> GeoResult<Array2<f64>>
where
    F: Fn(f64, f64, f64, f64) -> f64,
{
    let marginals = Marginals::of(counts)?;
    let mut out = Array2::zeros(counts.dim());
    Zip::indexed(&mut out).and(&counts).for_each(|(i, j), out, &c| {
        *out = if i == j {
            0.0
        } else {
            cell(c, marginals.col[j], marginals.row[i], marginals.total)
        };
    });
    Ok(out)
}

/// Jaccard similarity normalization.
pub fn jaccard_normalization(counts: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
    normalize_with(counts, |c, col, row, _| {
        if col == 0.0 || row == 0.0 {
            0.0
        } else {
            c / (col + row - c)
        }
    })
}

/// Cosine similarity normalization.
pub fn cosine_normalization(counts: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
    normalize_with(counts, |c, col, row, _| {
        if col == 0.0 || row == 0.0 {
            0.0
        } else {
            c / (col * row).sqrt()
        }
    })
}

/// Association strength normalization.
pub fn association_strength_normalization(counts: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
    normalize_with(counts, |c, col, row, total| {
        if col == 0.0 || row == 0.0 {
            0.0
        } else {
            total * c / (col * row)
        }
    })
}

/// Steijn's symmetrized probability normalization. NaN and infinite cells map to 0.
pub fn steijn_normalization(counts: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
    normalize_with(counts, |c, col, row, total| {
        let expected = ((col / total) * (row / (total - col)) + (row / total) * (col / (total - row)))
            * (total / 2.0);
        let value = c / expected;
        if value.is_finite() {
            value
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn counts() -> Array2<f64> {
        arr2(&[
            [0.0, 1.0, 2.0, 0.0],
            [1.0, 0.0, 2.0, 0.0],
            [2.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ])
    }

    #[test]
    fn jaccard_matches_hand_values() {
        let j = jaccard_normalization(counts().view()).unwrap();
        // col[1] = 3, row[0] = 3 -> 1 / (3 + 3 - 1)
        assert!((j[[0, 1]] - 0.2).abs() < 1e-15);
        // col[2] = 4, row[0] = 3 -> 2 / (4 + 3 - 2)
        assert!((j[[0, 2]] - 0.4).abs() < 1e-15);
        assert_eq!(j[[3, 0]], 0.0);
        assert_eq!(j[[0, 3]], 0.0);
    }

    #[test]
    fn cosine_matches_hand_values() {
        let c = cosine_normalization(counts().view()).unwrap();
        assert!((c[[0, 2]] - 2.0 / 12.0_f64.sqrt()).abs() < 1e-15);
        assert_eq!(c, c.t());
    }

    #[test]
    fn association_strength_uses_grand_total() {
        let a = association_strength_normalization(counts().view()).unwrap();
        // T = 10, col[1] = 3, row[0] = 3
        assert!((a[[0, 1]] - 10.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn steijn_is_finite_and_zero_on_empty_items() {
        let s = steijn_normalization(counts().view()).unwrap();
        assert!(s.iter().all(|v| v.is_finite()));
        assert!(s.row(3).iter().all(|&v| v == 0.0));
        assert!(s.diag().iter().all(|&v| v == 0.0));
        // T = 10, col[1] = row[0] = 3:
        // expected = 2 * (0.3 * 3 / 7) * 5
        let expected = 2.0 * (0.3 * (3.0 / 7.0)) * 5.0;
        assert!((s[[0, 1]] - 1.0 / expected).abs() < 1e-12);
    }

    #[test]
    fn all_zero_counts_yield_zero_matrix() {
        let zeros = Array2::<f64>::zeros((3, 3));
        for result in [
            jaccard_normalization(zeros.view()).unwrap(),
            cosine_normalization(zeros.view()).unwrap(),
            association_strength_normalization(zeros.view()).unwrap(),
            steijn_normalization(zeros.view()).unwrap(),
        ] {
            assert!(result.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn non_square_is_rejected() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(cosine_normalization(rect.view()).is_err());
    }
}
