//! Orientation of complexity indices against a reference measure.
//!
//! Eigenvector signs are arbitrary, so an index is flipped (`v -> 100 - v`)
//! when it correlates negatively with a reference such as diversity or GDP.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{GeoError, GeoResult};
use crate::matrix::{deterministic_mean, deterministic_sum_iter, Operand};

/// Orient a single index against `reference`.
///
/// Only pairs where both values are finite enter the Pearson correlation.
/// The index is flipped only when that correlation is negative. With fewer
/// than two finite pairs, or zero variance on either side, the correlation is
/// undefined and the index is returned unchanged.
///
/// # Examples
///
/// ```
/// use ecgeo_core::complexity::ci_calibrate;
/// use ndarray::arr1;
///
/// let index = arr1(&[10.0, 20.0, 30.0]);
/// let reference = arr1(&[30.0, 20.0, 10.0]);
/// let oriented = ci_calibrate(index.view(), reference.view()).unwrap();
/// assert_eq!(oriented, arr1(&[90.0, 80.0, 70.0]));
/// ```
pub fn ci_calibrate(
    index: ArrayView1<'_, f64>,
    reference: ArrayView1<'_, f64>,
) -> GeoResult<Array1<f64>> {
    if index.len() != reference.len() {
        return Err(GeoError::length_mismatch(
            "reference",
            index.len(),
            reference.len(),
        ));
    }
    if is_anticorrelated(index, reference) {
        Ok(index.mapv(flip))
    } else {
        Ok(index.to_owned())
    }
}

/// Orient every column of `index` independently.
///
/// A shared reference vector applies to all columns; a reference matrix must
/// match `index` in shape.
pub fn ci_calibrate_columns(
    index: ArrayView2<'_, f64>,
    reference: Operand<'_>,
) -> GeoResult<Array2<f64>> {
    let reference = reference.broadcast("reference", index.dim())?;
    let mut out = index.to_owned();
    for (j, ref_col) in reference.columns().into_iter().enumerate() {
        if is_anticorrelated(index.column(j), ref_col) {
            out.column_mut(j).mapv_inplace(flip);
        }
    }
    Ok(out)
}

fn flip(v: f64) -> f64 {
    100.0 - v
}

fn is_anticorrelated(index: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> bool {
    matches!(pearson(index, reference), Some(r) if r < 0.0)
}

/// Pearson correlation over pairs where both values are finite.
///
/// `None` with fewer than two usable pairs or zero variance on either side.
pub(crate) fn pearson(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .unzip();
    if xs.len() < 2 {
        return None;
    }

    let mean_x = deterministic_mean(&xs);
    let mean_y = deterministic_mean(&ys);
    let cov = deterministic_sum_iter(xs.iter().zip(&ys).map(|(x, y)| (x - mean_x) * (y - mean_y)));
    let var_x = deterministic_sum_iter(xs.iter().map(|x| (x - mean_x).powi(2)));
    let var_y = deterministic_sum_iter(ys.iter().map(|y| (y - mean_y).powi(2)));
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x * var_y).sqrt();
    r.is_finite().then_some(r)
}
