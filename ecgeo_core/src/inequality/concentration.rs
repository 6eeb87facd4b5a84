//! Robin Hood (Hoover) and Herfindahl–Hirschman indices.

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::per_column;
use crate::error::GeoResult;
use crate::matrix::{deterministic_mean, deterministic_sum_iter, Operand};

/// Robin Hood index: the share of total income that would have to move to
/// reach perfect equality.
///
/// Plain: `0.5·Σ|x − mean| / Σx`. By class: `0.5·Σ|s/Σs − x·s/Σ(x·s)|`.
pub fn robin_hood(
    mat: ArrayView2<'_, f64>,
    class_size: Option<Operand<'_>>,
) -> GeoResult<Array1<f64>> {
    per_column(mat, class_size, robin_hood_column, robin_hood_by_class_column)
}

fn robin_hood_column(values: ArrayView1<'_, f64>) -> f64 {
    let owned = values.to_vec();
    let mean = deterministic_mean(&owned);
    let total = deterministic_sum_iter(owned.iter().copied());
    0.5 * deterministic_sum_iter(owned.iter().map(|x| (x - mean).abs())) / total
}

fn robin_hood_by_class_column(values: ArrayView1<'_, f64>, sizes: ArrayView1<'_, f64>) -> f64 {
    let population = deterministic_sum_iter(sizes.iter().copied());
    let income = deterministic_sum_iter(values.iter().zip(sizes.iter()).map(|(x, s)| x * s));
    0.5 * deterministic_sum_iter(
        values
            .iter()
            .zip(sizes.iter())
            .map(|(x, s)| (s / population - x * s / income).abs()),
    )
}

/// Herfindahl–Hirschman concentration `Σx² / (Σx)²` of every column.
pub fn herfindahl(mat: ArrayView2<'_, f64>) -> Array1<f64> {
    mat.columns()
        .into_iter()
        .map(|column| {
            let squares = deterministic_sum_iter(column.iter().map(|x| x * x));
            let total = deterministic_sum_iter(column.iter().copied());
            squares / (total * total)
        })
        .collect()
}
