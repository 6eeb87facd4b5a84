//! PRODY and EXPY sophistication indices.
//!
//! PRODY scores an item by the RCA-weighted average of a regional value such
//! as income per capita. EXPY scores a region by the export-share-weighted
//! average PRODY of its basket.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{GeoError, GeoResult};
use crate::matrix::{clamp_non_negative, col_sums, deterministic_sum_iter, resolve_weight};
use crate::rca::InputType;

/// PRODY, one value per item.
///
/// `PRODY[i] = Σ_r RCA[i,r]·w[r]·val[r] / Σ_r RCA[i,r]·w[r]`, with `w = 1`
/// when no weight is given. An item with no RCA anywhere yields NaN.
///
/// # Errors
///
/// `val` or `weight` not matching the region count, non-positive weights, or
/// a degenerate export matrix.
pub fn prody(
    mat: ArrayView2<'_, f64>,
    val: ArrayView1<'_, f64>,
    input_type: InputType,
    weight: Option<ArrayView1<'_, f64>>,
) -> GeoResult<Array1<f64>> {
    let regions = mat.ncols();
    if val.len() != regions {
        return Err(GeoError::length_mismatch("val", regions, val.len()));
    }
    let weight = resolve_weight(weight, regions)?;
    let rca = input_type.resolve(mat)?;

    let values = rca
        .rows()
        .into_iter()
        .map(|row| {
            let numerator = deterministic_sum_iter(
                row.iter()
                    .zip(weight.iter().zip(val.iter()))
                    .map(|(&x, (&w, &v))| x * w * v),
            );
            let denominator =
                deterministic_sum_iter(row.iter().zip(weight.iter()).map(|(&x, &w)| x * w));
            if denominator == 0.0 {
                f64::NAN
            } else {
                numerator / denominator
            }
        })
        .collect();
    Ok(values)
}

/// EXPY, one value per region, from gross exports.
///
/// Each region's basket share `x[i,r] / X_r` weights the item's PRODY. Items
/// the region does not export are skipped; a region with no exports yields NaN.
pub fn expy(
    exports: ArrayView2<'_, f64>,
    val: ArrayView1<'_, f64>,
    weight: Option<ArrayView1<'_, f64>>,
) -> GeoResult<Array1<f64>> {
    let prody = prody(exports, val, InputType::Export, weight)?;
    let exports = clamp_non_negative(exports);
    let region_totals = col_sums(exports.view());

    let values = exports
        .columns()
        .into_iter()
        .zip(region_totals.iter())
        .map(|(basket, &total)| {
            if total <= 0.0 {
                return f64::NAN;
            }
            deterministic_sum_iter(
                basket
                    .iter()
                    .zip(prody.iter())
                    .filter(|(x, _)| **x > 0.0)
                    .map(|(&x, &p)| x / total * p),
            )
        })
        .collect();
    Ok(values)
}
