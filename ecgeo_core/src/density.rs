//! Relatedness density.
//!
//! For item `j`, density is the share of its total relatedness that points at
//! items the region already holds:
//!
//! ```text
//! density[j] = Σ_i hasRCA[i]·relmat[i,j] / Σ_i relmat[i,j]
//! ```
//!
//! An item whose relatedness column sums to zero has undefined density (NaN).
//! Indicators must hold only 0 and 1; convert boolean masks with
//! [`indicator`](crate::matrix::indicator).

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{GeoError, GeoResult};
use crate::matrix::{as_column, col_sums, deterministic_sum_iter, ensure_binary, ensure_square, Operand};

/// Density of every item for a single region.
///
/// # Examples
///
/// ```
/// use ecgeo_core::density::rel_density;
/// use ndarray::{arr1, arr2};
///
/// let relmat = arr2(&[[0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [2.0, 3.0, 0.0]]);
/// let held = arr1(&[1.0, 0.0, 0.0]);
/// let density = rel_density(relmat.view(), held.view()).unwrap();
/// assert_eq!(density[1], 0.25);
/// ```
pub fn rel_density(
    relmat: ArrayView2<'_, f64>,
    has_rca: ArrayView1<'_, f64>,
) -> GeoResult<Array1<f64>> {
    let density = rel_density_regions(relmat, as_column(has_rca))?;
    Ok(density.column(0).to_owned())
}

/// Density of every item for several regions; `has_rca` is items × regions and
/// so is the result.
pub fn rel_density_regions(
    relmat: ArrayView2<'_, f64>,
    has_rca: ArrayView2<'_, f64>,
) -> GeoResult<Array2<f64>> {
    ensure_binary(has_rca.iter(), "hasRCA")?;
    let items = ensure_square(relmat, "relmat")?;
    if has_rca.nrows() != items {
        return Err(GeoError::length_mismatch("hasRCA", items, has_rca.nrows()));
    }

    let total = col_sums(relmat);
    let density = Array2::from_shape_fn((items, has_rca.ncols()), |(j, r)| {
        let useful = deterministic_sum_iter(
            has_rca
                .column(r)
                .iter()
                .zip(relmat.column(j).iter())
                .map(|(&h, &w)| h * w),
        );
        useful / total[j]
    });
    Ok(density)
}

/// [`rel_density`] with the `redundant` items removed from the held set.
pub fn compl_rel_density(
    relmat: ArrayView2<'_, f64>,
    has_rca: ArrayView1<'_, f64>,
    redundant: ArrayView1<'_, f64>,
) -> GeoResult<Array1<f64>> {
    if redundant.len() != has_rca.len() {
        return Err(GeoError::length_mismatch(
            "redundant_items",
            has_rca.len(),
            redundant.len(),
        ));
    }
    ensure_binary(has_rca.iter(), "hasRCA")?;
    ensure_binary(redundant.iter(), "redundant_items")?;

    let valid: Array1<f64> = has_rca
        .iter()
        .zip(redundant.iter())
        .map(|(&h, &r)| h * (1.0 - r))
        .collect();
    rel_density(relmat, valid.view())
}

/// [`rel_density_regions`] with redundant items removed.
///
/// A shared redundant vector (one entry per item) applies to every region; a
/// matrix must match `has_rca` in shape.
pub fn compl_rel_density_regions(
    relmat: ArrayView2<'_, f64>,
    has_rca: ArrayView2<'_, f64>,
    redundant: Operand<'_>,
) -> GeoResult<Array2<f64>> {
    ensure_binary(has_rca.iter(), "hasRCA")?;
    let redundant = redundant.broadcast("redundant_items", has_rca.dim())?;
    ensure_binary(redundant.iter(), "redundant_items")?;

    let valid = &has_rca * &redundant.mapv(|r| 1.0 - r);
    rel_density_regions(relmat, valid.view())
}
