//! Eigenvector complexity.
//!
//! The item transition matrix `M = doge · coinᵀ` (row-normalized advantage
//! times column-normalized advantage, transposed) factors as `M = U⁻¹S`, where
//! `U` is the ubiquity diagonal and `S[i,j] = Σ_r h[i,r]·h[j,r] / d[r]` is
//! symmetric. `M` is therefore similar to `A = U^{-1/2} S U^{-1/2}`. `A` is
//! decomposed with a symmetric solver and its eigenvectors `w` are mapped back
//! with `v = U^{-1/2} w`. All eigenvalues are real.
//!
//! The eigenvector of the largest eigenvalue is constant over items with
//! advantage; the second one orders items by complexity. Its sign is not
//! normalized.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::{ensure_advantage, rescale};
use crate::error::{GeoError, GeoResult};
use crate::matrix::{binarize, col_sums, row_sums};

/// PCI from the second eigenvector of the item transition matrix.
///
/// Items with zero ubiquity come out as NaN.
///
/// # Errors
///
/// Fewer than two items, no entry with RCA ≥ 1, or a solver that fails to
/// converge.
pub fn pci_eig(rca: ArrayView2<'_, f64>) -> GeoResult<Array1<f64>> {
    let items = rca.nrows();
    if items < 2 {
        return Err(GeoError::invalid_shape(
            "mat",
            format!("the eigenvector method needs at least two items, got {}", items),
        ));
    }

    let has_rca = binarize(rca);
    ensure_advantage(&has_rca, "pci_eig")?;

    let ubiquity = row_sums(has_rca.view());
    let diversity = col_sums(has_rca.view());

    let scale: Vec<f64> = ubiquity
        .iter()
        .map(|&u| if u > 0.0 { 1.0 / u.sqrt() } else { 0.0 })
        .collect();
    let similar = symmetric_transition(&has_rca, diversity.view(), &scale);

    let eigen = SymmetricEigen::try_new(similar, f64::EPSILON, 0).ok_or_else(|| {
        GeoError::degenerate("pci_eig", "the eigen solver did not converge")
    })?;

    let mut order: Vec<usize> = (0..items).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
    let second = order[1];
    tracing::debug!(
        leading = eigen.eigenvalues[order[0]],
        second = eigen.eigenvalues[second],
        "transition spectrum"
    );

    let w = eigen.eigenvectors.column(second);
    let values: Array1<f64> = (0..items)
        .map(|i| {
            if ubiquity[i] > 0.0 {
                scale[i] * w[i]
            } else {
                f64::NAN
            }
        })
        .collect();

    Ok(rescale(values.view()))
}

/// ECI from the eigenvector method; PCI of the transposed matrix.
pub fn eci_eig(rca: ArrayView2<'_, f64>) -> GeoResult<Array1<f64>> {
    pci_eig(rca.t())
}

/// Build `U^{-1/2} S U^{-1/2}` with `S = h · coinᵀ`, reading only the upper
/// triangle so the result is exactly symmetric.
fn symmetric_transition(
    has_rca: &Array2<f64>,
    diversity: ArrayView1<'_, f64>,
    scale: &[f64],
) -> DMatrix<f64> {
    let inverse_diversity = diversity.mapv(|d| if d > 0.0 { 1.0 / d } else { 0.0 });
    let coin = has_rca * &inverse_diversity;
    let shared = has_rca.dot(&coin.t());

    DMatrix::from_fn(has_rca.nrows(), has_rca.nrows(), |i, j| {
        let (a, b) = if i <= j { (i, j) } else { (j, i) };
        scale[a] * shared[[a, b]] * scale[b]
    })
}
