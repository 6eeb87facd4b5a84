//! Revealed comparative advantage (Balassa index).
//!
//! The export matrix has one row per product/task and one column per region:
//!
//! ```text
//!         | Ctry1  Ctry2  Ctry3  Ctry4
//! --------+----------------------------
//! Prod1   |
//! Prod2   |
//! Prod3   |
//! ```
//!
//! `RCA[i,r] = (x[i,r] / X_r) / (X_i / X)`. Negative exports count as zero.
//! A region with no exports, or a product nobody exports, gets RCA 0.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::matrix::{binarize, clamp_non_negative, col_sums, deterministic_sum_iter, row_sums};

/// What the caller's matrix holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    /// Raw regional exports; the RCA transform is applied first.
    Export,
    /// Pre-computed RCA values, used as-is.
    #[serde(rename = "RCA")]
    Rca,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Export => "Export",
            InputType::Rca => "RCA",
        }
    }

    /// Produce the RCA matrix for `mat` according to the input type.
    pub fn resolve(&self, mat: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
        match self {
            InputType::Export => rca(mat),
            InputType::Rca => Ok(mat.to_owned()),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputType {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Export" => Ok(InputType::Export),
            "RCA" => Ok(InputType::Rca),
            _ => Err(GeoError::invalid_argument(
                "input_type",
                s,
                "one of 'RCA', 'Export'",
            )),
        }
    }
}

/// Compute RCA from gross exports.
///
/// The caller's matrix is not modified; negative entries are clamped on a copy.
///
/// # Errors
///
/// Returns [`GeoError::DegenerateData`] when the grand total of exports is not
/// positive.
///
/// # Examples
///
/// ```
/// use ecgeo_core::rca::rca;
/// use ndarray::arr2;
///
/// let exports = arr2(&[[100.0, 300.0], [100.0, 100.0]]);
/// let values = rca(exports.view()).unwrap();
/// assert!(values[[0, 1]] > 1.0);
/// ```
pub fn rca(exports: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
    let exports = clamp_non_negative(exports);

    let region_totals = col_sums(exports.view());
    let item_totals = row_sums(exports.view());
    let grand_total = deterministic_sum_iter(region_totals.iter().copied());
    if !(grand_total > 0.0) {
        return Err(GeoError::degenerate(
            "rca",
            "the export matrix has no positive values",
        ));
    }

    let mut values = Array2::zeros(exports.dim());
    Zip::indexed(&mut values)
        .and(&exports)
        .for_each(|(i, r), out, &x| {
            let region_total = region_totals[r];
            let world_share = item_totals[i] / grand_total;
            *out = if region_total > 0.0 && world_share > 0.0 {
                (x / region_total) / world_share
            } else {
                0.0
            };
        });

    Ok(values)
}

/// 0/1 matrix marking where a region has comparative advantage (RCA ≥ 1).
pub fn is_rca(exports: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
    let values = rca(exports)?;
    Ok(binarize(values.view()))
}

/// Boolean variant of [`is_rca`].
pub fn is_rca_bool(exports: ArrayView2<'_, f64>) -> GeoResult<Array2<bool>> {
    let values = rca(exports)?;
    Ok(values.mapv(|v| v >= 1.0))
}
