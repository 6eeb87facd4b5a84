//! Shared matrix plumbing: validation, clamping, binarization and lane sums.
//!
//! Every engine works on dense `f64` matrices laid out as items (rows) by
//! regions (columns). Inputs are borrowed as views and never mutated; helpers
//! that need to change values return owned copies.

pub mod accumulate;

use ndarray::{Array, Array1, Array2, ArrayView, ArrayView1, ArrayView2, ArrayViewD, Axis, Dimension, Ix2};

use crate::error::{GeoError, GeoResult};

pub use accumulate::{deterministic_mean, deterministic_sum, deterministic_sum_iter};

/// Auxiliary input that accompanies a matrix column by column.
///
/// A shared vector is broadcast to every column; a per-column matrix must
/// have exactly the shape of the primary matrix.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Shared(ArrayView1<'a, f64>),
    PerColumn(ArrayView2<'a, f64>),
}

impl<'a> Operand<'a> {
    /// Materialize the operand at `shape`, validating its length or shape.
    pub fn broadcast(&self, name: &str, shape: (usize, usize)) -> GeoResult<Array2<f64>> {
        let (rows, cols) = shape;
        match self {
            Operand::Shared(column) => {
                if column.len() != rows {
                    return Err(GeoError::length_mismatch(name, rows, column.len()));
                }
                Ok(Array2::from_shape_fn((rows, cols), |(i, _)| column[i]))
            }
            Operand::PerColumn(matrix) => {
                if matrix.dim() != shape {
                    return Err(GeoError::invalid_shape(
                        name,
                        format!(
                            "expected shape {:?} to match the primary matrix, got {:?}",
                            shape,
                            matrix.dim()
                        ),
                    ));
                }
                Ok(matrix.to_owned())
            }
        }
    }
}

impl<'a> From<ArrayView1<'a, f64>> for Operand<'a> {
    fn from(value: ArrayView1<'a, f64>) -> Self {
        Operand::Shared(value)
    }
}

impl<'a> From<ArrayView2<'a, f64>> for Operand<'a> {
    fn from(value: ArrayView2<'a, f64>) -> Self {
        Operand::PerColumn(value)
    }
}

/// Narrow a dynamic-rank view to a matrix, rejecting any other rank.
pub fn as_matrix<'a>(view: ArrayViewD<'a, f64>, name: &str) -> GeoResult<ArrayView2<'a, f64>> {
    let rank = view.ndim();
    view.into_dimensionality::<Ix2>().map_err(|_| {
        GeoError::invalid_shape(
            name,
            format!("must be a 2-d array, but its dimension is {}", rank),
        )
    })
}

/// View a vector as a single-column matrix.
pub fn as_column<'a>(values: ArrayView1<'a, f64>) -> ArrayView2<'a, f64> {
    values.insert_axis(Axis(1))
}

/// Copy of `mat` with every non-positive entry set to zero. NaN is kept.
pub fn clamp_non_negative(mat: ArrayView2<'_, f64>) -> Array2<f64> {
    mat.mapv(|v| if v <= 0.0 { 0.0 } else { v })
}

/// 0/1 indicator of `value >= 1.0`.
pub fn binarize(rca: ArrayView2<'_, f64>) -> Array2<f64> {
    rca.mapv(|v| if v >= 1.0 { 1.0 } else { 0.0 })
}

/// Convert a boolean mask of any rank into a 0/1 indicator.
pub fn indicator<D: Dimension>(mask: ArrayView<'_, bool, D>) -> Array<f64, D> {
    mask.mapv(|flag| if flag { 1.0 } else { 0.0 })
}

/// Deterministic per-row sums.
pub fn row_sums(mat: ArrayView2<'_, f64>) -> Array1<f64> {
    mat.rows()
        .into_iter()
        .map(|row| deterministic_sum_iter(row.iter().copied()))
        .collect()
}

/// Deterministic per-column sums.
pub fn col_sums(mat: ArrayView2<'_, f64>) -> Array1<f64> {
    mat.columns()
        .into_iter()
        .map(|col| deterministic_sum_iter(col.iter().copied()))
        .collect()
}

/// Resolve an optional region weight vector, defaulting to all ones.
///
/// Weights must be one strictly positive finite value per region.
pub fn resolve_weight(weight: Option<ArrayView1<'_, f64>>, regions: usize) -> GeoResult<Array1<f64>> {
    let Some(weight) = weight else {
        return Ok(Array1::ones(regions));
    };
    if weight.len() != regions {
        return Err(GeoError::length_mismatch("weight", regions, weight.len()));
    }
    if let Some(bad) = weight.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
        return Err(GeoError::invalid_argument(
            "weight",
            bad.to_string(),
            "every region weight is a finite value > 0",
        ));
    }
    Ok(weight.to_owned())
}

/// Reject any entry that is not exactly 0 or 1.
pub fn ensure_binary<'a, I>(values: I, name: &str) -> GeoResult<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    match values.into_iter().find(|v| **v != 0.0 && **v != 1.0) {
        Some(bad) => Err(GeoError::invalid_argument(
            name,
            bad.to_string(),
            "elements are booleans or the integers 0 and 1 only",
        )),
        None => Ok(()),
    }
}

/// Reject non-square matrices.
pub fn ensure_square(mat: ArrayView2<'_, f64>, name: &str) -> GeoResult<usize> {
    let (rows, cols) = mat.dim();
    if rows != cols {
        return Err(GeoError::invalid_shape(
            name,
            format!("must be a square 2-d array, but its shape is ({}, {})", rows, cols),
        ));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, ArrayD, IxDyn};

    #[test]
    fn as_matrix_rejects_wrong_rank() {
        let cube = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2]));
        let err = as_matrix(cube.view(), "mat").unwrap_err();
        assert!(err.to_string().contains("dimension is 3"));

        let flat = ArrayD::<f64>::zeros(IxDyn(&[2, 3]));
        assert_eq!(as_matrix(flat.view(), "mat").unwrap().dim(), (2, 3));
    }

    #[test]
    fn clamp_copies_and_keeps_caller_data() {
        let mat = arr2(&[[-1.0, 2.0], [0.0, -0.5]]);
        let clamped = clamp_non_negative(mat.view());
        assert_eq!(clamped, arr2(&[[0.0, 2.0], [0.0, 0.0]]));
        assert_eq!(mat[[0, 0]], -1.0);
    }

    #[test]
    fn binarize_uses_inclusive_threshold() {
        let rca = arr2(&[[0.999, 1.0], [1.5, 0.0]]);
        assert_eq!(binarize(rca.view()), arr2(&[[0.0, 1.0], [1.0, 0.0]]));
    }

    #[test]
    fn lane_sums() {
        let mat = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(row_sums(mat.view()), arr1(&[6.0, 15.0]));
        assert_eq!(col_sums(mat.view()), arr1(&[5.0, 7.0, 9.0]));
    }

    #[test]
    fn weight_validation() {
        assert_eq!(resolve_weight(None, 3).unwrap(), arr1(&[1.0, 1.0, 1.0]));

        let short = arr1(&[1.0, 2.0]);
        assert!(matches!(
            resolve_weight(Some(short.view()), 3),
            Err(GeoError::InvalidShape { .. })
        ));

        let zero = arr1(&[1.0, 0.0, 2.0]);
        assert!(matches!(
            resolve_weight(Some(zero.view()), 3),
            Err(GeoError::InvalidArgument { .. })
        ));

        let nan = arr1(&[1.0, f64::NAN, 2.0]);
        assert!(resolve_weight(Some(nan.view()), 3).is_err());
    }

    #[test]
    fn operand_broadcasts_shared_column() {
        let shared = arr1(&[1.0, 2.0]);
        let full = Operand::from(shared.view()).broadcast("reference", (2, 3)).unwrap();
        assert_eq!(full, arr2(&[[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]));

        let wrong = arr2(&[[1.0, 2.0]]);
        assert!(Operand::from(wrong.view()).broadcast("reference", (2, 3)).is_err());
    }

    #[test]
    fn binary_and_square_checks() {
        let ok = arr1(&[0.0, 1.0, 1.0]);
        assert!(ensure_binary(ok.iter(), "hasRCA").is_ok());
        let bad = arr1(&[0.0, 2.0]);
        assert!(ensure_binary(bad.iter(), "hasRCA").is_err());

        let rect = arr2(&[[1.0, 2.0, 3.0]]);
        assert!(ensure_square(rect.view(), "relmat").is_err());
    }

    #[test]
    fn bool_indicator() {
        let mask = arr2(&[[true, false], [false, true]]);
        assert_eq!(indicator(mask.view()), arr2(&[[1.0, 0.0], [0.0, 1.0]]));
    }
}
