//! Inequality and concentration indices.
//!
//! Every index is computed per column: each column holds the values (incomes,
//! exports, employment) of one region. An optional class size turns a value
//! into "value per member of a class of that size"; it is either one size per
//! item shared by all columns or a matrix shaped like the data.

pub mod concentration;
pub mod gini;
pub mod theil;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::GeoResult;
use crate::matrix::Operand;

pub use concentration::{herfindahl, robin_hood};
pub use gini::gini;
pub use theil::{theil, TheilMethod};

/// Broadcast an optional class-size operand to the data's shape.
fn class_sizes(
    mat: ArrayView2<'_, f64>,
    class_size: Option<Operand<'_>>,
) -> GeoResult<Option<Array2<f64>>> {
    class_size
        .map(|operand| operand.broadcast("class_size", mat.dim()))
        .transpose()
}

/// Apply `plain` to every column, or `by_class` to every (column, sizes) pair.
fn per_column<P, C>(
    mat: ArrayView2<'_, f64>,
    class_size: Option<Operand<'_>>,
    plain: P,
    by_class: C,
) -> GeoResult<Array1<f64>>
where
    P: Fn(ArrayView1<'_, f64>) -> f64,
    C: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64,
{
    let values = match class_sizes(mat, class_size)? {
        None => mat.columns().into_iter().map(plain).collect(),
        Some(sizes) => mat
            .columns()
            .into_iter()
            .zip(sizes.columns())
            .map(|(x, s)| by_class(x, s))
            .collect(),
    };
    Ok(values)
}
