//! Gini coefficient.

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::per_column;
use crate::error::GeoResult;
use crate::matrix::{deterministic_sum_iter, Operand};

/// Gini coefficient of every column.
///
/// Without class sizes each entry is one individual:
/// `G = 2·Σ x·rank / (n·Σx) − (n+1)/n` with ranks `1..=n` in ascending order.
/// With class sizes the Lorenz curve is built from population shares.
///
/// # Examples
///
/// ```
/// use ecgeo_core::inequality::gini;
/// use ndarray::arr2;
///
/// let incomes = arr2(&[[0.0], [0.0], [0.0], [1.0]]);
/// let g = gini(incomes.view(), None).unwrap();
/// assert_eq!(g[0], 0.75);
/// ```
pub fn gini(mat: ArrayView2<'_, f64>, class_size: Option<Operand<'_>>) -> GeoResult<Array1<f64>> {
    per_column(mat, class_size, gini_column, gini_by_class_column)
}

/// Indices sorting `values` ascending; ties keep their original order.
fn ascending_order(values: ArrayView1<'_, f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order
}

fn gini_column(values: ArrayView1<'_, f64>) -> f64 {
    let n = values.len() as f64;
    let ranked = ascending_order(values)
        .into_iter()
        .enumerate()
        .map(|(rank, i)| values[i] * (rank + 1) as f64);
    let weighted = deterministic_sum_iter(ranked);
    let total = deterministic_sum_iter(values.iter().copied());
    2.0 * weighted / (n * total) - (n + 1.0) / n
}

fn gini_by_class_column(values: ArrayView1<'_, f64>, sizes: ArrayView1<'_, f64>) -> f64 {
    let order = ascending_order(values);
    let population = deterministic_sum_iter(sizes.iter().copied());

    let mut lorenz = 0.0;
    let mut previous = 0.0;
    let mut area = Vec::with_capacity(order.len());
    for &i in &order {
        let share = sizes[i] / population;
        lorenz += values[i] * share;
        area.push(share * (previous + lorenz));
        previous = lorenz;
    }

    1.0 - deterministic_sum_iter(area) / lorenz
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn equal_incomes_have_zero_gini() {
        let mat = arr2(&[[3.0, 1.0], [3.0, 1.0], [3.0, 1.0]]);
        let g = gini(mat.view(), None).unwrap();
        assert!(g.iter().all(|v| v.abs() < 1e-15));
    }

    #[test]
    fn unit_classes_match_individuals() {
        let mat = arr2(&[[0.0], [1.0], [0.0], [0.0]]);
        let ones = arr1(&[1.0, 1.0, 1.0, 1.0]);
        let plain = gini(mat.view(), None).unwrap();
        let by_class = gini(mat.view(), Some(ones.view().into())).unwrap();
        assert_eq!(plain[0], 0.75);
        assert_eq!(by_class[0], 0.75);
    }

    #[test]
    fn class_sizes_shift_the_curve() {
        // Nine people earning 1 and one earning 91.
        let mat = arr2(&[[1.0], [91.0]]);
        let sizes = arr1(&[9.0, 1.0]);
        let g = gini(mat.view(), Some(sizes.view().into())).unwrap();
        // Cumulative income per head: 0.9 after the poor class, 10 in total.
        let expected = 1.0 - (0.9 * 0.9 + 0.1 * (0.9 + 10.0)) / 10.0;
        assert!((g[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn ties_do_not_change_the_result() {
        let a = arr2(&[[2.0], [1.0], [2.0], [5.0]]);
        let b = arr2(&[[5.0], [2.0], [1.0], [2.0]]);
        let ga = gini(a.view(), None).unwrap();
        let gb = gini(b.view(), None).unwrap();
        assert!((ga[0] - gb[0]).abs() < 1e-15);
    }
}
