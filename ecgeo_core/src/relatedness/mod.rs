//! Relatedness between items from co-occurring comparative advantage.
//!
//! Two items are related when the same regions tend to hold advantage in
//! both (Hidalgo et al., 2007, "The Product Space"). The engine binarizes RCA,
//! counts (optionally region-weighted) co-occurrences and normalizes them
//! under one of six schemes:
//!
//! - [`RelatednessMethod::Symmetric`] - `min(phi(i→j), phi(j→i))`
//! - [`RelatednessMethod::Asymmetric`] - conditional probability `phi(i→j)`
//! - [`RelatednessMethod::Jaccard`], [`RelatednessMethod::Cosine`],
//!   [`RelatednessMethod::Association`], [`RelatednessMethod::Steijn`] -
//!   normalizations of the raw co-occurrence count matrix
//!
//! Every output has a zero diagonal.

pub mod normalization;

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::matrix::{binarize, resolve_weight};
use crate::rca::InputType;

pub use normalization::{
    association_strength_normalization, cosine_normalization, jaccard_normalization,
    steijn_normalization,
};

/// Normalization scheme for the relatedness matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelatednessMethod {
    Symmetric,
    Asymmetric,
    Cosine,
    Association,
    Jaccard,
    Steijn,
}

impl RelatednessMethod {
    pub const ALL: [RelatednessMethod; 6] = [
        RelatednessMethod::Symmetric,
        RelatednessMethod::Asymmetric,
        RelatednessMethod::Cosine,
        RelatednessMethod::Association,
        RelatednessMethod::Jaccard,
        RelatednessMethod::Steijn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelatednessMethod::Symmetric => "Symmetric",
            RelatednessMethod::Asymmetric => "Asymmetric",
            RelatednessMethod::Cosine => "Cosine",
            RelatednessMethod::Association => "Association",
            RelatednessMethod::Jaccard => "Jaccard",
            RelatednessMethod::Steijn => "Steijn",
        }
    }
}

impl fmt::Display for RelatednessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelatednessMethod {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelatednessMethod::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| {
                GeoError::invalid_argument(
                    "method",
                    s,
                    "one of 'Symmetric', 'Asymmetric', 'Cosine', 'Association', 'Jaccard', 'Steijn'",
                )
            })
    }
}

/// Build the item-by-item relatedness matrix.
///
/// # Arguments
///
/// * `mat` - Exports or RCA values, items (rows) by regions (columns)
/// * `input_type` - Whether `mat` still needs the RCA transform
/// * `method` - Normalization scheme
/// * `weight` - Optional strictly positive weight per region
///
/// # Examples
///
/// ```
/// use ecgeo_core::rca::InputType;
/// use ecgeo_core::relatedness::{relatedness, RelatednessMethod};
/// use ndarray::arr2;
///
/// let exports = arr2(&[
///     [100.0, 300.0, 500.0, 800.0],
///     [100.0, 200.0, 100.0, 3000.0],
///     [100.0, 100.0, 100.0, 300.0],
/// ]);
/// let phi = relatedness(exports.view(), InputType::Export, RelatednessMethod::Symmetric, None)
///     .unwrap();
/// assert_eq!(phi.dim(), (3, 3));
/// assert_eq!(phi[[0, 0]], 0.0);
/// ```
pub fn relatedness(
    mat: ArrayView2<'_, f64>,
    input_type: InputType,
    method: RelatednessMethod,
    weight: Option<ArrayView1<'_, f64>>,
) -> GeoResult<Array2<f64>> {
    let weight = resolve_weight(weight, mat.ncols())?;
    let rca = input_type.resolve(mat)?;
    let has_rca = binarize(rca.view());

    tracing::debug!(
        items = has_rca.nrows(),
        regions = has_rca.ncols(),
        %method,
        %input_type,
        "computing relatedness"
    );

    let counts = || weighted_co_occurrence(has_rca.view(), weight.view());
    let result = match method {
        RelatednessMethod::Asymmetric => conditional_probability(has_rca.view(), weight.view()),
        RelatednessMethod::Symmetric => {
            let phi = conditional_probability(has_rca.view(), weight.view());
            symmetric_minimum(phi.view())
        }
        RelatednessMethod::Jaccard => jaccard_normalization(counts().view())?,
        RelatednessMethod::Cosine => cosine_normalization(counts().view())?,
        RelatednessMethod::Association => association_strength_normalization(counts().view())?,
        RelatednessMethod::Steijn => steijn_normalization(counts().view())?,
    };

    Ok(result)
}

/// Hidalgo's asymmetric relatedness `phi(i→j) = P(RCA in i and j) / P(RCA in i)`.
///
/// `rca` may hold RCA values or a 0/1 advantage matrix. Items with advantage
/// nowhere get an all-zero row.
pub fn rel_asymmetric(
    rca: ArrayView2<'_, f64>,
    weight: Option<ArrayView1<'_, f64>>,
) -> GeoResult<Array2<f64>> {
    let weight = resolve_weight(weight, rca.ncols())?;
    let has_rca = binarize(rca);
    Ok(conditional_probability(has_rca.view(), weight.view()))
}

/// Hidalgo's symmetric relatedness `phi(i,j) = min(phi(i→j), phi(j→i))`.
pub fn rel_symmetric(
    rca: ArrayView2<'_, f64>,
    weight: Option<ArrayView1<'_, f64>>,
) -> GeoResult<Array2<f64>> {
    let phi = rel_asymmetric(rca, weight)?;
    Ok(symmetric_minimum(phi.view()))
}

/// Weighted co-occurrence counts of advantage, zero on the diagonal.
///
/// Entry `(i, j)` is `Σ_r w_r · hasRCA[i,r] · hasRCA[j,r]`.
pub fn co_occurrence(
    rca: ArrayView2<'_, f64>,
    weight: Option<ArrayView1<'_, f64>>,
) -> GeoResult<Array2<f64>> {
    let weight = resolve_weight(weight, rca.ncols())?;
    let has_rca = binarize(rca);
    Ok(weighted_co_occurrence(has_rca.view(), weight.view()))
}

/// Co-occurrence over a validated 0/1 matrix, as `(h·w) hᵀ`. The lower
/// triangle is copied from the upper one so the result is exactly symmetric.
pub(crate) fn weighted_co_occurrence(
    has_rca: ArrayView2<'_, f64>,
    weight: ArrayView1<'_, f64>,
) -> Array2<f64> {
    let weighted = &has_rca * &weight;
    let mut counts = weighted.dot(&has_rca.t());
    mirror_upper(&mut counts);
    counts.diag_mut().fill(0.0);
    counts
}

fn mirror_upper(mat: &mut Array2<f64>) {
    let n = mat.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            mat[[j, i]] = mat[[i, j]];
        }
    }
}

fn conditional_probability(has_rca: ArrayView2<'_, f64>, weight: ArrayView1<'_, f64>) -> Array2<f64> {
    let counts = weighted_co_occurrence(has_rca, weight);
    let presence = has_rca.dot(&weight);

    let mut phi = counts;
    for (mut row, &denominator) in phi.axis_iter_mut(Axis(0)).zip(presence.iter()) {
        if denominator == 0.0 {
            row.fill(0.0);
        } else {
            row.mapv_inplace(|count| count / denominator);
        }
    }
    phi.diag_mut().fill(0.0);
    phi
}

fn symmetric_minimum(phi: ArrayView2<'_, f64>) -> Array2<f64> {
    Array2::from_shape_fn(phi.dim(), |(i, j)| phi[[i, j]].min(phi[[j, i]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array1};

    fn advantage() -> Array2<f64> {
        // items x regions, already binary
        arr2(&[
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [1.0, 1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ])
    }

    #[test]
    fn co_occurrence_counts_shared_regions() {
        let counts = co_occurrence(advantage().view(), None).unwrap();
        assert_eq!(counts[[0, 1]], 1.0);
        assert_eq!(counts[[0, 2]], 2.0);
        assert_eq!(counts[[1, 2]], 2.0);
        assert_eq!(counts[[3, 0]], 0.0);
        assert!(counts.diag().iter().all(|&v| v == 0.0));
        assert_eq!(counts, counts.t());
    }

    #[test]
    fn weighted_co_occurrence_scales_by_region() {
        let weight = ndarray::arr1(&[2.0, 0.5, 1.0, 3.0]);
        let counts = co_occurrence(advantage().view(), Some(weight.view())).unwrap();
        assert_eq!(counts[[0, 2]], 2.5);
        assert_eq!(counts[[1, 2]], 3.0);
    }

    #[test]
    fn co_occurrence_matches_pairwise_count() {
        let has_rca = Array2::from_shape_fn((40, 23), |(i, r)| {
            if (i * 7 + r * 3) % 5 < 2 {
                1.0
            } else {
                0.0
            }
        });
        let weight = Array1::from_shape_fn(23, |r| 0.5 + r as f64 * 0.25);
        let counts = co_occurrence(has_rca.view(), Some(weight.view())).unwrap();

        assert_eq!(counts, counts.t());
        for i in 0..40 {
            for j in 0..40 {
                let expected: f64 = if i == j {
                    0.0
                } else {
                    (0..23)
                        .map(|r| weight[r] * has_rca[[i, r]] * has_rca[[j, r]])
                        .sum()
                };
                assert!((counts[[i, j]] - expected).abs() < 1e-12, "cell ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn asymmetric_is_conditional_probability() {
        let phi = rel_asymmetric(advantage().view(), None).unwrap();
        // item 0 present in 2 regions, shares 1 with item 1
        assert_eq!(phi[[0, 1]], 0.5);
        // item 2 present in 3 regions, shares 2 with item 0
        assert!((phi[[2, 0]] - 2.0 / 3.0).abs() < 1e-15);
        assert_eq!(phi[[0, 2]], 1.0);
        // item 3 has no advantage anywhere
        assert!(phi.row(3).iter().all(|&v| v == 0.0));
        assert!(phi.diag().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn symmetric_takes_minimum() {
        let phi = rel_symmetric(advantage().view(), None).unwrap();
        assert!((phi[[0, 2]] - 2.0 / 3.0).abs() < 1e-15);
        assert_eq!(phi, phi.t());
    }

    #[test]
    fn relatedness_from_rca_input() {
        let rca = advantage().mapv(|v| v * 1.7);
        let phi = relatedness(rca.view(), InputType::Rca, RelatednessMethod::Asymmetric, None)
            .unwrap();
        assert_eq!(phi, rel_asymmetric(advantage().view(), None).unwrap());
    }

    #[test]
    fn relatedness_rejects_bad_weight() {
        let weight = ndarray::arr1(&[1.0, 1.0, -1.0, 1.0]);
        let err = relatedness(
            advantage().view(),
            InputType::Rca,
            RelatednessMethod::Cosine,
            Some(weight.view()),
        )
        .unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument { .. }));

        let short = ndarray::arr1(&[1.0, 1.0]);
        let err = relatedness(
            advantage().view(),
            InputType::Rca,
            RelatednessMethod::Cosine,
            Some(short.view()),
        )
        .unwrap_err();
        assert!(matches!(err, GeoError::InvalidShape { .. }));
    }

    #[test]
    fn every_method_has_zero_diagonal() {
        for method in RelatednessMethod::ALL {
            let phi = relatedness(advantage().view(), InputType::Rca, method, None).unwrap();
            assert!(
                phi.diag().iter().all(|&v| v == 0.0),
                "{} left a non-zero diagonal",
                method
            );
            assert!(phi.iter().all(|v| v.is_finite()), "{} produced non-finite values", method);
        }
    }

    #[test]
    fn method_tokens_round_trip() {
        for method in RelatednessMethod::ALL {
            assert_eq!(method.as_str().parse::<RelatednessMethod>().unwrap(), method);
        }
        let err = "Pearson".parse::<RelatednessMethod>().unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument { .. }));
    }
}
