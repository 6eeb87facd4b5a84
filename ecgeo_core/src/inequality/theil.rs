//! Theil indices (GE(0), GE(1) and their midpoint).

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::per_column;
use crate::entropy::LogBase;
use crate::error::{GeoError, GeoResult};
use crate::matrix::{deterministic_sum_iter, Operand};

/// Which member of the Theil family to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TheilMethod {
    /// Mean log deviation, headcount weighted.
    #[default]
    L,
    /// Income-share weighted.
    T,
    /// Average of L and T.
    S,
}

impl TheilMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TheilMethod::L => "L",
            TheilMethod::T => "T",
            TheilMethod::S => "S",
        }
    }
}

impl fmt::Display for TheilMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TheilMethod {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(TheilMethod::L),
            "T" => Ok(TheilMethod::T),
            "S" => Ok(TheilMethod::S),
            _ => Err(GeoError::invalid_argument("method", s, "one of 'L', 'T', 'S'")),
        }
    }
}

/// Theil index of every column.
///
/// Only positive values take part (negative values count as zero). A column
/// with no positive value, or no positive value in a non-empty class, is NaN.
pub fn theil(
    mat: ArrayView2<'_, f64>,
    class_size: Option<Operand<'_>>,
    method: TheilMethod,
    base: LogBase,
) -> GeoResult<Array1<f64>> {
    per_column(
        mat,
        class_size,
        |x| {
            let positive: Vec<f64> = x.iter().copied().filter(|&v| v > 0.0).collect();
            let weight = 1.0 / positive.len() as f64;
            let pairs: Vec<(f64, f64)> = positive.into_iter().map(|v| (v, weight)).collect();
            weighted_theil(&pairs, method, base)
        },
        |x, s| {
            let included: Vec<(f64, f64)> = included_pairs(x, s);
            let population = deterministic_sum_iter(included.iter().map(|&(_, size)| size));
            let pairs: Vec<(f64, f64)> = included
                .into_iter()
                .map(|(v, size)| (v, size / population))
                .collect();
            weighted_theil(&pairs, method, base)
        },
    )
}

fn included_pairs(values: ArrayView1<'_, f64>, sizes: ArrayView1<'_, f64>) -> Vec<(f64, f64)> {
    values
        .iter()
        .zip(sizes.iter())
        .filter(|(v, s)| **v > 0.0 && **s > 0.0)
        .map(|(&v, &s)| (v, s))
        .collect()
}

/// Theil index of `(value, population share)` pairs whose shares sum to one.
fn weighted_theil(pairs: &[(f64, f64)], method: TheilMethod, base: LogBase) -> f64 {
    if pairs.is_empty() {
        return f64::NAN;
    }
    let mean = deterministic_sum_iter(pairs.iter().map(|&(v, w)| v * w));

    let l = || deterministic_sum_iter(pairs.iter().map(|&(v, w)| w * base.log(mean / v)));
    let t = || {
        deterministic_sum_iter(pairs.iter().map(|&(v, w)| {
            let ratio = v / mean;
            w * ratio * base.log(ratio)
        }))
    };

    match method {
        TheilMethod::L => l(),
        TheilMethod::T => t(),
        TheilMethod::S => (l() + t()) / 2.0,
    }
}
