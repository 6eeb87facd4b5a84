//! Shannon entropy and Kullback–Leibler divergence of regional distributions.
//!
//! Each column of the input is one distribution over items. Negative entries
//! count as zero and a column with no mass has all shares at zero.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::matrix::{clamp_non_negative, col_sums, deterministic_sum_iter, Operand};

/// Logarithm base for entropy-like measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogBase {
    #[default]
    #[serde(rename = "e")]
    E,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "10")]
    Ten,
}

impl LogBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogBase::E => "e",
            LogBase::Two => "2",
            LogBase::Ten => "10",
        }
    }

    pub fn log(&self, x: f64) -> f64 {
        match self {
            LogBase::E => x.ln(),
            LogBase::Two => x.log2(),
            LogBase::Ten => x.log10(),
        }
    }
}

impl fmt::Display for LogBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogBase {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e" => Ok(LogBase::E),
            "2" => Ok(LogBase::Two),
            "10" => Ok(LogBase::Ten),
            _ => Err(GeoError::invalid_argument("base", s, "one of 'e', '2', '10'")),
        }
    }
}

/// Column shares `x / Σx` of the clamped matrix.
pub(crate) fn column_shares(mat: ArrayView2<'_, f64>) -> Array2<f64> {
    let clamped = clamp_non_negative(mat);
    let totals = col_sums(clamped.view());
    let mut shares = clamped;
    for (mut column, &total) in shares.columns_mut().into_iter().zip(totals.iter()) {
        if total > 0.0 {
            column.mapv_inplace(|x| x / total);
        } else {
            column.fill(0.0);
        }
    }
    shares
}

/// Entropy of every column.
///
/// Without `class_size`: `H = −Σ p·log p`. With class sizes `s` (shared per
/// item or per cell): `H = −Σ s·(p/s)·log(p/s)`, skipping cells where `p` or
/// `s` is zero.
///
/// The result is non-negative. Tools that report `Σ p·log p` without the
/// leading minus give the same magnitude with the opposite sign.
pub fn entropy(
    mat: ArrayView2<'_, f64>,
    class_size: Option<Operand<'_>>,
    base: LogBase,
) -> GeoResult<Array1<f64>> {
    let shares = column_shares(mat);
    let sizes = match class_size {
        Some(operand) => Some(operand.broadcast("class_size", mat.dim())?),
        None => None,
    };

    let mut terms = Array2::zeros(shares.dim());
    match &sizes {
        None => {
            Zip::from(&mut terms).and(&shares).for_each(|t, &p| {
                if p > 0.0 {
                    *t = p * base.log(p);
                }
            });
        }
        Some(sizes) => {
            Zip::from(&mut terms)
                .and(&shares)
                .and(sizes)
                .for_each(|t, &p, &s| {
                    if p > 0.0 && s != 0.0 {
                        let density = p / s;
                        *t = s * density * base.log(density);
                    }
                });
        }
    }

    Ok(terms
        .columns()
        .into_iter()
        .map(|column| -deterministic_sum_iter(column.iter().copied()))
        .collect())
}

/// Kullback–Leibler divergence `D(p ‖ q)` of every column from `reference`.
///
/// Only cells where both `p` and `q` are positive contribute.
pub fn kl(
    mat: ArrayView2<'_, f64>,
    reference: Operand<'_>,
    base: LogBase,
) -> GeoResult<Array1<f64>> {
    let reference = reference.broadcast("reference", mat.dim())?;
    let p = column_shares(mat);
    let q = column_shares(reference.view());

    let mut terms = Array2::zeros(p.dim());
    Zip::from(&mut terms).and(&p).and(&q).for_each(|t, &p, &q| {
        if p > 0.0 && q > 0.0 {
            *t = p * base.log(p / q);
        }
    });

    Ok(terms
        .columns()
        .into_iter()
        .map(|column| deterministic_sum_iter(column.iter().copied()))
        .collect())
}
