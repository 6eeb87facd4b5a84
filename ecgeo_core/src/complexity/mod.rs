//! Product and economic complexity indices (PCI / ECI).
//!
//! Both indices come from the binarized advantage matrix. The item axis gives
//! PCI; the same computation on the transposed matrix gives ECI, so
//! `eci(mat) == pci(matᵀ)` holds exactly for every method.
//!
//! Two methods are available:
//! - [`ComplexityMethod::Reflection`] - Hidalgo–Hausmann method of reflections,
//!   a fixed number of diversity/ubiquity averaging steps (at most
//!   [`MAX_REFLECTION_STEPS`])
//! - [`ComplexityMethod::Eigenvector`] - eigenvector of the second-largest
//!   eigenvalue of the item-to-item transition matrix
//!
//! Results are rescaled into `[0, 100]` with [`rescale`].

pub mod calibrate;
pub mod eigen;
pub mod reflection;

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::rca::InputType;

pub use calibrate::{ci_calibrate, ci_calibrate_columns};
pub use eigen::{eci_eig, pci_eig};
pub use reflection::{eci_reflex, pci_reflex, MAX_REFLECTION_STEPS};

/// Algorithm used to compute complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityMethod {
    Eigenvector,
    Reflection,
}

impl ComplexityMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityMethod::Eigenvector => "Eigenvector",
            ComplexityMethod::Reflection => "Reflection",
        }
    }
}

impl fmt::Display for ComplexityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComplexityMethod {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Eigenvector" => Ok(ComplexityMethod::Eigenvector),
            "Reflection" => Ok(ComplexityMethod::Reflection),
            _ => Err(GeoError::invalid_argument(
                "method",
                s,
                "one of 'Eigenvector', 'Reflection'",
            )),
        }
    }
}

/// Product complexity index, one value per item (row).
///
/// # Arguments
///
/// * `mat` - Exports or RCA values, items (rows) by regions (columns)
/// * `input_type` - Whether `mat` still needs the RCA transform
/// * `method` - Eigenvector or Reflection
/// * `steps` - Number of reflections; required for Reflection, ignored (with
///   a warning) for Eigenvector, clamped to [`MAX_REFLECTION_STEPS`]
///
/// # Errors
///
/// Missing `steps` for Reflection, or no entry with RCA ≥ 1 anywhere.
///
/// # Examples
///
/// ```
/// use ecgeo_core::complexity::{pci, ComplexityMethod};
/// use ecgeo_core::rca::InputType;
/// use ndarray::arr2;
///
/// let exports = arr2(&[
///     [100.0, 300.0, 500.0, 800.0],
///     [100.0, 200.0, 100.0, 3000.0],
///     [100.0, 100.0, 100.0, 300.0],
/// ]);
/// let values = pci(exports.view(), InputType::Export, ComplexityMethod::Reflection, Some(2))
///     .unwrap();
/// assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
/// ```
pub fn pci(
    mat: ArrayView2<'_, f64>,
    input_type: InputType,
    method: ComplexityMethod,
    steps: Option<usize>,
) -> GeoResult<Array1<f64>> {
    match method {
        ComplexityMethod::Eigenvector => {
            if let Some(steps) = steps {
                tracing::warn!(steps, "'steps' is ignored by the Eigenvector method");
            }
            let rca = input_type.resolve(mat)?;
            pci_eig(rca.view())
        }
        ComplexityMethod::Reflection => {
            let steps = steps.ok_or_else(|| {
                GeoError::invalid_argument(
                    "steps",
                    "None",
                    "a step count when using the Reflection method",
                )
            })?;
            let rca = input_type.resolve(mat)?;
            pci_reflex(rca.view(), steps)
        }
    }
}

/// Economic complexity index, one value per region (column).
///
/// Defined as [`pci`] of the transposed matrix.
pub fn eci(
    mat: ArrayView2<'_, f64>,
    input_type: InputType,
    method: ComplexityMethod,
    steps: Option<usize>,
) -> GeoResult<Array1<f64>> {
    pci(mat.t(), input_type, method, steps)
}

/// Min-max rescale into `[0, 100]` over finite entries only.
///
/// Non-finite entries come out as NaN. When every finite entry is equal they
/// all map to 0.
pub fn rescale(values: ArrayView1<'_, f64>) -> Array1<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    values.mapv(|v| {
        if !v.is_finite() {
            f64::NAN
        } else if range > 0.0 {
            (v - min) / range * 100.0
        } else {
            0.0
        }
    })
}

/// Fail when no item/region pair holds advantage: complexity is undefined.
pub(crate) fn ensure_advantage(has_rca: &Array2<f64>, context: &str) -> GeoResult<()> {
    if has_rca.iter().any(|&v| v == 1.0) {
        Ok(())
    } else {
        Err(GeoError::degenerate(
            context,
            "no element has RCA >= 1.0, complexity is undefined",
        ))
    }
}
