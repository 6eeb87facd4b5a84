//! Method of reflections.
//!
//! Starting from diversity `d0` (advantage count per region) and ubiquity
//! `u0` (advantage count per item), each step replaces both vectors at once:
//!
//! ```text
//! d'[r] = Σ_i h[i,r]·u[i] / d0[r]
//! u'[i] = Σ_r h[i,r]·d[r] / u0[i]
//! ```
//!
//! A 0/0 division (an item or region with no advantage at all) yields 0.

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{ensure_advantage, rescale};
use crate::error::GeoResult;
use crate::matrix::{binarize, col_sums, deterministic_sum_iter, row_sums};

/// Upper bound on reflection steps; larger requests are clamped.
pub const MAX_REFLECTION_STEPS: usize = 25;

/// PCI by the method of reflections on an RCA matrix (items × regions).
///
/// `steps` above [`MAX_REFLECTION_STEPS`] is clamped with a warning.
/// `steps == 0` returns the rescaled ubiquity.
pub fn pci_reflex(rca: ArrayView2<'_, f64>, steps: usize) -> GeoResult<Array1<f64>> {
    let steps = clamp_steps(steps);

    let has_rca = binarize(rca);
    ensure_advantage(&has_rca, "pci_reflex")?;

    let diversity = col_sums(has_rca.view());
    let ubiquity = row_sums(has_rca.view());

    let mut d = diversity.clone();
    let mut u = ubiquity.clone();
    for _ in 0..steps {
        let next_d: Array1<f64> = has_rca
            .columns()
            .into_iter()
            .zip(diversity.iter())
            .map(|(lane, &d0)| guarded_ratio(weighted_lane_sum(lane, u.view()), d0))
            .collect();
        let next_u: Array1<f64> = has_rca
            .rows()
            .into_iter()
            .zip(ubiquity.iter())
            .map(|(lane, &u0)| guarded_ratio(weighted_lane_sum(lane, d.view()), u0))
            .collect();
        d = next_d;
        u = next_u;
    }

    tracing::debug!(steps, items = u.len(), "reflection finished");
    Ok(rescale(u.view()))
}

/// ECI by the method of reflections; PCI of the transposed matrix.
pub fn eci_reflex(rca: ArrayView2<'_, f64>, steps: usize) -> GeoResult<Array1<f64>> {
    pci_reflex(rca.t(), steps)
}

fn clamp_steps(steps: usize) -> usize {
    if steps > MAX_REFLECTION_STEPS {
        tracing::warn!(
            requested = steps,
            max = MAX_REFLECTION_STEPS,
            "reflection steps clamped"
        );
        MAX_REFLECTION_STEPS
    } else {
        steps
    }
}

fn weighted_lane_sum(lane: ArrayView1<'_, f64>, values: ArrayView1<'_, f64>) -> f64 {
    deterministic_sum_iter(lane.iter().zip(values.iter()).map(|(&h, &v)| h * v))
}

fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    let ratio = numerator / denominator;
    if ratio.is_nan() {
        0.0
    } else {
        ratio
    }
}
