//! Deterministic summation for reductions over matrix lanes.
//!
//! Values are combined in a fixed pairwise tree with Neumaier compensation, so
//! a given slice always reduces to the same bits regardless of how the caller
//! iterates over the surrounding matrix.

#[derive(Clone, Copy, Debug)]
struct AccumNode {
    sum: f64,
    compensation: f64,
}

impl AccumNode {
    fn from_value(value: f64) -> Self {
        Self {
            sum: value,
            compensation: 0.0,
        }
    }

    fn combine(self, other: Self) -> Self {
        let a = self.sum;
        let b = other.sum;
        let t = a + b;
        if !t.is_finite() {
            // Inf and NaN propagate as-is; compensation terms would turn inf into NaN.
            return Self {
                sum: t,
                compensation: 0.0,
            };
        }

        let residual = if a.abs() >= b.abs() {
            (a - t) + b
        } else {
            (b - t) + a
        };

        Self {
            sum: t,
            compensation: self.compensation + other.compensation + residual,
        }
    }

    fn finalize(self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}

fn reduce_nodes(mut nodes: Vec<AccumNode>) -> AccumNode {
    debug_assert!(!nodes.is_empty());
    while nodes.len() > 1 {
        let mut next = Vec::with_capacity((nodes.len() + 1) / 2);
        let mut idx = 0;
        while idx < nodes.len() {
            if idx + 1 < nodes.len() {
                next.push(nodes[idx].combine(nodes[idx + 1]));
                idx += 2;
            } else {
                next.push(nodes[idx]);
                idx += 1;
            }
        }
        nodes = next;
    }
    nodes[0]
}

/// Sum a slice with a fixed pairwise, compensated reduction order.
///
/// Returns `0.0` for an empty slice. NaN and infinities propagate.
pub fn deterministic_sum(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let nodes = values.iter().map(|&v| AccumNode::from_value(v)).collect();
    reduce_nodes(nodes).finalize()
}

/// Sum any iterator of values with the same reduction as [`deterministic_sum`].
pub fn deterministic_sum_iter<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let nodes: Vec<AccumNode> = values.into_iter().map(AccumNode::from_value).collect();
    if nodes.is_empty() {
        return 0.0;
    }
    reduce_nodes(nodes).finalize()
}

/// Arithmetic mean using the deterministic sum. Empty input yields NaN.
pub fn deterministic_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    deterministic_sum(values) / values.len() as f64
}
