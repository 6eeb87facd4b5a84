//! Configured entry point tying the engines together.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::Serialize;

use crate::complexity::{eci, pci};
use crate::config::AnalysisConfig;
use crate::density::rel_density_regions;
use crate::error::GeoResult;
use crate::logging::log_index;
use crate::matrix::binarize;
use crate::relatedness::relatedness;

/// Every product-space view of one matrix.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSpace {
    /// Item × item relatedness.
    pub relatedness: Array2<f64>,
    /// One complexity value per item.
    pub pci: Array1<f64>,
    /// One complexity value per region.
    pub eci: Array1<f64>,
    /// Item × region relatedness density.
    pub density: Array2<f64>,
}

/// Runs relatedness, complexity and density with the methods chosen in an
/// [`AnalysisConfig`], logging each index when an index log is configured.
#[derive(Debug, Clone, Default)]
pub struct ComplexityAnalyzer {
    config: AnalysisConfig,
}

impl ComplexityAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn relatedness(&self, mat: ArrayView2<'_, f64>) -> GeoResult<Array2<f64>> {
        let settings = &self.config.relatedness;
        relatedness(mat, settings.input_type, settings.method, None)
    }

    pub fn pci(&self, mat: ArrayView2<'_, f64>) -> GeoResult<Array1<f64>> {
        let settings = &self.config.complexity;
        let values = pci(mat, settings.input_type, settings.method, settings.steps_for_method())?;
        self.record("pci", values.view());
        Ok(values)
    }

    pub fn eci(&self, mat: ArrayView2<'_, f64>) -> GeoResult<Array1<f64>> {
        let settings = &self.config.complexity;
        let values = eci(mat, settings.input_type, settings.method, settings.steps_for_method())?;
        self.record("eci", values.view());
        Ok(values)
    }

    /// Relatedness, both complexity indices and the density of every item
    /// for every region.
    pub fn product_space(&self, mat: ArrayView2<'_, f64>) -> GeoResult<ProductSpace> {
        let related = self.relatedness(mat)?;
        let rca = self.config.relatedness.input_type.resolve(mat)?;
        let has_rca = binarize(rca.view());
        let density = rel_density_regions(related.view(), has_rca.view())?;

        tracing::debug!(
            items = mat.nrows(),
            regions = mat.ncols(),
            method = %self.config.relatedness.method,
            "product space built"
        );

        Ok(ProductSpace {
            pci: self.pci(mat)?,
            eci: self.eci(mat)?,
            relatedness: related,
            density,
        })
    }

    fn record(&self, index: &str, values: ArrayView1<'_, f64>) {
        let Some(path) = &self.config.logging.index_log else {
            return;
        };
        let method = self.config.complexity.method.as_str();
        if let Err(err) = log_index(path, index, method, values) {
            tracing::warn!(path = %path.display(), error = %err, "failed to log {}", index);
        }
    }
}
