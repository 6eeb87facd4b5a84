//! # EcGeo Core
//!
//! Economic-geography analytics over export matrices laid out as items
//! (products, tasks, industries) by regions. Everything is a pure, deterministic
//! transformation of dense `ndarray` matrices.
//!
//! ## Quick Start
//!
//! ```rust
//! use ecgeo_core::{pci, relatedness, ComplexityMethod, InputType, RelatednessMethod};
//! use ndarray::arr2;
//!
//! let exports = arr2(&[
//!     [100.0, 300.0, 500.0, 800.0],
//!     [100.0, 200.0, 100.0, 3000.0],
//!     [100.0, 100.0, 100.0, 300.0],
//! ]);
//!
//! let related = relatedness(exports.view(), InputType::Export, RelatednessMethod::Symmetric, None)
//!     .unwrap();
//! let complexity = pci(exports.view(), InputType::Export, ComplexityMethod::Reflection, Some(18))
//!     .unwrap();
//!
//! assert_eq!(related.dim(), (3, 3));
//! assert_eq!(complexity.len(), 3);
//! ```
//!
//! ## Core Modules
//!
//! - [`rca`] - Revealed comparative advantage
//! - [`relatedness`] - Co-occurrence relatedness under six normalizations
//! - [`complexity`] - PCI / ECI by reflections or eigenvectors, plus calibration
//! - [`density`] - Relatedness density with optional redundant items
//! - [`prody`], [`entropy`], [`inequality`] - Sophistication, diversity and
//!   inequality measures
//! - [`config`] - Analysis configuration via TOML
//! - [`logging`] - JSON line-delimited index logging
//! - [`analyzer`] - Configured facade over the engines

pub mod analyzer;
pub mod complexity;
pub mod config;
pub mod density;
pub mod entropy;
pub mod error;
pub mod inequality;
pub mod logging;
pub mod matrix;
pub mod prody;
pub mod rca;
pub mod relatedness;

pub use analyzer::{ComplexityAnalyzer, ProductSpace};
pub use complexity::{
    ci_calibrate, ci_calibrate_columns, eci, eci_eig, eci_reflex, pci, pci_eig, pci_reflex,
    rescale, ComplexityMethod, MAX_REFLECTION_STEPS,
};
pub use config::{AnalysisConfig, ComplexityConfig, ConfigError, LoggingConfig, RelatednessConfig};
pub use density::{compl_rel_density, compl_rel_density_regions, rel_density, rel_density_regions};
pub use entropy::{entropy, kl, LogBase};
pub use error::{GeoError, GeoResult};
pub use inequality::{gini, herfindahl, robin_hood, theil, TheilMethod};
pub use logging::{log_index, IndexLogEntry};
pub use matrix::{as_matrix, indicator, Operand};
pub use prody::{expy, prody};
pub use rca::{is_rca, is_rca_bool, rca, InputType};
pub use relatedness::{
    association_strength_normalization, co_occurrence, cosine_normalization,
    jaccard_normalization, rel_asymmetric, rel_symmetric, relatedness, steijn_normalization,
    RelatednessMethod,
};
