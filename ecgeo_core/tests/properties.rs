use ecgeo_core::{
    co_occurrence, eci, entropy, gini, herfindahl, pci, rel_density_regions, relatedness,
    ComplexityMethod, InputType, LogBase, RelatednessMethod,
};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_exports(seed: u64, items: usize, regions: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((items, regions), |_| {
        if rng.gen_bool(0.2) {
            0.0
        } else {
            rng.gen_range(1.0..1000.0)
        }
    })
}

#[test]
fn symmetric_methods_are_exactly_symmetric() {
    for seed in 0..8 {
        let exports = random_exports(seed, 12, 9);
        for method in [
            RelatednessMethod::Symmetric,
            RelatednessMethod::Cosine,
            RelatednessMethod::Jaccard,
            RelatednessMethod::Association,
        ] {
            let phi = relatedness(exports.view(), InputType::Export, method, None).unwrap();
            assert_eq!(phi, phi.t(), "{} is not symmetric for seed {}", method, seed);
        }
    }
}

#[test]
fn every_method_has_zero_diagonal() {
    let exports = random_exports(42, 15, 10);
    let weight = ndarray::Array1::from_shape_fn(10, |r| 1.0 + r as f64);
    for method in RelatednessMethod::ALL {
        let phi = relatedness(exports.view(), InputType::Export, method, Some(weight.view()))
            .unwrap();
        assert!(phi.diag().iter().all(|&v| v == 0.0), "{} diagonal", method);
        assert!(phi.iter().all(|v| v.is_finite()), "{} finite", method);
    }

    let counts = co_occurrence(exports.view(), None).unwrap();
    assert!(counts.diag().iter().all(|&v| v == 0.0));
}

#[test]
fn complexity_stays_in_range() {
    for seed in 0..6 {
        let exports = random_exports(seed, 10, 8);
        for method in [ComplexityMethod::Reflection, ComplexityMethod::Eigenvector] {
            let steps = match method {
                ComplexityMethod::Reflection => Some(10),
                ComplexityMethod::Eigenvector => None,
            };
            let items = pci(exports.view(), InputType::Export, method, steps).unwrap();
            let regions = eci(exports.view(), InputType::Export, method, steps).unwrap();
            assert_eq!(items.len(), 10);
            assert_eq!(regions.len(), 8);
            for v in items.iter().chain(regions.iter()) {
                assert!(v.is_nan() || (0.0..=100.0).contains(v));
            }
        }
    }
}

#[test]
fn density_is_a_share() {
    let exports = random_exports(7, 12, 6);
    let phi = relatedness(
        exports.view(),
        InputType::Export,
        RelatednessMethod::Symmetric,
        None,
    )
    .unwrap();
    let has_rca = ecgeo_core::is_rca(exports.view()).unwrap();
    let density = rel_density_regions(phi.view(), has_rca.view()).unwrap();
    for v in density.iter() {
        assert!(v.is_nan() || (-1e-12..=1.0 + 1e-12).contains(v));
    }
}

#[test]
fn distribution_measures_are_bounded() {
    let exports = random_exports(11, 20, 5);
    let n = exports.nrows() as f64;

    let h = entropy(exports.view(), None, LogBase::E).unwrap();
    assert!(h.iter().all(|&v| v >= -1e-12 && v <= n.ln() + 1e-12));

    let g = gini(exports.view(), None).unwrap();
    assert!(g.iter().all(|&v| (-1e-12..=1.0).contains(&v)));

    let hhi = herfindahl(exports.view());
    assert!(hhi.iter().all(|&v| v >= 1.0 / n - 1e-12 && v <= 1.0 + 1e-12));
}
