use ecgeo_core::config::ConfigError;
use ecgeo_core::{ci_calibrate, AnalysisConfig, ComplexityAnalyzer};
use ndarray::{arr2, Axis};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    println!(
        "Loaded config: relatedness={} complexity={} steps={}",
        config.relatedness.method, config.complexity.method, config.complexity.steps
    );

    // Products (rows) by countries (columns).
    let exports = arr2(&[
        [100.0, 300.0, 500.0, 800.0],
        [100.0, 200.0, 100.0, 3000.0],
        [100.0, 100.0, 100.0, 300.0],
        [400.0, 50.0, 20.0, 100.0],
    ]);

    let analyzer = ComplexityAnalyzer::new(config);
    let space = analyzer.product_space(exports.view())?;

    let diversity = ecgeo_core::is_rca(exports.view())?.sum_axis(Axis(0));
    let eci = ci_calibrate(space.eci.view(), diversity.view())?;

    println!("relatedness:\n{:.3}", space.relatedness);
    println!("PCI: {:.2}", space.pci);
    println!("ECI (oriented by diversity): {:.2}", eci);
    println!("density:\n{:.3}", space.density);
    Ok(())
}

fn load_config() -> Result<AnalysisConfig, ConfigError> {
    AnalysisConfig::load_from_file("config/analysis.toml").or_else(|err| {
        eprintln!("Falling back to default config: {err}");
        Ok(AnalysisConfig::default())
    })
}
