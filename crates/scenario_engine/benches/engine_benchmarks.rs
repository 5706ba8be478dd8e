//! Criterion benchmarks for scenario_engine.
//!
//! Benchmarks cover:
//! - A full run of the recipe margin model at several simulation counts
//! - Statistics and sensitivity reduction of a 10 000-row run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scenario_core::config::parse_toml_str;
use scenario_engine::{SensitivityAnalyzer, SimulationEngine, StatisticsCalculator};
use scenario_models::business::{BusinessParameters, ModelRegistry};
use scenario_models::distribution::{DistributionParams, ParamSource, VariableSpec};

fn bakery_engine() -> SimulationEngine {
    let fallback = ParamSource::Fallback { anchor: 100.0 };
    let specs = vec![
        VariableSpec::new("flour_price", DistributionParams::Normal { mean: 20.0, std: 2.0 }, fallback)
            .unwrap(),
        VariableSpec::new(
            "sugar_price",
            DistributionParams::Triangular { min: 22.0, mode: 24.0, max: 28.0 },
            fallback,
        )
        .unwrap(),
        VariableSpec::new("butter_price", DistributionParams::Uniform { min: 80.0, max: 95.0 }, fallback)
            .unwrap(),
    ];
    let params = BusinessParameters::new(
        parse_toml_str(
            r#"
            unit_price = 45
            monthly_volume = 1000
            fixed_monthly_cost = 15000
            [recipe]
            flour_price = 0.5
            sugar_price = 0.2
            butter_price = 0.05
            "#,
        )
        .unwrap(),
    );
    let model = ModelRegistry::default().get("unit_margin").unwrap();
    SimulationEngine::new(specs, model, params).unwrap()
}

/// Benchmark sampling plus model evaluation.
fn bench_run(c: &mut Criterion) {
    let engine = bakery_engine();
    let mut group = c.benchmark_group("simulation_run");

    for n in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("unit_margin", n), &n, |b, &n| {
            b.iter(|| engine.run_with(black_box(n), Some(42)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark reductions over a completed run.
fn bench_reductions(c: &mut Criterion) {
    let run = bakery_engine().run_with(10_000, Some(42)).unwrap();

    c.bench_function("statistics_10k", |b| {
        b.iter(|| StatisticsCalculator::compute(black_box(run.outcomes())).unwrap());
    });
    c.bench_function("sensitivity_10k", |b| {
        b.iter(|| SensitivityAnalyzer::analyze(black_box(&run)).unwrap());
    });
}

criterion_group!(benches, bench_run, bench_reductions);
criterion_main!(benches);
