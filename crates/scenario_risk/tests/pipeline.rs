//! End-to-end pipeline: configuration documents through to triggers.

use chrono::NaiveDate;
use scenario_core::config::{parse_toml_str, ConfigError, ConfigResolver};
use scenario_core::history::{HistoryLoader, InMemoryProvider, Observation};
use scenario_engine::{EngineError, RunStateError};
use scenario_models::business::{ModelError, ModelRegistry};
use scenario_models::distribution::ParamSource;
use scenario_risk::{RiskError, RiskPipeline, Severity};

const TEMPLATE: &str = r#"
    [industry]
    name = "food"

    [[common_variables]]
    name = "flour_price"

    [[common_variables]]
    name = "sugar_price"

    [default_distributions.flour_price]
    type = "normal"

    [default_distributions.sugar_price]
    type = "triangular"

    [business_model]
    template = "unit_margin"
    parameters_required = ["unit_price", "monthly_volume"]

    [business_parameters]
    unit_price = 45
    monthly_volume = 1000
    fixed_monthly_cost = 15000
    [business_parameters.recipe]
    flour_price = 0.5
    sugar_price = 0.2

    [current_prices]
    sugar_price = 25
"#;

const CLIENT: &str = r#"
    [client]
    name = "Panaderia Central"
    industry = "food"

    [simulation]
    n_simulations = 5000
    seed = 2024

    [[data_sources]]
    type = "memory"
    [[data_sources.series]]
    key = "harina_mensual"
    maps_to_variable = "flour_price"
"#;

fn loader() -> HistoryLoader {
    let flour = [18.0, 19.5, 21.0, 20.5]
        .iter()
        .enumerate()
        .map(|(i, v)| Observation::new(NaiveDate::from_ymd_opt(2024, i as u32 + 1, 1).unwrap(), *v))
        .collect();
    HistoryLoader::new().with_provider(InMemoryProvider::new().with_series("harina_mensual", flour))
}

fn pipeline_with(client: &str) -> Result<RiskPipeline, RiskError> {
    RiskPipeline::setup(
        ConfigResolver::new(
            parse_toml_str(TEMPLATE).unwrap(),
            parse_toml_str(client).unwrap(),
        ),
        &loader(),
        &ModelRegistry::default(),
    )
}

#[test]
fn test_healthy_bakery_end_to_end() {
    let mut pipeline = pipeline_with(CLIENT).unwrap();

    assert_eq!(pipeline.history().len(), 1);
    let sources: Vec<&ParamSource> = pipeline.specs().iter().map(|s| s.source()).collect();
    assert_eq!(sources[0], &ParamSource::Historical { observations: 4 });
    assert_eq!(sources[1], &ParamSource::Fallback { anchor: 25.0 });

    let run = pipeline.run_with(5_000, Some(2024)).unwrap();
    assert_eq!(run.len(), 5_000);
    assert_eq!(run.seed(), 2024);
    assert_eq!(run.model_id(), "unit_margin");

    // 1000 * (45 - 0.5 * 19.75 - 0.2 * 25.4167) - 15000 ≈ 15042
    let stats = pipeline.statistics().unwrap();
    approx::assert_relative_eq!(stats.mean, 15_042.0, max_relative = 0.02);
    assert_eq!(stats.prob_loss, 0.0);
    assert!(stats.p10 > 0.0 && stats.p10 < stats.mean);
    assert!(stats.cvar_95 <= stats.var_95);

    let sensitivity = pipeline.sensitivity().unwrap();
    assert_eq!(sensitivity.len(), 2);
    let top = &sensitivity.entries()[0];
    assert_eq!(top.variable, "flour_price");
    assert!(top.correlation < 0.0);

    assert!(pipeline.evaluate_triggers().unwrap().is_empty());

    let report = pipeline.report().unwrap();
    assert!(report.is_clear());
    assert_eq!(report.client.as_deref(), Some("Panaderia Central"));
    assert_eq!(report.n_simulations, 5_000);
    assert!(report.to_string().contains("main driver: flour_price"));
}

#[test]
fn test_heavy_fixed_costs_raise_critical_triggers() {
    let client = format!("{}\n[business_parameters]\nfixed_monthly_cost = 30000\n", CLIENT);
    let mut pipeline = pipeline_with(&client).unwrap();
    pipeline.run_with(5_000, Some(7)).unwrap();

    let stats = pipeline.statistics().unwrap();
    assert!(stats.prob_loss > 0.3, "prob_loss = {}", stats.prob_loss);
    assert!(stats.p10 < 0.0);

    let triggers = pipeline.evaluate_triggers().unwrap();
    assert!(triggers.iter().any(|t| t.metric == "p10" && t.severity == Severity::Critical));
    assert_eq!(
        pipeline.report().unwrap().highest_severity(),
        Some(Severity::Critical)
    );
}

#[test]
fn test_threshold_overrides_reach_evaluation() {
    let client = format!("{}\n[thresholds]\nmargin_protection = 0.99\n", CLIENT);
    let mut pipeline = pipeline_with(&client).unwrap();
    assert_eq!(pipeline.thresholds().margin_protection, 0.99);

    pipeline.run_with(2_000, Some(1)).unwrap();
    let triggers = pipeline.evaluate_triggers().unwrap();
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].metric, "p10_to_mean");
    assert_eq!(triggers[0].severity, Severity::Medium);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut a = pipeline_with(CLIENT).unwrap();
    let mut b = pipeline_with(CLIENT).unwrap();

    let first = a.run_with(1_000, Some(99)).unwrap().outcomes().to_vec();
    let second = b.run_with(1_000, Some(99)).unwrap().outcomes().to_vec();
    assert_eq!(first, second);

    let other = a.run_with(1_000, Some(100)).unwrap().outcomes().to_vec();
    assert_ne!(first, other);
}

#[test]
fn test_views_require_a_run() {
    let pipeline = pipeline_with(CLIENT).unwrap();
    assert_eq!(
        pipeline.evaluate_triggers().unwrap_err(),
        RiskError::RunState(RunStateError::NoCompletedRun)
    );
}

#[test]
fn test_incomplete_configuration_reports_every_problem() {
    let client = r#"
        [client]
        name = "Half Configured"

        [business_model]
        parameters_required = ["unit_price", "opening_hours"]
    "#;
    match pipeline_with(client) {
        Err(RiskError::Config(ConfigError::Validation(errors))) => {
            assert_eq!(errors.len(), 2, "{:?}", errors);
            assert!(errors.iter().any(|e| e.contains("client.industry")));
            assert!(errors.iter().any(|e| e.contains("business_parameters.opening_hours")));
        }
        Err(other) => panic!("Expected validation error, got {:?}", other),
        Ok(_) => panic!("Expected validation error"),
    }
}

#[test]
fn test_unregistered_model() {
    let client = format!("{}\n[business_model]\ntemplate = \"franchise\"\n", CLIENT);
    match pipeline_with(&client) {
        Err(RiskError::Model(ModelError::ModelNotFound(id))) => assert_eq!(id, "franchise"),
        Err(other) => panic!("Expected model not found, got {:?}", other),
        Ok(_) => panic!("Expected model not found"),
    }
}

#[test]
fn test_extreme_history_is_an_error_not_a_panic() {
    let extreme = vec![
        Observation::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), -1e308),
        Observation::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), 1e308),
    ];
    let loader = HistoryLoader::new()
        .with_provider(InMemoryProvider::new().with_series("harina_mensual", extreme));
    let client = format!("{}\n[custom_distributions.flour_price]\ntype = \"uniform\"\n", CLIENT);

    let result = RiskPipeline::setup(
        ConfigResolver::new(
            parse_toml_str(TEMPLATE).unwrap(),
            parse_toml_str(&client).unwrap(),
        ),
        &loader,
        &ModelRegistry::default(),
    );
    match result {
        Err(RiskError::Engine(EngineError::Sampler { variable, .. })) => {
            assert_eq!(variable, "flour_price")
        }
        Err(other) => panic!("Expected sampler error, got {:?}", other),
        Ok(_) => panic!("Expected sampler error"),
    }
}

#[test]
fn test_from_paths() {
    let dir = std::env::temp_dir().join(format!("scenario_risk_paths_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let template = dir.join("template.toml");
    let client = dir.join("client.toml");
    std::fs::write(&template, TEMPLATE).unwrap();
    std::fs::write(&client, CLIENT).unwrap();

    let mut pipeline =
        RiskPipeline::from_paths(&template, &client, &loader(), &ModelRegistry::default()).unwrap();
    assert_eq!(pipeline.config().client_name(), Some("Panaderia Central"));
    assert!(pipeline.run().is_ok());

    let missing = dir.join("absent.toml");
    assert!(matches!(
        RiskPipeline::from_paths(&template, &missing, &loader(), &ModelRegistry::default()),
        Err(RiskError::Config(ConfigError::Io { .. }))
    ));

    std::fs::remove_dir_all(&dir).ok();
}
