//! Property tests for configuration merge and dotted-path lookup.

use proptest::prelude::*;
use scenario_core::config::{merge, ConfigResolver, ConfigValue, Mapping};

fn leaf() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        any::<bool>().prop_map(ConfigValue::Bool),
        (-1_000_000i64..1_000_000).prop_map(ConfigValue::Integer),
        (-1.0e6..1.0e6f64).prop_map(ConfigValue::Float),
        "[a-z]{0,8}".prop_map(ConfigValue::String),
    ]
}

fn tree() -> impl Strategy<Value = ConfigValue> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::Sequence),
            prop::collection::btree_map("[a-d]", inner, 0..4).prop_map(ConfigValue::Mapping),
        ]
    })
}

fn mapping() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map("[a-d]", tree(), 0..5)
}

proptest! {
    #[test]
    fn merge_with_empty_client_is_identity(template in mapping()) {
        prop_assert_eq!(merge(&template, &Mapping::new()), template);
    }

    #[test]
    fn client_leaf_always_overrides(template in mapping(), key in "[a-d]", value in leaf()) {
        let mut client = Mapping::new();
        client.insert(key.clone(), value.clone());
        let merged = merge(&template, &client);
        prop_assert_eq!(&merged[&key], &value);
    }

    #[test]
    fn template_keys_absent_from_client_are_kept(template in mapping(), client in mapping()) {
        let merged = merge(&template, &client);
        for (key, value) in &template {
            if !client.contains_key(key) {
                prop_assert_eq!(&merged[key], value);
            }
        }
        prop_assert!(merged.len() >= template.len());
    }

    #[test]
    fn lookup_never_panics(template in mapping(), client in mapping(), path in "[a-d.]{0,12}") {
        let resolver = ConfigResolver::new(template, client);
        let default = ConfigValue::from("default");
        let value = resolver.get_or(&path, &default);
        match resolver.get(&path) {
            Some(found) => prop_assert_eq!(value, found),
            None => prop_assert_eq!(value, &default),
        }
    }
}

#[test]
fn test_nested_merge_keeps_sibling_leaves() {
    let template = scenario_core::config::parse_toml_str(
        r#"
        [business_parameters]
        unit_price = 45
        fixed_monthly_cost = 15000
        [business_parameters.recipe]
        flour_price = 0.5
        sugar_price = 0.2
        "#,
    )
    .unwrap();
    let client = scenario_core::config::parse_toml_str(
        r#"
        [business_parameters.recipe]
        sugar_price = 0.25
        "#,
    )
    .unwrap();

    let resolver = ConfigResolver::new(template, client);
    assert_eq!(resolver.get_f64("business_parameters.unit_price"), Some(45.0));
    assert_eq!(resolver.get_f64("business_parameters.recipe.flour_price"), Some(0.5));
    assert_eq!(resolver.get_f64("business_parameters.recipe.sugar_price"), Some(0.25));
}

#[test]
fn test_toml_and_json_documents_resolve_the_same_numbers() {
    use approx::assert_relative_eq;
    use scenario_core::config::{parse_json_str, parse_toml_str};

    let toml = parse_toml_str(
        r#"
        [current_prices]
        flour_price = 20.35
        sugar_price = 24

        [business_parameters.recipe]
        flour_price = 0.45
        "#,
    )
    .unwrap();
    let json = parse_json_str(
        r#"{
            "current_prices": { "flour_price": 20.35, "sugar_price": 24.0 },
            "business_parameters": { "recipe": { "flour_price": 0.45 } }
        }"#,
    )
    .unwrap();

    let from_toml = ConfigResolver::new(toml, Mapping::new());
    let from_json = ConfigResolver::new(Mapping::new(), json);
    for variable in ["flour_price", "sugar_price"] {
        assert_relative_eq!(
            from_toml.current_value(variable).unwrap(),
            from_json.current_value(variable).unwrap(),
            epsilon = 1e-12
        );
    }
    let path = "business_parameters.recipe.flour_price";
    assert_relative_eq!(from_toml.get_f64(path).unwrap(), 0.45);
    assert_relative_eq!(from_json.get_f64(path).unwrap(), 0.45);
}
