//! Format-neutral configuration tree.
//!
//! Documents in any serde format deserialise into [`ConfigValue`]. The tree
//! is built once by [`merge`] and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping node of a configuration tree.
pub type Mapping = BTreeMap<String, ConfigValue>;

/// A node of a configuration tree.
///
/// # Examples
///
/// ```rust
/// use scenario_core::config::{ConfigValue, Mapping};
///
/// let mut params = Mapping::new();
/// params.insert("unit_price".to_string(), ConfigValue::Float(45.0));
/// let root = ConfigValue::Mapping(params);
///
/// assert_eq!(root.lookup("unit_price").and_then(ConfigValue::as_f64), Some(45.0));
/// assert!(root.lookup("unit_price.currency").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit null (JSON `null`)
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Integer(i64),
    /// Floating-point scalar
    Float(f64),
    /// String scalar
    String(String),
    /// Ordered sequence
    Sequence(Vec<ConfigValue>),
    /// Nested mapping
    Mapping(Mapping),
}

impl ConfigValue {
    /// Returns the value as `f64` when it is numeric.
    ///
    /// Integers are widened so that `price = 45` and `price = 45.0` read alike.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ConfigValue::Integer(i) if *i >= 0 => Some(*i as u64),
            ConfigValue::Float(f) if *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64 => {
                Some(*f as u64)
            }
            _ => None,
        }
    }

    /// Returns the string slice of a string scalar.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean of a boolean scalar.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the mapping of a mapping node.
    #[inline]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the elements of a sequence node.
    #[inline]
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` for mapping nodes.
    #[inline]
    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigValue::Mapping(_))
    }

    /// Returns `true` for values that carry no information.
    ///
    /// Null, empty strings, empty sequences and empty mappings count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            ConfigValue::Null => true,
            ConfigValue::String(s) => s.trim().is_empty(),
            ConfigValue::Sequence(items) => items.is_empty(),
            ConfigValue::Mapping(m) => m.is_empty(),
            _ => false,
        }
    }

    /// Walks a dot-separated path from this node.
    ///
    /// Returns `None` as soon as a step is missing or a non-mapping node is
    /// reached before the path is exhausted. Never panics.
    pub fn lookup(&self, path: &str) -> Option<&ConfigValue> {
        let mut current = self;
        for key in path.split('.') {
            current = current.as_mapping()?.get(key)?;
        }
        Some(current)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Mapping> for ConfigValue {
    fn from(value: Mapping) -> Self {
        ConfigValue::Mapping(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(value)
    }
}

/// Merges a client mapping over a template mapping.
///
/// Right-biased and recursive: for every client key, two mappings merge
/// key by key; any other combination lets the client value replace the
/// template value entirely, including a scalar replacing a whole mapping.
/// Template keys absent from the client are kept unchanged.
///
/// # Examples
///
/// ```rust
/// use scenario_core::config::{merge, parse_toml_str};
///
/// let template = parse_toml_str("a = 1\n[b]\nc = 2\n").unwrap();
/// let client = parse_toml_str("[b]\nc = 3\nd = 4\n").unwrap();
/// let merged = merge(&template, &client);
///
/// assert_eq!(merged["a"].as_f64(), Some(1.0));
/// assert_eq!(merged["b"].lookup("c").and_then(|v| v.as_f64()), Some(3.0));
/// assert_eq!(merged["b"].lookup("d").and_then(|v| v.as_f64()), Some(4.0));
/// ```
pub fn merge(template: &Mapping, client: &Mapping) -> Mapping {
    let mut result = template.clone();

    for (key, client_value) in client {
        let merged = match (result.get(key), client_value) {
            (Some(ConfigValue::Mapping(base)), ConfigValue::Mapping(overlay)) => {
                ConfigValue::Mapping(merge(base, overlay))
            }
            _ => client_value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, ConfigValue)>) -> Mapping {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_merge_with_empty_client_is_identity() {
        let template = mapping(vec![
            ("a", 1i64.into()),
            ("b", mapping(vec![("c", 2i64.into())]).into()),
        ]);
        assert_eq!(merge(&template, &Mapping::new()), template);
    }

    #[test]
    fn test_merge_client_leaf_overrides() {
        let template = mapping(vec![("price", 45i64.into())]);
        let client = mapping(vec![("price", 50.0.into())]);
        let merged = merge(&template, &client);
        assert_eq!(merged["price"], ConfigValue::Float(50.0));
    }

    #[test]
    fn test_merge_nested_mappings_recursively() {
        let template = mapping(vec![(
            "recipe",
            mapping(vec![("flour", 0.5.into()), ("sugar", 0.2.into())]).into(),
        )]);
        let client = mapping(vec![(
            "recipe",
            mapping(vec![("sugar", 0.3.into()), ("butter", 0.1.into())]).into(),
        )]);
        let merged = merge(&template, &client);
        let recipe = merged["recipe"].as_mapping().unwrap();

        assert_eq!(recipe["flour"], ConfigValue::Float(0.5));
        assert_eq!(recipe["sugar"], ConfigValue::Float(0.3));
        assert_eq!(recipe["butter"], ConfigValue::Float(0.1));
    }

    #[test]
    fn test_merge_scalar_replaces_mapping() {
        let template = mapping(vec![(
            "thresholds",
            mapping(vec![("critical_loss_prob", 0.25.into())]).into(),
        )]);
        let client = mapping(vec![("thresholds", "disabled".into())]);
        let merged = merge(&template, &client);
        assert_eq!(merged["thresholds"], ConfigValue::from("disabled"));
    }

    #[test]
    fn test_merge_mapping_replaces_scalar() {
        let template = mapping(vec![("x", 1i64.into())]);
        let client = mapping(vec![("x", mapping(vec![("y", 2i64.into())]).into())]);
        let merged = merge(&template, &client);
        assert!(merged["x"].is_mapping());
    }

    #[test]
    fn test_lookup_stops_at_non_mapping() {
        let root = ConfigValue::Mapping(mapping(vec![("a", 1i64.into())]));
        assert!(root.lookup("a.b").is_none());
        assert!(root.lookup("missing").is_none());
        assert!(root.lookup("").is_none());
        assert_eq!(root.lookup("a"), Some(&ConfigValue::Integer(1)));
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(ConfigValue::Integer(10).as_f64(), Some(10.0));
        assert_eq!(ConfigValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(ConfigValue::Integer(-1).as_u64(), None);
        assert_eq!(ConfigValue::Float(5000.0).as_u64(), Some(5000));
        assert_eq!(ConfigValue::from("10").as_f64(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(ConfigValue::Null.is_blank());
        assert!(ConfigValue::from("  ").is_blank());
        assert!(ConfigValue::Sequence(vec![]).is_blank());
        assert!(ConfigValue::Mapping(Mapping::new()).is_blank());
        assert!(!ConfigValue::Integer(0).is_blank());
    }
}
