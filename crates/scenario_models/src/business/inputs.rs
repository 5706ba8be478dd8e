//! Model inputs: one sampled row and the static parameters.

use super::error::ModelError;
use scenario_core::config::{ConfigValue, Mapping};

/// Sampled values of every variable for one simulation index.
///
/// Borrows the variable names and one row of values; cheap to build per row.
#[derive(Clone, Copy, Debug)]
pub struct SampleRow<'a> {
    names: &'a [String],
    values: &'a [f64],
}

impl<'a> SampleRow<'a> {
    /// Pair variable names with their sampled values.
    ///
    /// Extra names or values beyond the shorter slice are ignored.
    pub fn new(names: &'a [String], values: &'a [f64]) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// Sampled value of a variable.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .zip(self.values)
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| *v)
    }

    /// Sampled value of a variable the model cannot do without.
    pub fn require(&self, name: &str) -> Result<f64, ModelError> {
        self.get(name)
            .ok_or_else(|| ModelError::MissingVariable(name.to_string()))
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.names
            .iter()
            .zip(self.values.iter())
            .map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of variables in the row.
    pub fn len(&self) -> usize {
        self.names.len().min(self.values.len())
    }

    /// Check if the row has no variables.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Static `business_parameters` subtree handed to every evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct BusinessParameters {
    root: ConfigValue,
}

impl BusinessParameters {
    /// Wrap a parameter mapping.
    pub fn new(root: Mapping) -> Self {
        Self {
            root: ConfigValue::Mapping(root),
        }
    }

    /// Numeric parameter at a dotted path.
    pub fn number(&self, path: &str) -> Option<f64> {
        self.root.lookup(path).and_then(ConfigValue::as_f64)
    }

    /// Numeric parameter that must be present.
    ///
    /// # Errors
    ///
    /// `MissingParameter` when absent, `InvalidParameter` when not a number.
    pub fn require(&self, path: &str) -> Result<f64, ModelError> {
        match self.root.lookup(path) {
            None | Some(ConfigValue::Null) => Err(ModelError::MissingParameter(path.to_string())),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| ModelError::invalid_parameter(path, "expected a number")),
        }
    }

    /// Nested mapping at a dotted path.
    pub fn mapping(&self, path: &str) -> Option<&Mapping> {
        self.root.lookup(path).and_then(ConfigValue::as_mapping)
    }
}

impl Default for BusinessParameters {
    fn default() -> Self {
        Self::new(Mapping::new())
    }
}

impl From<Mapping> for BusinessParameters {
    fn from(root: Mapping) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core::config::parse_toml_str;

    #[test]
    fn test_sample_row_lookup() {
        let names = vec!["flour_price".to_string(), "sugar_price".to_string()];
        let values = [20.0, 24.0];
        let row = SampleRow::new(&names, &values);

        assert_eq!(row.get("sugar_price"), Some(24.0));
        assert_eq!(row.get("butter_price"), None);
        assert_eq!(
            row.require("butter_price"),
            Err(ModelError::MissingVariable("butter_price".to_string()))
        );
        assert_eq!(row.len(), 2);
        assert_eq!(row.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["flour_price", "sugar_price"]);
    }

    #[test]
    fn test_parameters_lookup() {
        let params = BusinessParameters::new(
            parse_toml_str(
                r#"
                unit_price = 45
                label = "bread"
                [recipe]
                flour_price = 0.5
                "#,
            )
            .unwrap(),
        );

        assert_eq!(params.require("unit_price"), Ok(45.0));
        assert_eq!(params.number("recipe.flour_price"), Some(0.5));
        assert!(params.mapping("recipe").is_some());
        assert_eq!(
            params.require("fixed_monthly_cost"),
            Err(ModelError::MissingParameter("fixed_monthly_cost".to_string()))
        );
        assert!(matches!(
            params.require("label"),
            Err(ModelError::InvalidParameter { .. })
        ));
    }
}
