//! Template/client configuration resolution.

use super::document::load_document;
use super::error::ConfigError;
use super::value::{merge, ConfigValue, Mapping};
use std::fmt;
use std::path::Path;

/// Where a variable's distribution spec was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecOrigin {
    /// `custom_distributions.<name>` supplied by the client
    ClientOverride,
    /// `simulation.custom_distributions.<name>` (older client layout)
    LegacyClientOverride,
    /// `default_distributions.<name>` supplied by the template
    TemplateDefault,
}

impl SpecOrigin {
    /// Get the name of this origin.
    pub fn name(&self) -> &'static str {
        match self {
            SpecOrigin::ClientOverride => "client override",
            SpecOrigin::LegacyClientOverride => "client override (simulation section)",
            SpecOrigin::TemplateDefault => "template default",
        }
    }
}

/// A distribution spec located for one variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistributionEntry<'a> {
    /// Variable name
    pub variable: &'a str,
    /// Where the spec came from
    pub origin: SpecOrigin,
    /// The raw spec mapping (`type`, optional `fallback`)
    pub spec: &'a Mapping,
}

/// A variable declared in `common_variables`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    /// Unique variable name
    pub name: String,
    /// Human-readable description (empty when not given)
    pub description: String,
}

/// Merged view over an industry template and a client configuration.
///
/// The merged tree is built once in the constructor and never mutated.
///
/// # Examples
///
/// ```rust
/// use scenario_core::config::{parse_toml_str, ConfigResolver, ConfigValue};
///
/// let template = parse_toml_str(r#"
///     [default_distributions.flour_price]
///     type = "normal"
/// "#).unwrap();
/// let client = parse_toml_str(r#"
///     [custom_distributions.flour_price]
///     type = "triangular"
/// "#).unwrap();
///
/// let resolver = ConfigResolver::new(template, client);
/// let entry = resolver.resolve_distribution("flour_price").unwrap();
/// assert_eq!(entry.spec["type"], ConfigValue::from("triangular"));
///
/// let fallback = ConfigValue::Integer(999);
/// assert_eq!(resolver.get_or("parameter.that.does.not.exist", &fallback), &fallback);
/// ```
#[derive(Clone, Debug)]
pub struct ConfigResolver {
    tree: ConfigValue,
}

impl ConfigResolver {
    /// Merges a template and a client mapping into a resolver.
    pub fn new(template: Mapping, client: Mapping) -> Self {
        Self {
            tree: ConfigValue::Mapping(merge(&template, &client)),
        }
    }

    /// Loads and merges a template file and a client file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either document cannot be loaded.
    pub fn from_paths(template: &Path, client: &Path) -> Result<Self, ConfigError> {
        let template_doc = load_document(template)?;
        let client_doc = load_document(client)?;
        let resolver = Self::new(template_doc, client_doc);
        tracing::info!(
            template = %template.display(),
            client = %client.display(),
            "Configuration resolved: {}",
            resolver
        );
        Ok(resolver)
    }

    /// Returns the merged tree.
    #[inline]
    pub fn tree(&self) -> &ConfigValue {
        &self.tree
    }

    /// Looks up a dotted path in the merged tree.
    ///
    /// Returns `None` when any step is missing or a non-mapping is reached
    /// before the path is exhausted.
    #[inline]
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        self.tree.lookup(path)
    }

    /// Looks up a dotted path, returning `default` when it does not resolve.
    #[inline]
    pub fn get_or<'a>(&'a self, path: &str, default: &'a ConfigValue) -> &'a ConfigValue {
        self.get(path).unwrap_or(default)
    }

    /// Looks up a numeric value.
    #[inline]
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(ConfigValue::as_f64)
    }

    /// Looks up a string value.
    #[inline]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigValue::as_str)
    }

    /// Looks up a mapping.
    #[inline]
    pub fn get_mapping(&self, path: &str) -> Option<&Mapping> {
        self.get(path).and_then(ConfigValue::as_mapping)
    }

    /// Client display name (`client.name`).
    pub fn client_name(&self) -> Option<&str> {
        self.get_str("client.name")
    }

    /// Client industry tag (`client.industry`).
    pub fn industry(&self) -> Option<&str> {
        self.get_str("client.industry")
    }

    /// Business parameter subtree handed to the model.
    pub fn business_parameters(&self) -> Option<&Mapping> {
        self.get_mapping("business_parameters")
    }

    /// Identifier of the business model selected by the template.
    pub fn business_model_id(&self) -> Option<&str> {
        self.get_str("business_model.template")
    }

    /// Parameters the business model declares as required.
    pub fn required_parameters(&self) -> Vec<String> {
        self.get("business_model.parameters_required")
            .and_then(ConfigValue::as_sequence)
            .map(|items| {
                items
                    .iter()
                    .filter_map(ConfigValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Entries of `data_sources`, in declaration order.
    pub fn data_sources(&self) -> &[ConfigValue] {
        self.get("data_sources")
            .and_then(ConfigValue::as_sequence)
            .unwrap_or(&[])
    }

    /// Current value of a variable (`current_prices.<name>`), if configured.
    pub fn current_value(&self, variable: &str) -> Option<f64> {
        self.get_mapping("current_prices")
            .and_then(|prices| prices.get(variable))
            .and_then(ConfigValue::as_f64)
    }

    /// Variables declared in `common_variables`, in declaration order.
    ///
    /// Entries without a name are skipped.
    pub fn variables(&self) -> Vec<VariableDecl> {
        self.get("common_variables")
            .and_then(ConfigValue::as_sequence)
            .unwrap_or(&[])
            .iter()
            .filter_map(|entry| {
                let name = entry.lookup("name").and_then(ConfigValue::as_str)?;
                if name.trim().is_empty() {
                    return None;
                }
                Some(VariableDecl {
                    name: name.to_string(),
                    description: entry
                        .lookup("description")
                        .and_then(ConfigValue::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
            })
            .collect()
    }

    /// Locates the distribution spec for a variable.
    ///
    /// Lookup order: client override, then the older client location under
    /// `simulation`, then the template default. Empty mappings count as absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DistributionNotFound` when no spec exists, or
    /// `ConfigError::InvalidValue` when the entry is not a mapping.
    pub fn resolve_distribution<'a>(
        &'a self,
        variable: &'a str,
    ) -> Result<DistributionEntry<'a>, ConfigError> {
        let candidates = [
            ("custom_distributions", SpecOrigin::ClientOverride),
            ("simulation.custom_distributions", SpecOrigin::LegacyClientOverride),
            ("default_distributions", SpecOrigin::TemplateDefault),
        ];

        for (section, origin) in candidates {
            let Some(value) = self.get_mapping(section).and_then(|m| m.get(variable)) else {
                continue;
            };
            if value.is_blank() {
                continue;
            }
            let spec = value.as_mapping().ok_or_else(|| {
                ConfigError::invalid_value(format!("{}.{}", section, variable), "a mapping")
            })?;
            return Ok(DistributionEntry {
                variable,
                origin,
                spec,
            });
        }

        Err(ConfigError::DistributionNotFound(variable.to_string()))
    }

    /// Collects every completeness problem without stopping at the first.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.get("client.industry").map_or(true, ConfigValue::is_blank) {
            errors.push("Client does not specify 'client.industry'".to_string());
        }

        if self.get("industry.name").map_or(true, ConfigValue::is_blank) {
            errors.push("Template does not define 'industry.name'".to_string());
        }

        if self.get("common_variables").map_or(true, ConfigValue::is_blank) {
            errors.push("Template does not define 'common_variables'".to_string());
        }

        for param in self.required_parameters() {
            let path = format!("business_parameters.{}", param);
            if self.get(&path).map_or(true, |v| matches!(v, ConfigValue::Null)) {
                errors.push(format!("Missing required parameter: {}", path));
            }
        }

        for variable in self.variables() {
            if let Err(e) = self.resolve_distribution(&variable.name) {
                errors.push(e.to_string());
            }
        }

        errors
    }

    /// Validates that the configuration is complete.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` listing every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

impl fmt::Display for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.client_name().unwrap_or("unnamed client"),
            self.industry().unwrap_or("no industry")
        )
    }
}
