//! Built-in business models.

use super::error::ModelError;
use super::inputs::{BusinessParameters, SampleRow};

/// Sampled value when the variable is simulated, configured parameter otherwise.
fn sampled_or_param(
    row: &SampleRow<'_>,
    params: &BusinessParameters,
    name: &str,
) -> Result<f64, ModelError> {
    match row.get(name) {
        Some(value) => Ok(value),
        None => params.require(name),
    }
}

/// Monthly contribution margin of a recipe-based product.
///
/// Each `recipe.<ingredient>` entry is a quantity per unit multiplied by the
/// sampled price of `<ingredient>`. `unit_price` and `monthly_volume` are read
/// from the row when simulated, otherwise from the parameters.
/// `fixed_monthly_cost` defaults to 0.
///
/// ```text
/// outcome = monthly_volume × (unit_price − Σ recipeᵢ × ingredientᵢ) − fixed_monthly_cost
/// ```
pub fn unit_margin(row: &SampleRow<'_>, params: &BusinessParameters) -> Result<f64, ModelError> {
    let price = sampled_or_param(row, params, "unit_price")?;
    let volume = sampled_or_param(row, params, "monthly_volume")?;
    let fixed = params.number("fixed_monthly_cost").unwrap_or(0.0);

    let mut unit_cost = 0.0;
    if let Some(recipe) = params.mapping("recipe") {
        for (ingredient, quantity) in recipe {
            let quantity = quantity.as_f64().ok_or_else(|| {
                ModelError::invalid_parameter(format!("recipe.{}", ingredient), "expected a quantity")
            })?;
            unit_cost += quantity * row.require(ingredient)?;
        }
    }

    Ok(volume * (price - unit_cost) - fixed)
}

/// Monthly margin driven by uncertain demand.
///
/// `monthly_volume` must be simulated. `unit_price` and `unit_cost` come from
/// the row when simulated, otherwise from the parameters.
/// `fixed_monthly_cost` defaults to 0.
///
/// ```text
/// outcome = monthly_volume × (unit_price − unit_cost) − fixed_monthly_cost
/// ```
pub fn volume_margin(row: &SampleRow<'_>, params: &BusinessParameters) -> Result<f64, ModelError> {
    let volume = row.require("monthly_volume")?;
    let price = sampled_or_param(row, params, "unit_price")?;
    let unit_cost = sampled_or_param(row, params, "unit_cost")?;
    let fixed = params.number("fixed_monthly_cost").unwrap_or(0.0);

    Ok(volume * (price - unit_cost) - fixed)
}
