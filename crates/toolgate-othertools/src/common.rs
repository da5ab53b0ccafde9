//! Mass-assignment filtering and placeholder rendering shared by the three
//! adapters.

use std::collections::HashMap;

use serde_json::Value;
use toolgate_renderer::coerce_scalar;
use toolgate_types::ParameterMapping;

/// Keep only inputs declared in `parameters`; undeclared keys are dropped
/// silently before rendering, the same mass-assignment defense `toolgate-
/// command` applies.
#[must_use]
pub fn schema_filter(
    parameters: &[ParameterMapping],
    raw_inputs: &HashMap<String, Value>,
) -> HashMap<String, Value> {
    raw_inputs
        .iter()
        .filter(|(name, _)| parameters.iter().any(|p| &p.schema.name == *name))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Coerce each declared, present input to its canonical string form for
/// template substitution.
#[must_use]
pub fn scalar_values(
    parameters: &[ParameterMapping],
    inputs: &HashMap<String, Value>,
) -> HashMap<String, String> {
    parameters
        .iter()
        .filter_map(|mapping| {
            let value = inputs.get(&mapping.schema.name)?;
            Some((
                mapping.schema.name.clone(),
                coerce_scalar(value, mapping.schema.param_type),
            ))
        })
        .collect()
}
