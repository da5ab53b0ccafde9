//! Placeholder substitution for argument templates. Pure: no
//! I/O, no knowledge of validation or secrets.

pub mod coerce;
pub mod render;
pub mod tokenize;

pub use coerce::{coerce_array_elements, coerce_scalar};
pub use render::render_template;
pub use tokenize::{is_bare_placeholder, tokenize, Token};

use std::collections::HashMap;

use serde_json::Value;
use toolgate_types::{CallDefinition, ParameterType};

/// Render each template in `call.args` to its argv segment(s), one entry in
/// the outer `Vec` per template, in template order. A template that is
/// exactly one placeholder bound to an `ARRAY` parameter renders to one
/// segment per array element; every other template renders
/// to exactly one segment. Callers that need the per-template rendered
/// value (e.g. to run injection checks) should use this instead of
/// [`render_argv`], whose flattened output loses the template boundary.
#[must_use]
pub fn render_argv_segments(
    call: &CallDefinition,
    inputs: &HashMap<String, Value>,
) -> Vec<Vec<String>> {
    let scalars = scalar_values(call, inputs);

    call.args
        .iter()
        .map(|template| {
            if let Some(name) = is_bare_placeholder(template) {
                if let Some(mapping) = call.parameter(name) {
                    if mapping.schema.param_type == ParameterType::Array {
                        if let Some(value) = inputs.get(name) {
                            return coerce_array_elements(value);
                        }
                    }
                }
            }
            vec![render_template(template, &scalars)]
        })
        .collect()
}

/// Render a call's full argv: service-level `arguments` prepended unchanged,
/// followed by each templated arg in `call.args` rendered against `inputs`
/// (already schema-filtered by the caller).
#[must_use]
pub fn render_argv(
    service_arguments: &[String],
    call: &CallDefinition,
    inputs: &HashMap<String, Value>,
) -> Vec<String> {
    let mut argv: Vec<String> = service_arguments.to_vec();
    for segment in render_argv_segments(call, inputs) {
        argv.extend(segment);
    }
    argv
}

fn scalar_values(call: &CallDefinition, inputs: &HashMap<String, Value>) -> HashMap<String, String> {
    call.parameters
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
