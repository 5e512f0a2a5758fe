use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::HydrateError;
use crate::registry::{TypeDescriptor, TypeRegistry};

/// Typed, read-only view over one hit document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedResult {
    pub index: String,
    pub type_name: String,
    /// Declared fields coerced from `_source`. A declared field absent
    /// here degraded to nil.
    pub fields: BTreeMap<String, Value>,
    pub score: Option<f64>,
    /// Verbatim `_explanation` payload when the engine produced one.
    pub explanation: Option<Value>,
    /// The hit document exactly as `hits()` emits it.
    pub data: Value,
}

impl TypedResult {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

pub(crate) fn hydrate_hits<O>(
    hits: &[Value],
    registry: &TypeRegistry<O>,
) -> Result<Vec<TypedResult>, HydrateError> {
    hits.iter().map(|hit| hydrate_hit(hit, registry)).collect()
}

fn hydrate_hit<O>(hit: &Value, registry: &TypeRegistry<O>) -> Result<TypedResult, HydrateError> {
    let index = hit_str(hit, "_index");
    let type_name = hit_str(hit, "_type");
    let descriptor =
        registry
            .resolve(&index, &type_name)
            .ok_or_else(|| HydrateError::UnknownType {
                index: index.clone(),
                type_name: type_name.clone(),
            })?;

    let fields = match hit.get("_source").and_then(Value::as_object) {
        Some(source) => fields_from_source(source, descriptor),
        None => identity_fallback(hit, descriptor),
    };

    Ok(TypedResult {
        index,
        type_name,
        fields,
        score: hit.get("_score").and_then(Value::as_f64),
        explanation: hit.get("_explanation").cloned(),
        data: hit.clone(),
    })
}

fn hit_str(hit: &Value, key: &str) -> String {
    hit.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn fields_from_source<O>(
    source: &Map<String, Value>,
    descriptor: &TypeDescriptor<O>,
) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    for spec in &descriptor.fields {
        let Some(raw) = source.get(&spec.name) else {
            continue;
        };
        match spec.kind.coerce(raw) {
            Some(value) => {
                fields.insert(spec.name.clone(), value);
            }
            None => {
                if !raw.is_null() {
                    warn!(
                        doc_type = %descriptor.name,
                        field = %spec.name,
                        "source value incompatible with declared kind, field degrades to nil"
                    );
                }
            }
        }
    }
    // The identity field rides along even when the schema does not
    // declare it, left exactly as the source carries it.
    if descriptor.field_spec(&descriptor.identity_field).is_none()
        && let Some(raw) = source.get(&descriptor.identity_field)
    {
        fields.insert(descriptor.identity_field.clone(), raw.clone());
    }
    fields
}

// A hit without stored fields still carries identity: `_id` lands in
// the identity field in whatever representation the engine used.
fn identity_fallback<O>(hit: &Value, descriptor: &TypeDescriptor<O>) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    if let Some(id) = hit.get("_id") {
        fields.insert(descriptor.identity_field.clone(), id.clone());
    }
    fields
}
