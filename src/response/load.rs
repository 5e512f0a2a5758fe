use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::HydrateError;
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::scope::LoadOptions;

struct Batch<O> {
    index: String,
    type_name: String,
    descriptor: Arc<TypeDescriptor<O>>,
    // (slot position, hit id) in hit order
    entries: Vec<(usize, String)>,
}

pub(crate) fn load_objects<O: Clone + 'static>(
    hits: &[Value],
    registry: &TypeRegistry<O>,
    options: &LoadOptions<O>,
) -> Result<Vec<Option<O>>, HydrateError> {
    let mut slots: Vec<Option<O>> = vec![None; hits.len()];

    // One batch per distinct (index, type), in first-appearance order.
    // Excluded types never reach the store but still must resolve: an
    // unknown pair is a configuration fault either way.
    let mut batches: Vec<Batch<O>> = Vec::new();
    for (position, hit) in hits.iter().enumerate() {
        let index = hit.get("_index").and_then(Value::as_str).unwrap_or_default();
        let type_name = hit.get("_type").and_then(Value::as_str).unwrap_or_default();
        let descriptor =
            registry
                .resolve(index, type_name)
                .ok_or_else(|| HydrateError::UnknownType {
                    index: index.to_string(),
                    type_name: type_name.to_string(),
                })?;
        if !options.allows(type_name) {
            continue;
        }
        let Some(id) = hit_id(hit) else {
            continue;
        };
        match batches
            .iter_mut()
            .find(|batch| batch.index == index && batch.type_name == type_name)
        {
            Some(batch) => batch.entries.push((position, id)),
            None => batches.push(Batch {
                index: index.to_string(),
                type_name: type_name.to_string(),
                descriptor: Arc::clone(descriptor),
                entries: vec![(position, id)],
            }),
        }
    }

    for batch in batches {
        let ids: Vec<String> = batch.entries.iter().map(|(_, id)| id.clone()).collect();
        debug!(
            index = %batch.index,
            doc_type = %batch.type_name,
            ids = ids.len(),
            "loading objects"
        );
        let loaded = batch
            .descriptor
            .source
            .load_many(&batch.type_name, &ids)
            .map_err(|source| HydrateError::Store {
                type_name: batch.type_name.clone(),
                source,
            })?;
        let scope = options.scope_for(&batch.type_name);
        for (position, id) in &batch.entries {
            // Absent from the loaded map means not found, never an
            // error; the slot stays nil.
            let Some(object) = loaded.get(id) else {
                continue;
            };
            if let Some(scope) = &scope
                && !scope.accepts(object)
            {
                continue;
            }
            slots[*position] = Some(object.clone());
        }
    }

    Ok(slots)
}

fn hit_id(hit: &Value) -> Option<String> {
    match hit.get("_id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
