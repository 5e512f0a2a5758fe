//! Response hydration layer.
//!
//! This module turns one raw search-engine response into its typed
//! views:
//!
//! - **[`Response`]**: accessors over the raw snapshot (`hits`,
//!   `total`, `max_score`, `took`, `timed_out`, `suggest`,
//!   `aggregations`) with default-on-absence semantics.
//! - **[`hydrate`]**: typed result construction from raw hits.
//! - **[`load`]**: positional object loading against the backing
//!   store.
//!
//! A `Response` wraps exactly one snapshot plus the load policy fixed
//! at construction; every accessor is a pure function of those,
//! computed at most once.

pub mod hydrate;
pub mod load;

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HydrateError;
use crate::registry::{IndexDescriptor, TypeRegistry};
use crate::scope::LoadOptions;

pub use hydrate::TypedResult;

/// One parsed suggestion entry, fields kept exactly as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestEntry {
    pub text: String,
    pub offset: u64,
    pub length: u64,
    pub options: Vec<Value>,
}

/// Unified view over a response: hydrated results or loaded objects,
/// chosen by the construction-time mode flag.
#[derive(Debug)]
pub enum Collection<'a, O> {
    Results(&'a [TypedResult]),
    Objects(&'a [Option<O>]),
}

/// Typed wrapper around one raw search-engine response.
///
/// Immutable after construction; sequence views are memoized on first
/// access, scalar accessors are computed up front.
pub struct Response<O> {
    raw: Value,
    registry: TypeRegistry<O>,
    load_options: LoadOptions<O>,
    loaded_objects: bool,
    total: u64,
    max_score: Option<f64>,
    took: u64,
    timed_out: bool,
    hits: OnceCell<Vec<Value>>,
    suggest: OnceCell<HashMap<String, Vec<SuggestEntry>>>,
    aggregations: OnceCell<HashMap<String, Value>>,
    results: OnceCell<Vec<TypedResult>>,
    objects: OnceCell<Vec<Option<O>>>,
}

impl<O> Response<O> {
    /// Wraps one raw response snapshot. `indexes` fixes the set of
    /// document types hydration may resolve against; `loaded_objects`
    /// picks the delegate of [`collection`](Self::collection).
    pub fn new(
        raw: Value,
        indexes: &[IndexDescriptor<O>],
        load_options: LoadOptions<O>,
        loaded_objects: bool,
    ) -> Self {
        let total = read_total(&raw);
        let max_score = raw
            .get("hits")
            .and_then(|hits| hits.get("max_score"))
            .and_then(Value::as_f64);
        let took = raw.get("took").and_then(Value::as_u64).unwrap_or(0);
        let timed_out = raw
            .get("timed_out")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self {
            registry: TypeRegistry::from_indexes(indexes),
            load_options,
            loaded_objects,
            total,
            max_score,
            took,
            timed_out,
            raw,
            hits: OnceCell::new(),
            suggest: OnceCell::new(),
            aggregations: OnceCell::new(),
            results: OnceCell::new(),
            objects: OnceCell::new(),
        }
    }

    /// Matched hit documents, verbatim and in engine order. Empty when
    /// the response carries no `hits` section.
    pub fn hits(&self) -> &[Value] {
        self.hits.get_or_init(|| {
            self.raw
                .get("hits")
                .and_then(|hits| hits.get("hits"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Engine-reported best score; `None` when the engine reported
    /// none (distinct from a zero score).
    pub fn max_score(&self) -> Option<f64> {
        self.max_score
    }

    /// Engine-reported elapsed milliseconds.
    pub fn took(&self) -> u64 {
        self.took
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Suggestion entries keyed by suggestion name; empty without a
    /// `suggest` section.
    pub fn suggest(&self) -> &HashMap<String, Vec<SuggestEntry>> {
        self.suggest.get_or_init(|| {
            let Some(section) = self.raw.get("suggest").and_then(Value::as_object) else {
                return HashMap::new();
            };
            section
                .iter()
                .map(|(name, entries)| (name.clone(), parse_suggest_entries(entries)))
                .collect()
        })
    }

    /// Aggregation payloads keyed by name, verbatim; empty without an
    /// `aggregations` section.
    pub fn aggregations(&self) -> &HashMap<String, Value> {
        self.aggregations.get_or_init(|| {
            self.raw
                .get("aggregations")
                .and_then(Value::as_object)
                .map(|section| {
                    section
                        .iter()
                        .map(|(name, payload)| (name.clone(), payload.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    /// Shorthand for [`aggregations`](Self::aggregations).
    pub fn aggs(&self) -> &HashMap<String, Value> {
        self.aggregations()
    }

    /// Typed results, one per hit, in hit order.
    ///
    /// Fails fast with [`HydrateError::UnknownType`] when a hit names
    /// an (index, type) pair absent from the registry.
    pub fn results(&self) -> Result<&[TypedResult], HydrateError> {
        self.results
            .get_or_try_init(|| hydrate::hydrate_hits(self.hits(), &self.registry))
            .map(Vec::as_slice)
    }

    /// Live domain objects aligned positionally with
    /// [`hits`](Self::hits); `None` marks excluded, filtered, or
    /// missing objects.
    pub fn objects(&self) -> Result<&[Option<O>], HydrateError>
    where
        O: Clone + 'static,
    {
        self.objects
            .get_or_try_init(|| load::load_objects(self.hits(), &self.registry, &self.load_options))
            .map(Vec::as_slice)
    }

    /// Results or objects, per the `loaded_objects` flag fixed at
    /// construction.
    pub fn collection(&self) -> Result<Collection<'_, O>, HydrateError>
    where
        O: Clone + 'static,
    {
        if self.loaded_objects {
            Ok(Collection::Objects(self.objects()?))
        } else {
            Ok(Collection::Results(self.results()?))
        }
    }
}

// Older engines report `hits.total` as a bare integer, 7.x as
// `{value, relation}`.
fn read_total(raw: &Value) -> u64 {
    match raw.get("hits").and_then(|hits| hits.get("total")) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::Object(map)) => map.get("value").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    }
}

fn parse_suggest_entries(entries: &Value) -> Vec<SuggestEntry> {
    entries
        .as_array()
        .map(|list| list.iter().map(parse_suggest_entry).collect())
        .unwrap_or_default()
}

fn parse_suggest_entry(entry: &Value) -> SuggestEntry {
    SuggestEntry {
        text: entry
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        offset: entry.get("offset").and_then(Value::as_u64).unwrap_or(0),
        length: entry.get("length").and_then(Value::as_u64).unwrap_or(0),
        options: entry
            .get("options")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bare(raw: Value) -> Response<()> {
        Response::new(raw, &[], LoadOptions::default(), false)
    }

    #[test]
    fn empty_response_degrades_to_defaults() {
        let response = bare(json!({}));
        assert!(response.hits().is_empty());
        assert_eq!(response.total(), 0);
        assert_eq!(response.max_score(), None);
        assert_eq!(response.took(), 0);
        assert!(!response.timed_out());
        assert!(response.suggest().is_empty());
        assert!(response.aggregations().is_empty());
    }

    #[test]
    fn total_reads_bare_and_object_forms() {
        assert_eq!(bare(json!({"hits": {"total": 4}})).total(), 4);
        let seven = json!({"hits": {"total": {"value": 7, "relation": "gte"}}});
        assert_eq!(bare(seven).total(), 7);
    }

    #[test]
    fn zero_max_score_stays_distinct_from_absent() {
        assert_eq!(bare(json!({"hits": {}})).max_score(), None);
        assert_eq!(
            bare(json!({"hits": {"max_score": 0.0}})).max_score(),
            Some(0.0)
        );
    }

    #[test]
    fn malformed_sections_are_tolerated() {
        let response = bare(json!({
            "took": "soon",
            "timed_out": 1,
            "hits": {"hits": {"not": "a list"}},
            "suggest": [],
        }));
        assert_eq!(response.took(), 0);
        assert!(!response.timed_out());
        assert!(response.hits().is_empty());
        assert!(response.suggest().is_empty());
    }
}
