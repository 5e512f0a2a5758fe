//! Document-type registry.
//!
//! Resolves an (index, type) name pair to the descriptor that knows
//! how to hydrate hits of that type and where to load its live
//! objects from. The registry is read-only configuration: built once
//! from the index descriptors a response may hydrate against, then
//! only queried.

pub mod fields;

use std::collections::HashMap;
use std::sync::Arc;

use crate::store::ObjectSource;

pub use fields::{FieldKind, FieldSpec};

/// Describes one document type: identity field, declared field schema,
/// and the backing-store accessor for loading live objects.
pub struct TypeDescriptor<O> {
    pub name: String,
    /// Field receiving the raw `_id` when a hit carries no `_source`.
    pub identity_field: String,
    pub fields: Vec<FieldSpec>,
    pub source: Arc<dyn ObjectSource<O>>,
}

impl<O> TypeDescriptor<O> {
    pub fn new(name: impl Into<String>, source: Arc<dyn ObjectSource<O>>) -> Self {
        Self {
            name: name.into(),
            identity_field: "id".into(),
            fields: Vec::new(),
            source,
        }
    }

    pub fn with_identity(mut self, field: impl Into<String>) -> Self {
        self.identity_field = field.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::new(name, kind));
        self
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// One search index and the document types registered under it.
pub struct IndexDescriptor<O> {
    pub name: String,
    types: Vec<Arc<TypeDescriptor<O>>>,
}

impl<O> IndexDescriptor<O> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, descriptor: TypeDescriptor<O>) -> Self {
        self.types.push(Arc::new(descriptor));
        self
    }

    pub fn types(&self) -> &[Arc<TypeDescriptor<O>>] {
        &self.types
    }
}

/// (index, type) resolution over a fixed set of index descriptors.
pub struct TypeRegistry<O> {
    entries: HashMap<String, HashMap<String, Arc<TypeDescriptor<O>>>>,
}

impl<O> TypeRegistry<O> {
    pub fn from_indexes(indexes: &[IndexDescriptor<O>]) -> Self {
        let mut entries: HashMap<String, HashMap<String, Arc<TypeDescriptor<O>>>> = HashMap::new();
        for index in indexes {
            let types = entries.entry(index.name.clone()).or_default();
            for descriptor in index.types() {
                types.insert(descriptor.name.clone(), Arc::clone(descriptor));
            }
        }
        Self { entries }
    }

    pub fn resolve(&self, index: &str, type_name: &str) -> Option<&Arc<TypeDescriptor<O>>> {
        self.entries.get(index)?.get(type_name)
    }
}
