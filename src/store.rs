use std::collections::HashMap;

use anyhow::Result;

/// Load-by-ids capability of the backing data store.
///
/// One call resolves a batch of hit identities for a single document
/// type to live domain objects. Ids missing from the returned map are
/// treated as not found, never as an error.
pub trait ObjectSource<O>: Send + Sync {
    fn load_many(&self, type_name: &str, ids: &[String]) -> Result<HashMap<String, O>>;
}
