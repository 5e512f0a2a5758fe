use thiserror::Error;

/// Faults this layer surfaces to the caller.
///
/// Absent response sections and missing backing objects are not errors
/// here; they degrade to defaults and `None` slots. Only configuration
/// mistakes and backing-store failures propagate.
#[derive(Debug, Error)]
pub enum HydrateError {
    /// A hit named an (index, type) pair with no registered
    /// descriptor. This is a setup mistake on the caller side, never a
    /// normal empty result.
    #[error("no document type registered for index `{index}`, type `{type_name}`")]
    UnknownType { index: String, type_name: String },

    /// The backing store failed while loading a batch of ids.
    #[error("backing store failed loading `{type_name}` objects")]
    Store {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },
}
