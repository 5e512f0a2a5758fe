//! Typed hydration over raw search-engine responses.
//!
//! Sits between query execution (builds and sends the search request)
//! and application code: takes the raw response mapping and exposes a
//! stable typed view of the matched documents, plus optional loading
//! of the live domain objects they refer to.

pub mod error;
pub mod registry;
pub mod response;
pub mod scope;
pub mod store;

pub use error::HydrateError;
pub use registry::{FieldKind, FieldSpec, IndexDescriptor, TypeDescriptor, TypeRegistry};
pub use response::{Collection, Response, SuggestEntry, TypedResult};
pub use scope::{LoadOptions, Scope, TypeLoadOptions};
pub use store::ObjectSource;
