//! Fieldwire core library.
//!
//! Derives wire-level representations for user-defined custom fields: a base
//! representation is extended with one entry per field, producing a value
//! shape, a schema (metadata) shape, and two patch shapes (scalar properties
//! and links). Inbound patches resolve back into pending raw-value
//! assignments the hosting entity persists later.
//!
//! The entity carrying the fields implements [`Customizable`]; live link
//! targets resolve through a [`ResourceDirectory`]; stored values and options
//! are maintained behind [`store::CustomValueStore`]. Building and rendering
//! are synchronous and side-effect-free.

pub mod errors;
pub mod format;
pub mod links;
pub mod patch;
pub mod paths;
pub mod registry;
pub mod representer;
pub mod schema;
pub mod store;
pub mod types;
pub mod value;

pub use errors::{ValidationError, ValidationIssue, ValidationResult, WireError, codes};
pub use format::{EmbedKind, FieldFormat};
pub use links::{LinkObject, resolve_links, resolve_single};
pub use paths::{ApiPaths, parse_resource_id, property_key};
pub use representer::{DerivedRepresenter, EntryKind, FieldEntry, RepresenterShape};
pub use schema::SchemaEntry;
pub use store::{CustomValueStore, MemoryStore, StoreOps, delete_option_cascade, destroy_custom_field};
pub use types::{
    AllowedValue, CustomField, CustomFieldId, CustomOption, CustomValue, Customizable, ResourceDirectory,
    ResourceId, ResourceRef,
};
pub use value::{Formattable, TypedValue, typed_value, validate};
