//! Link value resolution for link-shaped custom fields.
//!
//! Links are built from the raw stored value, not the generated accessor, so
//! an href is still produced when the id no longer belongs to an existing
//! target (form payloads rely on that); only the title collapses to `None`.

use serde::Serialize;
use serde_json::{Value, json};

use crate::format::{EmbedKind, FieldFormat};
use crate::paths::ApiPaths;
use crate::types::{CustomField, Customizable, ResourceDirectory, ResourceRef};
use crate::value::{TypedValue, typed_value};

/// A rendered hyperlink. Unset values render as `{"href": null, "title": null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkObject {
    pub href: Option<String>,
    pub title: Option<String>,
}

impl LinkObject {
    pub fn new(href: impl Into<String>, title: impl Into<Option<String>>) -> Self {
        Self {
            href: Some(href.into()),
            title: title.into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            href: None,
            title: None,
        }
    }
}

/// Resolve the stored value(s) of a link-shaped field into renderable links,
/// one per stored value, in stored order.
pub fn resolve_links<C>(
    field: &CustomField,
    customizable: &C,
    directory: &dyn ResourceDirectory,
    paths: &ApiPaths,
) -> Vec<LinkObject>
where
    C: Customizable + ?Sized,
{
    debug_assert!(field.format.is_link());

    customizable
        .custom_values_for(field)
        .iter()
        .map(|value| match value.raw() {
            Some(raw) => link_for_raw(field, raw, directory, paths),
            None => LinkObject::empty(),
        })
        .collect()
}

/// Resolve a single-valued link field: the first stored value, or the empty
/// link when nothing is stored.
pub fn resolve_single<C>(
    field: &CustomField,
    customizable: &C,
    directory: &dyn ResourceDirectory,
    paths: &ApiPaths,
) -> LinkObject
where
    C: Customizable + ?Sized,
{
    resolve_links(field, customizable, directory, paths)
        .into_iter()
        .next()
        .unwrap_or_else(LinkObject::empty)
}

fn link_for_raw(field: &CustomField, raw: &str, directory: &dyn ResourceDirectory, paths: &ApiPaths) -> LinkObject {
    let title = typed_value(field, Some(raw), directory).map(|typed| typed.title());

    let href = match field.format {
        FieldFormat::User => paths.user(raw),
        FieldFormat::Version => paths.version(raw),
        FieldFormat::List => paths.string_object(title.as_deref(), raw),
        _ => return LinkObject::empty(),
    };

    LinkObject {
        href: Some(href),
        title,
    }
}

/// Full nested representation of a resolved link target, for `_embedded`
/// blocks and allowed-values schema enumeration.
pub fn embedded_resource(kind: EmbedKind, resource: &ResourceRef, paths: &ApiPaths) -> Value {
    match kind {
        EmbedKind::User => json!({
            "_type": "User",
            "id": resource.id,
            "name": resource.name,
            "_links": { "self": { "href": paths.user(resource.id), "title": resource.name } }
        }),
        EmbedKind::Version => json!({
            "_type": "Version",
            "id": resource.id,
            "name": resource.name,
            "_links": { "self": { "href": paths.version(resource.id), "title": resource.name } }
        }),
        EmbedKind::StringObject => embedded_string_object(&resource.name, resource.id, paths),
    }
}

/// String-object sub-resource for one list option label.
pub fn embedded_string_object(label: &str, id: impl std::fmt::Display, paths: &ApiPaths) -> Value {
    json!({
        "_type": "StringObject",
        "value": label,
        "_links": { "self": { "href": paths.string_object(Some(label), id) } }
    })
}

/// The wire shape of a resolved link target an embedding representer renders,
/// if the target resolves at all.
pub fn embedded_value(field: &CustomField, raw: &str, directory: &dyn ResourceDirectory, paths: &ApiPaths) -> Option<Value> {
    let kind = field.format.embed()?;
    match typed_value(field, Some(raw), directory)? {
        TypedValue::Resource(resource) => Some(embedded_resource(kind, &resource, paths)),
        TypedValue::String(label) => {
            let option = field.option_for_raw(raw)?;
            Some(embedded_string_object(&label, option.id, paths))
        }
        _ => None,
    }
}
