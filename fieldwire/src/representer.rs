//! Derived representers: a base representation extended with one wire entry
//! per custom field.
//!
//! The reference behavior of subclassing a representer per call is replaced by
//! a builder that produces an immutable field-entry list consumed by one
//! generic renderer; entry lists are pure configuration and are cached per
//! (customizable type, field set, shape).

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::WireError;
use crate::format::FieldFormat;
use crate::links::{embedded_value, resolve_links, resolve_single};
use crate::paths::{ApiPaths, property_key};
use crate::registry;
use crate::schema::SchemaEntry;
use crate::types::{CustomField, Customizable, ResourceDirectory};
use crate::value::typed_value;

/// Which derived shape a representer was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepresenterShape {
    Value { embed_links: bool },
    Schema,
    PropertyPatch,
    LinkPatch,
}

/// One injected wire entry, derived from a single custom field.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    /// Wire property/link key, `customField<id>`.
    pub key: String,
    pub field: CustomField,
    pub kind: EntryKind,
}

#[derive(Debug, Clone)]
pub enum EntryKind {
    /// Inline scalar property (non-link formats).
    Property,
    /// Entry under `_links`, optionally mirrored as an `_embedded` sub-resource.
    Link { embed: bool },
    /// Schema descriptor entry.
    Schema(SchemaEntry),
}

/// A base representation extended with one entry per custom field, for one of
/// the four derived shapes.
#[derive(Debug, Clone)]
pub struct DerivedRepresenter {
    base: Value,
    entries: Arc<Vec<FieldEntry>>,
    paths: ApiPaths,
}

impl DerivedRepresenter {
    /// Derive a value representer over every available custom field: link
    /// formats render under `_links` (optionally embedded), the rest as
    /// inline properties.
    ///
    /// Multi-valued list fields are never embedded.
    pub fn value<C>(base: Value, customizable: &C, embed_links: bool) -> Self
    where
        C: Customizable + ?Sized,
    {
        let shape = RepresenterShape::Value { embed_links };
        let fields = customizable.available_custom_fields();
        let ids = field_ids(&fields);

        let entries = match registry::cached(customizable.type_name(), shape, &ids) {
            Some(entries) => entries,
            None => {
                let built = fields
                    .iter()
                    .map(|field| {
                        let kind = if field.format.is_link() {
                            let embed =
                                embed_links && !(field.format == FieldFormat::List && field.multi_value);
                            EntryKind::Link { embed }
                        } else {
                            EntryKind::Property
                        };
                        entry(field, kind)
                    })
                    .collect();
                registry::remember(customizable.type_name(), shape, ids, built)
            }
        };

        Self::with_entries(base, entries)
    }

    /// Derive a schema representer over every available custom field.
    ///
    /// Fails with [`WireError::Configuration`] when a link-shaped field lacks
    /// the context it needs (see [`SchemaEntry::build`]).
    pub fn schema<C>(base: Value, customizable: &C) -> Result<Self, WireError>
    where
        C: Customizable + ?Sized,
    {
        let shape = RepresenterShape::Schema;
        let fields = customizable.available_custom_fields();
        let ids = field_ids(&fields);

        let entries = match registry::cached(customizable.type_name(), shape, &ids) {
            Some(entries) => entries,
            None => {
                let mut built = Vec::with_capacity(fields.len());
                for field in &fields {
                    let schema = SchemaEntry::build(field, Some(customizable))?;
                    built.push(entry(field, EntryKind::Schema(schema)));
                }
                registry::remember(customizable.type_name(), shape, ids, built)
            }
        };

        Ok(Self::with_entries(base, entries))
    }

    /// Derive a patch representer restricted to the non-link (property) subset.
    pub fn property_patch<C>(base: Value, customizable: &C) -> Self
    where
        C: Customizable + ?Sized,
    {
        Self::patch_subset(base, customizable, RepresenterShape::PropertyPatch)
    }

    /// Derive a patch representer restricted to the link subset.
    pub fn link_patch<C>(base: Value, customizable: &C) -> Self
    where
        C: Customizable + ?Sized,
    {
        Self::patch_subset(base, customizable, RepresenterShape::LinkPatch)
    }

    fn patch_subset<C>(base: Value, customizable: &C, shape: RepresenterShape) -> Self
    where
        C: Customizable + ?Sized,
    {
        let want_links = shape == RepresenterShape::LinkPatch;
        let fields = customizable.available_custom_fields();
        let ids = field_ids(&fields);

        let entries = match registry::cached(customizable.type_name(), shape, &ids) {
            Some(entries) => entries,
            None => {
                let built = fields
                    .iter()
                    .filter(|field| field.format.is_link() == want_links)
                    .map(|field| {
                        let kind = if want_links {
                            EntryKind::Link { embed: false }
                        } else {
                            EntryKind::Property
                        };
                        entry(field, kind)
                    })
                    .collect();
                registry::remember(customizable.type_name(), shape, ids, built)
            }
        };

        Self::with_entries(base, entries)
    }

    fn with_entries(base: Value, entries: Arc<Vec<FieldEntry>>) -> Self {
        Self {
            base,
            entries,
            paths: ApiPaths::v3(),
        }
    }

    /// Override the API root hrefs are built under.
    pub fn with_paths(mut self, paths: ApiPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    /// Render the full wire document: the base document plus one entry per
    /// custom field.
    pub fn render<C>(&self, customizable: &C, directory: &dyn ResourceDirectory) -> Value
    where
        C: Customizable + ?Sized,
    {
        let mut doc = match &self.base {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };

        for entry in self.entries.iter() {
            match &entry.kind {
                EntryKind::Property => {
                    doc.insert(entry.key.clone(), self.render_property(entry, customizable, directory));
                }
                EntryKind::Link { embed } => {
                    let rendered = self.render_link(entry, customizable, directory);
                    nested_block(&mut doc, "_links").insert(entry.key.clone(), rendered);

                    if *embed
                        && let Some(embedded) = self.render_embedded(entry, customizable, directory)
                    {
                        nested_block(&mut doc, "_embedded").insert(entry.key.clone(), embedded);
                    }
                }
                EntryKind::Schema(schema) => {
                    doc.insert(entry.key.clone(), schema.render(&entry.field, customizable, &self.paths));
                }
            }
        }

        Value::Object(doc)
    }

    fn render_property<C>(&self, entry: &FieldEntry, customizable: &C, directory: &dyn ResourceDirectory) -> Value
    where
        C: Customizable + ?Sized,
    {
        customizable
            .custom_values_for(&entry.field)
            .first()
            .and_then(|value| typed_value(&entry.field, value.raw(), directory))
            .map(|typed| typed.to_json())
            .unwrap_or(Value::Null)
    }

    fn render_link<C>(&self, entry: &FieldEntry, customizable: &C, directory: &dyn ResourceDirectory) -> Value
    where
        C: Customizable + ?Sized,
    {
        if entry.field.multi_value {
            let links = resolve_links(&entry.field, customizable, directory, &self.paths);
            serde_json::to_value(links).unwrap_or(Value::Array(Vec::new()))
        } else {
            let link = resolve_single(&entry.field, customizable, directory, &self.paths);
            serde_json::to_value(link).unwrap_or(Value::Null)
        }
    }

    fn render_embedded<C>(&self, entry: &FieldEntry, customizable: &C, directory: &dyn ResourceDirectory) -> Option<Value>
    where
        C: Customizable + ?Sized,
    {
        let values = customizable.custom_values_for(&entry.field);
        let mut embedded = values
            .iter()
            .filter_map(|value| value.raw())
            .filter_map(|raw| embedded_value(&entry.field, raw, directory, &self.paths));

        if entry.field.multi_value {
            let all: Vec<Value> = embedded.collect();
            (!all.is_empty()).then_some(Value::Array(all))
        } else {
            embedded.next()
        }
    }
}

fn entry(field: &CustomField, kind: EntryKind) -> FieldEntry {
    FieldEntry {
        key: property_key(field.id),
        field: field.clone(),
        kind,
    }
}

fn field_ids(fields: &[CustomField]) -> Vec<u64> {
    fields.iter().map(|field| field.id).collect()
}

fn nested_block<'a>(doc: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = doc.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut().expect("slot was just made an object")
}
