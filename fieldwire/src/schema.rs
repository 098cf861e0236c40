//! Schema (metadata) descriptors for custom fields: type, constraints, and
//! allowed values, separate from the values themselves.

use serde_json::{Map, Value, json};

use crate::errors::WireError;
use crate::format::{EmbedKind, FieldFormat};
use crate::links::{embedded_resource, embedded_string_object};
use crate::paths::ApiPaths;
use crate::types::{AllowedValue, CustomField, Customizable};

/// Static schema metadata for one custom field.
///
/// Pure configuration: safe to cache per (customizable type, field set).
/// Allowed values are row-level data and are enumerated at render time from
/// the customizable passed in, never captured here.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub wire_type: String,
    pub name: String,
    pub required: bool,
    pub writable: bool,
    pub has_default: bool,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub regular_expression: Option<String>,
}

impl SchemaEntry {
    /// Build the schema entry for a field.
    ///
    /// Link-shaped formats enumerate assignable values, which requires the
    /// customizable context; omitting it is a caller bug and fails eagerly
    /// with [`WireError::Configuration`].
    pub fn build<C>(field: &CustomField, customizable: Option<&C>) -> Result<Self, WireError>
    where
        C: Customizable + ?Sized,
    {
        if field.format.is_link() {
            let customizable = customizable.ok_or_else(|| {
                WireError::configuration("schema for link-shaped custom fields requires a customizable context")
            })?;
            if field.format == FieldFormat::User && customizable.project_id().is_none() {
                return Err(WireError::configuration(
                    "user custom field schema requires a customizable with a project",
                ));
            }
        }

        let wire_type = match field.format {
            FieldFormat::List if field.multi_value => format!("[]{}", field.format.wire_type()),
            format => format.wire_type().to_string(),
        };

        Ok(Self {
            wire_type,
            name: field.name.clone(),
            required: field.is_required,
            writable: true,
            has_default: field.has_default(),
            min_length: positive(field.min_length),
            max_length: positive(field.max_length),
            regular_expression: field.regular_expression.clone(),
        })
    }

    /// Render the descriptor, enumerating allowed values from the customizable
    /// for the user/version/list formats.
    pub fn render<C>(&self, field: &CustomField, customizable: &C, paths: &ApiPaths) -> Value
    where
        C: Customizable + ?Sized,
    {
        let mut doc = Map::new();
        doc.insert("type".into(), json!(self.wire_type));
        doc.insert("name".into(), json!(self.name));
        doc.insert("required".into(), json!(self.required));
        doc.insert("writable".into(), json!(self.writable));
        doc.insert("hasDefault".into(), json!(self.has_default));

        if let Some(min) = self.min_length {
            doc.insert("minLength".into(), json!(min));
        }
        if let Some(max) = self.max_length {
            doc.insert("maxLength".into(), json!(max));
        }
        if let Some(pattern) = &self.regular_expression {
            doc.insert("regularExpression".into(), json!(pattern));
        }

        match field.format {
            FieldFormat::User => {
                if let Some(project_id) = customizable.project_id() {
                    let href = paths.available_assignees(project_id);
                    doc.insert("_links".into(), json!({ "allowedValues": { "href": href } }));
                }
            }
            FieldFormat::Version | FieldFormat::List => {
                let allowed = customizable.assignable_values(field);
                let links: Vec<Value> = allowed.iter().map(|value| allowed_link(value, paths)).collect();
                let embedded: Vec<Value> = allowed.iter().map(|value| allowed_embedded(field, value, paths)).collect();
                doc.insert("_links".into(), json!({ "allowedValues": links }));
                doc.insert("_embedded".into(), json!({ "allowedValues": embedded }));
            }
            _ => {}
        }

        Value::Object(doc)
    }
}

/// How one allowed value turns into a `{href, title}` pair.
fn allowed_link(value: &AllowedValue, paths: &ApiPaths) -> Value {
    match value {
        AllowedValue::Resource(resource) => {
            json!({ "href": paths.version(resource.id), "title": resource.name })
        }
        AllowedValue::Option { id, label } => {
            json!({ "href": paths.string_object(Some(label.as_str()), id), "title": label })
        }
    }
}

fn allowed_embedded(field: &CustomField, value: &AllowedValue, paths: &ApiPaths) -> Value {
    match value {
        AllowedValue::Resource(resource) => {
            let kind = field.format.embed().unwrap_or(EmbedKind::StringObject);
            embedded_resource(kind, resource, paths)
        }
        AllowedValue::Option { id, label } => embedded_string_object(label, id, paths),
    }
}

fn positive(length: i32) -> Option<i32> {
    (length > 0).then_some(length)
}
