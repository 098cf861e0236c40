//! Inbound patch resolution: payload documents parsed into pending raw-value
//! assignments on the customizable.

use serde_json::Value;
use tracing::debug;

use crate::errors::{ValidationError, WireError, codes};
use crate::format::FieldFormat;
use crate::paths::{ApiPaths, parse_resource_id};
use crate::representer::{DerivedRepresenter, EntryKind, FieldEntry};
use crate::types::Customizable;

/// Resolve an inbound patch payload against a derived representer's entries,
/// staging pending raw values on the customizable.
///
/// Scalar properties are read from top-level keys, link values from `_links`
/// (a top-level link object is tolerated as well). Keys absent from the
/// payload leave the field untouched; keys the representer does not know
/// belong to the base representer and are ignored. Staging a field replaces
/// whatever was staged for it before — last call wins, no merge.
pub fn apply<C>(representer: &DerivedRepresenter, payload: &Value, customizable: &mut C) -> Result<(), WireError>
where
    C: Customizable,
{
    let Some(doc) = payload.as_object() else {
        return Err(ValidationError::single("", codes::INVALID_PAYLOAD, "expected object for patch payload").into());
    };

    for entry in representer.entries() {
        match &entry.kind {
            EntryKind::Property => {
                if let Some(value) = doc.get(&entry.key) {
                    stage_property(entry, value, customizable);
                }
            }
            EntryKind::Link { .. } => {
                let link_value = doc
                    .get("_links")
                    .and_then(|links| links.get(&entry.key))
                    .or_else(|| doc.get(&entry.key));
                if let Some(value) = link_value {
                    stage_links(entry, value, customizable);
                }
            }
            EntryKind::Schema(_) => {}
        }
    }

    Ok(())
}

/// Stage a scalar property value. The text format's `{"raw": ...}` wire shape
/// is unwrapped; a bare scalar is tolerated for it as well.
fn stage_property<C>(entry: &FieldEntry, value: &Value, customizable: &mut C)
where
    C: Customizable,
{
    let value = if entry.field.format == FieldFormat::Text {
        value.get("raw").unwrap_or(value)
    } else {
        value
    };

    let raw = match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // Arrays and objects have no scalar raw form.
        _ => return,
    };

    customizable.stage_values(entry.field.id, vec![raw]);
}

/// Stage link values. The payload is one link object or an array of them,
/// normalized to an array regardless of `multi_value`. Hrefs that do not match
/// the expected namespace and API version contribute nothing; the staging
/// assignment still runs, so a payload of only unparseable hrefs stages an
/// empty list.
fn stage_links<C>(entry: &FieldEntry, value: &Value, customizable: &mut C)
where
    C: Customizable,
{
    let Some(namespace) = entry.field.format.namespace() else {
        return;
    };

    let links: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let mut staged = Vec::new();
    for link in links {
        let Some(href) = link.get("href").and_then(Value::as_str) else {
            continue;
        };
        match parse_resource_id(href, namespace, ApiPaths::VERSION) {
            Some(id) => staged.push(Some(id)),
            None => debug!(href, namespace, "dropping link patch value with unparseable href"),
        }
    }

    customizable.stage_values(entry.field.id, staged);
}
