use std::fmt;

use url::form_urlencoded;

use crate::types::CustomFieldId;

/// Wire property/link key for a custom field, derived from its identity.
pub fn property_key(id: CustomFieldId) -> String {
    format!("customField{id}")
}

/// Builders for hrefs under a versioned API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    root: String,
}

impl ApiPaths {
    /// API version segment expected by [`parse_resource_id`].
    pub const VERSION: &'static str = "3";

    pub fn v3() -> Self {
        Self {
            root: format!("/api/v{}", Self::VERSION),
        }
    }

    pub fn user(&self, id: impl fmt::Display) -> String {
        format!("{}/users/{}", self.root, id)
    }

    pub fn version(&self, id: impl fmt::Display) -> String {
        format!("{}/versions/{}", self.root, id)
    }

    /// String-object hrefs carry the option id in the path and, when known,
    /// the human-readable label in the query.
    pub fn string_object(&self, label: Option<&str>, id: impl fmt::Display) -> String {
        match label {
            Some(label) => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("value", label)
                    .finish();
                format!("{}/string_objects/{}?{}", self.root, id, query)
            }
            None => format!("{}/string_objects/{}", self.root, id),
        }
    }

    /// Collection of users assignable within one project.
    pub fn available_assignees(&self, project_id: impl fmt::Display) -> String {
        format!("{}/projects/{}/available_assignees", self.root, project_id)
    }
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self::v3()
    }
}

/// Extract the resource id from an href of the shape
/// `/api/v<version>/<namespace>/<id>`, requiring the expected API version and
/// namespace. Query strings and fragments are ignored. Returns `None` for
/// anything that does not match.
pub fn parse_resource_id(href: &str, expected_namespace: &str, expected_version: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

    match segments.as_slice() {
        ["api", version, namespace, id]
            if version.strip_prefix('v') == Some(expected_version)
                && *namespace == expected_namespace
                && !id.is_empty() =>
        {
            Some((*id).to_string())
        }
        _ => None,
    }
}
