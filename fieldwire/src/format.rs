use std::fmt;
use std::str::FromStr;

use crate::errors::WireError;

/// The fixed set of custom field formats.
///
/// A field's format never changes for the lifetime of the field; it decides
/// whether the value renders as an inline property or a hyperlink, which wire
/// type name the schema reports, and which API namespace hrefs live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFormat {
    String,
    Text,
    Int,
    Float,
    Date,
    Bool,
    User,
    Version,
    List,
}

/// Sub-resource representer used when a link-shaped value is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    User,
    Version,
    StringObject,
}

impl FieldFormat {
    pub const ALL: [FieldFormat; 9] = [
        FieldFormat::String,
        FieldFormat::Text,
        FieldFormat::Int,
        FieldFormat::Float,
        FieldFormat::Date,
        FieldFormat::Bool,
        FieldFormat::User,
        FieldFormat::Version,
        FieldFormat::List,
    ];

    /// Wire-level type name reported in schema descriptors.
    pub fn wire_type(self) -> &'static str {
        match self {
            FieldFormat::String => "String",
            FieldFormat::Text => "Formattable",
            FieldFormat::Int => "Integer",
            FieldFormat::Float => "Float",
            FieldFormat::Date => "Date",
            FieldFormat::Bool => "Boolean",
            FieldFormat::User => "User",
            FieldFormat::Version => "Version",
            FieldFormat::List => "StringObject",
        }
    }

    /// Link-shaped formats render under `_links` rather than as inline properties.
    pub fn is_link(self) -> bool {
        matches!(self, FieldFormat::User | FieldFormat::Version | FieldFormat::List)
    }

    /// API namespace that hrefs of this format live under.
    pub fn namespace(self) -> Option<&'static str> {
        match self {
            FieldFormat::User => Some("users"),
            FieldFormat::Version => Some("versions"),
            FieldFormat::List => Some("string_objects"),
            _ => None,
        }
    }

    /// Which sub-resource representer embeds values of this format.
    pub fn embed(self) -> Option<EmbedKind> {
        match self {
            FieldFormat::User => Some(EmbedKind::User),
            FieldFormat::Version => Some(EmbedKind::Version),
            FieldFormat::List => Some(EmbedKind::StringObject),
            _ => None,
        }
    }

    /// Stored format token, the inverse of `FromStr`.
    pub fn as_token(self) -> &'static str {
        match self {
            FieldFormat::String => "string",
            FieldFormat::Text => "text",
            FieldFormat::Int => "int",
            FieldFormat::Float => "float",
            FieldFormat::Date => "date",
            FieldFormat::Bool => "bool",
            FieldFormat::User => "user",
            FieldFormat::Version => "version",
            FieldFormat::List => "list",
        }
    }
}

impl FromStr for FieldFormat {
    type Err = WireError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "string" => Ok(FieldFormat::String),
            "text" => Ok(FieldFormat::Text),
            "int" => Ok(FieldFormat::Int),
            "float" => Ok(FieldFormat::Float),
            "date" => Ok(FieldFormat::Date),
            "bool" => Ok(FieldFormat::Bool),
            "user" => Ok(FieldFormat::User),
            "version" => Ok(FieldFormat::Version),
            "list" => Ok(FieldFormat::List),
            other => Err(WireError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
