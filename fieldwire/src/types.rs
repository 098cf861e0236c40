use crate::format::FieldFormat;

/// Identity of a custom field definition.
pub type CustomFieldId = u64;

/// Identity of a referencable resource (user, version, custom option).
pub type ResourceId = u64;

/// A user-defined attribute definition with a fixed format.
///
/// Immutable for the duration of a request; builders clone what they keep.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomField {
    pub id: CustomFieldId,
    pub name: String,
    pub format: FieldFormat,
    pub is_required: bool,
    /// Only meaningful for the list/user/version formats.
    pub multi_value: bool,
    pub default_value: Option<String>,
    /// A configured length of zero or less counts as unset.
    pub min_length: i32,
    pub max_length: i32,
    pub regular_expression: Option<String>,
    /// Allowed values for list-format fields.
    pub options: Vec<CustomOption>,
}

impl CustomField {
    pub fn new(id: CustomFieldId, name: impl Into<String>, format: FieldFormat) -> Self {
        Self {
            id,
            name: name.into(),
            format,
            is_required: false,
            multi_value: false,
            default_value: None,
            min_length: 0,
            max_length: 0,
            regular_expression: None,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn multi_valued(mut self) -> Self {
        self.multi_value = true;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_length_bounds(mut self, min: i32, max: i32) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_regular_expression(mut self, pattern: impl Into<String>) -> Self {
        self.regular_expression = Some(pattern.into());
        self
    }

    pub fn with_options(mut self, options: Vec<CustomOption>) -> Self {
        self.options = options;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Find the option a raw stored value names, if it still exists.
    /// List raw values are the decimal string form of an option id.
    pub fn option_for_raw(&self, raw: &str) -> Option<&CustomOption> {
        let id: ResourceId = raw.trim().parse().ok()?;
        self.options.iter().find(|option| option.id == id)
    }
}

/// One selectable choice of a list-format custom field.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOption {
    pub id: ResourceId,
    /// Human-readable label.
    pub value: String,
    pub position: u32,
    pub default_value: bool,
}

impl CustomOption {
    pub fn new(id: ResourceId, value: impl Into<String>, position: u32) -> Self {
        Self {
            id,
            value: value.into(),
            position,
            default_value: false,
        }
    }
}

/// The raw stored value of one custom field on one customizable.
///
/// Always representable as a string or absent; the typed value is derived,
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomValue {
    pub field_id: CustomFieldId,
    pub value: Option<String>,
}

impl CustomValue {
    pub fn new(field_id: CustomFieldId, value: impl Into<Option<String>>) -> Self {
        Self {
            field_id,
            value: value.into(),
        }
    }

    /// The raw value, unless it is absent or blank.
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref().map(str::trim).filter(|raw| !raw.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.raw().is_none()
    }
}

/// A live referencable resource with a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRef {
    pub id: ResourceId,
    pub name: String,
}

impl ResourceRef {
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One value a customizable may assign to a field, used for schema enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedValue {
    /// A live user or version.
    Resource(ResourceRef),
    /// A list option: raw option id plus its label.
    Option { id: ResourceId, label: String },
}

/// Read-only directory resolving link-shaped raw values to live targets.
///
/// Lookups tolerate missing targets; a raw value whose target is gone simply
/// resolves to `None`.
pub trait ResourceDirectory {
    fn find_user(&self, id: ResourceId) -> Option<ResourceRef>;
    fn find_version(&self, id: ResourceId) -> Option<ResourceRef>;
}

/// Any domain entity that can carry custom field values.
///
/// Staged values are pending assignments a later persistence step picks up;
/// staging the same field twice replaces the earlier staging (last call wins).
pub trait Customizable {
    /// Stable type tag, used as a cache key component for derived configurations.
    fn type_name(&self) -> &'static str;

    /// The custom fields available on this entity, in display order.
    fn available_custom_fields(&self) -> Vec<CustomField>;

    /// Stored values for one field: zero, one, or many depending on `multi_value`.
    fn custom_values_for(&self, field: &CustomField) -> Vec<CustomValue>;

    /// The values assignable to one field, for schema enumeration.
    fn assignable_values(&self, field: &CustomField) -> Vec<AllowedValue>;

    /// Project context backing the allowed-values link of user-format fields.
    fn project_id(&self) -> Option<ResourceId> {
        None
    }

    /// Stage pending raw values for one field prior to persistence.
    fn stage_values(&mut self, field_id: CustomFieldId, values: Vec<Option<String>>);

    /// Read back what `stage_values` recorded for one field, if anything.
    fn staged_values(&self, field_id: CustomFieldId) -> Option<&[Option<String>]>;
}
