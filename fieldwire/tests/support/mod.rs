//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use std::collections::HashMap;

use fieldwire::{
    AllowedValue, CustomField, CustomFieldId, CustomOption, CustomValue, Customizable, FieldFormat,
    ResourceDirectory, ResourceId, ResourceRef,
};

/// Minimal customizable entity for tests: carries field definitions, stored
/// raw values, and a staging area that shadows the stored values so a staged
/// patch is visible to re-rendering.
///
/// Derived configurations are cached process-wide by type name and field ids,
/// so every test gives its entity a distinct `type_name`.
#[derive(Debug, Default)]
pub struct Work {
    type_name: &'static str,
    fields: Vec<CustomField>,
    values: HashMap<CustomFieldId, Vec<Option<String>>>,
    project: Option<ResourceId>,
    assignable: HashMap<CustomFieldId, Vec<AllowedValue>>,
    staged: HashMap<CustomFieldId, Vec<Option<String>>>,
}

impl Work {
    pub fn new(type_name: &'static str, fields: Vec<CustomField>) -> Self {
        Self {
            type_name,
            fields,
            ..Default::default()
        }
    }

    pub fn with_value(mut self, field_id: CustomFieldId, raw: impl Into<String>) -> Self {
        self.values.entry(field_id).or_default().push(Some(raw.into()));
        self
    }

    pub fn with_blank_value(mut self, field_id: CustomFieldId) -> Self {
        self.values.entry(field_id).or_default().push(None);
        self
    }

    pub fn with_project(mut self, id: ResourceId) -> Self {
        self.project = Some(id);
        self
    }

    pub fn with_assignable(mut self, field_id: CustomFieldId, values: Vec<AllowedValue>) -> Self {
        self.assignable.insert(field_id, values);
        self
    }
}

impl Customizable for Work {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn available_custom_fields(&self) -> Vec<CustomField> {
        self.fields.clone()
    }

    fn custom_values_for(&self, field: &CustomField) -> Vec<CustomValue> {
        self.values
            .get(&field.id)
            .map(|raws| raws.iter().map(|raw| CustomValue::new(field.id, raw.clone())).collect())
            .unwrap_or_default()
    }

    fn assignable_values(&self, field: &CustomField) -> Vec<AllowedValue> {
        if let Some(values) = self.assignable.get(&field.id) {
            return values.clone();
        }
        if field.format == FieldFormat::List {
            return field
                .options
                .iter()
                .map(|option| AllowedValue::Option {
                    id: option.id,
                    label: option.value.clone(),
                })
                .collect();
        }
        Vec::new()
    }

    fn project_id(&self) -> Option<ResourceId> {
        self.project
    }

    fn stage_values(&mut self, field_id: CustomFieldId, values: Vec<Option<String>>) {
        self.staged.insert(field_id, values.clone());
        self.values.insert(field_id, values);
    }

    fn staged_values(&self, field_id: CustomFieldId) -> Option<&[Option<String>]> {
        self.staged.get(&field_id).map(|values| values.as_slice())
    }
}

/// Directory of live users and versions.
#[derive(Debug, Default)]
pub struct Directory {
    users: HashMap<ResourceId, String>,
    versions: HashMap<ResourceId, String>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: ResourceId, name: &str) -> Self {
        self.users.insert(id, name.to_string());
        self
    }

    pub fn with_version(mut self, id: ResourceId, name: &str) -> Self {
        self.versions.insert(id, name.to_string());
        self
    }
}

impl ResourceDirectory for Directory {
    fn find_user(&self, id: ResourceId) -> Option<ResourceRef> {
        self.users.get(&id).map(|name| ResourceRef::new(id, name.clone()))
    }

    fn find_version(&self, id: ResourceId) -> Option<ResourceRef> {
        self.versions.get(&id).map(|name| ResourceRef::new(id, name.clone()))
    }
}

/// A list field with the options foo (id 10) and bar (id 11).
pub fn list_field(id: CustomFieldId, name: &str) -> CustomField {
    CustomField::new(id, name, FieldFormat::List).with_options(vec![
        CustomOption::new(10, "foo", 1),
        CustomOption::new(11, "bar", 2),
    ])
}
