//! Persistence seam for stored custom values and option maintenance.
//!
//! The serialization layer itself never writes; the operations here are the
//! maintenance tasks that must stay consistent with it: deleting a list
//! option cascades over the stored values naming it, and both steps run as
//! one transactional unit.

use std::borrow::Cow;
use std::sync::Mutex;

use tracing::debug;

use crate::errors::WireError;
use crate::types::{CustomFieldId, CustomOption, CustomValue, ResourceId};

/// Mutations available inside one [`CustomValueStore::transaction`] unit.
pub trait StoreOps {
    /// Delete every stored value of the field whose raw value equals `raw`.
    /// Returns how many were removed.
    fn delete_values_matching(&mut self, field_id: CustomFieldId, raw: &str) -> usize;

    /// Delete one option of a list field, returning the removed option.
    fn delete_option(&mut self, field_id: CustomFieldId, option_id: ResourceId) -> Result<CustomOption, WireError>;

    /// Delete a custom field definition. Fails while stored values still
    /// reference the field.
    fn destroy_field(&mut self, field_id: CustomFieldId) -> Result<(), WireError>;
}

/// A store of custom values and options. `transaction` must execute the
/// closure as a single atomic unit: all of its mutations or none.
pub trait CustomValueStore {
    fn transaction<R, F>(&self, work: F) -> Result<R, WireError>
    where
        F: FnOnce(&mut dyn StoreOps) -> Result<R, WireError>;
}

/// Delete one list option together with every stored value referencing it.
///
/// The values go first, then the option; a missing option rolls the whole
/// unit back. Returns the number of values removed.
pub fn delete_option_cascade<S>(store: &S, field_id: CustomFieldId, option_id: ResourceId) -> Result<usize, WireError>
where
    S: CustomValueStore,
{
    store.transaction(|ops| {
        let removed = ops.delete_values_matching(field_id, &option_id.to_string());
        let option = ops.delete_option(field_id, option_id)?;
        debug!(option = %option.value, removed, "deleted custom option and its occurrences");
        Ok(removed)
    })
}

/// Destroy a custom field definition.
///
/// Any failure surfaces as a user-facing advisory message; the underlying
/// fault is logged, not propagated.
pub fn destroy_custom_field<S>(store: &S, field_id: CustomFieldId) -> Result<(), WireError>
where
    S: CustomValueStore,
{
    store
        .transaction(|ops| ops.destroy_field(field_id))
        .map_err(|err| {
            debug!(field_id, error = %err, "custom field destroy failed");
            WireError::advisory("The custom field could not be deleted.")
        })
}

/// In-memory reference store. A single mutex serializes transactions; the
/// state is snapshotted on entry and only committed when the closure
/// succeeds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default, Clone)]
struct StoreState {
    options: Vec<(CustomFieldId, CustomOption)>,
    values: Vec<CustomValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_option(&self, field_id: CustomFieldId, option: CustomOption) {
        self.state.lock().unwrap().options.push((field_id, option));
    }

    pub fn add_value(&self, value: CustomValue) {
        self.state.lock().unwrap().values.push(value);
    }

    pub fn values_for(&self, field_id: CustomFieldId) -> Vec<CustomValue> {
        self.state
            .lock()
            .unwrap()
            .values
            .iter()
            .filter(|value| value.field_id == field_id)
            .cloned()
            .collect()
    }

    pub fn options_for(&self, field_id: CustomFieldId) -> Vec<CustomOption> {
        self.state
            .lock()
            .unwrap()
            .options
            .iter()
            .filter(|(owner, _)| *owner == field_id)
            .map(|(_, option)| option.clone())
            .collect()
    }
}

impl StoreOps for StoreState {
    fn delete_values_matching(&mut self, field_id: CustomFieldId, raw: &str) -> usize {
        let before = self.values.len();
        self.values
            .retain(|value| !(value.field_id == field_id && value.value.as_deref() == Some(raw)));
        before - self.values.len()
    }

    fn delete_option(&mut self, field_id: CustomFieldId, option_id: ResourceId) -> Result<CustomOption, WireError> {
        let position = self
            .options
            .iter()
            .position(|(owner, option)| *owner == field_id && option.id == option_id)
            .ok_or(WireError::NotFound {
                entity_id: Some(option_id.to_string()),
            })?;
        Ok(self.options.remove(position).1)
    }

    fn destroy_field(&mut self, field_id: CustomFieldId) -> Result<(), WireError> {
        if self.values.iter().any(|value| value.field_id == field_id) {
            return Err(WireError::configuration(Cow::Owned(format!(
                "custom field {field_id} is still in use"
            ))));
        }
        self.options.retain(|(owner, _)| *owner != field_id);
        Ok(())
    }
}

impl CustomValueStore for MemoryStore {
    fn transaction<R, F>(&self, work: F) -> Result<R, WireError>
    where
        F: FnOnce(&mut dyn StoreOps) -> Result<R, WireError>,
    {
        let mut state = self.state.lock().unwrap();
        let mut staged = state.clone();
        let result = work(&mut staged)?;
        *state = staged;
        Ok(result)
    }
}
