use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::representer::{FieldEntry, RepresenterShape};
use crate::types::CustomFieldId;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct ConfigKey {
    customizable_type: &'static str,
    shape: RepresenterShape,
    field_ids: Vec<CustomFieldId>,
}

static CONFIGS: OnceLock<RwLock<HashMap<ConfigKey, Arc<Vec<FieldEntry>>>>> = OnceLock::new();

fn configs() -> &'static RwLock<HashMap<ConfigKey, Arc<Vec<FieldEntry>>>> {
    CONFIGS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Look up a previously derived entry list. Derived configurations are pure,
/// so any hit is as good as rebuilding.
pub fn cached(
    customizable_type: &'static str,
    shape: RepresenterShape,
    field_ids: &[CustomFieldId],
) -> Option<Arc<Vec<FieldEntry>>> {
    let key = ConfigKey {
        customizable_type,
        shape,
        field_ids: field_ids.to_vec(),
    };
    configs().read().unwrap().get(&key).cloned()
}

/// Store a freshly derived entry list and hand back the shared copy.
pub fn remember(
    customizable_type: &'static str,
    shape: RepresenterShape,
    field_ids: Vec<CustomFieldId>,
    entries: Vec<FieldEntry>,
) -> Arc<Vec<FieldEntry>> {
    let key = ConfigKey {
        customizable_type,
        shape,
        field_ids,
    };
    let entries = Arc::new(entries);
    configs().write().unwrap().insert(key, Arc::clone(&entries));
    entries
}
