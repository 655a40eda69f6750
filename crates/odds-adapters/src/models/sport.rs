use serde::{Deserialize, Serialize};

/// One row of a provider's sport taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportEntry {
    /// Provider-specific sport identifier
    pub id: String,

    /// Human-readable sport name as the provider spells it
    pub name: String,
}

impl SportEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
