use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ItemId);

/// A persisted row of the item table. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

/// Field overrides for a partial update. `None` and empty strings keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemChanges {
    pub fn new(name: Option<&str>, description: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            description: description.map(str::to_owned),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|value| !value.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.name().is_none() && self.description().is_none()
    }
}
