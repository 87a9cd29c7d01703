//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod field;
pub mod settings;
pub mod device;
pub mod annotations;

pub use field::{Field, FieldId, FieldKind, FieldList, FieldListError, FieldPatch, FieldValidation, DEFAULT_OPTIONS};
pub use settings::{FormSettings, ThemeColors};
pub use device::DeviceType;
pub use annotations::ResponseAnnotations;

/// Identifier value object for entities
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
