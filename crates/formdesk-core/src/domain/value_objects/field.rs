//! Field Value Objects
//!
//! Field definitions and the ordered field list edited by the form builder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::domain::services::reorder::move_item;

/// Options seeded into a choice field that has none
pub const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

/// Client-generated field identifier
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new() -> Self {
        Self(format!("field_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of field kinds the builder can place on a form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Url,
    Date,
    Checkbox,
    Radio,
    Select,
    Rating,
    File,
    Image,
}

impl FieldKind {
    pub const ALL: [FieldKind; 13] = [
        Self::Text,
        Self::Textarea,
        Self::Email,
        Self::Phone,
        Self::Number,
        Self::Url,
        Self::Date,
        Self::Checkbox,
        Self::Radio,
        Self::Select,
        Self::Rating,
        Self::File,
        Self::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Number => "number",
            Self::Url => "url",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Rating => "rating",
            Self::File => "file",
            Self::Image => "image",
        }
    }

    /// Label given to a freshly appended field
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Text => "Text Field",
            Self::Textarea => "Long Text",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Number => "Number",
            Self::Url => "Website",
            Self::Date => "Date",
            Self::Checkbox => "Checkboxes",
            Self::Radio => "Multiple Choice",
            Self::Select => "Dropdown",
            Self::Rating => "Rating",
            Self::File => "File Upload",
            Self::Image => "Image Upload",
        }
    }

    /// Whether the kind carries a list of options
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio | Self::Select)
    }

    /// Whether submitted values are free text subject to length bounds
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Textarea | Self::Email | Self::Phone | Self::Url
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown field kind: {}", s))
    }
}

/// Optional bounds checked at submission time
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
}

/// One input element definition within a form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub validation: FieldValidation,
}

impl Field {
    /// Create a field of the given kind with its default label and options
    pub fn new(kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(),
            kind,
            label: kind.default_label().to_string(),
            placeholder: None,
            required: false,
            options: if kind.has_options() { default_options() } else { vec![] },
            validation: FieldValidation::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self.normalize_options();
        self
    }

    /// Shallow-merge a patch into the field
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = if placeholder.is_empty() { None } else { Some(placeholder) };
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(validation) = patch.validation {
            self.validation = validation;
        }
        self.normalize_options();
    }

    /// Copy with a fresh id and a "(Copy)" label
    pub fn duplicate(&self) -> Self {
        Self {
            id: FieldId::new(),
            label: format!("{} (Copy)", self.label),
            ..self.clone()
        }
    }

    // Options exist only on choice kinds, and choice kinds always have some.
    fn normalize_options(&mut self) {
        if !self.kind.has_options() {
            self.options.clear();
        } else if self.options.is_empty() {
            self.options = default_options();
        }
    }
}

fn default_options() -> Vec<String> {
    DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect()
}

/// Partial update for a field; `None` leaves the attribute untouched
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPatch {
    #[serde(rename = "type")]
    pub kind: Option<FieldKind>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub validation: Option<FieldValidation>,
}

/// Why a submitted field list was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldListError {
    #[error("Field ids must not be blank")]
    BlankId,

    #[error("Field id {0} is used more than once")]
    DuplicateId(FieldId),
}

/// Ordered list of fields for one form
///
/// Ids are unique and non-blank, and options follow the field kind. Every
/// editing operation is total: unknown ids and out-of-range indices leave
/// the list unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Field>")]
pub struct FieldList(Vec<Field>);

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from client-supplied fields, normalizing their options
    pub fn from_fields(fields: Vec<Field>) -> Result<Self, FieldListError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(fields.len());
        for mut field in fields {
            if field.id.as_str().trim().is_empty() {
                return Err(FieldListError::BlankId);
            }
            if !seen.insert(field.id.clone()) {
                return Err(FieldListError::DuplicateId(field.id));
            }
            field.normalize_options();
            normalized.push(field);
        }
        Ok(Self(normalized))
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.0.iter().find(|f| &f.id == id)
    }

    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.0.iter().position(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    /// Append a new field of the given kind
    pub fn append(&mut self, kind: FieldKind) -> &Field {
        self.push(Field::new(kind))
    }

    /// Append an already-built field
    pub fn push(&mut self, field: Field) -> &Field {
        self.0.push(field);
        let last = self.0.len() - 1;
        &self.0[last]
    }

    /// Merge a patch into the field with the given id
    pub fn update(&mut self, id: &FieldId, patch: FieldPatch) -> bool {
        match self.0.iter_mut().find(|f| &f.id == id) {
            Some(field) => {
                field.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &FieldId) -> Option<Field> {
        self.position(id).map(|index| self.0.remove(index))
    }

    /// Insert a copy of the field directly after it and return the copy's id
    pub fn duplicate(&mut self, id: &FieldId) -> Option<FieldId> {
        let index = self.position(id)?;
        let copy = self.0[index].duplicate();
        let copy_id = copy.id.clone();
        self.0.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Move the field at `from` to `to`
    pub fn move_field(&mut self, from: usize, to: usize) {
        let fields = std::mem::take(&mut self.0);
        self.0 = move_item(fields, from, to);
    }

}

impl TryFrom<Vec<Field>> for FieldList {
    type Error = FieldListError;

    fn try_from(fields: Vec<Field>) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
