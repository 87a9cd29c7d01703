//! Owner-side response annotations
//!
//! Stars, flags and notes live outside the document store and are keyed by
//! form id. They are not authoritative: a response id may refer to a
//! response that has since been deleted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::EntityId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseAnnotations {
    starred: BTreeSet<EntityId>,
    flagged: BTreeSet<EntityId>,
    notes: BTreeMap<EntityId, String>,
}

impl ResponseAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_starred(&self, id: &EntityId) -> bool {
        self.starred.contains(id)
    }

    pub fn is_flagged(&self, id: &EntityId) -> bool {
        self.flagged.contains(id)
    }

    pub fn note(&self, id: &EntityId) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    pub fn starred_count(&self) -> usize {
        self.starred.len()
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    pub fn set_starred(&mut self, id: &EntityId, starred: bool) {
        if starred {
            self.starred.insert(id.clone());
        } else {
            self.starred.remove(id);
        }
    }

    pub fn set_flagged(&mut self, id: &EntityId, flagged: bool) {
        if flagged {
            self.flagged.insert(id.clone());
        } else {
            self.flagged.remove(id);
        }
    }

    /// Set or clear a note; blank notes clear it
    pub fn set_note(&mut self, id: &EntityId, note: Option<String>) {
        match note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            Some(note) => {
                self.notes.insert(id.clone(), note);
            }
            None => {
                self.notes.remove(id);
            }
        }
    }

    /// Drop everything recorded for a response
    pub fn forget(&mut self, id: &EntityId) {
        self.starred.remove(id);
        self.flagged.remove(id);
        self.notes.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_and_flag_toggle() {
        let mut annotations = ResponseAnnotations::new();
        let id = EntityId::new();

        annotations.set_starred(&id, true);
        annotations.set_flagged(&id, true);
        assert!(annotations.is_starred(&id));
        assert!(annotations.is_flagged(&id));

        annotations.set_starred(&id, false);
        assert!(!annotations.is_starred(&id));
        assert_eq!(annotations.flagged_count(), 1);
    }

    #[test]
    fn test_blank_note_clears() {
        let mut annotations = ResponseAnnotations::new();
        let id = EntityId::new();

        annotations.set_note(&id, Some("  follow up  ".into()));
        assert_eq!(annotations.note(&id), Some("follow up"));

        annotations.set_note(&id, Some("   ".into()));
        assert_eq!(annotations.note(&id), None);
    }

    #[test]
    fn test_forget() {
        let mut annotations = ResponseAnnotations::new();
        let id = EntityId::new();
        annotations.set_starred(&id, true);
        annotations.set_note(&id, Some("x".into()));

        annotations.forget(&id);
        assert_eq!(annotations, ResponseAnnotations::new());
    }
}
