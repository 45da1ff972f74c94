use super::ENVELOPE_VERSION;
use crate::error::{ChardexError, Result};
use crate::model::{Note, NoteDraft};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key for the notes envelope.
pub const NOTES_KEY: &str = "character_notes";

const TITLE_MAX: usize = 100;
const CONTENT_MAX: usize = 2000;
const TAGS_MAX: usize = 10;
const TAG_LEN_MAX: usize = 30;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotesEnvelope {
    version: String,
    notes: Vec<Note>,
    last_updated: DateTime<Utc>,
}

/// Repository for character notes, persisted as one JSON envelope under
/// [`NOTES_KEY`]. Validation runs before any mutation; a draft that fails
/// leaves the envelope untouched.
pub struct NotesRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NotesRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All notes, most recently created first. Missing or corrupt data
    /// yields an empty list, never an error.
    pub fn get_all(&self) -> Vec<Note> {
        let Some(raw) = self.store.get(NOTES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<NotesEnvelope>(&raw) {
            Ok(envelope) => envelope.notes,
            Err(e) => {
                tracing::warn!(error = %e, "corrupt notes envelope, resetting");
                self.store.remove(NOTES_KEY);
                Vec::new()
            }
        }
    }

    /// Notes attached to one character, in list order.
    pub fn notes_for(&self, character_id: u32) -> Vec<Note> {
        self.get_all()
            .into_iter()
            .filter(|note| note.character_id == character_id)
            .collect()
    }

    pub fn get(&self, note_id: &str) -> Option<Note> {
        self.get_all().into_iter().find(|note| note.id == note_id)
    }

    /// Create a note from a validated draft and prepend it to the list.
    pub fn add(&self, character_id: u32, draft: &NoteDraft) -> Result<Note> {
        let errors = validate(draft);
        if !errors.is_empty() {
            return Err(ChardexError::Validation(errors));
        }

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            character_id,
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            tags: trimmed_tags(draft),
            created_at: now,
            updated_at: now,
        };

        let mut notes = self.get_all();
        notes.insert(0, note.clone());
        self.save_all(&notes);
        Ok(note)
    }

    /// Fully replace a note's title/content/tags. `created_at` is kept,
    /// `updated_at` is refreshed. Validation runs before the lookup so a
    /// bad draft never touches storage.
    pub fn update(&self, note_id: &str, draft: &NoteDraft) -> Result<Note> {
        let errors = validate(draft);
        if !errors.is_empty() {
            return Err(ChardexError::Validation(errors));
        }

        let mut notes = self.get_all();
        let Some(existing) = notes.iter_mut().find(|note| note.id == note_id) else {
            return Err(ChardexError::NotFound(format!("note {}", note_id)));
        };

        existing.title = draft.title.trim().to_string();
        existing.content = draft.content.trim().to_string();
        existing.tags = trimmed_tags(draft);
        existing.updated_at = Utc::now();
        let updated = existing.clone();

        self.save_all(&notes);
        Ok(updated)
    }

    /// Remove a note by id. Returns whether anything was removed; a
    /// missing id is a no-op.
    pub fn remove(&self, note_id: &str) -> bool {
        let notes = self.get_all();
        let before = notes.len();
        let updated: Vec<_> = notes.into_iter().filter(|note| note.id != note_id).collect();
        if updated.len() == before {
            return false;
        }
        self.save_all(&updated);
        true
    }

    /// Remove the storage key entirely.
    pub fn clear(&self) {
        self.store.remove(NOTES_KEY);
    }

    fn save_all(&self, notes: &[Note]) {
        let envelope = NotesEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            notes: notes.to_vec(),
            last_updated: Utc::now(),
        };
        match serde_json::to_string(&envelope) {
            Ok(raw) => self.store.set(NOTES_KEY, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize notes"),
        }
    }
}

fn trimmed_tags(draft: &NoteDraft) -> Vec<String> {
    draft
        .tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Validate a draft against the field constraints, aggregating every
/// violation into one list of messages.
pub fn validate(draft: &NoteDraft) -> Vec<String> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("Title is required".to_string());
    } else if title.chars().count() > TITLE_MAX {
        errors.push(format!("Title must be at most {} characters", TITLE_MAX));
    }

    let content = draft.content.trim();
    if content.is_empty() {
        errors.push("Content is required".to_string());
    } else if content.chars().count() > CONTENT_MAX {
        errors.push(format!("Content must be at most {} characters", CONTENT_MAX));
    }

    if draft.tags.len() > TAGS_MAX {
        errors.push(format!("Maximum {} tags allowed", TAGS_MAX));
    }
    for (i, tag) in draft.tags.iter().enumerate() {
        if tag.trim().chars().count() > TAG_LEN_MAX {
            errors.push(format!(
                "Tag {} must be at most {} characters",
                i + 1,
                TAG_LEN_MAX
            ));
        }
    }

    errors
}
