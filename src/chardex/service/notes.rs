use crate::error::Result;
use crate::model::{Note, NoteDraft};
use crate::repo::notes::NotesRepository;
use crate::store::KeyValueStore;
use tokio::sync::watch;

/// Notes state broadcast to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesState {
    pub notes: Vec<Note>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for NotesState {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

/// The closed set of notes mutations.
#[derive(Debug, Clone)]
pub enum NotesAction {
    Load(Vec<Note>),
    Add(Note),
    Update(Note),
    Delete(String),
    Clear,
    SetLoading(bool),
    SetError(Option<String>),
}

/// Pure transition function. Every successful mutation also clears the
/// error field.
pub fn reduce(state: &NotesState, action: &NotesAction) -> NotesState {
    match action {
        NotesAction::Load(notes) => NotesState {
            notes: notes.clone(),
            is_loading: false,
            error: None,
        },
        NotesAction::Add(note) => {
            let mut notes = Vec::with_capacity(state.notes.len() + 1);
            notes.push(note.clone());
            notes.extend(state.notes.iter().cloned());
            NotesState {
                notes,
                is_loading: state.is_loading,
                error: None,
            }
        }
        NotesAction::Update(updated) => NotesState {
            notes: state
                .notes
                .iter()
                .map(|note| {
                    if note.id == updated.id {
                        updated.clone()
                    } else {
                        note.clone()
                    }
                })
                .collect(),
            is_loading: state.is_loading,
            error: None,
        },
        NotesAction::Delete(note_id) => NotesState {
            notes: state
                .notes
                .iter()
                .filter(|note| note.id != *note_id)
                .cloned()
                .collect(),
            is_loading: state.is_loading,
            error: None,
        },
        NotesAction::Clear => NotesState {
            notes: Vec::new(),
            is_loading: state.is_loading,
            error: None,
        },
        NotesAction::SetLoading(loading) => NotesState {
            is_loading: *loading,
            ..state.clone()
        },
        NotesAction::SetError(message) => NotesState {
            error: message.clone(),
            is_loading: false,
            notes: state.notes.clone(),
        },
    }
}

/// Process-wide notes store. Unlike favorites, the repository call runs
/// first and the action only dispatches after it succeeds, so validation
/// failures surface before any in-memory state change.
pub struct NotesService<S: KeyValueStore> {
    repo: NotesRepository<S>,
    state: NotesState,
    tx: watch::Sender<NotesState>,
}

impl<S: KeyValueStore> NotesService<S> {
    pub fn new(repo: NotesRepository<S>) -> Self {
        let state = NotesState::default();
        let (tx, _) = watch::channel(state.clone());
        Self { repo, state, tx }
    }

    /// Load persisted notes into memory. The yield lets the caller's
    /// first paint happen before the synchronous storage read.
    pub async fn hydrate(&mut self) {
        self.dispatch(NotesAction::SetLoading(true));
        tokio::task::yield_now().await;
        let notes = self.repo.get_all();
        self.dispatch(NotesAction::Load(notes));
    }

    pub fn subscribe(&self) -> watch::Receiver<NotesState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    pub fn add(&mut self, character_id: u32, draft: &NoteDraft) -> Result<Note> {
        match self.repo.add(character_id, draft) {
            Ok(note) => {
                self.dispatch(NotesAction::Add(note.clone()));
                Ok(note)
            }
            Err(e) => {
                self.dispatch(NotesAction::SetError(Some(e.to_string())));
                Err(e)
            }
        }
    }

    pub fn update(&mut self, note_id: &str, draft: &NoteDraft) -> Result<Note> {
        match self.repo.update(note_id, draft) {
            Ok(note) => {
                self.dispatch(NotesAction::Update(note.clone()));
                Ok(note)
            }
            Err(e) => {
                self.dispatch(NotesAction::SetError(Some(e.to_string())));
                Err(e)
            }
        }
    }

    /// Delete a note. A missing id is a quiet no-op; returns whether a
    /// note was actually deleted.
    pub fn delete(&mut self, note_id: &str) -> bool {
        if !self.repo.remove(note_id) {
            return false;
        }
        self.dispatch(NotesAction::Delete(note_id.to_string()));
        true
    }

    pub fn clear(&mut self) {
        self.repo.clear();
        self.dispatch(NotesAction::Clear);
    }

    pub fn notes_for(&self, character_id: u32) -> Vec<Note> {
        self.state
            .notes
            .iter()
            .filter(|note| note.character_id == character_id)
            .cloned()
            .collect()
    }

    fn dispatch(&mut self, action: NotesAction) {
        self.state = reduce(&self.state, &action);
        self.tx.send_replace(self.state.clone());
    }
}
