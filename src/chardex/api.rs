//! # API Facade
//!
//! Single entry point for all chardex operations, regardless of the UI
//! being used. The facade owns the remote client and both state services
//! and wires them together; it holds no business logic of its own.
//!
//! `ChardexApi<S>` is generic over the storage backend:
//! - Production: `ChardexApi<Arc<Store>>` via [`ChardexApi::open`]
//! - Testing: `ChardexApi<Arc<MemoryStore>>` with an injected client

use crate::error::Result;
use crate::export;
use crate::model::{Character, CharacterPage, FavoriteCharacter, FilterCriteria, Note, NoteDraft};
use crate::remote::CharacterClient;
use crate::repo::favorites::FavoritesRepository;
use crate::repo::notes::NotesRepository;
use crate::service::favorites::FavoritesService;
use crate::service::notes::NotesService;
use crate::sort::{sort_characters, SortSpec};
use crate::store::{KeyValueStore, Store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The main facade over the remote catalog and local annotation state.
pub struct ChardexApi<S: KeyValueStore> {
    client: CharacterClient,
    favorites: FavoritesService<S>,
    notes: NotesService<S>,
}

impl ChardexApi<Arc<Store>> {
    /// Production wiring: probe the data directory once and share the
    /// resulting backend between both services.
    pub fn open() -> Result<Self> {
        let store = Arc::new(Store::open());
        Ok(Self::with_parts(CharacterClient::new()?, store))
    }
}

impl<S: KeyValueStore + Clone> ChardexApi<S> {
    pub fn with_parts(client: CharacterClient, store: S) -> Self {
        Self {
            client,
            favorites: FavoritesService::new(FavoritesRepository::new(store.clone())),
            notes: NotesService::new(NotesRepository::new(store)),
        }
    }
}

impl<S: KeyValueStore> ChardexApi<S> {
    /// Load both annotation stores from persistence.
    pub async fn hydrate(&mut self) {
        self.favorites.hydrate().await;
        self.notes.hydrate().await;
    }

    /// Fetch one page of characters and sort the visible results.
    /// Server-side filtering, client-side ordering.
    pub async fn browse(
        &self,
        filters: &FilterCriteria,
        sort: SortSpec,
        cancel: &CancellationToken,
    ) -> Result<CharacterPage> {
        let mut page = self.client.list(filters, cancel).await?;
        page.results = sort_characters(&page.results, sort);
        Ok(page)
    }

    pub async fn character(&self, id: u32, cancel: &CancellationToken) -> Result<Character> {
        self.client.get_by_id(id, cancel).await
    }

    pub fn favorites(&self) -> &FavoritesService<S> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesService<S> {
        &mut self.favorites
    }

    pub fn notes(&self) -> &NotesService<S> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NotesService<S> {
        &mut self.notes
    }

    pub fn add_note(&mut self, character_id: u32, draft: &NoteDraft) -> Result<Note> {
        self.notes.add(character_id, draft)
    }

    pub fn toggle_favorite(&mut self, character: &Character) {
        self.favorites.toggle(character);
    }

    pub fn export_favorites_json(&self) -> Result<String> {
        export::favorites_json(&self.favorites.state().favorites)
    }

    pub fn export_favorites_csv(&self) -> String {
        export::favorites_csv(&self.favorites.state().favorites)
    }

    /// Current favorites snapshot, newest first.
    pub fn favorite_list(&self) -> Vec<FavoriteCharacter> {
        self.favorites.state().favorites.clone()
    }
}
