use super::ENVELOPE_VERSION;
use crate::model::{Character, CharacterStatus, FavoriteCharacter};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage key for the favorites envelope.
pub const FAVORITES_KEY: &str = "rick-morty-favorites";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesEnvelope {
    version: String,
    favorites: Vec<FavoriteCharacter>,
    last_updated: DateTime<Utc>,
}

/// Repository for favorited characters, persisted as one JSON envelope
/// under [`FAVORITES_KEY`]. The sole writer of the persisted form.
pub struct FavoritesRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FavoritesRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All favorites, most recently added first. Missing or corrupt data
    /// yields an empty list, never an error.
    pub fn get_all(&self) -> Vec<FavoriteCharacter> {
        let Some(raw) = self.store.get(FAVORITES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<FavoritesEnvelope>(&raw) {
            Ok(envelope) => envelope.favorites,
            Err(e) => {
                tracing::warn!(error = %e, "corrupt favorites envelope, resetting");
                self.store.remove(FAVORITES_KEY);
                Vec::new()
            }
        }
    }

    /// Rewrite the full envelope. Best effort, like every storage write.
    pub fn save_all(&self, favorites: &[FavoriteCharacter]) {
        let envelope = FavoritesEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            favorites: favorites.to_vec(),
            last_updated: Utc::now(),
        };
        match serde_json::to_string(&envelope) {
            Ok(raw) => self.store.set(FAVORITES_KEY, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize favorites"),
        }
    }

    /// Add a character to favorites, prepending it to the list. Adding an
    /// already-favorited id is a no-op. Returns the updated list.
    pub fn add(&self, character: &Character) -> Vec<FavoriteCharacter> {
        let favorites = self.get_all();
        if favorites.iter().any(|fav| fav.id == character.id) {
            return favorites;
        }

        let mut updated = Vec::with_capacity(favorites.len() + 1);
        updated.push(FavoriteCharacter::from_character(character, Utc::now()));
        updated.extend(favorites);
        self.save_all(&updated);
        updated
    }

    /// Remove a favorite by character id. Returns whether anything was
    /// removed; a missing id is a no-op.
    pub fn remove(&self, character_id: u32) -> bool {
        let favorites = self.get_all();
        let before = favorites.len();
        let updated: Vec<_> = favorites
            .into_iter()
            .filter(|fav| fav.id != character_id)
            .collect();
        let removed = updated.len() != before;
        self.save_all(&updated);
        removed
    }

    pub fn is_favorite(&self, character_id: u32) -> bool {
        self.get_all().iter().any(|fav| fav.id == character_id)
    }

    pub fn get(&self, character_id: u32) -> Option<FavoriteCharacter> {
        self.get_all().into_iter().find(|fav| fav.id == character_id)
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Remove the storage key entirely.
    pub fn clear(&self) {
        self.store.remove(FAVORITES_KEY);
    }
}

/// Sort keys for the favorites list. Default display order is newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteSortKey {
    Name,
    Status,
    #[default]
    AddedAt,
}

/// Sort a favorites list without mutating the input.
pub fn sort_favorites(
    favorites: &[FavoriteCharacter],
    key: FavoriteSortKey,
) -> Vec<FavoriteCharacter> {
    let mut sorted = favorites.to_vec();
    match key {
        FavoriteSortKey::Name => {
            sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        FavoriteSortKey::Status => sorted.sort_by(|a, b| a.status.cmp(&b.status)),
        FavoriteSortKey::AddedAt => sorted.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
    }
    sorted
}

/// Filter favorites by a free-text query over name, species, and status.
pub fn filter_favorites(favorites: &[FavoriteCharacter], query: &str) -> Vec<FavoriteCharacter> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return favorites.to_vec();
    }
    favorites
        .iter()
        .filter(|fav| {
            fav.name.to_lowercase().contains(&term)
                || fav.species.to_lowercase().contains(&term)
                || fav.status.to_string().to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Group favorites by status, preserving list order within each group.
pub fn group_by_status(
    favorites: &[FavoriteCharacter],
) -> BTreeMap<CharacterStatus, Vec<FavoriteCharacter>> {
    let mut groups: BTreeMap<CharacterStatus, Vec<FavoriteCharacter>> = BTreeMap::new();
    for fav in favorites {
        groups.entry(fav.status).or_default().push(fav.clone());
    }
    groups
}

/// Summary statistics over a favorites list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_species: BTreeMap<String, usize>,
    pub most_recent: Option<FavoriteCharacter>,
    pub oldest: Option<FavoriteCharacter>,
}

/// Compute statistics. The list is assumed to be in display order
/// (newest first), so first = most recent and last = oldest.
pub fn statistics(favorites: &[FavoriteCharacter]) -> FavoriteStats {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_species: BTreeMap<String, usize> = BTreeMap::new();
    for fav in favorites {
        *by_status.entry(fav.status.to_string()).or_default() += 1;
        *by_species.entry(fav.species.clone()).or_default() += 1;
    }
    FavoriteStats {
        total: favorites.len(),
        by_status,
        by_species,
        most_recent: favorites.first().cloned(),
        oldest: favorites.last().cloned(),
    }
}
