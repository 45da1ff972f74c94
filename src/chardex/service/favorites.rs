use crate::model::{Character, FavoriteCharacter};
use crate::repo::favorites::FavoritesRepository;
use crate::store::KeyValueStore;
use chrono::Utc;
use tokio::sync::watch;

/// Favorites state broadcast to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesState {
    pub favorites: Vec<FavoriteCharacter>,
    pub count: usize,
    pub is_loading: bool,
}

impl Default for FavoritesState {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            count: 0,
            is_loading: true,
        }
    }
}

/// The closed set of favorites mutations.
#[derive(Debug, Clone)]
pub enum FavoritesAction {
    Load(Vec<FavoriteCharacter>),
    Add(FavoriteCharacter),
    Remove(u32),
    Clear,
    SetLoading(bool),
}

/// Pure transition function. No side effects, no clock, no storage.
pub fn reduce(state: &FavoritesState, action: &FavoritesAction) -> FavoritesState {
    match action {
        FavoritesAction::Load(favorites) => FavoritesState {
            count: favorites.len(),
            favorites: favorites.clone(),
            is_loading: false,
        },
        FavoritesAction::Add(favorite) => {
            if state.favorites.iter().any(|fav| fav.id == favorite.id) {
                return state.clone();
            }
            let mut favorites = Vec::with_capacity(state.favorites.len() + 1);
            favorites.push(favorite.clone());
            favorites.extend(state.favorites.iter().cloned());
            FavoritesState {
                count: favorites.len(),
                favorites,
                is_loading: state.is_loading,
            }
        }
        FavoritesAction::Remove(character_id) => {
            let favorites: Vec<_> = state
                .favorites
                .iter()
                .filter(|fav| fav.id != *character_id)
                .cloned()
                .collect();
            FavoritesState {
                count: favorites.len(),
                favorites,
                is_loading: state.is_loading,
            }
        }
        FavoritesAction::Clear => FavoritesState {
            favorites: Vec::new(),
            count: 0,
            is_loading: state.is_loading,
        },
        FavoritesAction::SetLoading(loading) => FavoritesState {
            is_loading: *loading,
            ..state.clone()
        },
    }
}

/// Process-wide favorites store: one writer path (the reducer), many
/// subscribed readers. Persistence is optimistic: state changes first,
/// then the repository rewrite happens best-effort.
pub struct FavoritesService<S: KeyValueStore> {
    repo: FavoritesRepository<S>,
    state: FavoritesState,
    tx: watch::Sender<FavoritesState>,
}

impl<S: KeyValueStore> FavoritesService<S> {
    pub fn new(repo: FavoritesRepository<S>) -> Self {
        let state = FavoritesState::default();
        let (tx, _) = watch::channel(state.clone());
        Self { repo, state, tx }
    }

    /// Load persisted favorites into memory. The yield lets the caller's
    /// first paint happen before the synchronous storage read.
    pub async fn hydrate(&mut self) {
        self.dispatch(FavoritesAction::SetLoading(true));
        tokio::task::yield_now().await;
        let favorites = self.repo.get_all();
        self.dispatch(FavoritesAction::Load(favorites));
    }

    pub fn subscribe(&self) -> watch::Receiver<FavoritesState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> &FavoritesState {
        &self.state
    }

    /// Add a character to favorites. A no-op if already favorited.
    pub fn add(&mut self, character: &Character) {
        if self.is_favorite(character.id) {
            return;
        }
        let favorite = FavoriteCharacter::from_character(character, Utc::now());
        self.dispatch(FavoritesAction::Add(favorite));
        self.repo.save_all(&self.state.favorites);
    }

    pub fn remove(&mut self, character_id: u32) {
        self.dispatch(FavoritesAction::Remove(character_id));
        self.repo.save_all(&self.state.favorites);
    }

    pub fn toggle(&mut self, character: &Character) {
        if self.is_favorite(character.id) {
            self.remove(character.id);
        } else {
            self.add(character);
        }
    }

    pub fn is_favorite(&self, character_id: u32) -> bool {
        self.state.favorites.iter().any(|fav| fav.id == character_id)
    }

    pub fn get(&self, character_id: u32) -> Option<FavoriteCharacter> {
        self.state
            .favorites
            .iter()
            .find(|fav| fav.id == character_id)
            .cloned()
    }

    pub fn clear(&mut self) {
        self.dispatch(FavoritesAction::Clear);
        self.repo.clear();
    }

    fn dispatch(&mut self, action: FavoritesAction) {
        self.state = reduce(&self.state, &action);
        self.tx.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::test_utils::{sample_character, sample_favorite};

    fn service() -> FavoritesService<MemoryStore> {
        FavoritesService::new(FavoritesRepository::new(MemoryStore::new()))
    }

    #[test]
    fn reduce_load_replaces_state_and_clears_loading() {
        let state = FavoritesState::default();
        assert!(state.is_loading);

        let favorites = vec![sample_favorite(1, "Rick Sanchez", "2024-01-01T00:00:00Z")];
        let next = reduce(&state, &FavoritesAction::Load(favorites));
        assert_eq!(next.count, 1);
        assert!(!next.is_loading);
    }

    #[test]
    fn reduce_add_prepends_and_dedups() {
        let state = reduce(
            &FavoritesState::default(),
            &FavoritesAction::Add(sample_favorite(1, "Rick Sanchez", "2024-01-01T00:00:00Z")),
        );
        let next = reduce(
            &state,
            &FavoritesAction::Add(sample_favorite(2, "Morty Smith", "2024-01-02T00:00:00Z")),
        );
        assert_eq!(next.favorites[0].id, 2);

        let deduped = reduce(
            &next,
            &FavoritesAction::Add(sample_favorite(1, "Rick Sanchez", "2024-01-03T00:00:00Z")),
        );
        assert_eq!(deduped.count, 2);
        // The original addedAt survives the duplicate add.
        assert_eq!(
            deduped.favorites[1].added_at,
            state.favorites[0].added_at
        );
    }

    #[tokio::test]
    async fn hydrate_loads_persisted_favorites() {
        let store = MemoryStore::new();
        let seed = FavoritesRepository::new(&store);
        seed.add(&sample_character(1, "Rick Sanchez"));

        let mut service = FavoritesService::new(FavoritesRepository::new(&store));
        assert!(service.state().is_loading);
        service.hydrate().await;
        assert!(!service.state().is_loading);
        assert_eq!(service.state().count, 1);
    }

    #[tokio::test]
    async fn hydrate_fails_safe_to_empty_on_corrupt_data() {
        let store = MemoryStore::new();
        store.set(crate::repo::favorites::FAVORITES_KEY, "garbage");

        let mut service = FavoritesService::new(FavoritesRepository::new(&store));
        service.hydrate().await;
        assert!(!service.state().is_loading);
        assert_eq!(service.state().count, 0);
    }

    #[test]
    fn add_updates_state_and_persists() {
        let store = MemoryStore::new();
        let mut service = FavoritesService::new(FavoritesRepository::new(&store));
        service.add(&sample_character(1, "Rick Sanchez"));

        assert!(service.is_favorite(1));
        // The write-through is visible to a fresh repository.
        assert_eq!(FavoritesRepository::new(&store).count(), 1);
    }

    #[test]
    fn toggle_removes_then_recreates() {
        let mut service = service();
        let character = sample_character(1, "Rick Sanchez");

        service.toggle(&character);
        assert!(service.is_favorite(1));
        service.toggle(&character);
        assert!(!service.is_favorite(1));
    }

    #[test]
    fn subscribers_observe_every_dispatch() {
        let mut service = service();
        let rx = service.subscribe();

        service.add(&sample_character(1, "Rick Sanchez"));
        assert_eq!(rx.borrow().count, 1);
        service.clear();
        assert_eq!(rx.borrow().count, 0);
    }
}
