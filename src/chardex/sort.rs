//! Pluggable sorting over character records: a plain key→comparator
//! registry, direction handled by reversing the comparator's result.
//! Sorting always operates on a copy.

use crate::model::{Character, CharacterStatus};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A pure ordering between two characters.
pub type Comparator = fn(&Character, &Character) -> Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Name,
    Id,
    Created,
    Status,
    Species,
}

impl SortKey {
    /// Parse a sort key from its URL form. Unknown keys fall back to
    /// `Name`.
    pub fn parse(value: &str) -> Self {
        match value {
            "id" => SortKey::Id,
            "created" => SortKey::Created,
            "status" => SortKey::Status,
            "species" => SortKey::Species,
            _ => SortKey::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Id => "id",
            SortKey::Created => "created",
            SortKey::Status => "status",
            SortKey::Species => "species",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A sort key plus direction. The default, `{name, asc}`, is also the
/// canonical "no sorting applied" state for the URL coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

fn by_name(a: &Character, b: &Character) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn by_id(a: &Character, b: &Character) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_created(a: &Character, b: &Character) -> Ordering {
    a.created.cmp(&b.created)
}

fn status_priority(status: CharacterStatus) -> u8 {
    match status {
        CharacterStatus::Alive => 1,
        CharacterStatus::Dead => 2,
        CharacterStatus::Unknown => 3,
    }
}

fn by_status(a: &Character, b: &Character) -> Ordering {
    status_priority(a.status)
        .cmp(&status_priority(b.status))
        .then_with(|| by_name(a, b))
}

fn by_species(a: &Character, b: &Character) -> Ordering {
    a.species
        .to_lowercase()
        .cmp(&b.species.to_lowercase())
        .then_with(|| by_name(a, b))
}

/// Registry of comparison strategies, selectable by key at call time.
/// Extensible by registration: a registered comparator replaces the
/// built-in one for that key.
pub struct SortEngine {
    strategies: HashMap<SortKey, Comparator>,
}

impl Default for SortEngine {
    fn default() -> Self {
        let mut strategies: HashMap<SortKey, Comparator> = HashMap::new();
        strategies.insert(SortKey::Name, by_name);
        strategies.insert(SortKey::Id, by_id);
        strategies.insert(SortKey::Created, by_created);
        strategies.insert(SortKey::Status, by_status);
        strategies.insert(SortKey::Species, by_species);
        Self { strategies }
    }
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: SortKey, comparator: Comparator) {
        self.strategies.insert(key, comparator);
    }

    /// Sort a copy of the input. The comparator for the spec's key is
    /// applied and its result reversed for descending order; a key with
    /// no registered strategy falls back to `name`.
    pub fn sort(&self, characters: &[Character], spec: SortSpec) -> Vec<Character> {
        let comparator = self
            .strategies
            .get(&spec.key)
            .or_else(|| self.strategies.get(&SortKey::Name))
            .copied()
            .unwrap_or(by_name);

        let mut sorted = characters.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = comparator(a, b);
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        sorted
    }
}

static DEFAULT_ENGINE: Lazy<SortEngine> = Lazy::new(SortEngine::default);

/// Sort with the built-in strategies.
pub fn sort_characters(characters: &[Character], spec: SortSpec) -> Vec<Character> {
    DEFAULT_ENGINE.sort(characters, spec)
}
