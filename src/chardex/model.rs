use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Life status of a remote character record. The remote source uses exactly
/// these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl CharacterStatus {
    /// Lowercase form used by the remote API's `status` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            CharacterStatus::Alive => "alive",
            CharacterStatus::Dead => "dead",
            CharacterStatus::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "alive" => Some(CharacterStatus::Alive),
            "dead" => Some(CharacterStatus::Dead),
            "unknown" => Some(CharacterStatus::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CharacterStatus::Alive => "Alive",
            CharacterStatus::Dead => "Dead",
            CharacterStatus::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Gender {
    pub fn as_query(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "female" => Some(Gender::Female),
            "male" => Some(Gender::Male),
            "genderless" => Some(Gender::Genderless),
            "unknown" => Some(Gender::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Name + reference URL pair used for nested origin/location fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    pub url: String,
}

/// A remote, read-only character record. Identity and `created` are assigned
/// by the remote source and never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: Gender,
    pub origin: ResourceRef,
    pub location: ResourceRef,
    pub image: String,
    pub episode: Vec<String>,
    pub url: String,
    pub created: DateTime<Utc>,
}

/// Pagination block returned alongside every collection query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

impl CharacterPage {
    /// The page a filtered query resolves to when nothing matches.
    pub fn empty() -> Self {
        Self {
            info: PageInfo {
                count: 0,
                pages: 0,
                next: None,
                prev: None,
            },
            results: Vec::new(),
        }
    }
}

/// Reduced projection of a [`Character`] kept in the favorites store.
/// `added_at` is client-assigned at insertion time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCharacter {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub status: CharacterStatus,
    pub species: String,
    pub added_at: DateTime<Utc>,
}

impl FavoriteCharacter {
    pub fn from_character(character: &Character, added_at: DateTime<Utc>) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            image: character.image.clone(),
            status: character.status,
            species: character.species.clone(),
            added_at,
        }
    }
}

/// A user note attached to a character. The id is client-generated;
/// `created_at` is immutable while `updated_at` advances on every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub character_id: u32,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for creating or fully replacing a note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }
}

/// Filter criteria for collection queries. An absent field means
/// "no constraint" and is never sent as an empty parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub status: Option<CharacterStatus>,
    pub species: Option<String>,
    pub kind: Option<String>,
    pub gender: Option<Gender>,
    pub page: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            name: None,
            status: None,
            species: None,
            kind: None,
            gender: None,
            page: 1,
        }
    }
}

impl FilterCriteria {
    /// Query parameters for the remote API. Absent fields are omitted
    /// entirely, and the default first page is left implicit.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            if !name.is_empty() {
                params.push(("name", name.clone()));
            }
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_query().to_string()));
        }
        if let Some(species) = &self.species {
            if !species.is_empty() {
                params.push(("species", species.clone()));
            }
        }
        if let Some(kind) = &self.kind {
            if !kind.is_empty() {
                params.push(("type", kind.clone()));
            }
        }
        if let Some(gender) = self.gender {
            params.push(("gender", gender.as_query().to_string()));
        }
        if self.page > 1 {
            params.push(("page", self.page.to_string()));
        }
        params
    }
}
