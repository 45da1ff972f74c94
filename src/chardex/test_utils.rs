//! Shared fixtures for unit tests.

use crate::model::{Character, CharacterStatus, FavoriteCharacter, Gender, ResourceRef};

pub fn sample_character(id: u32, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        status: CharacterStatus::Alive,
        species: "Human".to_string(),
        kind: String::new(),
        gender: Gender::Male,
        origin: ResourceRef {
            name: "Earth (C-137)".to_string(),
            url: "https://rickandmortyapi.com/api/location/1".to_string(),
        },
        location: ResourceRef {
            name: "Citadel of Ricks".to_string(),
            url: "https://rickandmortyapi.com/api/location/3".to_string(),
        },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
        episode: vec!["https://rickandmortyapi.com/api/episode/1".to_string()],
        url: format!("https://rickandmortyapi.com/api/character/{}", id),
        created: "2017-11-04T18:48:46.250Z".parse().unwrap(),
    }
}

pub fn character_with(
    id: u32,
    name: &str,
    status: CharacterStatus,
    species: &str,
    created: &str,
) -> Character {
    let mut character = sample_character(id, name);
    character.status = status;
    character.species = species.to_string();
    character.created = created.parse().unwrap();
    character
}

pub fn sample_favorite(id: u32, name: &str, added_at: &str) -> FavoriteCharacter {
    FavoriteCharacter {
        id,
        name: name.to_string(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
        status: CharacterStatus::Alive,
        species: "Human".to_string(),
        added_at: added_at.parse().unwrap(),
    }
}
