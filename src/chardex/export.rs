//! Favorites export in two shapes: a versioned JSON document suitable for
//! re-import, and a flat CSV for spreadsheets.

use crate::error::Result;
use crate::model::FavoriteCharacter;
use chrono::SecondsFormat;
use serde::Serialize;

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    version: &'static str,
    exported_at: String,
    favorites: &'a [FavoriteCharacter],
    count: usize,
}

/// Render favorites as a pretty-printed, versioned JSON document.
pub fn favorites_json(favorites: &[FavoriteCharacter]) -> Result<String> {
    let document = ExportDocument {
        version: EXPORT_VERSION,
        exported_at: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        favorites,
        count: favorites.len(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render favorites as CSV. Name and species are quoted since they can
/// contain commas; the other columns never do. No trailing newline.
pub fn favorites_csv(favorites: &[FavoriteCharacter]) -> String {
    let mut lines = Vec::with_capacity(favorites.len() + 1);
    lines.push("ID,Name,Status,Species,Added At".to_string());
    for favorite in favorites {
        let added_at = favorite
            .added_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        lines.push(format!(
            "{},\"{}\",{},\"{}\",{}",
            favorite.id, favorite.name, favorite.status, favorite.species, added_at
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_favorite;

    #[test]
    fn json_export_carries_version_count_and_favorites() {
        let favorites = vec![
            sample_favorite(1, "Rick Sanchez", "2024-01-01T00:00:00Z"),
            sample_favorite(2, "Morty Smith", "2024-01-02T00:00:00Z"),
        ];
        let json = favorites_json(&favorites).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["version"], "1.0");
        assert_eq!(doc["count"], 2);
        assert_eq!(doc["favorites"][0]["name"], "Rick Sanchez");
        assert!(doc["exportedAt"].is_string());
        // Pretty-printed, not a single line.
        assert!(json.contains('\n'));
    }

    #[test]
    fn json_export_of_nothing_is_an_empty_document() {
        let json = favorites_json(&[]).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["count"], 0);
        assert_eq!(doc["favorites"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn csv_export_matches_the_fixed_column_layout() {
        let favorites = vec![sample_favorite(1, "Rick Sanchez", "2024-01-01T00:00:00Z")];
        assert_eq!(
            favorites_csv(&favorites),
            "ID,Name,Status,Species,Added At\n1,\"Rick Sanchez\",Alive,\"Human\",2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn csv_export_has_no_trailing_newline() {
        let favorites = vec![
            sample_favorite(1, "Rick Sanchez", "2024-01-01T00:00:00Z"),
            sample_favorite(2, "Morty Smith", "2024-01-02T00:00:00Z"),
        ];
        let csv = favorites_csv(&favorites);
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn csv_export_of_nothing_is_just_the_header() {
        assert_eq!(favorites_csv(&[]), "ID,Name,Status,Species,Added At");
    }
}
