//! JSON backup import/export for the whole dataset.
//! A backup file holds every deck and every card in one top-level object.

use crate::database::db;
use crate::error::{FlashdeckError, Result};
use crate::models::{Card, Deck};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Top-level structure of a backup file.
///
/// Parsing rejects a file where either field is absent; individual
/// records are not validated any further.
#[derive(Debug, Serialize, Deserialize)]
pub struct Backup {
    pub decks: Vec<Deck>,
    pub cards: Vec<Card>,
}

/// Counts reported after a successful import.
#[derive(Debug, Clone, Copy)]
pub struct ImportSummary {
    pub decks: usize,
    pub cards: usize,
}

/// Reads the whole dataset into a [`Backup`]
///
/// Decks and cards are read in two independent queries rather than one
/// snapshot; a write landing between them could skew the export, which
/// is accepted since the app issues one operation at a time.
pub fn export_all(conn: &Connection) -> Result<Backup> {
    let decks = db::list_decks(conn)?;
    let cards = db::list_all_cards(conn)?;
    Ok(Backup { decks, cards })
}

/// Serializes a backup and writes it to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_to_path(backup: &Backup, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(backup)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Default backup filename with an embedded timestamp, e.g.
/// `flashcards_backup_2024-01-15T10-30-00-000Z.json`.
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    let ts = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("flashcards_backup_{ts}.json")
}

/// Parses backup file contents and inserts everything into the database
///
/// A missing `decks` or `cards` field (or unparseable JSON) is reported
/// as a format error before any mutation. Ids from the file are kept
/// as-is; the insert runs as one transaction over both tables.
pub fn import_all(contents: &str, conn: &mut Connection) -> Result<ImportSummary> {
    let backup: Backup =
        serde_json::from_str(contents).map_err(|e| FlashdeckError::InvalidFormat(e.to_string()))?;

    db::import_records(&backup.decks, &backup.cards, conn)?;

    Ok(ImportSummary {
        decks: backup.decks.len(),
        cards: backup.cards.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::NamedTempFile;

    fn open_test_db() -> (NamedTempFile, Connection) {
        let temp = NamedTempFile::new().unwrap();
        let conn = db::init_database(temp.path()).unwrap();
        (temp, conn)
    }

    fn populate(conn: &Connection) {
        let deck_a = db::create_deck("Polish", conn).unwrap();
        let deck_b = db::create_deck("Biology", conn).unwrap();
        db::add_card(deck_a, "cześć", "hello", None, None, conn).unwrap();
        db::add_card(
            deck_b,
            "mitochondrion",
            "powerhouse of the cell",
            Some("data:image/png;base64,AAAA"),
            None,
            conn,
        )
        .unwrap();
    }

    #[test]
    fn test_backup_file_name_replaces_colons_and_dots() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            backup_file_name(now),
            "flashcards_backup_2024-01-15T10-30-00-000Z.json"
        );
    }

    #[test]
    fn test_export_uses_backup_field_names() {
        let (_temp, conn) = open_test_db();
        populate(&conn);

        let backup = export_all(&conn).unwrap();
        let json = serde_json::to_string_pretty(&backup).unwrap();

        assert!(json.contains("\"decks\""));
        assert!(json.contains("\"cards\""));
        assert!(json.contains("\"deckId\""));
        assert!(json.contains("\"frontText\""));
        assert!(json.contains("\"backImg\""));
    }

    #[test]
    fn test_export_import_roundtrip() {
        let (_temp, conn) = open_test_db();
        populate(&conn);

        let backup = export_all(&conn).unwrap();
        let json = serde_json::to_string_pretty(&backup).unwrap();

        // Import into an empty database
        let (_temp2, mut fresh) = open_test_db();
        let summary = import_all(&json, &mut fresh).unwrap();
        assert_eq!(summary.decks, 2);
        assert_eq!(summary.cards, 2);

        let mut original_decks = db::list_decks(&conn).unwrap();
        let mut imported_decks = db::list_decks(&fresh).unwrap();
        original_decks.sort_by_key(|d| d.id);
        imported_decks.sort_by_key(|d| d.id);
        assert_eq!(original_decks, imported_decks);

        let mut original_cards = db::list_all_cards(&conn).unwrap();
        let mut imported_cards = db::list_all_cards(&fresh).unwrap();
        original_cards.sort_by_key(|c| c.id);
        imported_cards.sort_by_key(|c| c.id);
        assert_eq!(original_cards, imported_cards);
    }

    #[test]
    fn test_import_rejects_missing_top_level_fields() {
        let (_temp, mut conn) = open_test_db();
        populate(&conn);

        let result = import_all(r#"{"foo": 1}"#, &mut conn);

        assert!(matches!(result, Err(FlashdeckError::InvalidFormat(_))));
        // Existing data untouched
        assert_eq!(db::count_decks(&conn).unwrap(), 2);
        assert_eq!(db::count_cards(&conn).unwrap(), 2);
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        let (_temp, mut conn) = open_test_db();

        let result = import_all("{ this is not valid json }", &mut conn);

        assert!(matches!(result, Err(FlashdeckError::InvalidFormat(_))));
        assert_eq!(db::count_decks(&conn).unwrap(), 0);
    }

    #[test]
    fn test_export_to_path_writes_readable_file() {
        let (_temp, conn) = open_test_db();
        populate(&conn);

        let backup = export_all(&conn).unwrap();
        let out = NamedTempFile::new().unwrap();
        export_to_path(&backup, out.path()).unwrap();

        let contents = std::fs::read_to_string(out.path()).unwrap();
        let reparsed: Backup = serde_json::from_str(&contents).unwrap();
        assert_eq!(reparsed.decks.len(), 2);
        assert_eq!(reparsed.cards.len(), 2);
    }
}
