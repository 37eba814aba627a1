//! Database operations for the flashcard manager
//!
//! Handles SQLite database initialization and CRUD operations for decks
//! and cards. Every function opens its own implicit transaction; the
//! bulk import is the only multi-statement transaction in the crate.

use crate::error::{FlashdeckError, Result};
use crate::models::{Card, Deck};
use log::{debug, info};
use rusqlite::{Connection, params};
use std::path::Path;

/// Schema version recorded in SQLite's `user_version` pragma.
const SCHEMA_VERSION: i64 = 1;

/// Initializes the SQLite database with required tables and indexes
///
/// Idempotent: re-opening an already-initialized file leaves existing
/// rows untouched.
pub fn init_database<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path)?;

    // Create decks table with auto-increment ID
    conn.execute(
        "CREATE TABLE IF NOT EXISTS decks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        (),
    )?;

    // Name index is part of the v1 schema, no operation queries it yet
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_decks_name ON decks (name)",
        (),
    )?;

    // Create cards table. deck_id is deliberately not a FOREIGN KEY:
    // an imported card may reference a deck that does not exist.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_id INTEGER NOT NULL,
            front_text TEXT NOT NULL,
            back_text TEXT NOT NULL,
            front_img TEXT,
            back_img TEXT
        )",
        (),
    )?;

    // Index serving the cards-for-deck query
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_cards_deck_id ON cards (deck_id)",
        (),
    )?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    Ok(conn)
}

/// Creates a new deck and returns its storage-assigned id
///
/// Names are not unique; the caller is responsible for rejecting empty ones.
pub fn create_deck(name: &str, conn: &Connection) -> Result<i64> {
    conn.execute("INSERT INTO decks (name) VALUES (?1)", params![name])?;
    let id = conn.last_insert_rowid();
    info!("Deck '{}' created with id {}", name, id);
    Ok(id)
}

/// Retrieves all decks, in storage order
pub fn list_decks(conn: &Connection) -> Result<Vec<Deck>> {
    let mut stmt = conn.prepare("SELECT id, name FROM decks")?;
    let decks = stmt
        .query_map([], |row| {
            Ok(Deck {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<Deck>>>()?;
    Ok(decks)
}

/// Inserts a card into a deck and returns its storage-assigned id
///
/// Both text sides must be non-empty. Image arguments are optional
/// already-encoded payloads prepared by the caller before this call.
pub fn add_card(
    deck_id: i64,
    front_text: &str,
    back_text: &str,
    front_img: Option<&str>,
    back_img: Option<&str>,
    conn: &Connection,
) -> Result<i64> {
    if front_text.trim().is_empty() || back_text.trim().is_empty() {
        return Err(FlashdeckError::ValidationFailed(
            "Enter text for both sides!".to_string(),
        ));
    }

    conn.execute(
        "INSERT INTO cards (deck_id, front_text, back_text, front_img, back_img)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![deck_id, front_text, back_text, front_img, back_img],
    )?;
    let id = conn.last_insert_rowid();
    debug!("Card {} added to deck {}", id, deck_id);
    Ok(id)
}

/// Retrieves all cards belonging to a deck
///
/// Served by the deck_id index; no sort beyond storage order.
pub fn list_cards_for_deck(deck_id: i64, conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(
        "SELECT id, deck_id, front_text, back_text, front_img, back_img
         FROM cards WHERE deck_id = ?1",
    )?;
    let cards = stmt
        .query_map(params![deck_id], map_card_row)?
        .collect::<rusqlite::Result<Vec<Card>>>()?;
    Ok(cards)
}

/// Retrieves every card in the database, used by the backup exporter
pub fn list_all_cards(conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(
        "SELECT id, deck_id, front_text, back_text, front_img, back_img FROM cards",
    )?;
    let cards = stmt
        .query_map([], map_card_row)?
        .collect::<rusqlite::Result<Vec<Card>>>()?;
    Ok(cards)
}

fn map_card_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        deck_id: row.get(1)?,
        front_text: row.get(2)?,
        back_text: row.get(3)?,
        front_img: row.get(4)?,
        back_img: row.get(5)?,
    })
}

/// Counts all decks
pub fn count_decks(conn: &Connection) -> Result<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM decks", [], |row| row.get(0))?;
    Ok(n)
}

/// Counts cards across all decks
pub fn count_cards(conn: &Connection) -> Result<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
    Ok(n)
}

/// Inserts imported decks and cards in one transaction spanning both tables
///
/// Ids from the backup file are kept verbatim, no renumbering and no
/// referential check on deck_id. An id collision with an existing row
/// fails the statement and the whole transaction rolls back.
pub fn import_records(decks: &[Deck], cards: &[Card], conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    for deck in decks {
        tx.execute(
            "INSERT INTO decks (id, name) VALUES (?1, ?2)",
            params![deck.id, deck.name],
        )?;
    }
    for card in cards {
        tx.execute(
            "INSERT INTO cards (id, deck_id, front_text, back_text, front_img, back_img)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                card.id,
                card.deck_id,
                card.front_text,
                card.back_text,
                card.front_img,
                card.back_img
            ],
        )?;
    }

    tx.commit()?;
    info!("Imported {} decks and {} cards", decks.len(), cards.len());
    Ok(())
}
