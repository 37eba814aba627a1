//! Main application UI and state management.
//! Renders the deck list, the card gallery for the selected deck, and the
//! create/add/import/export controls around them.

use crate::database::db;
use crate::export::json;
use crate::images;
use crate::models::{Card, Deck};
use chrono::Utc;
use eframe::egui;
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;

/// Main application state.
///
/// `decks` and `cards` are plain caches of the last repository query;
/// every mutation re-runs the query and replaces them wholesale.
pub struct FlashdeckApp {
    conn: Connection,
    decks: Vec<Deck>,
    selected_deck: Option<Deck>,
    cards: Vec<Card>,

    new_deck_name: String,
    front_text: String,
    back_text: String,
    front_img_path: Option<PathBuf>,
    back_img_path: Option<PathBuf>,

    show_message_dialog: bool,
    message: String,
}

impl eframe::App for FlashdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_main_screen(ctx);

        // One window for validation warnings and import/export results
        if self.show_message_dialog {
            egui::Window::new("Flashdeck")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_message_dialog = false;
                    }
                });
        }
    }
}

impl FlashdeckApp {
    /// Creates the application with the deck list loaded from the database
    pub fn new(conn: Connection) -> crate::error::Result<Self> {
        let decks = db::list_decks(&conn)?;
        log::info!("Loaded {} decks from database", decks.len());

        Ok(Self {
            conn,
            decks,
            selected_deck: None,
            cards: Vec::new(),
            new_deck_name: String::new(),
            front_text: String::new(),
            back_text: String::new(),
            front_img_path: None,
            back_img_path: None,
            show_message_dialog: false,
            message: String::new(),
        })
    }

    fn show_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.show_message_dialog = true;
    }

    /// Re-queries the deck list after a mutation
    fn reload_decks(&mut self) {
        match db::list_decks(&self.conn) {
            Ok(decks) => self.decks = decks,
            Err(e) => {
                error!("Failed to reload decks: {}", e);
                self.show_message(e.user_message());
            }
        }
    }

    /// Re-queries the card gallery for the selected deck
    fn reload_cards(&mut self) {
        let Some(deck_id) = self.selected_deck.as_ref().map(|d| d.id) else {
            self.cards.clear();
            return;
        };
        match db::list_cards_for_deck(deck_id, &self.conn) {
            Ok(cards) => self.cards = cards,
            Err(e) => {
                error!("Failed to reload cards: {}", e);
                self.show_message(e.user_message());
            }
        }
    }

    /// Makes a deck the target of subsequent card operations
    fn select_deck(&mut self, deck: Deck) {
        self.selected_deck = Some(deck);
        self.reload_cards();
    }

    fn handle_create_deck(&mut self) {
        // Empty input aborts with no effect, same as a cancelled prompt
        if self.new_deck_name.trim().is_empty() {
            return;
        }
        match db::create_deck(self.new_deck_name.trim(), &self.conn) {
            Ok(_) => {
                self.new_deck_name.clear();
                self.reload_decks();
            }
            Err(e) => self.show_message(e.user_message()),
        }
    }

    fn handle_add_card(&mut self) {
        let Some(deck_id) = self.selected_deck.as_ref().map(|d| d.id) else {
            self.show_message("Select a deck first!");
            return;
        };
        if self.front_text.trim().is_empty() || self.back_text.trim().is_empty() {
            self.show_message("Enter text for both sides!");
            return;
        }

        // Image files are read and encoded before the insert is issued
        let front_img = match self.encode_picked_image(self.front_img_path.clone()) {
            Ok(payload) => payload,
            Err(message) => {
                self.show_message(message);
                return;
            }
        };
        let back_img = match self.encode_picked_image(self.back_img_path.clone()) {
            Ok(payload) => payload,
            Err(message) => {
                self.show_message(message);
                return;
            }
        };

        match db::add_card(
            deck_id,
            self.front_text.trim(),
            self.back_text.trim(),
            front_img.as_deref(),
            back_img.as_deref(),
            &self.conn,
        ) {
            Ok(_) => {
                self.front_text.clear();
                self.back_text.clear();
                self.front_img_path = None;
                self.back_img_path = None;
                self.reload_cards();
            }
            Err(e) => self.show_message(e.user_message()),
        }
    }

    fn encode_picked_image(&self, path: Option<PathBuf>) -> Result<Option<String>, String> {
        match path {
            Some(path) => images::encode_image_file(&path)
                .map(Some)
                .map_err(|e| e.user_message()),
            None => Ok(None),
        }
    }

    /// Handles whole-dataset export to a JSON backup file
    fn handle_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(json::backup_file_name(Utc::now()))
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        let result = json::export_all(&self.conn)
            .and_then(|backup| json::export_to_path(&backup, &path).map(|()| backup));
        match result {
            Ok(backup) => self.show_message(format!(
                "Exported {} decks and {} cards.",
                backup.decks.len(),
                backup.cards.len()
            )),
            Err(e) => self.show_message(format!("Export failed: {}", e.user_message())),
        }
    }

    /// Handles whole-dataset import from a JSON backup file
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        let result = std::fs::read_to_string(&path)
            .map_err(crate::error::FlashdeckError::from)
            .and_then(|contents| json::import_all(&contents, &mut self.conn));

        match result {
            Ok(summary) => {
                self.reload_decks();
                self.show_message(format!(
                    "Import complete: {} decks, {} cards.",
                    summary.decks, summary.cards
                ));
            }
            Err(e) => self.show_message(format!("Import failed: {}", e.user_message())),
        }
    }

    /// Renders the main screen with deck list, card form and card gallery
    fn render_main_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // Import/Export buttons
            ui.horizontal(|ui| {
                if ui.button("Export All").clicked() {
                    self.handle_export();
                }
                if ui.button("Import").clicked() {
                    self.handle_import();
                }
            });

            ui.separator();

            // Deck creation section
            ui.heading("Create New Deck");
            ui.horizontal(|ui| {
                ui.label("Deck name:");
                ui.text_edit_singleline(&mut self.new_deck_name);
                if ui.button("Create Deck").clicked() {
                    self.handle_create_deck();
                }
            });

            ui.separator();

            ui.heading(format!("Decks ({})", self.decks.len()));

            // We store the clicked deck and select after rendering to avoid
            // borrowing conflicts
            let mut action_select: Option<Deck> = None;

            egui::ScrollArea::vertical()
                .id_salt("deck_list")
                .max_height(150.0)
                .show(ui, |ui| {
                    for deck in &self.decks {
                        let is_selected =
                            self.selected_deck.as_ref().map(|d| d.id) == Some(deck.id);
                        if ui.selectable_label(is_selected, &deck.name).clicked() {
                            action_select = Some(deck.clone());
                        }
                    }
                });

            if let Some(deck) = action_select {
                self.select_deck(deck);
            }

            ui.separator();

            // Card form and gallery for the selected deck
            if let Some(deck_name) = self.selected_deck.as_ref().map(|d| d.name.clone()) {
                ui.heading(format!("Selected Deck: {}", deck_name));

                ui.horizontal(|ui| {
                    ui.label("Front:");
                    ui.text_edit_singleline(&mut self.front_text);
                });
                ui.horizontal(|ui| {
                    ui.label("Back:");
                    ui.text_edit_singleline(&mut self.back_text);
                });

                Self::image_picker_row(ui, "Front image", &mut self.front_img_path);
                Self::image_picker_row(ui, "Back image", &mut self.back_img_path);

                if ui.button("Add Card").clicked() {
                    self.handle_add_card();
                }

                ui.separator();

                ui.heading(format!("Cards ({})", self.cards.len()));

                egui::ScrollArea::vertical()
                    .id_salt("card_gallery")
                    .show(ui, |ui| {
                        for card in &self.cards {
                            ui.group(|ui| {
                                ui.strong(&card.front_text);
                                Self::card_image(ui, card.id, "front", card.front_img.as_deref());
                                ui.label(&card.back_text);
                                Self::card_image(ui, card.id, "back", card.back_img.as_deref());
                            });
                        }
                    });
            } else {
                ui.label("Select a deck to add cards");
            }
        });
    }

    /// One row of the card form: pick or clear an optional image file
    fn image_picker_row(ui: &mut egui::Ui, label: &str, slot: &mut Option<PathBuf>) {
        ui.horizontal(|ui| {
            if ui.button(format!("{}...", label)).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
                    .pick_file()
                {
                    *slot = Some(path);
                }
            }
            match slot {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    ui.label(name);
                    if ui.button("Clear").clicked() {
                        *slot = None;
                    }
                }
                None => {
                    ui.weak("(none)");
                }
            }
        });
    }

    /// Renders an embedded image payload, or nothing when the card has none
    fn card_image(ui: &mut egui::Ui, card_id: i64, side: &str, payload: Option<&str>) {
        let Some(payload) = payload else {
            return;
        };
        if let Some(bytes) = images::decode_payload(payload) {
            ui.add(
                egui::Image::from_bytes(format!("bytes://card-{}-{}", card_id, side), bytes)
                    .max_width(200.0),
            );
        }
    }
}
