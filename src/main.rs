mod app;
use flashdeck_app::*;

use app::FlashdeckApp;
use database::db::init_database;
use log::error;

/// Database file used when the FLASHDECK_DB override is not set.
const DB_FILE: &str = "flashdeck.sqlite3";

fn main() -> eframe::Result<()> {
    env_logger::init();

    let db_path = std::env::var("FLASHDECK_DB").unwrap_or_else(|_| DB_FILE.to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashdeck",
        options,
        Box::new(move |cc| {
            // Needed so the card gallery can decode embedded image payloads
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let conn = match init_database(&db_path) {
                Ok(conn) => conn,
                Err(e) => {
                    error!("Cannot open card database '{}': {}", db_path, e);
                    return Err(format!("Cannot open card database: {e}").into());
                }
            };
            match FlashdeckApp::new(conn) {
                Ok(flashdeck) => Ok(Box::new(flashdeck)),
                Err(e) => {
                    error!("Failed to load decks: {}", e);
                    Err(format!("Failed to load decks: {e}").into())
                }
            }
        }),
    )
}
