pub mod database;
pub mod error;
pub mod export;
pub mod images;
pub mod models;

pub use error::{FlashdeckError, Result};
pub use models::{Card, Deck};
