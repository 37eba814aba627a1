//! Deck is a named grouping of cards
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_roundtrips_through_json() {
        let deck = Deck {
            id: 3,
            name: "Polish Vocabulary".to_string(),
        };

        let json = serde_json::to_string(&deck).unwrap();
        assert!(json.contains("\"id\":3"));
        assert!(json.contains("\"name\":\"Polish Vocabulary\""));

        let parsed: Deck = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, deck);
    }
}
