//! Card is a front/back pair of texts, each side with an optional embedded image
use serde::{Deserialize, Serialize};

/// One flashcard. `deck_id` is a plain reference, not enforced by the
/// storage layer: an imported card may point at a deck that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub deck_id: i64,
    pub front_text: String,
    pub back_text: String,
    #[serde(default)]
    pub front_img: Option<String>,
    #[serde(default)]
    pub back_img: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serializes_with_camel_case_fields() {
        let card = Card {
            id: 1,
            deck_id: 2,
            front_text: "cześć".to_string(),
            back_text: "hello".to_string(),
            front_img: None,
            back_img: None,
        };

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"deckId\":2"));
        assert!(json.contains("\"frontText\":\"cześć\""));
        assert!(json.contains("\"backText\":\"hello\""));
        assert!(json.contains("\"frontImg\":null"));
        assert!(json.contains("\"backImg\":null"));
    }

    #[test]
    fn test_card_parses_without_image_fields() {
        let json = r#"{"id":1,"deckId":2,"frontText":"a","backText":"b"}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.front_img, None);
        assert_eq!(card.back_img, None);
    }

    #[test]
    fn test_card_keeps_image_payloads() {
        let json = r#"{"id":1,"deckId":2,"frontText":"a","backText":"b",
                       "frontImg":"data:image/png;base64,AAAA","backImg":null}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.front_img.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(card.back_img, None);
    }
}
