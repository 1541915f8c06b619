use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardEntity {
    pub name: String,
}

impl CardEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Stable picture id derived from the card name (sum of char codes mod 1000).
    pub fn image_id(&self) -> u32 {
        self.name.chars().map(|c| c as u32).sum::<u32>() % 1000
    }

    pub fn image_url(&self) -> String {
        format!("https://picsum.photos/id/{}/250/400", self.image_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub card: CardEntity,
    pub is_reversed: bool,
}

impl DrawnCard {
    pub fn orientation_label(&self) -> &'static str {
        orientation_label(self.is_reversed)
    }
}

pub fn orientation_label(is_reversed: bool) -> &'static str {
    if is_reversed {
        "Reversed"
    } else {
        "Upright"
    }
}

/// Body sent from the reading client to the proxy.
///
/// A field that is absent or `null` takes its default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub card_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_reversed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ReadingRequest {
    pub fn for_card(drawn: &DrawnCard, question: impl Into<String>) -> Self {
        Self {
            card_name: drawn.card.name.clone(),
            is_reversed: drawn.is_reversed,
            question: question.into(),
        }
    }
}

/// Body sent back by the proxy: `{"text": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingResponse {
    Text { text: String },
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingSection {
    pub title: Option<String>,
    pub content: String,
}

/// Everything the provider needs for one generate call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingPrompt {
    pub system_instruction: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub top_k: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_fields() {
        let request = ReadingRequest {
            card_name: "The Tower".to_string(),
            is_reversed: true,
            question: String::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"cardName": "The Tower", "isReversed": true, "question": ""})
        );
    }

    #[test]
    fn test_request_fields_default_when_absent() {
        let request: ReadingRequest = serde_json::from_str(r#"{"cardName": "Death"}"#).unwrap();
        assert_eq!(request.card_name, "Death");
        assert!(!request.is_reversed);
        assert!(request.question.is_empty());
    }

    #[test]
    fn test_request_null_fields_take_defaults() {
        let request: ReadingRequest = serde_json::from_str(
            r#"{"cardName": null, "isReversed": null, "question": null}"#,
        )
        .unwrap();
        assert_eq!(request.card_name, "");
        assert!(!request.is_reversed);
        assert_eq!(request.question, "");

        let request: ReadingRequest =
            serde_json::from_str(r#"{"cardName": "The Star", "isReversed": true, "question": null}"#)
                .unwrap();
        assert_eq!(request.card_name, "The Star");
        assert!(request.is_reversed);
        assert!(request.question.is_empty());
    }

    #[test]
    fn test_request_wrong_type_is_rejected() {
        assert!(serde_json::from_str::<ReadingRequest>(r#"{"cardName": 7}"#).is_err());
    }

    #[test]
    fn test_response_shapes() {
        let ok: ReadingResponse = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(ok, ReadingResponse::Text { text: "hello".to_string() });

        let err: ReadingResponse = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(err, ReadingResponse::Error { error: "nope".to_string() });
    }

    #[test]
    fn test_image_id_is_stable() {
        let card = CardEntity::new("The Fool");
        assert_eq!(card.image_id(), card.image_id());
        assert!(card.image_id() < 1000);
        assert!(card.image_url().starts_with("https://picsum.photos/id/"));
    }
}
