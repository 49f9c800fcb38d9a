use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AdvisorError;

// Body of POST /api/medical-advisor. Fields stay loosely typed so a wrong
// type on an optional field never rejects the whole request.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    #[serde(default)]
    pub symptoms: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub existing_conditions: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
}

impl AdviceRequest {
    // symptoms must be a non-empty string
    pub fn symptoms(&self) -> Result<&str, AdvisorError> {
        match &self.symptoms {
            Some(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Err(AdvisorError::Validation),
        }
    }

    pub fn age_or_default(&self) -> String {
        text_or(self.age.as_ref(), "Not provided")
    }

    pub fn conditions_or_default(&self) -> String {
        text_or(self.existing_conditions.as_ref(), "None")
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_ref().and_then(Value::as_str)
    }
}

// Renders an optional field, empty-ish values fall back to the default
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => default.to_string(),
        Some(Value::String(s)) if s.is_empty() => default.to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        // 42.0 prints as 42
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AdviceResponse {
    pub answer: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// Chat completion API request format
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// Chat completion API response format, only the parts we read
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    // content of the first choice, empty content counts as missing
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> AdviceRequest {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn symptoms_must_be_non_empty_string() {
        assert!(parse(json!({})).symptoms().is_err());
        assert!(parse(json!({ "symptoms": "" })).symptoms().is_err());
        assert!(parse(json!({ "symptoms": 12 })).symptoms().is_err());
        assert!(parse(json!({ "symptoms": ["fever"] })).symptoms().is_err());
        assert_eq!(parse(json!({ "symptoms": "fever" })).symptoms().unwrap(), "fever");
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let req = parse(json!({ "symptoms": "fever" }));
        assert_eq!(req.age_or_default(), "Not provided");
        assert_eq!(req.conditions_or_default(), "None");

        let req = parse(json!({ "symptoms": "fever", "age": "", "existingConditions": null }));
        assert_eq!(req.age_or_default(), "Not provided");
        assert_eq!(req.conditions_or_default(), "None");
    }

    #[test]
    fn age_accepts_string_or_number() {
        assert_eq!(parse(json!({ "age": 42 })).age_or_default(), "42");
        assert_eq!(parse(json!({ "age": "42 years" })).age_or_default(), "42 years");
        assert_eq!(parse(json!({ "age": 0 })).age_or_default(), "Not provided");
        assert_eq!(parse(json!({ "age": 42.0 })).age_or_default(), "42");
        assert_eq!(parse(json!({ "age": 42.5 })).age_or_default(), "42.5");
    }

    #[test]
    fn wrong_typed_language_is_ignored() {
        let req = parse(json!({ "symptoms": "fever", "language": 7 }));
        assert_eq!(req.language(), None);
    }

    #[test]
    fn first_content_skips_missing_message() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": "" } }] })).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "cmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "rest" } }]
        }))
        .unwrap();
        assert_eq!(resp.first_content(), Some("rest"));
    }
}
