use crate::error::AdvisorError;
use crate::models::{AdviceRequest, ChatCompletionRequest, ChatMessage};

pub const TEMPERATURE: f32 = 0.5;
pub const MAX_TOKENS: u32 = 1000;

// Response language, only an exact "hindi" switches away from English
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    pub fn from_request(value: Option<&str>) -> Self {
        match value {
            Some("hindi") => Language::Hindi,
            _ => Language::English,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }
}

pub fn system_instruction(language: Language) -> String {
    format!(
        "You are a helpful and responsible medical advisor. Respond in {}. \
         Never give dosages or act as a substitute for doctors.",
        language.name()
    )
}

pub fn advice_prompt(age: &str, conditions: &str, symptoms: &str, language: Language) -> String {
    format!(
        "
You are a responsible AI medical advisor. Based on the following details:

- Age: {age}
- Existing Conditions: {conditions}
- Symptoms: {symptoms}

Respond in {lang} with:
1. Likely possible causes (in simple terms)
2. Urgency level (Low / Moderate / High) with explanation
3. Recommended next steps (doctor visit, home remedy, etc.)
4. Warning signs that need immediate medical help
5. Common OTC medicines (only names, NO dosage)
6. Disclaimer: This is NOT a substitute for professional medical advice. Consult a licensed physician for proper diagnosis and treatment.
",
        lang = language.name()
    )
}

// Validates the body and turns it into the single upstream call
pub fn build_completion_request(
    model: &str,
    req: &AdviceRequest,
) -> Result<ChatCompletionRequest, AdvisorError> {
    let symptoms = req.symptoms()?;
    let language = Language::from_request(req.language());
    let prompt = advice_prompt(
        &req.age_or_default(),
        &req.conditions_or_default(),
        symptoms,
        language,
    );

    Ok(ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(system_instruction(language)),
            ChatMessage::user(prompt),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    })
}
