use std::time::Duration;

use thiserror::Error;

use crate::genai::ChatTurn;
use crate::session::QuizQuestion;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[cfg(not(feature = "network"))]
    #[error("built without the network feature")]
    Disabled,
    #[error("no api key configured")]
    MissingKey,
    #[cfg(feature = "network")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "network")]
    #[error("api returned status {0}")]
    Status(u16),
    #[cfg(feature = "network")]
    #[error("completion was empty")]
    Empty,
    #[cfg(feature = "network")]
    #[error("malformed completion payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Thin client for the Gemini generateContent endpoint. Both calls are
/// one-shot blocking requests with a bounded timeout; callers run them off
/// the UI thread and contain every error at the genai module boundary.
pub struct GeminiClient {
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(feature = "network")]
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerateContentRequest {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub system_instruction: Option<Content>,
        pub contents: Vec<Content>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub generation_config: Option<serde_json::Value>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct Content {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub role: Option<String>,
        pub parts: Vec<Part>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct Part {
        pub text: String,
    }

    #[derive(Deserialize)]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    pub struct Candidate {
        pub content: Content,
    }

    impl Content {
        pub fn text(text: String, role: Option<&str>) -> Self {
            Self {
                role: role.map(str::to_string),
                parts: vec![Part { text }],
            }
        }

        pub fn joined_text(&self) -> String {
            self.parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        }
    }
}

#[cfg(feature = "network")]
impl GeminiClient {
    const ENDPOINT: &'static str = "https://generativelanguage.googleapis.com/v1beta/models";

    pub fn generate_reply(
        &self,
        history: &[ChatTurn],
        message: &str,
        context: &str,
    ) -> Result<String, GenAiError> {
        let system = format!(
            "You are FASN, an advanced AI Tutor for MBA students in a cyberpunk future. \
             Your tone is helpful but slightly technical. You act as a mentor. Keep answers \
             concise (under 150 words) unless asked for elaboration. Context provided: {context}. \
             Only answer questions related to the course material. If asked about something \
             else, politely decline in character."
        );

        let mut contents: Vec<wire::Content> = history
            .iter()
            .map(|turn| wire::Content::text(turn.text.clone(), Some(turn.role.as_wire())))
            .collect();
        contents.push(wire::Content::text(message.to_string(), Some("user")));

        let request = wire::GenerateContentRequest {
            system_instruction: Some(wire::Content::text(system, None)),
            contents,
            generation_config: None,
        };

        let text = self.post(&request)?;
        if text.trim().is_empty() {
            return Err(GenAiError::Empty);
        }
        Ok(text)
    }

    pub fn generate_questions(
        &self,
        topic: &str,
        difficulty: &str,
    ) -> Result<Vec<QuizQuestion>, GenAiError> {
        let prompt = format!(
            "Generate a set of {count} multiple-choice questions for the MBA topic: \"{topic}\". \
             Difficulty Level: {difficulty}. Ensure the questions test conceptual understanding. \
             Provide 4 options per question.",
            count = crate::genai::QUESTIONS_PER_QUIZ,
        );

        let schema = serde_json::json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "question": { "type": "STRING" },
                    "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "correctAnswer": { "type": "STRING" }
                },
                "required": ["question", "options", "correctAnswer"]
            }
        });

        let request = wire::GenerateContentRequest {
            system_instruction: None,
            contents: vec![wire::Content::text(prompt, Some("user"))],
            generation_config: Some(serde_json::json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            })),
        };

        let text = self.post(&request)?;
        let questions: Vec<QuizQuestion> = serde_json::from_str(&text)?;
        Ok(questions)
    }

    fn post(&self, request: &wire::GenerateContentRequest) -> Result<String, GenAiError> {
        let url = format!(
            "{endpoint}/{model}:generateContent?key={key}",
            endpoint = Self::ENDPOINT,
            model = self.model,
            key = self.api_key,
        );
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.post(&url).json(request).send()?;
        if !response.status().is_success() {
            return Err(GenAiError::Status(response.status().as_u16()));
        }
        let body: wire::GenerateContentResponse = response.json()?;
        let text = body
            .candidates
            .first()
            .map(|c| c.content.joined_text())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GenAiError::Empty);
        }
        Ok(text)
    }
}

#[cfg(not(feature = "network"))]
impl GeminiClient {
    pub fn generate_reply(
        &self,
        _history: &[ChatTurn],
        _message: &str,
        _context: &str,
    ) -> Result<String, GenAiError> {
        Err(GenAiError::Disabled)
    }

    pub fn generate_questions(
        &self,
        _topic: &str,
        _difficulty: &str,
    ) -> Result<Vec<QuizQuestion>, GenAiError> {
        Err(GenAiError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_keeps_configured_model() {
        let client = GeminiClient::new(
            "key".to_string(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(15),
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[cfg(feature = "network")]
    #[test]
    fn response_text_joins_parts() {
        let body: wire::GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"alpha "},{"text":"beta"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.candidates[0].content.joined_text(), "alpha beta");
    }

    #[cfg(feature = "network")]
    #[test]
    fn question_payload_decodes_from_wire_json() {
        let text = r#"[{"question":"What does EOQ minimize?",
                        "options":["Total holding and ordering cost","Lead time","Safety stock","Demand"],
                        "correctAnswer":"Total holding and ordering cost"}]"#;
        let questions: Vec<QuizQuestion> = serde_json::from_str(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].is_consistent());
    }
}
