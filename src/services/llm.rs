use crate::config::LlmSettings;
use crate::models::{Answer, AnswerValue, DealbreakerMode, Priority, Scalar};
use crate::services::cache::{CacheKey, CacheStats, ExplanationCache};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when asking the language model for an explanation
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Language model returned no text")]
    EmptyResponse,

    #[error("No API key configured for the language model")]
    MissingApiKey,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Shared system prompt for every role
pub const SYSTEM_PROMPT: &str = "You are a helpful, evidence-based dog expert assistant. \
Use only verified dog breed standard knowledge (AKC-style or similarly trustworthy sources). \
If you are uncertain about something, say you're unsure rather than guessing. \
Frame your responses to align dog welfare with the user's lifestyle. \
Be clear, concise, and avoid unnecessary fluff. \
Focus on finding the right owner and lifestyle for the dog breed rather than on pleasing the user.";

/// What the user wants explained, with the context for the prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum ExplanationRequest {
    ExplainTrait {
        #[serde(rename = "trait")]
        trait_key: String,
    },
    #[serde(rename_all = "camelCase")]
    WhyMatch {
        breed: String,
        match_percentage: f64,
        answers_summary: String,
    },
    CareTips {
        breed: String,
    },
    #[serde(rename_all = "camelCase")]
    WhyNot {
        breed: String,
        answers_summary: String,
    },
}

impl ExplanationRequest {
    pub fn role_name(&self) -> &'static str {
        match self {
            ExplanationRequest::ExplainTrait { .. } => "explainTrait",
            ExplanationRequest::WhyMatch { .. } => "whyMatch",
            ExplanationRequest::CareTips { .. } => "careTips",
            ExplanationRequest::WhyNot { .. } => "whyNot",
        }
    }

    pub fn user_prompt(&self) -> String {
        match self {
            ExplanationRequest::ExplainTrait { trait_key } => format!(
                "Explain the dog trait \"{}\" in a friendly, practical way for someone deciding on a match.",
                trait_key
            ),
            ExplanationRequest::WhyMatch { breed, match_percentage, answers_summary } => format!(
                "The user gave preferences: {}. Explain why the breed \"{}\" scored {}%. \
                 Highlight strengths, mismatches, and one actionable suggestion to adjust preferences \
                 to improve the match, but only if the user can be sure to fulfil the dog's needs.",
                answers_summary, breed, match_percentage
            ),
            ExplanationRequest::CareTips { breed } => format!(
                "Provide responsible care advice for a \"{}\". Cover daily exercise, grooming, \
                 common health concerns, and what an owner must be prepared for to keep this breed \
                 happy and healthy.",
                breed
            ),
            ExplanationRequest::WhyNot { breed, answers_summary } => format!(
                "The user expected the breed \"{}\" but did not get it as a top match. \
                 Given their preferences: {}, explain clearly why that breed was not selected, \
                 focusing on conflicts or missing priority alignment.",
                breed, answers_summary
            ),
        }
    }

    pub fn cache_key(&self) -> Result<String, LlmError> {
        let context = serde_json::to_string(self)?;
        Ok(CacheKey::explanation(self.role_name(), &context))
    }
}

fn format_scalar(value: &Scalar) -> String {
    match value {
        Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Scalar::Number(n) => n.to_string(),
        Scalar::Text(s) => format!("{:?}", s),
    }
}

fn format_answer_value(value: &AnswerValue) -> String {
    match value {
        AnswerValue::One(v) => format_scalar(v),
        AnswerValue::Many(vs) => {
            let items: Vec<String> = vs.iter().map(format_scalar).collect();
            format!("[{}]", items.join(","))
        }
    }
}

/// One-line description of the user's answers for prompts
///
/// e.g. `energyLevel: [4]; coatType: ["curly"] (exclude dealbreaker)`
pub fn summarize_answers(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|a| {
            let mut desc = format!("{}: {}", a.trait_key, format_answer_value(&a.value));
            if a.dealbreaker {
                desc.push_str(match a.mode {
                    DealbreakerMode::Exclude => " (exclude dealbreaker)",
                    DealbreakerMode::Accept => " (accept dealbreaker)",
                });
            }
            match a.priority {
                Some(Priority::High) => desc.push_str(" (high priority)"),
                Some(Priority::Low) => desc.push_str(" (flexible)"),
                _ => {}
            }
            desc
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Client for an OpenAI-compatible chat completion API
pub struct LlmClient {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    client: Client,
    cache: ExplanationCache,
}

impl LlmClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            client,
            cache: ExplanationCache::new(settings.cache_capacity, settings.cache_ttl_secs),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Generate (or reuse a cached) explanation
    pub async fn explain(&self, request: &ExplanationRequest) -> Result<String, LlmError> {
        let cache_key = request.cache_key()?;
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": request.user_prompt() },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        tracing::debug!("Requesting {} explanation from {}", request.role_name(), self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(LlmError::ApiError { status, body });
        }

        let json: Value = response.json().await?;

        let explanation = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        self.cache.insert(cache_key, explanation.clone()).await;

        Ok(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: &str, api_key: Option<&str>) -> LlmSettings {
        LlmSettings {
            endpoint: endpoint.to_string(),
            api_key: api_key.map(str::to_string),
            ..LlmSettings::default()
        }
    }

    fn completion(text: &str) -> String {
        json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] }).to_string()
    }

    #[test]
    fn test_summarize_answers() {
        let answers: Vec<Answer> = serde_json::from_str(
            r#"[
                {"trait": "energyLevel", "value": [4], "priority": "high"},
                {"trait": "coatType", "value": ["curly", "wire"], "dealbreaker": true, "mode": "exclude"},
                {"trait": "livingEnvironment", "value": "urban", "dealbreaker": true, "priority": "low"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            summarize_answers(&answers),
            r#"energyLevel: [4] (high priority); coatType: ["curly","wire"] (exclude dealbreaker); livingEnvironment: "urban" (accept dealbreaker) (flexible)"#
        );
    }

    #[test]
    fn test_prompts_mention_context() {
        let request = ExplanationRequest::WhyMatch {
            breed: "Poodle".into(),
            match_percentage: 86.0,
            answers_summary: "energyLevel: [4]".into(),
        };
        let prompt = request.user_prompt();
        assert!(prompt.contains("\"Poodle\" scored 86%"));
        assert!(prompt.contains("energyLevel: [4]"));
        assert_eq!(request.role_name(), "whyMatch");
    }

    #[test]
    fn test_cache_key_is_role_scoped() {
        let trait_key = ExplanationRequest::ExplainTrait { trait_key: "Akita".into() }.cache_key().unwrap();
        let tips = ExplanationRequest::CareTips { breed: "Akita".into() }.cache_key().unwrap();
        assert!(trait_key.starts_with("explainTrait::"));
        assert_ne!(trait_key, tips);
    }

    #[tokio::test]
    async fn test_explain_calls_api_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion("  Akitas need firm, patient training.  "))
            .expect(1)
            .create_async()
            .await;

        let client = LlmClient::new(&settings(&server.url(), Some("test_key"))).unwrap();
        let request = ExplanationRequest::CareTips { breed: "Akita".into() };

        let first = client.explain(&request).await.unwrap();
        let second = client.explain(&request).await.unwrap();

        assert_eq!(first, "Akitas need firm, patient training.");
        assert_eq!(first, second);
        assert_eq!(client.cache_stats().ttl_secs, 600);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_explain_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client = LlmClient::new(&settings(&server.url(), Some("test_key"))).unwrap();
        let err = client
            .explain(&ExplanationRequest::ExplainTrait { trait_key: "shedding".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::ApiError { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_explain_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = LlmClient::new(&settings(&server.url(), Some("test_key"))).unwrap();
        let err = client
            .explain(&ExplanationRequest::CareTips { breed: "Basenji".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = LlmClient::new(&settings("http://127.0.0.1:9", Some("  "))).unwrap();
        let err = client
            .explain(&ExplanationRequest::CareTips { breed: "Beagle".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
