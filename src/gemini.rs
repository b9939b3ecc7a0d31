//! Gemini API client for keysmith
//!
//! Provides next-word prediction, text assistance and palette generation.
//! The [`Assistant`] methods never fail: every error is logged and turned into
//! a fallback value at this boundary.

use crate::debug;
use crate::theme::{GeneratedPalette, ThemePatch};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Default model to use
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default REST endpoint root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sampling temperature for predictions
pub const DEFAULT_PREDICT_TEMPERATURE: f32 = 0.7;

/// Output cap for predictions
pub const DEFAULT_PREDICT_MAX_TOKENS: u32 = 20;

/// Output cap for text assistance
pub const DEFAULT_ASSIST_MAX_TOKENS: u32 = 50;

/// Suggestions for an empty context (no request is made)
pub const EMPTY_CONTEXT_PREDICTIONS: [&str; 3] = ["Hello", "I am", "The"];

/// Suggestions when a prediction request fails
pub const FALLBACK_PREDICTIONS: [&str; 3] = ["next", "and", "the"];

/// Text returned when assistance fails
pub const ASSIST_FALLBACK: &str = "Unable to assist right now.";

/// Maximum number of predicted words kept
pub const MAX_PREDICTIONS: usize = 3;

/// Environment variables consulted for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

// ==================== Wire Types ====================

/// Conversation role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A text part of a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One turn of the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Generation settings sent with a request
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GenerationConfig {
    /// Structured JSON output constrained by `schema`
    pub fn json(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Self::default()
        }
    }
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

/// Response from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

/// Token usage info
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Result of a generation
#[derive(Debug)]
pub struct CompletionResult {
    /// The generated text (first candidate, all text parts joined)
    pub text: String,

    /// Token usage
    pub usage: Option<UsageMetadata>,

    /// Finish reason of the first candidate
    pub finish_reason: Option<String>,
}

// ==================== HTTP ====================

/// HTTP response abstraction
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for HTTP operations (allows mocking)
#[cfg_attr(test, automock)]
pub trait HttpClient: Send + Sync {
    /// Send a POST request with JSON body
    fn post(&self, url: &str, headers: Vec<(String, String)>, body: String) -> Result<HttpResponse>;
}

/// Real HTTP client using ureq
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Default for UreqHttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HttpClient for UreqHttpClient {
    fn post(&self, url: &str, headers: Vec<(String, String)>, body: String) -> Result<HttpResponse> {
        let mut request = self.agent.post(url);
        for (key, value) in &headers {
            request = request.set(key, value);
        }
        match request.send_string(&body) {
            Ok(response) => {
                let status = response.status();
                let body = response.into_string().context("Failed to read response body")?;
                Ok(HttpResponse { status, body })
            }
            // Keep the body of 4xx/5xx replies so the API error message can be reported
            Err(ureq::Error::Status(status, response)) => Ok(HttpResponse {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(e).context("HTTP POST failed"),
        }
    }
}

// ==================== Assistant ====================

/// The three model-backed conveniences offered by the keyboard
///
/// Implementations never fail; they return a usable fallback instead.
#[cfg_attr(test, automock)]
pub trait Assistant: Send + Sync {
    /// Up to three likely next words for `context`
    fn predict_next_words(&self, context: &str) -> Vec<String>;

    /// A complete six-color palette for `prompt`, or `None` on any failure
    fn generate_theme(&self, prompt: &str) -> Option<ThemePatch>;

    /// An improved or completed version of `text`
    fn assist_text(&self, text: &str) -> String;
}

/// Gemini API client
pub struct GeminiClient<H: HttpClient = UreqHttpClient> {
    /// API key (may be empty; requests then fail and fall back)
    api_key: String,

    /// Model to use
    model: String,

    /// REST endpoint root
    base_url: String,

    /// Temperature for predictions
    predict_temperature: f32,

    /// Output cap for predictions
    predict_max_tokens: u32,

    /// Output cap for assistance
    assist_max_tokens: u32,

    /// HTTP client
    http: H,
}

impl GeminiClient<UreqHttpClient> {
    /// Create a new client
    ///
    /// API key is obtained from:
    /// 1. Provided api_key parameter
    /// 2. Environment variable `GEMINI_API_KEY`
    /// 3. Environment variable `API_KEY`
    ///
    /// A missing key is not an error here; requests will fail and fall back.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_http_client(
            checked_api_key(api_key),
            DEFAULT_MODEL.to_string(),
            UreqHttpClient::default(),
        )
    }

    /// Create client from the `[gemini]` config section
    pub fn from_config(config: &crate::config::GeminiConfig) -> Self {
        let mut client = Self::with_http_client(
            checked_api_key(config.api_key.clone()),
            config.model.clone(),
            UreqHttpClient::new(config.timeout()),
        );
        client.base_url = config.base_url.clone();
        client.predict_temperature = config.temperature;
        client.predict_max_tokens = config.predict_max_tokens;
        client.assist_max_tokens = config.assist_max_tokens;
        client
    }
}

impl<H: HttpClient> GeminiClient<H> {
    /// Create client with custom HTTP client (for testing)
    pub fn with_http_client(api_key: String, model: String, http: H) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            predict_temperature: DEFAULT_PREDICT_TEMPERATURE,
            predict_max_tokens: DEFAULT_PREDICT_MAX_TOKENS,
            assist_max_tokens: DEFAULT_ASSIST_MAX_TOKENS,
            http,
        }
    }

    /// Set the model to use
    pub fn set_model(&mut self, model: &str) {
        self.model = model.to_string();
    }

    /// Set the endpoint root
    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.to_string();
    }

    /// Get model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// `generateContent` URL for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send a single-turn prompt and get the generated text
    pub fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<CompletionResult> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: Some(config),
        };

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("x-goog-api-key".to_string(), self.api_key.clone()),
        ];

        let body = serde_json::to_string(&request).context("Failed to serialize request")?;

        let response = self
            .http
            .post(&self.endpoint(), headers, body)
            .context("Failed to send request to Gemini API")?;

        if response.status != 200 {
            let detail = serde_json::from_str::<ApiErrorBody>(&response.body)
                .map(|b| format!(" ({})", b.error.message))
                .unwrap_or_default();
            return Err(anyhow!("Gemini API error: HTTP {}{}", response.status, detail));
        }

        let response: GenerateContentResponse = serde_json::from_str(&response.body)
            .context("Failed to parse Gemini API response")?;

        let first = response.candidates.into_iter().next();
        let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
        let text = first
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(CompletionResult {
            text,
            usage: response.usage_metadata,
            finish_reason,
        })
    }

    /// Predict next words, reporting failures
    pub fn try_predict_next_words(&self, context: &str) -> Result<Vec<String>> {
        let config = GenerationConfig {
            temperature: Some(self.predict_temperature),
            max_output_tokens: Some(self.predict_max_tokens),
            ..GenerationConfig::default()
        };
        let result = self.generate(&predict_prompt(context), config)?;
        parse_predictions(&result.text).ok_or_else(|| anyhow!("Empty prediction response"))
    }

    /// Generate a palette, reporting failures
    pub fn try_generate_theme(&self, prompt: &str) -> Result<GeneratedPalette> {
        let result = self.generate(&theme_prompt(prompt), GenerationConfig::json(palette_schema()))?;
        parse_palette(&result.text)
    }

    /// Assist with text, reporting failures
    pub fn try_assist_text(&self, text: &str) -> Result<String> {
        let config = GenerationConfig {
            max_output_tokens: Some(self.assist_max_tokens),
            ..GenerationConfig::default()
        };
        let result = self.generate(&assist_prompt(text), config)?;
        Ok(result.text)
    }
}

impl<H: HttpClient> Assistant for GeminiClient<H> {
    fn predict_next_words(&self, context: &str) -> Vec<String> {
        if context.trim().is_empty() {
            return to_words(&EMPTY_CONTEXT_PREDICTIONS);
        }

        match self.try_predict_next_words(context) {
            Ok(words) => words,
            Err(e) => {
                debug::log_category("gemini", &format!("prediction error: {e:#}"));
                to_words(&FALLBACK_PREDICTIONS)
            }
        }
    }

    fn generate_theme(&self, prompt: &str) -> Option<ThemePatch> {
        match self.try_generate_theme(prompt) {
            Ok(palette) => Some(palette.into()),
            Err(e) => {
                debug::log_category("gemini", &format!("theme error: {e:#}"));
                None
            }
        }
    }

    fn assist_text(&self, text: &str) -> String {
        match self.try_assist_text(text) {
            Ok(help) => help,
            Err(e) => {
                debug::log_category("gemini", &format!("assist error: {e:#}"));
                ASSIST_FALLBACK.to_string()
            }
        }
    }
}

// ==================== Prompts and Parsing ====================

/// Resolve the API key from an explicit value or the environment
pub fn resolve_api_key(api_key: Option<String>) -> String {
    api_key
        .filter(|k| !k.is_empty())
        .or_else(|| {
            API_KEY_ENV_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|k| !k.is_empty()))
        })
        .unwrap_or_default()
}

fn checked_api_key(api_key: Option<String>) -> String {
    let key = resolve_api_key(api_key);
    if key.is_empty() {
        debug::log_category("gemini", "no API key configured; requests will fall back");
    }
    key
}

fn predict_prompt(context: &str) -> String {
    format!(
        "Given the sentence context: \"{context}\", predict exactly 3 likely next words.\n\
Provide them as a simple comma-separated list of words only."
    )
}

fn theme_prompt(description: &str) -> String {
    format!(
        "Generate a color palette for an on-screen keyboard based on this description: \"{description}\".\n\
Return a JSON object with properties: {}.\n\
Colors must be in hex format.",
        GeneratedPalette::FIELDS.join(", ")
    )
}

fn assist_prompt(text: &str) -> String {
    format!(
        "As an AI keyboard assistant, help me complete or improve this text: \"{text}\".\n\
Keep it brief and natural."
    )
}

/// Response schema for palette generation: six required string fields
pub fn palette_schema() -> Value {
    let properties: serde_json::Map<String, Value> = GeneratedPalette::FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": GeneratedPalette::FIELDS,
    })
}

/// Split a comma-separated model reply into at most three clean words
///
/// Tokens are trimmed and stripped of `"` and `.`; tokens left empty are
/// dropped. Returns `None` when nothing usable remains.
pub fn parse_predictions(text: &str) -> Option<Vec<String>> {
    let words: Vec<String> = text
        .split(',')
        .map(|token| token.trim().replace(['"', '.'], "").trim().to_string())
        .filter(|word| !word.is_empty())
        .take(MAX_PREDICTIONS)
        .collect();

    if words.is_empty() { None } else { Some(words) }
}

/// Parse and validate a generated palette
///
/// All six fields must be present and be valid hex colors. Unknown extra
/// fields are ignored.
pub fn parse_palette(text: &str) -> Result<GeneratedPalette> {
    serde_json::from_str(text.trim()).context("Failed to parse generated palette")
}

fn to_words(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
