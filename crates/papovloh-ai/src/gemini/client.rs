//! Gemini API client struct, request building, and response parsing.

use serde_json::{json, Value};
use tracing::debug;

use crate::image::ImageData;
use crate::research::{extract_sources, ResearchResult};
use crate::tools::{to_gemini_tool, ToolDefinition, ToolInvocation};
use crate::{GatewayError, HistoryEntry, ModelReply};

use super::config::GeminiConfig;

/// MIME type requested from the image model.
pub(crate) const IMAGE_MIME: &str = "image/jpeg";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) tools: Vec<ToolDefinition>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http,
            tools: crate::tools::tool_declarations(),
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn generate_url(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.config.base_url, model)
    }

    pub(crate) fn predict_url(&self) -> String {
        format!("{}/{}:predict", self.config.base_url, self.config.image_model)
    }

    /// Build the `generateContent` body for a chat turn: prior history,
    /// the new user prompt, the persona instruction, and both tools.
    pub(crate) fn build_chat_body(
        &self,
        history: &[HistoryEntry],
        prompt: &str,
        system_instruction: &str,
    ) -> Value {
        let mut contents: Vec<Value> = history
            .iter()
            .map(|entry| {
                json!({
                    "role": entry.role.as_str(),
                    "parts": [{ "text": entry.text }]
                })
            })
            .collect();
        contents.push(json!({
            "role": "user",
            "parts": [{ "text": prompt }]
        }));

        let tool_defs: Vec<_> = self.tools.iter().map(to_gemini_tool).collect();

        json!({
            "contents": contents,
            "systemInstruction": { "parts": [{ "text": system_instruction }] },
            "tools": [{ "functionDeclarations": tool_defs }],
            "generationConfig": { "temperature": self.config.temperature }
        })
    }

    pub(crate) fn build_image_body(&self, prompt: &str) -> Value {
        json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": 1,
                "outputMimeType": IMAGE_MIME,
                "aspectRatio": "1:1"
            }
        })
    }

    pub(crate) fn build_research_body(&self, query: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": research_prompt(query) }]
            }],
            "tools": [{ "google_search": {} }]
        })
    }

    /// Parse a chat `generateContent` response. Any function call turns the
    /// whole reply into `ToolCalls`; its accompanying text is dropped.
    pub(crate) fn parse_chat_response(&self, json: &Value) -> Result<ModelReply, GatewayError> {
        let parts = first_candidate_parts(json)?;

        let mut text = String::new();
        let mut calls = Vec::new();
        for part in parts {
            if let Some(t) = part["text"].as_str() {
                text.push_str(t);
            }
            if let Some(fc) = part.get("functionCall") {
                let name = fc["name"].as_str().unwrap_or("");
                calls.push(ToolInvocation::from_call(name, &fc["args"]));
            }
        }

        log_usage(json);

        if calls.is_empty() {
            Ok(ModelReply::PlainText(text))
        } else {
            Ok(ModelReply::ToolCalls(calls))
        }
    }

    pub(crate) fn parse_image_response(&self, json: &Value) -> Result<ImageData, GatewayError> {
        let prediction = &json["predictions"][0];
        let Some(bytes) = prediction["bytesBase64Encoded"].as_str() else {
            return Err(GatewayError::Remote(
                "Image generation failed or returned no images.".into(),
            ));
        };
        let mime = prediction["mimeType"].as_str().unwrap_or(IMAGE_MIME);
        Ok(ImageData::new(mime, bytes))
    }

    pub(crate) fn parse_research_response(
        &self,
        json: &Value,
    ) -> Result<ResearchResult, GatewayError> {
        let parts = first_candidate_parts(json)?;
        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        log_usage(json);
        Ok(ResearchResult {
            text,
            sources: extract_sources(json),
        })
    }
}

/// The research request wraps the query so the answer stays in character.
pub(crate) fn research_prompt(query: &str) -> String {
    format!("Проведи исследование по теме: \"{query}\". Ответ должен быть в стиле Попова лоха.")
}

fn first_candidate_parts(json: &Value) -> Result<Vec<Value>, GatewayError> {
    let candidates = json["candidates"].as_array();
    let Some(first) = candidates.and_then(|c| c.first()) else {
        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(GatewayError::Remote(format!("prompt blocked: {reason}")));
        }
        return Err(GatewayError::Parse("no candidates in response".to_string()));
    };
    Ok(first["content"]["parts"]
        .as_array()
        .cloned()
        .unwrap_or_default())
}

fn log_usage(json: &Value) {
    let meta = &json["usageMetadata"];
    if meta.is_object() {
        debug!(
            input_tokens = meta["promptTokenCount"].as_u64().unwrap_or(0),
            output_tokens = meta["candidatesTokenCount"].as_u64().unwrap_or(0),
            "Gemini usage"
        );
    }
}

/// Turn a non-success HTTP response body into the upstream's own message
/// when it sent one.
pub(crate) fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));
    match message {
        Some(msg) => format!("HTTP {status}: {msg}"),
        None => format!("HTTP {status}: {body}"),
    }
}
