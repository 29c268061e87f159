//! GenerationGateway implementation for GeminiClient.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::image::ImageData;
use crate::research::{ResearchDepth, ResearchResult};
use crate::{GatewayError, GenerationGateway, HistoryEntry, ModelReply};

use super::client::{upstream_message, GeminiClient};

impl GeminiClient {
    /// POST a JSON body and return the decoded JSON response.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, GatewayError> {
        let api_key = self.config.resolve_api_key()?;

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Remote(upstream_message(status, &text)));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

#[async_trait]
impl GenerationGateway for GeminiClient {
    async fn send_chat_turn(
        &self,
        history: &[HistoryEntry],
        prompt: &str,
        system_instruction: &str,
    ) -> Result<ModelReply, GatewayError> {
        let body = self.build_chat_body(history, prompt, system_instruction);
        let url = self.generate_url(&self.config.chat_model);

        debug!(
            model = %self.config.chat_model,
            history = history.len(),
            "Gemini chat request"
        );

        let json = self.post_json(&url, &body).await?;
        self.parse_chat_response(&json)
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImageData, GatewayError> {
        let body = self.build_image_body(prompt);
        let url = self.predict_url();

        debug!(model = %self.config.image_model, "Imagen request");

        let json = self.post_json(&url, &body).await?;
        self.parse_image_response(&json)
    }

    async fn conduct_research(
        &self,
        query: &str,
        depth: ResearchDepth,
    ) -> Result<ResearchResult, GatewayError> {
        let model = self.config.research_model(depth).to_string();
        let body = self.build_research_body(query);
        let url = self.generate_url(&model);

        debug!(model = %model, depth = depth.as_str(), "Gemini research request");

        let json = self.post_json(&url, &body).await?;
        self.parse_research_response(&json)
    }
}
