//! Generative-AI HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::GenAiConfig;
use crate::error::{GenAiError, GenAiResult};
use crate::types::{
    ApiKey, GenerateContentRequest, GenerateContentResponse, GeneratedVideo, Operation,
    PredictLongRunningRequest, ServiceErrorEnvelope, VideoInstance, VideoRequest,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The two outbound capabilities the studio depends on.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate free text. `Ok(None)` means the service answered without text.
    async fn generate_text(&self, api_key: Option<&ApiKey>, prompt: &str)
        -> GenAiResult<Option<String>>;

    /// Render a video and wait until the job finishes.
    async fn generate_video(
        &self,
        api_key: Option<&ApiKey>,
        request: &VideoRequest,
    ) -> GenAiResult<GeneratedVideo>;
}

/// Client for the generative-AI REST API.
pub struct GenAiClient {
    http: Client,
    config: GenAiConfig,
}

impl GenAiClient {
    /// Create a new client.
    pub fn new(config: GenAiConfig) -> GenAiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenAiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        Self::new(GenAiConfig::from_env())
    }

    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }

    /// Call one text model.
    async fn call_text_model(
        &self,
        api_key: &ApiKey,
        model: &str,
        prompt: &str,
    ) -> GenAiResult<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let body: GenerateContentResponse = parse_response(response).await?;
        Ok(body.text())
    }

    /// Submit a render and return the operation handle.
    async fn submit_video(&self, api_key: &ApiKey, request: &VideoRequest) -> GenAiResult<Operation> {
        let url = format!(
            "{}/models/{}:predictLongRunning",
            self.config.base_url, self.config.video_model
        );

        let body = PredictLongRunningRequest {
            instances: vec![VideoInstance {
                prompt: &request.prompt,
            }],
            parameters: &request.config,
        };

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(&body)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Fetch the current state of an operation.
    async fn get_operation(&self, api_key: &ApiKey, name: &str) -> GenAiResult<Operation> {
        let url = format!("{}/{}", self.config.base_url, name.trim_start_matches('/'));

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, api_key.expose())
            .send()
            .await?;

        parse_response(response).await
    }

    /// Poll until the operation reports done.
    async fn wait_for_operation(&self, api_key: &ApiKey, mut operation: Operation) -> GenAiResult<Operation> {
        let mut polls = 0u32;
        while !operation.done {
            tokio::time::sleep(self.config.poll_interval).await;
            polls += 1;
            debug!(operation = %operation.name, polls, "Polling video operation");
            operation = self.get_operation(api_key, &operation.name).await?;
        }
        info!(operation = %operation.name, polls, "Video operation finished");
        Ok(operation)
    }
}

#[async_trait]
impl GenerativeBackend for GenAiClient {
    async fn generate_text(
        &self,
        api_key: Option<&ApiKey>,
        prompt: &str,
    ) -> GenAiResult<Option<String>> {
        let api_key = api_key.ok_or(GenAiError::MissingApiKey)?;

        let mut last_error = None;

        for model in &self.config.text_models {
            info!("Attempting text generation with model: {}", model);
            match self.call_text_model(api_key, model, prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_credential_rejected() => return Err(e),
                Err(e) => {
                    warn!("Failed with model {}: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GenAiError::InvalidResponse("No text models configured".to_string())))
    }

    async fn generate_video(
        &self,
        api_key: Option<&ApiKey>,
        request: &VideoRequest,
    ) -> GenAiResult<GeneratedVideo> {
        let api_key = api_key.ok_or(GenAiError::MissingApiKey)?;

        info!(model = %self.config.video_model, "Submitting video generation");
        debug!("Video prompt: {}", request.prompt);

        let operation = self.submit_video(api_key, request).await?;
        let operation = self.wait_for_operation(api_key, operation).await?;

        if let Some(error) = &operation.error {
            return Err(GenAiError::from_operation(error.message.clone()));
        }

        let uri = operation.video_uri().ok_or(GenAiError::EmptyResult)?;

        Ok(GeneratedVideo {
            uri: uri.to_string(),
            prompt: request.prompt.clone(),
        })
    }
}

/// Decode a success body or turn an error status into a [`GenAiError`].
async fn parse_response<T: DeserializeOwned>(response: Response) -> GenAiResult<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ServiceErrorEnvelope>(&text) {
            Ok(envelope) => {
                debug!(code = ?envelope.error.code, "Service error payload");
                envelope.error.message
            }
            Err(_) => text,
        };
        return Err(GenAiError::from_service(status.as_u16(), message));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(GenAiError::Json)
}
