use super::service::{DetectedIntent, DetectionRequest, IntentService, ServiceResponse};
use anyhow::{Context, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_ROOT: &str = "https://dialogflow.googleapis.com/v2";

/// Dialogflow ES `detectIntent` client.
///
/// Speaks the v2 REST surface and authenticates with a bearer token (e.g.
/// the output of `gcloud auth print-access-token`). One HTTP call per
/// detection request; retries are the caller's decision and the harness
/// makes none.
pub struct DialogflowService {
    http: reqwest::Client,
    project_id: String,
    token: String,
}

impl DialogflowService {
    pub fn new(project_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            project_id: project_id.into(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    query_params: Option<QueryParams>,
    query_input: QueryInput,
    /// Base64-encoded audio bytes
    input_audio: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryParams {
    reset_contexts: bool,
    contexts: Vec<WireContext>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireContext {
    name: String,
    lifespan_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryInput {
    audio_config: WireAudioConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireAudioConfig {
    audio_encoding: String,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentReply {
    #[serde(default)]
    query_result: QueryResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    #[serde(default)]
    query_text: String,
    #[serde(default)]
    fulfillment_text: String,
    intent: Option<WireIntent>,
    intent_detection_confidence: Option<f32>,
    #[serde(default)]
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIntent {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    is_fallback: bool,
}

#[async_trait::async_trait]
impl IntentService for DialogflowService {
    async fn detect_intent(&self, request: DetectionRequest) -> Result<ServiceResponse> {
        let url = format!(
            "{}/projects/{}/agent/sessions/{}:detectIntent",
            API_ROOT, self.project_id, request.session_id
        );

        let query_params = request
            .context
            .pinned_context(&self.project_id, request.session_id)
            .map(|(name, lifespan)| QueryParams {
                reset_contexts: true,
                contexts: vec![WireContext {
                    name,
                    lifespan_count: lifespan,
                }],
            });

        let body = DetectIntentBody {
            query_params,
            query_input: QueryInput {
                audio_config: WireAudioConfig {
                    audio_encoding: request.encoding.clone(),
                    sample_rate_hertz: request.sample_rate_hertz,
                    language_code: request.language_code.clone(),
                },
            },
            input_audio: base64::engine::general_purpose::STANDARD.encode(&request.audio),
        };

        debug!("POST {} ({} audio bytes)", url, request.audio.len());

        let reply = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .context("detectIntent request failed")?
            .error_for_status()
            .context("detectIntent returned an error status")?
            .json::<DetectIntentReply>()
            .await
            .context("failed to decode detectIntent reply")?;

        let result = reply.query_result;

        Ok(ServiceResponse {
            query_text: result.query_text,
            fulfillment_text: result.fulfillment_text,
            intent: result.intent.map(|intent| DetectedIntent {
                name: intent.display_name,
                is_fallback: intent.is_fallback,
            }),
            confidence: result.intent_detection_confidence,
            parameters: result.parameters,
        })
    }

    fn name(&self) -> &str {
        "dialogflow"
    }
}
