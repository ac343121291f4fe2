use crate::session::ContextOverride;
use anyhow::Result;
use uuid::Uuid;

/// One detection request, built fresh per call and never reused.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    pub session_id: Uuid,
    pub audio: Vec<u8>,
    pub language_code: String,
    /// Wire name of the audio encoding (e.g. `AUDIO_ENCODING_FLAC`)
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub context: ContextOverride,
}

/// Raw response fields of the remote capability, before normalization.
#[derive(Debug, Clone, Default)]
pub struct ServiceResponse {
    pub query_text: String,
    pub fulfillment_text: String,
    pub intent: Option<DetectedIntent>,
    pub confidence: Option<f32>,
    /// Structured parameter payload, still as raw JSON
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct DetectedIntent {
    pub name: String,
    pub is_fallback: bool,
}

/// Remote speech/intent-detection capability.
///
/// Implementations submit one audio utterance under a session and return
/// the detection outcome. The harness calls this exactly once per sample
/// and never retries.
#[async_trait::async_trait]
pub trait IntentService: Send + Sync {
    async fn detect_intent(&self, request: DetectionRequest) -> Result<ServiceResponse>;

    /// Service name for logging.
    fn name(&self) -> &str;
}
