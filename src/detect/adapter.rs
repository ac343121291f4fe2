use super::result::DetectionResult;
use super::service::{DetectionRequest, IntentService, ServiceResponse};
use crate::catalog::AudioSample;
use crate::config::Config;
use crate::error::HarnessError;
use crate::session::SessionSpec;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Run one detection call for one sample and normalize the response.
///
/// Reads the sample's audio, submits it under the given session, and
/// translates the raw response into a [`DetectionResult`]. Errors are
/// returned to the caller; logging them is the dispatcher's job, which
/// keeps this a pure request/response translator.
pub async fn detect(
    service: &dyn IntentService,
    session: &SessionSpec,
    sample: &AudioSample,
    config: &Config,
) -> Result<DetectionResult, HarnessError> {
    let audio = tokio::fs::read(&sample.path)
        .await
        .map_err(|source| HarnessError::AudioRead {
            path: sample.path.clone(),
            source,
        })?;

    debug!("Read {} audio bytes from {}", audio.len(), sample.filename);

    let request = DetectionRequest {
        session_id: session.id(),
        audio,
        language_code: config.language_code.clone(),
        encoding: config.audio.encoding.clone(),
        sample_rate_hertz: config.audio.sample_rate_hertz,
        context: session.context().clone(),
    };

    let response =
        service
            .detect_intent(request)
            .await
            .map_err(|cause| HarnessError::DetectionCall {
                sample: sample.filename.clone(),
                cause,
            })?;

    normalize(&sample.filename, response)
}

fn normalize(sample: &str, response: ServiceResponse) -> Result<DetectionResult, HarnessError> {
    let parameters = decode_parameters(sample, response.parameters)?;

    let (intent_name, intent_is_fallback) = match response.intent {
        Some(intent) => (Some(intent.name), intent.is_fallback),
        None => (None, false),
    };

    Ok(DetectionResult {
        sample: sample.to_string(),
        query_text: response.query_text,
        fulfillment_text: response.fulfillment_text,
        intent_name,
        intent_is_fallback,
        intent_confidence: response.confidence,
        parameters,
    })
}

/// Decode the structured parameter payload into a plain key/value mapping.
///
/// Nested mappings and arrays are kept as-is under their top-level key. An
/// absent payload decodes to an empty mapping; anything that is not a
/// mapping is a per-sample decode error.
fn decode_parameters(
    sample: &str,
    payload: Value,
) -> Result<BTreeMap<String, Value>, HarnessError> {
    match payload {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(HarnessError::Decode {
            sample: sample.to_string(),
            reason: format!("expected a mapping, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
