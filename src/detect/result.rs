use serde_json::Value;
use std::collections::BTreeMap;

/// Normalized outcome of one successful detection call.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Sample identifier (the audio filename)
    pub sample: String,
    pub query_text: String,
    pub fulfillment_text: String,
    pub intent_name: Option<String>,
    pub intent_is_fallback: bool,
    pub intent_confidence: Option<f32>,
    /// Decoded structured parameters, keyed deterministically
    pub parameters: BTreeMap<String, Value>,
}

impl DetectionResult {
    /// Render the per-sample report lines, in emission order.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Query: {}", self.query_text),
            format!("Response: {}", self.fulfillment_text),
        ];

        match &self.intent_name {
            Some(name) => {
                let kind = if self.intent_is_fallback {
                    "fallback intent"
                } else {
                    "intent"
                };
                match self.intent_confidence {
                    Some(confidence) => {
                        lines.push(format!("Matched {}: {} ({:.2})", kind, name, confidence))
                    }
                    None => lines.push(format!("Matched {}: {}", kind, name)),
                }
            }
            None => lines.push("No intent matched".to_string()),
        }

        let parameters =
            serde_json::to_string(&self.parameters).unwrap_or_else(|_| "{}".to_string());
        lines.push(format!("Parameters: {}", parameters));

        lines
    }
}
