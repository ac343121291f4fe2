//! Detection client: request construction, the remote service seam, and
//! response normalization.

mod adapter;
mod dialogflow;
mod result;
mod service;

pub use adapter::detect;
pub use dialogflow::DialogflowService;
pub use result::DetectionResult;
pub use service::{DetectedIntent, DetectionRequest, IntentService, ServiceResponse};
