pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod run;
pub mod session;

pub use catalog::{AudioSample, Catalog};
pub use config::{AudioConfig, Config};
pub use detect::{
    DetectedIntent, DetectionRequest, DetectionResult, DialogflowService, IntentService,
    ServiceResponse,
};
pub use error::HarnessError;
pub use run::{LogCache, LogEntry, LogLevel, LogSink, RunDispatcher, RunReport, TracingSink};
pub use session::{ContextOverride, SessionSpec, SessionStrategy};
