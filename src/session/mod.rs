//! Session lifecycle and context pinning
//!
//! A session is a conversational state container on the remote service. A
//! batch either shares one session (when an initial utterance seeds state
//! the later turns depend on) or probes with a fresh session per sample.

mod context;
mod spec;

pub use context::{ContextOverride, DEFAULT_CONTEXT_LIFESPAN};
pub use spec::{SessionSpec, SessionStrategy};
