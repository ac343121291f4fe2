use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Cloud project that owns the dialog agent
    pub project_id: String,
    /// BCP-47 language tag sent with every detection request
    pub language_code: String,
    /// Directory holding the audio sample batch
    pub sample_dir: String,
    /// Credential reference, logged at startup for traceability
    pub credentials: String,
    /// Bearer token for the detection API (e.g. `gcloud auth print-access-token`)
    pub access_token: String,
    /// When set, every turn starts from this pinned context
    pub fixed_context: Option<String>,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// File extension samples must carry (without the dot)
    pub extension: String,
    /// Wire name of the audio encoding
    pub encoding: String,
    pub sample_rate_hertz: u32,
}

impl Config {
    /// Load configuration once, layered: built-in defaults, then an optional
    /// file, then `RECO_*` environment overrides (e.g. `RECO_SAMPLE_DIR`,
    /// `RECO_AUDIO__SAMPLE_RATE_HERTZ`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("project_id", "df-reco-testing")?
            .set_default("language_code", "de-DE")?
            .set_default("sample_dir", "samples")?
            .set_default("credentials", "")?
            .set_default("access_token", "")?
            .set_default("audio.extension", "flac")?
            .set_default("audio.encoding", "AUDIO_ENCODING_FLAC")?
            .set_default("audio.sample_rate_hertz", 44100)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("RECO").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
