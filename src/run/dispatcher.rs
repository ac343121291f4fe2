use super::log_cache::{LogCache, LogLevel};
use crate::catalog::{AudioSample, Catalog};
use crate::config::Config;
use crate::detect::{self, IntentService};
use crate::error::HarnessError;
use crate::session::{ContextOverride, SessionSpec, SessionStrategy};
use chrono::{DateTime, Utc};
use futures::future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Summary of one completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duration: Duration,
}

/// Drives one run over a sample batch.
///
/// The initial sample, when present, runs to completion before anything
/// else. Ordinary samples are dispatched as concurrent tasks and joined
/// before the run is considered complete, so flush never races an
/// in-flight call. A failed sample records an error under its own
/// identifier and never affects its siblings.
pub struct RunDispatcher {
    service: Arc<dyn IntentService>,
    config: Arc<Config>,
}

impl RunDispatcher {
    pub fn new(service: Arc<dyn IntentService>, config: Arc<Config>) -> Self {
        Self { service, config }
    }

    /// Execute the whole batch, buffering per-sample output into `cache`.
    ///
    /// Returns an error only when the sample directory itself cannot be
    /// used; per-sample failures are folded into the report.
    pub async fn run(&self, cache: Arc<LogCache>) -> Result<RunReport, HarnessError> {
        let started_at = Utc::now();
        let started = Instant::now();

        let catalog = Catalog::scan(&self.config.sample_dir, &self.config.audio.extension)?;
        if catalog.is_empty() {
            warn!("No audio samples found in {}", self.config.sample_dir);
        }

        let context = ContextOverride::from_config(self.config.fixed_context.as_deref());
        let strategy = SessionStrategy::for_batch(catalog.initial.is_some(), context);

        let total = catalog.ordered.len() + usize::from(catalog.initial.is_some());
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        info!(
            "Dispatching {} sample(s) against the {} service",
            total,
            self.service.name()
        );

        // The initial utterance seeds conversational state, so it must
        // settle before any other call goes out.
        if let Some(initial) = catalog.initial {
            info!("Initializing session with '{}'", initial.filename);
            let session = strategy.next_session();
            if run_sample(
                self.service.as_ref(),
                &initial,
                &session,
                &self.config,
                &cache,
            )
            .await
            {
                succeeded += 1;
            } else {
                failed += 1;
            }
        }

        // Ordinary samples are independent turns; fire them all, then join
        // every task so the run only completes once each call has settled.
        let mut tasks = Vec::with_capacity(catalog.ordered.len());
        for sample in catalog.ordered {
            let session = strategy.next_session();
            let service = Arc::clone(&self.service);
            let config = Arc::clone(&self.config);
            let cache = Arc::clone(&cache);
            tasks.push(tokio::spawn(async move {
                run_sample(service.as_ref(), &sample, &session, &config, &cache).await
            }));
        }

        for joined in future::join_all(tasks).await {
            match joined {
                Ok(true) => succeeded += 1,
                Ok(false) => failed += 1,
                Err(join_error) => {
                    // A panicked task still counts as one failed sample.
                    error!("Sample task panicked: {}", join_error);
                    failed += 1;
                }
            }
        }

        Ok(RunReport {
            started_at,
            total,
            succeeded,
            failed,
            duration: started.elapsed(),
        })
    }
}

/// Run one sample to completion and record its outcome under its own
/// identifier. Returns whether the detection call succeeded.
async fn run_sample(
    service: &dyn IntentService,
    sample: &AudioSample,
    session: &SessionSpec,
    config: &Config,
    cache: &LogCache,
) -> bool {
    cache
        .record(
            &sample.filename,
            LogLevel::Info,
            format!("--- Response for audio file {} ---", sample.filename),
        )
        .await;

    match detect::detect(service, session, sample, config).await {
        Ok(result) => {
            for line in result.report_lines() {
                cache.record(&sample.filename, LogLevel::Info, line).await;
            }
            true
        }
        Err(err) => {
            cache
                .record(&sample.filename, LogLevel::Error, err.to_string())
                .await;
            false
        }
    }
}
