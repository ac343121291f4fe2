use crate::error::HarnessError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Filename prefix that marks a batch's initial utterance.
pub const INITIAL_PREFIX: &str = "_initial";

/// One recorded utterance used as test input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    pub filename: String,
    pub path: PathBuf,
    pub is_initial: bool,
}

/// Result of scanning a sample directory: at most one initial utterance,
/// plus the ordinary samples in reproducible order.
#[derive(Debug, Default)]
pub struct Catalog {
    pub initial: Option<AudioSample>,
    pub ordered: Vec<AudioSample>,
}

impl Catalog {
    /// Scan `dir` for audio samples with the given extension.
    ///
    /// Entries that are not regular files, or whose extension does not
    /// match, are skipped with a debug line. A second `_initial` match is a
    /// configuration error, and an unreadable directory fails the run.
    pub fn scan(dir: impl AsRef<Path>, extension: &str) -> Result<Self, HarnessError> {
        let dir = dir.as_ref();
        info!("Reading audio samples from {}", dir.display());

        let entries = std::fs::read_dir(dir).map_err(|source| HarnessError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut initial: Option<AudioSample> = None;
        let mut ordered = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|source| HarnessError::DirectoryRead {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let filename = entry.file_name().to_string_lossy().into_owned();

            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(extension))
                .unwrap_or(false);

            if !path.is_file() || !matches_extension {
                debug!("Ignored directory entry {}", filename);
                continue;
            }

            if filename.starts_with(INITIAL_PREFIX) {
                if let Some(existing) = &initial {
                    return Err(HarnessError::AmbiguousInitial {
                        first: existing.filename.clone(),
                        second: filename,
                    });
                }
                info!("Using {} as initial utterance", filename);
                initial = Some(AudioSample {
                    filename,
                    path,
                    is_initial: true,
                });
            } else {
                ordered.push(AudioSample {
                    filename,
                    path,
                    is_initial: false,
                });
            }
        }

        // Byte-wise name order keeps run ordering reproducible across hosts,
        // independent of locale and directory iteration order.
        ordered.sort_by(|a, b| a.filename.cmp(&b.filename));

        info!("Added {} files to the test", ordered.len());

        Ok(Self { initial, ordered })
    }

    pub fn is_empty(&self) -> bool {
        self.initial.is_none() && self.ordered.is_empty()
    }
}
