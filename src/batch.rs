//! Parallel processing of independent labels.
//!
//! Each label runs on tokio's blocking pool; a semaphore caps how many run
//! at once. A failed, panicked or cancelled label only affects its own
//! outcome.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::{LabelError, Result};
use crate::label::LabelParser;
use crate::models::ParseResult;

/// Where a label's encoded image comes from
#[derive(Debug, Clone)]
pub enum LabelSource {
    Bytes(Vec<u8>),
    /// Read by the worker that parses it, so only in-flight labels are held in memory
    File(PathBuf),
}

/// One label image waiting to be parsed
#[derive(Debug, Clone)]
pub struct LabelJob {
    pub name: String,
    pub source: LabelSource,
}

impl LabelJob {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: LabelSource::Bytes(bytes),
        }
    }

    /// Job named after the file's name component
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: LabelSource::File(path),
        }
    }

    fn run(self, parser: &LabelParser) -> Result<ParseResult> {
        match self.source {
            LabelSource::Bytes(bytes) => parser.parse_label_named(&bytes, &self.name),
            LabelSource::File(path) => {
                let bytes = std::fs::read(&path)?;
                parser.parse_label_named(&bytes, &self.name)
            }
        }
    }
}

/// Result of one label, tagged with its job name
#[derive(Debug)]
pub struct LabelOutcome {
    pub name: String,
    pub result: Result<ParseResult>,
}

/// Parse every job with at most `workers` labels in flight.
/// Outcomes come back in job order.
pub async fn process_batch(
    parser: Arc<LabelParser>,
    jobs: Vec<LabelJob>,
    workers: usize,
) -> Vec<LabelOutcome> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let names: Vec<String> = jobs.iter().map(|job| job.name.clone()).collect();
    let mut results: Vec<Option<Result<ParseResult>>> = (0..jobs.len()).map(|_| None).collect();
    let mut tasks = JoinSet::new();

    info!(labels = jobs.len(), workers = workers.max(1), "Starting batch");

    for (index, job) in jobs.into_iter().enumerate() {
        let parser = parser.clone();
        let semaphore = semaphore.clone();
        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return (index, Err(LabelError::Worker(e.to_string()))),
            };
            let result = tokio::task::spawn_blocking(move || job.run(&parser))
                .await
                .unwrap_or_else(|e| Err(LabelError::Worker(e.to_string())));
            (index, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => error!(error = %e, "Label task failed to join"),
        }
    }

    names
        .into_iter()
        .zip(results)
        .map(|(name, result)| {
            let result = result
                .unwrap_or_else(|| Err(LabelError::Worker("label task did not complete".to_string())));
            if let Err(e) = &result {
                error!(label = %name, error = %e, "Label processing failed");
            }
            LabelOutcome { name, result }
        })
        .collect()
}
