use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use prayer_calendars::day_record::LocationBatch;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// The document shape the app bundles: one key per location, and the
/// timestamp of the run that produced it kept after them.
#[derive(Serialize)]
struct PersistedCalendars<'a> {
    #[serde(flatten)]
    batches: &'a LocationBatch,
    last_updated: String,
}

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(err, skip(self, batches), level = "info")]
    pub fn save(&self, batches: &LocationBatch, run_at: DateTime<Utc>) -> anyhow::Result<()> {
        let document = PersistedCalendars {
            batches,
            last_updated: run_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let contents =
            serde_json::to_string_pretty(&document).context("Failed to serialize the calendars")?;
        let parent = self
            .path
            .parent()
            .filter(|directory| !directory.as_os_str().is_empty());
        if let Some(directory) = parent {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("Failed to create the output directory {}", directory.display())
            })?;
        }
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write the calendars to {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            locations = batches.len(),
            "saved the prayer calendars"
        );
        Ok(())
    }
}
