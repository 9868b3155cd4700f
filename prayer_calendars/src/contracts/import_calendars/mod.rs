use crate::calendar_fetcher::FreshnessPolicy;
use crate::config::SETTINGS_CONFIG;
use crate::day_record::{LocationBatch, LocationId};
use anyhow::Context;
use shared_kernel::date_time::beirut::MonthlyPeriod;
use std::path::PathBuf;
use url::Url;

/// Everything one monthly run produced: a batch per configured location,
/// plus the locations whose calendar could not be imported. A failed
/// location still appears in the batches, with no records.
#[derive(Debug)]
pub struct ImportOutcome {
    pub batches: LocationBatch,
    pub failures: Vec<LocationId>,
}

pub struct ImportCalendars;

impl ImportCalendars {
    pub async fn import() -> anyhow::Result<ImportOutcome> {
        let period = MonthlyPeriod::current();
        let sources = calendar_sources(&period)?;
        let policy = FreshnessPolicy::from_force_flag(SETTINGS_CONFIG.cache.force_refresh);
        Ok(batch_driver::execute(sources, policy).await)
    }
}

struct CalendarSource {
    location: LocationId,
    url: Url,
    cache_path: PathBuf,
}

/// The source publishes one pdf per location per month, under the year and
/// with the month left unpadded, e.g. `calendars/2026/beirut-1.pdf`.
fn calendar_sources(period: &MonthlyPeriod) -> anyhow::Result<Vec<CalendarSource>> {
    let base_url = SETTINGS_CONFIG.source.base_url.trim_end_matches('/');
    let cache_dir = PathBuf::from(&SETTINGS_CONFIG.cache.dir);
    SETTINGS_CONFIG
        .locations
        .iter()
        .map(|location| {
            let url = format!(
                "{base_url}/{year}/{slug}-{month}.pdf",
                year = period.year,
                slug = location.slug,
                month = period.month
            );
            let url = Url::parse(&url)
                .with_context(|| format!("Failed to build the calendar url {url}"))?;
            let cache_path = cache_dir.join(format!(
                "{slug}-{year}-{month}.pdf",
                slug = location.slug,
                year = period.year,
                month = period.month
            ));
            Ok(CalendarSource {
                location: location.id.clone(),
                url,
                cache_path,
            })
        })
        .collect()
}

mod batch_driver {
    use crate::calendar_fetcher::{CalendarFetcher, FreshnessPolicy};
    use crate::content_extractor;
    use crate::contracts::import_calendars::{CalendarSource, ImportOutcome};
    use crate::day_record::{DayRecord, LocationBatch};
    use anyhow::Context;
    use tracing::{error, info};

    /// Imports the locations one after another. A location that fails is
    /// recorded and skipped; it never aborts the rest of the run.
    pub(super) async fn execute(
        sources: Vec<CalendarSource>,
        policy: FreshnessPolicy,
    ) -> ImportOutcome {
        let fetcher = CalendarFetcher::new();
        let mut batches = LocationBatch::new();
        let mut failures = vec![];
        for source in sources {
            let records = match import_location(&fetcher, &source, policy).await {
                Ok(records) => {
                    info!(
                        location = %source.location,
                        records = records.len(),
                        "imported the monthly calendar"
                    );
                    records
                }
                Err(error) => {
                    error!(location = %source.location, "{error:?}");
                    failures.push(source.location.clone());
                    vec![]
                }
            };
            batches.insert(source.location, records);
        }
        ImportOutcome { batches, failures }
    }

    async fn import_location(
        fetcher: &CalendarFetcher,
        source: &CalendarSource,
        policy: FreshnessPolicy,
    ) -> anyhow::Result<Vec<DayRecord>> {
        use pdf_extract::*;
        let file_bytes = fetcher
            .fetch(&source.url, &source.cache_path, policy)
            .await?;
        let text = extract_text_from_mem(&file_bytes).context("Failed to extract pdf to text")?;
        Ok(content_extractor::extract(&text))
    }
}
