use bytes::Bytes;
use std::path::Path;
use url::Url;

/// Whether a calendar already sitting in the download cache is good enough,
/// or the source should be asked again regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessPolicy {
    PreferCached,
    ForceRefresh,
}

impl FreshnessPolicy {
    pub fn from_force_flag(force_refresh: bool) -> Self {
        if force_refresh {
            FreshnessPolicy::ForceRefresh
        } else {
            FreshnessPolicy::PreferCached
        }
    }
}

pub struct CalendarFetcher;

impl CalendarFetcher {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn fetch(
        &self,
        url: &Url,
        cache_path: &Path,
        policy: FreshnessPolicy,
    ) -> anyhow::Result<Bytes> {
        fetch_calendar::execute(url, cache_path, policy).await
    }
}

mod fetch_calendar {
    use crate::calendar_fetcher::FreshnessPolicy;
    use anyhow::Context;
    use bytes::Bytes;
    use shared_kernel::http_client::HttpClient;
    use std::path::Path;
    use tracing::debug;
    use url::Url;

    pub(super) async fn execute(
        url: &Url,
        cache_path: &Path,
        policy: FreshnessPolicy,
    ) -> anyhow::Result<Bytes> {
        if policy == FreshnessPolicy::PreferCached {
            if let Some(bytes) = read_cached(cache_path).await? {
                debug!(
                    cache = %cache_path.display(),
                    "serving the calendar from the download cache"
                );
                return Ok(bytes);
            }
        }
        let bytes = HttpClient::get_bytes(url.clone()).await?;
        cache(cache_path, &bytes).await?;
        Ok(bytes)
    }

    async fn read_cached(cache_path: &Path) -> anyhow::Result<Option<Bytes>> {
        if !cache_path.exists() {
            return Ok(None);
        }
        let contents = tokio::fs::read(cache_path).await.with_context(|| {
            format!("Failed to read the cached calendar {}", cache_path.display())
        })?;
        Ok(Some(Bytes::from(contents)))
    }

    async fn cache(cache_path: &Path, bytes: &Bytes) -> anyhow::Result<()> {
        let parent = cache_path
            .parent()
            .filter(|directory| !directory.as_os_str().is_empty());
        if let Some(directory) = parent {
            tokio::fs::create_dir_all(directory).await.with_context(|| {
                format!("Failed to create the download directory {}", directory.display())
            })?;
        }
        tokio::fs::write(cache_path, bytes).await.with_context(|| {
            format!("Failed to cache the calendar at {}", cache_path.display())
        })
    }
}
