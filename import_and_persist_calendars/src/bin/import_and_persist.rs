use import_and_persist_calendars::import_report;
use itertools::Itertools;
use json_store::JsonStore;
use prayer_calendars::config::SETTINGS_CONFIG;
use prayer_calendars::contracts::import_calendars::ImportCalendars;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry();
    start().await
}

async fn start() -> anyhow::Result<()> {
    let outcome = ImportCalendars::import().await?;

    let store = JsonStore::new(SETTINGS_CONFIG.output.path.clone());
    store.save(&outcome.batches, chrono::Utc::now())?;

    for line in import_report(&outcome) {
        info!("{line}");
    }
    if !outcome.failures.is_empty() {
        anyhow::bail!(
            "Failed to import calendars for: {}",
            outcome.failures.iter().join(", ")
        );
    }
    Ok(())
}
