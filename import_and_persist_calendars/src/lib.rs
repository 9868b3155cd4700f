use itertools::Itertools;
use prayer_calendars::contracts::import_calendars::ImportOutcome;

/// One line per location for the run log, with a trailing summary of the
/// locations that failed, if any did.
pub fn import_report(outcome: &ImportOutcome) -> Vec<String> {
    let mut lines = outcome
        .batches
        .iter()
        .map(|(location, records)| format!("{location}: {} days", records.len()))
        .collect_vec();
    if !outcome.failures.is_empty() {
        lines.push(format!(
            "failed locations: {}",
            outcome.failures.iter().join(", ")
        ));
    }
    lines
}
