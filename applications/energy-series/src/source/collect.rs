use super::ReadingSource;
use crate::models::{InstallationSummary, Reading};
use futures::future::join_all;
use tracing::{debug, warn};

/// Fetch recent readings for every installation concurrently and join them.
///
/// An installation whose fetch fails contributes nothing. Readings that carry
/// no installation id or type inherit them from the installation they were
/// fetched for.
pub async fn collect_readings<S>(
    source: &S,
    installations: &[InstallationSummary],
    limit: usize,
) -> Vec<Reading>
where
    S: ReadingSource + ?Sized,
{
    let fetches = installations.iter().map(|installation| async move {
        match source.recent_readings(installation.id, limit).await {
            Ok(readings) => readings
                .into_iter()
                .map(|reading| enrich(reading, installation))
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!(
                    installation_id = installation.id,
                    error = %e,
                    "failed to fetch readings, skipping installation"
                );
                Vec::new()
            }
        }
    });

    let readings: Vec<Reading> = join_all(fetches).await.into_iter().flatten().collect();
    debug!(
        installations = installations.len(),
        readings = readings.len(),
        "collected readings"
    );
    readings
}

fn enrich(mut reading: Reading, installation: &InstallationSummary) -> Reading {
    if reading.installation_id.is_none() {
        reading.installation_id = Some(installation.id);
    }
    if reading.installation_type.is_none() {
        reading.installation_type = installation.installation_type.clone();
    }
    reading
}
