use std::path::Path;

use crate::{grade::GradeRecord, notify::Notify, scrape::Scraper, store::Store};

/// One full pass: scrape the portal, keep what is new, announce it.
///
/// Returns the grades that were new in this pass. The store is opened for the
/// pass only and closed before the notifier runs.
pub async fn check_for_new_grades(
    scraper: &Scraper,
    db_path: &Path,
    notifier: &impl Notify,
) -> Vec<GradeRecord> {
    log::info!("Checking for new grades...");
    let snapshot = scraper.fetch().await;
    if snapshot.is_empty() {
        log::warn!("No grades fetched from the portal");
        return Vec::new();
    }

    let new_grades = match Store::open(db_path).and_then(|mut store| store.reconcile(&snapshot)) {
        Ok(new_grades) => new_grades,
        Err(e) => {
            log::error!("Failed to record grades in {}: {e}", db_path.display());
            return Vec::new();
        }
    };

    if new_grades.is_empty() {
        log::info!("No new grades");
        return new_grades;
    }

    log::info!("Found {} new grades, sending notification", new_grades.len());
    if notifier.notify(&new_grades).await {
        log::info!("Notification sent");
    } else {
        log::error!("Failed to send notification");
    }
    new_grades
}
