use serde::Serialize;
use tracing::{debug, info, warn};

use carelog_core::ServiceError;
use carelog_sql::Value;

use crate::model::{RecordedAt, fallback_timestamp};
use super::PantryService;

/// Outcome of one reconciler run. Built up in memory and returned to the
/// caller; never persisted.
#[derive(Debug, Default, Serialize)]
pub struct BackfillReport {
    pub updated: u32,
    pub skipped: u32,
    pub errors: u32,
    /// One human-readable line per processed item, in processing order.
    pub details: Vec<String>,
}

enum ItemOutcome {
    Skipped,
    Updated { value: String, fallback: bool },
}

impl PantryService {
    /// Repair `consumptionSummary.lastRecordedAt` across the items
    /// collection.
    ///
    /// Safe to re-run: items that already carry the field, or that have no
    /// consumption summary or last-served date, are skipped untouched. A
    /// failure on one item is counted and detailed but never aborts the
    /// run; only a failure of the initial collection scan does.
    pub fn run_backfill(&self) -> Result<BackfillReport, ServiceError> {
        let rows = self
            .sql
            .query("SELECT id, data FROM items", &[])
            .map_err(|e| ServiceError::Storage(format!("item scan failed: {}", e)))?;

        info!(total = rows.len(), "starting lastRecordedAt backfill");
        let mut report = BackfillReport::default();

        for row in &rows {
            let id = row.get_str("id").unwrap_or_default().to_string();
            match self.backfill_item(&id, row.get_str("data")) {
                Ok(ItemOutcome::Skipped) => {
                    debug!(item = %id, "already migrated or not applicable");
                    report.skipped += 1;
                }
                Ok(ItemOutcome::Updated { value, fallback }) => {
                    debug!(item = %id, value = %value, fallback, "lastRecordedAt set");
                    report.updated += 1;
                    if fallback {
                        report.details.push(format!("{}: {} (fallback)", id, value));
                    } else {
                        report.details.push(format!("{}: {}", id, value));
                    }
                }
                Err(e) => {
                    warn!(item = %id, error = %e, "backfill failed for item");
                    report.errors += 1;
                    report.details.push(format!("{}: error: {}", id, e));
                }
            }
        }

        info!(
            updated = report.updated,
            skipped = report.skipped,
            errors = report.errors,
            "backfill finished"
        );
        Ok(report)
    }

    /// Process a single item. Any error returned here is counted against
    /// the item, not the run.
    fn backfill_item(
        &self,
        id: &str,
        data: Option<&str>,
    ) -> Result<ItemOutcome, ServiceError> {
        let raw = data.ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
        let mut document: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| ServiceError::Internal(format!("unreadable document: {}", e)))?;

        // Eligibility: needs a summary with a last-served date and no
        // lastRecordedAt yet. Everything else is already migrated or not
        // applicable.
        let Some(summary) = document.get("consumptionSummary") else {
            return Ok(ItemOutcome::Skipped);
        };
        if summary.get("lastRecordedAt").is_some_and(|v| !v.is_null()) {
            return Ok(ItemOutcome::Skipped);
        }
        let last_served = match summary.get("lastServedDate").and_then(|v| v.as_str()) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => return Ok(ItemOutcome::Skipped),
        };

        let (value, fallback) = self.derive_last_recorded(id, &last_served)?;

        // Set only the one nested field; siblings and unknown fields in the
        // stored document stay as they are.
        let summary_obj = document
            .get_mut("consumptionSummary")
            .and_then(|v| v.as_object_mut())
            .ok_or_else(|| {
                ServiceError::Internal("consumptionSummary is not an object".into())
            })?;
        summary_obj.insert(
            "lastRecordedAt".into(),
            serde_json::Value::String(value.clone()),
        );

        self.store_document("items", id, &document, &[])?;

        Ok(ItemOutcome::Updated { value, fallback })
    }

    /// Derive the timestamp for one item: the most recent consumption
    /// log's recordedAt when one exists and parses, otherwise the
    /// last-served date at fixed midday UTC.
    fn derive_last_recorded(
        &self,
        item_id: &str,
        last_served: &str,
    ) -> Result<(String, bool), ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM consumption_logs
                 WHERE item_id = ?1 ORDER BY recorded_at DESC LIMIT 1",
                &[Value::Text(item_id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(format!("log query failed: {}", e)))?;

        let Some(row) = rows.first() else {
            return Ok((fallback_timestamp(last_served), true));
        };

        let raw = row
            .get_str("data")
            .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
        let log: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| ServiceError::Internal(format!("unreadable log: {}", e)))?;

        let normalized = log
            .get("recordedAt")
            .and_then(RecordedAt::from_json)
            .and_then(|ts| ts.to_iso());

        match normalized {
            Some(iso) => Ok((iso, false)),
            None => Ok((fallback_timestamp(last_served), true)),
        }
    }
}
