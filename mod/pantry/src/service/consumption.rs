use chrono::{NaiveDate, Utc};

use carelog_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};
use carelog_sql::Value;

use crate::model::{ConsumptionLog, RecordedAt, iso_millis};
use super::PantryService;

pub struct RecordConsumptionInput {
    /// Date served (YYYY-MM-DD). Defaults to today (UTC).
    pub served_date: Option<String>,
    pub servings: u32,
    pub meal_type: Option<String>,
    pub note: Option<String>,
}

impl PantryService {
    /// Append a consumption log for an item and update its summary.
    ///
    /// New records always carry a precise `recordedAt`; the summary's
    /// `lastRecordedAt` is kept in step so these items never need the
    /// backfill reconciler.
    pub fn record_consumption(
        &self,
        item_id: &str,
        input: RecordConsumptionInput,
    ) -> Result<ConsumptionLog, ServiceError> {
        if input.servings == 0 {
            return Err(ServiceError::Validation("servings must be at least 1".into()));
        }

        let mut document = self.load_document("items", item_id)?;

        let now = Utc::now();
        let recorded = iso_millis(now);
        let served_date = match input.served_date {
            Some(d) => {
                NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(|_| {
                    ServiceError::Validation(format!("invalid servedDate: {}", d))
                })?;
                d
            }
            None => now.format("%Y-%m-%d").to_string(),
        };

        let log = ConsumptionLog {
            id: new_id(),
            item_id: item_id.to_string(),
            recorded_at: Some(RecordedAt::Text(recorded.clone())),
            servings: input.servings,
            meal_type: input.meal_type,
            note: input.note,
            create_at: Some(now_rfc3339()),
        };

        self.insert_record("consumption_logs", &log.id, &log, &[
            ("item_id", Value::Text(item_id.to_string())),
            ("recorded_at", Value::Text(recorded.clone())),
            ("servings", Value::Integer(input.servings as i64)),
            ("create_at", Value::Text(log.create_at.clone().unwrap_or_default())),
        ])?;

        // Update the embedded summary in place so fields this schema
        // doesn't know about survive the write-back.
        let obj = document
            .as_object_mut()
            .ok_or_else(|| ServiceError::Internal(format!("items/{} is not an object", item_id)))?;
        let summary = obj
            .entry("consumptionSummary")
            .or_insert_with(|| serde_json::json!({}));
        let summary_obj = summary.as_object_mut().ok_or_else(|| {
            ServiceError::Internal(format!("items/{}: consumptionSummary is not an object", item_id))
        })?;

        let total = summary_obj
            .get("totalServings")
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
            + input.servings as u64;
        summary_obj.insert("totalServings".into(), serde_json::json!(total));
        summary_obj.insert("lastServedDate".into(), serde_json::json!(served_date));
        summary_obj.insert("lastRecordedAt".into(), serde_json::json!(recorded));

        let updated_at = now_rfc3339();
        obj.insert("updateAt".into(), serde_json::json!(updated_at));

        self.store_document("items", item_id, &document, &[
            ("update_at", Value::Text(updated_at)),
        ])?;

        Ok(log)
    }

    /// List an item's consumption logs, most recent first.
    pub fn list_consumption(
        &self,
        item_id: &str,
        params: &ListParams,
    ) -> Result<ListResult<ConsumptionLog>, ServiceError> {
        // Surface a 404 rather than an empty list for unknown items.
        self.load_document("items", item_id)?;

        let limit = params.limit.min(500);
        self.list_records(
            "consumption_logs",
            &[("item_id", Value::Text(item_id.to_string()))],
            "recorded_at DESC",
            limit,
            params.offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use crate::service::item::CreateItemInput;
    use crate::service::testutil::test_service;

    fn create_item(svc: &PantryService) -> Item {
        svc.create_item(CreateItemInput {
            name: "miso soup".into(),
            category: Some("side".into()),
            unit: Some("bowl".into()),
            description: None,
        })
        .unwrap()
    }

    fn record(svc: &PantryService, item_id: &str, servings: u32, date: &str) -> ConsumptionLog {
        svc.record_consumption(item_id, RecordConsumptionInput {
            served_date: Some(date.into()),
            servings,
            meal_type: Some("lunch".into()),
            note: None,
        })
        .unwrap()
    }

    #[test]
    fn recording_creates_and_accumulates_summary() {
        let svc = test_service();
        let item = create_item(&svc);

        record(&svc, &item.id, 2, "2025-03-01");
        record(&svc, &item.id, 3, "2025-03-02");

        let after = svc.get_item(&item.id).unwrap();
        let summary = after.consumption_summary.expect("summary created");
        assert_eq!(summary.total_servings, 5);
        assert_eq!(summary.last_served_date.as_deref(), Some("2025-03-02"));
        let recorded = summary.last_recorded_at.expect("lastRecordedAt set");
        assert!(recorded.ends_with('Z'));
    }

    #[test]
    fn recording_for_unknown_item_is_not_found() {
        let svc = test_service();
        let err = svc
            .record_consumption("ghost", RecordConsumptionInput {
                served_date: None,
                servings: 1,
                meal_type: None,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn zero_servings_is_rejected() {
        let svc = test_service();
        let item = create_item(&svc);
        let err = svc
            .record_consumption(&item.id, RecordConsumptionInput {
                served_date: None,
                servings: 0,
                meal_type: None,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn malformed_served_date_is_rejected() {
        let svc = test_service();
        let item = create_item(&svc);
        let err = svc
            .record_consumption(&item.id, RecordConsumptionInput {
                served_date: Some("March 1st".into()),
                servings: 1,
                meal_type: None,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn list_is_most_recent_first() {
        let svc = test_service();
        let item = create_item(&svc);
        let first = record(&svc, &item.id, 1, "2025-03-01");
        let second = record(&svc, &item.id, 1, "2025-03-02");

        let logs = svc
            .list_consumption(&item.id, &ListParams::default())
            .unwrap();
        assert_eq!(logs.total, 2);
        // Both records were written "now"; ordering falls back to a stable
        // recorded_at comparison, so just check membership and ids.
        let ids: Vec<&str> = logs.items.iter().map(|l| l.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
    }

    #[test]
    fn list_for_unknown_item_is_not_found() {
        let svc = test_service();
        assert!(matches!(
            svc.list_consumption("ghost", &ListParams::default()),
            Err(ServiceError::NotFound(_))
        ));
    }
}
