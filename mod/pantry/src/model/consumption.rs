use serde::{Deserialize, Serialize};

use super::RecordedAt;

/// ConsumptionLog — one serving event for an item. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionLog {
    /// UUID primary key.
    #[serde(default)]
    pub id: String,

    /// Owning item id.
    pub item_id: String,

    /// When the serving was recorded. Historical records stored this in
    /// several shapes; see [`RecordedAt`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<RecordedAt>,

    /// Number of servings in this event.
    #[serde(default = "default_servings")]
    pub servings: u32,

    /// Which meal this was served at (e.g. "breakfast", "lunch").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,
}

fn default_servings() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_json_roundtrip() {
        let log = ConsumptionLog {
            id: "log001".into(),
            item_id: "item001".into(),
            recorded_at: Some(RecordedAt::Text("2025-02-02T09:30:00.000Z".into())),
            servings: 2,
            meal_type: Some("lunch".into()),
            note: None,
            create_at: None,
        };
        let json = serde_json::to_string(&log).unwrap();
        let back: ConsumptionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, back);
    }

    #[test]
    fn servings_defaults_to_one() {
        let log: ConsumptionLog =
            serde_json::from_str(r#"{"itemId": "item001"}"#).unwrap();
        assert_eq!(log.servings, 1);
        assert!(log.recorded_at.is_none());
    }
}
