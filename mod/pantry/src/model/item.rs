use serde::{Deserialize, Serialize};

/// Aggregate consumption state embedded in an [`Item`].
///
/// Maintained incrementally as consumption is recorded. `lastRecordedAt`
/// was introduced after `lastServedDate`; records created before then are
/// repaired by the backfill reconciler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionSummary {
    /// Date (YYYY-MM-DD) the item was last served.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_served_date: Option<String>,

    /// ISO-8601 timestamp of the most recent consumption record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_recorded_at: Option<String>,

    /// Running total of servings across all records.
    #[serde(default)]
    pub total_servings: u32,
}

/// Item — a tracked care item (food, supply).
/// Primary key is `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// UUID primary key.
    #[serde(default)]
    pub id: String,

    /// Display name (e.g. "rice porridge").
    pub name: String,

    /// Grouping category (e.g. "staple", "side", "drink").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Serving unit (e.g. "bowl", "cup").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Aggregate consumption state. Absent until the first record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption_summary: Option<ConsumptionSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}
