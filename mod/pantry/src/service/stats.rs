use serde::Serialize;

use carelog_core::ServiceError;
use carelog_sql::Value;

use super::PantryService;

/// Aggregate counts for the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub item_count: i64,
    pub log_count: i64,
    pub total_servings: i64,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}

impl PantryService {
    pub fn stats_summary(&self) -> Result<StatsSummary, ServiceError> {
        let item_count = self.scalar_count("SELECT COUNT(*) as cnt FROM items")?;
        let log_count = self.scalar_count("SELECT COUNT(*) as cnt FROM consumption_logs")?;
        let total_servings = self.scalar_count(
            "SELECT COALESCE(SUM(servings), 0) as cnt FROM consumption_logs",
        )?;

        let rows = self
            .sql
            .query(
                "SELECT category, COUNT(*) as cnt FROM items
                 GROUP BY category ORDER BY cnt DESC, category",
                &[],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let categories = rows
            .iter()
            .map(|r| CategoryCount {
                category: r.get_str("category").map(String::from),
                count: r.get_i64("cnt").unwrap_or(0),
            })
            .collect();

        Ok(StatsSummary {
            item_count,
            log_count,
            total_servings,
            categories,
        })
    }

    fn scalar_count(&self, sql: &str) -> Result<i64, ServiceError> {
        let rows = self
            .sql
            .query(sql, &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0))
    }
}
