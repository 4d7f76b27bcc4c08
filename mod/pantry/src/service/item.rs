use carelog_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};
use carelog_sql::Value;

use crate::model::Item;
use super::PantryService;

pub struct CreateItemInput {
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct ItemFilters {
    pub category: Option<String>,
}

impl PantryService {
    pub fn create_item(&self, input: CreateItemInput) -> Result<Item, ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Validation("item name must not be empty".into()));
        }

        let id = new_id();
        let now = now_rfc3339();
        let record = Item {
            id: id.clone(),
            name: input.name.clone(),
            category: input.category.clone(),
            unit: input.unit,
            description: input.description,
            // Absent until the first consumption record.
            consumption_summary: None,
            create_at: Some(now.clone()),
            update_at: Some(now.clone()),
        };

        self.insert_record("items", &id, &record, &[
            ("name", Value::Text(input.name)),
            ("category", input.category.map_or(Value::Null, Value::Text)),
            ("create_at", Value::Text(now.clone())),
            ("update_at", Value::Text(now)),
        ])?;

        Ok(record)
    }

    pub fn get_item(&self, id: &str) -> Result<Item, ServiceError> {
        self.get_record("items", id)
    }

    pub fn list_items(
        &self,
        params: &ListParams,
        filters: &ItemFilters,
    ) -> Result<ListResult<Item>, ServiceError> {
        let limit = params.limit.min(500);
        let mut f: Vec<(&str, Value)> = Vec::new();
        if let Some(ref c) = filters.category {
            f.push(("category", Value::Text(c.clone())));
        }
        self.list_records("items", &f, "create_at DESC", limit, params.offset)
    }

    pub fn update_item(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Item, ServiceError> {
        let mut document = self.load_document("items", id)?;
        let updated: Item = Self::apply_patch(&mut document, patch)?;

        self.store_document("items", id, &document, &[
            ("name", Value::Text(updated.name.clone())),
            ("category", updated.category.clone().map_or(Value::Null, Value::Text)),
            ("update_at", Value::Text(updated.update_at.clone().unwrap_or_default())),
        ])?;

        Ok(updated)
    }

    /// Delete an item and its consumption logs.
    pub fn delete_item(&self, id: &str) -> Result<(), ServiceError> {
        self.sql
            .exec(
                "DELETE FROM consumption_logs WHERE item_id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        self.delete_record("items", id)
    }
}
