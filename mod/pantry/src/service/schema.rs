use carelog_core::ServiceError;
use carelog_sql::SQLStore;

/// SQL DDL statements to initialize the pantry database schema.
///
/// Each table stores the full JSON document in a `data` TEXT column,
/// with indexed columns extracted for efficient filtering.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS items (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT,
        category TEXT,
        create_at TEXT,
        update_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS consumption_logs (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        item_id TEXT,
        recorded_at TEXT,
        servings INTEGER,
        create_at TEXT
    )",
    // Indexes
    "CREATE INDEX IF NOT EXISTS idx_item_category ON items(category)",
    "CREATE INDEX IF NOT EXISTS idx_log_item ON consumption_logs(item_id)",
    "CREATE INDEX IF NOT EXISTS idx_log_recorded ON consumption_logs(item_id, recorded_at)",
];

pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for stmt in SCHEMA {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(format!("schema init failed: {}", e)))?;
    }
    Ok(())
}
