mod consumption;
mod item;
mod recorded_at;

pub use consumption::ConsumptionLog;
pub use item::{ConsumptionSummary, Item};
pub use recorded_at::{FALLBACK_TIME_SUFFIX, RecordedAt, fallback_timestamp, iso_millis};
