use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted operator preference (e.g. the selected inventory tab), scoped by
/// dealer and keyed by name. Callers own the value format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DealerPreference {
    pub dealer_id: Uuid,
    #[serde(rename = "key")]
    pub pref_key: String,
    #[serde(rename = "value")]
    pub pref_value: String,
    pub updated_at: DateTime<Utc>,
}
