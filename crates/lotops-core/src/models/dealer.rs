use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a dealership account, mirroring the `dealer_status`
/// Postgres enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "dealer_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DealerStatus {
    Active,
    Suspended,
    Deleted,
}

/// Dealer (dealership) entity. Every inventory row, shift and preference is
/// scoped by a dealer id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Dealer {
    pub id: Uuid,
    pub name: String,
    pub status: DealerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
