use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Candidate inventory record built by row validation from one CSV line.
/// Only the required trio is guaranteed present; everything else reflects
/// whatever the source feed carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleRecord {
    pub stock_number: String,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub year: Option<i32>,
    pub mileage: Option<i32>,
    pub price: Option<Decimal>,
    pub msrp: Option<Decimal>,
    pub status: Option<String>,
    pub age_days: Option<i32>,
    pub location: Option<String>,
    pub certified: Option<bool>,
    pub leads: Option<i32>,
    pub market_day_supply: Option<i32>,
}

/// Persisted vehicle row as stored per dealer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vehicle {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub stock_number: String,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub year: Option<i32>,
    pub mileage: Option<i32>,
    pub price: Option<Decimal>,
    pub msrp: Option<Decimal>,
    pub status: Option<String>,
    pub age_days: Option<i32>,
    pub location: Option<String>,
    pub certified: Option<bool>,
    pub leads: Option<i32>,
    pub market_day_supply: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
