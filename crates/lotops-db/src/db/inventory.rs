use async_trait::async_trait;
use lotops_core::models::{Vehicle, VehicleRecord};
use lotops_core::AppError;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::stores::{BatchOutcome, InventoryStore};

const VEHICLE_COLUMNS: &str = "id, dealer_id, stock_number, vin, make, model, trim, year, \
     mileage, price, msrp, status, age_days, location, certified, leads, market_day_supply, \
     created_at, updated_at";

/// Postgres-backed vehicle inventory.
#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Submission failures reach the import record verbatim, so the sqlx
// message is kept as-is instead of degrading to the generic database
// variant.
fn submission_error(err: sqlx::Error) -> AppError {
    AppError::InventoryStore(err.to_string())
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn upsert_batch(
        &self,
        dealer_id: Uuid,
        records: &[VehicleRecord],
    ) -> Result<BatchOutcome, AppError> {
        let mut tx = self.pool.begin().await.map_err(submission_error)?;
        let mut outcome = BatchOutcome::default();

        for record in records {
            // xmax = 0 only holds for rows created by this statement, which
            // splits the upsert into inserted/updated counts.
            let row = sqlx::query(
                r#"
                INSERT INTO vehicles (
                    id, dealer_id, stock_number, vin, make, model, trim, year,
                    mileage, price, msrp, status, age_days, location, certified,
                    leads, market_day_supply
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                ON CONFLICT (dealer_id, stock_number) DO UPDATE SET
                    vin = EXCLUDED.vin,
                    make = EXCLUDED.make,
                    model = EXCLUDED.model,
                    trim = EXCLUDED.trim,
                    year = EXCLUDED.year,
                    mileage = EXCLUDED.mileage,
                    price = EXCLUDED.price,
                    msrp = EXCLUDED.msrp,
                    status = EXCLUDED.status,
                    age_days = EXCLUDED.age_days,
                    location = EXCLUDED.location,
                    certified = EXCLUDED.certified,
                    leads = EXCLUDED.leads,
                    market_day_supply = EXCLUDED.market_day_supply,
                    updated_at = NOW()
                RETURNING (xmax = 0) AS inserted
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(dealer_id)
            .bind(&record.stock_number)
            .bind(&record.vin)
            .bind(&record.make)
            .bind(&record.model)
            .bind(&record.trim)
            .bind(record.year)
            .bind(record.mileage)
            .bind(record.price)
            .bind(record.msrp)
            .bind(&record.status)
            .bind(record.age_days)
            .bind(&record.location)
            .bind(record.certified)
            .bind(record.leads)
            .bind(record.market_day_supply)
            .fetch_one(&mut *tx)
            .await
            .map_err(submission_error)?;

            if row.get::<bool, _>("inserted") {
                outcome.inserted += 1;
            } else {
                outcome.updated += 1;
            }
        }

        tx.commit().await.map_err(submission_error)?;

        tracing::debug!(
            %dealer_id,
            inserted = outcome.inserted,
            updated = outcome.updated,
            "vehicle batch upserted"
        );

        Ok(outcome)
    }

    async fn list(
        &self,
        dealer_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE dealer_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY stock_number
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(dealer_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn count(&self, dealer_id: Uuid, status: Option<&str>) -> Result<i64, AppError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM vehicles
            WHERE dealer_id = $1 AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(dealer_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }

    async fn get(
        &self,
        dealer_id: Uuid,
        stock_number: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE dealer_id = $1 AND stock_number = $2
            "#
        ))
        .bind(dealer_id)
        .bind(stock_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }
}
