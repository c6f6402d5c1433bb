use async_trait::async_trait;
use lotops_core::models::DealerPreference;
use lotops_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use super::stores::PreferencesStore;

/// Postgres-backed dealer preference pairs.
#[derive(Clone)]
pub struct PreferenceRepository {
    pool: PgPool,
}

impl PreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferencesStore for PreferenceRepository {
    async fn get(&self, dealer_id: Uuid, key: &str) -> Result<Option<DealerPreference>, AppError> {
        let preference = sqlx::query_as::<_, DealerPreference>(
            r#"
            SELECT dealer_id, pref_key, pref_value, updated_at
            FROM dealer_preferences
            WHERE dealer_id = $1 AND pref_key = $2
            "#,
        )
        .bind(dealer_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preference)
    }

    async fn set(
        &self,
        dealer_id: Uuid,
        key: &str,
        value: &str,
    ) -> Result<DealerPreference, AppError> {
        let preference = sqlx::query_as::<_, DealerPreference>(
            r#"
            INSERT INTO dealer_preferences (dealer_id, pref_key, pref_value)
            VALUES ($1, $2, $3)
            ON CONFLICT (dealer_id, pref_key) DO UPDATE SET
                pref_value = EXCLUDED.pref_value,
                updated_at = NOW()
            RETURNING dealer_id, pref_key, pref_value, updated_at
            "#,
        )
        .bind(dealer_id)
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        Ok(preference)
    }
}
