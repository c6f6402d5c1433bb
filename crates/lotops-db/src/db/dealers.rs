use lotops_core::models::Dealer;
use lotops_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for dealer provisioning. Dealers are the scoping root for
/// every other table.
#[derive(Clone)]
pub struct DealerRepository {
    pool: PgPool,
}

impl DealerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<Dealer, AppError> {
        let dealer = sqlx::query_as::<_, Dealer>(
            r#"
            INSERT INTO dealers (id, name, status)
            VALUES ($1, $2, 'active')
            RETURNING id, name, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(dealer)
    }

    pub async fn get(&self, dealer_id: Uuid) -> Result<Option<Dealer>, AppError> {
        let dealer = sqlx::query_as::<_, Dealer>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM dealers
            WHERE id = $1
            "#,
        )
        .bind(dealer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dealer)
    }
}
