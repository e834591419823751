//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use converter_types::{ConversionRecord, ConversionRepository, RepoError};

use crate::types::{PgConversionRow, storage_precision};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_conversion_history_pg.sql"),
            "0001",
        )
        .await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ConversionRepository for PostgresRepo {
    async fn save(&self, record: ConversionRecord) -> Result<ConversionRecord, RepoError> {
        let record = storage_precision(record);

        sqlx::query(
            r#"INSERT INTO conversion_history
               (id, source_currency, target_currency, amount, converted_amount, exchange_rate, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(*record.id.as_uuid())
        .bind(record.source_currency.as_str())
        .bind(record.target_currency.as_str())
        .bind(record.amount)
        .bind(record.converted_amount)
        .bind(record.exchange_rate)
        .bind(record.date)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        tracing::debug!(record_id = %record.id, "conversion saved");
        Ok(record)
    }

    async fn find_recent(&self, limit: u32) -> Result<Vec<ConversionRecord>, RepoError> {
        let rows: Vec<PgConversionRow> = sqlx::query_as(
            r#"SELECT id, source_currency, target_currency, amount, converted_amount, exchange_rate, created_at
               FROM conversion_history
               ORDER BY created_at DESC, seq DESC
               LIMIT $1"#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgConversionRow::into_domain).collect()
    }
}
