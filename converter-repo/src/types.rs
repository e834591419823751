//! Database row types and conversions shared by the adapters.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use uuid::Uuid;

use converter_types::{ConversionRecord, CurrencyCode, RecordId, RepoError};

/// Both backends store microsecond precision.
pub(crate) fn storage_precision(record: ConversionRecord) -> ConversionRecord {
    ConversionRecord {
        date: record.date.trunc_subsecs(6),
        ..record
    }
}

/// Fixed-width RFC 3339 so text columns sort chronologically.
#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn into_record(
    id: Uuid,
    source_currency: &str,
    target_currency: &str,
    amount: f64,
    converted_amount: f64,
    exchange_rate: f64,
    date: DateTime<Utc>,
) -> Result<ConversionRecord, RepoError> {
    Ok(ConversionRecord::from_parts(
        RecordId::from_uuid(id),
        CurrencyCode::parse(source_currency)?,
        CurrencyCode::parse(target_currency)?,
        amount,
        converted_amount,
        exchange_rate,
        date,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows (ids and timestamps stored as TEXT)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
#[derive(sqlx::FromRow)]
pub struct SqliteConversionRow {
    pub id: String,
    pub source_currency: String,
    pub target_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub created_at: String,
}

#[cfg(feature = "sqlite")]
impl SqliteConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepoError::Corrupt(format!("record id {:?}: {}", self.id, e)))?;
        let date = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::Corrupt(format!("timestamp {:?}: {}", self.created_at, e)))?
            .with_timezone(&Utc);

        into_record(
            id,
            &self.source_currency,
            &self.target_currency,
            self.amount,
            self.converted_amount,
            self.exchange_rate,
            date,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows (native UUID and TIMESTAMPTZ)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "postgres")]
#[derive(sqlx::FromRow)]
pub struct PgConversionRow {
    pub id: Uuid,
    pub source_currency: String,
    pub target_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "postgres")]
impl PgConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        into_record(
            self.id,
            self.source_currency.trim(),
            self.target_currency.trim(),
            self.amount,
            self.converted_amount,
            self.exchange_rate,
            self.created_at,
        )
    }
}
