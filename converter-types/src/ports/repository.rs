//! Repository port trait.
//!
//! Adapters (Postgres, SQLite, in-memory) implement this trait.

use crate::domain::ConversionRecord;
use crate::error::RepoError;

/// Number of records returned by a history listing.
pub const HISTORY_PAGE_SIZE: u32 = 20;

/// Storage for completed conversions.
///
/// Records are append-only; nothing here updates or deletes them.
#[async_trait::async_trait]
pub trait ConversionRepository: Send + Sync + 'static {
    /// Persists a freshly created record and returns it as stored.
    async fn save(&self, record: ConversionRecord) -> Result<ConversionRecord, RepoError>;

    /// Returns up to `limit` records, newest first.
    async fn find_recent(&self, limit: u32) -> Result<Vec<ConversionRecord>, RepoError>;
}
