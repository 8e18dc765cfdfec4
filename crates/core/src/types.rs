/// All database primary keys are PostgreSQL BIGSERIAL, except products,
/// which are keyed by a caller-visible TEXT slug (see `catalog`).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
