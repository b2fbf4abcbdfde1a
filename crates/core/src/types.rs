/// Primary keys are UUIDs so clients may pre-assign them in bulk inserts.
pub type ObjectId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
