/// All database primary keys are PostgreSQL BIGINT identity columns.
pub type DbId = i64;
