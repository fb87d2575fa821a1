use chrono::{DurationRound, TimeDelta};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current time truncated to the microsecond precision PostgreSQL stores.
///
/// Both store adapters persist timestamps produced here, so a value read back
/// compares equal to the value written.
pub fn now() -> Timestamp {
    let now = chrono::Utc::now();
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}

/// The timestamp to record for a modification of a row last touched at `previous`.
///
/// Never earlier than, and never equal to, `previous`, even when the wall clock
/// has not advanced past it.
pub fn next_after(previous: Timestamp) -> Timestamp {
    now().max(previous + TimeDelta::microseconds(1))
}
