//! Time and timestamp helpers.

use chrono::{DateTime, SubsecRound, Utc};

/// UTC timestamp used for `created` and `modified` audit fields.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds so that a value
/// survives a round trip through storage unchanged.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}
