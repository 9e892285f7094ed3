//! Timestamp decomposition

use crate::error::{Error, Result};
use crate::schema::TimeDimension;
use chrono::{DateTime, Datelike, Timelike};

/// Split an epoch-millisecond timestamp into time dimension columns
///
/// The instant is truncated to whole seconds and read as UTC, not in the
/// host's local zone.
pub fn decompose(millis: i64) -> Result<TimeDimension> {
    let instant = DateTime::from_timestamp(millis.div_euclid(1000), 0)
        .ok_or(Error::InvalidTimestamp { millis })?
        .naive_utc();

    Ok(TimeDimension {
        start_time: instant,
        hour: instant.hour(),
        day: instant.day(),
        week: instant.iso_week().week(),
        month: instant.month(),
        year: instant.year(),
        weekday: instant.weekday().number_from_monday(),
    })
}
