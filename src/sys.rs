use crate::builtins::Now;
use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::time::EpochNanoseconds;
use crate::{DateError, DateResult};

use web_time::{SystemTime, UNIX_EPOCH};

/// Get a `Now` object with a [`LocalHostSystem`], which reads the
/// system clock and derives fields at the host's UTC offset.
#[cfg(feature = "sys-local")]
pub fn local_now() -> Now<LocalHostSystem> {
    Now::new(LocalHostSystem)
}

/// Get a `Now` object with a [`UtcHostSystem`], which reads the
/// system clock and derives fields at UTC.
pub fn utc_now() -> Now<UtcHostSystem> {
    Now::new(UtcHostSystem)
}

/// A UTC host system implementation that will return the current time
/// with a UTC offset.
///
/// This implementation is backed by [`web_time::SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcHostSystem;

impl HostHooks for UtcHostSystem {}

impl HostClock for UtcHostSystem {
    fn get_host_epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds> {
        get_system_nanoseconds()
    }
}

impl HostTimeZone for UtcHostSystem {
    fn get_host_offset_minutes(&self) -> DateResult<i16> {
        Ok(0)
    }
}

/// A local host system implementation that will return the current time
/// with the UTC offset of the system time zone.
///
/// This implementation is backed by [`web_time::SystemTime`] and
/// [`jiff::tz::TimeZone::system`].
#[cfg(feature = "sys-local")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHostSystem;

#[cfg(feature = "sys-local")]
impl HostHooks for LocalHostSystem {}

#[cfg(feature = "sys-local")]
impl HostClock for LocalHostSystem {
    fn get_host_epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds> {
        get_system_nanoseconds()
    }
}

#[cfg(feature = "sys-local")]
impl HostTimeZone for LocalHostSystem {
    fn get_host_offset_minutes(&self) -> DateResult<i16> {
        current_offset_minutes(&jiff::tz::TimeZone::system())
    }
}

/// Returns the current UTC offset of `time_zone` in whole hours, as minutes.
///
/// An offset that is not a whole hour, or is outside the accepted range,
/// falls back to UTC.
#[cfg(feature = "sys-local")]
pub(crate) fn current_offset_minutes(time_zone: &jiff::tz::TimeZone) -> DateResult<i16> {
    let nanos = get_system_nanoseconds()?;
    let timestamp = jiff::Timestamp::from_nanosecond(nanos.as_i128())
        .map_err(|_| DateError::range().with_message("system time exceeds the valid range."))?;
    let offset_seconds = time_zone.to_offset(timestamp).seconds();
    if offset_seconds % 3600 != 0 {
        #[cfg(feature = "log")]
        log::debug!("host offset {offset_seconds}s is not a whole hour, using UTC");
        return Ok(0);
    }
    Ok(crate::iso::check_offset_minutes((offset_seconds / 60).into()).unwrap_or_else(|_| {
        #[cfg(feature = "log")]
        log::debug!("host offset {offset_seconds}s is outside the accepted range, using UTC");
        0
    }))
}

/// Returns the system time in nanoseconds.
pub(crate) fn get_system_nanoseconds() -> DateResult<EpochNanoseconds> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| DateError::general("Error fetching system time"))?
        .as_nanos();
    let nanos = i128::try_from(nanos)
        .map_err(|_| DateError::range().with_message("system time exceeds the valid range."))?;
    EpochNanoseconds::try_from(nanos)
}
