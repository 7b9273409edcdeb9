//! Trait definitions for accessing values from the host environment.
//!
//! NOTE: This is a power user API.

use crate::{time::EpochNanoseconds, DateResult};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    fn get_host_epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds>;
}

/// The `HostTimeZone` trait defines the host's UTC offset in minutes.
pub trait HostTimeZone {
    fn get_host_offset_minutes(&self) -> DateResult<i16>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds> {
        self.get_host_epoch_nanoseconds()
    }

    fn get_system_offset_minutes(&self) -> DateResult<i16> {
        self.get_host_offset_minutes()
    }
}

// Implement empty providers

impl HostClock for () {
    fn get_host_epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds> {
        Ok(EpochNanoseconds::default())
    }
}

impl HostTimeZone for () {
    fn get_host_offset_minutes(&self) -> DateResult<i16> {
        Ok(0)
    }
}

impl HostHooks for () {}
