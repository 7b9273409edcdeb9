//! The `Now` component

use crate::host::HostHooks;
use crate::iso;
use crate::options::DateOptions;
use crate::time::EpochNanoseconds;
use crate::DateResult;

use super::DateValue;

/// Access to the current time of a host system.
pub struct Now<H: HostHooks> {
    host_hooks: H,
}

impl<H: HostHooks> Now<H> {
    pub fn new(host_hooks: H) -> Self {
        Self { host_hooks }
    }

    /// Returns the current host instant.
    pub fn epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds> {
        self.host_hooks.get_system_epoch_nanoseconds()
    }

    /// Returns the current host instant in milliseconds since the Unix epoch.
    pub fn epoch_milliseconds(&self) -> DateResult<i64> {
        self.epoch_nanoseconds()?.as_milliseconds()
    }

    /// Returns the current time as a `DateValue` with fields derived at the host offset.
    ///
    /// The instant is captured as-is, with no correction applied.
    ///
    /// ## Order of operations
    ///
    /// The host offset is resolved before the clock is read.
    pub fn date_value(self, options: DateOptions) -> DateResult<DateValue> {
        let offset_minutes =
            iso::check_offset_minutes(self.host_hooks.get_system_offset_minutes()?.into())?;
        let epoch_nanoseconds = self.epoch_nanoseconds()?;
        #[cfg(feature = "log")]
        log::debug!(
            "captured host clock {} ns at offset {offset_minutes}",
            epoch_nanoseconds.as_i128()
        );
        DateValue::from_epoch_nanoseconds(epoch_nanoseconds, offset_minutes, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostClock, HostTimeZone};
    use alloc::string::ToString;

    struct FixedHost {
        nanos: i128,
        offset_minutes: i16,
    }

    impl HostClock for FixedHost {
        fn get_host_epoch_nanoseconds(&self) -> DateResult<EpochNanoseconds> {
            EpochNanoseconds::try_from(self.nanos)
        }
    }

    impl HostTimeZone for FixedHost {
        fn get_host_offset_minutes(&self) -> DateResult<i16> {
            Ok(self.offset_minutes)
        }
    }

    impl HostHooks for FixedHost {}

    #[test]
    fn mocked_now() {
        // 2018-03-18T12:00:00.5Z
        let host = FixedHost {
            nanos: 1_521_374_400_500_000_000,
            offset_minutes: 60,
        };
        let now = Now::new(host);
        assert_eq!(now.epoch_milliseconds().unwrap(), 1_521_374_400_500);

        let value = now.date_value(DateOptions::default()).unwrap();
        assert_eq!(value.epoch_milliseconds().unwrap(), 1_521_374_400_500);
        assert_eq!(value.to_date_string(), "2018-03-18");
        assert_eq!(value.to_time_string(), "13:00:00");
        assert_eq!(value.sub_second(), 500_000);
        assert_eq!(value.offset_minutes(), 60);
    }

    #[test]
    fn empty_host_is_epoch_utc() {
        let value = Now::new(()).date_value(DateOptions::default()).unwrap();
        assert_eq!(value.epoch_milliseconds().unwrap(), 0);
        assert_eq!(value.to_string(), "1970-01-01 00:00:00.000000+00:00");
    }

    #[test]
    fn rejects_partial_hour_host_offset() {
        let host = FixedHost {
            nanos: 0,
            offset_minutes: 330,
        };
        assert!(Now::new(host).date_value(DateOptions::default()).is_err());
    }
}
