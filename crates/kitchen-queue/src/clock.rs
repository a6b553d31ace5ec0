//! Injectable time source.
//!
//! Every time read in the queue goes through [`Clock`]. The returned timestamp
//! carries its UTC offset for display. Day boundaries come from
//! [`Clock::start_of_day`], since an offset alone cannot place midnight on a
//! daylight-saving change day.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, TimeZone, Utc};
use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};

/// Start of the calendar day containing `at`, in `at`'s own time zone.
///
/// Falls back to the earliest valid instant when local midnight is ambiguous,
/// and to `None` if midnight does not exist in that zone on that day.
pub fn start_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let midnight = at.date_naive().and_time(NaiveTime::MIN);
    at.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
}

pub trait Clock: Send + Sync + Debug {
    /// Current local time, with its offset.
    fn now(&self) -> DateTime<FixedOffset>;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }

    /// Local midnight of the day containing `at`, as this clock's zone sees it.
    ///
    /// The default treats the offset of [`now`](Clock::now) as the whole zone.
    fn start_of_day(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        start_of_day(&at.with_timezone(&self.now().timezone()))
    }
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    fn start_of_day(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        start_of_day(&at.with_timezone(&Local))
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    pub fn set(&self, to: DateTime<FixedOffset>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}


#[cfg(test)]
mod tests {
    use super::test_zone::{local, CentralEurope2024};
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let start = offset.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let shared = clock.clone();

        shared.advance(Duration::seconds(31));
        assert_eq!(clock.now(), start + Duration::seconds(31));
        assert_eq!(
            clock.now_utc(),
            Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 31).unwrap()
        );

        let evening = offset.with_ymd_and_hms(2024, 5, 1, 21, 0, 0).unwrap();
        shared.set(evening);
        assert_eq!(clock.now(), evening);
    }

    #[test]
    fn start_of_day_uses_local_midnight() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let just_after_midnight = offset.with_ymd_and_hms(2024, 5, 2, 0, 30, 0).unwrap();
        assert_eq!(
            start_of_day(&just_after_midnight),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn start_of_day_follows_dst_not_current_offset() {
        // Autumn: midnight was still summer time, an hour earlier than +01:00 suggests.
        let autumn = local(10, 27, 10, 0).with_timezone(&CentralEurope2024);
        assert_eq!(
            start_of_day(&autumn),
            Some(Utc.with_ymd_and_hms(2024, 10, 26, 22, 0, 0).unwrap())
        );
        assert_eq!(
            start_of_day(&autumn.fixed_offset()),
            Some(Utc.with_ymd_and_hms(2024, 10, 26, 23, 0, 0).unwrap())
        );

        // Spring: midnight was still winter time.
        let spring = local(3, 31, 10, 0).with_timezone(&CentralEurope2024);
        assert_eq!(
            start_of_day(&spring),
            Some(Utc.with_ymd_and_hms(2024, 3, 30, 23, 0, 0).unwrap())
        );
    }

    #[test]
    fn manual_clock_day_follows_its_offset() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let clock = ManualClock::new(offset.with_ymd_and_hms(2024, 5, 2, 0, 30, 0).unwrap());
        assert_eq!(
            clock.start_of_day(clock.now_utc()),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn system_clock_day_starts_at_local_midnight() {
        let clock = SystemClock;
        let now = clock.now_utc();
        let start = clock.start_of_day(now).unwrap();
        assert!(start <= now);
        assert_eq!(
            start.with_timezone(&Local).date_naive(),
            now.with_timezone(&Local).date_naive()
        );
    }
}
