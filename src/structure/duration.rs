use std::{
  convert::{From, TryFrom},
  time::{Duration as TDuration, SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Utc};
use log::warn;

use super::{
  result::{Error, Result},
  time::{rescale_units, TimePoint, Timestamp, NANOS_PER_SEC},
};

// Conversions to and from the clock types of std and chrono. Conversions
// into a TimePoint saturate like the arithmetic does; conversions out of
// one fail when the target cannot hold the value.

impl<const HZ: u32> From<TDuration> for TimePoint<HZ> {
  fn from(duration: TDuration) -> Self {
    match i64::try_from(duration.as_secs()) {
      Ok(seconds) => TimePoint {
        seconds,
        subsec_units: rescale_units(
          duration.subsec_nanos(),
          NANOS_PER_SEC,
          TimePoint::<HZ>::UNITS_PER_SEC,
        ),
      },
      Err(_) => TimePoint::MAX,
    }
  }
}

impl<const HZ: u32> TryFrom<TimePoint<HZ>> for TDuration {
  type Error = Error;

  fn try_from(time: TimePoint<HZ>) -> Result<Self> {
    if time.is_negative() {
      return Err(Error::Negative {
        seconds: time.seconds,
        target: "std::time::Duration",
      });
    }
    Ok(TDuration::new(
      time.seconds as u64,
      rescale_units(time.subsec_units, TimePoint::<HZ>::UNITS_PER_SEC, NANOS_PER_SEC),
    ))
  }
}

impl<const HZ: u32> TimePoint<HZ> {
  /// Current wall-clock time, relative to the Unix epoch.
  pub fn now() -> TimePoint<HZ> {
    TimePoint::from_system_time(SystemTime::now())
  }

  /// Position of `time` relative to the Unix epoch. Times before the epoch
  /// give negative values.
  pub fn from_system_time(time: SystemTime) -> TimePoint<HZ> {
    match time.duration_since(UNIX_EPOCH) {
      Ok(after) => TimePoint::from(after),
      Err(e) => TimePoint::<HZ>::ZERO - TimePoint::<HZ>::from(e.duration()),
    }
  }

  pub fn to_system_time(self) -> Result<SystemTime> {
    let whole = TDuration::from_secs(self.seconds.unsigned_abs());
    let fraction = TDuration::new(
      0,
      rescale_units(self.subsec_units, TimePoint::<HZ>::UNITS_PER_SEC, NANOS_PER_SEC),
    );
    let base = if self.is_negative() {
      UNIX_EPOCH.checked_sub(whole)
    } else {
      UNIX_EPOCH.checked_add(whole)
    };
    match base.and_then(|t| t.checked_add(fraction)) {
      Some(system_time) => Ok(system_time),
      None => {
        warn!("{:?} does not fit in SystemTime", self);
        Error::out_of_range(self.seconds, "std::time::SystemTime")
      }
    }
  }
}

impl From<DateTime<Utc>> for Timestamp {
  fn from(date_time: DateTime<Utc>) -> Self {
    // A leap second shows up as nanoseconds >= 10^9; fold it into the next
    // second.
    let nanos = date_time.timestamp_subsec_nanos();
    let base: Timestamp = TimePoint {
      seconds: date_time.timestamp(),
      subsec_units: nanos % NANOS_PER_SEC,
    };
    if nanos >= NANOS_PER_SEC {
      base + TimePoint::from_secs(1)
    } else {
      base
    }
  }
}

impl TryFrom<Timestamp> for DateTime<Utc> {
  type Error = Error;

  fn try_from(time: Timestamp) -> Result<Self> {
    match DateTime::from_timestamp(time.seconds, time.subsec_units) {
      Some(date_time) => Ok(date_time),
      None => Error::out_of_range(time.seconds, "chrono::DateTime<Utc>"),
    }
  }
}

impl Timestamp {
  /// Smallest and largest whole second that survive a round trip through
  /// `chrono::DateTime<Utc>`.
  pub fn chrono_range() -> (i64, i64) {
    (
      DateTime::<Utc>::MIN_UTC.timestamp(),
      DateTime::<Utc>::MAX_UTC.timestamp(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::structure::time::{MicroTimePoint, MilliTimePoint};

  const NANOS_PER_SEC: u64 = 1_000_000_000;

  #[test]
  fn convert_from_duration() {
    let duration = TDuration::from_nanos(1_519_152_761 * NANOS_PER_SEC + 328_210_046);
    let time: Timestamp = duration.into();

    assert_eq!(time, Timestamp::new(1_519_152_761, 328_210_046).unwrap());

    let time: MicroTimePoint = duration.into();
    assert_eq!(time, MicroTimePoint::new(1_519_152_761, 328_210).unwrap());
  }

  #[test]
  fn convert_from_huge_duration_saturates() {
    let duration = TDuration::new(u64::MAX, 999_999_999);
    assert_eq!(MilliTimePoint::from(duration), MilliTimePoint::MAX);
  }

  #[test]
  fn convert_to_duration() {
    let time = MilliTimePoint::new(1_519_152_760, 328).unwrap();
    let duration = TDuration::try_from(time).unwrap();

    assert_eq!(
      duration,
      TDuration::from_nanos(1_519_152_760 * NANOS_PER_SEC + 328_000_000)
    );
  }

  #[test]
  fn negative_to_duration_fails() {
    let time = MilliTimePoint::new(-1, 999).unwrap();
    assert_eq!(
      TDuration::try_from(time),
      Err(Error::Negative {
        seconds: -1,
        target: "std::time::Duration"
      })
    );
  }

  #[test]
  fn system_time_before_epoch() {
    let before = UNIX_EPOCH - TDuration::from_millis(1_500);
    let time = MilliTimePoint::from_system_time(before);

    assert_eq!(time, MilliTimePoint::new(-2, 500).unwrap());
    assert_eq!(time.to_system_time(), Ok(before));
  }

  #[test]
  fn system_time_round_trip() {
    let now = SystemTime::now();
    let time = Timestamp::from_system_time(now);
    assert!(!time.is_negative());
    assert_eq!(time.to_system_time(), Ok(now));
  }

  #[test]
  fn system_time_with_fraction() {
    let time = MilliTimePoint::new(-3, 1).unwrap();
    assert_eq!(
      time.to_system_time(),
      Ok(UNIX_EPOCH - TDuration::from_millis(2_999))
    );
  }

  #[test]
  fn chrono_round_trip() {
    let time = Timestamp::new(1_537_045_491, 123_456_789).unwrap();
    let date_time = DateTime::<Utc>::try_from(time).unwrap();

    assert_eq!(date_time.timestamp(), 1_537_045_491);
    assert_eq!(date_time.timestamp_subsec_nanos(), 123_456_789);
    assert_eq!(Timestamp::from(date_time), time);
  }

  #[test]
  fn chrono_before_epoch() {
    let time = Timestamp::new(-1, 250_000_000).unwrap();
    let date_time = DateTime::<Utc>::try_from(time).unwrap();
    assert_eq!(date_time.timestamp_millis(), -750);
    assert_eq!(Timestamp::from(date_time), time);
  }

  #[test]
  fn chrono_out_of_range() {
    let (_, max_seconds) = Timestamp::chrono_range();
    assert!(DateTime::<Utc>::try_from(Timestamp::from_secs(max_seconds)).is_ok());
    assert!(DateTime::<Utc>::try_from(Timestamp::from_secs(max_seconds + 1)).is_err());
    assert!(DateTime::<Utc>::try_from(Timestamp::MIN).is_err());
  }
}
