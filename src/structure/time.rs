use std::{
  convert::TryFrom,
  mem::size_of,
};

use log::warn;
use serde::{Deserialize, Serialize};
use speedy::{Context, Readable, Reader, Writable, Writer};
use static_assertions::const_assert;

use super::result::{Error, Result};

pub const NANOS_PER_SEC: u32 = 1_000_000_000;
pub const MICROS_PER_SEC: u32 = 1_000_000;
pub const MILLIS_PER_SEC: u32 = 1_000;

/// Smallest representable whole-second count.
pub const SEC_MIN: i64 = i64::MIN;
/// Largest representable whole-second count.
pub const SEC_MAX: i64 = i64::MAX;

// Unit products of two u32 resolutions are computed in u64.
const_assert!((u32::MAX as u64).checked_mul(u32::MAX as u64).is_some());

/// A point in time, or a signed duration, with sub-second resolution `HZ`.
///
/// The value is `seconds + subsec_units / HZ`. The sub-second part is always
/// in `[0, HZ)`, also for negative values: minus one half second at
/// millisecond resolution is `{ seconds: -1, subsec_units: 500 }`.
///
/// There is no public way to build a value that breaks this, so arithmetic
/// on `TimePoint` can rely on it.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Copy, Clone)]
#[serde(try_from = "RawTimePoint")]
pub struct TimePoint<const HZ: u32 = NANOS_PER_SEC> {
  // Field order matters: derived Ord compares seconds first.
  pub(crate) seconds: i64,
  pub(crate) subsec_units: u32,
}

/// Nanosecond resolution, the usual `struct timespec`.
pub type Timestamp = TimePoint<NANOS_PER_SEC>;
pub type MicroTimePoint = TimePoint<MICROS_PER_SEC>;
pub type MilliTimePoint = TimePoint<MILLIS_PER_SEC>;

impl<const HZ: u32> TimePoint<HZ> {
  /// Sub-second units per second. Evaluating this rejects `HZ == 0` at
  /// compile time.
  pub const UNITS_PER_SEC: u32 = {
    assert!(HZ > 0, "TimePoint resolution must be at least one unit per second");
    HZ
  };

  pub const ZERO: TimePoint<HZ> = TimePoint {
    seconds: 0,
    subsec_units: 0,
  };
  /// Low saturation value.
  pub const MIN: TimePoint<HZ> = TimePoint {
    seconds: SEC_MIN,
    subsec_units: 0,
  };
  /// High saturation value.
  pub const MAX: TimePoint<HZ> = TimePoint {
    seconds: SEC_MAX,
    subsec_units: Self::UNITS_PER_SEC - 1,
  };

  pub fn new(seconds: i64, subsec_units: u32) -> Result<TimePoint<HZ>> {
    if subsec_units >= Self::UNITS_PER_SEC {
      Error::subsecond_out_of_range(subsec_units, HZ)
    } else {
      Ok(TimePoint {
        seconds,
        subsec_units,
      })
    }
  }

  pub const fn from_secs(seconds: i64) -> TimePoint<HZ> {
    TimePoint {
      seconds,
      subsec_units: 0,
    }
  }

  pub const fn seconds(&self) -> i64 {
    self.seconds
  }

  pub const fn subsec_units(&self) -> u32 {
    self.subsec_units
  }

  /// -1, 0 or 1 by the sign of the value.
  pub fn signum(&self) -> i32 {
    if self.seconds < 0 {
      -1
    } else if self.seconds == 0 && self.subsec_units == 0 {
      0
    } else {
      1
    }
  }

  pub fn is_negative(&self) -> bool {
    self.seconds < 0
  }

  /// Express the same value at resolution `TO`.
  ///
  /// Loses precision when `TO < HZ`; the value is then rounded toward
  /// negative infinity, so e.g. -0.0015 s becomes -0.002 s at millisecond
  /// resolution.
  pub fn to_resolution<const TO: u32>(self) -> TimePoint<TO> {
    TimePoint {
      seconds: self.seconds,
      subsec_units: rescale_units(
        self.subsec_units,
        Self::UNITS_PER_SEC,
        TimePoint::<TO>::UNITS_PER_SEC,
      ),
    }
  }
}

impl<const HZ: u32> Default for TimePoint<HZ> {
  fn default() -> TimePoint<HZ> {
    TimePoint::ZERO
  }
}

/// Rescale `units` of a `from_hz` resolution to `to_hz`, rounding down.
///
/// Requires `units < from_hz`. The result is then below `to_hz`, and the
/// product cannot exceed `(2^32 - 1)^2`, which fits in u64.
pub(crate) fn rescale_units(units: u32, from_hz: u32, to_hz: u32) -> u32 {
  if from_hz == to_hz {
    return units;
  }
  (u64::from(units) * u64::from(to_hz) / u64::from(from_hz)) as u32
}

// Shape accepted from serde before validation.
#[doc(hidden)]
#[derive(Deserialize)]
pub struct RawTimePoint {
  seconds: i64,
  subsec_units: u32,
}

impl<const HZ: u32> TryFrom<RawTimePoint> for TimePoint<HZ> {
  type Error = Error;

  fn try_from(raw: RawTimePoint) -> Result<Self> {
    TimePoint::new(raw.seconds, raw.subsec_units).map_err(|e| {
      warn!("Rejecting deserialized time value: {}", e);
      e
    })
  }
}

// Wire format: seconds as i64, then sub-second units as u32, both in the
// context endianness. Twelve bytes, no padding.
impl<'a, C: Context, const HZ: u32> Readable<'a, C> for TimePoint<HZ> {
  #[inline]
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> std::result::Result<Self, C::Error> {
    let seconds: i64 = reader.read_value()?;
    let subsec_units: u32 = reader.read_value()?;

    TimePoint::new(seconds, subsec_units).map_err(|e| {
      warn!("Rejecting time value on the wire: {}", e);
      speedy::Error::custom(e.to_string()).into()
    })
  }

  #[inline]
  fn minimum_bytes_needed() -> usize {
    size_of::<i64>() + size_of::<u32>()
  }
}

impl<C: Context, const HZ: u32> Writable<C> for TimePoint<HZ> {
  #[inline]
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> std::result::Result<(), C::Error> {
    writer.write_i64(self.seconds)?;
    writer.write_u32(self.subsec_units)?;
    Ok(())
  }
}
