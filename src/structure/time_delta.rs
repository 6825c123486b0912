//! Saturating addition and subtraction of `TimePoint`s.
//!
//! Whole seconds are combined with checked i64 arithmetic. When the exact
//! result does not fit, it is clamped to `TimePoint::MIN` or
//! `TimePoint::MAX` instead of wrapping.

use std::ops::{Add, Sub};

use log::debug;

use super::time::{TimePoint, SEC_MAX, SEC_MIN};

/// Which end of the range an exact result fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overflow {
  Below,
  Above,
}

impl Overflow {
  fn clamp<const HZ: u32>(self) -> TimePoint<HZ> {
    match self {
      Overflow::Below => TimePoint::MIN,
      Overflow::Above => TimePoint::MAX,
    }
  }
}

fn difference<const HZ: u32>(
  a: TimePoint<HZ>,
  b: TimePoint<HZ>,
) -> Result<TimePoint<HZ>, Overflow> {
  let hz = i64::from(TimePoint::<HZ>::UNITS_PER_SEC);
  let mut rs = a.seconds;
  let mut bs = b.seconds;
  // Both unit parts are in [0, hz), so this is in (-hz, hz).
  let ns = i64::from(a.subsec_units) - i64::from(b.subsec_units);
  let mut rns = ns;

  if ns < 0 {
    // Borrow one second, from whichever side can take it.
    rns = ns + hz;
    match bs.checked_add(1) {
      Some(bs1) => bs = bs1,
      None if rs > SEC_MIN => rs -= 1,
      None => return Err(Overflow::Below),
    }
  }

  match rs.checked_sub(bs) {
    Some(rs) => Ok(TimePoint {
      seconds: rs,
      subsec_units: rns as u32,
    }),
    // Subtracting a positive can only fall off the bottom, and
    // subtracting zero or a negative only off the top.
    None if bs > 0 => Err(Overflow::Below),
    None => Err(Overflow::Above),
  }
}

fn sum<const HZ: u32>(a: TimePoint<HZ>, b: TimePoint<HZ>) -> Result<TimePoint<HZ>, Overflow> {
  let hz = i64::from(TimePoint::<HZ>::UNITS_PER_SEC);
  let mut rs = a.seconds;
  let mut bs = b.seconds;
  // In [0, 2 * hz).
  let ns = i64::from(a.subsec_units) + i64::from(b.subsec_units);
  let mut rns = ns;

  if ns >= hz {
    rns = ns - hz;
    match bs.checked_add(1) {
      Some(bs1) => bs = bs1,
      None if rs < SEC_MAX => rs += 1,
      None => return Err(Overflow::Above),
    }
  }

  match rs.checked_add(bs) {
    Some(rs) => Ok(TimePoint {
      seconds: rs,
      subsec_units: rns as u32,
    }),
    None if bs < 0 => Err(Overflow::Below),
    None => Err(Overflow::Above),
  }
}

/// `a - b`, clamped to `TimePoint::MIN` / `TimePoint::MAX` when the exact
/// difference is out of range.
///
/// Total: never panics, never wraps, and the result always has its
/// sub-second part in `[0, HZ)`.
pub fn subtract<const HZ: u32>(a: TimePoint<HZ>, b: TimePoint<HZ>) -> TimePoint<HZ> {
  difference(a, b).unwrap_or_else(|overflow| {
    debug!("Time subtraction {:?} - {:?} saturated {:?}", a, b, overflow);
    overflow.clamp()
  })
}

/// `a + b`, saturating like [`subtract`].
pub fn add<const HZ: u32>(a: TimePoint<HZ>, b: TimePoint<HZ>) -> TimePoint<HZ> {
  sum(a, b).unwrap_or_else(|overflow| {
    debug!("Time addition {:?} + {:?} saturated {:?}", a, b, overflow);
    overflow.clamp()
  })
}

impl<const HZ: u32> TimePoint<HZ> {
  #[inline]
  pub fn saturating_sub(self, other: TimePoint<HZ>) -> TimePoint<HZ> {
    subtract(self, other)
  }

  #[inline]
  pub fn saturating_add(self, other: TimePoint<HZ>) -> TimePoint<HZ> {
    add(self, other)
  }

  /// `None` exactly when [`subtract`] would have clamped.
  pub fn checked_sub(self, other: TimePoint<HZ>) -> Option<TimePoint<HZ>> {
    difference(self, other).ok()
  }

  /// `None` exactly when [`add`] would have clamped.
  pub fn checked_add(self, other: TimePoint<HZ>) -> Option<TimePoint<HZ>> {
    sum(self, other).ok()
  }

  /// Time elapsed from `earlier` to `self`. Negative if `earlier` is
  /// actually later.
  #[inline]
  pub fn duration_since(self, earlier: TimePoint<HZ>) -> TimePoint<HZ> {
    subtract(self, earlier)
  }
}

// Operators saturate, like the named functions.
impl<const HZ: u32> Sub for TimePoint<HZ> {
  type Output = TimePoint<HZ>;

  fn sub(self, other: TimePoint<HZ>) -> TimePoint<HZ> {
    subtract(self, other)
  }
}

impl<const HZ: u32> Add for TimePoint<HZ> {
  type Output = TimePoint<HZ>;

  fn add(self, other: TimePoint<HZ>) -> TimePoint<HZ> {
    add(self, other)
  }
}

impl<const HZ: u32> num_traits::Zero for TimePoint<HZ> {
  fn zero() -> TimePoint<HZ> {
    TimePoint::ZERO
  }

  fn is_zero(&self) -> bool {
    *self == TimePoint::ZERO
  }
}

mod time_point_checked {
  use super::TimePoint;
  checked_impl!(CheckedAdd, checked_add, Option<Self>);
  checked_impl!(CheckedSub, checked_sub, Option<Self>);
  checked_impl!(SaturatingAdd, saturating_add, Self);
  checked_impl!(SaturatingSub, saturating_sub, Self);
}
