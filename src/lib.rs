//! Saturating arithmetic on seconds + sub-second time values.
//!
//! A [`TimePoint`] is a whole number of seconds (`i64`) plus a sub-second
//! count in `[0, HZ)`, where `HZ` is a compile-time resolution. It serves
//! both as a timestamp and as a signed duration.
//!
//! The central operation is [`subtract`]: it returns the exact difference
//! when that is representable, and otherwise clamps to [`TimePoint::MIN`]
//! or [`TimePoint::MAX`]. It never wraps, never panics and never fails, so
//! the result can be fed straight back into further arithmetic.
//!
//! ```
//! use satspec::{subtract, MilliTimePoint};
//!
//! let a = MilliTimePoint::new(5, 100).unwrap();
//! let b = MilliTimePoint::new(3, 200).unwrap();
//! assert_eq!(subtract(a, b), MilliTimePoint::new(1, 900).unwrap());
//!
//! let low = MilliTimePoint::MIN - MilliTimePoint::from_secs(1);
//! assert_eq!(low, MilliTimePoint::MIN);
//! ```
//!
//! Conversions from `std::time` and `chrono` types, a
//! [speedy](https://crates.io/crates/speedy) wire encoding and serde support
//! come along with the type. Everything that builds a `TimePoint` from
//! outside data checks the sub-second range.

#[macro_use]
mod checked_impl;
mod structure;

pub use structure::{
  result::{Error, Result},
  time::{
    MicroTimePoint, MilliTimePoint, TimePoint, Timestamp, MICROS_PER_SEC, MILLIS_PER_SEC,
    NANOS_PER_SEC, SEC_MAX, SEC_MIN,
  },
  time_delta::{add, subtract},
};
