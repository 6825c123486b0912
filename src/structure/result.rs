use std::result;

/// This is a specialized Result, similar to std::io::Result
pub type Result<T> = result::Result<T, Error>;

/// Failures at the edges of the time arithmetic.
///
/// The arithmetic itself never fails: overflow saturates. These are only
/// returned when building a `TimePoint` from untrusted parts, or when
/// converting one into a foreign type that cannot hold it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  /// Sub-second part is not in `[0, hz)`.
  #[error("sub-second part {units} is not below {hz} units per second")]
  SubsecondOutOfRange { units: u32, hz: u32 },

  /// Negative time value where only non-negative values are meaningful,
  /// e.g. `std::time::Duration`.
  #[error("negative time value ({seconds} s) cannot be converted to {target}")]
  Negative { seconds: i64, target: &'static str },

  /// Target type cannot represent the value.
  #[error("time value ({seconds} s) is out of range for {target}")]
  OutOfRange { seconds: i64, target: &'static str },
}

impl Error {
  pub fn subsecond_out_of_range<T>(units: u32, hz: u32) -> Result<T> {
    Err(Error::SubsecondOutOfRange { units, hz })
  }

  pub fn out_of_range<T>(seconds: i64, target: &'static str) -> Result<T> {
    Err(Error::OutOfRange { seconds, target })
  }
}
