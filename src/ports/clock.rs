//! Clock Port - Signing Timestamp Source
//!
//! BPJS validates `X-Timestamp` against its own clock, so production
//! code reads the system UTC clock on every request. Tests pin the
//! value to assert exact signature bytes.

/// Source of UNIX timestamps (seconds, UTC).
pub trait Clock: Send + Sync + 'static {
  /// Current UNIX timestamp in seconds.
  fn unix_timestamp(&self) -> i64;
}

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn unix_timestamp(&self) -> i64 {
    chrono::Utc::now().timestamp()
  }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
  fn unix_timestamp(&self) -> i64 {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_system_clock_is_after_2020() {
    assert!(SystemClock.unix_timestamp() > 1_577_836_800);
  }

  #[test]
  fn test_fixed_clock() {
    assert_eq!(FixedClock(42).unix_timestamp(), 42);
  }
}
