//! Time abstraction traits for platform-agnostic timing.
//!
//! Every component receives the current instant explicitly, so the same logic
//! runs against `embassy_time` on the board and against a hand-advanced clock
//! in tests.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations saturate to zero if `earlier` is actually later.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Milliseconds elapsed from `earlier` to `now`, clamped into a `u32`.
#[inline]
pub(crate) fn millis_between<I: TimeInstant>(earlier: I, now: I) -> u32 {
    let millis = now.duration_since(earlier).as_millis();
    u32::try_from(millis).unwrap_or(u32::MAX)
}

/// Returns true once `deadline` has been reached.
#[inline]
pub(crate) fn reached<I: TimeInstant>(deadline: I, now: I) -> bool {
    // `duration_since` saturates: zero exactly when `deadline <= now`.
    deadline.duration_since(now).as_millis() == 0
}
