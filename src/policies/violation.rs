//! # Contract-violation policy.
//!
//! [`ViolationPolicy`] decides what happens when the driving application breaks
//! the scheduler's contract (wrong state, foreign handle, duplicate name...).
//!
//! - [`ViolationPolicy::Report`] the call returns a [`SchedulerError`](crate::SchedulerError) (default).
//! - [`ViolationPolicy::Panic`] the violation is logged and the scheduler panics at the
//!   violation site, which is handy under a debugger or in test harnesses.
//!
//! The choice is explicit configuration; it never changes with the build profile.

/// Policy applied to rejected lifecycle calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViolationPolicy {
    /// Return the error to the caller.
    #[default]
    Report,
    /// Log, then panic where the violation was detected.
    Panic,
}

impl ViolationPolicy {
    /// True if violations halt the program.
    #[inline]
    pub fn halts(self) -> bool {
        matches!(self, ViolationPolicy::Panic)
    }
}
