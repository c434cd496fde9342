use std::cell::Cell;
use std::rc::Rc;

/// Single-threaded flag shared between a time source and a timed task.
///
/// Clones observe the same flag. A firing stays pending until the owning task
/// consumes it with [`take`](Self::take), or until the task is (re)activated,
/// which discards it.
///
/// ```
/// use tickvisor::Trigger;
///
/// let trigger = Trigger::new();
/// let timer_side = trigger.clone();
///
/// timer_side.fire();
/// assert!(trigger.is_fired());
/// assert!(trigger.take());
/// assert!(!trigger.take());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trigger(Rc<Cell<bool>>);

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the trigger as fired.
    pub fn fire(&self) {
        self.0.set(true);
    }

    pub fn is_fired(&self) -> bool {
        self.0.get()
    }

    /// Consumes a pending firing.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }

    /// Discards a pending firing.
    pub fn reset(&self) {
        self.0.set(false);
    }
}
