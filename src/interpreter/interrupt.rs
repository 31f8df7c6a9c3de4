use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A cooperative cancellation flag shared between an evaluator and the code
/// driving it.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// (a UI or a signal handler) while the evaluator polls another. The evaluator
/// checks the flag before evaluating each node and clears it when it observes
/// it.
///
/// # Example
/// ```
/// use plotscript::interpreter::interrupt::Interrupt;
///
/// let interrupt = Interrupt::new();
/// let remote = interrupt.clone();
///
/// remote.raise();
/// assert!(interrupt.is_raised());
/// assert!(interrupt.take());
/// assert!(!remote.is_raised());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Creates a new, lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the current evaluation stops.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if an interrupt is pending, without clearing it.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears the flag and reports whether it was raised.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}
