//! Global loading indicator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A process-wide "operation in flight" indicator.
pub trait LoadingSignal: Send + Sync {
    /// Show the indicator.
    fn show(&self);

    /// Hide the indicator.
    fn hide(&self);
}

/// A plain boolean indicator.
#[derive(Debug, Default)]
pub struct LoadingFlag {
    visible: AtomicBool,
}

impl LoadingFlag {
    /// Whether the indicator is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl LoadingSignal for LoadingFlag {
    fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }
}

/// Reference-counts in-flight requests in front of a [`LoadingSignal`].
///
/// The signal is shown when the first request starts and hidden when the
/// last one finishes, so overlapping requests cannot clear the indicator
/// while another is still running.
///
/// # Example
///
/// ```
/// use atelier_client::{LoadingFlag, LoadingTracker};
/// use std::sync::Arc;
///
/// let flag = Arc::new(LoadingFlag::default());
/// let tracker = LoadingTracker::new(flag.clone());
///
/// let first = tracker.begin();
/// let second = tracker.begin();
/// drop(first);
/// assert!(flag.is_visible());
/// drop(second);
/// assert!(!flag.is_visible());
/// ```
pub struct LoadingTracker {
    signal: Arc<dyn LoadingSignal>,
    in_flight: Mutex<usize>,
}

impl std::fmt::Debug for LoadingTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingTracker")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl LoadingTracker {
    /// Wrap a signal.
    pub fn new(signal: Arc<dyn LoadingSignal>) -> Self {
        Self {
            signal,
            in_flight: Mutex::new(0),
        }
    }

    /// Mark a request as started; the returned guard marks it finished on drop.
    pub fn begin(&self) -> LoadingGuard<'_> {
        let mut count = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
        if *count == 1 {
            self.signal.show();
        }
        tracing::trace!(in_flight = *count, "Request started");
        LoadingGuard { tracker: self }
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn end(&self) {
        let mut count = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.signal.hide();
        }
        tracing::trace!(in_flight = *count, "Request finished");
    }
}

/// Marks one in-flight request; finishing happens on drop.
#[must_use = "the request is marked finished as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    tracker: &'a LoadingTracker,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.end();
    }
}
