//! Debounced resize observation.
//!
//! Time is supplied by the caller in milliseconds so the same code runs under
//! a browser animation clock, a server, or a test.

use crate::geometry::Size;

/// Default resize debounce window.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Last-call-wins debouncer.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given delay.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Schedule `value`, replacing anything pending.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.delay_ms)));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now_ms >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Size observer with debouncing and explicit teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeObserver {
    debouncer: Debouncer<Size>,
    connected: bool,
}

impl Default for ResizeObserver {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeObserver {
    /// Create a connected observer.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            debouncer: Debouncer::new(delay_ms),
            connected: true,
        }
    }

    /// Record an observed size. Ignored after [`disconnect`](Self::disconnect).
    pub fn notify(&mut self, size: Size, now_ms: u64) {
        if self.connected {
            self.debouncer.push(size, now_ms);
        }
    }

    /// Size to act on, once the debounce window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<Size> {
        if !self.connected {
            return None;
        }
        self.debouncer.poll(now_ms)
    }

    /// Stop observing and drop any pending notification.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.debouncer.cancel();
    }

    /// Whether the observer is still attached.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether a notification is waiting for its deadline.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
