//! Frame coalescing for high-frequency input

/// Holds at most one pending request. A new request replaces the pending
/// one instead of queueing behind it; the frame tick drains it.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `value` for the next frame. Returns true if it replaced a
    /// request that had not been flushed yet.
    pub fn request(&mut self, value: T) -> bool {
        self.pending.replace(value).is_some()
    }

    /// Take the pending request, if any. Called once per frame.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending request without flushing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut coalescer = FrameCoalescer::new();
        assert!(!coalescer.request(1));
        assert!(coalescer.request(2));
        assert!(coalescer.request(3));

        assert_eq!(coalescer.take(), Some(3));
        assert_eq!(coalescer.take(), None);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut coalescer = FrameCoalescer::new();
        coalescer.request("drag");
        assert!(coalescer.is_pending());

        coalescer.cancel();
        assert!(!coalescer.is_pending());
        assert_eq!(coalescer.take(), None);
    }
}
