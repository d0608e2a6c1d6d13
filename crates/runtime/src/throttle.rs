use foundation::time::Millis;

/// Coalesces a stream of updates into at most one release per window.
///
/// The first update after a quiet period is released immediately. Updates
/// arriving inside the window replace whatever is pending, and the newest one
/// is released once the window since the last release has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window_ms: f64,
    last_release: Option<Millis>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_release: None,
            pending: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn is_open(&self, now: Millis) -> bool {
        match self.last_release {
            None => true,
            Some(at) => now.elapsed_since(at) >= self.window_ms,
        }
    }

    /// Offer a new value. Returns it back if it may be committed right away.
    pub fn push(&mut self, value: T, now: Millis) -> Option<T> {
        if self.is_open(now) {
            self.pending = None;
            self.last_release = Some(now);
            return Some(value);
        }
        self.pending = Some(value);
        None
    }

    /// Release the pending value if its window has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        if self.pending.is_none() || !self.is_open(now) {
            return None;
        }
        self.last_release = Some(now);
        self.pending.take()
    }

    /// Release the pending value regardless of the window.
    pub fn flush(&mut self, now: Millis) -> Option<T> {
        let value = self.pending.take()?;
        self.last_release = Some(now);
        Some(value)
    }

    /// When the pending value becomes releasable, if there is one.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.as_ref()?;
        Some(match self.last_release {
            None => Millis::ZERO,
            Some(at) => at.add_ms(self.window_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Throttle;
    use foundation::time::Millis;

    #[test]
    fn first_update_is_released_immediately() {
        let mut t = Throttle::new(1000.0);
        assert_eq!(t.push(1, Millis(0.0)), Some(1));
        assert!(!t.has_pending());
    }

    #[test]
    fn newer_update_supersedes_pending_one() {
        let mut t = Throttle::new(1000.0);
        assert_eq!(t.push(1, Millis(0.0)), Some(1));
        assert_eq!(t.push(2, Millis(100.0)), None);
        assert_eq!(t.push(3, Millis(400.0)), None);
        assert_eq!(t.pending(), Some(&3));

        assert_eq!(t.poll(Millis(900.0)), None);
        assert_eq!(t.next_due(), Some(Millis(1000.0)));
        assert_eq!(t.poll(Millis(1000.0)), Some(3));
        assert_eq!(t.poll(Millis(5000.0)), None);
    }

    #[test]
    fn window_restarts_after_release() {
        let mut t = Throttle::new(1000.0);
        t.push("a", Millis(0.0));
        t.push("b", Millis(10.0));
        assert_eq!(t.poll(Millis(1200.0)), Some("b"));
        // Released at 1200, so 1500 is still inside the window.
        assert_eq!(t.push("c", Millis(1500.0)), None);
        assert_eq!(t.poll(Millis(2199.0)), None);
        assert_eq!(t.poll(Millis(2200.0)), Some("c"));
    }

    #[test]
    fn flush_ignores_window() {
        let mut t = Throttle::new(1000.0);
        t.push(1, Millis(0.0));
        t.push(2, Millis(1.0));
        assert_eq!(t.flush(Millis(2.0)), Some(2));
        assert_eq!(t.flush(Millis(3.0)), None);
        assert_eq!(t.next_due(), None);
    }

    #[test]
    fn zero_window_never_holds_values() {
        let mut t = Throttle::new(0.0);
        assert_eq!(t.push(1, Millis(5.0)), Some(1));
        assert_eq!(t.push(2, Millis(5.0)), Some(2));
    }
}
