/// Remembers the last observed value and reports transitions.
///
/// Used to react to a change between two renders rather than to every
/// render (e.g. re-fitting the map only when the sidebar expands or collapses).
#[derive(Debug, Clone)]
pub struct Previous<T> {
    last: T,
}

impl<T: Clone + PartialEq> Previous<T> {
    pub fn new(initial: T) -> Self {
        Self { last: initial }
    }

    pub fn get(&self) -> &T {
        &self.last
    }

    /// Record `value`. Returns `Some((old, new))` when it differs from the last one.
    pub fn observe(&mut self, value: T) -> Option<(T, T)> {
        if value == self.last {
            return None;
        }
        let old = std::mem::replace(&mut self.last, value.clone());
        Some((old, value))
    }
}
