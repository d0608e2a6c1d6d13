/// Handle returned by [`Signal::subscribe`], used to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// Observable value for the single-threaded UI event loop.
///
/// Subscribers run synchronously inside [`Signal::set`], in subscription
/// order, and only when the value actually changes.
pub struct Signal<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T: PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value. Returns `true` (and notifies) if it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.value);
        }
        true
    }

    pub fn subscribe(&mut self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Copy + PartialEq> Signal<T> {
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: PartialEq + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Signal;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new(1);
        let sink = Rc::clone(&seen);
        signal.subscribe(move |v| sink.borrow_mut().push(*v));

        assert!(!signal.set(1));
        assert!(signal.set(2));
        assert!(signal.set(3));
        assert!(!signal.set(3));

        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(signal.value(), 3);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let mut signal = Signal::new("a".to_string());
        let c = Rc::clone(&count);
        let id = signal.subscribe(move |_| *c.borrow_mut() += 1);

        signal.set("b".to_string());
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.set("c".to_string());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(signal.subscriber_count(), 0);
        assert_eq!(signal.get(), "c");
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new(false);
        for tag in ["first", "second"] {
            let o = Rc::clone(&order);
            signal.subscribe(move |_| o.borrow_mut().push(tag));
        }
        signal.set(true);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
