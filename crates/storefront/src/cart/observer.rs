//! Change notification for cart renderers.
//!
//! The store does not know what displays it. Renderers (a count badge, a cart
//! page, a CLI printer) subscribe independently and receive the new snapshot
//! after every successful mutation.

use std::fmt;

use cartkeeper_core::Cart;

/// Receives the cart snapshot after each change.
pub trait CartObserver {
    /// Called once per successful mutation with the cart as saved.
    fn cart_changed(&mut self, cart: &Cart);
}

impl<F: FnMut(&Cart)> CartObserver for F {
    fn cart_changed(&mut self, cart: &Cart) {
        self(cart);
    }
}

/// Handle returned by `CartStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of subscribed observers.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Notify in subscription order.
    pub(crate) fn notify(&mut self, cart: &Cart) {
        for (_, observer) in &mut self.entries {
            observer.cart_changed(cart);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_notify_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();

        let first = Rc::clone(&calls);
        observers.subscribe(Box::new(move |_: &Cart| first.borrow_mut().push("first")));
        let second = Rc::clone(&calls);
        observers.subscribe(Box::new(move |_: &Cart| second.borrow_mut().push("second")));

        observers.notify(&Cart::new());
        assert_eq!(*calls.borrow(), ["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::default();

        let counter = Rc::clone(&count);
        let id = observers.subscribe(Box::new(move |_: &Cart| *counter.borrow_mut() += 1));

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&Cart::new());

        assert_eq!(*count.borrow(), 0);
        assert_eq!(observers.len(), 0);
    }
}
