use crate::registry::{Registry, SubscriberId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A single-threaded broadcast stream.
///
/// `send` delivers synchronously to every subscriber in subscription order.
/// Subscribers added or removed while a `send` is running only see the
/// change from the next `send`.
pub struct Port<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

/// Stream the bridge consumes scenes from.
pub type OutputPort<T> = Port<T>;

/// Stream the bridge publishes input events into.
pub type InputPort<T> = Port<T>;

impl<T> Port<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = self.registry.borrow_mut().insert(Rc::new(callback));
        tracing::trace!(?id, "port subscriber added");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn send(&self, value: T) {
        let callbacks = {
            let mut registry = self.registry.borrow_mut();
            registry.delivered += 1;
            registry.snapshot()
        };

        tracing::trace!(subscribers = callbacks.len(), "port send");

        for callback in callbacks {
            (callback)(&value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Number of values sent through this port so far.
    pub fn sent(&self) -> u64 {
        self.registry.borrow().delivered
    }
}

impl<T> Clone for Port<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<T> Default for Port<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Port<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Port")
            .field("subscribers", &self.subscriber_count())
            .field("sent", &self.sent())
            .finish()
    }
}

/// Handle to one subscriber of a [`Port`].
///
/// Dropping the handle leaves the subscriber attached; call
/// [`Subscription::unsubscribe`] to detach it.
pub struct Subscription<T> {
    id: SubscriberId,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }

    /// Returns `false` if the subscriber was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => {
                let removed = registry.borrow_mut().remove(self.id);
                tracing::trace!(id = ?self.id, removed, "port subscriber removed");
                removed
            }
            None => false,
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

pub fn port<T>() -> Port<T> {
    Port::new()
}
