use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::rc::Rc;

new_key_type! {
    pub struct SubscriberId;
}

pub type Callback<T> = Rc<dyn Fn(&T)>;

/// Subscriber table behind a [`Port`](crate::Port).
///
/// Slot keys are reused after removal, so delivery order is tracked
/// separately in `order`.
pub struct Registry<T> {
    pub subscribers: SlotMap<SubscriberId, Callback<T>>,
    pub order: SmallVec<[SubscriberId; 4]>,
    pub delivered: u64,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
            order: SmallVec::new(),
            delivered: 0,
        }
    }

    pub fn insert(&mut self, callback: Callback<T>) -> SubscriberId {
        let id = self.subscribers.insert(callback);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: SubscriberId) -> bool {
        if self.subscribers.remove(id).is_none() {
            return false;
        }
        self.order.retain(|other| *other != id);
        true
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Callbacks in subscription order, cloned out so delivery can run
    /// without holding a borrow of the table.
    pub fn snapshot(&self) -> SmallVec<[Callback<T>; 4]> {
        self.order
            .iter()
            .filter_map(|id| self.subscribers.get(*id).cloned())
            .collect()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
