use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{self, Receiver, Sender};

type Subscribers = BTreeMap<u64, Sender<Value>>;

/// Process-wide inbound channel: every message posted by a frame is
/// delivered to every live subscriber, in posting order.
///
/// Cloning shares the same channel.
#[derive(Debug, Clone, Default)]
pub struct MessageBus {
    subscribers: Rc<RefCell<Subscribers>>,
    next_id: Rc<Cell<u64>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a subscription. It stays registered until the handle is dropped.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.subscribers.borrow_mut().insert(id, sender);

        Subscription {
            id,
            receiver,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Deliver `message` to every subscriber and return how many received it
    pub fn post(&self, message: Value) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|_, sender| sender.send(message.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// Scoped registration on a [`MessageBus`]; dropping it unsubscribes
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: Receiver<Value>,
    subscribers: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next queued message, without blocking
    pub fn try_next(&self) -> Option<Value> {
        self.receiver.try_recv().ok()
    }

    /// Explicit form of dropping the handle
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().remove(&self.id);
        }
    }
}
