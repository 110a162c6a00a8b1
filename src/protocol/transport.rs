use crate::frame::WindowId;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Outbound side of the channel: delivers a message into a frame's window
pub trait Transport {
    fn post_message(&mut self, target: WindowId, message: Value);
}

/// Transport that records every posted message.
///
/// Clones share the same log, so a caller can keep one clone and hand the
/// other to a bridge.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Rc<RefCell<Vec<(WindowId, Value)>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything posted so far, oldest first
    pub fn sent(&self) -> Vec<(WindowId, Value)> {
        self.sent.borrow().clone()
    }

    /// Messages posted to one window
    pub fn messages_for(&self, target: WindowId) -> Vec<Value> {
        self.sent
            .borrow()
            .iter()
            .filter(|(window, _)| *window == target)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.borrow().is_empty()
    }
}

impl Transport for MemoryTransport {
    fn post_message(&mut self, target: WindowId, message: Value) {
        self.sent.borrow_mut().push((target, message));
    }
}
