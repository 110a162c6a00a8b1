//! Wire protocol between the host page and the bundler frame.

mod bus;
mod message;
mod transport;

#[cfg(test)]
mod tests;

pub use bus::{MessageBus, Subscription};
pub use message::{
    CompileCommand, InboundMessage, Module, ModuleSet, OutboundMessage, PROTOCOL_VERSION,
    module_set,
};
pub use transport::{MemoryTransport, Transport};
