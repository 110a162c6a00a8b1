//! The preview bridge: owns a mounted frame and drives it over the message
//! protocol.
//!
//! A bridge starts out awaiting the frame's `initialized` message. Nothing is
//! sent before that. Once it arrives, the frame's window becomes the bridge's
//! only outbound target and the stored sandbox description is compiled.
//! Every later [`PreviewBridge::update`] sends exactly one compile command.

mod compile;
mod error;


pub use compile::CompileRequest;
pub use error::BridgeError;

use crate::config::{BridgeOptions, ReadinessPolicy};
use crate::frame::{Frame, FramePlan, Host, MountTarget, WindowId};
use crate::protocol::{
    CompileCommand, InboundMessage, MessageBus, OutboundMessage, Subscription, Transport,
};
use crate::sandbox::SandboxDescription;
use crate::template::TemplateRegistry;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, trace, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Waiting for the frame to report `initialized`
    AwaitingReady,
    /// The frame's window is registered as the outbound target
    Ready { target: WindowId },
}

/// Answer to a readiness poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Awaiting,
    /// Still awaiting past the configured deadline
    TimedOut,
}

/// Result of [`PreviewBridge::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The compile command was posted to the frame
    Dispatched(CompileCommand),
    /// Stored; it will be compiled once the frame is initialized
    Deferred,
}

pub struct PreviewBridge<T: Transport> {
    id: Uuid,
    frame: Frame,
    transport: T,
    subscription: Option<Subscription>,
    templates: TemplateRegistry,
    description: SandboxDescription,
    skip_eval: bool,
    state: BridgeState,
    readiness: ReadinessPolicy,
    created_at: Instant,
    timeout_reported: bool,
    compiles_sent: usize,
}

impl<T: Transport> PreviewBridge<T> {
    /// Mount a frame on `host` and start listening on `bus`.
    ///
    /// Fails with [`BridgeError::Mount`] when the target cannot be resolved;
    /// in that case nothing is subscribed and the host is left untouched.
    pub fn new<H: Host + ?Sized>(
        host: &mut H,
        target: impl Into<MountTarget>,
        description: SandboxDescription,
        options: &BridgeOptions,
        bus: &MessageBus,
        transport: T,
    ) -> Result<Self, BridgeError> {
        let frame = FramePlan::new(target, options).commit(host)?;
        Ok(Self::attach(frame, description, options, bus, transport))
    }

    /// Build a bridge around a frame that is already mounted
    pub fn attach(
        frame: Frame,
        description: SandboxDescription,
        options: &BridgeOptions,
        bus: &MessageBus,
        transport: T,
    ) -> Self {
        let id = Uuid::new_v4();
        let subscription = bus.subscribe();
        debug!(bridge = %id, window = %frame.window(), "awaiting initialized");

        Self {
            id,
            frame,
            transport,
            subscription: Some(subscription),
            templates: TemplateRegistry::default(),
            description,
            skip_eval: options.skip_eval,
            state: BridgeState::AwaitingReady,
            readiness: options.readiness_policy(),
            created_at: Instant::now(),
            timeout_reported: false,
            compiles_sent: 0,
        }
    }

    /// Use a custom template rule table
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, BridgeState::Ready { .. })
    }

    /// Whether the bridge still holds its bus subscription
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Most recently applied description
    pub fn description(&self) -> &SandboxDescription {
        &self.description
    }

    pub fn compiles_sent(&self) -> usize {
        self.compiles_sent
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle every inbound message queued so far, in arrival order.
    ///
    /// Returns how many messages were handled.
    pub fn pump(&mut self) -> Result<usize, BridgeError> {
        let mut handled = 0;
        while self.next_message()? {
            handled += 1;
        }
        Ok(handled)
    }

    /// Handle the next queued inbound message, if any
    pub fn next_message(&mut self) -> Result<bool, BridgeError> {
        let Some(raw) = self.next_inbound() else {
            return Ok(false);
        };
        self.handle(InboundMessage::from_value(&raw))?;
        Ok(true)
    }

    pub fn handle(&mut self, message: InboundMessage) -> Result<(), BridgeError> {
        match message {
            InboundMessage::Initialized => self.on_initialized(),
            InboundMessage::Ignored { kind } => {
                trace!(bridge = %self.id, ?kind, "ignoring inbound message");
                Ok(())
            }
        }
    }

    /// Replace the sandbox description and compile it.
    ///
    /// Before the frame is initialized the description is only stored.
    pub fn update(&mut self, description: SandboxDescription) -> Result<UpdateOutcome, BridgeError> {
        self.description = description;
        match self.state {
            BridgeState::AwaitingReady => {
                debug!(bridge = %self.id, "update deferred until initialized");
                Ok(UpdateOutcome::Deferred)
            }
            BridgeState::Ready { target } => {
                let command = self.send_compile(target)?;
                Ok(UpdateOutcome::Dispatched(command))
            }
        }
    }

    /// Poll readiness against the configured policy.
    ///
    /// A timeout is reported, and logged once, but the bridge keeps
    /// listening; a late `initialized` still makes it ready.
    pub fn readiness(&mut self, now: Instant) -> Readiness {
        if self.is_ready() {
            return Readiness::Ready;
        }

        match self.readiness {
            ReadinessPolicy::Deadline(limit)
                if now.saturating_duration_since(self.created_at) >= limit =>
            {
                if !self.timeout_reported {
                    warn!(bridge = %self.id, ?limit, "frame has not reported initialized");
                    self.timeout_reported = true;
                }
                Readiness::TimedOut
            }
            _ => Readiness::Awaiting,
        }
    }

    /// Stop listening for inbound messages
    pub fn close(&mut self) {
        if self.subscription.take().is_some() {
            debug!(bridge = %self.id, "unsubscribed");
        }
    }

    fn next_inbound(&self) -> Option<Value> {
        self.subscription.as_ref().and_then(Subscription::try_next)
    }

    fn on_initialized(&mut self) -> Result<(), BridgeError> {
        let target = match self.state {
            BridgeState::AwaitingReady => {
                let target = self.frame.window();
                self.state = BridgeState::Ready { target };
                debug!(bridge = %self.id, %target, "frame initialized, target registered");
                target
            }
            BridgeState::Ready { target } => {
                debug!(bridge = %self.id, %target, "frame re-initialized");
                target
            }
        };

        self.send_compile(target)?;
        Ok(())
    }

    fn send_compile(&mut self, target: WindowId) -> Result<CompileCommand, BridgeError> {
        let request = CompileRequest::prepare(&self.description, &self.templates);
        let command = request.into_command(self.skip_eval);
        let message = OutboundMessage::Compile(command.clone()).to_value()?;

        self.transport.post_message(target, message);
        self.compiles_sent += 1;

        debug!(
            bridge = %self.id,
            %target,
            template = %command.template,
            modules = command.modules.len(),
            "compile sent"
        );
        Ok(command)
    }
}
