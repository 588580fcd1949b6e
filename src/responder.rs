//! Glue between gateways and the state machine.
//!
//! For each inbound event: lock the user's session, run the pure transition,
//! render, commit the new state, then deliver. Delivery failures are logged and
//! dropped; the committed state is kept.

use tracing::{debug, warn};

use crate::conversation::session::SessionStore;
use crate::conversation::state::UserSession;
use crate::conversation::{Event, InboundEvent, StateMachine};
use crate::gateway::MessagingGateway;
use crate::render::{OutboundMessage, Renderer};

/// Handles inbound events for every user.
#[derive(Debug)]
pub struct Responder {
    machine: StateMachine,
    renderer: Renderer,
    sessions: SessionStore,
}

impl Responder {
    /// Create a responder with an empty session store.
    pub fn new(machine: StateMachine, renderer: Renderer) -> Self {
        Self {
            machine,
            renderer,
            sessions: SessionStore::new(),
        }
    }

    /// Session store, for inspection.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one event and return the message to show, without delivering it.
    pub async fn respond(&self, inbound: &InboundEvent) -> OutboundMessage {
        let handle = self.sessions.get_or_create(inbound.user_id).await;
        let mut session = handle.lock().await;
        self.step(&mut session, inbound)
    }

    /// Process one event and deliver the response through `gateway`.
    ///
    /// The user's lock is held until delivery completes so replies to one user
    /// go out in event order.
    pub async fn handle(&self, inbound: &InboundEvent, gateway: &dyn MessagingGateway) {
        let handle = self.sessions.get_or_create(inbound.user_id).await;
        let mut session = handle.lock().await;
        let message = self.step(&mut session, inbound);

        if let Err(err) = gateway.send(inbound.user_id, &message).await {
            warn!(user_id = inbound.user_id, error = %err, "failed to deliver response");
        }
    }

    fn step(&self, session: &mut UserSession, inbound: &InboundEvent) -> OutboundMessage {
        let event = Event::from(inbound);
        let transition = self.machine.transition(session, &event);
        let message = self
            .renderer
            .render(&transition.screen, transition.session.language);
        debug!(
            user_id = inbound.user_id,
            from = ?session.state,
            to = ?transition.session.state,
            "transition"
        );
        *session = transition.session;
        message
    }
}
