//! Messaging gateway abstraction: "send one message to one user".
//!
//! Inbound delivery is transport-specific and lives with each adapter
//! ([`crate::telegram`], [`crate::console`]).

use async_trait::async_trait;

use crate::render::OutboundMessage;

/// Errors from delivering an outbound message.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The transport rejected or failed to deliver the message.
    #[error("transport error: {0}")]
    Transport(String),

    /// Local I/O failed (console gateway).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound side of a messaging transport.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Deliver a rendered message to a user.
    async fn send(&self, user_id: i64, message: &OutboundMessage) -> Result<(), GatewayError>;
}
