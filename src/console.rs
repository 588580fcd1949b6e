//! Console gateway for local conversations (`faqbot chat`).
//!
//! Menus are printed as numbered choices; typing a number presses the
//! corresponding button, anything else is sent as free text.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::debug;

use crate::conversation::InboundEvent;
use crate::gateway::{GatewayError, MessagingGateway};
use crate::render::OutboundMessage;
use crate::responder::Responder;

/// Gateway writing rendered messages to a text stream.
#[derive(Debug)]
pub struct ConsoleGateway<W> {
    out: Mutex<W>,
    last_choices: Mutex<Vec<String>>,
}

impl<W: AsyncWrite + Unpin + Send> ConsoleGateway<W> {
    /// Create a gateway writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            last_choices: Mutex::new(Vec::new()),
        }
    }

    /// Map a typed choice number from the last menu to its callback token.
    pub async fn resolve_choice(&self, input: &str) -> Option<String> {
        let index: usize = input.trim().parse().ok()?;
        let choices = self.last_choices.lock().await;
        choices.get(index.checked_sub(1)?).cloned()
    }

    /// Consume the gateway and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> MessagingGateway for ConsoleGateway<W> {
    async fn send(&self, _user_id: i64, message: &OutboundMessage) -> Result<(), GatewayError> {
        let rendered = format_message(message);
        {
            let mut out = self.out.lock().await;
            out.write_all(rendered.as_bytes()).await?;
            out.flush().await?;
        }
        let mut last = self.last_choices.lock().await;
        *last = message.all_choices().map(|c| c.token.clone()).collect();
        Ok(())
    }
}

/// Format a message as plain text with numbered choices.
pub fn format_message(message: &OutboundMessage) -> String {
    let mut lines = vec![message.text.clone()];
    for (idx, choice) in message.all_choices().enumerate() {
        lines.push(format!("  [{}] {}", idx.saturating_add(1), choice.label));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Run an interactive conversation for `user_id` until EOF or `quit`.
///
/// # Errors
///
/// Returns an error if reading input fails.
pub async fn run_chat<R, W>(
    responder: &Responder,
    user_id: i64,
    mut input: R,
    gateway: &ConsoleGateway<W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    responder
        .handle(&InboundEvent::text(user_id, "/start"), gateway)
        .await;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        let event = match gateway.resolve_choice(trimmed).await {
            Some(token) => InboundEvent::choice(user_id, token),
            None => InboundEvent::text(user_id, trimmed),
        };
        debug!(?event, "console input");
        responder.handle(&event, gateway).await;
    }
    Ok(())
}
