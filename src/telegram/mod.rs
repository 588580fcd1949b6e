//! Telegram adapter: gateway implementation and bot dispatcher.
//!
//! Text messages and inline keyboard callbacks are turned into
//! [`InboundEvent`]s and handed to the [`Responder`]. Replies go out through
//! [`TelegramGateway`] in HTML parse mode.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, info, warn};

use crate::conversation::InboundEvent;
use crate::gateway::{GatewayError, MessagingGateway};
use crate::render::OutboundMessage;
use crate::responder::Responder;

pub mod ui;

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Outbound gateway over the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    /// Wrap a teloxide bot.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send(&self, user_id: i64, message: &OutboundMessage) -> Result<(), GatewayError> {
        let mut req = self
            .bot
            .send_message(ChatId(user_id), ui::escape_html(&message.text))
            .parse_mode(ParseMode::Html);

        if let Some(ref rows) = message.choices {
            req = req.reply_markup(ui::inline_keyboard(rows));
        }

        req.await
            .map(|_| ())
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Shared state for handler injection
// ---------------------------------------------------------------------------

/// Shared dependencies injected into teloxide handlers via `dptree::deps!`.
#[derive(Clone)]
struct SharedState {
    responder: Arc<Responder>,
    gateway: Arc<TelegramGateway>,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the Telegram bot until it is stopped (Ctrl+C).
///
/// Updates from different chats are processed concurrently by the
/// dispatcher; events from one chat are serialized by the responder's
/// per-user lock.
///
/// # Errors
///
/// Currently infallible once the dispatcher starts; kept fallible for
/// symmetry with the other run modes.
pub async fn run_telegram(bot_token: &str, responder: Arc<Responder>) -> anyhow::Result<()> {
    let bot = Bot::new(bot_token);

    let shared = SharedState {
        responder,
        gateway: Arc::new(TelegramGateway::new(bot.clone())),
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("telegram dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![shared])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("telegram dispatcher stopped");
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handle an incoming Telegram message. Non-text messages are ignored.
async fn handle_message(msg: Message, state: SharedState) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    let Some(text) = msg.text() else {
        debug!(chat_id, "non-text message, ignoring");
        return Ok(());
    };

    debug!(chat_id, "telegram message received");
    let event = InboundEvent::text(chat_id, text);
    state.responder.handle(&event, state.gateway.as_ref()).await;
    Ok(())
}

/// Handle an inline keyboard press.
async fn handle_callback(bot: Bot, query: CallbackQuery, state: SharedState) -> ResponseResult<()> {
    // Stop the client-side spinner first; a failure here is cosmetic.
    if let Err(e) = bot.answer_callback_query(&query.id).await {
        warn!(error = %e, "failed to answer callback query");
    }

    let chat_id = match query.message {
        Some(ref message) => message.chat().id.0,
        None => match i64::try_from(query.from.id.0) {
            Ok(id) => id,
            Err(_) => return Ok(()),
        },
    };

    let Some(data) = query.data else {
        return Ok(());
    };

    debug!(chat_id, data = %data, "telegram callback received");
    let event = InboundEvent::choice(chat_id, data);
    state.responder.handle(&event, state.gateway.as_ref()).await;
    Ok(())
}
