//! HTML formatting and inline keyboard helpers for Telegram messages.
//!
//! All output uses HTML parse mode (never MarkdownV2).

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;

use crate::render::Choice;

/// Telegram's limit on callback data size.
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Escape special HTML characters in catalog or user-provided text.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build an inline keyboard from choice rows.
///
/// Choices whose token exceeds Telegram's callback data limit are dropped,
/// and rows left empty are removed.
pub fn inline_keyboard(rows: &[Vec<Choice>]) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .filter(|choice| {
                    let fits = choice.token.len() <= MAX_CALLBACK_DATA_BYTES;
                    if !fits {
                        warn!(token = %choice.token, "callback token too long, dropping button");
                    }
                    fits
                })
                .map(|choice| {
                    InlineKeyboardButton::callback(choice.label.clone(), choice.token.clone())
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    InlineKeyboardMarkup::new(keyboard)
}
