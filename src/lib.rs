//! faqbot, a bilingual FAQ bot for international students.
//!
//! Users pick a language, browse topics, or type a question; the bot answers
//! from a catalog of per-language FAQ records. Talks to users via Telegram or a
//! local console.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod catalog;
pub mod search;

pub mod conversation;
pub mod render;
pub mod responder;

pub mod console;
pub mod gateway;
pub mod telegram;
