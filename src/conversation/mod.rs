//! Conversation state machine.
//!
//! [`StateMachine::transition`] is pure: it takes a session snapshot and one
//! event and returns the next session plus the [`Screen`] to render. Locking
//! and delivery live in [`crate::responder`].

pub mod session;
pub mod state;
pub mod token;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::state::{ConvState, UserSession};
use self::token::CallbackToken;
use crate::catalog::Category;
use crate::render::Screen;
use crate::search::SearchEngine;

/// Default number of history entries kept per user.
pub const DEFAULT_HISTORY_DEPTH: usize = 8;

/// Kind of inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Typed message.
    Text,
    /// Pressed menu choice; payload is a callback token.
    Choice,
}

/// Event as delivered by a messaging gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Stable user identifier.
    pub user_id: i64,
    /// Payload kind.
    pub kind: EventKind,
    /// Message text or callback token.
    pub payload: String,
}

impl InboundEvent {
    /// Typed text from a user.
    pub fn text(user_id: i64, payload: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Text,
            payload: payload.into(),
        }
    }

    /// Menu choice from a user.
    pub fn choice(user_id: i64, payload: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Choice,
            payload: payload.into(),
        }
    }
}

/// Interpreted event driving one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start`: show the language picker.
    Start,
    /// Free text to search for.
    Text(String),
    /// A valid menu choice.
    Choice(CallbackToken),
    /// A choice payload that could not be parsed.
    InvalidChoice(String),
}

impl From<&InboundEvent> for Event {
    fn from(inbound: &InboundEvent) -> Self {
        match inbound.kind {
            EventKind::Choice => match inbound.payload.parse() {
                Ok(token) => Self::Choice(token),
                Err(err) => {
                    debug!(error = %err, "unparseable callback payload");
                    Self::InvalidChoice(inbound.payload.clone())
                }
            },
            EventKind::Text => parse_text(&inbound.payload),
        }
    }
}

fn parse_text(text: &str) -> Event {
    let trimmed = text.trim();
    let Some(without_slash) = trimmed.strip_prefix('/') else {
        return Event::Text(text.to_owned());
    };
    let full_command = without_slash
        .split_whitespace()
        .next()
        .unwrap_or(without_slash);
    // Strip @bot_name suffix if present
    let command = full_command.split('@').next().unwrap_or(full_command);
    match command {
        "start" => Event::Start,
        "menu" => Event::Choice(CallbackToken::Menu),
        "topics" => Event::Choice(CallbackToken::Topics),
        "help" => Event::Choice(CallbackToken::Ask),
        _ => Event::Text(text.to_owned()),
    }
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Session state to commit.
    pub session: UserSession,
    /// Screen to render.
    pub screen: Screen,
}

/// Decides the next state and screen for each event.
#[derive(Debug, Clone)]
pub struct StateMachine {
    search: SearchEngine,
    history_depth: usize,
}

impl StateMachine {
    /// Create a state machine over a search engine (and its catalog).
    pub fn new(search: SearchEngine, history_depth: usize) -> Self {
        Self {
            search,
            history_depth: history_depth.max(1),
        }
    }

    /// Apply `event` to a snapshot of `session`.
    pub fn transition(&self, session: &UserSession, event: &Event) -> Transition {
        let mut next = session.clone();
        let screen = match event {
            Event::Start => {
                next.navigate(ConvState::AwaitingLanguage, self.history_depth);
                Screen::LanguagePicker
            }
            Event::Text(text) => self.on_text(&mut next, text),
            Event::Choice(token) => self.on_choice(&mut next, token),
            Event::InvalidChoice(payload) => {
                debug!(payload, "ignoring unknown selection");
                Screen::NotFound
            }
        };
        Transition {
            session: next,
            screen,
        }
    }

    fn on_choice(&self, session: &mut UserSession, token: &CallbackToken) -> Screen {
        match token {
            CallbackToken::SelectLanguage(language) => {
                session.language = *language;
                session.navigate(ConvState::MainMenu, self.history_depth);
                Screen::MainMenu
            }
            CallbackToken::Menu => {
                session.navigate(ConvState::MainMenu, self.history_depth);
                Screen::MainMenu
            }
            CallbackToken::Ask => {
                session.navigate(ConvState::MainMenu, self.history_depth);
                Screen::AskPrompt
            }
            CallbackToken::Topics => {
                session.navigate(ConvState::TopicList, self.history_depth);
                Screen::Topics {
                    back: session.back_token(CallbackToken::Menu),
                }
            }
            CallbackToken::Category(category) => self.on_category(session, *category),
            CallbackToken::Faq(id) => {
                let Some(record) = self.search.catalog().find_by_id(id) else {
                    debug!(id = %id, "stale faq reference");
                    return Screen::NotFound;
                };
                session.navigate(ConvState::AnswerShown(record.id.clone()), self.history_depth);
                Screen::Answer {
                    record: record.clone(),
                    back: session.back_token(CallbackToken::Menu),
                }
            }
        }
    }

    fn on_category(&self, session: &mut UserSession, category: Category) -> Screen {
        let questions: Vec<_> = self
            .search
            .catalog()
            .find_by_category_and_language(category, session.language)
            .into_iter()
            .cloned()
            .collect();

        if questions.is_empty() {
            session.navigate(ConvState::MainMenu, self.history_depth);
            return Screen::NoQuestions { category };
        }

        session.navigate(ConvState::CategoryQuestionList(category), self.history_depth);
        Screen::CategoryQuestions {
            category,
            questions,
            back: session.back_token(CallbackToken::Topics),
        }
    }

    fn on_text(&self, session: &mut UserSession, text: &str) -> Screen {
        let query = text.trim();
        if query.is_empty() {
            session.navigate(ConvState::MainMenu, self.history_depth);
            return Screen::Clarify;
        }

        let mut matches = self.search.search(query, session.language);
        debug!(
            language = session.language.code(),
            matches = matches.len(),
            "free-text search"
        );

        match matches.len() {
            0 => {
                session.navigate(ConvState::MainMenu, self.history_depth);
                Screen::Clarify
            }
            1 => {
                let record = matches.remove(0).clone();
                // Free-text answers always return to the main menu.
                session.navigate(ConvState::MainMenu, self.history_depth);
                session.navigate(ConvState::AnswerShown(record.id.clone()), self.history_depth);
                Screen::Answer {
                    record,
                    back: CallbackToken::Menu,
                }
            }
            _ => {
                session.navigate(ConvState::MainMenu, self.history_depth);
                Screen::Suggestions {
                    candidates: matches.into_iter().cloned().collect(),
                }
            }
        }
    }
}
