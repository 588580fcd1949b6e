//! Per-user navigation state and history.

use chrono::{DateTime, Utc};

use super::token::CallbackToken;
use crate::catalog::{Category, Language};

/// Screen the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvState {
    /// Language picker shown, nothing chosen yet.
    AwaitingLanguage,
    /// Main menu, also the resting state after search results.
    MainMenu,
    /// Topic list.
    TopicList,
    /// Question list of one category.
    CategoryQuestionList(Category),
    /// One answer, by record id.
    AnswerShown(String),
}

impl ConvState {
    /// Token that navigates back to this state, if it can be a back target.
    pub fn back_token(&self) -> Option<CallbackToken> {
        match self {
            Self::MainMenu => Some(CallbackToken::Menu),
            Self::TopicList => Some(CallbackToken::Topics),
            Self::CategoryQuestionList(category) => Some(CallbackToken::Category(*category)),
            Self::AwaitingLanguage | Self::AnswerShown(_) => None,
        }
    }

    /// Distance from the main menu. Back targets are always shallower than
    /// the screen they leave.
    pub fn depth(&self) -> u8 {
        match self {
            Self::AwaitingLanguage | Self::MainMenu => 0,
            Self::TopicList => 1,
            Self::CategoryQuestionList(_) => 2,
            Self::AnswerShown(_) => 3,
        }
    }
}

/// Volatile per-user conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    /// Selected language.
    pub language: Language,
    /// Current navigation state.
    pub state: ConvState,
    /// Previously visited states, most recent last.
    pub history: Vec<ConvState>,
    /// When the user first interacted in this process.
    pub first_seen: DateTime<Utc>,
}

impl UserSession {
    /// Fresh session: default language, awaiting a language choice.
    pub fn new() -> Self {
        Self {
            language: Language::default(),
            state: ConvState::AwaitingLanguage,
            history: Vec::new(),
            first_seen: Utc::now(),
        }
    }

    /// Move to `next`, maintaining the bounded history.
    ///
    /// Entering the main menu or the language picker resets history. Revisiting
    /// a state already on the stack unwinds back to it.
    pub fn navigate(&mut self, next: ConvState, max_depth: usize) {
        if next == self.state {
            return;
        }
        match next {
            ConvState::MainMenu | ConvState::AwaitingLanguage => self.history.clear(),
            _ => {
                if let Some(pos) = self.history.iter().position(|s| *s == next) {
                    self.history.truncate(pos);
                } else {
                    let previous = std::mem::replace(&mut self.state, ConvState::MainMenu);
                    self.history.push(previous);
                    let excess = self.history.len().saturating_sub(max_depth.max(1));
                    self.history.drain(..excess);
                }
            }
        }
        self.state = next;
    }

    /// Back target for the current screen: the most recent history entry that
    /// can be navigated to and sits above the current screen, or `fallback`
    /// when there is none.
    pub fn back_token(&self, fallback: CallbackToken) -> CallbackToken {
        let depth = self.state.depth();
        self.history
            .iter()
            .rev()
            .filter(|s| s.depth() < depth)
            .find_map(ConvState::back_token)
            .unwrap_or(fallback)
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}
