//! Turns a screen decided by the state machine into an outbound message.
//!
//! The output is transport-neutral: text plus optional rows of choices, each
//! carrying a callback token the gateway round-trips unmodified.

pub mod strings;

use serde::Serialize;

use self::strings::{category_label, text, Slot};
use crate::catalog::{Category, FaqRecord, Language};
use crate::conversation::token::CallbackToken;

/// Default maximum length of question labels in category lists.
pub const DEFAULT_LABEL_MAX_CHARS: usize = 30;

/// One button of a choice menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Button label.
    pub label: String,
    /// Callback token sent back when the button is pressed.
    pub token: String,
}

impl Choice {
    /// Build a choice from a label and token.
    pub fn new(label: impl Into<String>, token: &CallbackToken) -> Self {
        Self {
            label: label.into(),
            token: token.to_string(),
        }
    }
}

/// Message handed to a messaging gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Plain message text.
    pub text: String,
    /// Choice rows, if the message carries a menu.
    pub choices: Option<Vec<Vec<Choice>>>,
}

impl OutboundMessage {
    /// Every choice in row order.
    pub fn all_choices(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter().flatten().flatten()
    }
}

/// What to show the user, decided by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Language picker.
    LanguagePicker,
    /// Main menu.
    MainMenu,
    /// Free-text instructions.
    AskPrompt,
    /// Topic list.
    Topics {
        /// Back target.
        back: CallbackToken,
    },
    /// Questions of a category, labels truncated.
    CategoryQuestions {
        /// Selected category.
        category: Category,
        /// Records in catalog order.
        questions: Vec<FaqRecord>,
        /// Back target.
        back: CallbackToken,
    },
    /// The category has no questions in the user's language.
    NoQuestions {
        /// Selected category.
        category: Category,
    },
    /// A single answer.
    Answer {
        /// Record being answered.
        record: FaqRecord,
        /// Back target.
        back: CallbackToken,
    },
    /// Several search matches, labels never truncated.
    Suggestions {
        /// Candidate records in catalog order.
        candidates: Vec<FaqRecord>,
    },
    /// Search found nothing.
    Clarify,
    /// Stale or unknown selection.
    NotFound,
}

/// Stateless renderer with display settings.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    label_max_chars: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_MAX_CHARS)
    }
}

impl Renderer {
    /// Create a renderer truncating category question labels at `label_max_chars`.
    pub fn new(label_max_chars: usize) -> Self {
        Self { label_max_chars }
    }

    /// Render a screen in the given language.
    pub fn render(&self, screen: &Screen, language: Language) -> OutboundMessage {
        match screen {
            Screen::LanguagePicker => OutboundMessage {
                text: text(Slot::LanguagePrompt, language).to_owned(),
                choices: Some(vec![vec![
                    Choice::new(
                        "\u{1F1F7}\u{1F1FA} Русский",
                        &CallbackToken::SelectLanguage(Language::Ru),
                    ),
                    Choice::new(
                        "\u{1F1EC}\u{1F1E7} English",
                        &CallbackToken::SelectLanguage(Language::En),
                    ),
                ]]),
            },

            Screen::MainMenu => OutboundMessage {
                text: text(Slot::MainMenuTitle, language).to_owned(),
                choices: Some(vec![vec![
                    Choice::new(text(Slot::TopicsButton, language), &CallbackToken::Topics),
                    Choice::new(text(Slot::AskButton, language), &CallbackToken::Ask),
                ]]),
            },

            Screen::AskPrompt => with_menu(text(Slot::AskPrompt, language), language),

            Screen::Topics { back } => {
                let mut rows: Vec<Vec<Choice>> = Category::ALL
                    .into_iter()
                    .map(|c| {
                        vec![Choice::new(
                            category_label(c, language),
                            &CallbackToken::Category(c),
                        )]
                    })
                    .collect();
                rows.push(vec![Choice::new(text(Slot::Back, language), back)]);
                OutboundMessage {
                    text: text(Slot::TopicsTitle, language).to_owned(),
                    choices: Some(rows),
                }
            }

            Screen::CategoryQuestions {
                category,
                questions,
                back,
            } => {
                let mut rows: Vec<Vec<Choice>> = questions
                    .iter()
                    .map(|r| {
                        vec![Choice::new(
                            truncate_label(&r.question, self.label_max_chars),
                            &CallbackToken::Faq(r.id.clone()),
                        )]
                    })
                    .collect();
                rows.push(vec![Choice::new(text(Slot::Back, language), back)]);
                OutboundMessage {
                    text: format!(
                        "{} {}",
                        text(Slot::QuestionsOn, language),
                        category_label(*category, language)
                    ),
                    choices: Some(rows),
                }
            }

            Screen::NoQuestions { .. } => with_menu(text(Slot::NoQuestions, language), language),

            Screen::Answer { record, back } => {
                let label = match back {
                    CallbackToken::Menu => text(Slot::BackToMenu, language),
                    _ => text(Slot::Back, language),
                };
                OutboundMessage {
                    text: record.answer.clone(),
                    choices: Some(vec![vec![Choice::new(label, back)]]),
                }
            }

            Screen::Suggestions { candidates } => {
                let mut rows: Vec<Vec<Choice>> = candidates
                    .iter()
                    .map(|r| vec![Choice::new(r.question.clone(), &CallbackToken::Faq(r.id.clone()))])
                    .collect();
                rows.push(vec![Choice::new(
                    text(Slot::BackToMenu, language),
                    &CallbackToken::Menu,
                )]);
                OutboundMessage {
                    text: text(Slot::Suggestions, language).to_owned(),
                    choices: Some(rows),
                }
            }

            Screen::Clarify => with_menu(text(Slot::Clarify, language), language),

            Screen::NotFound => with_menu(text(Slot::NotFound, language), language),
        }
    }
}

fn with_menu(message: &str, language: Language) -> OutboundMessage {
    OutboundMessage {
        text: message.to_owned(),
        choices: Some(vec![vec![Choice::new(
            text(Slot::Menu, language),
            &CallbackToken::Menu,
        )]]),
    }
}

/// Cut `label` to `max_chars` characters, appending `...` when shortened.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let truncated: String = label.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        label.to_owned()
    }
}
