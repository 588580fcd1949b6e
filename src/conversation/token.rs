//! Callback tokens carried by menu choices.
//!
//! Wire forms: `LANG:<code>`, `MENU`, `TOPICS`, `ASK`, `CAT:<category>`,
//! `FAQ:<id>`. Only the first `:` splits, and ids never contain one.

use std::fmt;
use std::str::FromStr;

use crate::catalog::{Category, Language};

/// A parsed menu choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    /// Pick the conversation language.
    SelectLanguage(Language),
    /// Go to the main menu.
    Menu,
    /// List topics.
    Topics,
    /// Explain how to ask a free-text question.
    Ask,
    /// List the questions of a category.
    Category(Category),
    /// Show one FAQ answer by record id.
    Faq(String),
}

/// Why a callback payload could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The prefix is not a known token kind.
    #[error("unknown callback token {0:?}")]
    Unknown(String),
    /// `LANG:` names an unsupported language.
    #[error("unsupported language {0:?}")]
    UnknownLanguage(String),
    /// `CAT:` names a category that does not exist.
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    /// `FAQ:` without an id, or with an id containing `:`.
    #[error("invalid faq id {0:?}")]
    InvalidFaqId(String),
}

impl FromStr for CallbackToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            None => match s {
                "MENU" => Ok(Self::Menu),
                "TOPICS" => Ok(Self::Topics),
                "ASK" => Ok(Self::Ask),
                _ => Err(TokenError::Unknown(s.to_owned())),
            },
            Some(("LANG", code)) => Language::from_code(code)
                .map(Self::SelectLanguage)
                .ok_or_else(|| TokenError::UnknownLanguage(code.to_owned())),
            Some(("CAT", name)) => Category::parse(name)
                .map(Self::Category)
                .map_err(|_| TokenError::UnknownCategory(name.to_owned())),
            Some(("FAQ", id)) => {
                if id.is_empty() || id.contains(':') {
                    Err(TokenError::InvalidFaqId(id.to_owned()))
                } else {
                    Ok(Self::Faq(id.to_owned()))
                }
            }
            Some(_) => Err(TokenError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectLanguage(lang) => write!(f, "LANG:{}", lang.code()),
            Self::Menu => f.write_str("MENU"),
            Self::Topics => f.write_str("TOPICS"),
            Self::Ask => f.write_str("ASK"),
            Self::Category(category) => write!(f, "CAT:{}", category.as_str()),
            Self::Faq(id) => write!(f, "FAQ:{id}"),
        }
    }
}
