//! User-facing strings in Russian and English.
//!
//! Slots without a Russian translation fall back to English.

use crate::catalog::{Category, Language};

/// A translatable piece of UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Title of the language picker (bilingual on purpose).
    LanguagePrompt,
    /// Main menu title.
    MainMenuTitle,
    /// Main menu "topics" button.
    TopicsButton,
    /// Main menu "ask a question" button.
    AskButton,
    /// Instruction shown after pressing the ask button.
    AskPrompt,
    /// Topic list title.
    TopicsTitle,
    /// Prefix of a category question list title.
    QuestionsOn,
    /// Shown when a category has no questions in the user's language.
    NoQuestions,
    /// Title of the "did you mean" list.
    Suggestions,
    /// Shown when free text matches nothing.
    Clarify,
    /// Shown for stale or unknown selections.
    NotFound,
    /// Generic back button.
    Back,
    /// Back button under an answer.
    BackToMenu,
    /// Button that opens the main menu.
    Menu,
}

/// Look up a slot, falling back to English for missing translations.
pub fn text(slot: Slot, language: Language) -> &'static str {
    match language {
        Language::Ru => ru(slot).unwrap_or_else(|| en(slot)),
        Language::En => en(slot),
    }
}

fn en(slot: Slot) -> &'static str {
    match slot {
        Slot::LanguagePrompt => "Benvenuto! Please select your language / Выберите язык:",
        Slot::MainMenuTitle => "Main Menu:",
        Slot::TopicsButton => "\u{1F4DA} Topics",
        Slot::AskButton => "\u{2753} Ask Question",
        Slot::AskPrompt => "Just type your question and I will look for an answer.",
        Slot::TopicsTitle => "Select a topic:",
        Slot::QuestionsOn => "Questions on",
        Slot::NoQuestions => "No questions in this category.",
        Slot::Suggestions => "Maybe you meant:",
        Slot::Clarify => "Please clarify your question or select a topic from the menu.",
        Slot::NotFound => "This item is no longer available.",
        Slot::Back => "\u{1F519} Back",
        Slot::BackToMenu => "\u{1F519} Back to Menu",
        Slot::Menu => "Menu",
    }
}

fn ru(slot: Slot) -> Option<&'static str> {
    let text = match slot {
        // The picker title is already bilingual.
        Slot::LanguagePrompt => return None,
        Slot::MainMenuTitle => "Главное меню:",
        Slot::TopicsButton => "\u{1F4DA} Темы",
        Slot::AskButton => "\u{2753} Задать вопрос",
        Slot::AskPrompt => "Просто напишите свой вопрос, и я поищу ответ.",
        Slot::TopicsTitle => "Выберите тему:",
        Slot::QuestionsOn => "Вопросы по теме",
        Slot::NoQuestions => "Нет вопросов в этой категории.",
        Slot::Suggestions => "Возможно, вы имели в виду:",
        Slot::Clarify => "Пожалуйста, уточните вопрос или выберите тему из меню.",
        Slot::NotFound => "Этот пункт больше недоступен.",
        Slot::Back => "\u{1F519} Назад",
        Slot::BackToMenu => "\u{1F519} Вернуться в меню",
        Slot::Menu => "Меню",
    };
    Some(text)
}

/// Display label of a category on the topic menu.
pub fn category_label(category: Category, language: Language) -> &'static str {
    match (category, language) {
        (Category::Admission, Language::Ru) => "Поступление",
        (Category::Admission, Language::En) => "Admission",
        (Category::Visa, Language::Ru) => "Виза",
        (Category::Visa, Language::En) => "Visa",
        (Category::Housing, Language::Ru) => "Жильё",
        (Category::Housing, Language::En) => "Housing",
        (Category::University, Language::Ru) => "Учёба",
        (Category::University, Language::En) => "University",
        (Category::Scholarship, Language::Ru) => "Стипендии",
        (Category::Scholarship, Language::En) => "Scholarships",
        (Category::Documents, Language::Ru) => "Документы",
        (Category::Documents, Language::En) => "Documents",
        (Category::Life, Language::Ru) => "Жизнь в Италии",
        (Category::Life, Language::En) => "Life in Italy",
    }
}
