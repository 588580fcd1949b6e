//! Tests for `src/conversation/mod.rs`: pure state transitions.

use std::sync::Arc;

use faqbot::catalog::{Catalog, Category, FaqRecord, Language};
use faqbot::conversation::state::{ConvState, UserSession};
use faqbot::conversation::token::CallbackToken;
use faqbot::conversation::{Event, InboundEvent, StateMachine};
use faqbot::render::Screen;
use faqbot::search::{KeywordMatch, SearchEngine};

fn record(
    id: &str,
    category: Category,
    language: Language,
    question: &str,
    keywords: &[&str],
) -> FaqRecord {
    FaqRecord {
        id: id.to_owned(),
        category,
        language,
        question: question.to_owned(),
        answer: format!("answer {id}"),
        keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
    }
}

fn machine() -> StateMachine {
    let catalog = Catalog::new(vec![
        record(
            "v-ru",
            Category::Visa,
            Language::Ru,
            "Какая виза нужна для учёбы?",
            &["виза", "visa"],
        ),
        record(
            "v-en",
            Category::Visa,
            Language::En,
            "Which visa do I need?",
            &["visa"],
        ),
        record(
            "p-en",
            Category::Visa,
            Language::En,
            "How do I get a residence permit?",
            &["permit"],
        ),
        record(
            "h-en",
            Category::Housing,
            Language::En,
            "How do I find a room?",
            &["room"],
        ),
        record("l-ru", Category::Life, Language::Ru, "Сколько стоит жизнь?", &[]),
    ]);
    let search = SearchEngine::new(Arc::new(catalog), KeywordMatch::Substring);
    StateMachine::new(search, 8)
}

fn english_at_menu() -> UserSession {
    let mut session = UserSession::new();
    session.language = Language::En;
    session.state = ConvState::MainMenu;
    session
}

fn choice(token: CallbackToken) -> Event {
    Event::Choice(token)
}

#[test]
fn start_shows_language_picker_and_resets_history() {
    let machine = machine();
    let mut session = english_at_menu();
    session.state = ConvState::CategoryQuestionList(Category::Visa);
    session.history = vec![ConvState::MainMenu, ConvState::TopicList];

    let t = machine.transition(&session, &Event::Start);

    assert_eq!(t.screen, Screen::LanguagePicker);
    assert_eq!(t.session.state, ConvState::AwaitingLanguage);
    assert!(t.session.history.is_empty());
    assert_eq!(t.session.language, Language::En, "language survives /start");
}

#[test]
fn selecting_a_language_opens_the_main_menu() {
    let machine = machine();
    let t = machine.transition(
        &UserSession::new(),
        &choice(CallbackToken::SelectLanguage(Language::En)),
    );

    assert_eq!(t.screen, Screen::MainMenu);
    assert_eq!(t.session.language, Language::En);
    assert_eq!(t.session.state, ConvState::MainMenu);
    assert!(t.session.history.is_empty());
}

#[test]
fn language_can_be_switched_mid_flow() {
    let machine = machine();
    let mut session = english_at_menu();
    session.state = ConvState::TopicList;
    session.history = vec![ConvState::MainMenu];

    let t = machine.transition(&session, &choice(CallbackToken::SelectLanguage(Language::Ru)));

    assert_eq!(t.session.language, Language::Ru);
    assert_eq!(t.session.state, ConvState::MainMenu);
    assert!(t.session.history.is_empty());
}

#[test]
fn topics_from_menu_backs_to_menu_and_replays_identically() {
    let machine = machine();
    let before = english_at_menu();
    let event = choice(CallbackToken::Topics);

    let first = machine.transition(&before, &event);
    let second = machine.transition(&before.clone(), &event);

    assert_eq!(
        first.screen,
        Screen::Topics {
            back: CallbackToken::Menu
        }
    );
    assert_eq!(first.session.state, ConvState::TopicList);
    assert_eq!(first, second);
    assert_eq!(before.state, ConvState::MainMenu, "input is not mutated");
}

#[test]
fn category_lists_questions_in_the_user_language() {
    let machine = machine();
    let topics = machine
        .transition(&english_at_menu(), &choice(CallbackToken::Topics))
        .session;

    let t = machine.transition(&topics, &choice(CallbackToken::Category(Category::Visa)));

    let Screen::CategoryQuestions {
        category,
        questions,
        back,
    } = t.screen
    else {
        panic!("expected a question list, got {:?}", t.screen);
    };
    assert_eq!(category, Category::Visa);
    assert_eq!(back, CallbackToken::Topics);
    let ids: Vec<&str> = questions.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["v-en", "p-en"]);
    assert_eq!(t.session.state, ConvState::CategoryQuestionList(Category::Visa));
}

#[test]
fn answer_from_a_category_backs_to_that_category() {
    let machine = machine();
    let mut session = english_at_menu();
    for token in [
        CallbackToken::Topics,
        CallbackToken::Category(Category::Visa),
    ] {
        session = machine.transition(&session, &choice(token)).session;
    }

    let t = machine.transition(&session, &choice(CallbackToken::Faq("p-en".to_owned())));

    let Screen::Answer { record, back } = t.screen else {
        panic!("expected an answer, got {:?}", t.screen);
    };
    assert_eq!(record.id, "p-en");
    assert_eq!(back, CallbackToken::Category(Category::Visa));
    assert_eq!(t.session.state, ConvState::AnswerShown("p-en".to_owned()));
}

#[test]
fn empty_category_returns_to_menu_with_notice() {
    let machine = machine();
    // LIFE only has a Russian record.
    let t = machine.transition(
        &english_at_menu(),
        &choice(CallbackToken::Category(Category::Life)),
    );

    assert_eq!(
        t.screen,
        Screen::NoQuestions {
            category: Category::Life
        }
    );
    assert_eq!(t.session.state, ConvState::MainMenu);
}

#[test]
fn stale_faq_reference_leaves_session_unchanged() {
    let machine = machine();
    let mut session = english_at_menu();
    session.state = ConvState::CategoryQuestionList(Category::Visa);
    session.history = vec![ConvState::MainMenu, ConvState::TopicList];

    let t = machine.transition(&session, &choice(CallbackToken::Faq("gone".to_owned())));

    assert_eq!(t.screen, Screen::NotFound);
    assert_eq!(t.session, session);
}

#[test]
fn unparseable_choice_is_not_found() {
    let machine = machine();
    let session = english_at_menu();
    let event = Event::from(&InboundEvent::choice(1, "BOGUS"));

    assert_eq!(event, Event::InvalidChoice("BOGUS".to_owned()));
    let t = machine.transition(&session, &event);
    assert_eq!(t.screen, Screen::NotFound);
    assert_eq!(t.session, session);
}

#[test]
fn new_user_text_without_match_is_clarified_in_russian() {
    let machine = machine();
    let t = machine.transition(&UserSession::new(), &Event::Text("абракадабра".to_owned()));

    assert_eq!(t.screen, Screen::Clarify);
    assert_eq!(t.session.language, Language::Ru);
    assert_eq!(t.session.state, ConvState::MainMenu);
}

#[test]
fn blank_text_asks_for_clarification() {
    let machine = machine();
    let t = machine.transition(&english_at_menu(), &Event::Text("   ".to_owned()));
    assert_eq!(t.screen, Screen::Clarify);
}

#[test]
fn single_match_shows_answer_with_menu_back() {
    let machine = machine();
    let mut session = english_at_menu();
    session.state = ConvState::CategoryQuestionList(Category::Housing);
    session.history = vec![ConvState::MainMenu, ConvState::TopicList];

    let t = machine.transition(&session, &Event::Text("  VISA ".to_owned()));

    let Screen::Answer { record, back } = t.screen else {
        panic!("expected an answer, got {:?}", t.screen);
    };
    assert_eq!(record.id, "v-en");
    assert_eq!(back, CallbackToken::Menu);
    assert_eq!(t.session.state, ConvState::AnswerShown("v-en".to_owned()));
    assert_eq!(t.session.history, vec![ConvState::MainMenu]);
}

#[test]
fn several_matches_offer_suggestions() {
    let machine = machine();
    let t = machine.transition(&english_at_menu(), &Event::Text("how do i".to_owned()));

    let Screen::Suggestions { candidates } = t.screen else {
        panic!("expected suggestions, got {:?}", t.screen);
    };
    let ids: Vec<&str> = candidates.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p-en", "h-en"]);
    assert_eq!(t.session.state, ConvState::MainMenu);
}

#[test]
fn ask_shows_prompt_at_main_menu() {
    let machine = machine();
    let mut session = english_at_menu();
    session.state = ConvState::TopicList;
    session.history = vec![ConvState::MainMenu];

    let t = machine.transition(&session, &choice(CallbackToken::Ask));

    assert_eq!(t.screen, Screen::AskPrompt);
    assert_eq!(t.session.state, ConvState::MainMenu);
    assert!(t.session.history.is_empty());
}

#[test]
fn text_commands_map_to_events() {
    let parse = |text: &str| Event::from(&InboundEvent::text(7, text));

    assert_eq!(parse("/start"), Event::Start);
    assert_eq!(parse("/start@faq_bot"), Event::Start);
    assert_eq!(parse("/menu"), Event::Choice(CallbackToken::Menu));
    assert_eq!(parse("/topics"), Event::Choice(CallbackToken::Topics));
    assert_eq!(parse("/help"), Event::Choice(CallbackToken::Ask));
    assert_eq!(parse("/weather"), Event::Text("/weather".to_owned()));
    assert_eq!(parse("visa"), Event::Text("visa".to_owned()));
}

#[test]
fn choice_payloads_parse_into_tokens() {
    let event = Event::from(&InboundEvent::choice(7, "CAT:VISA"));
    assert_eq!(event, Event::Choice(CallbackToken::Category(Category::Visa)));

    let event = Event::from(&InboundEvent::choice(7, "LANG:xx"));
    assert_eq!(event, Event::InvalidChoice("LANG:xx".to_owned()));
}

#[test]
fn topics_reached_from_an_old_category_button_backs_to_menu() {
    let machine = machine();
    let session = machine.transition(&english_at_menu(), &Event::Start).session;

    // An old CAT:VISA button pressed right after /start.
    let t = machine.transition(&session, &choice(CallbackToken::Category(Category::Visa)));
    let Screen::CategoryQuestions { back, .. } = t.screen else {
        panic!("expected a question list, got {:?}", t.screen);
    };
    assert_eq!(back, CallbackToken::Topics);

    let t = machine.transition(&t.session, &choice(back));
    let Screen::Topics { back } = t.screen else {
        panic!("expected topics, got {:?}", t.screen);
    };
    assert_eq!(back, CallbackToken::Menu);

    let t = machine.transition(&t.session, &choice(back));
    assert_eq!(t.screen, Screen::MainMenu);
    assert_eq!(t.session.state, ConvState::MainMenu);
    assert!(t.session.history.is_empty());
}

#[test]
fn back_targets_are_always_shallower_than_the_screen() {
    let machine = machine();
    let mut session = english_at_menu();
    let walk = [
        CallbackToken::Category(Category::Visa),
        CallbackToken::Topics,
        CallbackToken::Category(Category::Housing),
        CallbackToken::Faq("h-en".to_owned()),
        CallbackToken::Topics,
        CallbackToken::Category(Category::Visa),
        CallbackToken::Faq("v-en".to_owned()),
    ];
    for token in walk {
        let t = machine.transition(&session, &choice(token));
        let back = match &t.screen {
            Screen::Topics { back }
            | Screen::CategoryQuestions { back, .. }
            | Screen::Answer { back, .. } => back.clone(),
            other => panic!("unexpected screen {other:?}"),
        };
        let target_depth = match back {
            CallbackToken::Menu => 0,
            CallbackToken::Topics => 1,
            CallbackToken::Category(_) => 2,
            other => panic!("unexpected back target {other:?}"),
        };
        assert!(
            target_depth < t.session.state.depth(),
            "back {back:?} from {:?} does not lead upward",
            t.session.state
        );
        session = t.session;
    }
}
