//! Classification of inbound text and callback payloads into typed actions.
//!
//! Classification is independent of dialogue state: a label is recognized
//! no matter which menu the user is in, and the handlers decide what it
//! means there. Submenu info buttons only act when the current menu
//! matches; top-level triggers act from anywhere. Ordering below mirrors
//! which label set wins when a string appears in more than one (the
//! programs and general-info labels also occur in the bachelor set).

use crate::db::Category;
use crate::keyboards;
use crate::state::{Language, MenuState};

/// Bot commands recognized as plain text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    ViewFeedback,
    WhoAmI,
}

/// A degree-level submenu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submenu {
    Bachelor,
    Master,
    Doctoral,
}

impl Submenu {
    pub fn category(self) -> Category {
        match self {
            Submenu::Bachelor => Category::Bachelor,
            Submenu::Master => Category::Master,
            Submenu::Doctoral => Category::Doctoral,
        }
    }

    pub fn state(self) -> MenuState {
        match self {
            Submenu::Bachelor => MenuState::BachelorMenu,
            Submenu::Master => MenuState::MasterMenu,
            Submenu::Doctoral => MenuState::DoctoralMenu,
        }
    }
}

/// What an inbound text message means, before state is consulted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    SelectLanguage(Language),
    OpenSubmenu(Submenu),
    OpenPrograms,
    /// Search/feedback/FAQ entry buttons re-pin the session language from
    /// which language's label was pressed.
    StartSearch(Language),
    StartFeedback(Language),
    ShowFaq(Language),
    ShowLocation,
    ChangeLanguage,
    /// A main-menu info button resolved against the `general` category.
    GeneralInfo(String),
    /// A submenu info button; only acts when the session is in that menu.
    SubmenuInfo { menu: Submenu, label: String },
    Back,
    Cancel,
    /// Free text: a search keyword, feedback body or faculty name
    /// depending on the current state.
    Free(String),
}

/// Classify one inbound text message.
pub fn classify(text: &str) -> Action {
    let text = text.trim();

    match text {
        "/start" => return Action::Command(Command::Start),
        "/view_feedback" => return Action::Command(Command::ViewFeedback),
        "/whoami" => return Action::Command(Command::WhoAmI),
        keyboards::PROGRAMS_RU | keyboards::PROGRAMS_KK => return Action::OpenPrograms,
        keyboards::FEEDBACK_RU => return Action::StartFeedback(Language::Ru),
        keyboards::FEEDBACK_KK => return Action::StartFeedback(Language::Kk),
        keyboards::FAQ_RU => return Action::ShowFaq(Language::Ru),
        keyboards::FAQ_KK => return Action::ShowFaq(Language::Kk),
        keyboards::LANGUAGE_RU => return Action::SelectLanguage(Language::Ru),
        keyboards::LANGUAGE_KK => return Action::SelectLanguage(Language::Kk),
        keyboards::BACHELOR => return Action::OpenSubmenu(Submenu::Bachelor),
        keyboards::MASTER => return Action::OpenSubmenu(Submenu::Master),
        keyboards::DOCTORAL => return Action::OpenSubmenu(Submenu::Doctoral),
        keyboards::SEARCH_RU => return Action::StartSearch(Language::Ru),
        keyboards::SEARCH_KK => return Action::StartSearch(Language::Kk),
        keyboards::CHANGE_LANGUAGE_RU | keyboards::CHANGE_LANGUAGE_KK => {
            return Action::ChangeLanguage
        }
        keyboards::BACK_RU | keyboards::BACK_KK => return Action::Back,
        keyboards::CANCEL_RU | keyboards::CANCEL_KK => return Action::Cancel,
        keyboards::LOCATION_RU | keyboards::LOCATION_KK => return Action::ShowLocation,
        _ => {}
    }

    if keyboards::GENERAL_BUTTONS.contains(&text) {
        return Action::GeneralInfo(text.to_string());
    }
    if keyboards::MASTER_BUTTONS.contains(&text) {
        return Action::SubmenuInfo {
            menu: Submenu::Master,
            label: text.to_string(),
        };
    }
    if keyboards::BACHELOR_BUTTONS.contains(&text) {
        return Action::SubmenuInfo {
            menu: Submenu::Bachelor,
            label: text.to_string(),
        };
    }
    if keyboards::DOCTORAL_BUTTONS.contains(&text) {
        return Action::SubmenuInfo {
            menu: Submenu::Doctoral,
            label: text.to_string(),
        };
    }

    Action::Free(text.to_string())
}

/// Where a back press lands. Only the four keyboard-bearing menus are
/// remembered; anything else collapses to the main menu, so a second
/// consecutive back stays there.
pub fn back_target(previous: Option<MenuState>) -> MenuState {
    match previous {
        Some(
            menu @ (MenuState::MainMenu
            | MenuState::BachelorMenu
            | MenuState::MasterMenu
            | MenuState::DoctoralMenu),
        ) => menu,
        _ => MenuState::MainMenu,
    }
}

/// Typed callback payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// `search:{index}`: position in the pending search results.
    SearchResult(usize),
    /// `faq:{id}`: FAQ row id.
    Faq(i64),
    /// `faq_back`: leave the FAQ list for the main menu.
    FaqBack,
}

/// Parse a callback payload. Malformed data is `None`, never a panic.
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    if let Some(index) = data.strip_prefix("search:") {
        return index.parse().ok().map(CallbackAction::SearchResult);
    }
    if let Some(id) = data.strip_prefix("faq:") {
        return id.parse().ok().map(CallbackAction::Faq);
    }
    if data == "faq_back" {
        return Some(CallbackAction::FaqBack);
    }
    None
}
