//! Conversation state for the menu dialogue, one value per chat.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::db::SearchHit;

/// Interface language of a session. Russian is the fallback whenever the
/// user has not picked one yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Ru,
    Kk,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Kk => "kk",
        }
    }
}

/// The menu a session is currently in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuState {
    #[default]
    ChooseLanguage,
    MainMenu,
    BachelorMenu,
    MasterMenu,
    DoctoralMenu,
    ProgramSelection,
    Searching,
    ChoosingResult,
    Feedback,
}

/// Per-user conversation state. `pending_results` is only populated while
/// the user is picking a search result; `previous_menu` remembers a single
/// level of back navigation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub menu: MenuState,
    pub language: Option<Language>,
    pub previous_menu: Option<MenuState>,
    pub pending_results: Vec<SearchHit>,
}

impl SessionState {
    /// Active language, defaulting to Russian when none was selected.
    pub fn lang(&self) -> Language {
        self.language.unwrap_or_default()
    }

    /// Same session moved to another menu, with stale search results dropped.
    pub fn at_menu(&self, menu: MenuState) -> SessionState {
        SessionState {
            menu,
            language: self.language,
            previous_menu: self.previous_menu,
            pending_results: Vec::new(),
        }
    }
}

/// Type alias for the session dialogue
pub type SessionDialogue = Dialogue<SessionState, InMemStorage<SessionState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::default();
        assert_eq!(state.menu, MenuState::ChooseLanguage);
        assert!(state.language.is_none());
        assert!(state.previous_menu.is_none());
        assert!(state.pending_results.is_empty());
    }

    #[test]
    fn test_language_defaults_to_russian() {
        let state = SessionState::default();
        assert_eq!(state.lang(), Language::Ru);

        let state = SessionState {
            language: Some(Language::Kk),
            ..Default::default()
        };
        assert_eq!(state.lang(), Language::Kk);
    }

    #[test]
    fn test_at_menu_drops_pending_results() {
        let state = SessionState {
            menu: MenuState::ChoosingResult,
            language: Some(Language::Kk),
            previous_menu: Some(MenuState::MainMenu),
            pending_results: vec![Default::default()],
        };

        let moved = state.at_menu(MenuState::MainMenu);
        assert_eq!(moved.menu, MenuState::MainMenu);
        assert_eq!(moved.language, Some(Language::Kk));
        assert_eq!(moved.previous_menu, Some(MenuState::MainMenu));
        assert!(moved.pending_results.is_empty());
    }
}
