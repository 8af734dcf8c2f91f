//! Tests for action classification and the pure transition helpers.

use admissions_bot::db::Category;
use admissions_bot::keyboards;
use admissions_bot::router::{self, Action, CallbackAction, Command, Submenu};
use admissions_bot::state::{Language, MenuState, SessionState};

#[test]
fn test_classify_commands() {
    assert_eq!(router::classify("/start"), Action::Command(Command::Start));
    assert_eq!(
        router::classify("/view_feedback"),
        Action::Command(Command::ViewFeedback)
    );
    assert_eq!(router::classify("/whoami"), Action::Command(Command::WhoAmI));
}

#[test]
fn test_classify_language_labels() {
    assert_eq!(
        router::classify("🇷🇺 Русский"),
        Action::SelectLanguage(Language::Ru)
    );
    assert_eq!(
        router::classify("🇰🇿 Қазақ"),
        Action::SelectLanguage(Language::Kk)
    );
}

#[test]
fn test_classify_submenu_navigation() {
    assert_eq!(
        router::classify("🎓 Бакалавриат"),
        Action::OpenSubmenu(Submenu::Bachelor)
    );
    assert_eq!(
        router::classify("📖 Магистратура"),
        Action::OpenSubmenu(Submenu::Master)
    );
    assert_eq!(
        router::classify("🎓 Докторантура"),
        Action::OpenSubmenu(Submenu::Doctoral)
    );
}

#[test]
fn test_classify_search_pins_language_from_label() {
    assert_eq!(router::classify("🔍 Поиск"), Action::StartSearch(Language::Ru));
    assert_eq!(router::classify("🔍 Іздеу"), Action::StartSearch(Language::Kk));
}

#[test]
fn test_classify_feedback_and_faq_pin_language() {
    assert_eq!(
        router::classify("📝 Обратная связь"),
        Action::StartFeedback(Language::Ru)
    );
    assert_eq!(
        router::classify("📝 Кері байланыс"),
        Action::StartFeedback(Language::Kk)
    );
    assert_eq!(
        router::classify("❓ Часто задаваемые вопросы"),
        Action::ShowFaq(Language::Ru)
    );
    assert_eq!(
        router::classify("❓ Жиі қойылатын сұрақтар"),
        Action::ShowFaq(Language::Kk)
    );
}

#[test]
fn test_classify_global_labels() {
    assert_eq!(router::classify("🌍 Сменить язык"), Action::ChangeLanguage);
    assert_eq!(router::classify("🌍 Тілді өзгерту"), Action::ChangeLanguage);
    assert_eq!(router::classify("🔙 Назад"), Action::Back);
    assert_eq!(router::classify("🔙 Артқа"), Action::Back);
    assert_eq!(router::classify("❌ Отмена"), Action::Cancel);
    assert_eq!(router::classify("❌ Болдырмау"), Action::Cancel);
    assert_eq!(router::classify("🗺️ Как добраться"), Action::ShowLocation);
    assert_eq!(router::classify("🗺️ Қалай жетемін"), Action::ShowLocation);
}

#[test]
fn test_classify_general_info_labels() {
    for label in keyboards::GENERAL_BUTTONS {
        assert_eq!(
            router::classify(label),
            Action::GeneralInfo(label.to_string()),
            "label {label} must resolve against the general category"
        );
    }
}

#[test]
fn test_classify_submenu_info_labels() {
    assert_eq!(
        router::classify("📝 ЕНТ"),
        Action::SubmenuInfo {
            menu: Submenu::Bachelor,
            label: "📝 ЕНТ".to_string()
        }
    );
    assert_eq!(
        router::classify("Необходимые документы маг"),
        Action::SubmenuInfo {
            menu: Submenu::Master,
            label: "Необходимые документы маг".to_string()
        }
    );
    assert_eq!(
        router::classify("Докторантура Контакты"),
        Action::SubmenuInfo {
            menu: Submenu::Doctoral,
            label: "Докторантура Контакты".to_string()
        }
    );
}

#[test]
fn test_programs_label_is_never_submenu_info() {
    // The programs label also sits on the bachelor keyboard, but it always
    // opens the program selection.
    assert_eq!(router::classify("🎓 Образовательные программы"), Action::OpenPrograms);
    assert_eq!(router::classify("🎓 Білім бағдарламалары"), Action::OpenPrograms);
}

#[test]
fn test_free_text_falls_through() {
    assert_eq!(
        router::classify("стипендия"),
        Action::Free("стипендия".to_string())
    );
    assert_eq!(
        router::classify("  стипендия  "),
        Action::Free("стипендия".to_string())
    );
}

#[test]
fn test_submenu_mappings() {
    assert_eq!(Submenu::Bachelor.category(), Category::Bachelor);
    assert_eq!(Submenu::Master.category(), Category::Master);
    assert_eq!(Submenu::Doctoral.category(), Category::Doctoral);

    assert_eq!(Submenu::Bachelor.state(), MenuState::BachelorMenu);
    assert_eq!(Submenu::Master.state(), MenuState::MasterMenu);
    assert_eq!(Submenu::Doctoral.state(), MenuState::DoctoralMenu);
}

#[test]
fn test_back_target_remembers_one_level() {
    assert_eq!(
        router::back_target(Some(MenuState::BachelorMenu)),
        MenuState::BachelorMenu
    );
    assert_eq!(
        router::back_target(Some(MenuState::MainMenu)),
        MenuState::MainMenu
    );
}

#[test]
fn test_back_target_collapses_to_main_menu() {
    assert_eq!(router::back_target(None), MenuState::MainMenu);
    assert_eq!(
        router::back_target(Some(MenuState::Searching)),
        MenuState::MainMenu
    );
    assert_eq!(
        router::back_target(Some(MenuState::ChooseLanguage)),
        MenuState::MainMenu
    );
    assert_eq!(
        router::back_target(Some(MenuState::ProgramSelection)),
        MenuState::MainMenu
    );
}

#[test]
fn test_parse_callback_payloads() {
    assert_eq!(
        router::parse_callback("search:0"),
        Some(CallbackAction::SearchResult(0))
    );
    assert_eq!(
        router::parse_callback("faq:42"),
        Some(CallbackAction::Faq(42))
    );
    assert_eq!(router::parse_callback("faq_back"), Some(CallbackAction::FaqBack));
}

#[test]
fn test_parse_callback_malformed_is_none() {
    assert_eq!(router::parse_callback(""), None);
    assert_eq!(router::parse_callback("search:"), None);
    assert_eq!(router::parse_callback("search:twelve"), None);
    assert_eq!(router::parse_callback("search:-1"), None);
    assert_eq!(router::parse_callback("faq:abc"), None);
    assert_eq!(router::parse_callback("noise"), None);
}

#[test]
fn test_session_starts_at_language_choice() {
    let state = SessionState::default();
    assert_eq!(state.menu, MenuState::ChooseLanguage);
    assert_eq!(state.lang(), Language::Ru);
}
