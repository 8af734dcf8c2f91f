//! Static button labels and reply keyboards for the navigation tree.
//!
//! Labels are lookup keys: the content tables are keyed by the exact
//! localized string shown on the button, so renaming a label here breaks
//! content resolution for that entry.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::state::{Language, MenuState};

pub const LANGUAGE_KK: &str = "🇰🇿 Қазақ";
pub const LANGUAGE_RU: &str = "🇷🇺 Русский";

pub const BACK_RU: &str = "🔙 Назад";
pub const BACK_KK: &str = "🔙 Артқа";
pub const CANCEL_RU: &str = "❌ Отмена";
pub const CANCEL_KK: &str = "❌ Болдырмау";

// Degree-level navigation, same strings in both languages.
pub const BACHELOR: &str = "🎓 Бакалавриат";
pub const MASTER: &str = "📖 Магистратура";
pub const DOCTORAL: &str = "🎓 Докторантура";

pub const SEARCH_RU: &str = "🔍 Поиск";
pub const SEARCH_KK: &str = "🔍 Іздеу";
pub const CHANGE_LANGUAGE_RU: &str = "🌍 Сменить язык";
pub const CHANGE_LANGUAGE_KK: &str = "🌍 Тілді өзгерту";
pub const FEEDBACK_RU: &str = "📝 Обратная связь";
pub const FEEDBACK_KK: &str = "📝 Кері байланыс";
pub const FAQ_RU: &str = "❓ Часто задаваемые вопросы";
pub const FAQ_KK: &str = "❓ Жиі қойылатын сұрақтар";
pub const LOCATION_RU: &str = "🗺️ Как добраться";
pub const LOCATION_KK: &str = "🗺️ Қалай жетемін";
pub const PROGRAMS_RU: &str = "🎓 Образовательные программы";
pub const PROGRAMS_KK: &str = "🎓 Білім бағдарламалары";

pub const TUITION_RU: &str = "💰 Стоимость обучения";
pub const TUITION_KK: &str = "💰 Оқу ақысы";
pub const ADMISSION_RU: &str = "📜 Правила приема";
pub const ADMISSION_KK: &str = "📜 Қабылдау ережелері";
pub const ORIENTATION_RU: &str = "🧭 Профориентация";
pub const ORIENTATION_KK: &str = "🧭 Кәсіби бағдар";

/// Main-menu buttons resolved against the `general` content category.
pub const GENERAL_BUTTONS: [&str; 6] = [
    TUITION_RU,
    TUITION_KK,
    ADMISSION_RU,
    ADMISSION_KK,
    ORIENTATION_RU,
    ORIENTATION_KK,
];

/// Bachelor submenu buttons, both languages.
pub const BACHELOR_BUTTONS: [&str; 14] = [
    "📚 Мемлекеттік білім беру тапсырысы",
    "📚 Государственный образовательный заказ",
    "📝 ҰБТ",
    "📝 ЕНТ",
    "📅 Талапкердің күнтізбесі",
    "📅 Календарь абитуриента",
    "📄 Қажетті құжаттар",
    "📄 Необходимые документы",
    "📖 Бейіндік пәндері",
    "📖 Профильные предметы",
    "🧑‍🏫 'Педагогика ғылымдары' арнайы емтиханы",
    "🧑‍🏫 Спецэкзамен 'Педагогические науки'",
    "🎭 Шығармашылық ББ",
    "🎭 Творческие ОП",
];

/// Master submenu buttons, both languages.
pub const MASTER_BUTTONS: [&str; 8] = [
    "Мемлекеттік білім беру тапсырысы маг",
    "Государственный образовательный заказ маг",
    "ББ",
    "ОП",
    "Қажетті құжаттар маг",
    "Необходимые документы маг",
    "Байланыс",
    "Контакты",
];

/// Doctoral submenu buttons, both languages.
pub const DOCTORAL_BUTTONS: [&str; 10] = [
    "Докторантура Мемлекеттік білім беру тапсырысы",
    "Докторантура Государственный образовательный заказ",
    "Докторантура Білім бағдарламалары",
    "Докторантура Образовательные программы",
    "Докторантура Қажетті құжаттар",
    "Докторантура Необходимые документы",
    "Докторантура Байланыс",
    "Докторантура Контакты",
    "Докторантура Түсу емтихандарының бағдарламалары",
    "Докторантура Программы вступительных экзаменов",
];

pub fn back_label(language: Language) -> &'static str {
    match language {
        Language::Ru => BACK_RU,
        Language::Kk => BACK_KK,
    }
}

pub fn cancel_label(language: Language) -> &'static str {
    match language {
        Language::Ru => CANCEL_RU,
        Language::Kk => CANCEL_KK,
    }
}

fn reply_keyboard(rows: Vec<Vec<&str>>) -> KeyboardMarkup {
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect())
        .collect::<Vec<Vec<KeyboardButton>>>();
    let mut markup = KeyboardMarkup::new(rows);
    markup.resize_keyboard = true;
    markup
}

pub fn language_keyboard() -> KeyboardMarkup {
    reply_keyboard(vec![vec![LANGUAGE_KK, LANGUAGE_RU]])
}

pub fn main_menu_keyboard(language: Language) -> KeyboardMarkup {
    match language {
        Language::Ru => reply_keyboard(vec![
            vec![BACHELOR, MASTER],
            vec![DOCTORAL, ADMISSION_RU],
            vec![ORIENTATION_RU, TUITION_RU],
            vec![CHANGE_LANGUAGE_RU, SEARCH_RU],
            vec![LOCATION_RU],
            vec![PROGRAMS_RU],
            vec![FAQ_RU],
            vec![FEEDBACK_RU],
        ]),
        Language::Kk => reply_keyboard(vec![
            vec![BACHELOR, MASTER],
            vec![DOCTORAL, ADMISSION_KK],
            vec![ORIENTATION_KK, TUITION_KK],
            vec![CHANGE_LANGUAGE_KK, SEARCH_KK],
            vec![LOCATION_KK],
            vec![PROGRAMS_KK],
            vec![FAQ_KK],
            vec![FEEDBACK_KK],
        ]),
    }
}

pub fn bachelor_keyboard(language: Language) -> KeyboardMarkup {
    match language {
        Language::Ru => reply_keyboard(vec![
            vec!["📚 Государственный образовательный заказ", "📝 ЕНТ"],
            vec!["📅 Календарь абитуриента", "📄 Необходимые документы"],
            vec![PROGRAMS_RU, "📖 Профильные предметы"],
            vec!["🧑‍🏫 Спецэкзамен 'Педагогические науки'", "🎭 Творческие ОП"],
            vec![BACK_RU],
        ]),
        Language::Kk => reply_keyboard(vec![
            vec!["📚 Мемлекеттік білім беру тапсырысы", "📝 ҰБТ"],
            vec!["📅 Талапкердің күнтізбесі", "📄 Қажетті құжаттар"],
            vec![PROGRAMS_KK, "📖 Бейіндік пәндері"],
            vec!["🧑‍🏫 'Педагогика ғылымдары' арнайы емтиханы", "🎭 Шығармашылық ББ"],
            vec![BACK_KK],
        ]),
    }
}

pub fn master_keyboard(language: Language) -> KeyboardMarkup {
    match language {
        Language::Ru => reply_keyboard(vec![
            vec!["Государственный образовательный заказ маг", "ОП"],
            vec!["Необходимые документы маг"],
            vec!["Контакты"],
            vec![BACK_RU],
        ]),
        Language::Kk => reply_keyboard(vec![
            vec!["Мемлекеттік білім беру тапсырысы маг", "ББ"],
            vec!["Қажетті құжаттар маг"],
            vec!["Байланыс"],
            vec![BACK_KK],
        ]),
    }
}

pub fn doctoral_keyboard(language: Language) -> KeyboardMarkup {
    match language {
        Language::Ru => reply_keyboard(vec![
            vec![
                "Докторантура Государственный образовательный заказ",
                "Докторантура Образовательные программы",
            ],
            vec!["Докторантура Необходимые документы", "Докторантура Контакты"],
            vec!["Докторантура Программы вступительных экзаменов"],
            vec![BACK_RU],
        ]),
        Language::Kk => reply_keyboard(vec![
            vec![
                "Докторантура Мемлекеттік білім беру тапсырысы",
                "Докторантура Білім бағдарламалары",
            ],
            vec!["Докторантура Қажетті құжаттар", "Докторантура Байланыс"],
            vec!["Докторантура Түсу емтихандарының бағдарламалары"],
            vec![BACK_KK],
        ]),
    }
}

/// Keyboard for a menu that has a fixed reply keyboard. Transient states
/// (search, feedback, result selection) have none.
pub fn menu_keyboard(menu: MenuState, language: Language) -> Option<KeyboardMarkup> {
    match menu {
        MenuState::MainMenu => Some(main_menu_keyboard(language)),
        MenuState::BachelorMenu => Some(bachelor_keyboard(language)),
        MenuState::MasterMenu => Some(master_keyboard(language)),
        MenuState::DoctoralMenu => Some(doctoral_keyboard(language)),
        _ => None,
    }
}

/// One faculty per row, back button at the bottom.
pub fn program_keyboard(names: &[String], language: Language) -> KeyboardMarkup {
    let mut rows: Vec<Vec<&str>> = names.iter().map(|name| vec![name.as_str()]).collect();
    rows.push(vec![back_label(language)]);
    reply_keyboard(rows)
}

/// Single localized cancel button shown while prompting for a keyword.
pub fn search_cancel_keyboard(language: Language) -> KeyboardMarkup {
    let mut markup = reply_keyboard(vec![vec![cancel_label(language)]]);
    markup.one_time_keyboard = true;
    markup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_cancel_labels() {
        assert_eq!(back_label(Language::Ru), "🔙 Назад");
        assert_eq!(back_label(Language::Kk), "🔙 Артқа");
        assert_eq!(cancel_label(Language::Ru), "❌ Отмена");
        assert_eq!(cancel_label(Language::Kk), "❌ Болдырмау");
    }

    #[test]
    fn test_menu_keyboard_only_for_fixed_menus() {
        for menu in [
            MenuState::MainMenu,
            MenuState::BachelorMenu,
            MenuState::MasterMenu,
            MenuState::DoctoralMenu,
        ] {
            assert!(menu_keyboard(menu, Language::Ru).is_some());
        }
        for menu in [
            MenuState::ChooseLanguage,
            MenuState::ProgramSelection,
            MenuState::Searching,
            MenuState::ChoosingResult,
            MenuState::Feedback,
        ] {
            assert!(menu_keyboard(menu, Language::Ru).is_none());
        }
    }

    #[test]
    fn test_program_keyboard_ends_with_back() {
        let names = vec!["Физика".to_string(), "Филология".to_string()];
        let markup = program_keyboard(&names, Language::Kk);
        assert_eq!(markup.keyboard.len(), 3);
        assert_eq!(markup.keyboard[2][0].text, BACK_KK);
    }
}
