//! Message Handler module: classifies inbound text and drives the menu
//! state machine.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InputFile, KeyboardRemove, ParseMode};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::BotConfig;
use crate::db::{self, Category, FeedbackRecord, DEFAULT_SEARCH_LIMIT};
use crate::error::TurnError;
use crate::keyboards;
use crate::localization::{t, t_args};
use crate::router::{self, Action, Command, Submenu};
use crate::state::{Language, MenuState, SessionDialogue, SessionState};

use super::ui_builder;

// Campus coordinates for the "how to get there" flow.
const CAMPUS_LATITUDE: f64 = 50.290679;
const CAMPUS_LONGITUDE: f64 = 57.151828;

/// How many feedback rows the admin dump shows.
const ADMIN_FEEDBACK_LIMIT: usize = 20;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: SessionDialogue,
    conn: Arc<Mutex<Connection>>,
    config: Arc<BotConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        // Only text drives the menu tree; other message kinds are ignored.
        return Ok(());
    };

    debug!(user_id = %msg.chat.id, "Received text message");
    let state = dialogue.get().await?.unwrap_or_default();

    match router::classify(text) {
        Action::Command(Command::Start) => handle_start(&bot, &msg, &dialogue, &state).await,
        Action::Command(Command::ViewFeedback) => {
            handle_view_feedback(&bot, &msg, &conn, &config).await
        }
        Action::Command(Command::WhoAmI) => handle_whoami(&bot, &msg).await,
        // The search and feedback prompts consume whatever text comes
        // next, button labels included; only commands escape them.
        _ if state.menu == MenuState::Searching => {
            handle_search_input(&bot, &msg, &dialogue, &conn, &state, text).await
        }
        _ if state.menu == MenuState::Feedback => {
            handle_feedback_submission(&bot, &msg, &dialogue, &conn, &state, text).await
        }
        Action::SelectLanguage(language) => {
            handle_select_language(&bot, &msg, &dialogue, &state, language).await
        }
        Action::OpenSubmenu(submenu) => {
            handle_open_submenu(&bot, &msg, &dialogue, &state, submenu).await
        }
        Action::OpenPrograms => handle_open_programs(&bot, &msg, &dialogue, &conn, &state).await,
        Action::StartSearch(language) => {
            handle_start_search(&bot, &msg, &dialogue, &state, language).await
        }
        Action::StartFeedback(language) => {
            handle_start_feedback(&bot, &msg, &dialogue, &state, language).await
        }
        Action::ShowFaq(language) => {
            handle_show_faq(&bot, &msg, &dialogue, &conn, &state, language).await
        }
        Action::ShowLocation => handle_show_location(&bot, &msg, &state).await,
        Action::ChangeLanguage => handle_change_language(&bot, &msg, &dialogue, &state).await,
        Action::GeneralInfo(label) => {
            send_info(&bot, &msg, &dialogue, &conn, &state, Category::General, &label).await
        }
        Action::SubmenuInfo { menu, label } => {
            if state.menu == menu.state() {
                send_info(&bot, &msg, &dialogue, &conn, &state, menu.category(), &label).await
            } else {
                // Submenu button pressed from another menu: silently ignored.
                Ok(())
            }
        }
        Action::Back => handle_back(&bot, &msg, &dialogue, &state).await,
        Action::Free(name) if state.menu == MenuState::ProgramSelection => {
            handle_program_selection(&bot, &msg, &dialogue, &conn, &state, &name).await
        }
        Action::Cancel | Action::Free(_) => Ok(()),
    }
}

/// Bilingual welcome plus the language keyboard, from any state.
async fn handle_start(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
) -> Result<()> {
    let welcome = format!("{} / {}", t("welcome", Language::Kk), t("welcome", Language::Ru));
    bot.send_message(msg.chat.id, welcome)
        .reply_markup(keyboards::language_keyboard())
        .await?;
    dialogue.update(state.at_menu(MenuState::ChooseLanguage)).await?;
    Ok(())
}

async fn handle_select_language(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
    language: Language,
) -> Result<()> {
    let mut new_state = state.at_menu(MenuState::MainMenu);
    new_state.language = Some(language);

    bot.send_message(msg.chat.id, t("language-selected", language))
        .reply_markup(keyboards::main_menu_keyboard(language))
        .await?;
    dialogue.update(new_state).await?;
    Ok(())
}

async fn handle_open_submenu(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
    submenu: Submenu,
) -> Result<()> {
    info!(user_id = %msg.chat.id, submenu = ?submenu, "Opening submenu");
    let language = state.lang();

    let markup = match submenu {
        Submenu::Bachelor => keyboards::bachelor_keyboard(language),
        Submenu::Master => keyboards::master_keyboard(language),
        Submenu::Doctoral => keyboards::doctoral_keyboard(language),
    };

    let mut new_state = state.at_menu(submenu.state());
    new_state.previous_menu = Some(state.menu);

    bot.send_message(msg.chat.id, t("choose-section", language))
        .reply_markup(markup)
        .await?;
    dialogue.update(new_state).await?;
    Ok(())
}

async fn handle_open_programs(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    conn: &Arc<Mutex<Connection>>,
    state: &SessionState,
) -> Result<()> {
    let language = state.lang();

    let names = {
        let conn = conn.lock().await;
        db::list_faculties(&conn, language)
    };

    match names {
        Ok(names) if names.is_empty() => {
            bot.send_message(msg.chat.id, t("no-programs", language)).await?;
            Ok(())
        }
        Ok(names) => {
            bot.send_message(msg.chat.id, t("choose-program", language))
                .reply_markup(keyboards::program_keyboard(&names, language))
                .await?;
            dialogue.update(state.at_menu(MenuState::ProgramSelection)).await?;
            Ok(())
        }
        Err(err) => store_failure(bot, msg, dialogue, state, err).await,
    }
}

async fn handle_start_search(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
    language: Language,
) -> Result<()> {
    let mut new_state = state.at_menu(MenuState::Searching);
    new_state.language = Some(language);

    let cancel = keyboards::cancel_label(language);
    bot.send_message(msg.chat.id, t_args("search-prompt", &[("cancel", cancel)], language))
        .reply_markup(keyboards::search_cancel_keyboard(language))
        .await?;
    dialogue.update(new_state).await?;
    Ok(())
}

async fn handle_search_input(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    conn: &Arc<Mutex<Connection>>,
    state: &SessionState,
    text: &str,
) -> Result<()> {
    let language = state.lang();
    let text = text.trim();

    if text == keyboards::cancel_label(language) {
        // Reset in one update so an interrupted cancel can never leave the
        // session in Searching with stale results.
        dialogue.update(state.at_menu(MenuState::MainMenu)).await?;
        bot.send_message(msg.chat.id, t("search-cancelled", language))
            .reply_markup(keyboards::main_menu_keyboard(language))
            .await?;
        return Ok(());
    }

    let hits = {
        let conn = conn.lock().await;
        db::search_all(&conn, text, DEFAULT_SEARCH_LIMIT)
    };

    match hits {
        Ok(hits) if hits.is_empty() => {
            dialogue.update(state.at_menu(MenuState::MainMenu)).await?;
            bot.send_message(msg.chat.id, t("search-empty", language))
                .reply_markup(keyboards::main_menu_keyboard(language))
                .await?;
            Ok(())
        }
        Ok(hits) => {
            info!(user_id = %msg.chat.id, hits = hits.len(), "Search produced results");
            bot.send_message(msg.chat.id, t("search-header", language))
                .reply_markup(KeyboardRemove::new())
                .await?;
            bot.send_message(msg.chat.id, t("search-choose", language))
                .reply_markup(ui_builder::search_results_keyboard(&hits))
                .await?;

            let mut new_state = state.at_menu(MenuState::ChoosingResult);
            new_state.pending_results = hits;
            dialogue.update(new_state).await?;
            Ok(())
        }
        Err(err) => store_failure(bot, msg, dialogue, state, err).await,
    }
}

async fn handle_start_feedback(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
    language: Language,
) -> Result<()> {
    let mut new_state = state.at_menu(MenuState::Feedback);
    new_state.language = Some(language);

    bot.send_message(msg.chat.id, t("feedback-prompt", language)).await?;
    dialogue.update(new_state).await?;
    Ok(())
}

/// Store the submission and return to the main menu whatever the outcome.
async fn handle_feedback_submission(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    conn: &Arc<Mutex<Connection>>,
    state: &SessionState,
    text: &str,
) -> Result<()> {
    let language = state.lang();
    let user = msg.from.as_ref();

    let record = FeedbackRecord {
        user_id: user.map(|u| u.id.0 as i64).unwrap_or_default(),
        username: user.and_then(|u| u.username.clone()),
        first_name: user.map(|u| u.first_name.clone()),
        last_name: user.and_then(|u| u.last_name.clone()),
        message: text.to_string(),
        language,
        timestamp: Utc::now(),
    };

    let saved = {
        let conn = conn.lock().await;
        db::append_feedback(&conn, &record)
    };

    match saved {
        Ok(()) => {
            bot.send_message(msg.chat.id, t("feedback-thanks", language)).await?;
            bot.send_message(msg.chat.id, t("choose-section", language))
                .reply_markup(keyboards::main_menu_keyboard(language))
                .await?;
        }
        Err(err) => {
            error!(user_id = %msg.chat.id, error = %err, "Failed to save feedback");
            bot.send_message(msg.chat.id, t("feedback-error", language)).await?;
        }
    }

    dialogue.update(state.at_menu(MenuState::MainMenu)).await?;
    Ok(())
}

async fn handle_show_faq(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    conn: &Arc<Mutex<Connection>>,
    state: &SessionState,
    language: Language,
) -> Result<()> {
    let faqs = {
        let conn = conn.lock().await;
        db::list_faqs(&conn)
    };

    let faqs = match faqs {
        Ok(faqs) => faqs,
        Err(err) => return store_failure(bot, msg, dialogue, state, err).await,
    };

    bot.send_message(msg.chat.id, t("faq-title", language))
        .reply_markup(KeyboardRemove::new())
        .await?;
    if !faqs.is_empty() {
        bot.send_message(msg.chat.id, ui_builder::format_faq_list(&faqs, language))
            .await?;
    }
    bot.send_message(msg.chat.id, t("faq-prompt", language))
        .reply_markup(ui_builder::faq_keyboard(&faqs, language))
        .await?;

    let mut new_state = state.clone();
    new_state.language = Some(language);
    dialogue.update(new_state).await?;
    Ok(())
}

async fn handle_show_location(bot: &Bot, msg: &Message, state: &SessionState) -> Result<()> {
    let language = state.lang();

    let text = format!(
        "{}\n{}\n\n{}",
        t("location-title", language),
        t("location-address", language),
        t("location-maps", language)
    );
    bot.send_message(msg.chat.id, text)
        .reply_markup(ui_builder::location_keyboard(CAMPUS_LATITUDE, CAMPUS_LONGITUDE)?)
        .await?;
    bot.send_location(msg.chat.id, CAMPUS_LATITUDE, CAMPUS_LONGITUDE)
        .await?;
    Ok(())
}

async fn handle_change_language(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
) -> Result<()> {
    let welcome = format!("{} / {}", t("welcome", Language::Kk), t("welcome", Language::Ru));
    bot.send_message(msg.chat.id, welcome)
        .reply_markup(keyboards::language_keyboard())
        .await?;
    dialogue.update(state.at_menu(MenuState::ChooseLanguage)).await?;
    Ok(())
}

/// Restore the single remembered previous menu, main menu by default.
async fn handle_back(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
) -> Result<()> {
    let language = state.lang();
    let target = router::back_target(state.previous_menu);
    let markup = keyboards::menu_keyboard(target, language)
        .unwrap_or_else(|| keyboards::main_menu_keyboard(language));

    bot.send_message(msg.chat.id, t("back", language))
        .reply_markup(markup)
        .await?;
    dialogue.update(state.at_menu(target)).await?;
    Ok(())
}

/// Send the program document for the faculty picked by display name.
async fn handle_program_selection(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    conn: &Arc<Mutex<Connection>>,
    state: &SessionState,
    name: &str,
) -> Result<()> {
    let language = state.lang();

    let lookup = {
        let conn = conn.lock().await;
        db::faculty_by_name(&conn, language, name).and_then(|found| match found {
            Some(id) => db::faculty_document(&conn, id, language).map(Some),
            None => Ok(None),
        })
    };

    match lookup {
        Ok(None) => {
            bot.send_message(msg.chat.id, t("faculty-not-found", language)).await?;
            Ok(())
        }
        Ok(Some(None)) => {
            warn!(user_id = %msg.chat.id, name, "No program document stored");
            bot.send_message(msg.chat.id, t("file-not-found", language)).await?;
            Ok(())
        }
        Ok(Some(Some(path))) => {
            if let Err(err) = deliver_document(bot, msg.chat.id, &path).await {
                error!(user_id = %msg.chat.id, error = %err, path = %path, "Failed to send program document");
                bot.send_message(msg.chat.id, t("file-not-found", language)).await?;
            }
            Ok(())
        }
        Err(err) => store_failure(bot, msg, dialogue, state, err).await,
    }
}

/// Resolve one informational entry by its button label and render it.
async fn send_info(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    conn: &Arc<Mutex<Connection>>,
    state: &SessionState,
    category: Category,
    label: &str,
) -> Result<()> {
    info!(user_id = %msg.chat.id, label, table = category.table(), "Requested information");
    let language = state.lang();

    let entry = {
        let conn = conn.lock().await;
        db::lookup_info(&conn, category, label)
    };

    match entry {
        Ok(Some(entry)) => {
            bot.send_message(msg.chat.id, entry.body).await?;
            if let Some(path) = entry.document_path {
                if let Err(err) = deliver_document(bot, msg.chat.id, &path).await {
                    error!(user_id = %msg.chat.id, error = %err, path = %path, "Failed to send document");
                    bot.send_message(msg.chat.id, t("file-not-found", language)).await?;
                }
            }
            Ok(())
        }
        Ok(None) => {
            warn!(user_id = %msg.chat.id, label, "No content for button");
            bot.send_message(msg.chat.id, t("info-not-found", language)).await?;
            Ok(())
        }
        Err(err) => store_failure(bot, msg, dialogue, state, err).await,
    }
}

/// Send a stored document from disk.
pub async fn deliver_document(bot: &Bot, chat_id: ChatId, path: &str) -> Result<(), TurnError> {
    bot.send_document(chat_id, InputFile::file(PathBuf::from(path)))
        .await?;
    Ok(())
}

/// The store failed mid-turn: tell the user and put the session back on
/// the main menu so it cannot get stuck.
async fn store_failure(
    bot: &Bot,
    msg: &Message,
    dialogue: &SessionDialogue,
    state: &SessionState,
    err: TurnError,
) -> Result<()> {
    error!(user_id = %msg.chat.id, error = %err, "Store operation failed");
    let language = state.lang();

    bot.send_message(msg.chat.id, t("store-unavailable", language))
        .reply_markup(keyboards::main_menu_keyboard(language))
        .await?;
    dialogue.update(state.at_menu(MenuState::MainMenu)).await?;
    Ok(())
}

/// Dump the most recent feedback rows to an allow-listed admin.
async fn handle_view_feedback(
    bot: &Bot,
    msg: &Message,
    conn: &Arc<Mutex<Connection>>,
    config: &BotConfig,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if !config.is_admin(user.id.0) {
        // Everyone else is silently ignored.
        return Ok(());
    }

    let rows = {
        let conn = conn.lock().await;
        db::recent_feedback(&conn, ADMIN_FEEDBACK_LIMIT)
    };

    let rows = match rows {
        Ok(rows) => rows,
        Err(err) => {
            error!(user_id = %user.id, error = %err, "Failed to read feedback log");
            return Ok(());
        }
    };

    if rows.is_empty() {
        bot.send_message(msg.chat.id, "Нет сохранённых отзывов.").await?;
        return Ok(());
    }

    for chunk in ui_builder::format_feedback_chunks(&rows) {
        bot.send_message(msg.chat.id, chunk).await?;
    }
    Ok(())
}

async fn handle_whoami(bot: &Bot, msg: &Message) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    bot.send_message(msg.chat.id, format!("Ваш user_id: `{}`", user.id))
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}
