//! Callback Handler module: search result selection and the FAQ flow.

use anyhow::Result;
use rusqlite::Connection;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::db;
use crate::keyboards;
use crate::localization::t;
use crate::router::{self, CallbackAction};
use crate::state::{MenuState, SessionDialogue};

use super::message_handler::deliver_document;
use super::ui_builder;

/// Handle callback queries from inline keyboards.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: SessionDialogue,
    conn: Arc<Mutex<Connection>>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query");

    let state = dialogue.get().await?.unwrap_or_default();
    let language = state.lang();
    let action = q.data.as_deref().and_then(router::parse_callback);

    if let (Some(action), Some(msg)) = (action, q.message.as_ref()) {
        let chat_id = msg.chat().id;

        match action {
            CallbackAction::SearchResult(index) => {
                match state.pending_results.get(index) {
                    Some(hit) => {
                        bot.send_message(chat_id, ui_builder::format_search_result(hit))
                            .parse_mode(ParseMode::Markdown)
                            .await?;
                        if let Some(path) = &hit.document_path {
                            if let Err(err) = deliver_document(&bot, chat_id, path).await {
                                error!(user_id = %q.from.id, error = %err, path = %path, "Failed to send document");
                                bot.send_message(chat_id, t("file-not-found", language)).await?;
                            }
                        }
                    }
                    None => {
                        // Out of range or already-consumed results.
                        warn!(user_id = %q.from.id, index, "Search selection out of range");
                        bot.send_message(chat_id, t("info-not-found", language)).await?;
                    }
                }

                // Either way the flow is over: back to the main menu.
                bot.send_message(chat_id, t("choose-section", language))
                    .reply_markup(keyboards::main_menu_keyboard(language))
                    .await?;
                dialogue.update(state.at_menu(MenuState::MainMenu)).await?;
            }
            CallbackAction::Faq(id) => {
                let entry = {
                    let conn = conn.lock().await;
                    db::faq_by_id(&conn, id)
                };

                match entry {
                    Ok(Some(faq)) => {
                        bot.send_message(chat_id, faq.answer(language).to_string()).await?;
                    }
                    Ok(None) => {
                        bot.send_message(chat_id, t("faq-not-found", language)).await?;
                    }
                    Err(err) => {
                        error!(user_id = %q.from.id, error = %err, "Store operation failed");
                        bot.send_message(chat_id, t("store-unavailable", language)).await?;
                    }
                }
            }
            CallbackAction::FaqBack => {
                bot.send_message(chat_id, t("choose-section", language))
                    .reply_markup(keyboards::main_menu_keyboard(language))
                    .await?;
                dialogue.update(state.at_menu(MenuState::MainMenu)).await?;
            }
        }
    }

    // Answer the callback query to remove the loading state on the button.
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
