//! UI Builder module for formatting messages and inline keyboards

use anyhow::Result;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use crate::db::{FaqEntry, FeedbackRow, SearchHit};
use crate::keyboards;
use crate::state::Language;

/// Upper bound for one outgoing admin dump message, below the Telegram
/// hard limit of 4096.
const FEEDBACK_CHUNK_LIMIT: usize = 3000;

/// Address card for the campus on 2GIS.
const DGIS_URL: &str =
    "https://2gis.kz/aktobe/firm/70000001031721747/57.15221%2C50.290333?m=57.151828%2C50.290679%2F17.63";

/// Render a selected search hit as Markdown: bold label, then the body.
pub fn format_search_result(hit: &SearchHit) -> String {
    format!("*{}*\n\n{}", hit.label, hit.body)
}

/// One button per hit, labelled with the entry's button name. The callback
/// payload carries the position in the pending results, which is what the
/// selection handler indexes by.
pub fn search_results_keyboard(hits: &[SearchHit]) -> InlineKeyboardMarkup {
    let buttons = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            vec![InlineKeyboardButton::callback(
                hit.label.clone(),
                format!("search:{i}"),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(buttons)
}

/// Numbered FAQ list, `1..=N` in listing order.
pub fn format_faq_list(faqs: &[FaqEntry], language: Language) -> String {
    faqs.iter()
        .enumerate()
        .map(|(i, faq)| format!("{}. {}", i + 1, faq.question(language)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number buttons in rows of three with a localized back button at the
/// bottom. Button `k` carries the id of the `k`-th row in listing order,
/// not the number itself.
pub fn faq_keyboard(faqs: &[FaqEntry], language: Language) -> InlineKeyboardMarkup {
    let numbers = faqs
        .iter()
        .enumerate()
        .map(|(i, faq)| InlineKeyboardButton::callback((i + 1).to_string(), format!("faq:{}", faq.id)))
        .collect::<Vec<_>>();

    let mut rows = numbers
        .chunks(3)
        .map(|chunk| chunk.to_vec())
        .collect::<Vec<_>>();
    rows.push(vec![InlineKeyboardButton::callback(
        keyboards::back_label(language).to_string(),
        "faq_back".to_string(),
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// Map links for the "how to get there" flow.
pub fn location_keyboard(latitude: f64, longitude: f64) -> Result<InlineKeyboardMarkup> {
    let google = Url::parse(&format!(
        "https://www.google.com/maps?q={latitude},{longitude}"
    ))?;
    let dgis = Url::parse(DGIS_URL)?;

    Ok(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::url("Google Maps", google),
        InlineKeyboardButton::url("2ГИС", dgis),
    ]]))
}

/// Split the feedback dump into messages that stay under the payload limit.
pub fn format_feedback_chunks(rows: &[FeedbackRow]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut text = String::new();

    for row in rows {
        let line = format!(
            "{}. @{} ({}, {}):\n{}\n\n",
            row.id,
            row.username.as_deref().unwrap_or("—"),
            row.language,
            row.timestamp.format("%Y-%m-%d %H:%M"),
            row.message
        );
        if !text.is_empty() && text.len() + line.len() > FEEDBACK_CHUNK_LIMIT {
            chunks.push(std::mem::take(&mut text));
        }
        text.push_str(&line);
    }

    if !text.is_empty() {
        chunks.push(text);
    }

    chunks
}
