//! Tests for response formatting: search result lists, the FAQ list and
//! keyboard, and the chunked admin feedback dump.

use chrono::{TimeZone, Utc};
use teloxide::types::InlineKeyboardButtonKind;

use admissions_bot::bot::ui_builder;
use admissions_bot::db::{Category, FaqEntry, FeedbackRow, SearchHit};
use admissions_bot::state::Language;

fn hit(label: &str, body: &str) -> SearchHit {
    SearchHit {
        category: Category::General,
        label: label.to_string(),
        body: body.to_string(),
        document_path: None,
    }
}

fn faq(id: i64, question: &str) -> FaqEntry {
    FaqEntry {
        id,
        question_ru: question.to_string(),
        question_kk: format!("{question} (kk)"),
        answer_ru: "ответ".to_string(),
        answer_kk: "жауап".to_string(),
    }
}

fn callback_data(kind: &InlineKeyboardButtonKind) -> &str {
    match kind {
        InlineKeyboardButtonKind::CallbackData(data) => data,
        other => panic!("expected callback button, got {other:?}"),
    }
}

#[test]
fn test_format_search_result_markdown() {
    let rendered = ui_builder::format_search_result(&hit("Стипендия", "О выплатах"));
    assert_eq!(rendered, "*Стипендия*\n\nО выплатах");
}

#[test]
fn test_search_results_keyboard_indexes_by_position() {
    let hits = vec![hit("Первый", "а"), hit("Второй", "б"), hit("Третий", "в")];
    let markup = ui_builder::search_results_keyboard(&hits);

    assert_eq!(markup.inline_keyboard.len(), 3);
    for (i, row) in markup.inline_keyboard.iter().enumerate() {
        assert_eq!(row.len(), 1);
        assert_eq!(callback_data(&row[0].kind), format!("search:{i}"));
    }
    assert_eq!(markup.inline_keyboard[1][0].text, "Второй");
}

#[test]
fn test_format_faq_list_numbering() {
    let faqs = vec![faq(10, "Первый"), faq(20, "Второй")];

    let listing = ui_builder::format_faq_list(&faqs, Language::Ru);
    assert_eq!(listing, "1. Первый\n2. Второй");

    let listing = ui_builder::format_faq_list(&faqs, Language::Kk);
    assert_eq!(listing, "1. Первый (kk)\n2. Второй (kk)");
}

#[test]
fn test_faq_keyboard_rows_of_three_with_back() {
    let faqs: Vec<FaqEntry> = (0..7).map(|i| faq(10 + i, &format!("Вопрос {i}"))).collect();
    let markup = ui_builder::faq_keyboard(&faqs, Language::Kk);

    // 7 numbers in rows of three, then the back row.
    assert_eq!(markup.inline_keyboard.len(), 4);
    assert_eq!(markup.inline_keyboard[0].len(), 3);
    assert_eq!(markup.inline_keyboard[1].len(), 3);
    assert_eq!(markup.inline_keyboard[2].len(), 1);

    // Button text is the position, the payload is the row id.
    assert_eq!(markup.inline_keyboard[0][0].text, "1");
    assert_eq!(callback_data(&markup.inline_keyboard[0][0].kind), "faq:10");
    assert_eq!(markup.inline_keyboard[1][2].text, "6");
    assert_eq!(callback_data(&markup.inline_keyboard[1][2].kind), "faq:15");

    let back_row = &markup.inline_keyboard[3];
    assert_eq!(back_row[0].text, "🔙 Артқа");
    assert_eq!(callback_data(&back_row[0].kind), "faq_back");
}

#[test]
fn test_location_keyboard_has_two_map_links() {
    let markup = ui_builder::location_keyboard(50.290679, 57.151828).unwrap();
    assert_eq!(markup.inline_keyboard.len(), 1);
    assert_eq!(markup.inline_keyboard[0].len(), 2);
    assert_eq!(markup.inline_keyboard[0][0].text, "Google Maps");
    assert_eq!(markup.inline_keyboard[0][1].text, "2ГИС");
}

#[test]
fn test_feedback_chunks_fit_payload_limit() {
    let rows: Vec<FeedbackRow> = (0..20)
        .map(|i| FeedbackRow {
            id: i,
            username: Some(format!("user{i}")),
            message: "х".repeat(400),
            language: "ru".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
        })
        .collect();

    let chunks = ui_builder::format_feedback_chunks(&rows);
    assert!(chunks.len() > 1, "long dumps must be split");
    for chunk in &chunks {
        assert!(chunk.len() <= 3000, "chunk exceeds the payload limit");
        assert!(!chunk.is_empty());
    }

    // Nothing got lost across the chunk boundaries.
    let joined = chunks.concat();
    for i in 0..20 {
        assert!(joined.contains(&format!("@user{i}")));
    }
}

#[test]
fn test_feedback_chunk_line_format() {
    let rows = vec![FeedbackRow {
        id: 3,
        username: None,
        message: "Рақмет".to_string(),
        language: "kk".to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
    }];

    let chunks = ui_builder::format_feedback_chunks(&rows);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], "3. @— (kk, 2026-01-15 10:30):\nРақмет\n\n");
}

#[test]
fn test_feedback_chunks_empty_input() {
    assert!(ui_builder::format_feedback_chunks(&[]).is_empty());
}
