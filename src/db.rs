//! Content store access: informational entries, faculties, FAQs and the
//! feedback log, all backed by a single SQLite database.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{StoreResult, TurnError};
use crate::state::Language;

/// Default number of hits returned by [`search_all`].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Content category, one backing table per variant. The order of
/// [`Category::ALL`] is the order search results are reported in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Bachelor,
    Master,
    Doctoral,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Bachelor,
        Category::Master,
        Category::Doctoral,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Category::General => "main_info",
            Category::Bachelor => "bachelor_info",
            Category::Master => "master_info",
            Category::Doctoral => "doctoral_info",
        }
    }
}

/// An informational entry, keyed by the exact localized button label.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub label: String,
    pub body: String,
    pub document_path: Option<String>,
}

/// One search hit. Kept in the dialogue state while the user is choosing,
/// so it has to be serializable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub category: Category,
    pub label: String,
    pub body: String,
    pub document_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub id: i64,
    pub question_ru: String,
    pub question_kk: String,
    pub answer_ru: String,
    pub answer_kk: String,
}

impl FaqEntry {
    pub fn question(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.question_ru,
            Language::Kk => &self.question_kk,
        }
    }

    pub fn answer(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.answer_ru,
            Language::Kk => &self.answer_kk,
        }
    }
}

/// A feedback submission, written exactly once per completed flow.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub message: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

/// A stored feedback row as read back for the admin dump.
#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub id: i64,
    pub username: Option<String>,
    pub message: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

/// Initialize the database schema. Content tables are seeded externally;
/// only `feedback` is ever written by the bot.
pub fn init_schema(conn: &Connection) -> StoreResult<()> {
    info!("Initializing database schema...");

    for category in Category::ALL {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY,
                    button_name TEXT NOT NULL,
                    text_info TEXT NOT NULL,
                    file_path TEXT
                )",
                category.table()
            ),
            [],
        )?;
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS faculties (
            id INTEGER PRIMARY KEY,
            name_ru TEXT NOT NULL,
            name_kk TEXT NOT NULL,
            file_path_ru TEXT,
            file_path_kk TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS faqs (
            id INTEGER PRIMARY KEY,
            question_ru TEXT NOT NULL,
            question_kk TEXT NOT NULL,
            answer_ru TEXT NOT NULL,
            answer_kk TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS feedback (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            username TEXT,
            first_name TEXT,
            last_name TEXT,
            message TEXT,
            language TEXT,
            timestamp DATETIME
        )",
        [],
    )?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Look up one informational entry by its exact localized button label.
/// A miss is `Ok(None)`; the caller renders a localized "no information"
/// message instead of failing the turn.
pub fn lookup_info(
    conn: &Connection,
    category: Category,
    label: &str,
) -> StoreResult<Option<ContentEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT button_name, text_info, file_path FROM {} WHERE button_name = ?1",
        category.table()
    ))?;

    let entry = stmt.query_row(params![label], |row| {
        Ok(ContentEntry {
            label: row.get(0)?,
            body: row.get(1)?,
            document_path: row.get(2)?,
        })
    });

    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(TurnError::Store(e)),
    }
}

/// Case-insensitive substring search over labels and bodies of all four
/// content categories. Results keep the fixed category order of
/// [`Category::ALL`] and, within a category, storage order; the scan stops
/// once `limit` hits are collected. An empty keyword matches everything.
pub fn search_all(conn: &Connection, keyword: &str, limit: usize) -> StoreResult<Vec<SearchHit>> {
    let needle = keyword.to_lowercase();
    let mut hits = Vec::new();

    for category in Category::ALL {
        if hits.len() >= limit {
            break;
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT button_name, text_info, file_path FROM {} ORDER BY id",
            category.table()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        for row in rows {
            let (label, body, document_path) = row?;
            if label.to_lowercase().contains(&needle) || body.to_lowercase().contains(&needle) {
                hits.push(SearchHit {
                    category,
                    label,
                    body,
                    document_path,
                });
                if hits.len() >= limit {
                    break;
                }
            }
        }
    }

    Ok(hits)
}

/// Faculty names in storage order, in the requested language.
pub fn list_faculties(conn: &Connection, language: Language) -> StoreResult<Vec<String>> {
    let column = match language {
        Language::Ru => "name_ru",
        Language::Kk => "name_kk",
    };

    let mut stmt = conn.prepare(&format!("SELECT {column} FROM faculties ORDER BY id"))?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(names)
}

/// Resolve a faculty id from its display name in the given language.
pub fn faculty_by_name(
    conn: &Connection,
    language: Language,
    name: &str,
) -> StoreResult<Option<i64>> {
    let column = match language {
        Language::Ru => "name_ru",
        Language::Kk => "name_kk",
    };

    let mut stmt = conn.prepare(&format!("SELECT id FROM faculties WHERE {column} = ?1"))?;
    match stmt.query_row(params![name], |row| row.get(0)) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(TurnError::Store(e)),
    }
}

/// Path of the program document for a faculty in the given language.
pub fn faculty_document(
    conn: &Connection,
    faculty_id: i64,
    language: Language,
) -> StoreResult<Option<String>> {
    let column = match language {
        Language::Ru => "file_path_ru",
        Language::Kk => "file_path_kk",
    };

    let mut stmt = conn.prepare(&format!("SELECT {column} FROM faculties WHERE id = ?1"))?;
    match stmt.query_row(params![faculty_id], |row| row.get::<_, Option<String>>(0)) {
        Ok(path) => Ok(path),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(TurnError::Store(e)),
    }
}

/// All FAQ rows in listing order. The position in this sequence is what
/// the numbered list shows, independent of the row ids.
pub fn list_faqs(conn: &Connection) -> StoreResult<Vec<FaqEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, question_ru, question_kk, answer_ru, answer_kk FROM faqs ORDER BY id",
    )?;
    let faqs = stmt
        .query_map([], |row| {
            Ok(FaqEntry {
                id: row.get(0)?,
                question_ru: row.get(1)?,
                question_kk: row.get(2)?,
                answer_ru: row.get(3)?,
                answer_kk: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(faqs)
}

pub fn faq_by_id(conn: &Connection, id: i64) -> StoreResult<Option<FaqEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, question_ru, question_kk, answer_ru, answer_kk FROM faqs WHERE id = ?1",
    )?;
    let entry = stmt.query_row(params![id], |row| {
        Ok(FaqEntry {
            id: row.get(0)?,
            question_ru: row.get(1)?,
            question_kk: row.get(2)?,
            answer_ru: row.get(3)?,
            answer_kk: row.get(4)?,
        })
    });

    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(TurnError::Store(e)),
    }
}

/// Append one feedback record. Single-shot: a failed append is reported to
/// the user, not retried.
pub fn append_feedback(conn: &Connection, record: &FeedbackRecord) -> StoreResult<()> {
    info!(user_id = record.user_id, "Saving feedback");

    conn.execute(
        "INSERT INTO feedback
         (user_id, username, first_name, last_name, message, language, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.user_id,
            record.username,
            record.first_name,
            record.last_name,
            record.message,
            record.language.code(),
            record.timestamp,
        ],
    )?;

    Ok(())
}

/// Most recent feedback rows, newest first.
pub fn recent_feedback(conn: &Connection, limit: usize) -> StoreResult<Vec<FeedbackRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, message, language, timestamp
         FROM feedback
         ORDER BY timestamp DESC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(FeedbackRow {
                id: row.get(0)?,
                username: row.get(1)?,
                message: row.get(2)?,
                language: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tables() {
        assert_eq!(Category::General.table(), "main_info");
        assert_eq!(Category::Bachelor.table(), "bachelor_info");
        assert_eq!(Category::Master.table(), "master_info");
        assert_eq!(Category::Doctoral.table(), "doctoral_info");
    }

    #[test]
    fn test_category_order_is_fixed() {
        assert_eq!(
            Category::ALL,
            [
                Category::General,
                Category::Bachelor,
                Category::Master,
                Category::Doctoral
            ]
        );
    }
}
