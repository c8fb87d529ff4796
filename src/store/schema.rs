use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{Category, LearnableItem};
use crate::session::result::QuizResult;

pub const SCHEMA_VERSION: u32 = 1;

fn first_lesson() -> u32 {
    1
}

/// Saved lesson number per category, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCursors {
    #[serde(default = "first_lesson")]
    pub hiragana: u32,
    #[serde(default = "first_lesson")]
    pub katakana: u32,
    #[serde(default = "first_lesson")]
    pub kanji: u32,
    #[serde(default = "first_lesson")]
    pub words: u32,
}

impl Default for LessonCursors {
    fn default() -> Self {
        Self {
            hiragana: 1,
            katakana: 1,
            kanji: 1,
            words: 1,
        }
    }
}

impl LessonCursors {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Hiragana => self.hiragana,
            Category::Katakana => self.katakana,
            Category::Kanji => self.kanji,
            Category::Word => self.words,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut u32 {
        match category {
            Category::Hiragana => &mut self.hiragana,
            Category::Katakana => &mut self.katakana,
            Category::Kanji => &mut self.kanji,
            Category::Word => &mut self.words,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    #[serde(default)]
    pub cursors: LessonCursors,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UsersData {
    pub schema_version: u32,
    pub users: Vec<UserRecord>,
}

impl Default for UsersData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            users: Vec::new(),
        }
    }
}

impl UsersData {
    pub fn find(&self, login: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.login == login)
    }

    pub fn find_mut(&mut self, login: &str) -> Option<&mut UserRecord> {
        self.users.iter_mut().find(|u| u.login == login)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizHistoryData {
    pub schema_version: u32,
    pub results: Vec<QuizResult>,
}

impl Default for QuizHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            results: Vec::new(),
        }
    }
}

/// An item added by the user, kept apart from the bundled content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContentEntry {
    pub category: Category,
    pub item: LearnableItem,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserContentData {
    pub schema_version: u32,
    pub entries: Vec<UserContentEntry>,
}

impl Default for UserContentData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: Vec::new(),
        }
    }
}
