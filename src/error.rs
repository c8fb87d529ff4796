use thiserror::Error;

use crate::content::{AnswerField, Category};

/// Errors raised while selecting a lesson or building a quiz session.
///
/// All of these are detected before a session exists, so a caller never
/// holds a half-initialized quiz.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("unknown category '{0}' (expected hiragana, katakana, kanji or words)")]
    InvalidCategory(String),

    #[error("lesson numbers start at 1, got {0}")]
    InvalidLessonNumber(u32),

    #[error("no {category} content available for this lesson")]
    NoContentAvailable { category: Category },

    #[error(
        "not enough distinct {field} values for a question: {available} available, {required} required"
    )]
    InsufficientDistractors {
        field: AnswerField,
        available: usize,
        required: usize,
    },
}

/// Errors raised by content management (adding items to the catalog).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{category} already contains '{title}'")]
    DuplicateTitle { category: Category, title: String },

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("a {item} entry cannot be stored under {category}")]
    KindMismatch {
        category: Category,
        item: &'static str,
    },
}

/// Login and registration failures. Store-level code returns these inside
/// `anyhow::Error`; the login screen downcasts to pick a message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("login must not be empty")]
    EmptyLogin,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("login '{0}' is already taken")]
    LoginTaken(String),

    #[error("unknown login '{0}'")]
    UnknownUser(String),

    #[error("wrong password")]
    WrongPassword,
}
