use rust_i18n::t;

use crate::app::CategoryAction;
use crate::content::{AnswerField, Category};
use crate::error::{AccountError, QuizError};
use crate::session::quiz::{ProgressUpdate, QuizOutcome};

pub fn category_label(category: Category) -> String {
    match category {
        Category::Hiragana => t!("category.hiragana"),
        Category::Katakana => t!("category.katakana"),
        Category::Kanji => t!("category.kanji"),
        Category::Word => t!("category.words"),
    }
    .to_string()
}

pub fn category_description(category: Category) -> String {
    match category {
        Category::Hiragana => t!("category.hiragana_desc"),
        Category::Katakana => t!("category.katakana_desc"),
        Category::Kanji => t!("category.kanji_desc"),
        Category::Word => t!("category.words_desc"),
    }
    .to_string()
}

pub fn action_text(action: CategoryAction) -> (String, String) {
    let (label, description) = match action {
        CategoryAction::StudyCurrent => (t!("category_menu.study"), t!("category_menu.study_desc")),
        CategoryAction::TestCurrent => (t!("category_menu.test"), t!("category_menu.test_desc")),
        CategoryAction::PickLesson => (t!("category_menu.pick"), t!("category_menu.pick_desc")),
        CategoryAction::TestAllLearned => (t!("category_menu.test_all"), t!("category_menu.test_all_desc")),
        CategoryAction::ViewLearned => (t!("category_menu.learned"), t!("category_menu.learned_desc")),
    };
    (label.to_string(), description.to_string())
}

pub fn describe_quiz_error(err: &QuizError) -> String {
    match err {
        QuizError::InvalidCategory(name) => t!("errors.invalid_category", name = name),
        QuizError::InvalidLessonNumber(n) => t!("errors.invalid_lesson", lesson = n),
        QuizError::NoContentAvailable { category } => {
            t!("errors.no_content", category = category_label(*category))
        }
        QuizError::InsufficientDistractors { field, .. } => {
            t!("errors.insufficient_distractors", field = field_label(*field))
        }
    }
    .to_string()
}

pub fn describe_account_error(err: &AccountError) -> String {
    match err {
        AccountError::EmptyLogin => t!("login.empty_login"),
        AccountError::EmptyPassword => t!("login.empty_password"),
        AccountError::PasswordMismatch => t!("login.password_mismatch"),
        AccountError::LoginTaken(login) => t!("login.login_taken", login = login),
        AccountError::UnknownUser(login) => t!("login.unknown_user", login = login),
        AccountError::WrongPassword => t!("login.wrong_password"),
    }
    .to_string()
}

pub fn field_label(field: AnswerField) -> String {
    match field {
        AnswerField::Reading => t!("field.reading"),
        AnswerField::Meaning => t!("field.meaning"),
        AnswerField::Onyomi => t!("field.onyomi"),
        AnswerField::Kunyomi => t!("field.kunyomi"),
    }
    .to_string()
}

pub fn outcome_label(outcome: QuizOutcome) -> String {
    match outcome {
        QuizOutcome::Passed => t!("result.passed"),
        QuizOutcome::Failed => t!("result.failed"),
        QuizOutcome::TimedOut => t!("result.timed_out"),
    }
    .to_string()
}

/// History stores the outcome tag; map it back for display.
pub fn outcome_tag_label(tag: &str) -> String {
    match tag {
        "passed" => outcome_label(QuizOutcome::Passed),
        "failed" => outcome_label(QuizOutcome::Failed),
        "timed-out" => outcome_label(QuizOutcome::TimedOut),
        other => other.to_string(),
    }
}

pub fn progress_label(update: &ProgressUpdate) -> Option<String> {
    match update {
        ProgressUpdate::NotRequested => None,
        ProgressUpdate::NoUser => Some(t!("result.guest_not_saved").to_string()),
        ProgressUpdate::Saved { cursor } => Some(t!("result.unlocked", lesson = cursor).to_string()),
        ProgressUpdate::Failed(reason) => Some(t!("result.save_failed", reason = reason).to_string()),
    }
}
