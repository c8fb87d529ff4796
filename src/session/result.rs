use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::Category;
use crate::engine::LessonMode;
use crate::session::quiz::{FinishReport, QuizOutcome, QuizSession};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub category: Category,
    #[serde(default = "default_lesson_mode")]
    pub lesson_mode: String,
    pub outcome: String,
    pub questions: usize,
    pub mistakes: u32,
    pub mistake_budget: i32,
    pub elapsed_secs: f64,
    #[serde(default)]
    pub upgrading: bool,
    #[serde(default)]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
}

fn default_lesson_mode() -> String {
    LessonMode::Continue.as_str().to_string()
}

impl QuizResult {
    pub fn from_session(quiz: &QuizSession, report: &FinishReport, mode: LessonMode) -> Self {
        Self {
            category: quiz.category(),
            lesson_mode: mode.as_str().to_string(),
            outcome: report.outcome.as_str().to_string(),
            questions: quiz.question_count(),
            mistakes: report.mistakes,
            mistake_budget: quiz.initial_budget(),
            elapsed_secs: quiz.elapsed_secs(),
            upgrading: quiz.is_upgrading(),
            user: quiz.user().map(str::to_string),
            timestamp: Utc::now(),
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == QuizOutcome::Passed.as_str()
    }

    /// Share of questions answered without a mistake, 0-100.
    pub fn accuracy(&self) -> f64 {
        if self.questions == 0 {
            return 0.0;
        }
        let clean = self.questions.saturating_sub(self.mistakes as usize);
        clean as f64 / self.questions as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::QuizRules;
    use crate::content::{KanaSymbol, LearnableItem};
    use crate::session::quiz::ProgressUpdate;

    fn items() -> Vec<LearnableItem> {
        (1..=10)
            .map(|i| {
                LearnableItem::Kana(KanaSymbol {
                    id: i,
                    title: format!("t{i}"),
                    reading: format!("r{i}"),
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn captures_session_and_report() {
        let quiz = QuizSession::new(
            Category::Katakana,
            items(),
            false,
            Some("aoi".to_string()),
            QuizRules::default(),
            SmallRng::seed_from_u64(1),
        )
        .unwrap();
        let report = FinishReport {
            outcome: QuizOutcome::Failed,
            mistakes: 4,
            progress: ProgressUpdate::NotRequested,
        };
        let result = QuizResult::from_session(&quiz, &report, LessonMode::Numbered(2));
        assert_eq!(result.category, Category::Katakana);
        assert_eq!(result.lesson_mode, "numbered");
        assert_eq!(result.outcome, "failed");
        assert_eq!(result.questions, 10);
        assert_eq!(result.mistake_budget, 1);
        assert_eq!(result.user.as_deref(), Some("aoi"));
        assert!(!result.passed());
        assert!((result.accuracy() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn old_records_without_optional_fields_still_load() {
        let json = r#"{
            "category": "words",
            "outcome": "passed",
            "questions": 15,
            "mistakes": 1,
            "mistake_budget": 1,
            "elapsed_secs": 31.5,
            "timestamp": "2026-01-02T03:04:05Z"
        }"#;
        let result: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.category, Category::Word);
        assert_eq!(result.lesson_mode, "continue");
        assert!(result.passed());
        assert!(!result.upgrading);
        assert_eq!(result.user, None);
    }
}
