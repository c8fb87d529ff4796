use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::content::Category;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub last_user: Option<String>,
    #[serde(default = "default_lesson_size")]
    pub lesson_size: u32,
    #[serde(default = "default_error_percent")]
    pub error_percent: u32,
    #[serde(default = "default_kana_seconds")]
    pub kana_seconds_per_element: u32,
    #[serde(default = "default_word_seconds")]
    pub word_seconds_per_element: u32,
    #[serde(default = "default_kanji_seconds")]
    pub kanji_seconds_per_element: u32,
}

fn default_theme() -> String {
    "sumi".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_lesson_size() -> u32 {
    15
}
fn default_error_percent() -> u32 {
    10
}
fn default_kana_seconds() -> u32 {
    2
}
fn default_word_seconds() -> u32 {
    4
}
fn default_kanji_seconds() -> u32 {
    7
}

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ru"];

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            language: default_language(),
            last_user: None,
            lesson_size: default_lesson_size(),
            error_percent: default_error_percent(),
            kana_seconds_per_element: default_kana_seconds(),
            word_seconds_per_element: default_word_seconds(),
            kanji_seconds_per_element: default_kanji_seconds(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nihongo")
            .join("config.toml")
    }

    /// Clamp numeric settings into usable ranges and reset unknown languages.
    pub fn validate(&mut self) {
        // Lessons need at least four items for a multiple-choice question.
        self.lesson_size = self.lesson_size.clamp(4, 100);
        self.error_percent = self.error_percent.min(100);
        self.kana_seconds_per_element = self.kana_seconds_per_element.clamp(1, 60);
        self.word_seconds_per_element = self.word_seconds_per_element.clamp(1, 60);
        self.kanji_seconds_per_element = self.kanji_seconds_per_element.clamp(1, 60);
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            self.language = default_language();
        }
    }

    pub fn rules(&self) -> QuizRules {
        QuizRules {
            lesson_size: self.lesson_size,
            error_percent: self.error_percent,
            kana_seconds: self.kana_seconds_per_element,
            word_seconds: self.word_seconds_per_element,
            kanji_seconds: self.kanji_seconds_per_element,
            ..QuizRules::default()
        }
    }
}

/// Fixed parameters of lesson selection and quiz sessions. Built once from
/// the config and handed to the selector and every session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizRules {
    pub lesson_size: u32,
    pub error_percent: u32,
    pub kana_seconds: u32,
    pub word_seconds: u32,
    pub kanji_seconds: u32,
    /// Wrong options shown next to the correct one.
    pub distractors: usize,
    pub tick: Duration,
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            lesson_size: default_lesson_size(),
            error_percent: default_error_percent(),
            kana_seconds: default_kana_seconds(),
            word_seconds: default_word_seconds(),
            kanji_seconds: default_kanji_seconds(),
            distractors: 3,
            tick: Duration::from_secs(1),
        }
    }
}

impl QuizRules {
    pub fn seconds_per_element(&self, category: Category) -> u32 {
        match category {
            Category::Hiragana | Category::Katakana => self.kana_seconds,
            Category::Word => self.word_seconds,
            Category::Kanji => self.kanji_seconds,
        }
    }

    /// Wrong-or-unanswered questions tolerated: floor(count * percent / 100).
    pub fn mistake_budget(&self, element_count: usize) -> i32 {
        (element_count as u64 * self.error_percent as u64 / 100) as i32
    }

    pub fn time_budget(&self, category: Category, element_count: usize) -> u32 {
        self.seconds_per_element(category) * element_count as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.lesson_size, 15);
        assert_eq!(config.error_percent, 10);
        assert_eq!(config.kana_seconds_per_element, 2);
        assert_eq!(config.word_seconds_per_element, 4);
        assert_eq!(config.kanji_seconds_per_element, 7);
        assert!(config.last_user.is_none());
    }

    #[test]
    fn test_config_serde_partial_file_keeps_other_defaults() {
        let toml_str = r#"
theme = "washi"
last_user = "yuki"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "washi");
        assert_eq!(config.last_user.as_deref(), Some("yuki"));
        assert_eq!(config.lesson_size, 15);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.rules(), deserialized.rules());
        assert_eq!(config.language, deserialized.language);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.lesson_size = 2;
        config.error_percent = 250;
        config.kanji_seconds_per_element = 0;
        config.language = "fr".to_string();
        config.validate();
        assert_eq!(config.lesson_size, 4);
        assert_eq!(config.error_percent, 100);
        assert_eq!(config.kanji_seconds_per_element, 1);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_mistake_budget_floors() {
        let rules = QuizRules::default();
        assert_eq!(rules.mistake_budget(15), 1);
        assert_eq!(rules.mistake_budget(20), 2);
        assert_eq!(rules.mistake_budget(29), 2);
        assert_eq!(rules.mistake_budget(9), 0);
        assert_eq!(rules.mistake_budget(4), 0);
    }

    #[test]
    fn test_time_budget_per_category() {
        let rules = QuizRules::default();
        assert_eq!(rules.time_budget(Category::Hiragana, 15), 30);
        assert_eq!(rules.time_budget(Category::Word, 15), 60);
        assert_eq!(rules.time_budget(Category::Kanji, 15), 105);
    }
}
