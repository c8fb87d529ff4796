pub mod catalog;
pub mod media;

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hiragana,
    Katakana,
    Kanji,
    #[serde(rename = "words")]
    Word,
}

pub const ALL_CATEGORIES: [Category; 4] = [
    Category::Hiragana,
    Category::Katakana,
    Category::Kanji,
    Category::Word,
];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hiragana => "hiragana",
            Category::Katakana => "katakana",
            Category::Kanji => "kanji",
            Category::Word => "words",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Hiragana => 0,
            Category::Katakana => 1,
            Category::Kanji => 2,
            Category::Word => 3,
        }
    }

    /// Answer fields quizzed for this category, in display order.
    pub fn quizzed_fields(self) -> &'static [AnswerField] {
        match self {
            Category::Hiragana | Category::Katakana => &[AnswerField::Reading],
            Category::Word => &[AnswerField::Meaning],
            Category::Kanji => &[
                AnswerField::Onyomi,
                AnswerField::Kunyomi,
                AnswerField::Meaning,
            ],
        }
    }

    pub fn is_kana(self) -> bool {
        matches!(self, Category::Hiragana | Category::Katakana)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hiragana" => Ok(Category::Hiragana),
            "katakana" => Ok(Category::Katakana),
            "kanji" => Ok(Category::Kanji),
            "words" | "word" => Ok(Category::Word),
            _ => Err(QuizError::InvalidCategory(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerField {
    Reading,
    Meaning,
    Onyomi,
    Kunyomi,
}

impl AnswerField {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerField::Reading => "reading",
            AnswerField::Meaning => "meaning",
            AnswerField::Onyomi => "onyomi",
            AnswerField::Kunyomi => "kunyomi",
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanaSymbol {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub reading: String,
    #[serde(default)]
    pub path_to_image: Option<String>,
    #[serde(default)]
    pub path_to_sound: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiCharacter {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub onyomi: String,
    pub kunyomi: String,
    pub meaning: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub path_to_image: Option<String>,
    #[serde(default)]
    pub path_to_sound: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabWord {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub reading: String,
    pub meaning: String,
    #[serde(default)]
    pub path_to_image: Option<String>,
    #[serde(default)]
    pub path_to_sound: Option<String>,
}

/// One unit of study content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LearnableItem {
    Kana(KanaSymbol),
    Kanji(KanjiCharacter),
    Word(VocabWord),
}

impl LearnableItem {
    pub fn id(&self) -> u32 {
        match self {
            LearnableItem::Kana(k) => k.id,
            LearnableItem::Kanji(k) => k.id,
            LearnableItem::Word(w) => w.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        match self {
            LearnableItem::Kana(k) => k.id = id,
            LearnableItem::Kanji(k) => k.id = id,
            LearnableItem::Word(w) => w.id = id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            LearnableItem::Kana(k) => &k.title,
            LearnableItem::Kanji(k) => &k.title,
            LearnableItem::Word(w) => &w.title,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            LearnableItem::Kana(_) => "kana",
            LearnableItem::Kanji(_) => "kanji",
            LearnableItem::Word(_) => "word",
        }
    }

    /// Whether this item may be stored under `category`.
    pub fn fits(&self, category: Category) -> bool {
        match self {
            LearnableItem::Kana(_) => category.is_kana(),
            LearnableItem::Kanji(_) => category == Category::Kanji,
            LearnableItem::Word(_) => category == Category::Word,
        }
    }

    /// Value of an answer field, or `None` if this variant has no such field.
    pub fn answer(&self, field: AnswerField) -> Option<&str> {
        match (self, field) {
            (LearnableItem::Kana(k), AnswerField::Reading) => Some(&k.reading),
            (LearnableItem::Word(w), AnswerField::Reading) => Some(&w.reading),
            (LearnableItem::Word(w), AnswerField::Meaning) => Some(&w.meaning),
            (LearnableItem::Kanji(k), AnswerField::Onyomi) => Some(&k.onyomi),
            (LearnableItem::Kanji(k), AnswerField::Kunyomi) => Some(&k.kunyomi),
            (LearnableItem::Kanji(k), AnswerField::Meaning) => Some(&k.meaning),
            _ => None,
        }
    }

    /// Text displayed under the prompt without being quizzed.
    pub fn hint(&self) -> Option<&str> {
        match self {
            LearnableItem::Word(w) => Some(&w.reading),
            _ => None,
        }
    }

    pub fn path_to_image(&self) -> Option<&str> {
        match self {
            LearnableItem::Kana(k) => k.path_to_image.as_deref(),
            LearnableItem::Kanji(k) => k.path_to_image.as_deref(),
            LearnableItem::Word(w) => w.path_to_image.as_deref(),
        }
    }

    pub fn path_to_sound(&self) -> Option<&str> {
        match self {
            LearnableItem::Kana(k) => k.path_to_sound.as_deref(),
            LearnableItem::Kanji(k) => k.path_to_sound.as_deref(),
            LearnableItem::Word(w) => w.path_to_sound.as_deref(),
        }
    }

    pub fn examples(&self) -> &[String] {
        match self {
            LearnableItem::Kanji(k) => &k.examples,
            _ => &[],
        }
    }
}

/// Read-only source of study content, queried by category and id range.
pub trait ContentStore {
    /// Items of `category` whose id lies in `ids`, ascending by id.
    fn items(&self, category: Category, ids: RangeInclusive<u32>) -> Vec<LearnableItem>;

    fn len(&self, category: Category) -> usize;

    fn max_id(&self, category: Category) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tags_round_trip_through_from_str() {
        for category in ALL_CATEGORIES {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_tag_is_rejected() {
        let err = "romaji".parse::<Category>().unwrap_err();
        assert_eq!(err, QuizError::InvalidCategory("romaji".to_string()));
    }

    #[test]
    fn kanji_quizzes_three_fields() {
        assert_eq!(Category::Kanji.quizzed_fields().len(), 3);
        assert_eq!(Category::Word.quizzed_fields(), &[AnswerField::Meaning]);
        assert_eq!(Category::Katakana.quizzed_fields(), &[AnswerField::Reading]);
    }

    #[test]
    fn word_shows_reading_as_hint_and_quizzes_meaning() {
        let item = LearnableItem::Word(VocabWord {
            id: 1,
            title: "学校".to_string(),
            reading: "がっこう".to_string(),
            meaning: "school".to_string(),
            ..Default::default()
        });
        assert_eq!(item.hint(), Some("がっこう"));
        assert_eq!(item.answer(AnswerField::Meaning), Some("school"));
        assert_eq!(item.answer(AnswerField::Onyomi), None);
    }

    #[test]
    fn category_serializes_with_stable_tags() {
        let json = serde_json::to_string(&Category::Word).unwrap();
        assert_eq!(json, "\"words\"");
        let back: Category = serde_json::from_str("\"hiragana\"").unwrap();
        assert_eq!(back, Category::Hiragana);
    }
}
