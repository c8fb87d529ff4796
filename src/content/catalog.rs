use std::collections::HashSet;
use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use icu_normalizer::ComposingNormalizerBorrowed;
use rust_embed::Embed;
use serde::de::DeserializeOwned;

use crate::content::{
    ALL_CATEGORIES, Category, ContentStore, KanaSymbol, KanjiCharacter, LearnableItem, VocabWord,
};
use crate::error::ContentError;
use crate::store::schema::UserContentEntry;

#[derive(Embed)]
#[folder = "assets/content/"]
struct ContentAssets;

/// NFC-normalize text so visually identical titles compare equal.
pub fn normalize(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text.trim())
        .into_owned()
}

/// In-memory content for all four categories: bundled entries first, user
/// additions appended after them. Ids are contiguous per category, starting at 1.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: [Vec<LearnableItem>; 4],
    titles: [HashSet<String>; 4],
    user_entries: Vec<UserContentEntry>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the content embedded in the binary.
    pub fn bundled() -> Result<Self> {
        let mut catalog = Self::empty();
        for category in ALL_CATEGORIES {
            let name = format!("{}.json", category.as_str());
            let items: Vec<LearnableItem> = match category {
                Category::Hiragana | Category::Katakana => load_asset::<KanaSymbol>(&name)?
                    .into_iter()
                    .map(LearnableItem::Kana)
                    .collect(),
                Category::Kanji => load_asset::<KanjiCharacter>(&name)?
                    .into_iter()
                    .map(LearnableItem::Kanji)
                    .collect(),
                Category::Word => load_asset::<VocabWord>(&name)?
                    .into_iter()
                    .map(LearnableItem::Word)
                    .collect(),
            };
            for item in items {
                if let Err(e) = catalog.insert(category, item) {
                    log::warn!("Skipping bundled {category} entry: {e}");
                }
            }
        }
        Ok(catalog)
    }

    /// Build a catalog from explicit items, assigning ids in the given order.
    pub fn from_items(category: Category, items: Vec<LearnableItem>) -> Result<Self, ContentError> {
        let mut catalog = Self::empty();
        for item in items {
            catalog.insert(category, item)?;
        }
        Ok(catalog)
    }

    /// Append previously saved user additions. Entries that clash with
    /// existing titles are skipped and logged.
    pub fn with_user_entries(mut self, entries: Vec<UserContentEntry>) -> Self {
        for entry in entries {
            match self.insert(entry.category, entry.item.clone()) {
                Ok(_) => self.user_entries.push(entry),
                Err(e) => log::warn!("Skipping saved {} entry: {e}", entry.category),
            }
        }
        self
    }

    /// Add a new item, enforcing title uniqueness within its category.
    /// Returns the stored item with its assigned id.
    pub fn add(
        &mut self,
        category: Category,
        item: LearnableItem,
    ) -> Result<LearnableItem, ContentError> {
        let stored = self.insert(category, item)?;
        self.user_entries.push(UserContentEntry {
            category,
            item: stored.clone(),
        });
        log::info!("Added {category} entry '{}' as id {}", stored.title(), stored.id());
        Ok(stored)
    }

    pub fn user_entries(&self) -> &[UserContentEntry] {
        &self.user_entries
    }

    pub fn all(&self, category: Category) -> &[LearnableItem] {
        &self.items[category.index()]
    }

    pub fn contains_title(&self, category: Category, title: &str) -> bool {
        self.titles[category.index()].contains(&normalize(title))
    }

    fn insert(
        &mut self,
        category: Category,
        item: LearnableItem,
    ) -> Result<LearnableItem, ContentError> {
        if !item.fits(category) {
            return Err(ContentError::KindMismatch {
                category,
                item: item.kind_name(),
            });
        }
        let mut item = normalized(item)?;
        let title = item.title().to_string();
        let idx = category.index();
        if self.titles[idx].contains(&title) {
            return Err(ContentError::DuplicateTitle { category, title });
        }
        item.set_id(self.max_id(category) + 1);
        self.titles[idx].insert(title);
        self.items[idx].push(item.clone());
        Ok(item)
    }
}

impl ContentStore for Catalog {
    fn items(&self, category: Category, ids: RangeInclusive<u32>) -> Vec<LearnableItem> {
        self.items[category.index()]
            .iter()
            .filter(|item| ids.contains(&item.id()))
            .cloned()
            .collect()
    }

    fn len(&self, category: Category) -> usize {
        self.items[category.index()].len()
    }

    fn max_id(&self, category: Category) -> u32 {
        self.items[category.index()]
            .last()
            .map(|item| item.id())
            .unwrap_or(0)
    }
}

fn load_asset<T: DeserializeOwned>(name: &str) -> Result<Vec<T>> {
    let Some(file) = ContentAssets::get(name) else {
        return Ok(Vec::new());
    };
    serde_json::from_slice(file.data.as_ref())
        .with_context(|| format!("bundled content {name} is malformed"))
}

fn required(value: &str, field: &'static str) -> Result<String, ContentError> {
    let value = normalize(value);
    if value.is_empty() {
        return Err(ContentError::EmptyField(field));
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalize every text field and reject empty required ones.
fn normalized(item: LearnableItem) -> Result<LearnableItem, ContentError> {
    Ok(match item {
        LearnableItem::Kana(k) => LearnableItem::Kana(KanaSymbol {
            id: k.id,
            title: required(&k.title, "title")?,
            reading: required(&k.reading, "reading")?,
            path_to_image: optional(k.path_to_image),
            path_to_sound: optional(k.path_to_sound),
        }),
        LearnableItem::Kanji(k) => LearnableItem::Kanji(KanjiCharacter {
            id: k.id,
            title: required(&k.title, "title")?,
            onyomi: required(&k.onyomi, "onyomi")?,
            kunyomi: required(&k.kunyomi, "kunyomi")?,
            meaning: required(&k.meaning, "meaning")?,
            examples: k
                .examples
                .iter()
                .map(|e| normalize(e))
                .filter(|e| !e.is_empty())
                .collect(),
            path_to_image: optional(k.path_to_image),
            path_to_sound: optional(k.path_to_sound),
        }),
        LearnableItem::Word(w) => LearnableItem::Word(VocabWord {
            id: w.id,
            title: required(&w.title, "title")?,
            reading: required(&w.reading, "reading")?,
            meaning: required(&w.meaning, "meaning")?,
            path_to_image: optional(w.path_to_image),
            path_to_sound: optional(w.path_to_sound),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kana(title: &str, reading: &str) -> LearnableItem {
        LearnableItem::Kana(KanaSymbol {
            title: title.to_string(),
            reading: reading.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn bundled_content_has_full_lessons_for_every_category() {
        let catalog = Catalog::bundled().unwrap();
        for category in ALL_CATEGORIES {
            assert!(
                catalog.len(category) >= 15,
                "{category} has only {} entries",
                catalog.len(category)
            );
            let ids: Vec<u32> = catalog.all(category).iter().map(|i| i.id()).collect();
            let expected: Vec<u32> = (1..=ids.len() as u32).collect();
            assert_eq!(ids, expected, "{category} ids must be contiguous from 1");
        }
    }

    #[test]
    fn ids_are_assigned_in_insertion_order() {
        let catalog =
            Catalog::from_items(Category::Hiragana, vec![kana("あ", "a"), kana("い", "i")]).unwrap();
        let items = catalog.items(Category::Hiragana, 1..=2);
        assert_eq!(items[0].title(), "あ");
        assert_eq!(items[1].id(), 2);
    }

    #[test]
    fn duplicate_title_is_rejected_after_normalization() {
        let mut catalog = Catalog::from_items(Category::Hiragana, vec![kana("が", "ga")]).unwrap();
        // か + combining dakuten composes to が under NFC
        let err = catalog
            .add(Category::Hiragana, kana("か\u{3099}", "ga"))
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateTitle { .. }));
        assert_eq!(catalog.len(Category::Hiragana), 1);
        assert!(catalog.user_entries().is_empty());
    }

    #[test]
    fn same_title_is_allowed_in_another_category() {
        let mut catalog = Catalog::from_items(Category::Hiragana, vec![kana("あ", "a")]).unwrap();
        assert!(catalog.add(Category::Katakana, kana("あ", "a")).is_ok());
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let mut catalog = Catalog::empty();
        let err = catalog.add(Category::Hiragana, kana("う", "  ")).unwrap_err();
        assert_eq!(err, ContentError::EmptyField("reading"));
    }

    #[test]
    fn kind_must_fit_category() {
        let mut catalog = Catalog::empty();
        let err = catalog.add(Category::Kanji, kana("え", "e")).unwrap_err();
        assert!(matches!(err, ContentError::KindMismatch { .. }));
    }

    #[test]
    fn user_entries_are_appended_after_bundled_ids() {
        let catalog = Catalog::from_items(Category::Hiragana, vec![kana("あ", "a")])
            .unwrap()
            .with_user_entries(vec![
                UserContentEntry {
                    category: Category::Hiragana,
                    item: kana("ゐ", "wi"),
                },
                UserContentEntry {
                    category: Category::Hiragana,
                    item: kana("あ", "a"),
                },
            ]);
        assert_eq!(catalog.len(Category::Hiragana), 2);
        assert_eq!(catalog.max_id(Category::Hiragana), 2);
        assert_eq!(catalog.user_entries().len(), 1);
    }
}
