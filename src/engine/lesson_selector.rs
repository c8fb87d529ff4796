use std::ops::RangeInclusive;

use crate::config::QuizRules;
use crate::content::{Category, ContentStore, LearnableItem};
use crate::error::QuizError;
use crate::store::progress::ProgressStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonMode {
    /// The lesson at the user's saved cursor (not yet completed).
    Continue,
    /// A specific 1-based lesson, regardless of progress.
    Numbered(u32),
    /// Every completed lesson: ids from 1 to the end of the lesson before
    /// the cursor. The in-progress lesson is not included.
    AllSoFar,
}

impl LessonMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LessonMode::Continue => "continue",
            LessonMode::Numbered(_) => "numbered",
            LessonMode::AllSoFar => "all-so-far",
        }
    }
}

pub struct LessonSelector {
    rules: QuizRules,
}

impl LessonSelector {
    pub fn new(rules: QuizRules) -> Self {
        Self { rules }
    }

    /// Ids covered by 1-based `lesson` in plain fixed-size buckets, or `None`
    /// when the bucket lies past `u32::MAX`.
    pub fn lesson_range(&self, lesson: u32) -> Option<RangeInclusive<u32>> {
        let size = self.rules.lesson_size.max(1);
        let start = lesson.checked_sub(1)?.checked_mul(size)?.checked_add(1)?;
        let end = lesson.checked_mul(size)?;
        Some(start..=end)
    }

    /// Ids of `lesson` as offered for `category`. A trailing bucket too small
    /// to draw distractors from is folded into the lesson before it, so the
    /// last lesson runs to the highest id. `None` past the last lesson.
    pub fn lesson_ids(
        &self,
        content: &dyn ContentStore,
        category: Category,
        lesson: u32,
    ) -> Option<RangeInclusive<u32>> {
        let last = self.available_lessons(content, category);
        if lesson == 0 || lesson > last {
            return None;
        }
        let range = self.lesson_range(lesson)?;
        if lesson == last {
            Some(*range.start()..=content.max_id(category))
        } else {
            Some(range)
        }
    }

    /// Id range for `mode` given the saved `cursor`, or `None` when the mode
    /// covers nothing (all-so-far before any lesson is completed, or a lesson
    /// past the content).
    pub fn range_for(
        &self,
        content: &dyn ContentStore,
        category: Category,
        mode: LessonMode,
        cursor: u32,
    ) -> Result<Option<RangeInclusive<u32>>, QuizError> {
        let cursor = cursor.max(1);
        match mode {
            LessonMode::Continue => Ok(self.lesson_ids(content, category, cursor)),
            LessonMode::Numbered(0) => Err(QuizError::InvalidLessonNumber(0)),
            LessonMode::Numbered(n) => Ok(self.lesson_ids(content, category, n)),
            LessonMode::AllSoFar if cursor == 1 => Ok(None),
            LessonMode::AllSoFar => {
                let end = match self.lesson_ids(content, category, cursor - 1) {
                    Some(range) => *range.end(),
                    // Every lesson is behind the cursor.
                    None => u32::MAX,
                };
                Ok(Some(1..=end))
            }
        }
    }

    /// Items to study or test for `category` in `mode`, ascending by id.
    pub fn select(
        &self,
        content: &dyn ContentStore,
        progress: &dyn ProgressStore,
        user: Option<&str>,
        category: Category,
        mode: LessonMode,
    ) -> Result<Vec<LearnableItem>, QuizError> {
        let cursor = progress.lesson_cursor(user, category);
        let items = match self.range_for(content, category, mode, cursor)? {
            Some(range) => content.items(category, range),
            None => Vec::new(),
        };
        if items.is_empty() {
            log::info!(
                "No {category} content for {} (cursor {cursor})",
                mode.as_str()
            );
            return Err(QuizError::NoContentAvailable { category });
        }
        Ok(items)
    }

    /// Number of lessons offered for `category`, after folding a short tail.
    pub fn available_lessons(&self, content: &dyn ContentStore, category: Category) -> u32 {
        let size = self.rules.lesson_size.max(1);
        let max_id = content.max_id(category);
        let buckets = max_id.div_ceil(size);
        let tail = max_id - buckets.saturating_sub(1) * size;
        if buckets > 1 && (tail as usize) <= self.rules.distractors {
            buckets - 1
        } else {
            buckets
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use anyhow::Result;

    use super::*;
    use crate::content::KanaSymbol;
    use crate::content::catalog::Catalog;

    struct FixedCursor(RefCell<HashMap<(String, Category), u32>>);

    impl FixedCursor {
        fn new(user: &str, category: Category, cursor: u32) -> Self {
            let mut map = HashMap::new();
            map.insert((user.to_string(), category), cursor);
            Self(RefCell::new(map))
        }
    }

    impl ProgressStore for FixedCursor {
        fn lesson_cursor(&self, user: Option<&str>, category: Category) -> u32 {
            user.and_then(|u| self.0.borrow().get(&(u.to_string(), category)).copied())
                .unwrap_or(1)
        }

        fn increment_lesson_cursor(&self, user: &str, category: Category) -> Result<u32> {
            let mut map = self.0.borrow_mut();
            let cursor = map.entry((user.to_string(), category)).or_insert(1);
            *cursor += 1;
            Ok(*cursor)
        }
    }

    fn catalog(count: u32) -> Catalog {
        let items = (1..=count)
            .map(|i| {
                LearnableItem::Kana(KanaSymbol {
                    title: format!("kana-{i}"),
                    reading: format!("r{i}"),
                    ..Default::default()
                })
            })
            .collect();
        Catalog::from_items(Category::Hiragana, items).unwrap()
    }

    fn ids(items: &[LearnableItem]) -> Vec<u32> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn numbered_mode_returns_exact_bucket() {
        let content = catalog(50);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 1);
        let selector = LessonSelector::new(QuizRules::default());
        for n in 1..=3 {
            let items = selector
                .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::Numbered(n))
                .unwrap();
            let expected: Vec<u32> = ((n - 1) * 15 + 1..=n * 15).collect();
            assert_eq!(ids(&items), expected);
        }
    }

    #[test]
    fn numbered_mode_past_content_is_partial_then_empty() {
        let content = catalog(50);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 1);
        let selector = LessonSelector::new(QuizRules::default());
        let items = selector
            .select(&content, &progress, None, Category::Hiragana, LessonMode::Numbered(4))
            .unwrap();
        assert_eq!(ids(&items), (46..=50).collect::<Vec<_>>());

        let err = selector
            .select(&content, &progress, None, Category::Hiragana, LessonMode::Numbered(5))
            .unwrap_err();
        assert_eq!(
            err,
            QuizError::NoContentAvailable {
                category: Category::Hiragana
            }
        );
    }

    #[test]
    fn lesson_zero_is_invalid() {
        let content = catalog(20);
        let selector = LessonSelector::new(QuizRules::default());
        let err = selector
            .select(&content, &FixedCursor::new("a", Category::Hiragana, 1), None, Category::Hiragana, LessonMode::Numbered(0))
            .unwrap_err();
        assert_eq!(err, QuizError::InvalidLessonNumber(0));
    }

    #[test]
    fn continue_mode_follows_cursor() {
        let content = catalog(60);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 3);
        let selector = LessonSelector::new(QuizRules::default());
        let items = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::Continue)
            .unwrap();
        assert_eq!(ids(&items), (31..=45).collect::<Vec<_>>());

        progress
            .increment_lesson_cursor("yuki", Category::Hiragana)
            .unwrap();
        let items = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::Continue)
            .unwrap();
        assert_eq!(ids(&items), (46..=60).collect::<Vec<_>>());
    }

    #[test]
    fn guest_continue_is_lesson_one() {
        let content = catalog(40);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 3);
        let selector = LessonSelector::new(QuizRules::default());
        let items = selector
            .select(&content, &progress, None, Category::Hiragana, LessonMode::Continue)
            .unwrap();
        assert_eq!(ids(&items), (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn all_so_far_stops_before_current_lesson() {
        let content = catalog(60);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 3);
        let selector = LessonSelector::new(QuizRules::default());
        let items = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::AllSoFar)
            .unwrap();
        assert_eq!(ids(&items), (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn all_so_far_on_first_lesson_has_no_content() {
        let content = catalog(60);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 1);
        let selector = LessonSelector::new(QuizRules::default());
        let result = selector.select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::AllSoFar);
        assert!(matches!(result, Err(QuizError::NoContentAvailable { .. })));
    }

    #[test]
    fn other_categories_are_not_mixed_in() {
        let content = catalog(30);
        let progress = FixedCursor::new("yuki", Category::Katakana, 1);
        let selector = LessonSelector::new(QuizRules::default());
        let result = selector.select(&content, &progress, None, Category::Katakana, LessonMode::Continue);
        assert!(matches!(result, Err(QuizError::NoContentAvailable { .. })));
    }

    #[test]
    fn available_lessons_rounds_up() {
        let selector = LessonSelector::new(QuizRules::default());
        assert_eq!(selector.available_lessons(&catalog(49), Category::Hiragana), 4);
        assert_eq!(selector.available_lessons(&catalog(45), Category::Hiragana), 3);
        assert_eq!(selector.available_lessons(&catalog(3), Category::Hiragana), 1);
        assert_eq!(selector.available_lessons(&Catalog::empty(), Category::Hiragana), 0);
    }

    #[test]
    fn short_tail_folds_into_previous_lesson() {
        let content = catalog(46);
        let progress = FixedCursor::new("yuki", Category::Hiragana, 3);
        let selector = LessonSelector::new(QuizRules::default());
        assert_eq!(selector.available_lessons(&content, Category::Hiragana), 3);

        let items = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::Continue)
            .unwrap();
        assert_eq!(ids(&items), (31..=46).collect::<Vec<_>>());

        let err = selector
            .select(&content, &progress, None, Category::Hiragana, LessonMode::Numbered(4))
            .unwrap_err();
        assert!(matches!(err, QuizError::NoContentAvailable { .. }));

        // Passing the folded lesson moves the cursor past the content.
        progress
            .increment_lesson_cursor("yuki", Category::Hiragana)
            .unwrap();
        let all = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::AllSoFar)
            .unwrap();
        assert_eq!(ids(&all), (1..=46).collect::<Vec<_>>());
        let next = selector.select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::Continue);
        assert!(matches!(next, Err(QuizError::NoContentAvailable { .. })));
    }

    #[test]
    fn huge_lesson_numbers_have_no_content() {
        let content = catalog(50);
        let selector = LessonSelector::new(QuizRules::default());
        assert_eq!(selector.lesson_range(u32::MAX), None);

        let progress = FixedCursor::new("yuki", Category::Hiragana, 1);
        let err = selector
            .select(&content, &progress, None, Category::Hiragana, LessonMode::Numbered(u32::MAX))
            .unwrap_err();
        assert!(matches!(err, QuizError::NoContentAvailable { .. }));

        // A corrupted cursor in users.json behaves the same way.
        let progress = FixedCursor::new("yuki", Category::Hiragana, u32::MAX);
        let err = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::Continue)
            .unwrap_err();
        assert!(matches!(err, QuizError::NoContentAvailable { .. }));
        let all = selector
            .select(&content, &progress, Some("yuki"), Category::Hiragana, LessonMode::AllSoFar)
            .unwrap();
        assert_eq!(ids(&all), (1..=50).collect::<Vec<_>>());
    }
}
