use crate::content::{Category, LearnableItem};
use crate::error::QuizError;

/// Card-by-card browsing of one lesson before taking its test.
pub struct StudySession {
    category: Category,
    items: Vec<LearnableItem>,
    index: usize,
}

impl StudySession {
    pub fn new(category: Category, items: Vec<LearnableItem>) -> Result<Self, QuizError> {
        if items.is_empty() {
            return Err(QuizError::NoContentAvailable { category });
        }
        Ok(Self {
            category,
            items,
            index: 0,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current(&self) -> &LearnableItem {
        &self.items[self.index]
    }

    /// Step forward; returns false on the last card.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// 1-based position and total.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.items.len())
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.items.len()
    }

    pub fn items(&self) -> &[LearnableItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::VocabWord;

    fn words(count: u32) -> Vec<LearnableItem> {
        (1..=count)
            .map(|i| {
                LearnableItem::Word(VocabWord {
                    id: i,
                    title: format!("w{i}"),
                    reading: format!("r{i}"),
                    meaning: format!("m{i}"),
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn walks_cards_in_order_and_stops_at_edges() {
        let mut study = StudySession::new(Category::Word, words(3)).unwrap();
        assert!(!study.prev());
        assert_eq!(study.position(), (1, 3));
        assert!(study.next());
        assert!(study.next());
        assert!(study.is_last());
        assert_eq!(study.current().id(), 3);
        assert!(!study.next());
        assert!(study.prev());
        assert_eq!(study.position(), (2, 3));
    }

    #[test]
    fn empty_lesson_cannot_be_studied() {
        assert!(matches!(
            StudySession::new(Category::Kanji, Vec::new()),
            Err(QuizError::NoContentAvailable { .. })
        ));
    }
}
