use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::content::{AnswerField, LearnableItem};
use crate::error::QuizError;

/// Four (by default) answer options for one field of one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceSet {
    pub field: AnswerField,
    pub options: Vec<String>,
    pub correct: usize,
}

impl ChoiceSet {
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct]
    }
}

/// Draw options for `field` of `items[current]`.
///
/// Candidates are the field values of every other item, deduplicated and
/// excluding values equal to the correct answer, so the displayed options are
/// always distinct. `distractors` of them are drawn without replacement, the
/// correct value is added and the set is shuffled.
pub fn draw_choices<R: Rng + ?Sized>(
    items: &[LearnableItem],
    current: usize,
    field: AnswerField,
    distractors: usize,
    rng: &mut R,
) -> Result<ChoiceSet, QuizError> {
    let correct_value = items[current]
        .answer(field)
        .ok_or(QuizError::InsufficientDistractors {
            field,
            available: 0,
            required: distractors,
        })?
        .to_string();

    let mut seen = HashSet::new();
    let candidates: Vec<&str> = items
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != current)
        .filter_map(|(_, item)| item.answer(field))
        .filter(|value| *value != correct_value)
        .filter(|value| seen.insert(*value))
        .collect();

    if candidates.len() < distractors {
        return Err(QuizError::InsufficientDistractors {
            field,
            available: candidates.len(),
            required: distractors,
        });
    }

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, distractors)
        .map(|value| value.to_string())
        .collect();
    options.push(correct_value.clone());
    options.shuffle(rng);

    let correct = options
        .iter()
        .position(|option| *option == correct_value)
        .ok_or(QuizError::InsufficientDistractors {
            field,
            available: candidates.len(),
            required: distractors,
        })?;

    Ok(ChoiceSet {
        field,
        options,
        correct,
    })
}
