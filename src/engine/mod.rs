pub mod distractors;
pub mod lesson_selector;

pub use lesson_selector::{LessonMode, LessonSelector};
