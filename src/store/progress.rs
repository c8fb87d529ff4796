use anyhow::{Result, bail};

use crate::content::Category;

/// Per-user lesson cursors: the 1-based number of the lesson each user is on.
pub trait ProgressStore {
    /// Saved cursor for `category`; 1 for guests and users without a save.
    fn lesson_cursor(&self, user: Option<&str>, category: Category) -> u32;

    /// Advance the cursor by one and return the new value. Not idempotent:
    /// every call advances again.
    fn increment_lesson_cursor(&self, user: &str, category: Category) -> Result<u32>;
}

/// Used when no persistent store could be opened: every cursor is 1 and
/// progress cannot be saved.
pub struct GuestProgress;

impl ProgressStore for GuestProgress {
    fn lesson_cursor(&self, _user: Option<&str>, _category: Category) -> u32 {
        1
    }

    fn increment_lesson_cursor(&self, user: &str, category: Category) -> Result<u32> {
        bail!("progress storage is unavailable; {category} progress for {user} was not saved")
    }
}
