use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::content::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Sound,
}

impl MediaKind {
    fn stem(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Sound => "sound",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaStatus {
    /// Item has no media reference.
    Absent,
    Available(PathBuf),
    /// Reference stored but the file cannot be found.
    Missing(String),
}

/// Stores media attached to items under `<base>/<category>/<title>/`.
pub struct MediaLibrary {
    base_dir: PathBuf,
}

impl MediaLibrary {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Copy `source` into the library and return the stored reference,
    /// relative to the library root. The source file is left in place.
    pub fn import(
        &self,
        category: Category,
        title: &str,
        source: &Path,
        kind: MediaKind,
    ) -> Result<String> {
        if !source.is_file() {
            bail!("media file {} does not exist", source.display());
        }
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let relative = PathBuf::from(category.as_str())
            .join(sanitize(title))
            .join(format!("{}.{extension}", kind.stem()));
        let target = self.base_dir.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &target)
            .with_context(|| format!("failed to copy {} into media library", source.display()))?;
        Ok(relative.to_string_lossy().replace('\\', "/"))
    }

    pub fn resolve(&self, reference: Option<&str>) -> MediaStatus {
        let Some(reference) = reference.filter(|r| !r.is_empty()) else {
            return MediaStatus::Absent;
        };
        let path = Path::new(reference);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        if path.is_file() {
            MediaStatus::Available(path)
        } else {
            log::debug!("Media reference {reference} not found");
            MediaStatus::Missing(reference.to_string())
        }
    }
}

/// Directory-safe form of a title; Japanese text is kept as is. Titles that
/// would name the current or parent directory become `_`.
fn sanitize(title: &str) -> String {
    if title.chars().all(|c| c == '.') {
        return "_".to_string();
    }
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_copies_file_and_resolves() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("picture.PNG");
        fs::write(&source, b"png").unwrap();

        let library = MediaLibrary::new(dir.path().join("media"));
        let reference = library
            .import(Category::Kanji, "学", &source, MediaKind::Image)
            .unwrap();
        assert_eq!(reference, "kanji/学/image.png");
        assert!(source.exists(), "source must be kept");
        assert!(matches!(
            library.resolve(Some(&reference)),
            MediaStatus::Available(_)
        ));
    }

    #[test]
    fn unresolvable_reference_degrades_to_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let library = MediaLibrary::new(dir.path().to_path_buf());
        assert_eq!(
            library.resolve(Some("words/猫/sound.wav")),
            MediaStatus::Missing("words/猫/sound.wav".to_string())
        );
        assert_eq!(library.resolve(None), MediaStatus::Absent);
    }

    #[test]
    fn import_of_missing_source_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let library = MediaLibrary::new(dir.path().to_path_buf());
        let result = library.import(
            Category::Word,
            "猫",
            &dir.path().join("nope.wav"),
            MediaKind::Sound,
        );
        assert!(result.is_err());
    }

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize("a/b"), "a_b");
        assert_eq!(sanitize("日本"), "日本");
    }

    #[test]
    fn dot_titles_stay_inside_their_folder() {
        assert_eq!(sanitize(".."), "_");
        assert_eq!(sanitize("."), "_");
        assert_eq!(sanitize(""), "_");
        assert_eq!(sanitize("a.b"), "a.b");

        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("clip.wav");
        fs::write(&source, b"wav").unwrap();
        let library = MediaLibrary::new(dir.path().join("media"));
        let reference = library
            .import(Category::Word, "..", &source, MediaKind::Sound)
            .unwrap();
        assert_eq!(reference, "words/_/sound.wav");
        assert!(dir.path().join("media/words/_/sound.wav").is_file());
        assert!(!dir.path().join("media/sound.wav").exists());
    }
}
