use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::content::Category;
use crate::error::AccountError;
use crate::session::result::QuizResult;
use crate::store::progress::ProgressStore;
use crate::store::schema::{
    LessonCursors, QuizHistoryData, UserContentData, UserContentEntry, UserRecord, UsersData,
};

const USERS_FILE: &str = "users.json";
const HISTORY_FILE: &str = "quiz_history.json";
const CONTENT_FILE: &str = "content.json";

pub const MAX_HISTORY: usize = 500;

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nihongo");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn media_dir(&self) -> PathBuf {
        self.base_dir.join("media")
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("Ignoring unreadable {}: {e}", path.display());
                    T::default()
                }),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load accounts. Unlike history, a corrupt users file is an error rather
    /// than an empty default, so a later save cannot wipe every account.
    pub fn load_users(&self) -> Result<UsersData> {
        let path = self.file_path(USERS_FILE);
        if !path.exists() {
            return Ok(UsersData::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save_users(&self, data: &UsersData) -> Result<()> {
        self.save(USERS_FILE, data)
    }

    /// Create an account after checking the form fields.
    pub fn register(&self, login: &str, password: &str, repeat: &str) -> Result<UserRecord> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AccountError::EmptyLogin.into());
        }
        if password.is_empty() {
            return Err(AccountError::EmptyPassword.into());
        }
        if password != repeat {
            return Err(AccountError::PasswordMismatch.into());
        }

        let mut users = self.load_users()?;
        if users.find(login).is_some() {
            return Err(AccountError::LoginTaken(login.to_string()).into());
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("failed to hash password: {e}"))?
            .to_string();

        let record = UserRecord {
            login: login.to_string(),
            password_hash,
            cursors: LessonCursors::default(),
            created_at: Utc::now(),
        };
        users.users.push(record.clone());
        self.save_users(&users)?;
        log::info!("Registered user {login}");
        Ok(record)
    }

    pub fn authenticate(&self, login: &str, password: &str) -> Result<UserRecord> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AccountError::EmptyLogin.into());
        }
        let users = self.load_users()?;
        let record = users
            .find(login)
            .ok_or_else(|| AccountError::UnknownUser(login.to_string()))?;

        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| anyhow!("stored hash for {login} is invalid: {e}"))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            log::info!("Rejected password for {login}");
            return Err(AccountError::WrongPassword.into());
        }
        Ok(record.clone())
    }

    pub fn load_history(&self) -> QuizHistoryData {
        self.load(HISTORY_FILE)
    }

    /// Append a finished session, keeping the newest `MAX_HISTORY` records.
    pub fn append_history(&self, result: QuizResult) -> Result<()> {
        let mut history = self.load_history();
        history.results.push(result);
        if history.results.len() > MAX_HISTORY {
            let excess = history.results.len() - MAX_HISTORY;
            history.results.drain(..excess);
        }
        self.save(HISTORY_FILE, &history)
    }

    pub fn load_user_content(&self) -> Vec<UserContentEntry> {
        self.load::<UserContentData>(CONTENT_FILE).entries
    }

    pub fn save_user_content(&self, entries: &[UserContentEntry]) -> Result<()> {
        let data = UserContentData {
            entries: entries.to_vec(),
            ..UserContentData::default()
        };
        self.save(CONTENT_FILE, &data)
    }
}

impl ProgressStore for JsonStore {
    fn lesson_cursor(&self, user: Option<&str>, category: Category) -> u32 {
        let Some(login) = user else {
            return 1;
        };
        match self.load_users() {
            Ok(users) => users
                .find(login)
                .map(|u| u.cursors.get(category).max(1))
                .unwrap_or(1),
            Err(e) => {
                log::error!("Failed to read progress for {login}: {e:#}");
                1
            }
        }
    }

    fn increment_lesson_cursor(&self, user: &str, category: Category) -> Result<u32> {
        let mut users = self.load_users()?;
        let record = users
            .find_mut(user)
            .ok_or_else(|| AccountError::UnknownUser(user.to_string()))?;
        let cursor = record.cursors.get_mut(category);
        *cursor = (*cursor).max(1) + 1;
        let cursor = *cursor;
        self.save_users(&users)?;
        Ok(cursor)
    }
}
