use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rust_i18n::t;

use crate::config::Config;
use crate::content::catalog::Catalog;
use crate::content::media::MediaLibrary;
use crate::content::{ALL_CATEGORIES, Category, ContentStore, LearnableItem};
use crate::engine::{LessonMode, LessonSelector};
use crate::error::AccountError;
use crate::session::quiz::{Advance, ClickResult, FinishReport, QuizOutcome, QuizSession};
use crate::session::result::QuizResult;
use crate::session::study::StudySession;
use crate::session::timer::{TimerEvent, TimerSink};
use crate::store::json_store::{JsonStore, MAX_HISTORY};
use crate::store::progress::{GuestProgress, ProgressStore};
use crate::ui::components::menu::{Menu, MenuItem};
use crate::ui::labels::{
    action_text, category_description, category_label, describe_account_error, describe_quiz_error,
};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

/// Answer keys per option group. Kanji questions use all three rows.
pub const GROUP_KEYS: [[char; 4]; 3] = [
    ['1', '2', '3', '4'],
    ['q', 'w', 'e', 'r'],
    ['a', 's', 'd', 'f'],
];

/// Map an answer key to (group, option).
pub fn choice_for_key(ch: char) -> Option<(usize, usize)> {
    let ch = ch.to_ascii_lowercase();
    GROUP_KEYS
        .iter()
        .enumerate()
        .find_map(|(group, keys)| keys.iter().position(|k| *k == ch).map(|opt| (group, opt)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Login,
    Menu,
    CategoryMenu,
    LessonPicker,
    Study,
    Quiz,
    QuizResult,
    Learned,
    History,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Login,
    Password,
    Repeat,
}

pub struct LoginForm {
    pub login: LineInput,
    pub password: LineInput,
    pub repeat: LineInput,
    pub focus: LoginField,
    pub registering: bool,
    pub message: Option<String>,
}

impl LoginForm {
    pub fn new(last_user: Option<&str>) -> Self {
        let login = LineInput::new(last_user.unwrap_or_default());
        let focus = if last_user.is_some() {
            LoginField::Password
        } else {
            LoginField::Login
        };
        Self {
            login,
            password: LineInput::masked(),
            repeat: LineInput::masked(),
            focus,
            registering: false,
            message: None,
        }
    }

    pub fn fields(&self) -> &'static [LoginField] {
        if self.registering {
            &[LoginField::Login, LoginField::Password, LoginField::Repeat]
        } else {
            &[LoginField::Login, LoginField::Password]
        }
    }

    pub fn focused_mut(&mut self) -> &mut LineInput {
        match self.focus {
            LoginField::Login => &mut self.login,
            LoginField::Password => &mut self.password,
            LoginField::Repeat => &mut self.repeat,
        }
    }

    pub fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % fields.len()
        } else {
            (idx + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    pub fn toggle_mode(&mut self) {
        self.registering = !self.registering;
        self.password.clear();
        self.repeat.clear();
        self.message = None;
        if !self.fields().contains(&self.focus) {
            self.focus = LoginField::Password;
        }
    }
}

/// Category menu entries, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryAction {
    StudyCurrent,
    TestCurrent,
    PickLesson,
    TestAllLearned,
    ViewLearned,
}

pub const CATEGORY_ACTIONS: [CategoryAction; 5] = [
    CategoryAction::StudyCurrent,
    CategoryAction::TestCurrent,
    CategoryAction::PickLesson,
    CategoryAction::TestAllLearned,
    CategoryAction::ViewLearned,
];

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub category_menu: Menu<'static>,
    pub login: LoginForm,
    pub catalog: Catalog,
    pub store: Option<JsonStore>,
    pub media: Option<MediaLibrary>,
    pub user: Option<String>,
    pub category: Category,
    pub lesson_mode: LessonMode,
    pub picker_lesson: u32,
    pub study: Option<StudySession>,
    pub quiz: Option<QuizSession>,
    pub last_report: Option<FinishReport>,
    pub last_result: Option<QuizResult>,
    pub history: Vec<QuizResult>,
    pub history_selected: usize,
    pub learned: Vec<LearnableItem>,
    pub learned_scroll: usize,
    pub message: Option<String>,
    pub should_quit: bool,
    timer_sink: Option<TimerSink>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = match JsonStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::error!("Data directory unavailable, running without saves: {e:#}");
                None
            }
        };
        let catalog = match Catalog::bundled() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load bundled content: {e:#}");
                Catalog::empty()
            }
        };
        let catalog = match store.as_ref() {
            Some(s) => catalog.with_user_entries(s.load_user_content()),
            None => catalog,
        };
        Self::with_parts(config, catalog, store, SmallRng::from_entropy())
    }

    pub fn with_parts(
        config: Config,
        catalog: Catalog,
        store: Option<JsonStore>,
        rng: SmallRng,
    ) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let media = store.as_ref().map(|s| MediaLibrary::new(s.media_dir()));
        let history = store
            .as_ref()
            .map(|s| s.load_history().results)
            .unwrap_or_default();
        let login = LoginForm::new(config.last_user.as_deref());

        let mut app = Self {
            screen: AppScreen::Login,
            config,
            theme,
            menu: Menu::new(theme),
            category_menu: Menu::new(theme),
            login,
            catalog,
            store,
            media,
            user: None,
            category: Category::Hiragana,
            lesson_mode: LessonMode::Continue,
            picker_lesson: 1,
            study: None,
            quiz: None,
            last_report: None,
            last_result: None,
            history,
            history_selected: 0,
            learned: Vec::new(),
            learned_scroll: 0,
            message: None,
            should_quit: false,
            timer_sink: None,
            rng,
        };
        app.rebuild_menus();
        app
    }

    /// Where quiz countdowns post their events. Without a sink quizzes run
    /// untimed.
    pub fn set_timer_sink(&mut self, sink: TimerSink) {
        self.timer_sink = Some(sink);
    }

    pub fn progress(&self) -> &dyn ProgressStore {
        progress_of(&self.store)
    }

    fn selector(&self) -> LessonSelector {
        LessonSelector::new(self.config.rules())
    }

    /// Rebuild menu labels, e.g. after the language changed.
    pub fn rebuild_menus(&mut self) {
        self.menu.title = t!("app.title").to_string();
        self.menu.subtitle = match &self.user {
            Some(user) => t!("menu.signed_in", user = user).to_string(),
            None => t!("menu.guest").to_string(),
        };
        let mut items: Vec<MenuItem> = ALL_CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, c)| MenuItem {
                key: (i + 1).to_string(),
                label: category_label(*c),
                description: category_description(*c),
            })
            .collect();
        items.push(MenuItem {
            key: "h".to_string(),
            label: t!("menu.history").to_string(),
            description: t!("menu.history_desc").to_string(),
        });
        items.push(MenuItem {
            key: "l".to_string(),
            label: if self.user.is_some() {
                t!("menu.log_out").to_string()
            } else {
                t!("menu.log_in").to_string()
            },
            description: t!("menu.account_desc").to_string(),
        });
        self.menu.items = items;
        self.menu.selected = self.menu.selected.min(self.menu.items.len() - 1);

        let cursor = self.current_cursor();
        self.category_menu.title = category_label(self.category);
        self.category_menu.subtitle = t!("category_menu.lesson", lesson = cursor).to_string();
        self.category_menu.items = CATEGORY_ACTIONS
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let (label, description) = action_text(*action);
                MenuItem {
                    key: (i + 1).to_string(),
                    label,
                    description,
                }
            })
            .collect();
        self.category_menu.selected = self
            .category_menu
            .selected
            .min(self.category_menu.items.len() - 1);
    }

    pub fn submit_login(&mut self) {
        let Some(store) = self.store.as_ref() else {
            self.login.message = Some(t!("login.storage_unavailable").to_string());
            return;
        };
        let login = self.login.login.value().to_string();
        let password = self.login.password.value().to_string();
        let result = if self.login.registering {
            store.register(&login, &password, self.login.repeat.value())
        } else {
            store.authenticate(&login, &password)
        };

        match result {
            Ok(record) => {
                log::info!("{} signed in", record.login);
                self.config.last_user = Some(record.login.clone());
                self.user = Some(record.login);
                self.login = LoginForm::new(self.user.as_deref());
                self.go_to_menu();
            }
            Err(e) => {
                self.login.message = Some(match e.downcast_ref::<AccountError>() {
                    Some(account) => describe_account_error(account),
                    None => {
                        log::error!("Account storage failed: {e:#}");
                        t!("login.storage_failed").to_string()
                    }
                });
                self.login.password.clear();
                self.login.repeat.clear();
            }
        }
    }

    /// Feed a key to the focused login field.
    pub fn login_input(&mut self, key: crossterm::event::KeyEvent) {
        match self.login.focused_mut().handle(key) {
            InputResult::Submit => {
                let last = self.login.fields().last().copied();
                if Some(self.login.focus) == last {
                    self.submit_login();
                } else {
                    self.login.move_focus(true);
                }
            }
            InputResult::Cancel => self.continue_as_guest(),
            InputResult::FocusNext => self.login.move_focus(true),
            InputResult::FocusPrev => self.login.move_focus(false),
            InputResult::Continue => {}
        }
    }

    pub fn continue_as_guest(&mut self) {
        self.user = None;
        self.go_to_menu();
    }

    pub fn log_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("{user} signed out");
        }
        self.login = LoginForm::new(self.config.last_user.as_deref());
        self.screen = AppScreen::Login;
    }

    pub fn go_to_menu(&mut self) {
        self.drop_quiz();
        self.study = None;
        self.message = None;
        self.rebuild_menus();
        self.screen = AppScreen::Menu;
    }

    pub fn open_category(&mut self, category: Category) {
        self.drop_quiz();
        self.study = None;
        self.category = category;
        self.message = None;
        self.category_menu.selected = 0;
        self.rebuild_menus();
        self.screen = AppScreen::CategoryMenu;
    }

    pub fn back_to_category(&mut self) {
        self.drop_quiz();
        self.study = None;
        self.rebuild_menus();
        self.screen = AppScreen::CategoryMenu;
    }

    pub fn run_category_action(&mut self, action: CategoryAction) {
        self.message = None;
        match action {
            CategoryAction::StudyCurrent => self.start_study(LessonMode::Continue),
            CategoryAction::TestCurrent => self.start_quiz(LessonMode::Continue),
            CategoryAction::PickLesson => self.open_lesson_picker(),
            CategoryAction::TestAllLearned => self.start_quiz(LessonMode::AllSoFar),
            CategoryAction::ViewLearned => self.open_learned(),
        }
    }

    pub fn current_cursor(&self) -> u32 {
        self.progress()
            .lesson_cursor(self.user.as_deref(), self.category)
    }

    pub fn available_lessons(&self) -> u32 {
        self.selector().available_lessons(&self.catalog, self.category)
    }

    /// Highest lesson the picker offers: reached lessons that have content.
    pub fn max_pickable_lesson(&self) -> u32 {
        self.current_cursor().min(self.available_lessons()).max(1)
    }

    pub fn open_lesson_picker(&mut self) {
        self.picker_lesson = self.picker_lesson.clamp(1, self.max_pickable_lesson());
        self.screen = AppScreen::LessonPicker;
    }

    /// Items making up `lesson` of the open category.
    pub fn lesson_items(&self, lesson: u32) -> Vec<LearnableItem> {
        self.selector()
            .lesson_ids(&self.catalog, self.category, lesson)
            .map(|ids| self.catalog.items(self.category, ids))
            .unwrap_or_default()
    }

    pub fn picker_step(&mut self, delta: i32) {
        let max = self.max_pickable_lesson() as i64;
        let next = (self.picker_lesson as i64 + delta as i64).clamp(1, max);
        self.picker_lesson = next as u32;
    }

    fn select(&mut self, mode: LessonMode) -> Option<Vec<LearnableItem>> {
        let selected = self.selector().select(
            &self.catalog,
            progress_of(&self.store),
            self.user.as_deref(),
            self.category,
            mode,
        );
        match selected {
            Ok(items) => Some(items),
            Err(e) => {
                self.message = Some(describe_quiz_error(&e));
                None
            }
        }
    }

    pub fn start_study(&mut self, mode: LessonMode) {
        let Some(items) = self.select(mode) else {
            return;
        };
        match StudySession::new(self.category, items) {
            Ok(study) => {
                self.lesson_mode = mode;
                self.study = Some(study);
                self.screen = AppScreen::Study;
            }
            Err(e) => self.message = Some(describe_quiz_error(&e)),
        }
    }

    /// Start a test. Only a logged-in user's current lesson can unlock the
    /// next one; numbered lessons and "everything learned" are reviews.
    pub fn start_quiz(&mut self, mode: LessonMode) {
        let Some(items) = self.select(mode) else {
            return;
        };
        let upgrading = mode == LessonMode::Continue && self.user.is_some();
        let rng = SmallRng::seed_from_u64(self.rng.next_u64());
        match QuizSession::new(
            self.category,
            items,
            upgrading,
            self.user.clone(),
            self.config.rules(),
            rng,
        ) {
            Ok(mut quiz) => {
                if let Some(sink) = self.timer_sink.clone() {
                    quiz.start_timer(sink);
                }
                self.drop_quiz();
                self.study = None;
                self.lesson_mode = mode;
                self.quiz = Some(quiz);
                self.last_report = None;
                self.screen = AppScreen::Quiz;
            }
            Err(e) => {
                log::warn!("Cannot start {} quiz: {e}", self.category);
                if self.screen == AppScreen::Study {
                    self.back_to_category();
                }
                self.message = Some(describe_quiz_error(&e));
            }
        }
    }

    /// Test the lesson being studied.
    pub fn quiz_from_study(&mut self) {
        if self.study.is_some() {
            self.start_quiz(self.lesson_mode);
        }
    }

    pub fn answer(&mut self, group: usize, option: usize) -> ClickResult {
        let Some(quiz) = self.quiz.as_mut() else {
            return ClickResult::Ignored;
        };
        let result = quiz.click(group, option);
        if let Some(report) = quiz.report().cloned()
            && self.screen == AppScreen::Quiz
            && self.last_report.is_none()
        {
            // The click found the countdown already expired.
            self.finish_quiz(report);
        }
        result
    }

    pub fn continue_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if let Advance::Finished(report) = quiz.advance(progress_of(&self.store)) {
            self.finish_quiz(report);
        }
    }

    pub fn handle_timer(&mut self, event: TimerEvent) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if let Some(report) = quiz.handle_timer(event) {
            self.finish_quiz(report);
        }
    }

    fn finish_quiz(&mut self, report: FinishReport) {
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let result = QuizResult::from_session(quiz, &report, self.lesson_mode);
        if let Some(store) = self.store.as_ref()
            && let Err(e) = store.append_history(result.clone())
        {
            log::error!("Failed to save quiz history: {e:#}");
        }
        self.history.push(result.clone());
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
        self.last_result = Some(result);
        self.last_report = Some(report);
        self.rebuild_menus();
        self.screen = AppScreen::QuizResult;
    }

    /// Run the same test again from scratch.
    pub fn retry_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        match quiz.reset() {
            Ok(()) => {
                self.last_report = None;
                self.screen = AppScreen::Quiz;
            }
            Err(e) => self.message = Some(describe_quiz_error(&e)),
        }
    }

    /// After a passed upgrading test: study the newly unlocked lesson.
    pub fn next_lesson(&mut self) {
        let passed_upgrade = self
            .last_report
            .as_ref()
            .is_some_and(|r| r.outcome == QuizOutcome::Passed)
            && self.quiz.as_ref().is_some_and(QuizSession::is_upgrading);
        if passed_upgrade {
            self.drop_quiz();
            self.start_study(LessonMode::Continue);
            if self.screen != AppScreen::Study {
                self.screen = AppScreen::CategoryMenu;
            }
        }
    }

    /// Leave a running test without recording it.
    pub fn abandon_quiz(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            log::info!("Abandoned {} quiz session {}", quiz.category(), quiz.id());
        }
        self.back_to_category();
    }

    fn drop_quiz(&mut self) {
        if let Some(mut quiz) = self.quiz.take() {
            quiz.abandon();
        }
    }

    pub fn open_learned(&mut self) {
        let cursor = self.current_cursor();
        let selected = self
            .selector()
            .range_for(&self.catalog, self.category, LessonMode::AllSoFar, cursor);
        self.learned = match selected {
            Ok(Some(range)) => self.catalog.items(self.category, range),
            _ => Vec::new(),
        };
        self.learned_scroll = 0;
        self.screen = AppScreen::Learned;
    }

    pub fn open_history(&mut self) {
        if let Some(store) = self.store.as_ref() {
            self.history = store.load_history().results;
        }
        self.history_selected = 0;
        self.screen = AppScreen::History;
    }

    pub fn scroll(value: &mut usize, delta: i32, len: usize) {
        if len == 0 {
            *value = 0;
            return;
        }
        let next = (*value as i64 + delta as i64).clamp(0, len as i64 - 1);
        *value = next as usize;
    }
}

fn progress_of(store: &Option<JsonStore>) -> &dyn ProgressStore {
    match store {
        Some(store) => store,
        None => &GuestProgress,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::content::VocabWord;

    fn word_catalog(count: u32) -> Catalog {
        let items = (1..=count)
            .map(|i| {
                LearnableItem::Word(VocabWord {
                    title: format!("語{i}"),
                    reading: format!("ご{i}"),
                    meaning: format!("word {i}"),
                    ..Default::default()
                })
            })
            .collect();
        Catalog::from_items(Category::Word, items).unwrap()
    }

    fn test_app(dir: &TempDir, count: u32) -> App {
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        App::with_parts(
            Config::default(),
            word_catalog(count),
            Some(store),
            SmallRng::seed_from_u64(5),
        )
    }

    fn answer_everything(app: &mut App) {
        while app.screen == AppScreen::Quiz {
            let correct = app.quiz.as_ref().unwrap().current_question().unwrap().groups[0]
                .choices
                .correct;
            app.answer(0, correct);
            app.continue_quiz();
        }
    }

    #[test]
    fn answer_keys_map_to_groups() {
        assert_eq!(choice_for_key('1'), Some((0, 0)));
        assert_eq!(choice_for_key('4'), Some((0, 3)));
        assert_eq!(choice_for_key('W'), Some((1, 1)));
        assert_eq!(choice_for_key('f'), Some((2, 3)));
        assert_eq!(choice_for_key('z'), None);
    }

    #[test]
    fn guest_test_of_current_lesson_is_not_upgrading() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, 30);
        app.continue_as_guest();
        app.open_category(Category::Word);
        app.run_category_action(CategoryAction::TestCurrent);
        assert_eq!(app.screen, AppScreen::Quiz);
        assert!(!app.quiz.as_ref().unwrap().is_upgrading());
    }

    #[test]
    fn logged_in_pass_advances_and_history_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, 30);
        app.login.toggle_mode();
        app.login.focus = LoginField::Login;
        for ch in "mei".chars() {
            app.login.login.handle(crossterm::event::KeyEvent::from(
                crossterm::event::KeyCode::Char(ch),
            ));
        }
        for field in [&mut app.login.password, &mut app.login.repeat] {
            for ch in "pw".chars() {
                field.handle(crossterm::event::KeyEvent::from(
                    crossterm::event::KeyCode::Char(ch),
                ));
            }
        }
        app.submit_login();
        assert_eq!(app.user.as_deref(), Some("mei"));
        assert_eq!(app.screen, AppScreen::Menu);

        app.open_category(Category::Word);
        assert_eq!(app.current_cursor(), 1);
        app.run_category_action(CategoryAction::TestCurrent);
        assert!(app.quiz.as_ref().unwrap().is_upgrading());
        answer_everything(&mut app);

        assert_eq!(app.screen, AppScreen::QuizResult);
        assert!(app.last_result.as_ref().unwrap().passed());
        assert_eq!(app.current_cursor(), 2);
        assert_eq!(app.store.as_ref().unwrap().load_history().results.len(), 1);

        app.next_lesson();
        assert_eq!(app.screen, AppScreen::Study);
        assert_eq!(app.study.as_ref().unwrap().current().id(), 16);
    }

    #[test]
    fn numbered_review_never_moves_cursor() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, 30);
        let store = app.store.as_ref().unwrap();
        store.register("mei", "pw", "pw").unwrap();
        store.increment_lesson_cursor("mei", Category::Word).unwrap();
        app.user = Some("mei".to_string());
        app.open_category(Category::Word);
        app.open_lesson_picker();
        assert_eq!(app.max_pickable_lesson(), 2);
        app.picker_step(5);
        assert_eq!(app.picker_lesson, 2);
        app.picker_step(-1);
        app.start_quiz(LessonMode::Numbered(app.picker_lesson));
        assert!(!app.quiz.as_ref().unwrap().is_upgrading());
        answer_everything(&mut app);
        assert_eq!(app.current_cursor(), 2);
    }

    #[test]
    fn all_learned_on_first_lesson_reports_no_content() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, 30);
        app.continue_as_guest();
        app.open_category(Category::Word);
        app.run_category_action(CategoryAction::TestAllLearned);
        assert_eq!(app.screen, AppScreen::CategoryMenu);
        assert!(app.quiz.is_none());
        assert!(app.message.is_some());
    }

    #[test]
    fn retry_resets_the_same_session() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, 15);
        app.continue_as_guest();
        app.open_category(Category::Word);
        app.start_quiz(LessonMode::Continue);
        for _ in 0..15 {
            app.continue_quiz();
        }
        assert_eq!(app.last_result.as_ref().unwrap().outcome, "failed");
        app.retry_quiz();
        assert_eq!(app.screen, AppScreen::Quiz);
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.mistakes(), 0);
        assert_eq!(quiz.current_index(), Some(0));
    }

    #[test]
    fn wrong_login_keeps_form_open() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, 15);
        app.store.as_ref().unwrap().register("mei", "pw", "pw").unwrap();
        app.login = LoginForm::new(Some("mei"));
        for ch in "nope".chars() {
            app.login.password.handle(crossterm::event::KeyEvent::from(
                crossterm::event::KeyCode::Char(ch),
            ));
        }
        app.submit_login();
        assert_eq!(app.screen, AppScreen::Login);
        assert!(app.user.is_none());
        assert!(app.login.message.is_some());
        assert_eq!(app.login.password.value(), "");
    }
}
