use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use nihongo::app::{App, AppScreen, CATEGORY_ACTIONS, LoginForm, choice_for_key};
use nihongo::config::Config;
use nihongo::content::catalog::{Catalog, normalize};
use nihongo::content::media::{MediaKind, MediaLibrary};
use nihongo::content::{
    ALL_CATEGORIES, Category, KanaSymbol, KanjiCharacter, LearnableItem, VocabWord,
};
use nihongo::engine::LessonMode;
use nihongo::error::ContentError;
use nihongo::event::{AppEvent, EventHandler};
use nihongo::store::json_store::JsonStore;
use nihongo::ui::theme::Theme;
use nihongo::{logging, ui};

#[derive(Parser)]
#[command(
    name = "nihongo",
    version,
    about = "Terminal tutor for hiragana, katakana, kanji and vocabulary"
)]
struct Cli {
    #[arg(short, long, help = "Login to prefill on the sign-in screen")]
    user: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Interface language (en, ru)")]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Add an entry to the catalog
    #[command(subcommand)]
    Add(AddEntry),
}

#[derive(Subcommand)]
enum AddEntry {
    /// Add a kana symbol
    Kana {
        title: String,
        reading: String,
        #[arg(long, default_value = "hiragana", help = "hiragana or katakana")]
        script: Category,
        #[command(flatten)]
        media: MediaArgs,
    },
    /// Add a kanji character
    Kanji {
        title: String,
        #[arg(long)]
        onyomi: String,
        #[arg(long)]
        kunyomi: String,
        #[arg(long)]
        meaning: String,
        #[arg(long = "example", help = "Example word, repeatable")]
        examples: Vec<String>,
        #[command(flatten)]
        media: MediaArgs,
    },
    /// Add a vocabulary word
    Word {
        title: String,
        reading: String,
        meaning: String,
        #[command(flatten)]
        media: MediaArgs,
    },
}

#[derive(Args)]
struct MediaArgs {
    #[arg(long, help = "Image file to copy into the media library")]
    image: Option<PathBuf>,

    #[arg(long, help = "Sound file to copy into the media library")]
    sound: Option<PathBuf>,
}

impl AddEntry {
    fn category(&self) -> Result<Category> {
        match self {
            AddEntry::Kana { script, .. } => {
                if !script.is_kana() {
                    bail!("--script must be hiragana or katakana, got {script}");
                }
                Ok(*script)
            }
            AddEntry::Kanji { .. } => Ok(Category::Kanji),
            AddEntry::Word { .. } => Ok(Category::Word),
        }
    }

    fn title(&self) -> &str {
        match self {
            AddEntry::Kana { title, .. }
            | AddEntry::Kanji { title, .. }
            | AddEntry::Word { title, .. } => title,
        }
    }

    fn media(&self) -> &MediaArgs {
        match self {
            AddEntry::Kana { media, .. }
            | AddEntry::Kanji { media, .. }
            | AddEntry::Word { media, .. } => media,
        }
    }

    fn into_item(self, image: Option<String>, sound: Option<String>) -> LearnableItem {
        match self {
            AddEntry::Kana { title, reading, .. } => LearnableItem::Kana(KanaSymbol {
                title,
                reading,
                path_to_image: image,
                path_to_sound: sound,
                ..Default::default()
            }),
            AddEntry::Kanji {
                title,
                onyomi,
                kunyomi,
                meaning,
                examples,
                ..
            } => LearnableItem::Kanji(KanjiCharacter {
                title,
                onyomi,
                kunyomi,
                meaning,
                examples,
                path_to_image: image,
                path_to_sound: sound,
                ..Default::default()
            }),
            AddEntry::Word {
                title,
                reading,
                meaning,
                ..
            } => LearnableItem::Word(VocabWord {
                title,
                reading,
                meaning,
                path_to_image: image,
                path_to_sound: sound,
                ..Default::default()
            }),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&logging::default_log_path()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {e:#}");
        Config::default()
    });
    if let Some(lang) = cli.lang {
        config.language = lang;
        config.validate();
    }
    if let Some(theme_name) = cli.theme {
        if Theme::load(&theme_name).is_some() {
            config.theme = theme_name;
        } else {
            eprintln!(
                "Unknown theme '{theme_name}', available: {}",
                Theme::available_themes().join(", ")
            );
        }
    }
    rust_i18n::set_locale(&config.language);

    if let Some(Command::Add(entry)) = cli.command {
        return add_entry(entry);
    }

    let mut app = App::new(config);
    if let Some(user) = cli.user.as_deref() {
        app.login = LoginForm::new(Some(user));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    app.set_timer_sink(events.timer_sink());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.go_to_menu();
    if let Err(e) = app.config.save() {
        log::error!("Failed to save config: {e:#}");
    }

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn add_entry(entry: AddEntry) -> Result<()> {
    let store = JsonStore::new()?;
    let mut catalog = Catalog::bundled()?.with_user_entries(store.load_user_content());
    let media = MediaLibrary::new(store.media_dir());

    let category = entry.category()?;
    let title = normalize(entry.title());
    if catalog.contains_title(category, &title) {
        return Err(ContentError::DuplicateTitle { category, title }.into());
    }

    let image = entry
        .media()
        .image
        .as_deref()
        .map(|path| media.import(category, &title, path, MediaKind::Image))
        .transpose()?;
    let sound = entry
        .media()
        .sound
        .as_deref()
        .map(|path| media.import(category, &title, path, MediaKind::Sound))
        .transpose()?;

    let stored = catalog.add(category, entry.into_item(image, sound))?;
    store.save_user_content(catalog.user_entries())?;
    println!(
        "Added '{}' to {category} as item {}",
        stored.title(),
        stored.id()
    );
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Timer(event) => app.handle_timer(event),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat would double-answer a question.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Login => handle_login_key(app, key),
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::CategoryMenu => handle_category_key(app, key),
        AppScreen::LessonPicker => handle_picker_key(app, key),
        AppScreen::Study => handle_study_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::QuizResult => handle_result_key(app, key),
        AppScreen::Learned => handle_learned_key(app, key),
        AppScreen::History => handle_history_key(app, key),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::F(2) => app.login.toggle_mode(),
        KeyCode::Char('r') if ctrl => app.login.toggle_mode(),
        KeyCode::F(3) => app.continue_as_guest(),
        _ => app.login_input(key),
    }
}

fn menu_action(app: &mut App, key: char) {
    match key {
        'q' => app.should_quit = true,
        'h' => app.open_history(),
        'l' => app.log_out(),
        c => {
            if let Some(category) = c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| ALL_CATEGORIES.get(i))
            {
                app.open_category(*category);
            }
        }
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            let selected = app
                .menu
                .items
                .get(app.menu.selected)
                .and_then(|item| item.key.chars().next());
            if let Some(ch) = selected {
                menu_action(app, ch);
            }
        }
        KeyCode::Char(ch) => menu_action(app, ch),
        _ => {}
    }
}

fn handle_category_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.category_menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.category_menu.next(),
        KeyCode::Enter => {
            if let Some(action) = CATEGORY_ACTIONS.get(app.category_menu.selected) {
                app.run_category_action(*action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(idx) = app.category_menu.index_of_key(ch) {
                app.category_menu.selected = idx;
                app.run_category_action(CATEGORY_ACTIONS[idx]);
            }
        }
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_category(),
        KeyCode::Left | KeyCode::Down | KeyCode::Char('h') | KeyCode::Char('j') => {
            app.picker_step(-1)
        }
        KeyCode::Right | KeyCode::Up | KeyCode::Char('l') | KeyCode::Char('k') => {
            app.picker_step(1)
        }
        KeyCode::PageDown => app.picker_step(-10),
        KeyCode::PageUp => app.picker_step(10),
        KeyCode::Char('s') => app.start_study(LessonMode::Numbered(app.picker_lesson)),
        KeyCode::Char('t') | KeyCode::Enter => {
            app.start_quiz(LessonMode::Numbered(app.picker_lesson))
        }
        _ => {}
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    let Some(study) = app.study.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_category(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Char(' ') => {
            study.next();
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            study.prev();
        }
        KeyCode::Enter => {
            if !study.next() {
                app.quiz_from_study();
            }
        }
        KeyCode::Char('t') => app.quiz_from_study(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.abandon_quiz(),
        KeyCode::Enter | KeyCode::Char(' ') => app.continue_quiz(),
        KeyCode::Char(ch) => {
            if let Some((group, option)) = choice_for_key(ch) {
                app.answer(group, option);
            }
        }
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Enter => app.next_lesson(),
        KeyCode::Char('r') => app.retry_quiz(),
        KeyCode::Char('m') => app.go_to_menu(),
        KeyCode::Char('q') | KeyCode::Esc => app.back_to_category(),
        _ => {}
    }
}

fn handle_learned_key(app: &mut App, key: KeyEvent) {
    let len = app.learned.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_category(),
        KeyCode::Down | KeyCode::Char('j') => App::scroll(&mut app.learned_scroll, 1, len),
        KeyCode::Up | KeyCode::Char('k') => App::scroll(&mut app.learned_scroll, -1, len),
        KeyCode::PageDown => App::scroll(&mut app.learned_scroll, 10, len),
        KeyCode::PageUp => App::scroll(&mut app.learned_scroll, -10, len),
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    let len = app.history.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Down | KeyCode::Char('j') => App::scroll(&mut app.history_selected, 1, len),
        KeyCode::Up | KeyCode::Char('k') => App::scroll(&mut app.history_selected, -1, len),
        KeyCode::PageDown => App::scroll(&mut app.history_selected, 10, len),
        KeyCode::PageUp => App::scroll(&mut app.history_selected, -10, len),
        _ => {}
    }
}
