use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::{App, AppScreen, GROUP_KEYS, LoginField};
use crate::content::media::MediaStatus;
use crate::content::LearnableItem;
use crate::session::quiz::QuizSession;
use crate::ui::components::history_table::HistoryTable;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::quiz_area::QuizArea;
use crate::ui::components::quiz_status::QuizStatus;
use crate::ui::components::result_panel::ResultPanel;
use crate::ui::components::study_card::{StudyCard, fields_of};
use crate::ui::labels::{category_label, field_label};
use crate::ui::layout::{QuizLayout, ScreenLayout, pack_hint_lines, popup_area};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Login => render_login(frame, app),
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::CategoryMenu => render_category_menu(frame, app),
        AppScreen::LessonPicker => render_lesson_picker(frame, app),
        AppScreen::Study => render_study(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::QuizResult => render_result(frame, app),
        AppScreen::Learned => render_learned(frame, app),
        AppScreen::History => render_history(frame, app),
    }
}

fn render_header(frame: &mut Frame, area: Rect, info: &str, theme: &Theme) {
    let colors = &theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {info}"),
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, hints: &[&str], theme: &Theme) {
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line,
                Style::default().fg(theme.colors.text_dim()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_message(frame: &mut Frame, area: Rect, message: Option<&str>, theme: &Theme) {
    if let Some(message) = message {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(theme.colors.warning()),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(line, area);
    }
}

fn user_info(app: &App) -> String {
    match &app.user {
        Some(user) => t!("menu.signed_in", user = user).to_string(),
        None => t!("menu.guest").to_string(),
    }
}

fn input_line<'a>(label: String, input: &LineInput, focused: bool, theme: &Theme) -> Line<'a> {
    let colors = &theme.colors;
    let label_style = if focused {
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg())
    };
    let (before, at, after) = input.render_parts();
    let mut spans = vec![
        Span::styled(format!("  {label:<18}"), label_style),
        Span::styled(before, Style::default().fg(colors.fg())),
    ];
    if focused {
        spans.push(Span::styled(
            at.map_or(" ".to_string(), |c| c.to_string()),
            Style::default().fg(colors.bg()).bg(colors.accent()),
        ));
    } else if let Some(c) = at {
        spans.push(Span::styled(c.to_string(), Style::default().fg(colors.fg())));
    }
    spans.push(Span::styled(after, Style::default().fg(colors.fg())));
    Line::from(spans)
}

fn render_login(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let form = &app.login;
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(area);

    render_header(frame, header_area, &t!("login.header"), app.theme);

    let title = if form.registering {
        t!("login.register_title")
    } else {
        t!("login.sign_in_title")
    };
    let popup = popup_area(body, 50, 50);
    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let mut lines = vec![Line::from("")];
    for field in form.fields() {
        let (label, input) = match field {
            LoginField::Login => (t!("login.field_login"), &form.login),
            LoginField::Password => (t!("login.field_password"), &form.password),
            LoginField::Repeat => (t!("login.field_repeat"), &form.repeat),
        };
        lines.push(input_line(
            label.to_string(),
            input,
            form.focus == *field,
            app.theme,
        ));
        lines.push(Line::from(""));
    }
    if let Some(message) = &form.message {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(colors.error()),
        )));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, frame.buffer_mut());

    let toggle = if form.registering {
        t!("hints.login_sign_in")
    } else {
        t!("hints.login_register")
    };
    let hints = [
        t!("hints.login_submit"),
        t!("hints.login_fields"),
        toggle,
        t!("hints.login_guest"),
    ];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

fn render_menu(frame: &mut Frame, app: &App) {
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(frame.area());
    render_header(frame, header_area, &user_info(app), app.theme);

    let menu_area = popup_area(body, 50, 80);
    frame.render_widget(&app.menu, menu_area);

    let hints = [
        t!("hints.menu_categories"),
        t!("hints.menu_history"),
        t!("hints.menu_account"),
        t!("hints.quit"),
    ];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

fn render_category_menu(frame: &mut Frame, app: &App) {
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(frame.area());
    let info = format!(
        "{} | {}",
        user_info(app),
        t!(
            "category_menu.progress",
            lesson = app.current_cursor(),
            total = app.available_lessons()
        )
    );
    render_header(frame, header_area, &info, app.theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(body);
    let menu_area = popup_area(rows[0], 50, 80);
    frame.render_widget(&app.category_menu, menu_area);
    render_message(frame, rows[1], app.message.as_deref(), app.theme);

    let hints = [
        t!("hints.category_actions"),
        t!("hints.select"),
        t!("hints.back"),
    ];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

fn render_lesson_picker(frame: &mut Frame, app: &App) {
    let colors = &app.theme.colors;
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(frame.area());
    render_header(frame, header_area, &category_label(app.category), app.theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(body);
    render_message(frame, rows[1], app.message.as_deref(), app.theme);

    let popup = popup_area(rows[0], 50, 60);
    let block = Block::bordered()
        .title(format!(" {} ", t!("picker.title")))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let max = app.max_pickable_lesson();
    let preview: Vec<String> = app
        .lesson_items(app.picker_lesson)
        .iter()
        .map(|item| item.title().to_string())
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("◀  {} / {max}  ▶", app.picker_lesson),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
    ];
    if preview.is_empty() {
        lines.push(
            Line::from(Span::styled(
                t!("picker.empty").to_string(),
                Style::default().fg(colors.text_dim()),
            ))
            .alignment(Alignment::Center),
        );
    } else {
        lines.push(
            Line::from(Span::styled(
                preview.join("  "),
                Style::default().fg(colors.fg()),
            ))
            .alignment(Alignment::Center),
        );
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, frame.buffer_mut());

    let hints = [
        t!("hints.picker_change"),
        t!("hints.picker_study"),
        t!("hints.picker_test"),
        t!("hints.back"),
    ];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

fn media_status(app: &App, reference: Option<&str>) -> MediaStatus {
    match (&app.media, reference) {
        (Some(media), _) => media.resolve(reference),
        (None, Some(path)) => MediaStatus::Missing(path.to_string()),
        (None, None) => MediaStatus::Absent,
    }
}

fn render_study(frame: &mut Frame, app: &App) {
    let Some(study) = app.study.as_ref() else {
        return;
    };
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(frame.area());
    let info = format!(
        "{} | {}",
        category_label(study.category()),
        t!("study.header")
    );
    render_header(frame, header_area, &info, app.theme);

    let item = study.current();
    let card_area = popup_area(body, 60, 80);
    let card = StudyCard::new(item, study.position(), app.theme).media(
        media_status(app, item.path_to_image()),
        media_status(app, item.path_to_sound()),
    );
    frame.render_widget(card, card_area);

    let test = if study.is_last() {
        t!("hints.study_test_last")
    } else {
        t!("hints.study_test")
    };
    let hints = [t!("hints.study_cards"), test, t!("hints.back")];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

/// "[1-4]" for one group, "[1-4][q-r]" for two and so on.
fn answer_keys(groups: usize) -> String {
    GROUP_KEYS
        .iter()
        .take(groups)
        .map(|keys| format!("[{}-{}]", keys[0], keys[3]))
        .collect()
}

fn budget_ratio(quiz: &QuizSession) -> f64 {
    if quiz.initial_budget() > 0 {
        quiz.mistake_budget().max(0) as f64 / quiz.initial_budget() as f64
    } else if quiz.mistakes() == 0 {
        1.0
    } else {
        0.0
    }
}

fn render_quiz(frame: &mut Frame, app: &App) {
    let Some(quiz) = app.quiz.as_ref() else {
        return;
    };
    let Some(question) = quiz.current_question() else {
        return;
    };
    let colors = &app.theme.colors;
    let layout = QuizLayout::new(frame.area());

    let position = quiz.current_index().map_or(0, |i| i + 1);
    let header_text = if layout.compact_header() {
        format!(
            " {} | {position}/{} | {} {} | {}s",
            category_label(quiz.category()),
            quiz.question_count(),
            t!("quiz.mistakes_left"),
            quiz.mistake_budget().max(0),
            quiz.remaining_secs()
        )
    } else {
        format!(
            " {} | {}",
            category_label(quiz.category()),
            app.lesson_mode.as_str()
        )
    };
    let header = Paragraph::new(Line::from(Span::styled(
        header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    frame.render_widget(QuizArea::new(question, app.theme), layout.question);

    if let Some(area) = layout.timer_bar {
        let time_ratio = if quiz.time_budget_secs() > 0 {
            quiz.remaining_secs() as f64 / quiz.time_budget_secs() as f64
        } else {
            0.0
        };
        let time_fill = if quiz.remaining_secs() <= 5 {
            colors.error()
        } else {
            colors.bar_filled()
        };
        let time = ProgressBar::new(&t!("quiz.time_left"), time_ratio, app.theme)
            .value_text(format!("{}s", quiz.remaining_secs()))
            .fill(time_fill);
        frame.render_widget(time, area);
    }

    if let Some(area) = layout.budget_bar {
        let budget = ProgressBar::new(&t!("quiz.mistakes_left"), budget_ratio(quiz), app.theme)
            .value_text(format!(
                "{} / {}",
                quiz.mistake_budget().max(0),
                quiz.initial_budget()
            ));
        frame.render_widget(budget, area);
    }

    if let Some(sidebar) = layout.sidebar {
        frame.render_widget(QuizStatus::new(quiz, app.theme), sidebar);
    }

    let answer = if question.is_fully_answered() {
        t!("hints.quiz_continue").to_string()
    } else {
        t!("hints.quiz_answer", keys = answer_keys(question.groups.len())).to_string()
    };
    let quit = t!("hints.quiz_abandon").to_string();
    render_footer(
        frame,
        layout.footer,
        &[answer.as_str(), quit.as_str()],
        app.theme,
    );
}

fn render_result(frame: &mut Frame, app: &App) {
    let (Some(result), Some(report)) = (app.last_result.as_ref(), app.last_report.as_ref()) else {
        return;
    };
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);
    let centered = popup_area(rows[0], 60, 70);
    frame.render_widget(ResultPanel::new(result, report, app.theme), centered);
    render_message(frame, rows[1], app.message.as_deref(), app.theme);
}

fn answers_text(item: &LearnableItem) -> String {
    fields_of(item)
        .iter()
        .filter_map(|f| item.answer(*f).map(|a| format!("{}: {a}", field_label(*f))))
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_learned(frame: &mut Frame, app: &App) {
    let colors = &app.theme.colors;
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(frame.area());
    render_header(frame, header_area, &user_info(app), app.theme);

    let block = Block::bordered()
        .title(format!(
            " {} ",
            t!("learned.title", category = category_label(app.category))
        ))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(body);
    block.render(body, frame.buffer_mut());

    if app.learned.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            format!("  {}", t!("learned.empty")),
            Style::default().fg(colors.text_dim()),
        )))
        .render(inner, frame.buffer_mut());
    } else {
        let lines: Vec<Line> = app
            .learned
            .iter()
            .skip(app.learned_scroll)
            .take(inner.height as usize)
            .map(|item| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:>4}  {:<8}", item.id(), item.title()),
                        Style::default()
                            .fg(colors.prompt())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(answers_text(item), Style::default().fg(colors.fg())),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, frame.buffer_mut());
    }

    let hints = [t!("hints.scroll"), t!("hints.back")];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

fn render_history(frame: &mut Frame, app: &App) {
    let ScreenLayout {
        header: header_area,
        body,
        footer: footer_area,
    } = ScreenLayout::new(frame.area());
    render_header(frame, header_area, &user_info(app), app.theme);

    let table = HistoryTable::new(&app.history, app.history_selected, app.theme);
    frame.render_widget(table, body);

    let hints = [t!("hints.scroll"), t!("hints.back")];
    let hints: Vec<&str> = hints.iter().map(|h| h.as_ref()).collect();
    render_footer(frame, footer_area, &hints, app.theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_keys_cover_each_group() {
        assert_eq!(answer_keys(1), "[1-4]");
        assert_eq!(answer_keys(3), "[1-4][q-r][a-f]");
    }
}
