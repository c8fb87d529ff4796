use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::result::QuizResult;
use crate::ui::labels::{category_label, outcome_tag_label};
use crate::ui::theme::Theme;

/// Most recent sessions first, one row each.
pub struct HistoryTable<'a> {
    pub history: &'a [QuizResult],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> HistoryTable<'a> {
    pub fn new(history: &'a [QuizResult], selected: usize, theme: &'a Theme) -> Self {
        Self {
            history,
            selected,
            theme,
        }
    }
}

impl Widget for HistoryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" {} ", t!("history.title")),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!("  {}", t!("history.empty")),
                Style::default().fg(colors.text_dim()),
            )))
            .render(inner, buf);
            return;
        }

        let header = format!(
            "  {:>3}  {:<11}  {:<10}  {:<10}  {:>7}  {:>7}  {:<11}  {}",
            "#",
            t!("history.date"),
            t!("history.category"),
            t!("history.mode"),
            t!("history.mistakes"),
            t!("history.time"),
            t!("history.outcome"),
            t!("history.user"),
        );
        let mut lines = vec![
            Line::from(Span::styled(
                header,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", "─".repeat(inner.width.saturating_sub(4) as usize)),
                Style::default().fg(colors.border()),
            )),
        ];

        let visible = inner.height.saturating_sub(2) as usize;
        let total = self.history.len();
        let start = self.selected.saturating_sub(visible.saturating_sub(1));

        for (i, result) in self.history.iter().rev().enumerate().skip(start).take(visible) {
            let outcome_color = if result.passed() {
                colors.success()
            } else {
                colors.error()
            };
            let row = format!(
                "  {:>3}  {:<11}  {:<10}  {:<10}  {:>7}  {:>6.1}s  {:<11}  {}",
                total - i,
                result.timestamp.format("%m/%d %H:%M").to_string(),
                category_label(result.category),
                result.lesson_mode,
                format!("{}/{}", result.mistakes, result.mistake_budget),
                result.elapsed_secs,
                outcome_tag_label(&result.outcome),
                result.user.as_deref().unwrap_or("-"),
            );
            let style = if i == self.selected {
                Style::default().fg(outcome_color).bg(colors.accent_dim())
            } else if result.upgrading {
                Style::default().fg(outcome_color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(outcome_color)
            };
            lines.push(Line::from(Span::styled(row, style)));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
