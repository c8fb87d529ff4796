use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::quiz::{FinishReport, ProgressUpdate, QuizOutcome};
use crate::session::result::QuizResult;
use crate::ui::labels::{category_label, outcome_label, progress_label};
use crate::ui::theme::Theme;

pub struct ResultPanel<'a> {
    pub result: &'a QuizResult,
    pub report: &'a FinishReport,
    /// Whether "next lesson" is on offer.
    pub can_advance: bool,
    pub theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(result: &'a QuizResult, report: &'a FinishReport, theme: &'a Theme) -> Self {
        Self {
            result,
            report,
            can_advance: matches!(report.progress, ProgressUpdate::Saved { .. }),
            theme,
        }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", category_label(self.result.category)))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let outcome_color = match self.report.outcome {
            QuizOutcome::Passed => colors.success(),
            QuizOutcome::Failed => colors.error(),
            QuizOutcome::TimedOut => colors.warning(),
        };
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                outcome_label(self.report.outcome),
                Style::default()
                    .fg(outcome_color)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let row = |label: String, value: String, color| {
            Line::from(vec![
                Span::styled(format!("  {label:<14}"), Style::default().fg(colors.fg())),
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        };

        let mistake_color = if self.result.mistakes == 0 {
            colors.success()
        } else if self.report.outcome == QuizOutcome::Passed {
            colors.warning()
        } else {
            colors.error()
        };
        Paragraph::new(row(
            t!("result.mistakes").to_string(),
            format!("{} / {}", self.result.mistakes, self.result.mistake_budget),
            mistake_color,
        ))
        .render(layout[1], buf);

        Paragraph::new(row(
            t!("result.accuracy").to_string(),
            format!("{:.0}%  ({})", self.result.accuracy(), self.result.questions),
            colors.accent(),
        ))
        .render(layout[2], buf);

        Paragraph::new(row(
            t!("result.time").to_string(),
            format!("{:.1}s", self.result.elapsed_secs),
            colors.fg(),
        ))
        .render(layout[3], buf);

        if let Some(progress) = progress_label(&self.report.progress) {
            let color = match self.report.progress {
                ProgressUpdate::Saved { .. } => colors.success(),
                ProgressUpdate::Failed(_) => colors.error(),
                _ => colors.text_dim(),
            };
            Paragraph::new(Line::from(Span::styled(
                format!("  {progress}"),
                Style::default().fg(color),
            )))
            .render(layout[4], buf);
        }

        let mut help = Vec::new();
        if self.can_advance {
            help.push(Span::styled(
                format!("  {}  ", t!("result.key_next")),
                Style::default().fg(colors.accent()),
            ));
        }
        help.push(Span::styled(
            format!("  {}  ", t!("result.key_retry")),
            Style::default().fg(colors.accent()),
        ));
        help.push(Span::styled(
            format!("{}", t!("result.key_menu")),
            Style::default().fg(colors.accent()),
        ));
        Paragraph::new(Line::from(help)).render(layout[6], buf);
    }
}
