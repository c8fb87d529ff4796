use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::quiz::QuizSession;
use crate::ui::labels::category_label;
use crate::ui::theme::Theme;

/// Sidebar with the running numbers of a quiz.
pub struct QuizStatus<'a> {
    quiz: &'a QuizSession,
    theme: &'a Theme,
}

impl<'a> QuizStatus<'a> {
    pub fn new(quiz: &'a QuizSession, theme: &'a Theme) -> Self {
        Self { quiz, theme }
    }
}

impl Widget for QuizStatus<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let quiz = self.quiz;

        let block = Block::bordered()
            .title(format!(" {} ", category_label(quiz.category())))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label_style = Style::default().fg(colors.text_dim());
        let question = quiz.current_index().map_or(quiz.question_count(), |i| i + 1);
        let budget_color = if quiz.mistake_budget() < 0 {
            colors.error()
        } else if quiz.mistake_budget() == 0 && quiz.mistakes() > 0 {
            colors.warning()
        } else {
            colors.success()
        };
        let time_color = if quiz.remaining_secs() <= 5 {
            colors.error()
        } else {
            colors.fg()
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {}", t!("quiz.question")), label_style)),
            Line::from(Span::styled(
                format!("   {question} / {}", quiz.question_count()),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(format!(" {}", t!("quiz.mistakes_left")), label_style)),
            Line::from(Span::styled(
                format!("   {}", quiz.mistake_budget().max(0)),
                Style::default().fg(budget_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(format!(" {}", t!("quiz.time_left")), label_style)),
            Line::from(Span::styled(
                format!("   {}s", quiz.remaining_secs()),
                Style::default().fg(time_color).add_modifier(Modifier::BOLD),
            )),
        ];
        if quiz.is_upgrading() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {}", t!("quiz.counts_for_progress")),
                Style::default().fg(colors.accent()),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
