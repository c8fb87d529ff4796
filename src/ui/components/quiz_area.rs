use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::GROUP_KEYS;
use crate::session::quiz::{ChoiceGroup, Question};
use crate::ui::labels::field_label;
use crate::ui::theme::Theme;

/// The current question: prompt, optional hint and one row of options per
/// quizzed field.
pub struct QuizArea<'a> {
    pub question: &'a Question,
    pub hint: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> QuizArea<'a> {
    pub fn new(question: &'a Question, theme: &'a Theme) -> Self {
        Self {
            question,
            hint: question.item.hint(),
            theme,
        }
    }
}

impl Widget for QuizArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(4)];
        constraints.extend(self.question.groups.iter().map(|_| Constraint::Length(4)));
        constraints.push(Constraint::Min(0));
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut prompt_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.question.item.title(),
                Style::default()
                    .fg(colors.prompt())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(hint) = self.hint {
            prompt_lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(colors.hint()),
            )));
        }
        Paragraph::new(prompt_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        for (g, group) in self.question.groups.iter().enumerate() {
            render_group(group, &GROUP_KEYS[g % GROUP_KEYS.len()], self.theme, layout[g + 1], buf);
        }
    }
}

fn render_group(group: &ChoiceGroup, keys: &[char; 4], theme: &Theme, area: Rect, buf: &mut Buffer) {
    let colors = &theme.colors;
    let border = if group.is_answered() {
        colors.border()
    } else {
        colors.border_focused()
    };
    let block = Block::bordered()
        .title(format!(" {} ", field_label(group.choices.field)))
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            group
                .choices
                .options
                .iter()
                .map(|_| Constraint::Ratio(1, group.choices.options.len() as u32))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, option) in group.choices.options.iter().enumerate() {
        let style = match group.picked {
            None => Style::default().fg(colors.fg()),
            Some(_) if i == group.choices.correct => Style::default()
                .fg(colors.option_correct())
                .add_modifier(Modifier::BOLD),
            Some(picked) if picked == i => Style::default()
                .fg(colors.option_incorrect())
                .bg(colors.option_incorrect_bg()),
            Some(_) => Style::default().fg(colors.text_dim()),
        };
        let key = keys.get(i).copied().unwrap_or(' ');
        let line = Line::from(vec![
            Span::styled(format!("[{key}] "), Style::default().fg(colors.accent())),
            Span::styled(option.as_str(), style),
        ]);
        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .render(columns[i], buf);
    }
}
