use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::content::media::MediaStatus;
use crate::content::{AnswerField, LearnableItem};
use crate::ui::labels::field_label;
use crate::ui::theme::Theme;

/// One flash card of a study session.
pub struct StudyCard<'a> {
    pub item: &'a LearnableItem,
    pub position: (usize, usize),
    pub image: MediaStatus,
    pub sound: MediaStatus,
    pub theme: &'a Theme,
}

impl<'a> StudyCard<'a> {
    pub fn new(item: &'a LearnableItem, position: (usize, usize), theme: &'a Theme) -> Self {
        Self {
            item,
            position,
            image: MediaStatus::Absent,
            sound: MediaStatus::Absent,
            theme,
        }
    }

    pub fn media(mut self, image: MediaStatus, sound: MediaStatus) -> Self {
        self.image = image;
        self.sound = sound;
        self
    }
}

pub fn fields_of(item: &LearnableItem) -> &'static [AnswerField] {
    match item {
        LearnableItem::Kana(_) => &[AnswerField::Reading],
        LearnableItem::Word(_) => &[AnswerField::Reading, AnswerField::Meaning],
        LearnableItem::Kanji(_) => &[AnswerField::Onyomi, AnswerField::Kunyomi, AnswerField::Meaning],
    }
}

impl Widget for StudyCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (index, total) = self.position;

        let block = Block::bordered()
            .title(format!(" {index}/{total} "))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(inner);

        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                self.item.title(),
                Style::default()
                    .fg(colors.prompt())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let label_style = Style::default().fg(colors.text_dim());
        let mut lines: Vec<Line> = fields_of(self.item)
            .iter()
            .filter_map(|field| {
                self.item.answer(*field).map(|value| {
                    Line::from(vec![
                        Span::styled(format!("  {:<10}", field_label(*field)), label_style),
                        Span::styled(value, Style::default().fg(colors.fg())),
                    ])
                })
            })
            .collect();

        if !self.item.examples().is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", t!("study.examples")),
                label_style,
            )));
            for example in self.item.examples() {
                lines.push(Line::from(Span::styled(
                    format!("    {example}"),
                    Style::default().fg(colors.hint()),
                )));
            }
        }

        lines.push(Line::from(""));
        for (label, status) in [
            (t!("study.image"), &self.image),
            (t!("study.sound"), &self.sound),
        ] {
            let (text, color) = match status {
                MediaStatus::Absent => (t!("study.media_none").to_string(), colors.text_dim()),
                MediaStatus::Available(path) => (path.display().to_string(), colors.success()),
                MediaStatus::Missing(reference) => (
                    t!("study.media_missing", path = reference).to_string(),
                    colors.warning(),
                ),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<10}"), label_style),
                Span::styled(text, Style::default().fg(color)),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);
    }
}
