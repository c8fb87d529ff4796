use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Widths at or above this get the quiz status sidebar.
const SIDEBAR_MIN_WIDTH: u16 = 100;
/// The timer and budget bars need both this width and `BARS_MIN_HEIGHT`.
const BARS_MIN_WIDTH: u16 = 60;
const BARS_MIN_HEIGHT: u16 = 20;
const BAR_HEIGHT: u16 = 3;

const POPUP_MIN_WIDTH: u16 = 56;
const POPUP_MIN_HEIGHT: u16 = 16;

/// One-line header, body, two-line footer.
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);
        Self {
            header,
            body,
            footer,
        }
    }
}

/// Regions of the quiz screen. Bars and sidebar are dropped as the terminal
/// shrinks; without the sidebar the header carries the status instead.
pub struct QuizLayout {
    pub header: Rect,
    pub question: Rect,
    pub timer_bar: Option<Rect>,
    pub budget_bar: Option<Rect>,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
}

impl QuizLayout {
    pub fn new(area: Rect) -> Self {
        let screen = ScreenLayout::new(area);

        let (left, sidebar) = if area.width >= SIDEBAR_MIN_WIDTH {
            let [left, side] =
                Layout::horizontal([Constraint::Percentage(72), Constraint::Percentage(28)])
                    .areas(screen.body);
            (left, Some(side))
        } else {
            (screen.body, None)
        };

        let (question, timer_bar, budget_bar) =
            if area.width >= BARS_MIN_WIDTH && area.height >= BARS_MIN_HEIGHT {
                let [question, timer, budget] = Layout::vertical([
                    Constraint::Min(8),
                    Constraint::Length(BAR_HEIGHT),
                    Constraint::Length(BAR_HEIGHT),
                ])
                .areas(left);
                (question, Some(timer), Some(budget))
            } else {
                (left, None, None)
            };

        Self {
            header: screen.header,
            question,
            timer_bar,
            budget_bar,
            sidebar,
            footer: screen.footer,
        }
    }

    pub fn compact_header(&self) -> bool {
        self.sidebar.is_none()
    }
}

/// Lay key hints out left to right, starting a new line whenever the next
/// hint would overflow `width`. A hint wider than `width` gets its own line.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if width == 0 {
        return lines;
    }
    for hint in hints.iter().copied().filter(|h| !h.is_empty()) {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 2 + hint.chars().count() <= width => {
                line.push_str("  ");
                line.push_str(hint);
            }
            _ => lines.push(format!(" {hint}")),
        }
    }
    lines
}

/// A box centered in `area`, sized by percentage but never smaller than a
/// readable minimum unless `area` itself is.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (area.width.saturating_mul(percent_x.min(100)) / 100)
        .max(POPUP_MIN_WIDTH)
        .min(area.width);
    let height = (area.height.saturating_mul(percent_y.min(100)) / 100)
        .max(POPUP_MIN_HEIGHT)
        .min(area.height);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    popup
}
