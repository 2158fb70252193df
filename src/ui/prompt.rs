//! # Modal Prompt
//!
//! A centered single-line text input. The cursor is visible only while the
//! prompt is on screen; it is hidden again on every way out, errors
//! included.

use crate::ui::terminal::{Geometry, Screen};
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: u16 = 70;
const HEIGHT: u16 = 9;
const SCREEN_MARGIN: u16 = 4;
const INPUT_MARKER: &str = "> ";
const FOOTER_HINT: &str = "Enter confirm | Esc cancel";

/// Text typed so far. Holds at most `max_len - 1` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    text: String,
    capacity: usize,
}

impl PromptState {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            capacity: max_len.saturating_sub(1),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append `c`. Returns `false` when the prompt is full.
    pub fn push(&mut self, c: char) -> bool {
        if self.text.chars().count() >= self.capacity {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The trimmed input, `None` when nothing but whitespace was typed.
    pub fn finish(self) -> Option<String> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Window rectangle for a prompt: 70 columns wide (less on narrow
/// screens), 9 rows high.
pub fn prompt_area(geometry: Geometry) -> Rect {
    let width = if geometry.cols < MAX_WIDTH + SCREEN_MARGIN {
        geometry.cols.saturating_sub(SCREEN_MARGIN)
    } else {
        MAX_WIDTH
    };
    geometry.centered(width, HEIGHT)
}

pub fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    label: &str,
    state: &PromptState,
) {
    let area = area.intersection(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.fg_dim))
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .padding(Padding::horizontal(2));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1),
            Constraint::Length(1), // Label
            Constraint::Length(1),
            Constraint::Length(1), // Input
            Constraint::Min(0),
            Constraint::Length(1), // Key hint
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(label), chunks[2]);

    let input = chunks[4];
    let room = usize::from(input.width).saturating_sub(INPUT_MARKER.width() + 1);
    let visible = visible_tail(state.text(), room);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(INPUT_MARKER, Style::default().fg(theme.accent)),
            Span::raw(visible),
        ])),
        input,
    );
    frame.render_widget(
        Paragraph::new(FOOTER_HINT).style(Style::default().fg(theme.secondary)),
        chunks[6],
    );

    if input.width > 0 && input.height > 0 {
        let offset = (INPUT_MARKER.width() + visible.width()).min(usize::from(input.width) - 1);
        // offset < input.width, which is a u16
        frame.set_cursor_position(Position::new(input.x + offset as u16, input.y));
    }
}

/// Longest suffix of `text` no wider than `room` columns.
fn visible_tail(text: &str, room: usize) -> &str {
    let mut start = text.len();
    let mut width = 0;
    for (index, c) in text.char_indices().rev() {
        width += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width > room {
            break;
        }
        start = index;
    }
    &text[start..]
}

/// Ask for one line of text. Returns `None` when the user cancels or
/// enters only whitespace.
pub fn run_prompt<B: Backend>(
    screen: &mut Screen<B>,
    title: &str,
    label: &str,
    max_len: usize,
) -> Result<Option<String>>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut state = PromptState::new(max_len);
    let outcome = read_input(screen, title, label, &mut state);
    let restored = screen.hide_cursor();

    let submitted = outcome?;
    restored?;
    Ok(if submitted { state.finish() } else { None })
}

/// Edit `state` until Enter (`true`) or Esc (`false`).
fn read_input<B: Backend>(
    screen: &mut Screen<B>,
    title: &str,
    label: &str,
    state: &mut PromptState,
) -> Result<bool>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    loop {
        screen.draw_modal(|frame, geometry, theme| {
            render_prompt(frame, prompt_area(geometry), theme, title, label, state);
        })?;

        if let Event::Key(key) = screen.next_event()? {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Enter => return Ok(true),
                KeyCode::Esc => return Ok(false),
                KeyCode::Char('c') if ctrl => return Ok(false),
                KeyCode::Char('u') if ctrl => state.clear(),
                KeyCode::Backspace => state.pop(),
                KeyCode::Char(c) if !ctrl => {
                    state.push(c);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_accepts_max_len_minus_one() {
        let mut state = PromptState::new(4);
        assert!(state.push('a'));
        assert!(state.push('b'));
        assert!(state.push('c'));
        assert!(!state.push('d'));
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn test_prompt_backspace() {
        let mut state = PromptState::new(16);
        state.push('1');
        state.push('0');
        state.pop();
        assert_eq!(state.text(), "1");
        state.pop();
        state.pop();
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_finish_trims_and_treats_blank_as_cancel() {
        let mut state = PromptState::new(32);
        for c in "  10.0.0.1 ".chars() {
            state.push(c);
        }
        assert_eq!(state.finish(), Some("10.0.0.1".to_string()));

        let mut blank = PromptState::new(32);
        blank.push(' ');
        blank.push('\t');
        assert_eq!(blank.finish(), None);
        assert_eq!(PromptState::new(32).finish(), None);
    }

    #[test]
    fn test_zero_max_len_accepts_nothing() {
        let mut state = PromptState::new(0);
        assert!(!state.push('a'));
    }

    #[test]
    fn test_prompt_area() {
        assert_eq!(prompt_area(Geometry::new(100, 30)), Rect::new(15, 10, 70, 9));
        assert_eq!(prompt_area(Geometry::new(60, 30)).width, 56);
        assert_eq!(prompt_area(Geometry::new(60, 5)).height, 5);
    }

    #[test]
    fn test_visible_tail() {
        assert_eq!(visible_tail("abcdef", 10), "abcdef");
        assert_eq!(visible_tail("abcdef", 3), "def");
        assert_eq!(visible_tail("abcdef", 0), "");
    }
}
