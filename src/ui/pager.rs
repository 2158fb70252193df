//! # Pager
//!
//! Full-screen, scrollable view of command output:
//!
//! ```text
//!  Title
//! ──────────────────────────────
//!  output line
//!  output line
//! ──────────────────────────────
//!  ↑↓ scroll ...      lines 1-20 of 57
//! ```
//!
//! The top line never goes past the last line of the text. A resize keeps
//! the current position, clamped to the new page height.

use crate::command::LineIndex;
use crate::ui::render::render_rule;
use crate::ui::terminal::{Geometry, Screen};
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Title row plus rule above the text.
pub const HEADER_ROWS: u16 = 2;
/// Rule plus key hints below the text.
pub const FOOTER_ROWS: u16 = 2;

const TAB_STOP: usize = 8;
const FOOTER_HINT: &str = "↑↓/jk line | PgUp/PgDn page | g/G top/bottom | q back";

/// Position of the visible page within the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    height: usize,
}

impl Viewport {
    /// A viewport at the start of the text showing `height` lines (at
    /// least one).
    pub fn new(height: usize) -> Self {
        Self {
            top: 0,
            height: height.max(1),
        }
    }

    /// Index of the first visible line.
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn line_down(&mut self, len: usize) {
        if self.top + 1 < len {
            self.top += 1;
        }
    }

    pub fn line_up(&mut self) {
        self.top = self.top.saturating_sub(1);
    }

    pub fn page_down(&mut self, len: usize) {
        let next = self.top + self.height;
        self.top = if next < len {
            next
        } else {
            len.saturating_sub(1)
        };
    }

    pub fn page_up(&mut self) {
        self.top = self.top.saturating_sub(self.height);
    }

    pub fn home(&mut self) {
        self.top = 0;
    }

    /// Show the last page of a text of `len` lines.
    pub fn end(&mut self, len: usize) {
        self.top = len.saturating_sub(self.height);
    }

    /// Adopt a new page height, keeping the top line where possible.
    pub fn resize(&mut self, height: usize, len: usize) {
        self.height = height.max(1);
        self.clamp(len);
    }

    pub fn clamp(&mut self, len: usize) {
        self.top = self.top.min(len.saturating_sub(1));
    }
}

/// Number of text lines that fit between header and footer.
pub fn page_height(geometry: Geometry) -> usize {
    usize::from(geometry.rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS)).max(1)
}

/// `line` made safe for display: tabs expanded to 8-column stops, other
/// control characters dropped.
pub fn display_line(line: &str) -> Cow<'_, str> {
    if !line.chars().any(char::is_control) {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len() + TAB_STOP);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_STOP - column % TAB_STOP;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else if !c.is_control() {
            out.push(c);
            column += c.width().unwrap_or(0);
        }
    }
    Cow::Owned(out)
}

/// "lines a-b of n" for the footer.
pub fn position_label(viewport: &Viewport, len: usize) -> String {
    if len == 0 {
        return "empty".to_string();
    }
    let first = viewport.top() + 1;
    let last = (viewport.top() + viewport.height()).min(len);
    format!("lines {first}-{last} of {len}")
}

pub fn render_pager(
    frame: &mut Frame,
    geometry: Geometry,
    theme: &Theme,
    title: &str,
    index: &LineIndex,
    viewport: &Viewport,
) {
    let area = geometry.area().intersection(frame.area());
    frame.render_widget(
        Block::default().style(Style::default().fg(theme.fg).bg(theme.bg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1),
            Constraint::Min(0), // Text
            Constraint::Length(1),
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            format!(" {title}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );
    render_rule(frame, chunks[1], theme);

    let text: Vec<Line> = index
        .window(viewport.top(), viewport.height())
        .iter()
        .map(|line| Line::from(format!(" {}", display_line(line))))
        .collect();
    frame.render_widget(Paragraph::new(text), chunks[2]);

    render_rule(frame, chunks[3], theme);
    let position = format!("{} ", position_label(viewport, index.count()));
    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(position.width() as u16)])
        .split(chunks[4]);
    frame.render_widget(
        Paragraph::new(format!(" {FOOTER_HINT}")).style(Style::default().fg(theme.secondary)),
        footer[0],
    );
    frame.render_widget(
        Paragraph::new(position)
            .style(Style::default().fg(theme.fg_dim))
            .alignment(Alignment::Right),
        footer[1],
    );
}

/// Page through `text` until the user presses `q` or Esc.
pub fn run_pager<B: Backend>(screen: &mut Screen<B>, title: &str, text: &str) -> Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let index = LineIndex::split(text);
    let len = index.count();
    let mut viewport = Viewport::new(page_height(screen.geometry()));

    loop {
        screen.draw_full(|frame, geometry, theme| {
            render_pager(frame, geometry, theme, title, &index, &viewport);
        })?;

        match screen.next_event()? {
            Event::Resize(..) => viewport.resize(page_height(screen.geometry()), len),
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => viewport.line_down(len),
                KeyCode::Up | KeyCode::Char('k') => viewport.line_up(),
                KeyCode::PageDown | KeyCode::Char(' ') => viewport.page_down(len),
                KeyCode::PageUp => viewport.page_up(),
                KeyCode::Home | KeyCode::Char('g') => viewport.home(),
                KeyCode::End | KeyCode::Char('G') => viewport.end(len),
                _ => {}
            },
            _ => {}
        }
    }
}
