//! # Modal Menu
//!
//! A centered, bordered list of choices. Up/`k` and Down/`j` move the
//! selection (no wraparound), Enter picks the selected item and `q`/Esc
//! cancels. A terminal resize lays the window out again from scratch, with
//! the selection back on the first item.

use crate::ui::terminal::{Geometry, Screen};
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: usize = 46;
const MIN_HEIGHT: usize = 12;
/// Border, padding and breathing room around the longest label.
const WIDTH_MARGIN: usize = 10;
/// Border, title, blank lines and the key hint around the items.
const HEIGHT_MARGIN: usize = 7;
/// Cells kept free between the window and the screen edge.
const SCREEN_MARGIN: usize = 4;

const FOOTER_HINT: &str = "Enter select | q back";

/// Outcome of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Selected(usize),
    Cancelled,
}

/// Selection within a menu of `len` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    len: usize,
    selected: usize,
}

impl MenuState {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    /// Index of the highlighted item, `None` for an empty menu.
    pub fn selected(&self) -> Option<usize> {
        (self.len > 0).then_some(self.selected)
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }
}

/// Window rectangle for a menu with `title` and `items` on a screen of
/// `geometry`.
///
/// Width is the longest of title and labels plus a margin, at least
/// `MIN_WIDTH` and at most `cols - 4`; height is the item count plus a
/// margin, at least `MIN_HEIGHT` and at most `rows - 4`.
pub fn menu_area(geometry: Geometry, title: &str, items: &[String]) -> Rect {
    let longest = items
        .iter()
        .map(|item| item.width())
        .chain(std::iter::once(title.width()))
        .max()
        .unwrap_or(0);

    let max_width = usize::from(geometry.cols).saturating_sub(SCREEN_MARGIN);
    let max_height = usize::from(geometry.rows).saturating_sub(SCREEN_MARGIN);
    let width = (longest + WIDTH_MARGIN).max(MIN_WIDTH).min(max_width);
    let height = (items.len() + HEIGHT_MARGIN).max(MIN_HEIGHT).min(max_height);

    // Both are bounded by a u16 screen dimension.
    geometry.centered(width as u16, height as u16)
}

pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    items: &[String],
    state: &MenuState,
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
            Constraint::Min(1), // Items
            Constraint::Length(1),
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

    let list_items: Vec<ListItem> = items.iter().map(|item| ListItem::new(item.as_str())).collect();
    let list = List::new(list_items).highlight_style(
        Style::default()
            .fg(theme.highlight_fg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    let mut list_state = ListState::default().with_selected(state.selected());
    frame.render_stateful_widget(list, chunks[2], &mut list_state);

    frame.render_widget(
        Paragraph::new(FOOTER_HINT).style(Style::default().fg(theme.secondary)),
        chunks[4],
    );
}

/// Show a menu until the user picks an item or backs out.
pub fn run_menu<B: Backend>(screen: &mut Screen<B>, title: &str, items: &[String]) -> Result<Choice>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    'layout: loop {
        let mut state = MenuState::new(items.len());
        loop {
            screen.draw_modal(|frame, geometry, theme| {
                let area = menu_area(geometry, title, items);
                render_menu(frame, area, theme, title, items, &state);
            })?;

            match screen.next_event()? {
                Event::Resize(..) => continue 'layout,
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(Choice::Cancelled),
                    KeyCode::Up | KeyCode::Char('k') => state.up(),
                    KeyCode::Down | KeyCode::Char('j') => state.down(),
                    KeyCode::Enter => {
                        if let Some(index) = state.selected() {
                            return Ok(Choice::Selected(index));
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }
}
