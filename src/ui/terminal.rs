//! # Screen
//!
//! Owns the ratatui [`Terminal`], the source of input events, the active
//! [`Theme`] and the current [`Geometry`]. Every modal (menu, prompt, pager)
//! draws through a [`Screen`] and reads its input from [`Screen::next_event`],
//! which is the one place where resize events update the geometry.

use crate::host::HostStatus;
use crate::ui::render;
use crate::ui::theme::Theme;
use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use tracing::debug;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: u16,
    pub cols: u16,
}

impl Geometry {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }

    /// The whole screen as a [`Rect`].
    pub fn area(self) -> Rect {
        Rect::new(0, 0, self.cols, self.rows)
    }

    /// A `width` x `height` rectangle centered on the screen. Both are
    /// clamped to the screen size.
    pub fn centered(self, width: u16, height: u16) -> Rect {
        let width = width.min(self.cols);
        let height = height.min(self.rows);
        Rect::new(
            (self.cols - width) / 2,
            (self.rows - height) / 2,
            width,
            height,
        )
    }
}

/// Trait for reading terminal events (allows dependency injection for testing).
///
/// Reads block until an event arrives.
pub trait EventReader {
    fn read_event(&mut self) -> Result<Event>;
}

/// Production event reader backed by crossterm.
pub struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self) -> Result<Event> {
        event::read().context("Failed to read keyboard event")
    }
}

/// Event reader replaying a fixed sequence, for driving screens without a
/// real terminal. Fails once the sequence is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventReader for ScriptedEvents {
    fn read_event(&mut self) -> Result<Event> {
        match self.events.pop_front() {
            Some(event) => Ok(event),
            None => bail!("no more scripted events"),
        }
    }
}

/// A terminal plus everything needed to draw on it.
pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
    events: Box<dyn EventReader>,
    theme: Theme,
    geometry: Geometry,
    status: Option<HostStatus>,
}

impl<B: Backend> Screen<B>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    /// Wrap `terminal`, taking the initial geometry from its current size.
    pub fn new(terminal: Terminal<B>, events: Box<dyn EventReader>, theme: Theme) -> Result<Self> {
        let size = terminal.size().context("Failed to query terminal size")?;
        Ok(Self {
            terminal,
            events,
            theme,
            geometry: Geometry::new(size.width, size.height),
            status: None,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Replace the facts shown in the status header behind modal windows.
    pub fn set_status(&mut self, status: HostStatus) {
        self.status = Some(status);
    }

    /// Next input event. Key releases are skipped; a resize updates the
    /// geometry before the event is returned to the caller.
    pub fn next_event(&mut self) -> Result<Event> {
        loop {
            let event = self.events.read_event()?;
            match event {
                Event::Resize(cols, rows) => {
                    debug!(cols, rows, "terminal resized");
                    self.geometry = Geometry::new(cols, rows);
                    return Ok(event);
                }
                Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                _ => return Ok(event),
            }
        }
    }

    /// Draw the status header, then `paint` on top of it.
    pub fn draw_modal(&mut self, paint: impl FnOnce(&mut Frame, Geometry, &Theme)) -> Result<()> {
        let geometry = self.geometry;
        let theme = &self.theme;
        let status = self.status.as_ref();
        self.terminal
            .draw(|frame| {
                render::render_backdrop(frame, geometry, theme, status);
                paint(frame, geometry, theme);
            })
            .context("Failed to draw terminal UI")?;
        Ok(())
    }

    /// Draw a full-screen view with no status header.
    pub fn draw_full(&mut self, paint: impl FnOnce(&mut Frame, Geometry, &Theme)) -> Result<()> {
        let geometry = self.geometry;
        let theme = &self.theme;
        self.terminal
            .draw(|frame| paint(frame, geometry, theme))
            .context("Failed to draw terminal UI")?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        self.terminal.hide_cursor().context("Failed to hide cursor")
    }
}
