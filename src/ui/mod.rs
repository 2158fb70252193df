//! # UI Module
//!
//! The terminal user interface: three modal screens and the controller
//! that chains them.
//!
//! ## Components
//!
//! - [`menu`] - centered list of choices
//! - [`prompt`] - centered single-line text input
//! - [`pager`] - full-screen scrollable command output
//! - [`App`] - main menu and per-set sub-menu
//! - [`Screen`] - terminal, event source, theme and geometry shared by all
//!   screens
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ nft-tui  host:gate  ip:192.168.1.2  2026-...     │ status header
//! │──────────────────────────────────────────────────│
//! │          ┌────────────────────────────┐          │
//! │          │ Main menu                  │          │
//! │          │                            │          │
//! │          │ Show ruleset               │          │ modal window
//! │          │ ...                        │          │
//! │          │ Enter select | q back      │          │
//! │          └────────────────────────────┘          │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod menu;
pub mod pager;
pub mod prompt;
pub mod render;
pub mod terminal;
pub mod theme;

pub use app::{App, Ui};
pub use menu::Choice;
pub use terminal::{CrosstermEventReader, EventReader, Geometry, Screen, ScriptedEvents};
pub use theme::Theme;
