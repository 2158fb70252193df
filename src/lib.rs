//! nft-tui - an interactive terminal front end for nftables
//!
//! This library provides the text-shell engine (process capture, line
//! indexing, modal menus, prompts and a pager) and the firewall controller
//! built on top of it.

pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod privilege;
pub mod ui;
