//! # Command Module
//!
//! Everything between a menu selection and the text shown on screen:
//! building a command, running it, and splitting its output into lines.
//!
//! | Piece | Item |
//! |-------|------|
//! | Invocation | [`CommandLine`], [`CommandTemplate`] |
//! | Execution | [`CommandRunner`], [`ProcessRunner`] |
//! | Result | [`CapturedOutput`], [`Status`] |
//! | Display lines | [`LineIndex`] |
//! | Input checks | [`parse_ipv4`], [`is_valid_set_name`] |
//! | Firewall actions | [`Catalog`] |

pub mod catalog;
pub mod lines;
pub mod runner;
pub mod template;
pub mod validate;

pub use catalog::{Action, ActionKind, Catalog, Job, SetAction};
pub use lines::LineIndex;
pub use runner::{
    CapturedOutput, CommandRunner, ProcessRunner, Status, ABNORMAL_TERMINATION_CODE, READ_CHUNK,
    SPAWN_FAILURE_CODE,
};
pub use template::{CommandLine, CommandTemplate};
pub use validate::{is_ipv4, is_valid_set_name, parse_ipv4};
