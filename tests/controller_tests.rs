//! Controller flow tests
//!
//! The controller is driven either by a scripted [`Ui`] that records what it
//! is asked to show, or by real screens on a `TestBackend` with scripted key
//! presses. Commands go to a recording runner with canned results.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use nft_tui::command::{CapturedOutput, Catalog, CommandLine, CommandRunner, Status};
use nft_tui::config::Config;
use nft_tui::host::{HostProbe, HostStatus};
use nft_tui::ui::{App, Choice, Screen, ScriptedEvents, Theme, Ui};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::VecDeque;

// Main menu positions with the default configuration.
const SHOW_RULESET: usize = 0;
const MANAGE_BLACKLIST: usize = 2;
const CHECK_CONFIG: usize = 4;
const APPLY_CONFIG: usize = 5;
const EXIT: usize = 7;

// Set menu positions.
const VIEW: usize = 0;
const ADD: usize = 1;
const REMOVE: usize = 2;
const BACK: usize = 4;

/// Records every command and answers with the same canned output.
struct RecordingRunner {
    commands: Vec<String>,
    reply: CapturedOutput,
}

impl RecordingRunner {
    fn replying(status: Status, text: &str) -> Self {
        Self {
            commands: Vec::new(),
            reply: CapturedOutput {
                text: text.to_string(),
                status,
            },
        }
    }

    fn ok() -> Self {
        Self::replying(Status::NormalExit(0), "")
    }
}

impl CommandRunner for RecordingRunner {
    fn execute(&mut self, command: &CommandLine) -> CapturedOutput {
        self.commands.push(command.to_string());
        self.reply.clone()
    }
}

#[derive(Default)]
struct ScriptedUi {
    choices: VecDeque<Choice>,
    replies: VecDeque<Option<String>>,
    menus: Vec<(String, Vec<String>)>,
    prompts: Vec<(String, usize)>,
    shown: Vec<(String, String)>,
    statuses: usize,
}

impl ScriptedUi {
    fn new(choices: &[Choice], replies: &[Option<&str>]) -> Self {
        Self {
            choices: choices.iter().copied().collect(),
            replies: replies.iter().map(|r| r.map(str::to_string)).collect(),
            ..Self::default()
        }
    }
}

impl Ui for ScriptedUi {
    fn set_status(&mut self, _status: HostStatus) {
        self.statuses += 1;
    }

    fn choose(&mut self, title: &str, items: &[String]) -> Result<Choice> {
        self.menus.push((title.to_string(), items.to_vec()));
        Ok(self.choices.pop_front().unwrap_or(Choice::Cancelled))
    }

    fn ask(&mut self, title: &str, _label: &str, max_len: usize) -> Result<Option<String>> {
        self.prompts.push((title.to_string(), max_len));
        Ok(self.replies.pop_front().flatten())
    }

    fn show(&mut self, title: &str, text: &str) -> Result<()> {
        self.shown.push((title.to_string(), text.to_string()));
        Ok(())
    }
}

struct StaticProbe;

impl HostProbe for StaticProbe {
    fn status(&mut self) -> HostStatus {
        HostStatus {
            hostname: "gate".to_string(),
            address: "192.0.2.10".to_string(),
            timestamp: "2026-01-01 00:00:00".to_string(),
        }
    }
}

fn run_scripted(runner: &mut RecordingRunner, ui: &mut ScriptedUi) {
    let catalog = Catalog::from_config(&Config::default());
    App::new(&catalog, runner, ui, &mut StaticProbe).run().unwrap();
}

use Choice::Selected;

#[test]
fn test_tool_failure_shows_error_title_and_output() {
    let mut runner = RecordingRunner::replying(Status::NormalExit(2), "permission denied\n");
    let mut ui = ScriptedUi::new(&[Selected(SHOW_RULESET), Selected(EXIT)], &[]);
    run_scripted(&mut runner, &mut ui);

    assert_eq!(runner.commands, vec!["nft list ruleset"]);
    assert_eq!(ui.shown.len(), 1);
    assert_eq!(ui.shown[0].0, "Ruleset (error)");
    assert!(ui.shown[0].1.contains("permission denied"));
}

#[test]
fn test_success_shows_ok_title() {
    let mut runner = RecordingRunner::replying(Status::NormalExit(0), "");
    let mut ui = ScriptedUi::new(&[Selected(CHECK_CONFIG), Choice::Cancelled], &[]);
    run_scripted(&mut runner, &mut ui);

    assert_eq!(runner.commands, vec!["nft -c -f /etc/nftables.conf"]);
    assert_eq!(ui.shown[0].0, "Configuration OK");
}

#[test]
fn test_spawn_failure_is_an_error_screen() {
    let mut runner = RecordingRunner::replying(Status::SpawnFailure, "Error: could not start `nft`\n");
    let mut ui = ScriptedUi::new(&[Selected(CHECK_CONFIG), Choice::Cancelled], &[]);
    run_scripted(&mut runner, &mut ui);
    assert_eq!(ui.shown[0].0, "Configuration ERROR");
}

#[test]
fn test_prompt_cancel_runs_nothing() {
    let mut runner = RecordingRunner::ok();
    let mut ui = ScriptedUi::new(
        &[Selected(MANAGE_BLACKLIST), Selected(ADD), Selected(BACK), Selected(EXIT)],
        &[None],
    );
    run_scripted(&mut runner, &mut ui);

    assert!(runner.commands.is_empty());
    assert!(ui.shown.is_empty());
    assert_eq!(ui.prompts, vec![("Add IPv4 address".to_string(), 128)]);
}

#[test]
fn test_invalid_address_shows_error_and_runs_nothing() {
    for bad in ["256.1.1.1", "1.2.3", "1.2.3.4.5", "1.2.3.4x", "10.0.0.1; reboot"] {
        let mut runner = RecordingRunner::ok();
        let mut ui = ScriptedUi::new(
            &[Selected(MANAGE_BLACKLIST), Selected(ADD), Selected(BACK), Selected(EXIT)],
            &[Some(bad)],
        );
        run_scripted(&mut runner, &mut ui);

        assert!(runner.commands.is_empty(), "{bad} reached the runner");
        assert_eq!(ui.shown.len(), 1);
        assert_eq!(ui.shown[0].0, "Error");
        // Back in the set menu afterwards.
        assert_eq!(ui.menus[2].0, "Set: blacklist4");
    }
}

#[test]
fn test_add_and_remove_valid_address() {
    let mut runner = RecordingRunner::ok();
    let mut ui = ScriptedUi::new(
        &[
            Selected(MANAGE_BLACKLIST),
            Selected(ADD),
            Selected(REMOVE),
            Selected(BACK),
            Selected(EXIT),
        ],
        &[Some("192.168.1.1"), Some("10.0.0.7")],
    );
    run_scripted(&mut runner, &mut ui);

    assert_eq!(
        runner.commands,
        vec![
            "nft add element inet filter blacklist4 { 192.168.1.1 }",
            "nft delete element inet filter blacklist4 { 10.0.0.7 }",
        ]
    );
    assert_eq!(ui.shown[0].0, "OK");
    assert_eq!(ui.shown[1].0, "OK");
}

#[test]
fn test_add_failure_titled_error() {
    let mut runner = RecordingRunner::replying(
        Status::NormalExit(1),
        "Error: Could not process rule: No such file or directory\n",
    );
    let mut ui = ScriptedUi::new(
        &[Selected(MANAGE_BLACKLIST), Selected(ADD), Choice::Cancelled, Choice::Cancelled],
        &[Some("1.2.3.4")],
    );
    run_scripted(&mut runner, &mut ui);
    assert_eq!(ui.shown[0].0, "Error");
    assert!(ui.shown[0].1.contains("No such file"));
}

#[test]
fn test_view_set_uses_set_name_in_title() {
    let mut runner = RecordingRunner::ok();
    let mut ui = ScriptedUi::new(
        &[Selected(MANAGE_BLACKLIST), Selected(VIEW), Choice::Cancelled, Choice::Cancelled],
        &[],
    );
    run_scripted(&mut runner, &mut ui);
    assert_eq!(runner.commands, vec!["nft list set inet filter blacklist4"]);
    assert_eq!(ui.shown[0].0, "Set: blacklist4");
}

#[test]
fn test_apply_asks_for_confirmation() {
    let mut runner = RecordingRunner::ok();
    let mut ui = ScriptedUi::new(
        &[Selected(APPLY_CONFIG), Selected(0), Selected(APPLY_CONFIG), Selected(1), Selected(EXIT)],
        &[],
    );
    run_scripted(&mut runner, &mut ui);

    assert_eq!(runner.commands, vec!["nft -f /etc/nftables.conf"]);
    assert_eq!(ui.menus[1].1, vec!["No", "Yes"]);
    assert_eq!(ui.shown[0].0, "Configuration applied");
}

#[test]
fn test_status_refreshed_before_each_main_menu() {
    let mut runner = RecordingRunner::ok();
    let mut ui = ScriptedUi::new(&[Selected(SHOW_RULESET), Selected(SHOW_RULESET), Selected(EXIT)], &[]);
    run_scripted(&mut runner, &mut ui);
    assert_eq!(ui.statuses, 3);
}

#[test]
fn test_main_menu_lists_configured_sets() {
    let mut config = Config::default();
    config.sets = vec!["allow4".to_string()];
    let catalog = Catalog::from_config(&config);
    let mut runner = RecordingRunner::ok();
    let mut ui = ScriptedUi::new(&[Choice::Cancelled], &[]);
    App::new(&catalog, &mut runner, &mut ui, &mut StaticProbe).run().unwrap();

    let (title, items) = &ui.menus[0];
    assert_eq!(title, "Main menu");
    assert!(items.contains(&"Manage set allow4".to_string()));
    assert!(!items.iter().any(|i| i.contains("blacklist4")));
    assert_eq!(items.last().map(String::as_str), Some("Exit"));
}

// ============================================================================
// Full stack: real screens on a test backend
// ============================================================================

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
}

fn run_on_screen(runner: &mut RecordingRunner, events: Vec<Event>) -> Result<()> {
    let catalog = Catalog::from_config(&Config::default());
    let terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut screen = Screen::new(
        terminal,
        Box::new(ScriptedEvents::new(events)),
        Theme::default_theme().clone(),
    )?;
    App::new(&catalog, runner, &mut screen, &mut StaticProbe).run()
}

#[test]
fn test_screen_prompt_escape_never_runs_a_command() {
    let mut runner = RecordingRunner::ok();
    let events = vec![
        key_event(KeyCode::Down),
        key_event(KeyCode::Down),
        key_event(KeyCode::Enter), // Manage set blacklist4
        key_event(KeyCode::Down),
        key_event(KeyCode::Enter), // Add IPv4 address
        key_event(KeyCode::Char('1')),
        key_event(KeyCode::Esc), // cancel prompt
        key_event(KeyCode::Char('q')),
        key_event(KeyCode::Char('q')),
    ];
    run_on_screen(&mut runner, events).unwrap();
    assert!(runner.commands.is_empty());
}

#[test]
fn test_screen_empty_prompt_never_runs_a_command() {
    let mut runner = RecordingRunner::ok();
    let events = vec![
        key_event(KeyCode::Char('j')),
        key_event(KeyCode::Char('j')),
        key_event(KeyCode::Enter),
        key_event(KeyCode::Char('j')),
        key_event(KeyCode::Enter),
        key_event(KeyCode::Enter), // empty input
        key_event(KeyCode::Esc),
        key_event(KeyCode::Esc),
    ];
    run_on_screen(&mut runner, events).unwrap();
    assert!(runner.commands.is_empty());
}

#[test]
fn test_screen_ruleset_round_trip() {
    let mut runner = RecordingRunner::replying(Status::NormalExit(2), "permission denied\n");
    let events = vec![
        key_event(KeyCode::Enter),     // Show ruleset
        key_event(KeyCode::Char('q')), // leave pager
        key_event(KeyCode::Char('q')), // leave main menu
    ];
    run_on_screen(&mut runner, events).unwrap();
    assert_eq!(runner.commands, vec!["nft list ruleset"]);
}

#[test]
fn test_screen_exit_entry_quits() {
    let mut runner = RecordingRunner::ok();
    let mut events = vec![key_event(KeyCode::Down); 20];
    events.push(key_event(KeyCode::Enter));
    run_on_screen(&mut runner, events).unwrap();
    assert!(runner.commands.is_empty());
}
