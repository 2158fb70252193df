//! # Command Catalog
//!
//! The fixed set of firewall actions offered by the UI, built from the
//! [`Config`]. Each action pairs a command template with the titles used to
//! show its result.
//!
//! | Action | Command |
//! |--------|---------|
//! | Show ruleset | `nft list ruleset` |
//! | Listening services | `ss -tulpn` |
//! | View set | `nft list set <family> <table> <set>` |
//! | Add address | `nft add element <family> <table> <set> { <addr> }` |
//! | Remove address | `nft delete element <family> <table> <set> { <addr> }` |
//! | Flush set | `nft flush set <family> <table> <set>` |
//! | Check configuration | `nft -c -f <config_file>` |
//! | Apply configuration | `nft -f <config_file>` |
//! | Kernel log | `journalctl -k --no-pager -n <lines>` |
//!
//! Address arguments only accept an [`Ipv4Addr`], so an address has to go
//! through [`parse_ipv4`](crate::command::parse_ipv4) before it can be
//! formatted into a command.

use crate::command::{CommandLine, CommandTemplate};
use crate::config::Config;
use std::net::Ipv4Addr;

/// A command together with the titles for its result screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub command: CommandLine,
    pub ok_title: String,
    pub error_title: String,
    /// Question to confirm before running, for destructive commands.
    pub confirm: Option<String>,
}

impl Job {
    fn new(command: CommandLine, ok_title: impl Into<String>, error_title: impl Into<String>) -> Self {
        Self {
            command,
            ok_title: ok_title.into(),
            error_title: error_title.into(),
            confirm: None,
        }
    }

    fn confirm_with(mut self, question: Option<String>) -> Self {
        self.confirm = question;
        self
    }

    pub fn title_for(&self, success: bool) -> &str {
        if success {
            &self.ok_title
        } else {
            &self.error_title
        }
    }
}

/// What a main menu entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Run(Job),
    ManageSet(String),
    Exit,
}

/// One main menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
}

/// Entries of the per-set sub-menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAction {
    View,
    Add,
    Remove,
    Flush,
    Back,
}

impl SetAction {
    pub const ALL: [SetAction; 5] = [
        SetAction::View,
        SetAction::Add,
        SetAction::Remove,
        SetAction::Flush,
        SetAction::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SetAction::View => "View set",
            SetAction::Add => "Add IPv4 address",
            SetAction::Remove => "Remove IPv4 address",
            SetAction::Flush => "Flush set",
            SetAction::Back => "Back",
        }
    }
}

/// Command templates for the configured firewall.
#[derive(Debug, Clone)]
pub struct Catalog {
    family: String,
    table: String,
    config_file: String,
    kernel_log_lines: String,
    sets: Vec<String>,
    confirm_destructive: bool,
    list_ruleset: CommandTemplate,
    list_set: CommandTemplate,
    add_element: CommandTemplate,
    delete_element: CommandTemplate,
    flush_set: CommandTemplate,
    check_config: CommandTemplate,
    apply_config: CommandTemplate,
}

impl Catalog {
    pub fn from_config(config: &Config) -> Self {
        let nft = config.nft_binary.as_str();
        Self {
            family: config.family.clone(),
            table: config.table.clone(),
            config_file: config.config_file.display().to_string(),
            kernel_log_lines: config.kernel_log_lines.to_string(),
            sets: config.sets.clone(),
            confirm_destructive: config.confirm_destructive,
            list_ruleset: CommandTemplate::new(nft, ["list", "ruleset"]),
            list_set: CommandTemplate::new(nft, ["list", "set", "{family}", "{table}", "{set}"]),
            add_element: CommandTemplate::new(
                nft,
                ["add", "element", "{family}", "{table}", "{set}", "{", "{addr}", "}"],
            ),
            delete_element: CommandTemplate::new(
                nft,
                ["delete", "element", "{family}", "{table}", "{set}", "{", "{addr}", "}"],
            ),
            flush_set: CommandTemplate::new(nft, ["flush", "set", "{family}", "{table}", "{set}"]),
            check_config: CommandTemplate::new(nft, ["-c", "-f", "{config_file}"]),
            apply_config: CommandTemplate::new(nft, ["-f", "{config_file}"]),
        }
    }

    pub fn sets(&self) -> &[String] {
        &self.sets
    }

    /// Main menu entries; the last one is always [`ActionKind::Exit`].
    pub fn main_menu(&self) -> Vec<Action> {
        let mut actions = vec![
            Action {
                label: "Show ruleset (nft list ruleset)".to_string(),
                kind: ActionKind::Run(self.list_ruleset()),
            },
            Action {
                label: "Show listening services (ss -tulpn)".to_string(),
                kind: ActionKind::Run(self.listening_services()),
            },
        ];
        actions.extend(self.sets.iter().map(|set| Action {
            label: format!("Manage set {set}"),
            kind: ActionKind::ManageSet(set.clone()),
        }));
        actions.extend([
            Action {
                label: format!("Check configuration ({})", self.config_file),
                kind: ActionKind::Run(self.check_config()),
            },
            Action {
                label: format!("Apply configuration ({})", self.config_file),
                kind: ActionKind::Run(self.apply_config()),
            },
            Action {
                label: "Show kernel log (journalctl -k)".to_string(),
                kind: ActionKind::Run(self.kernel_log()),
            },
            Action {
                label: "Exit".to_string(),
                kind: ActionKind::Exit,
            },
        ]);
        actions
    }

    pub fn list_ruleset(&self) -> Job {
        Job::new(self.list_ruleset.render(&[]), "Ruleset", "Ruleset (error)")
    }

    pub fn listening_services(&self) -> Job {
        Job::new(
            CommandLine::new("ss").arg("-tulpn"),
            "Listening services",
            "Listening services (error)",
        )
    }

    pub fn check_config(&self) -> Job {
        let vars = [("config_file", self.config_file.as_str())];
        Job::new(
            self.check_config.render(&vars),
            "Configuration OK",
            "Configuration ERROR",
        )
    }

    pub fn apply_config(&self) -> Job {
        let vars = [("config_file", self.config_file.as_str())];
        let question = format!("Apply {} now?", self.config_file);
        Job::new(
            self.apply_config.render(&vars),
            "Configuration applied",
            "Apply ERROR",
        )
        .confirm_with(self.confirm_destructive.then_some(question))
    }

    pub fn kernel_log(&self) -> Job {
        Job::new(
            CommandLine::new("journalctl").args(["-k", "--no-pager", "-n", self.kernel_log_lines.as_str()]),
            format!("Kernel log (last {} lines)", self.kernel_log_lines),
            "Kernel log (error)",
        )
    }

    pub fn list_set(&self, set: &str) -> Job {
        Job::new(
            self.list_set.render(&self.set_vars(set)),
            format!("Set: {set}"),
            format!("Set: {set} (error)"),
        )
    }

    pub fn add_element(&self, set: &str, addr: Ipv4Addr) -> Job {
        Job::new(self.render_element(&self.add_element, set, addr), "OK", "Error")
    }

    pub fn delete_element(&self, set: &str, addr: Ipv4Addr) -> Job {
        Job::new(self.render_element(&self.delete_element, set, addr), "OK", "Error")
    }

    pub fn flush_set(&self, set: &str) -> Job {
        let question = format!("Remove every address from {set}?");
        Job::new(self.flush_set.render(&self.set_vars(set)), "OK", "Error")
            .confirm_with(self.confirm_destructive.then_some(question))
    }

    /// `ip -br a`, used for the status header.
    pub fn host_addresses() -> CommandLine {
        CommandLine::new("ip").args(["-br", "a"])
    }

    fn set_vars<'a>(&'a self, set: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("family", self.family.as_str()),
            ("table", self.table.as_str()),
            ("set", set),
        ]
    }

    fn render_element(&self, template: &CommandTemplate, set: &str, addr: Ipv4Addr) -> CommandLine {
        let addr = addr.to_string();
        let [family, table, set] = self.set_vars(set);
        template.render(&[family, table, set, ("addr", addr.as_str())])
    }
}
