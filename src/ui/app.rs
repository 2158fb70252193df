//! # Controller
//!
//! Drives the main menu and the per-set sub-menu. Every selection runs
//! through the same steps: optionally confirm, run the command, show its
//! output in the pager under a title picked from the exit status.
//!
//! The controller talks to the screen only through the [`Ui`] trait and to
//! processes only through [`CommandRunner`], so it can be exercised with
//! scripted stand-ins for both.

use crate::command::{parse_ipv4, ActionKind, Catalog, CommandRunner, Job, SetAction};
use crate::host::{HostProbe, HostStatus};
use crate::ui::menu::{run_menu, Choice};
use crate::ui::pager::run_pager;
use crate::ui::prompt::run_prompt;
use crate::ui::terminal::Screen;
use anyhow::Result;
use ratatui::backend::Backend;
use tracing::{debug, info, warn};

/// Longest address input accepted by the prompt, terminator included.
pub const ADDRESS_MAX_LEN: usize = 128;

pub const MAIN_MENU_TITLE: &str = "Main menu";
pub const ERROR_TITLE: &str = "Error";

/// The three interactive screens, as seen by the controller.
pub trait Ui {
    /// Replace the facts in the status header.
    fn set_status(&mut self, status: HostStatus);

    /// Modal menu. See [`run_menu`].
    fn choose(&mut self, title: &str, items: &[String]) -> Result<Choice>;

    /// Modal text prompt accepting up to `max_len - 1` characters. See
    /// [`run_prompt`].
    fn ask(&mut self, title: &str, label: &str, max_len: usize) -> Result<Option<String>>;

    /// Full-screen pager. See [`run_pager`].
    fn show(&mut self, title: &str, text: &str) -> Result<()>;
}

impl<B: Backend> Ui for Screen<B>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    fn set_status(&mut self, status: HostStatus) {
        Screen::set_status(self, status);
    }

    fn choose(&mut self, title: &str, items: &[String]) -> Result<Choice> {
        run_menu(self, title, items)
    }

    fn ask(&mut self, title: &str, label: &str, max_len: usize) -> Result<Option<String>> {
        run_prompt(self, title, label, max_len)
    }

    fn show(&mut self, title: &str, text: &str) -> Result<()> {
        run_pager(self, title, text)
    }
}

pub struct App<'a> {
    catalog: &'a Catalog,
    runner: &'a mut dyn CommandRunner,
    ui: &'a mut dyn Ui,
    probe: &'a mut dyn HostProbe,
}

impl<'a> App<'a> {
    pub fn new(
        catalog: &'a Catalog,
        runner: &'a mut dyn CommandRunner,
        ui: &'a mut dyn Ui,
        probe: &'a mut dyn HostProbe,
    ) -> Self {
        Self {
            catalog,
            runner,
            ui,
            probe,
        }
    }

    /// Run the main menu until the user picks Exit or backs out of it.
    pub fn run(&mut self) -> Result<()> {
        let actions = self.catalog.main_menu();
        let labels: Vec<String> = actions.iter().map(|a| a.label.clone()).collect();

        loop {
            let status = self.probe.status();
            self.ui.set_status(status);

            let Choice::Selected(index) = self.ui.choose(MAIN_MENU_TITLE, &labels)? else {
                break;
            };
            let Some(action) = actions.get(index) else {
                break;
            };
            debug!(action = %action.label, "main menu selection");

            match &action.kind {
                ActionKind::Run(job) => self.run_job(job)?,
                ActionKind::ManageSet(set) => self.manage_set(set)?,
                ActionKind::Exit => break,
            }
        }

        info!("leaving main menu");
        Ok(())
    }

    /// Sub-menu for one set, until Back or cancel.
    fn manage_set(&mut self, set: &str) -> Result<()> {
        let title = format!("Set: {set}");
        let labels: Vec<String> = SetAction::ALL.iter().map(|a| a.label().to_string()).collect();

        loop {
            let Choice::Selected(index) = self.ui.choose(&title, &labels)? else {
                return Ok(());
            };
            let action = SetAction::ALL.get(index).copied().unwrap_or(SetAction::Back);
            debug!(set, ?action, "set menu selection");

            match action {
                SetAction::View => {
                    let job = self.catalog.list_set(set);
                    self.run_job(&job)?;
                }
                SetAction::Add | SetAction::Remove => self.edit_element(set, action)?,
                SetAction::Flush => {
                    let job = self.catalog.flush_set(set);
                    self.run_job(&job)?;
                }
                SetAction::Back => return Ok(()),
            }
        }
    }

    /// Prompt for an address, validate it, then add it to or remove it
    /// from `set`. Nothing runs unless the address is valid.
    fn edit_element(&mut self, set: &str, action: SetAction) -> Result<()> {
        let label = format!("IPv4 address ({set}):");
        let Some(input) = self.ui.ask(action.label(), &label, ADDRESS_MAX_LEN)? else {
            debug!(set, "address prompt cancelled");
            return Ok(());
        };

        let addr = match parse_ipv4(&input) {
            Ok(addr) => addr,
            Err(err) => {
                warn!(%err, "rejected address input");
                return self
                    .ui
                    .show(ERROR_TITLE, &format!("Invalid IPv4 address.\n\n{err}\n"));
            }
        };

        let job = if action == SetAction::Add {
            self.catalog.add_element(set, addr)
        } else {
            self.catalog.delete_element(set, addr)
        };
        self.run_job(&job)
    }

    fn run_job(&mut self, job: &Job) -> Result<()> {
        if let Some(question) = &job.confirm {
            if !self.confirm(question)? {
                debug!(command = %job.command, "declined");
                return Ok(());
            }
        }

        let output = self.runner.execute(&job.command);
        let title = job.title_for(output.is_success());
        self.ui.show(title, &output.text)
    }

    /// Yes/No menu. "No" comes first so a stray Enter declines.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let items = ["No".to_string(), "Yes".to_string()];
        Ok(self.ui.choose(question, &items)? == Choice::Selected(1))
    }
}
