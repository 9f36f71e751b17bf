//! Terminal output for the agent's human mode.
//!
//! `--json` output never goes through `OutputContext`; see `json`.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use human::HumanRenderer;
pub use reporter::{SilentReporter, TerminalReporter};
pub use styles::Styles;

/// Styling and terminal state shared by the renderers and the reporter.
pub struct OutputContext {
    pub styles: Styles,
    /// Stdout is attached to a terminal.
    pub is_tty: bool,
    /// `--quiet`: only errors and JSON documents are printed.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a terminal, and never with `--no-color` or
    /// `NO_COLOR` set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let mut styles = Styles::default();
        if is_tty && !no_color && std::env::var_os("NO_COLOR").is_none() {
            styles.colorize();
        }
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.marked("✓", self.styles.success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.marked("!", self.styles.warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.marked("ℹ", self.styles.info, msg);
    }

    /// Section title, e.g. `Device:`.
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("  {}", title.style(self.styles.header));
        }
    }

    /// One `label  value` row under a header. Labels are padded by the caller.
    pub fn kv(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", label.style(self.styles.dim));
        }
    }

    fn marked(&self, symbol: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", symbol.style(style));
        }
    }
}
