//! User-facing progress output
//!
//! Provides a simple API for reporting what a run is doing:
//! - Current phase (Loading, Fetching, Converting, Writing)
//! - Progress (current/total with a label)
//! - Activity lines
//!
//! Diagnostics (degraded sources, dropped records) go through `tracing`
//! instead; this module only covers what the user asked to see.

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;

/// Application phases shown on the console
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Fetching,
    Converting,
    Writing,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Loading => write!(f, "Loading input"),
            Phase::Fetching => write!(f, "Fetching reference data"),
            Phase::Converting => write!(f, "Converting records"),
            Phase::Writing => write!(f, "Writing output"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - allows both console and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
}

/// Console output with an indicatif bar for long-running steps
#[derive(Default)]
pub struct ConsoleUi {
    bar: Option<ProgressBar>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self { bar: None }
    }

    fn bar(&mut self, total: u64) -> &ProgressBar {
        self.bar.get_or_insert_with(|| {
            let pb = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{msg:24} [{bar:40.cyan/blue}] {pos}/{len}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        })
    }

    fn print(&self, line: String) {
        match &self.bar {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.print(format!("==> {}", phase));
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.print(format!("    {}", info.into()));
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let pb = self.bar(total);
        pb.set_length(total);
        pb.set_position(current);
        pb.set_message(label.into());
    }

    fn clear_progress(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        self.print(message.into());
    }
}

/// Silent UI implementation for testing and `--quiet`
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
