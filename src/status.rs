//! Console status records.

use colored::Colorize;
use std::fmt;

/// Outcome of one generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// An enum file was written.
    Generated(String),
    /// Something was deliberately left alone.
    Ignored(String),
}

impl Status {
    /// Single-line status text, `[✔] ...` or `[-] ...`.
    pub fn render(&self) -> String {
        match self {
            Status::Generated(name) => format!("{} {} generated", "[✔]".green().bold(), name.bold()),
            Status::Ignored(subject) => format!("{} {} ignored", "[-]".yellow(), subject),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
