// File: ./src/printer.rs
// Hands the printable page to the host. There is no print engine here: the page is
// written to disk and an external command (if configured) does the rest.
use crate::context::AppContext;
use crate::print::PrintDocument;
use crate::storage::FileStore;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The page was written; no print command is configured.
    Written(PathBuf),
    /// The page was written and accepted by the print command.
    Sent { path: PathBuf, command: String },
}

impl PrintOutcome {
    pub fn describe(&self) -> String {
        match self {
            PrintOutcome::Written(path) => {
                format!("Page written to {} - open it and print.", path.display())
            }
            PrintOutcome::Sent { path, command } => {
                format!("Sent {} to '{}'.", path.display(), command)
            }
        }
    }
}

pub trait PrintHost {
    fn print(&self, document: &PrintDocument) -> Result<PrintOutcome>;
}

#[derive(Debug, Clone)]
pub struct CommandPrinter {
    output_path: PathBuf,
    command: Vec<String>,
}

impl CommandPrinter {
    pub fn new(output_path: PathBuf, command: Vec<String>) -> Self {
        Self {
            output_path,
            command,
        }
    }

    pub fn from_context(ctx: &dyn AppContext, command: Vec<String>) -> Result<Self> {
        Ok(Self::new(ctx.get_print_file_path()?, command))
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }
}

impl PrintHost for CommandPrinter {
    fn print(&self, document: &PrintDocument) -> Result<PrintOutcome> {
        FileStore::save(&self.output_path, document.to_html())?;
        log::info!("print page written to {}", self.output_path.display());

        let Some((program, args)) = self.command.split_first() else {
            return Ok(PrintOutcome::Written(self.output_path.clone()));
        };

        // Captured so the command cannot draw over the terminal UI.
        let output = Command::new(program)
            .args(args)
            .arg(&self.output_path)
            .output()
            .with_context(|| format!("Failed to run print command '{}'", program))?;

        let command = self.command.join(" ");
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!("print command '{}' failed: {}", command, stderr.trim());
            bail!("'{}' failed ({}): {}", command, output.status, stderr.trim());
        }

        Ok(PrintOutcome::Sent {
            path: self.output_path.clone(),
            command,
        })
    }
}
