// File: ./src/cli.rs
//! Command-line parsing and help text.
use crate::row::CommitRule;
use anyhow::{Result, anyhow};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub root: Option<PathBuf>,
    pub copies: Option<usize>,
    pub slice_at: Option<usize>,
    pub validation: Option<CommitRule>,
    pub show_help: bool,
}

impl CliOptions {
    /// Parses the arguments after the binary name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let mut options = CliOptions::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--help" | "-h" | "help" => options.show_help = true,
                "--root" | "-r" => {
                    options.root = Some(PathBuf::from(Self::value(&args, i, flag)?));
                    i += 1;
                }
                "--copies" | "-c" => {
                    options.copies = Some(Self::positive(&args, i, flag)?);
                    i += 1;
                }
                "--slice-at" | "-s" => {
                    options.slice_at = Some(Self::positive(&args, i, flag)?);
                    i += 1;
                }
                "--validation" => {
                    let raw = Self::value(&args, i, flag)?;
                    let rule = raw
                        .parse::<CommitRule>()
                        .map_err(|_| {
                            anyhow!(
                                "Unknown validation rule '{}' (expected {})",
                                raw,
                                CommitRule::names()
                            )
                        })?;
                    options.validation = Some(rule);
                    i += 1;
                }
                other => return Err(anyhow!("Unknown argument '{}'", other)),
            }
            i += 1;
        }

        Ok(options)
    }

    fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
        args.get(i + 1)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("{} expects a value", flag))
    }

    fn positive(args: &[String], i: usize, flag: &str) -> Result<usize> {
        let raw = Self::value(args, i, flag)?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(anyhow!("{} expects a positive number, got '{}'", flag, raw)),
        }
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Pocket phone book v{} - print a fold-up phone list (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>        Use a different directory for config, log and output.");
    println!("    -c, --copies <n>         Copies per printed page (default 6).");
    println!("    -s, --slice-at <n>       Rows per column; the book holds twice as many.");
    println!("    --validation <rule>      {}", CommitRule::names());
    println!("    -h, --help               Show this help message.");
    println!();
    println!("KEYS:");
    println!("    Up/Down         Move between rows");
    println!("    Tab/Shift+Tab   Switch between name and phone (saves the field you leave)");
    println!("    Enter           Save the current field");
    println!("    Ctrl+P          Print");
    println!("    F1              Toggle usage help");
    println!("    Esc / Ctrl+Q    Quit (entries are not kept)");
}
