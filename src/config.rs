use std::path::PathBuf;

use crate::error::{PhonebookError, PhonebookResult};

pub const DEFAULT_STORE_DIR: &str = "database";
pub const DEFAULT_STORE_FILE: &str = "phones.csv";
pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    /// Rows per table page in the console.
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_DIR).join(DEFAULT_STORE_FILE),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Run(Config),
    Help,
}

impl Config {
    /// Parses command-line arguments (without the program name).
    pub fn from_args<I>(args: I) -> PhonebookResult<Launch>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" | "-f" => {
                    let path = args.next().ok_or_else(|| {
                        PhonebookError::Config("--file requires a path argument".into())
                    })?;
                    config.store_path = PathBuf::from(path);
                }
                "--page-size" | "-p" => {
                    let raw = args.next().ok_or_else(|| {
                        PhonebookError::Config("--page-size requires a number".into())
                    })?;
                    config.page_size = parse_page_size(&raw)?;
                }
                "--help" | "-h" => return Ok(Launch::Help),
                other => {
                    return Err(PhonebookError::Config(format!(
                        "unknown argument: {}",
                        other
                    )))
                }
            }
        }

        Ok(Launch::Run(config))
    }
}

fn parse_page_size(raw: &str) -> PhonebookResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PhonebookError::Config(format!(
            "page size must be a positive number, got '{}'",
            raw
        ))),
    }
}

pub fn usage() -> &'static str {
    "Phonebook - console contact manager

Usage: phonebook [OPTIONS]

Options:
  -f, --file <PATH>       Contact file path (default: database/phones.csv)
  -p, --page-size <N>     Rows per page when listing (default: 15)
  -h, --help              Show this help

Set RUST_LOG (e.g. RUST_LOG=debug) to see diagnostics on stderr."
}
