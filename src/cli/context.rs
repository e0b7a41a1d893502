use std::io::{self, BufRead, Write};

use crate::error::PhonebookError;
use crate::store::ContactStore;

pub struct CliContext {
    pub store: Box<dyn ContactStore>,
    pub page_size: usize,
    input: Box<dyn BufRead>,
}

impl CliContext {
    pub fn new(store: Box<dyn ContactStore>, page_size: usize, input: Box<dyn BufRead>) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
            input,
        }
    }

    /// Context reading from the process's stdin.
    pub fn stdin(store: Box<dyn ContactStore>, page_size: usize) -> Self {
        Self::new(store, page_size, Box::new(io::BufReader::new(io::stdin())))
    }

    pub fn into_store(self) -> Box<dyn ContactStore> {
        self.store
    }

    /// Prompt and read a line. Returns None on EOF.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&mut self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Ask a yes/no question. Anything but `y`/`yes` (or EOF) is no.
    pub fn confirm(&mut self, question: &str) -> bool {
        matches!(
            self.prompt(question).map(|s| s.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    pub fn print_error(&self, e: &PhonebookError) {
        match e {
            PhonebookError::Validation(violations) => {
                println!("Error: the contact was not saved.");
                for v in violations {
                    println!("  - {}", v);
                }
            }
            PhonebookError::NotFound { .. } => {
                println!("Error: {}", e);
                println!("The contact list has changed. List the contacts again and retry.");
            }
            _ => println!("Error: {}", e),
        }
    }
}
