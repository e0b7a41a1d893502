use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use super::record::ContactRecord;
use super::{matches_search, search_filter, ContactStore};
use crate::error::{FieldViolation, PhonebookError, PhonebookResult};
use crate::model::Contact;

pub const DELIMITER: u8 = b',';

#[derive(Debug, Clone, Copy)]
enum Rewrite {
    Update,
    Remove,
}

/// Contacts stored one per line in a comma-separated text file.
///
/// Values are quoted only when they contain the delimiter, a quote or a line
/// break, so ordinary rows stay plain `a,b,c` text. Every call opens and
/// closes the file; `update` and `remove` rewrite it whole.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens the store at `path`, creating parent directories and an empty
    /// file when missing.
    pub fn open(path: impl Into<PathBuf>) -> PhonebookResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;

        debug!(path = %path.display(), "contact file ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contacts(&self, search: Option<&str>) -> PhonebookResult<Vec<Contact>> {
        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(DELIMITER)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut contacts = Vec::new();
        let mut row = StringRecord::new();
        while reader.read_record(&mut row)? {
            // Rows are rebuilt before filtering, so one bad row fails every read.
            let line = row.position().map_or(0, |p| p.line());
            let contact = ContactRecord::from_row(&row)
                .and_then(ContactRecord::into_contact)
                .map_err(|e| malformed_at(e, line))?;

            if search.map_or(true, |needle| matches_search(&contact, needle)) {
                contacts.push(contact);
            }
        }
        Ok(contacts)
    }

    fn append(&self, contact: &Contact) -> PhonebookResult<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv_writer(file);
        writer.serialize(ContactRecord::from(contact))?;
        writer.flush()?;
        Ok(())
    }

    /// Replaces the file with `contacts`. Content goes to a sibling file
    /// first and is renamed into place.
    fn write_all(&self, contacts: &[Contact]) -> PhonebookResult<()> {
        let tmp = self.temp_path();

        let written = (|| -> PhonebookResult<()> {
            let mut writer = csv_writer(File::create(&tmp)?);
            for contact in contacts {
                writer.serialize(ContactRecord::from(contact))?;
            }
            writer.flush()?;
            Ok(())
        })();

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "could not remove temporary file");
            }
            return Err(e);
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn rewrite(&self, contact: &Contact, mode: Rewrite) -> PhonebookResult<()> {
        let mut contacts = self.read_contacts(None)?;

        let Some(pos) = contacts.iter().position(|c| c.same_identity(contact)) else {
            warn!(id = %contact.id(), ?mode, "contact not found");
            return Err(PhonebookError::NotFound {
                id: contact.id().to_string(),
            });
        };

        contacts.remove(pos);
        if let Rewrite::Update = mode {
            contacts.push(contact.clone());
        }

        self.write_all(&contacts)?;
        info!(id = %contact.id(), ?mode, remaining = contacts.len(), "contact file rewritten");
        Ok(())
    }
}

impl ContactStore for FileStore {
    fn add(&mut self, contact: &Contact) -> PhonebookResult<()> {
        let id = contact.id().to_string();
        let existing = self.read_contacts(Some(id.as_str()))?;
        if existing.iter().any(|c| c.same_identity(contact)) {
            warn!(%id, "refusing duplicate contact");
            return Err(PhonebookError::Duplicate { id });
        }

        self.append(contact)?;
        info!(%id, "contact added");
        Ok(())
    }

    fn get(&self, search: Option<&str>) -> PhonebookResult<Vec<Contact>> {
        let search = search_filter(search);
        let contacts = self.read_contacts(search)?;
        debug!(search = ?search, found = contacts.len(), "contacts read");
        Ok(contacts)
    }

    fn update(&mut self, contact: &Contact) -> PhonebookResult<()> {
        self.rewrite(contact, Rewrite::Update)
    }

    fn remove(&mut self, contact: &Contact) -> PhonebookResult<()> {
        self.rewrite(contact, Rewrite::Remove)
    }
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}

fn malformed_at(err: PhonebookError, line: u64) -> PhonebookError {
    match err {
        PhonebookError::Validation(mut violations) => {
            violations.insert(0, FieldViolation::new("line", format!("{} is malformed", line)));
            PhonebookError::Validation(violations)
        }
        other => other,
    }
}
