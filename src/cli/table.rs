use crate::model::{Contact, ContactField};

/// Splits `contacts` into pages, pairing each page with the 1-based row
/// number of its first entry.
pub fn pages(contacts: &[Contact], page_size: usize) -> impl Iterator<Item = (usize, &[Contact])> {
    let size = page_size.max(1);
    contacts
        .chunks(size)
        .enumerate()
        .map(move |(i, page)| (i * size + 1, page))
}

/// Renders contacts as an outlined table, numbering rows from `first_number`.
pub fn render(contacts: &[Contact], first_number: usize) -> String {
    let mut header = vec!["#".to_string()];
    header.extend(ContactField::ALL.iter().map(|f| f.title().to_string()));
    header.push("ID".to_string());

    let rows: Vec<Vec<String>> = contacts
        .iter()
        .enumerate()
        .map(|(i, contact)| {
            let mut row = vec![(first_number + i).to_string()];
            row.extend(ContactField::ALL.iter().map(|&f| contact.get(f).to_string()));
            row.push(contact.id().to_string());
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&border(&widths, '-'));
    out.push_str(&line(&header, &widths));
    out.push_str(&border(&widths, '='));
    for row in &rows {
        out.push_str(&line(row, &widths));
    }
    out.push_str(&border(&widths, '-'));
    out
}

fn border(widths: &[usize], fill: char) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.extend(std::iter::repeat(fill).take(w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        s.push_str(&format!(" {:<width$} |", cell, width = w));
    }
    s.push('\n');
    s
}
