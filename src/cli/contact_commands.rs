use crate::cli::context::CliContext;
use crate::cli::table;
use crate::model::*;
use crate::validation::trim_input;

pub fn list(ctx: &mut CliContext, args: &str) {
    let contacts = match ctx.store.get(Some(args.trim())) {
        Ok(c) => c,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if contacts.is_empty() {
        if args.trim().is_empty() {
            println!("The phonebook is empty. Use 'add' to create a contact.");
        } else {
            println!("No contacts match '{}'.", args.trim());
        }
        return;
    }

    println!("Contacts ({}):", contacts.len());
    show_paged(ctx, &contacts);
}

pub fn add(ctx: &mut CliContext) {
    loop {
        println!("Adding a new contact (press Enter to skip optional fields)");
        println!();

        let mut draft = ContactDraft::default();
        for field in ContactField::ALL {
            let Some(value) = ctx.prompt(&field_prompt(field)) else {
                return;
            };
            draft.set(field, value);
        }

        let saved = Contact::new(draft).and_then(|contact| {
            ctx.store.add(&contact)?;
            Ok(contact)
        });

        match saved {
            Ok(contact) => {
                println!("Added {}", contact.first_name());
                return;
            }
            Err(e) => {
                ctx.print_error(&e);
                if !e.is_recoverable() || !ctx.confirm("Try again? (y/n): ") {
                    return;
                }
            }
        }
    }
}

pub fn edit(ctx: &mut CliContext, args: &str) {
    let Some(contact) = choose_contact(ctx, args, "edit") else {
        return;
    };

    println!();
    for (i, field) in ContactField::ALL.iter().enumerate() {
        println!("  {}: {}, current value: {}", i + 1, field.title(), contact.get(*field));
    }

    let fields = loop {
        let Some(input) = ctx.prompt("Fields to change (comma-separated, e.g. 1,3): ") else {
            return;
        };
        if input.is_empty() {
            println!("Cancelled.");
            return;
        }
        match parse_field_choice(&input) {
            Some(fields) => break fields,
            None => println!("Enter field numbers between 1 and {}.", ContactField::ALL.len()),
        }
    };

    let mut draft = contact.draft();
    for field in fields {
        let Some(value) = ctx.prompt(&field_prompt(field)) else {
            return;
        };
        draft.set(field, value);
    }

    let saved = Contact::with_id(draft, contact.id()).and_then(|updated| {
        ctx.store.update(&updated)?;
        Ok(updated)
    });

    match saved {
        Ok(updated) => println!("Updated {}", updated.first_name()),
        Err(e) => {
            ctx.print_error(&e);
            println!("The contact was not changed.");
        }
    }
}

pub fn remove(ctx: &mut CliContext, args: &str) {
    let Some(contact) = choose_contact(ctx, args, "remove") else {
        return;
    };

    let question = format!(
        "Remove {} {} ({})? (y/n): ",
        contact.first_name(),
        contact.last_name(),
        contact.id()
    );
    if !ctx.confirm(&question) {
        println!("Cancelled.");
        return;
    }

    match ctx.store.remove(&contact) {
        Ok(()) => println!("Removed {}", contact.first_name()),
        Err(e) => ctx.print_error(&e),
    }
}

/// Parses a list like `1, 3,6` into fields. Returns None on any bad entry.
pub fn parse_field_choice(input: &str) -> Option<Vec<ContactField>> {
    let mut fields = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let n: usize = part.parse().ok()?;
        let field = *ContactField::ALL.get(n.checked_sub(1)?)?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

fn field_prompt(field: ContactField) -> String {
    if field.is_required() {
        format!("{} (required): ", field.title())
    } else {
        format!("{}: ", field.title())
    }
}

fn show_paged(ctx: &mut CliContext, contacts: &[Contact]) {
    let page_size = ctx.page_size;
    let total = contacts.len();
    for (first, page) in table::pages(contacts, page_size) {
        print!("{}", table::render(page, first));
        let shown = first + page.len() - 1;
        if shown < total && ctx.read_line("Press Enter for the next page...").is_none() {
            return;
        }
    }
}

/// Searches, shows the matches and asks the user to pick one by row number.
fn choose_contact(ctx: &mut CliContext, args: &str, action: &str) -> Option<Contact> {
    let query = if args.trim().is_empty() {
        ctx.prompt("Search (Enter for all): ")?
    } else {
        trim_input(args)
    };

    let contacts = match ctx.store.get(Some(query.as_str())) {
        Ok(c) => c,
        Err(e) => {
            ctx.print_error(&e);
            return None;
        }
    };
    if contacts.is_empty() {
        println!("No contacts match '{}'.", query);
        return None;
    }

    show_paged(ctx, &contacts);

    loop {
        let choice = ctx.prompt(&format!(
            "Number of the contact to {} (Enter to cancel): ",
            action
        ))?;
        if choice.is_empty() {
            println!("Cancelled.");
            return None;
        }
        match choice.parse::<usize>() {
            Ok(n) if (1..=contacts.len()).contains(&n) => return Some(contacts[n - 1].clone()),
            _ => println!("Enter a number between 1 and {}.", contacts.len()),
        }
    }
}
