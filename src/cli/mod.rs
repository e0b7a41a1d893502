pub mod contact_commands;
pub mod context;
pub mod table;

use context::CliContext;

/// Run the interactive REPL until the user quits or input ends.
pub fn run(ctx: &mut CliContext) {
    println!("Phonebook");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();
    print_menu();

    repl_loop(ctx);
}

fn repl_loop(ctx: &mut CliContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" | "0" => break,

            "list" | "ls" | "find" | "1" => contact_commands::list(ctx, args),
            "add" | "2" => contact_commands::add(ctx),
            "edit" | "update" | "3" => contact_commands::edit(ctx, args),
            "remove" | "rm" | "delete" | "4" => contact_commands::remove(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
    println!("Bye!");
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_menu() {
    println!("  1 list    2 add    3 edit    4 remove    0 exit");
    println!();
}

fn print_help() {
    println!(
        r#"
COMMANDS:

  list [query]    (1)  List contacts, or those matching the query
  add             (2)  Add a new contact
  edit [query]    (3)  Pick a contact and change some of its fields
  remove [query]  (4)  Pick a contact and delete it
  help                 Show this help
  exit / quit / q (0)  Exit

TIPS:
  - Search is case-insensitive and matches any part of any field, including the ID
  - A contact needs a first name and at least one phone number
  - Phone numbers are digits with an optional leading '+', up to 12 characters"#
    );
}
