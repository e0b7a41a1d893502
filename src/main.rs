use phonebook::cli::{self, context::CliContext};
use phonebook::config::{self, Config, Launch};
use phonebook::store::FileStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout belongs to the interactive UI.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Launch::Run(config)) => config,
        Ok(Launch::Help) => {
            println!("{}", config::usage());
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information.");
            std::process::exit(1);
        }
    };

    let store = match FileStore::open(&config.store_path) {
        Ok(store) => store,
        Err(e) => {
            error!(path = %config.store_path.display(), error = %e, "cannot open contact file");
            eprintln!("Error opening {}: {}", config.store_path.display(), e);
            std::process::exit(1);
        }
    };
    info!(path = %store.path().display(), page_size = config.page_size, "starting phonebook");

    let mut ctx = CliContext::stdin(Box::new(store), config.page_size);
    cli::run(&mut ctx);
}
