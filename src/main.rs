use tagfetch::cli::Cli;
use tagfetch::logging;

fn main() {
    // Initialize logging as early as possible; a missing or unwritable state
    // dir must not keep the tool from running.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("tagfetch error: {:#}", err);
        std::process::exit(1);
    }
}
