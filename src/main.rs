mod cli;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ConfigCommands};
use gst_invoice::{logging, settings};

fn main() {
    let cli = Cli::parse();
    logging::init(&settings::load_settings().log_level);

    let result = match cli.command {
        Commands::Compute {
            file,
            page_size,
            json,
        } => cli::compute::run(&file, page_size, json),
        Commands::Words { amount } => cli::lookup::words(amount),
        Commands::State { query } => cli::lookup::state(&query),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                page_size,
                seller,
                log_level,
            } => cli::config::set(page_size, seller, log_level),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gst-invoice", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
