mod cli;
mod error;
mod fmt;
mod models;
mod month;
mod reports;
mod settings;
mod storage;
mod tui;

use clap::Parser;

use cli::{Cli, Commands, TargetCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::dashboard::run(),
        Some(Commands::Init { data_dir }) => cli::init::run(data_dir),
        Some(Commands::Add(args)) => cli::add::run(args),
        Some(Commands::Delete { id }) => cli::delete::run(&id),
        Some(Commands::List { month, search }) => cli::list::run(month, search),
        Some(Commands::Stats { month, search }) => cli::stats::run(month, search),
        Some(Commands::Target { command }) => match command {
            TargetCommands::Show { month } => cli::target::show(month),
            TargetCommands::Set { month, asp, goal } => cli::target::set(month, asp, goal),
        },
        Some(Commands::Export { month, search, output }) => cli::export::run(month, search, output),
        Some(Commands::Demo) => cli::demo::run(),
        Some(Commands::Status) => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
