use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;

use cardiee::cards::SqliteCardStore;
use cardiee::cli::args::{Cli, Commands, OutputFormat};
use cardiee::cli::commands::{self, StudyOptions};
use cardiee::config::{Config, Paths};
use cardiee::session::StudyPrompt;
use cardiee::storage::Database;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CARDIEE_LOG", "warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.home)?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();

    let format = cli.output.unwrap_or(config.general.default_output);
    let today = Local::now().date_naive();
    log::debug!("Using {} (today is {today})", paths.root.display());

    let output = match cli.command {
        Commands::Init => commands::init(&paths, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        Commands::Add(args) => commands::add(&open_store(&paths)?, &args, today, format)?,
        Commands::List(args) => commands::list(&open_store(&paths)?, &args, today, format)?,
        Commands::Remove(args) => {
            commands::remove(&open_store(&paths)?, &mut prompt(format), &args, format)?
        },
        Commands::Clear(args) => {
            commands::clear(&open_store(&paths)?, &mut prompt(format), &args, format)?
        },
        Commands::Study(args) => {
            let options = StudyOptions {
                today,
                confirm_start: config.study.confirm_start && !args.yes,
                reveal_answer_on_miss: config.study.reveal_answer_on_miss,
                seed: args.seed,
            };
            commands::study(&open_store(&paths)?, &mut prompt(format), &options, format)
                .context("Study session stopped")?
        },
    };

    println!("{output}");
    Ok(())
}

fn open_store(paths: &Paths) -> Result<SqliteCardStore> {
    Ok(SqliteCardStore::with_database(Database::open(paths)?))
}

/// Prompts for interactive commands. In JSON mode they are written to stderr.
fn prompt(format: OutputFormat) -> StudyPrompt<io::StdinLock<'static>, Box<dyn Write>> {
    let output: Box<dyn Write> = match format {
        OutputFormat::Json => Box::new(io::stderr()),
        OutputFormat::Pretty => Box::new(io::stdout()),
    };
    StudyPrompt::new(io::stdin().lock(), output)
}
