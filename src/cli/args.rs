use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "cardiee")]
#[command(about = "Spaced-repetition flashcards in your terminal")]
#[command(long_about = "cardiee - spaced-repetition flashcards in your terminal

Keep a deck of question/answer cards and review the ones that are due.
Cards you answer correctly come back after a growing interval
(2, 3, 5, 6, 8, ... days). Cards you miss are due again tomorrow and are
retried until you get them right.

QUICK START:
  cardiee init                          Create the deck
  cardiee add \"Capital of Peru?\" Lima   Add a card
  cardiee list --due                    Show what is due
  cardiee study                         Review due cards

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file, which is
    /// 'pretty' unless changed.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding the database and config file
    #[arg(long, env = "CARDIEE_HOME", global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database
    ///
    /// Creates the data directory, the card database and a default config
    /// file. Safe to run again on an existing deck.
    Init,

    /// Add a new flashcard
    ///
    /// The card is due immediately.
    ///
    /// # Examples
    ///
    ///   cardiee add "Capital of Peru?" "Lima"
    ///   cardiee add "7 * 8" 56
    #[command(alias = "a")]
    Add(AddArgs),

    /// Remove a flashcard by ID
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// List flashcards
    ///
    /// Shows ID, question, answer, deadline and growth factor for every
    /// card, or only the due ones with --due.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Remove every flashcard
    Clear(ClearArgs),

    /// Review the cards that are due
    ///
    /// Cards are shown in random order. Type the answer; matching ignores
    /// case and surrounding whitespace. Missed cards go to the back of the
    /// queue and the pass ends once every card has been answered correctly.
    /// Each answer is saved as soon as it is given.
    #[command(alias = "s")]
    Study(StudyArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   cardiee completions zsh > ~/.zsh/completions/_cardiee
    ///   source <(cardiee completions bash)
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// The question of the flashcard
    pub question: String,

    /// The answer of the flashcard
    pub answer: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// The ID of the flashcard to remove
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show cards that are due today
    #[arg(short, long)]
    pub due: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct StudyArgs {
    /// Start without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Seed for the card order, for a reproducible pass
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["cardiee", "add", "Q?", "A"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.question, "Q?");
                assert_eq!(args.answer, "A");
            },
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_study_flags() {
        let cli =
            Cli::try_parse_from(["cardiee", "study", "--yes", "--seed", "9", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Commands::Study(args) => {
                assert!(args.yes);
                assert_eq!(args.seed, Some(9));
            },
            _ => panic!("expected study"),
        }
    }

    #[test]
    fn test_remove_requires_numeric_id() {
        assert!(Cli::try_parse_from(["cardiee", "remove", "abc"]).is_err());
    }
}
