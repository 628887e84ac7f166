pub mod commands;
pub mod output;

use crate::errors::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "sta")]
#[command(about = "Interactive browser for the git stash list")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use the plain numbered menu instead of the full-screen browser
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the stash list interactively (the default)
    Browse,

    /// Print the stash list and exit
    List {
        /// Show creation times
        #[arg(long, short)]
        verbose: bool,

        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the action bound to Enter in the browser
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the configured default action
    Get,

    /// Set the default action (apply, view or pop)
    Set {
        /// The action to bind to Enter
        value: String,
    },

    /// Remove the configured default action
    Unset,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        self.setup_logging();
        if self.no_color {
            console::set_colors_enabled(false);
        }

        match self.command {
            None | Some(Commands::Browse) => commands::browse::run(self.plain).await,
            Some(Commands::List { verbose, json }) => commands::list::run(verbose, json).await,
            Some(Commands::Config { action }) => commands::config::run(action).await,
            Some(Commands::Completions { shell }) => {
                commands::completions::generate_completions(shell)
            }
        }
    }

    fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .without_time();

        if self.no_color {
            subscriber.with_ansi(false).init();
        } else {
            subscriber.init();
        }
    }
}
