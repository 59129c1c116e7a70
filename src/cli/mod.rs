pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tootfetch")]
#[command(about = "Fetch public posts from a Mastodon profile and export them as JSON", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/tootfetch/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to the interactive form
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch posts without the interactive form
    Fetch {
        /// Profile address, e.g. https://mastodon.social/@Gargron
        url: String,

        /// Number of posts to fetch (default from config, usually 100)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Directory to save the export into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the JSON document instead of saving a file
        #[arg(long)]
        stdout: bool,
    },
    /// Launch the interactive form
    Tui,
    /// Show configuration details
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from([
            "tootfetch",
            "fetch",
            "https://social.example/@someone",
            "-n",
            "25",
            "--output",
            "/tmp/out",
        ]);

        match cli.command {
            Some(Commands::Fetch {
                url,
                count,
                output,
                stdout,
            }) => {
                assert_eq!(url, "https://social.example/@someone");
                assert_eq!(count, Some(25));
                assert_eq!(output, Some(PathBuf::from("/tmp/out")));
                assert!(!stdout);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::parse_from(["tootfetch", "--config", "/tmp/c.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
