//! Command-line interface definitions.
//!
//! One subcommand per pipeline, no required flags; each accepts an optional
//! override for its output file.

use crate::config;
use clap::{Parser, Subcommand};

/// Command-line arguments for the TBMM scrape pipelines.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Harvest roll-call voting records across all configured periods
    Votes {
        /// Path of the persisted dataset file
        #[arg(long, default_value = config::DATA_FILE)]
        data_file: String,
    },
    /// Harvest member contact details and e-mail addresses
    Contacts {
        /// Path of the contacts output file
        #[arg(long, default_value = config::CONTACTS_FILE)]
        contacts_file: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_votes_defaults() {
        let cli = Cli::parse_from(["tbmm_scrape", "votes"]);
        match cli.command {
            Command::Votes { data_file } => assert_eq!(data_file, "data.json"),
            _ => panic!("expected votes subcommand"),
        }
    }

    #[test]
    fn test_contacts_with_override() {
        let cli = Cli::parse_from(["tbmm_scrape", "contacts", "--contacts-file", "/tmp/c.json"]);
        match cli.command {
            Command::Contacts { contacts_file } => assert_eq!(contacts_file, "/tmp/c.json"),
            _ => panic!("expected contacts subcommand"),
        }
    }
}
