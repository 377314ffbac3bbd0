//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::{ExportKind, OutputFormat};

/// Church visitor registration - register, search, export and share visitors.
#[derive(Parser, Debug)]
#[command(name = "visitantes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory (defaults to ~/.church-visitors).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new visitor.
    Add {
        /// Full name.
        #[arg(short, long)]
        name: String,

        /// Phone with area code (digits are masked automatically).
        #[arg(short, long)]
        phone: String,

        /// City.
        #[arg(short, long)]
        city: String,

        /// Service date (dd/mm/aaaa or aaaa-mm-dd).
        #[arg(short, long)]
        date: String,

        /// Service time, e.g. 19:00.
        #[arg(short, long)]
        time: String,

        /// Optional observations.
        #[arg(short, long)]
        obs: Option<String>,
    },

    /// List visitors, newest first.
    List {
        /// Filter by name, city or phone.
        #[arg(short, long)]
        search: Option<String>,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Export visitors to a spreadsheet (xlsx) or CSV file.
    Export {
        /// File format: xlsx or csv.
        #[arg(default_value = "xlsx")]
        format: String,

        /// Only export visitors matching this search.
        #[arg(short, long)]
        search: Option<String>,

        /// Output directory (defaults to the configured exports directory).
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Clear the whole list after a spreadsheet export. Cannot be undone.
        #[arg(long)]
        clear_after: bool,
    },

    /// Send the visitor list to a WhatsApp number.
    Whatsapp {
        /// Destination number (defaults to the configured number).
        number: Option<String>,

        /// Only send visitors matching this search.
        #[arg(short, long)]
        search: Option<String>,

        /// Print the link without opening it.
        #[arg(long)]
        no_open: bool,
    },

    /// Delete one visitor.
    Delete {
        /// Visitor id (full or unique prefix).
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every visitor.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Import visitors from a JSON file exported by the browser app.
    Import {
        /// JSON file (visitor array or local storage dump).
        file: PathBuf,
    },

    /// Manage configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Create the default configuration file.
    Init,
    /// Show the effective configuration.
    Show,
    /// Print the configuration file path.
    Path,
}

/// Parse a list output format argument.
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse()
}

/// Parse an export format argument.
pub fn parse_export_kind(format: &str) -> Result<ExportKind, String> {
    format.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "visitantes", "add", "-n", "Maria Silva", "-p", "11987654321", "-c", "São Paulo",
            "-d", "10/03/2024", "-t", "19:00",
        ])
        .unwrap();

        match cli.command {
            Commands::Add { name, obs, .. } => {
                assert_eq!(name, "Maria Silva");
                assert!(obs.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_defaults_to_xlsx() {
        let cli = Cli::try_parse_from(["visitantes", "--data-dir", "/tmp/v", "export"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/v")));
        match cli.command {
            Commands::Export {
                format,
                clear_after,
                ..
            } => {
                assert_eq!(parse_export_kind(&format), Ok(ExportKind::Spreadsheet));
                assert!(!clear_after);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_add_requires_fields() {
        assert!(Cli::try_parse_from(["visitantes", "add", "-n", "Maria"]).is_err());
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
