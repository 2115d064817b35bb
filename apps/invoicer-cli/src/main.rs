//! # invoicer
//!
//! Command-line front end for Bills of Supply.
//!
//! ## Commands
//! ```text
//! invoicer words 1234567.89                 amount in words
//! invoicer summary --bill bill.json         totals of a bill file
//! invoicer document --bill bill.json        printable document model (JSON)
//!          [--kind full|header|body] [--out DIR] [--stdout]
//! invoicer config show | init [--force]     effective / default config
//! ```
//!
//! ## Logging
//! Logs go to stderr. `RUST_LOG` takes precedence over `--verbose`.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use invoicer_core::document::DocumentKind;

use crate::config::InvoicerConfig;

// =============================================================================
// Command Line
// =============================================================================

#[derive(Parser)]
#[command(name = "invoicer", version)]
#[command(about = "Bill of Supply tools: amount in words, totals and printable documents")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an amount in words, Indian numbering
    Words {
        /// Amount in Rupees ("1234.50"); anything unparsable reads as zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Print item count, totals and amount in words of a bill file
    Summary {
        #[arg(long)]
        bill: PathBuf,
    },
    /// Build the printable document model of a bill file
    Document {
        #[arg(long)]
        bill: PathBuf,

        #[arg(long, value_enum, default_value_t = KindArg::Full)]
        kind: KindArg,

        /// Output directory (defaults to output.dir from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration to the config path
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Complete bill
    Full,
    /// Colour letterhead pass
    Header,
    /// Black and white body pass
    Body,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Full => DocumentKind::FullBill,
            KindArg::Header => DocumentKind::HeaderSection,
            KindArg::Body => DocumentKind::BodySection,
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Words { amount } => {
            println!("{}", commands::words(&amount));
        }

        Command::Summary { bill } => {
            let bill = commands::load_bill(&bill)?;
            println!("{}", commands::summary(&bill)?);
        }

        Command::Document {
            bill,
            kind,
            out,
            stdout,
        } => {
            let config = InvoicerConfig::load(cli.config)?;
            let bill = commands::load_bill(&bill)?;
            let document = commands::build_document(kind.into(), &bill, &config)?;

            if stdout {
                println!(
                    "{}",
                    commands::render_document(&document, config.output.pretty)?
                );
            } else {
                let dir = out.unwrap_or_else(|| config.output.dir.clone());
                let path = commands::write_document(&document, &dir, config.output.pretty)?;
                println!("{}", path.display());
            }
        }

        Command::Config { action } => match action {
            ConfigAction::Show => {
                let config = InvoicerConfig::load(cli.config)?;
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Init { force } => {
                let path = InvoicerConfig::default().save(cli.config, force)?;
                println!("{}", path.display());
            }
        },
    }

    debug!("Done");
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,invoicer=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_document_args() {
        let cli = Cli::try_parse_from([
            "invoicer", "document", "--bill", "bill.json", "--kind", "body", "--stdout",
        ])
        .unwrap();

        match cli.command {
            Command::Document { kind, stdout, .. } => {
                assert_eq!(DocumentKind::from(kind), DocumentKind::BodySection);
                assert!(stdout);
            }
            _ => panic!("expected document command"),
        }
    }

    #[test]
    fn test_words_accepts_negative_amount() {
        let cli = Cli::try_parse_from(["invoicer", "words", "-12.50"]).unwrap();
        assert!(matches!(cli.command, Command::Words { amount } if amount == "-12.50"));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["invoicer", "config", "show", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
