use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

pub use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "phoid")]
#[command(about = "Cut-based photon ID working points and their hash registry", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Additional fragment file to load (repeatable)
    #[arg(long = "fragment", global = true, value_name = "FILE")]
    pub fragments: Vec<PathBuf>,

    /// Do not load the built-in fragments
    #[arg(long, global = true)]
    pub no_builtin: bool,

    /// Project configuration file (default: nearest .phoid.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Plain ASCII output without colors
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered IDs with their hashes
    List {
        /// Output format (default: from .phoid.toml, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the working points and cut flow of one ID
    Show {
        /// Full ID name, e.g. cutBasedPhotonID-Spring16-V2p2-delayedphoton-loose
        id: String,

        /// Output format (default: from .phoid.toml, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Verify every fragment against its declared hashes
    Verify {
        /// Output format (default: from .phoid.toml, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Compute the hashes of a fragment file without verifying it
    Hash {
        /// Fragment file
        file: PathBuf,

        /// Output format (default: from .phoid.toml, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Write a default .phoid.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "phoid",
            "verify",
            "--fragment",
            "a.toml",
            "--fragment",
            "b.toml",
            "--no-builtin",
            "-vv",
        ])
        .unwrap();

        assert_eq!(
            cli.global.fragments,
            vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
        );
        assert!(cli.global.no_builtin);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Verify { format: None }));
    }

    #[test]
    fn test_show_with_json() {
        let cli = Cli::try_parse_from(["phoid", "show", "some-id", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Show { id, format } => {
                assert_eq!(id, "some-id");
                assert_eq!(format, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
