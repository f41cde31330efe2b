use anyhow::Result;
use phoid::cli::{parse_args, Commands};
use phoid::commands::{self, CommandContext};

fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.global.verbose);

    // `init` must work without a loadable configuration.
    let context = || CommandContext::from_args(&cli.global);

    match cli.command {
        Commands::Init { force } => commands::init::init_config(force),
        Commands::List { format } => commands::list::list_ids(&context()?, format),
        Commands::Show { id, format } => commands::show::show_id(&context()?, &id, format),
        Commands::Verify { format } => commands::verify::verify_ids(&context()?, format),
        Commands::Hash { file, format } => {
            commands::hash::hash_fragment(&context()?, &file, format)
        }
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
