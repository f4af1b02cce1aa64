mod args;
mod config;
mod global;
mod handlers;

use base_chat::CodecConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Commands;
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "base-chat")]
#[command(version)]
#[command(
    about = "Frame binary data as single-line text that survives chat and messaging channels",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Logs go to stderr so frames on stdout stay clean. `RUST_LOG` overrides
/// the -q/-v flags.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.log_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    let config = CodecConfig::load_with_overrides()?;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global, &config),
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &config),
        Commands::Inspect(args) => handlers::inspect::handle(args, &cli.global, &config),
        Commands::Info(args) => handlers::info::handle(args, &cli.global, &config),
    }
}
