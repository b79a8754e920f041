mod args;
mod config;
mod global;
mod handlers;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Commands;
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "partner-file")]
#[command(version)]
#[command(about = "Parse, normalize and write .partner ERP import files", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(&cli.global);

    let config = config::load_config(&cli.global)?;

    match cli.command {
        Commands::Parse(args) => handlers::parse::handle(args, &cli.global, &config),
        Commands::Apply(args) => handlers::apply::handle(args, &cli.global, &config),
        Commands::Serialize(args) => handlers::serialize::handle(args, &cli.global, &config),
        Commands::Aliases(args) => handlers::aliases::handle(args, &cli.global, &config),
        Commands::Config(args) => handlers::config::handle(args, &cli.global, &config),
    }
}

/// Logs go to stderr. `-v`/`-q` win over `RUST_LOG`, which wins over the
/// default `warn` level.
fn init_tracing(global: &GlobalArgs) {
    let filter = if global.verbose {
        EnvFilter::new("debug")
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
