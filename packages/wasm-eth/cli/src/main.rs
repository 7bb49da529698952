use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod input;
mod key;
mod recover;
mod tx;

#[derive(Parser)]
#[command(name = "wasm-eth-cli")]
#[command(about = "Sign and recover legacy Ethereum transactions")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Tx(tx::TxCommand),
    #[command(flatten)]
    Recover(recover::RecoverCommand),
    #[command(flatten)]
    Key(key::KeyCommand),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tx(command) => tx::handle_command(command),
        Commands::Recover(command) => recover::handle_command(command),
        Commands::Key(command) => key::handle_command(command),
    }
}
