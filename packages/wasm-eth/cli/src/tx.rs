use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use wasm_eth::{sign_with_key, signing_hash, PrivateKey, TransactionRecord};

use crate::input::read_input;

#[derive(Subcommand)]
pub enum TxCommand {
    /// Sign a transaction JSON document and print the raw transaction
    Sign {
        /// Path to the transaction JSON (use '-' to read from stdin)
        path: PathBuf,
        /// Private key as 0x-prefixed 32-byte hex
        #[arg(long, env = "ETH_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        /// Print the nine signed fields as JSON instead of raw hex
        #[arg(long)]
        list: bool,
    },
    /// Print the Keccak-256 digest that gets signed
    Hash {
        /// Path to the transaction JSON (use '-' to read from stdin)
        path: PathBuf,
    },
}

pub fn handle_command(command: TxCommand) -> Result<()> {
    match command {
        TxCommand::Sign {
            path,
            private_key,
            list,
        } => {
            let record = load_record(&path)?;
            let key = PrivateKey::from_hex(private_key.trim()).context("Invalid private key")?;
            let signed = sign_with_key(&record, &key).context("Failed to sign transaction")?;
            if list {
                let json = serde_json::to_string_pretty(&signed)
                    .context("Failed to serialize signed fields")?;
                println!("{}", json);
            } else {
                println!("{}", signed.to_hex());
            }
            Ok(())
        }
        TxCommand::Hash { path } => {
            let record = load_record(&path)?;
            let digest = signing_hash(&record).context("Failed to encode transaction")?;
            println!("0x{}", hex::encode(digest));
            Ok(())
        }
    }
}

fn load_record(path: &Path) -> Result<TransactionRecord> {
    let json = read_input(path)?;
    TransactionRecord::from_json_str(&json).context("Failed to parse transaction")
}
